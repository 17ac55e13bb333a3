use super::{
    MappingError, PopulateError, Result,
    descriptor::{Describe, TypeDescriptor},
    document::{Document, value_kind},
};
use once_cell::sync::Lazy;
use serde_json::{Map, Value};
use std::fmt::{self, Write as _};
use std::sync::Arc;
use tracing::trace;

/// A key found in the document that the target type does not declare
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKey<'a> {
    /// Type whose document carried the key
    pub type_name: &'static str,
    /// The unrecognized key
    pub key: &'a str,
    /// Location of the enclosing object, e.g. `credits.cast[2]`
    pub path: String,
}

type UnknownKeyHook = dyn Fn(&UnknownKey<'_>) + Send + Sync;

static DEFAULT_POPULATOR: Lazy<Populator> = Lazy::new(Populator::new);

/// Populate `T` from a parsed document with default settings
pub fn populate<T: Describe>(document: &Document) -> Result<T> {
    DEFAULT_POPULATOR.populate(document)
}

/// Parse `text` and populate `T` with default settings
pub fn from_str<T: Describe>(text: &str) -> Result<T> {
    DEFAULT_POPULATOR.populate_str(text)
}

/// Turns documents into described types.
///
/// A populator holds configuration only and can be shared between threads.
#[derive(Clone)]
pub struct Populator {
    max_depth: usize,
    on_unknown_key: Option<Arc<UnknownKeyHook>>,
}

impl Populator {
    /// Nesting limit applied when none is configured
    pub const DEFAULT_MAX_DEPTH: usize = 32;

    #[must_use]
    pub fn new() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            on_unknown_key: None,
        }
    }

    /// Limit how many objects deep population may go. The top-level object
    /// counts as one level.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    /// Call `hook` once for every document key the target type does not declare.
    /// The hook only observes; it cannot change the result.
    #[must_use]
    pub fn on_unknown_key<F>(mut self, hook: F) -> Self
    where
        F: Fn(&UnknownKey<'_>) + Send + Sync + 'static,
    {
        let hook: Arc<UnknownKeyHook> = Arc::new(hook);
        self.on_unknown_key = Some(hook);
        self
    }

    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Build a `T` from `document`
    pub fn populate<T: Describe>(&self, document: &Document) -> Result<T> {
        Walk::new(self).fill::<T>(document.as_map())
    }

    /// Parse `text` and build a `T` from it
    pub fn populate_str<T: Describe>(&self, text: &str) -> Result<T> {
        let document = Document::parse(text)?;
        self.populate(&document)
    }

    /// Build a `T` from an already parsed value, which must be an object
    pub fn populate_value<T: Describe>(&self, value: &Value) -> Result<T> {
        match value.as_object() {
            Some(map) => Walk::new(self).fill::<T>(map),
            None => Err(PopulateError::Parse(format!(
                "expected an object at the top level, found {}",
                value_kind(value)
            ))),
        }
    }
}

impl Default for Populator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Populator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Populator")
            .field("max_depth", &self.max_depth)
            .field("on_unknown_key", &self.on_unknown_key.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Copy)]
enum Segment {
    Key(&'static str),
    Index(usize),
}

/// State of a single populate call
pub(crate) struct Walk<'a> {
    max_depth: usize,
    on_unknown_key: Option<&'a UnknownKeyHook>,
    types: Vec<&'static str>,
    path: Vec<Segment>,
}

impl<'a> Walk<'a> {
    fn new(populator: &'a Populator) -> Self {
        Self {
            max_depth: populator.max_depth,
            on_unknown_key: populator.on_unknown_key.as_deref(),
            types: Vec::new(),
            path: Vec::new(),
        }
    }

    /// Construct a `T` and fill its declared members from `map`
    pub(crate) fn fill<T: Describe>(&mut self, map: &Map<String, Value>) -> Result<T> {
        let descriptor = T::descriptor();

        if self.types.len() >= self.max_depth {
            return Err(MappingError {
                type_name: descriptor.name(),
                key: self.last_key().to_string(),
                path: self.path(),
                reason: format!("nesting depth exceeds the limit of {}", self.max_depth),
            }
            .into());
        }

        let mut instance = descriptor.construct().ok_or(PopulateError::Construction {
            type_name: descriptor.name(),
        })?;

        self.types.push(descriptor.name());
        let result = self.assign_members(descriptor, map, &mut instance);
        self.types.pop();

        result.map(|()| instance)
    }

    fn assign_members<T>(
        &mut self,
        descriptor: &TypeDescriptor<T>,
        map: &Map<String, Value>,
        instance: &mut T,
    ) -> Result<()> {
        for field in descriptor.fields() {
            let Some(assign) = field.assign() else {
                continue;
            };
            // null reads the same as a missing key
            let Some(value) = map.get(field.key()).filter(|v| !v.is_null()) else {
                continue;
            };

            self.path.push(Segment::Key(field.key()));
            let result = assign(instance, value, self);
            self.path.pop();
            result?;
        }

        for key in map.keys() {
            if !descriptor.declares(key) {
                self.report_unknown(descriptor.name(), key);
            }
        }

        Ok(())
    }

    fn report_unknown(&self, type_name: &'static str, key: &str) {
        let path = self.path();
        trace!(type_name, key, path = %path, "ignoring unrecognized key");

        if let Some(hook) = self.on_unknown_key {
            hook(&UnknownKey {
                type_name,
                key,
                path,
            });
        }
    }

    pub(crate) fn enter_index(&mut self, index: usize) {
        self.path.push(Segment::Index(index));
    }

    pub(crate) fn leave(&mut self) {
        self.path.pop();
    }

    /// Mapping failure for member `key` of the type currently being filled
    pub(crate) fn mismatch(&self, key: &str, reason: impl Into<String>) -> PopulateError {
        MappingError {
            type_name: self.types.last().copied().unwrap_or("<root>"),
            key: key.to_string(),
            path: self.path(),
            reason: reason.into(),
        }
        .into()
    }

    fn last_key(&self) -> &'static str {
        self.path
            .iter()
            .rev()
            .find_map(|segment| match segment {
                Segment::Key(key) => Some(*key),
                Segment::Index(_) => None,
            })
            .unwrap_or("")
    }

    fn path(&self) -> String {
        if self.path.is_empty() {
            return "$".to_string();
        }

        let mut out = String::new();
        for segment in &self.path {
            match segment {
                Segment::Key(key) if out.is_empty() => out.push_str(key),
                Segment::Key(key) => {
                    out.push('.');
                    out.push_str(key);
                }
                Segment::Index(index) => {
                    let _ = write!(out, "[{index}]");
                }
            }
        }
        out
    }
}
