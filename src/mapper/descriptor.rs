use super::{Result, document::value_kind, populator::Walk, registry};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use tracing::trace;

pub(crate) type Assign<T> = Box<dyn Fn(&mut T, &Value, &mut Walk<'_>) -> Result<()> + Send + Sync>;

/// A type that can be populated from a [`Document`](super::Document).
///
/// Implementations list their members once in [`Describe::describe`]; the
/// descriptor is built on first use and cached for the life of the process.
/// `describe` must not call [`Describe::descriptor`] for any type; nested types
/// are referenced lazily through the builder.
pub trait Describe: Sized + 'static {
    /// Build the descriptor for this type
    fn describe() -> TypeDescriptor<Self>;

    /// Cached descriptor for this type
    fn descriptor() -> &'static TypeDescriptor<Self> {
        registry::descriptor_of::<Self>()
    }
}

/// Lazy reference to another described type
#[derive(Clone, Copy)]
pub struct TypeRef {
    name: fn() -> &'static str,
}

impl TypeRef {
    #[must_use]
    pub fn of<N: Describe>() -> Self {
        Self {
            name: || N::descriptor().name(),
        }
    }

    /// Name of the referenced type
    #[must_use]
    pub fn name(&self) -> &'static str {
        (self.name)()
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeRef").field(&self.name()).finish()
    }
}

/// How a member is filled from the document
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// Deserialized directly from the raw value
    Scalar { rust_type: &'static str },
    /// Nested described type
    Object(TypeRef),
    /// Ordered list of a nested described type
    ListOfObject(TypeRef),
    /// Declared but never populated
    Ignored,
}

/// One populatable member of a type
pub struct FieldDescriptor<T> {
    key: &'static str,
    kind: FieldKind,
    assign: Option<Assign<T>>,
}

impl<T> FieldDescriptor<T> {
    /// Document key this member is read from
    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }

    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    pub(crate) fn assign(&self) -> Option<&Assign<T>> {
        self.assign.as_ref()
    }
}

impl<T> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("key", &self.key)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Static description of a target type
pub struct TypeDescriptor<T> {
    name: &'static str,
    construct: fn() -> Option<T>,
    fields: Vec<FieldDescriptor<T>>,
    index: HashMap<&'static str, usize>,
}

impl<T: Default + 'static> TypeDescriptor<T> {
    /// Start describing a default-constructible type
    #[must_use]
    pub fn builder(name: &'static str) -> DescriptorBuilder<T> {
        DescriptorBuilder::new(name, || Some(T::default()))
    }
}

impl<T: 'static> TypeDescriptor<T> {
    /// Start describing a type with a custom constructor. A constructor that
    /// returns `None` makes every populate of this type fail.
    #[must_use]
    pub fn builder_with(name: &'static str, construct: fn() -> Option<T>) -> DescriptorBuilder<T> {
        DescriptorBuilder::new(name, construct)
    }
}

impl<T> TypeDescriptor<T> {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Members in declaration order
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor<T>] {
        &self.fields
    }

    /// Look up a member by document key
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&FieldDescriptor<T>> {
        self.index.get(key).map(|&i| &self.fields[i])
    }

    /// Whether `key` is declared, including ignored members
    #[must_use]
    pub fn declares(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Create a fresh, unpopulated instance
    #[must_use]
    pub fn construct(&self) -> Option<T> {
        (self.construct)()
    }
}

impl<T> fmt::Debug for TypeDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

/// Builder for [`TypeDescriptor`]
pub struct DescriptorBuilder<T> {
    descriptor: TypeDescriptor<T>,
}

impl<T: 'static> DescriptorBuilder<T> {
    fn new(name: &'static str, construct: fn() -> Option<T>) -> Self {
        Self {
            descriptor: TypeDescriptor {
                name,
                construct,
                fields: Vec::new(),
                index: HashMap::new(),
            },
        }
    }

    /// Member deserialized straight from the raw value: numbers, strings,
    /// booleans, options and lists of those, or any other serde type.
    #[must_use]
    pub fn scalar<V>(self, key: &'static str, set: impl Fn(&mut T, V) + Send + Sync + 'static) -> Self
    where
        V: DeserializeOwned + 'static,
    {
        let assign = boxed::<T, _>(move |target, value, walk| {
            let parsed: V = Deserialize::deserialize(value)
                .map_err(|err| walk.mismatch(key, err.to_string()))?;
            set(target, parsed);
            Ok(())
        });

        self.push(
            key,
            FieldKind::Scalar {
                rust_type: std::any::type_name::<V>(),
            },
            Some(assign),
        )
    }

    /// Member holding a nested described type
    #[must_use]
    pub fn object<N>(self, key: &'static str, set: impl Fn(&mut T, N) + Send + Sync + 'static) -> Self
    where
        N: Describe,
    {
        let assign = boxed::<T, _>(move |target, value, walk| {
            let Some(map) = value.as_object() else {
                return Err(walk.mismatch(
                    key,
                    format!("expected an object, found {}", value_kind(value)),
                ));
            };
            let nested = walk.fill::<N>(map)?;
            set(target, nested);
            Ok(())
        });

        self.push(key, FieldKind::Object(TypeRef::of::<N>()), Some(assign))
    }

    /// Member holding an ordered list of a nested described type. A value that
    /// is not an array leaves the member untouched.
    #[must_use]
    pub fn list<E>(self, key: &'static str, set: impl Fn(&mut T, Vec<E>) + Send + Sync + 'static) -> Self
    where
        E: Describe,
    {
        let assign = boxed::<T, _>(move |target, value, walk| {
            let Some(items) = value.as_array() else {
                trace!(key, found = value_kind(value), "list member is not an array, keeping default");
                return Ok(());
            };

            let mut out = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                walk.enter_index(index);
                let result = match item.as_object() {
                    Some(map) => walk.fill::<E>(map),
                    None => Err(walk.mismatch(
                        key,
                        format!("expected an object element, found {}", value_kind(item)),
                    )),
                };
                walk.leave();
                out.push(result?);
            }

            set(target, out);
            Ok(())
        });

        self.push(key, FieldKind::ListOfObject(TypeRef::of::<E>()), Some(assign))
    }

    /// Declare a key that is known but never populated
    #[must_use]
    pub fn ignore(self, key: &'static str) -> Self {
        self.push(key, FieldKind::Ignored, None)
    }

    #[must_use]
    pub fn build(self) -> TypeDescriptor<T> {
        self.descriptor
    }

    // A repeated key replaces the earlier declaration in place.
    fn push(mut self, key: &'static str, kind: FieldKind, assign: Option<Assign<T>>) -> Self {
        let field = FieldDescriptor { key, kind, assign };
        let descriptor = &mut self.descriptor;

        match descriptor.index.get(key) {
            Some(&i) => descriptor.fields[i] = field,
            None => {
                descriptor.index.insert(key, descriptor.fields.len());
                descriptor.fields.push(field);
            }
        }

        self
    }
}

impl<T> fmt::Debug for DescriptorBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DescriptorBuilder").field(&self.descriptor).finish()
    }
}

fn boxed<T, F>(assign: F) -> Assign<T>
where
    F: Fn(&mut T, &Value, &mut Walk<'_>) -> Result<()> + Send + Sync + 'static,
{
    Box::new(assign)
}
