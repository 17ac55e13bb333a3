use super::{PopulateError, Result};
use serde_json::{Map, Value};
use std::str::FromStr;

/// Parsed source document. The top level is always a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    root: Map<String, Value>,
}

impl Document {
    /// Parse document text
    pub fn parse(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Parse a raw response body
    pub fn parse_slice(bytes: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_value(value)
    }

    /// Wrap an already parsed value
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(PopulateError::Parse(format!(
                "expected an object at the top level, found {}",
                value_kind(&other)
            ))),
        }
    }

    /// Get the value stored under `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    /// Keys in document order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.root.keys().map(String::as_str)
    }

    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.root.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }
}

impl FromStr for Document {
    type Err = PopulateError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<Value> for Document {
    type Error = PopulateError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}

/// Short name of a JSON value's kind, for error messages
pub(crate) const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_keeps_key_order() {
        let doc = Document::parse(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();

        let keys: Vec<_> = doc.keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
        assert_eq!(doc.len(), 3);
    }

    #[test]
    fn test_parse_rejects_malformed_text() {
        let err = Document::parse(r#"{"id": 78,"#).unwrap_err();
        assert!(matches!(err, PopulateError::Parse(_)));
    }

    #[test]
    fn test_top_level_must_be_object() {
        let err = Document::from_value(json!([1, 2, 3])).unwrap_err();

        match err {
            PopulateError::Parse(message) => assert!(message.contains("an array")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_str() {
        let doc: Document = r#"{"title": "Alien"}"#.parse().unwrap();
        assert_eq!(doc.get("title"), Some(&json!("Alien")));
        assert!(doc.get("missing").is_none());
    }
}
