//! Structured records: the persisted form of an operation.
//!
//! A record is a string-keyed map of plain JSON values. The `type` key holds
//! the [`OperationKind`] tag and the `applied` key holds the [`ApplyState`];
//! every other key belongs to the concrete operation.
//!
//! Records read back from storage are untrusted. Accessors fail with
//! `MalformedRecord` on missing or wrong-shaped fields, and [`Record::path`]
//! re-validates path fields so a stored path can never bypass
//! [`validate_path`](crate::validate_path).

use super::{ApplyState, OperationKind};
use crate::error::{OpError, Result};
use crate::path::SafePath;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key holding the type discriminator.
pub const TYPE_KEY: &str = "type";
/// Key holding the applied flag.
pub const APPLIED_KEY: &str = "applied";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Starts a record tagged with `kind`.
    pub fn new(kind: OperationKind) -> Self {
        let mut map = Map::new();
        map.insert(TYPE_KEY.to_string(), Value::from(kind.as_str()));
        Record(map)
    }

    /// Wraps a raw map without checking it.
    pub fn from_map(map: Map<String, Value>) -> Self {
        Record(map)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn with_path(self, key: &str, path: &SafePath) -> Self {
        self.with_value(key, Value::from(path.as_str()))
    }

    pub fn with_str(self, key: &str, value: impl Into<String>) -> Self {
        self.with_value(key, Value::String(value.into()))
    }

    pub fn with_bool(self, key: &str, value: bool) -> Self {
        self.with_value(key, Value::Bool(value))
    }

    pub fn with_state(self, state: ApplyState) -> Self {
        self.with_bool(APPLIED_KEY, state.is_applied())
    }

    pub fn with_value(mut self, key: &str, value: Value) -> Self {
        self.0.insert(key.to_string(), value);
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Reads the type discriminator.
    pub fn kind(&self) -> Result<OperationKind> {
        self.string(TYPE_KEY)?.parse()
    }

    /// Fails unless the record is tagged with `expected`.
    pub fn expect_kind(&self, expected: OperationKind) -> Result<()> {
        let found = self.kind()?;
        if found != expected {
            return Err(OpError::malformed(format!(
                "expected type '{}', found '{}'",
                expected, found
            )));
        }
        Ok(())
    }

    /// Required field of any shape.
    pub fn value(&self, key: &str) -> Result<&Value> {
        self.0
            .get(key)
            .ok_or_else(|| OpError::malformed(format!("missing field '{}'", key)))
    }

    /// Required string field.
    pub fn string(&self, key: &str) -> Result<&str> {
        self.value(key)?
            .as_str()
            .ok_or_else(|| wrong_shape(key, "a string"))
    }

    /// Required boolean field.
    pub fn bool(&self, key: &str) -> Result<bool> {
        self.value(key)?
            .as_bool()
            .ok_or_else(|| wrong_shape(key, "a boolean"))
    }

    /// Required path field, validated.
    ///
    /// Missing or non-string is `MalformedRecord`; unsafe is `InvalidPath`.
    pub fn path(&self, key: &str) -> Result<SafePath> {
        SafePath::new(self.string(key)?)
    }

    /// Path field that may be absent or `null`.
    pub fn optional_path(&self, key: &str) -> Result<Option<SafePath>> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(_) => self.path(key).map(Some),
        }
    }

    /// Applied state; a record without the `applied` key is pending.
    pub fn state(&self) -> Result<ApplyState> {
        if !self.contains(APPLIED_KEY) {
            return Ok(ApplyState::Pending);
        }
        self.bool(APPLIED_KEY).map(ApplyState::from)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.0)
            .map_err(|e| OpError::malformed(format!("cannot encode record: {}", e)))
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.0)
            .map_err(|e| OpError::malformed(format!("cannot encode record: {}", e)))
    }

    /// Parses JSON text; the document must be an object.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| OpError::malformed(format!("invalid JSON: {}", e)))?;
        Record::try_from(value)
    }
}

fn wrong_shape(key: &str, expected: &str) -> OpError {
    OpError::malformed(format!("field '{}' must be {}", key, expected))
}

impl TryFrom<Value> for Record {
    type Error = OpError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Record(map)),
            other => Err(OpError::malformed(format!(
                "expected an object, found {}",
                json_type_name(&other)
            ))),
        }
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Object(record.0)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
