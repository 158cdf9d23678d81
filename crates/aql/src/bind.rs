//! Bound values and their driver-facing kinds.

use crate::error::{AqlError, AqlResult};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder emitted into SQL text for every bound value.
pub const PLACEHOLDER: &str = "?";

/// A value bound to a `?` placeholder.
///
/// Only the four kinds a driver can bind without further hints exist here;
/// everything else is rejected when it is bound.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Bind {
    Null,
    Bool(bool),
    Int(i64),
    String(String),
}

impl Bind {
    pub fn kind(&self) -> BindKind {
        match self {
            Bind::Null => BindKind::Null,
            Bind::Bool(_) => BindKind::Bool,
            Bind::Int(_) => BindKind::Int,
            Bind::String(_) => BindKind::String,
        }
    }
}

impl TryFrom<&Value> for Bind {
    type Error = AqlError;

    fn try_from(value: &Value) -> AqlResult<Self> {
        match value {
            Value::Null => Ok(Bind::Null),
            Value::Bool(b) => Ok(Bind::Bool(*b)),
            Value::Int(i) => Ok(Bind::Int(*i)),
            Value::Str(s) => Ok(Bind::String(s.clone())),
            other => Err(AqlError::unsupported_bind_kind(other.kind_name())),
        }
    }
}

impl From<i64> for Bind {
    fn from(v: i64) -> Self {
        Bind::Int(v)
    }
}

impl From<bool> for Bind {
    fn from(v: bool) -> Self {
        Bind::Bool(v)
    }
}

impl From<&str> for Bind {
    fn from(v: &str) -> Self {
        Bind::String(v.to_string())
    }
}

impl From<String> for Bind {
    fn from(v: String) -> Self {
        Bind::String(v)
    }
}

/// Semantic kind of a bound value, for driver type binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindKind {
    Null,
    Bool,
    Int,
    String,
}

impl BindKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BindKind::Null => "null",
            BindKind::Bool => "bool",
            BindKind::Int => "int",
            BindKind::String => "string",
        }
    }
}

impl fmt::Display for BindKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered, append-only collector of bound values.
#[derive(Debug, Clone, Default)]
pub struct Binder {
    binds: Vec<Bind>,
}

impl Binder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify and append a value, returning the placeholder to inline.
    pub fn bind(&mut self, value: &Value) -> AqlResult<&'static str> {
        let bind = Bind::try_from(value)?;
        self.binds.push(bind);
        Ok(PLACEHOLDER)
    }

    /// Append an already classified value.
    pub fn bind_value(&mut self, bind: impl Into<Bind>) -> &'static str {
        self.binds.push(bind.into());
        PLACEHOLDER
    }

    pub fn values(&self) -> &[Bind] {
        &self.binds
    }

    pub fn types(&self) -> Vec<BindKind> {
        self.binds.iter().map(Bind::kind).collect()
    }

    pub fn len(&self) -> usize {
        self.binds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.binds.is_empty()
    }

    pub(crate) fn into_values(self) -> Vec<Bind> {
        self.binds
    }
}
