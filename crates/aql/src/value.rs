//! Input data model for statement specs.
//!
//! A statement spec is an ordered [`Map`] of clause names to [`Value`]s. Maps keep
//! insertion order because the compiler renders entries in exactly that order.
//!
//! # Example
//! ```ignore
//! use aql::{list, map};
//!
//! let spec = map! {
//!     "select" => list!["post_id", "post_title"],
//!     "from" => "post",
//!     "where" => map! {
//!         "post_level" => 1,
//!         0 => map! { ":operator" => "or", "a" => 1, "b" => 2 },
//!     },
//! };
//! ```

use indexmap::{Equivalent, IndexMap};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Key of a [`Map`] entry: either positional or named.
///
/// Positional entries carry raw SQL or nested groups inside conditions; named
/// entries carry columns, clause names and aliases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Index(i64),
    Name(String),
}

impl Key {
    /// The key's name, if it is a named key.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Key::Name(name) => Some(name),
            Key::Index(_) => None,
        }
    }

    /// Parse an object key: canonical decimal integers are positional.
    ///
    /// `"0"`, `"12"` and `"-3"` become indexes; `"007"`, `"-0"` and `"+1"` stay names.
    pub fn parse(raw: &str) -> Key {
        let digits = raw.strip_prefix('-').unwrap_or(raw);
        let canonical = match digits.as_bytes() {
            [b'0'] => digits.len() == raw.len(),
            [b'1'..=b'9', rest @ ..] => rest.iter().all(u8::is_ascii_digit),
            _ => false,
        };
        match raw.parse::<i64>() {
            Ok(index) if canonical => Key::Index(index),
            _ => Key::Name(raw.to_string()),
        }
    }
}

// Hashed by hand so a borrowed `NameRef` can look up named keys.
impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Key::Index(i) => {
                state.write_u8(0);
                i.hash(state);
            }
            Key::Name(name) => NameRef(name).hash(state),
        }
    }
}

struct NameRef<'a>(&'a str);

impl Hash for NameRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u8(1);
        self.0.hash(state);
    }
}

impl Equivalent<Key> for NameRef<'_> {
    fn equivalent(&self, key: &Key) -> bool {
        key.as_name() == Some(self.0)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "{i}"),
            Key::Name(name) => f.write_str(name),
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(name)
    }
}

impl From<&String> for Key {
    fn from(name: &String) -> Self {
        Key::Name(name.clone())
    }
}

impl From<i32> for Key {
    fn from(index: i32) -> Self {
        Key::Index(i64::from(index))
    }
}

impl From<i64> for Key {
    fn from(index: i64) -> Self {
        Key::Index(index)
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(i64::try_from(index).unwrap_or(i64::MAX))
    }
}

/// A dynamically shaped spec value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    /// Accepted in specs but never bindable.
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Map(Map),
}

impl Value {
    /// Short name of the value's kind, as reported in errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Lists and maps are both sequences: their values can be iterated in order.
    pub fn is_sequence(&self) -> bool {
        matches!(self, Value::List(_) | Value::Map(_))
    }

    /// The values of a list or map, in order. `None` for scalars.
    pub fn sequence_items(&self) -> Option<Vec<&Value>> {
        match self {
            Value::List(items) => Some(items.iter().collect()),
            Value::Map(map) => Some(map.values().collect()),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Str(v.clone())
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Value::Map(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => {
                let mut map = Map::with_capacity(obj.len());
                for (k, v) in obj {
                    map.insert(Key::parse(&k), Value::from(v));
                }
                Value::Map(map)
            }
        }
    }
}

/// An insertion-ordered key/value sequence.
///
/// Inserting an existing key replaces its value in place; [`Map::push`] appends
/// under the next free positional index. Equality is order-sensitive.
#[derive(Debug, Clone, Default)]
pub struct Map {
    entries: IndexMap<Key, Value>,
    next_index: i64,
}

impl Map {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
            next_index: 0,
        }
    }

    /// Insert or replace an entry, returning the previous value for the key.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        if let Key::Index(i) = key {
            self.next_index = self.next_index.max(i.saturating_add(1));
        }
        self.entries.insert(key, value.into())
    }

    /// Append a value under the next positional index.
    pub fn push(&mut self, value: impl Into<Value>) -> &mut Self {
        let index = self.next_index;
        self.insert(index, value);
        self
    }

    /// Look up a named entry.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(&NameRef(name))
    }

    pub fn first(&self) -> Option<(&Key, &Value)> {
        self.entries.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Map {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Map::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// Build a [`Map`] from `key => value` pairs, keeping their order.
///
/// Integer keys are positional, string keys are named.
#[macro_export]
macro_rules! map {
    () => {
        $crate::Map::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::Map::new();
        $( map.insert($key, $value); )+
        map
    }};
}

/// Build a [`Value::List`] from values.
#[macro_export]
macro_rules! list {
    ($($value:expr),* $(,)?) => {
        $crate::Value::List(vec![$($crate::Value::from($value)),*])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_in_place() {
        let mut map = Map::new();
        map.insert("a", 1);
        map.insert("b", 2);
        assert_eq!(map.insert("a", 3), Some(Value::Int(1)));

        let keys: Vec<String> = map.keys().map(ToString::to_string).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(map.get("a"), Some(&Value::Int(3)));
    }

    #[test]
    fn push_uses_next_index() {
        let mut map = Map::new();
        map.push("x");
        map.insert("name", "y");
        map.insert(5, "z");
        map.push("w");

        let keys: Vec<Key> = map.keys().cloned().collect();
        assert_eq!(
            keys,
            vec![
                Key::Index(0),
                Key::Name("name".into()),
                Key::Index(5),
                Key::Index(6),
            ]
        );
    }

    #[test]
    fn macros_build_nested_structures() {
        let spec = map! {
            "where" => map! { "a" => 1, 0 => list!["x", "y"] },
        };
        let where_ = spec.get("where").and_then(Value::as_map).unwrap();
        assert_eq!(where_.len(), 2);
        assert_eq!(
            where_.first(),
            Some((&Key::Name("a".into()), &Value::Int(1)))
        );
    }

    #[test]
    fn sequence_items_cover_lists_and_maps() {
        assert_eq!(Value::from(vec![1, 2]).sequence_items().unwrap().len(), 2);
        assert_eq!(
            Value::from(map! { "a" => 1 }).sequence_items(),
            Some(vec![&Value::Int(1)])
        );
        assert!(Value::from("x").sequence_items().is_none());
    }

    #[test]
    fn json_objects_keep_key_order() {
        let json: serde_json::Value =
            serde_json::from_str(r#"{"z": 1, "a": [1, "b", null], "m": 1.5}"#).unwrap();
        let value = Value::from(json);
        let map = value.as_map().unwrap();

        let keys: Vec<String> = map.keys().map(ToString::to_string).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
        assert_eq!(
            map.get("a"),
            Some(&Value::List(vec![
                Value::Int(1),
                Value::Str("b".into()),
                Value::Null
            ]))
        );
        assert_eq!(map.get("m"), Some(&Value::Float(1.5)));
    }

    #[test]
    fn equality_follows_order() {
        assert_eq!(map! { "a" => 1, "b" => 2 }, map! { "a" => 1, "b" => 2 });
        assert_ne!(map! { "a" => 1, "b" => 2 }, map! { "b" => 2, "a" => 1 });
    }

    #[test]
    fn push_after_negative_index_starts_at_zero() {
        let mut map = Map::new();
        map.insert(-4, "a");
        map.push("b");
        assert_eq!(map.keys().nth(1), Some(&Key::Index(0)));
    }

    #[test]
    fn canonical_integer_keys_are_positional() {
        assert_eq!(Key::parse("0"), Key::Index(0));
        assert_eq!(Key::parse("12"), Key::Index(12));
        assert_eq!(Key::parse("-3"), Key::Index(-3));
        for name in ["007", "-0", "+1", "1.5", "", "-", "1a", "99999999999999999999"] {
            assert_eq!(Key::parse(name), Key::Name(name.to_string()), "{name}");
        }
    }

    #[test]
    fn json_integer_keys_become_indexes() {
        let value = Value::from(serde_json::json!({ "a": 1, "0": "b IS NULL", "01": 2 }));
        let keys: Vec<Key> = value.as_map().unwrap().keys().cloned().collect();
        assert_eq!(
            keys,
            vec![Key::Name("a".into()), Key::Index(0), Key::Name("01".into())]
        );
    }

    #[test]
    fn option_maps_to_null() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("a")), Value::Str("a".into()));
    }
}
