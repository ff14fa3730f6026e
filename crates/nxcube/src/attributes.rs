//! Per-sticker attribute bags.
//!
//! An attribute bag carries auxiliary state (texture handles, tracker markers,
//! debugging labels) that must travel with a sticker. The rotation engine
//! moves bags exactly as it moves colors and never inspects their contents.

use indexmap::IndexMap;

use crate::{Color, FaceName};

/// Value stored in an [`AttributeBag`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttrValue {
    /// Flag.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer, such as an opaque texture handle.
    Uint(u64),
    /// Text.
    Text(String),
    /// Color.
    Color(Color),
    /// Face.
    Face(FaceName),
}

/// Ordered `key -> value` map attached to a single sticker.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AttributeBag(IndexMap<String, AttrValue>);
impl AttributeBag {
    /// Constructs an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the bag is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// Returns the number of entries in the bag.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the value for `key`.
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.0.get(key)
    }
    /// Returns whether there is a value for `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }
    /// Sets the value for `key`, returning the old value.
    pub fn insert(&mut self, key: impl Into<String>, value: AttrValue) -> Option<AttrValue> {
        self.0.insert(key.into(), value)
    }
    /// Removes the value for `key`, returning it.
    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        self.0.shift_remove(key)
    }

    /// Returns an iterator over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}
