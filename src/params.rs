use serde_json::Value as JsonValue;

use crate::types::Fields;

/// Values attached to a statement at execute time.
///
/// Named sets bind by `:name` placeholders in insertion order; positional sets go to the
/// driver's `?` path unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundParams {
    Named(Fields),
    Positional(Vec<JsonValue>),
}

impl Default for BoundParams {
    fn default() -> Self {
        BoundParams::Named(Fields::new())
    }
}

impl BoundParams {
    #[must_use]
    pub fn named() -> Self {
        Self::default()
    }

    /// Add or replace a named value. Replacing keeps the key's original position.
    ///
    /// On a positional set the value is appended and the name is ignored.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<JsonValue>) {
        match self {
            BoundParams::Named(map) => {
                map.insert(name.into(), value.into());
            }
            BoundParams::Positional(values) => values.push(value.into()),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&JsonValue> {
        match self {
            BoundParams::Named(map) => map.get(name),
            BoundParams::Positional(_) => None,
        }
    }

    #[must_use]
    pub fn is_positional(&self) -> bool {
        matches!(self, BoundParams::Positional(_))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            BoundParams::Named(map) => map.len(),
            BoundParams::Positional(values) => values.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Values in binding order.
    pub fn values(&self) -> Box<dyn Iterator<Item = &JsonValue> + '_> {
        match self {
            BoundParams::Named(map) => Box::new(map.values()),
            BoundParams::Positional(values) => Box::new(values.iter()),
        }
    }
}

impl From<Fields> for BoundParams {
    fn from(map: Fields) -> Self {
        BoundParams::Named(map)
    }
}

impl From<Vec<JsonValue>> for BoundParams {
    fn from(values: Vec<JsonValue>) -> Self {
        BoundParams::Positional(values)
    }
}
