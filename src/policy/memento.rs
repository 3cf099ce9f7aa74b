//! Opaque per-policy configuration blob.

use serde::{Deserialize, Serialize};

/// Persisted policy settings.
///
/// The host stores it without interpreting its keys; only the owning policy
/// reads or writes them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Memento(toml::Table);

impl Memento {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.as_str())
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(|v| v.as_bool())
    }

    pub fn put_str(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0
            .insert(key.into(), toml::Value::String(value.into()));
    }

    pub fn put_bool(&mut self, key: impl Into<String>, value: bool) {
        self.0.insert(key.into(), toml::Value::Boolean(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memento_values() {
        let mut memento = Memento::new();
        assert!(memento.is_empty());

        memento.put_str("prefix", "WI");
        memento.put_bool("strict", true);

        assert_eq!(memento.get_str("prefix"), Some("WI"));
        assert_eq!(memento.get_bool("strict"), Some(true));
        assert_eq!(memento.get_str("strict"), None);
        assert!(memento.get_bool("missing").is_none());
    }

    #[test]
    fn test_memento_is_transparent_table() {
        let memento: Memento = toml::from_str("prefix = \"WI\"\n").unwrap();
        assert_eq!(memento.get_str("prefix"), Some("WI"));
    }
}
