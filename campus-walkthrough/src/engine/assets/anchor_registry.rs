use std::fmt;

use bevy::prelude::*;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// Board contents for one point of interest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnchorInfo {
    /// Display name shown in the board header.
    pub name: String,
    pub info: String,
}

/// Anchor name → board contents, in the order the feed lists them.
///
/// Loaded once as a JSON asset and inserted as a resource. Iteration order
/// decides which board wins when several anchors are in range, so the
/// document order of the keys is kept instead of hashing them.
#[derive(Asset, TypePath, Resource, Debug, Clone, Default, PartialEq)]
pub struct AnchorRegistry {
    entries: Vec<(String, AnchorInfo)>,
}

impl AnchorRegistry {
    pub fn from_entries(entries: impl IntoIterator<Item = (String, AnchorInfo)>) -> Self {
        let mut registry = Self::default();
        for (key, info) in entries {
            registry.insert(key, info);
        }
        registry
    }

    /// A repeated key keeps its first position and takes the latest value.
    fn insert(&mut self, key: String, info: AnchorInfo) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = info,
            None => self.entries.push((key, info)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnchorInfo)> {
        self.entries.iter().map(|(key, info)| (key.as_str(), info))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&AnchorInfo> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, info)| info)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'de> Deserialize<'de> for AnchorRegistry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RegistryVisitor;

        impl<'de> Visitor<'de> for RegistryVisitor {
            type Value = AnchorRegistry;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an object mapping anchor names to {name, info}")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut registry = AnchorRegistry::default();
                while let Some((key, info)) = map.next_entry::<String, AnchorInfo>()? {
                    registry.insert(key, info);
                }
                Ok(registry)
            }
        }

        deserializer.deserialize_map(RegistryVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"{
        "Reception": { "name": "Reception", "info": "Ask here" },
        "Lobby": { "name": "Main Lobby", "info": "Welcome", "floor": 0 },
        "Canteen": { "name": "Canteen", "info": "Open 8-4" },
        "Atrium": { "name": "Atrium", "info": "Two storeys" }
    }"#;

    #[test]
    fn keeps_document_order() {
        let registry: AnchorRegistry = serde_json::from_str(FEED).unwrap();
        let keys: Vec<&str> = registry.keys().collect();
        assert_eq!(keys, ["Reception", "Lobby", "Canteen", "Atrium"]);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let registry: AnchorRegistry = serde_json::from_str(FEED).unwrap();
        let lobby = registry.get("Lobby").unwrap();
        assert_eq!(lobby.name, "Main Lobby");
        assert_eq!(lobby.info, "Welcome");
    }

    #[test]
    fn repeated_key_keeps_first_position() {
        let registry: AnchorRegistry = serde_json::from_str(
            r#"{
                "A": { "name": "first", "info": "" },
                "B": { "name": "b", "info": "" },
                "A": { "name": "second", "info": "" }
            }"#,
        )
        .unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.keys().next(), Some("A"));
        assert_eq!(registry.get("A").map(|a| a.name.as_str()), Some("second"));
    }

    #[test]
    fn non_object_feed_is_rejected() {
        assert!(serde_json::from_str::<AnchorRegistry>("[1, 2]").is_err());
        assert!(serde_json::from_str::<AnchorRegistry>(r#"{"A": {"name": "x"}}"#).is_err());
    }
}
