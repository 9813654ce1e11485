//! Display metadata for spending categories.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigLoadError;

pub const FALLBACK_ICON: &str = "❔";
pub const FALLBACK_COLOR: &str = "#9E9E9E";

/// Icon and color shown next to a category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryStyle {
    pub icon: String,
    pub color: String,
}

impl CategoryStyle {
    pub fn new(icon: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            color: color.into(),
        }
    }

    /// Style used for categories missing from the registry.
    pub fn fallback() -> Self {
        Self::new(FALLBACK_ICON, FALLBACK_COLOR)
    }

    /// Parses `#RRGGBB` into its channels.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.color.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

/// Read-only category name → style mapping, iterated in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryRegistry {
    entries: BTreeMap<String, CategoryStyle>,
}

impl CategoryRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The stock catalog used when no registry file is configured.
    pub fn builtin() -> Self {
        [
            ("Cuentas Fijas", "💡", "#FF6384"),
            ("Comida", "🍔", "#36A2EB"),
            ("Entretenimiento", "🎉", "#FFCE56"),
            ("Electrodomésticos", "🔌", "#4BC0C0"),
            ("Ferretería", "🛠️", "#9966FF"),
            ("Farmacia", "💊", "#FF9F40"),
            ("Indulgencias", "🍰", "#8BC34A"),
        ]
        .into_iter()
        .map(|(name, icon, color)| (name.to_string(), CategoryStyle::new(icon, color)))
        .collect()
    }

    /// Parses a JSON object of `{ "<name>": { "icon": "..", "color": ".." } }`.
    ///
    /// Entries with the wrong shape are skipped; a document that is not an
    /// object is rejected as a whole.
    pub fn from_json(data: &str) -> Result<Self, ConfigLoadError> {
        let value: serde_json::Value =
            serde_json::from_str(data).map_err(|err| ConfigLoadError::Malformed(err.to_string()))?;
        let object = value.as_object().ok_or_else(|| {
            ConfigLoadError::Malformed("expected an object keyed by category name".into())
        })?;

        let mut entries = BTreeMap::new();
        for (name, raw) in object {
            match serde_json::from_value::<CategoryStyle>(raw.clone()) {
                Ok(style) if !name.trim().is_empty() => {
                    entries.insert(name.trim().to_string(), style);
                }
                Ok(_) => tracing::warn!("skipping category with an empty name"),
                Err(err) => tracing::warn!(category = %name, error = %err, "skipping malformed category entry"),
            }
        }
        Ok(Self { entries })
    }

    pub fn lookup(&self, category: &str) -> Option<&CategoryStyle> {
        self.entries.get(category)
    }

    pub fn icon_of(&self, category: &str) -> &str {
        self.lookup(category)
            .map_or(FALLBACK_ICON, |style| style.icon.as_str())
    }

    pub fn color_of(&self, category: &str) -> &str {
        self.lookup(category)
            .map_or(FALLBACK_COLOR, |style| style.color.as_str())
    }

    /// Owned style with the fallback policy applied.
    pub fn style_of(&self, category: &str) -> CategoryStyle {
        self.lookup(category)
            .cloned()
            .unwrap_or_else(CategoryStyle::fallback)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, CategoryStyle)> for CategoryRegistry {
    fn from_iter<T: IntoIterator<Item = (String, CategoryStyle)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_resolves_known_categories() {
        let registry = CategoryRegistry::builtin();
        assert_eq!(registry.len(), 7);
        assert_eq!(registry.icon_of("Comida"), "🍔");
        assert_eq!(registry.color_of("Comida"), "#36A2EB");
    }

    #[test]
    fn unknown_category_uses_fallback() {
        let registry = CategoryRegistry::builtin();
        assert!(registry.lookup("Viajes").is_none());
        assert_eq!(registry.icon_of("Viajes"), FALLBACK_ICON);
        assert_eq!(registry.color_of("Viajes"), FALLBACK_COLOR);
        assert_eq!(registry.style_of("Viajes"), CategoryStyle::fallback());
    }

    #[test]
    fn from_json_skips_malformed_entries() {
        let registry = CategoryRegistry::from_json(
            r##"{
                "Comida": { "icon": "🍔", "color": "#36A2EB" },
                "Broken": { "icon": 3 },
                "Farmacia": { "icon": "💊", "color": "#FF9F40" }
            }"##,
        )
        .expect("object parses");
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["Comida", "Farmacia"]);
    }

    #[test]
    fn from_json_rejects_non_object_documents() {
        assert!(matches!(
            CategoryRegistry::from_json("[1, 2, 3]"),
            Err(ConfigLoadError::Malformed(_))
        ));
        assert!(matches!(
            CategoryRegistry::from_json("{ not json"),
            Err(ConfigLoadError::Malformed(_))
        ));
    }

    #[test]
    fn rgb_parses_hex_colors() {
        assert_eq!(CategoryStyle::new("x", "#36A2EB").rgb(), Some((0x36, 0xA2, 0xEB)));
        assert_eq!(CategoryStyle::new("x", "blue").rgb(), None);
    }
}
