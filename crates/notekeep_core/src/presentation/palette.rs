//! Category-to-color lookup.
//!
//! # Invariants
//! - Every category resolves to a color; unmapped names use the fallback.

use crate::model::note::UNCATEGORIZED;
use std::collections::HashMap;

/// Color used when a category has no mapping.
pub const FALLBACK_COLOR: &str = "#A0AEC0";

const DEFAULT_COLORS: &[(&str, &str)] = &[
    ("Work", "#4299E1"),
    ("Personal", "#9F7AEA"),
    ("Ideas", "#F6AD55"),
    ("To-Do", "#48BB78"),
    (UNCATEGORIZED, FALLBACK_COLOR),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPalette {
    colors: HashMap<String, String>,
    fallback: String,
}

impl CategoryPalette {
    /// Palette with no mappings; everything renders in `fallback`.
    pub fn with_fallback(fallback: impl Into<String>) -> Self {
        Self {
            colors: HashMap::new(),
            fallback: fallback.into(),
        }
    }

    /// Maps `category` to a hex color, replacing any previous mapping.
    pub fn set(&mut self, category: impl Into<String>, color: impl Into<String>) {
        self.colors.insert(category.into(), color.into());
    }

    pub fn color_for(&self, category: &str) -> &str {
        self.colors
            .get(category)
            .map_or(self.fallback.as_str(), String::as_str)
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }
}

impl Default for CategoryPalette {
    fn default() -> Self {
        let mut palette = Self::with_fallback(FALLBACK_COLOR);
        for (category, color) in DEFAULT_COLORS {
            palette.set(*category, *color);
        }
        palette
    }
}

#[cfg(test)]
mod tests {
    use super::{CategoryPalette, FALLBACK_COLOR};

    #[test]
    fn known_categories_have_distinct_colors() {
        let palette = CategoryPalette::default();
        assert_eq!(palette.color_for("Work"), "#4299E1");
        assert_ne!(palette.color_for("Work"), palette.color_for("Personal"));
    }

    #[test]
    fn unmapped_category_uses_fallback() {
        let palette = CategoryPalette::default();
        assert_eq!(palette.color_for("Travel"), FALLBACK_COLOR);
    }

    #[test]
    fn custom_mapping_overrides_default() {
        let mut palette = CategoryPalette::default();
        palette.set("Work", "#000000");
        assert_eq!(palette.color_for("Work"), "#000000");
    }
}
