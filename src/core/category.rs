//! Category palette used for node fill colors and column order

use crate::core::models::course::DEFAULT_CATEGORY;

/// Known categories and their fill colors, in display order
pub const PALETTE: [(&str, &str); 4] = [
    ("Electrical Engineering/Hardware", "#2563eb"),
    ("Software Engineering", "#16a34a"),
    ("Embedded/Firmware Engineering", "#9333ea"),
    (DEFAULT_CATEGORY, "#64748b"),
];

/// Color for categories missing from the palette
pub const FALLBACK_COLOR: &str = "#64748b";

/// Fill color for a category
#[must_use]
pub fn color_for(category: &str) -> &'static str {
    PALETTE
        .iter()
        .find(|(name, _)| *name == category)
        .map_or(FALLBACK_COLOR, |(_, color)| color)
}

/// Short label for filter buttons: the part before the first '/'
#[must_use]
pub fn short_label(category: &str) -> &str {
    category.split('/').next().unwrap_or(category)
}

/// Column order for a set of categories: palette entries first, then the
/// rest in the order given
#[must_use]
pub fn ordered<'a>(categories: &[&'a str]) -> Vec<&'a str> {
    let mut ordered: Vec<&'a str> = PALETTE
        .iter()
        .filter_map(|(name, _)| categories.iter().find(|c| *c == name).copied())
        .collect();
    for &category in categories {
        if !ordered.contains(&category) {
            ordered.push(category);
        }
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_for_known_and_unknown() {
        assert_eq!(color_for("Software Engineering"), "#16a34a");
        assert_eq!(color_for("Embedded/Firmware Engineering"), "#9333ea");
        assert_eq!(color_for("Underwater Basket Weaving"), FALLBACK_COLOR);
    }

    #[test]
    fn test_short_label() {
        assert_eq!(short_label("Electrical Engineering/Hardware"), "Electrical Engineering");
        assert_eq!(short_label("Software Engineering"), "Software Engineering");
    }

    #[test]
    fn test_ordered_puts_palette_first() {
        let order = ordered(&[
            "Physics",
            "Software Engineering",
            "Electrical Engineering/Hardware",
        ]);
        assert_eq!(
            order,
            vec![
                "Electrical Engineering/Hardware",
                "Software Engineering",
                "Physics"
            ]
        );
    }
}
