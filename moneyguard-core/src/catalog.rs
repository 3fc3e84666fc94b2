//! Fixed expense category catalog and the chart palette keyed by it.
//!
//! The catalog is what the app falls back to when the wallet API cannot list
//! categories; order matters, it is the order the UI presents them in.

/// Default expense categories, in display order.
pub const DEFAULT_CATEGORIES: [&str; 10] = [
    "Main expenses",
    "Products",
    "Car",
    "Self care",
    "Child care",
    "Household products",
    "Education",
    "Leisure",
    "Other expenses",
    "Entertainment",
];

/// Color for categories outside the palette.
pub const FALLBACK_COLOR: &str = "#808080";

/// Owned copy of the default catalog.
pub fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

/// Chart color for a category label (exact match).
pub fn category_color(category: &str) -> &'static str {
    match category {
        "Main expenses" => "#FED057",
        "Products" => "#FFD8D0",
        "Car" => "#FD9498",
        "Self care" => "#C5BAFF",
        "Child care" => "#6E78E8",
        "Household products" => "#4A56E2",
        "Education" => "#81E1FF",
        "Leisure" => "#24CCA7",
        "Other expenses" => "#00AD84",
        "Entertainment" => "#FF6596",
        _ => FALLBACK_COLOR,
    }
}

/// Income rows share the summary with expenses but never go on the chart.
pub fn is_income(category: &str) -> bool {
    matches!(category, "Income" | "INCOME")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_order() {
        let cats = default_categories();
        assert_eq!(cats.len(), 10);
        assert_eq!(cats[0], "Main expenses");
        assert_eq!(cats[9], "Entertainment");
    }

    #[test]
    fn test_every_default_category_has_a_color() {
        for c in DEFAULT_CATEGORIES {
            assert_ne!(category_color(c), FALLBACK_COLOR, "{c} missing from palette");
        }
    }

    #[test]
    fn test_unknown_category_is_gray() {
        assert_eq!(category_color("Crypto"), FALLBACK_COLOR);
        assert_eq!(category_color("products"), FALLBACK_COLOR);
    }

    #[test]
    fn test_is_income() {
        assert!(is_income("Income"));
        assert!(is_income("INCOME"));
        assert!(!is_income("income"));
        assert!(!is_income("Products"));
    }
}
