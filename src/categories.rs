use crate::models::Fact;

/// One entry of the fixed category set shared by the filter UI and
/// draft validation. The color is the tag/swatch the UI renders for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub name: &'static str,
    pub color: &'static str,
}

/// The category set is process-wide, immutable, and ordered as displayed.
pub const CATEGORIES: &[Category] = &[
    Category { name: "Coffee", color: "rgba(224, 196, 159, 0.49)" },
    Category { name: "Pasta", color: "rgba(159, 210, 224, 0.49)" },
    Category { name: "Pizza", color: "rgba(205, 95, 55, 0.49)" },
    Category { name: "Burger", color: "rgba(244, 253, 150, 0.49)" },
    Category { name: "Sandwich", color: "rgba(139, 238, 200, 0.49)" },
    Category { name: "Shakes", color: "rgba(255, 152, 210, 0.49)" },
    Category { name: "Pastries", color: "rgba(255, 128, 119, 0.49)" },
    Category { name: "Wraps", color: "rgba(149, 20, 166, 0.31)" },
    Category { name: "Buns&Breads", color: "beige" },
];

/// Returns the display color for a category name, if it is a known category.
pub fn color_of(name: &str) -> Option<&'static str> {
    CATEGORIES.iter().find(|cat| cat.name == name).map(|cat| cat.color)
}

pub fn is_known(name: &str) -> bool {
    CATEGORIES.iter().any(|cat| cat.name == name)
}

/// What the category sidebar selects: either the "all" pseudo-category or
/// exactly one named category. Exactly one filter is active at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    /// Parses a raw filter value; `"all"` (any case) means no filtering.
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Named(raw.to_string())
        }
    }

    /// Exact-match test used by backends that filter in process.
    pub fn matches(&self, fact: &Fact) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(name) => fact.category == *name,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Named(name) => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fact_in(category: &str) -> Fact {
        Fact {
            id: 1,
            text: "Cappuccino".to_string(),
            source: "https://example.com/cappuccino".to_string(),
            category: category.to_string(),
            votes_interesting: 0,
            votes_mindblowing: 0,
            votes_false: 0,
            created_in: 2024,
        }
    }

    #[test]
    fn the_category_set_is_fixed() {
        assert_eq!(CATEGORIES.len(), 9);
        assert!(is_known("Coffee"));
        assert!(is_known("Buns&Breads"));
        assert!(!is_known("coffee"));
        assert!(!is_known(""));
    }

    #[test]
    fn color_lookup_only_succeeds_for_known_categories() {
        assert_eq!(color_of("Wraps"), Some("rgba(149, 20, 166, 0.31)"));
        assert_eq!(color_of("Sushi"), None);
    }

    #[test]
    fn all_is_a_pseudo_category_not_a_name() {
        assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse("All"), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::parse("Pasta"),
            CategoryFilter::Named("Pasta".to_string())
        );
    }

    #[test]
    fn named_filter_matches_exactly() {
        let filter = CategoryFilter::Named("Pizza".to_string());
        assert!(filter.matches(&fact_in("Pizza")));
        assert!(!filter.matches(&fact_in("pizza")));
        assert!(CategoryFilter::All.matches(&fact_in("Shakes")));
    }
}
