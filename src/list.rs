use crate::categories;
use crate::models::Fact;

/// Fixed empty-state message when a category has no recipes.
pub const EMPTY_MESSAGE: &str =
    "No recipes for this category yet! Create the first one";

/// Color used for a tag whose category is somehow not in the fixed set.
const FALLBACK_COLOR: &str = "beige";

/// A fact is disputed when its combined positive votes are fewer than its
/// negative votes.
pub fn is_disputed(fact: &Fact) -> bool {
    fact.votes_interesting + fact.votes_mindblowing < fact.votes_false
}

/// What the list region renders: either the empty-state message or the rows
/// plus the count line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FactListView {
    Empty { message: &'static str },
    Rows { rows: Vec<FactRow>, count_line: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactRow {
    pub fact: Fact,
    pub disputed: bool,
    pub tag_color: &'static str,
    /// Vote buttons for this row are disabled while its vote round-trip is
    /// in flight.
    pub is_updating: bool,
}

/// Pure projection of the shared collection into the list view.
pub fn render(facts: &[Fact], pending_vote: Option<i64>) -> FactListView {
    if facts.is_empty() {
        return FactListView::Empty { message: EMPTY_MESSAGE };
    }
    let rows = facts
        .iter()
        .map(|fact| FactRow {
            disputed: is_disputed(fact),
            tag_color: categories::color_of(&fact.category).unwrap_or(FALLBACK_COLOR),
            is_updating: pending_vote == Some(fact.id),
            fact: fact.clone(),
        })
        .collect();
    FactListView::Rows {
        count_line: format!("There are {} in the database", facts.len()),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fact(id: i64, interesting: u64, mindblowing: u64, false_votes: u64) -> Fact {
        Fact {
            id,
            text: format!("Recipe {}", id),
            source: "https://example.com".to_string(),
            category: "Coffee".to_string(),
            votes_interesting: interesting,
            votes_mindblowing: mindblowing,
            votes_false: false_votes,
            created_in: 2024,
        }
    }

    #[test]
    fn empty_collection_renders_the_fixed_message() {
        assert_eq!(
            render(&[], None),
            FactListView::Empty { message: EMPTY_MESSAGE }
        );
    }

    #[test]
    fn count_line_reports_the_collection_size() {
        let facts = vec![fact(1, 0, 0, 0), fact(2, 0, 0, 0)];
        match render(&facts, None) {
            FactListView::Rows { rows, count_line } => {
                assert_eq!(rows.len(), 2);
                assert_eq!(count_line, "There are 2 in the database");
            }
            FactListView::Empty { .. } => panic!("expected rows"),
        }
    }

    #[test]
    fn disputed_means_positives_strictly_below_negatives() {
        assert!(!is_disputed(&fact(1, 1000, 500, 69)));
        // A downvote landing at 70 still leaves 1500 >= 70.
        assert!(!is_disputed(&fact(1, 1000, 500, 70)));
        // Ties are not disputed.
        assert!(!is_disputed(&fact(1, 3, 2, 5)));
        assert!(is_disputed(&fact(1, 1, 0, 2)));
    }

    #[test]
    fn rows_carry_the_category_color_and_disputed_marker() {
        let facts = vec![fact(7, 0, 0, 3)];
        match render(&facts, None) {
            FactListView::Rows { rows, .. } => {
                assert!(rows[0].disputed);
                assert_eq!(rows[0].tag_color, categories::color_of("Coffee").unwrap());
                assert!(!rows[0].is_updating);
            }
            FactListView::Empty { .. } => panic!("expected rows"),
        }
    }

    #[test]
    fn only_the_row_with_a_pending_vote_is_updating() {
        let facts = vec![fact(1, 0, 0, 0), fact(2, 0, 0, 0)];
        match render(&facts, Some(2)) {
            FactListView::Rows { rows, .. } => {
                assert!(!rows[0].is_updating);
                assert!(rows[1].is_updating);
            }
            FactListView::Empty { .. } => panic!("expected rows"),
        }
    }
}
