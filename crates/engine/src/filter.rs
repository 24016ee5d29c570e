//! Search Filter - derived view over a grid
//!
//! A query selects the cells whose details, tags or owner contain it,
//! ignoring case. The view borrows the grid and never mutates it:
//! - Empty query selects every cell
//! - Results come back in id order
//! - `Matches` is lazy and `Clone`, so a view can be restarted freely

use crate::cell::Cell;
use crate::grid::Grid;

// =============================================================================
// SearchFilter: a normalized query
// =============================================================================

/// A case-folded search query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    /// Lowercased query text
    needle: String,
}

impl SearchFilter {
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.to_lowercase(),
        }
    }

    /// True when the filter selects every cell.
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches(&self, cell: &Cell) -> bool {
        self.is_empty() || cell.matches_lowercase(&self.needle)
    }

    /// Lazy view of the matching cells of `grid`.
    pub fn apply<'a>(&self, grid: &'a Grid) -> Matches<'a> {
        Matches {
            cells: grid.cells().iter(),
            filter: self.clone(),
        }
    }
}

// =============================================================================
// Matches: restartable iterator over matching cells
// =============================================================================

#[derive(Debug, Clone)]
pub struct Matches<'a> {
    cells: std::slice::Iter<'a, Cell>,
    filter: SearchFilter,
}

impl<'a> Iterator for Matches<'a> {
    type Item = &'a Cell;

    fn next(&mut self) -> Option<Self::Item> {
        let filter = &self.filter;
        self.cells.by_ref().find(|cell| filter.matches(cell))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.cells.len()))
    }
}

impl Grid {
    /// Cells matching `query` (case-insensitive substring over details, tags
    /// and owner), in id order.
    pub fn filter(&self, query: &str) -> Matches<'_> {
        SearchFilter::new(query).apply(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::FieldUpdate;

    fn sample() -> Grid {
        Grid::initialize(2, 3)
            .set_field(0, FieldUpdate::Details("Window seat".to_string()))
            .unwrap()
            .set_field(2, FieldUpdate::Tags("VIP, quiet".to_string()))
            .unwrap()
            .toggle_reservation(4, "Alice")
            .unwrap()
            .set_field(5, FieldUpdate::Details("near alice's desk".to_string()))
            .unwrap()
    }

    fn ids(matches: Matches<'_>) -> Vec<usize> {
        matches.map(|cell| cell.id).collect()
    }

    #[test]
    fn test_empty_query_returns_all_in_order() {
        let grid = sample();
        assert_eq!(ids(grid.filter("")), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_matches_details() {
        assert_eq!(ids(sample().filter("window")), vec![0]);
    }

    #[test]
    fn test_matches_tags_substring() {
        assert_eq!(ids(sample().filter("vi")), vec![2]);
        assert_eq!(ids(sample().filter("uie")), vec![2]);
    }

    #[test]
    fn test_matches_owner_and_details_case_insensitive() {
        let grid = sample();
        assert_eq!(ids(grid.filter("ALICE")), vec![4, 5]);
        assert_eq!(ids(grid.filter("alice")), ids(grid.filter("ALICE")));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(sample().filter("zebra").count(), 0);
    }

    #[test]
    fn test_view_is_restartable() {
        let grid = sample();
        let view = grid.filter("a");
        let first: Vec<_> = view.clone().collect();
        let second: Vec<_> = view.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_filter_does_not_mutate() {
        let grid = sample();
        let before = grid.clone();
        for _ in 0..3 {
            let _ = grid.filter("seat").count();
        }
        assert_eq!(grid, before);
    }

    #[test]
    fn test_search_filter_is_empty() {
        assert!(SearchFilter::new("").is_empty());
        assert!(!SearchFilter::new(" ").is_empty());
    }
}
