//! Filter and search engine over the loaded catalog.
//!
//! Every function here is pure: it borrows the catalog and returns indices into
//! it, in catalog order. The controller in `app_core::state` decides what the
//! results mean for the grid and the detail pane.

use crate::model::{AmiiboId, Item};
use indexmap::IndexSet;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Category shortcut shown as a filter button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Figure,
    Card,
    Yarn,
}

impl CategoryFilter {
    pub const ALL: [CategoryFilter; 4] = [
        CategoryFilter::All,
        CategoryFilter::Figure,
        CategoryFilter::Card,
        CategoryFilter::Yarn,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Figure => "Figure",
            CategoryFilter::Card => "Card",
            CategoryFilter::Yarn => "Yarn",
        }
    }

    /// Whether `item` belongs to this category.
    ///
    /// Yarn is an amiibo series rather than a type, so it is matched on
    /// `amiibo_series` while Figure and Card are matched on `item_type`.
    pub fn accepts(self, item: &Item) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Figure => item.item_type == "Figure",
            CategoryFilter::Card => item.item_type == "Card",
            CategoryFilter::Yarn => item.amiibo_series == "Yarn",
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    /// Unknown names fall back to `All`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "figure" => CategoryFilter::Figure,
            "card" => CategoryFilter::Card,
            "yarn" => CategoryFilter::Yarn,
            _ => CategoryFilter::All,
        })
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label().to_lowercase())
    }
}

pub fn by_category(items: &[Item], filter: CategoryFilter) -> Vec<usize> {
    matching(items, |item| filter.accepts(item))
}

/// Case-insensitive substring match against `name` only.
///
/// A blank query matches nothing here; callers treat it as "no query" before
/// reaching this function.
pub fn by_substring(items: &[Item], query: &str) -> Vec<usize> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    matching(items, |item| item.name.to_lowercase().contains(&needle))
}

/// Exact equality on `game_series`.
pub fn by_series(items: &[Item], series: &str) -> Vec<usize> {
    matching(items, |item| item.game_series == series)
}

/// Items whose id is a member of `set`.
pub fn by_selection(items: &[Item], set: &IndexSet<AmiiboId>) -> Vec<usize> {
    if set.is_empty() {
        return Vec::new();
    }
    matching(items, |item| set.contains(&item.id))
}

/// Uniform pick over `0..items.len()`; `None` for an empty catalog.
pub fn pick_random<R: Rng + ?Sized>(items: &[Item], rng: &mut R) -> Option<usize> {
    if items.is_empty() {
        return None;
    }
    Some(rng.random_range(0..items.len()))
}

fn matching(items: &[Item], predicate: impl Fn(&Item) -> bool) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| predicate(item))
        .map(|(idx, _)| idx)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_item;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sample() -> Vec<Item> {
        let mut yarn_yoshi = test_item("Green Yarn Yoshi", "00", "03", "Figure");
        yarn_yoshi.amiibo_series = "Yarn".to_string();
        yarn_yoshi.game_series = "Yoshi's Woolly World".to_string();
        let mut card = test_item("Isabelle - Card", "00", "04", "Card");
        card.game_series = "Animal Crossing".to_string();
        vec![
            test_item("Mario", "00", "01", "Figure"),
            test_item("Luigi", "00", "02", "Figure"),
            yarn_yoshi,
            card,
            test_item("Mario - Gold Edition", "00", "05", "Figure"),
        ]
    }

    fn names(items: &[Item], indices: &[usize]) -> Vec<String> {
        indices.iter().map(|&idx| items[idx].name.clone()).collect()
    }

    #[test]
    fn test_by_category() {
        let items = sample();
        assert_eq!(by_category(&items, CategoryFilter::All).len(), 5);
        assert_eq!(
            names(&items, &by_category(&items, CategoryFilter::Card)),
            vec!["Isabelle - Card"]
        );
        assert_eq!(by_category(&items, CategoryFilter::Figure).len(), 4);
    }

    #[test]
    fn test_yarn_matches_series_not_type() {
        let items = sample();
        let yarn = by_category(&items, CategoryFilter::Yarn);
        assert_eq!(names(&items, &yarn), vec!["Green Yarn Yoshi"]);
        assert_eq!(items[yarn[0]].item_type, "Figure");
    }

    #[test]
    fn test_unknown_filter_name_is_permissive() {
        assert_eq!("plush".parse::<CategoryFilter>(), Ok(CategoryFilter::All));
        assert_eq!(" Yarn ".parse::<CategoryFilter>(), Ok(CategoryFilter::Yarn));
        assert_eq!(CategoryFilter::Card.to_string(), "card");
    }

    #[test]
    fn test_by_substring_is_case_insensitive_on_name_only() {
        let items = sample();
        assert_eq!(
            names(&items, &by_substring(&items, "MARIO")),
            vec!["Mario", "Mario - Gold Edition"]
        );
        // "Super Mario" is the game series of every sample item, not its name.
        assert_eq!(by_substring(&items, "super").len(), 0);
        assert!(by_substring(&items, "   ").is_empty());
        assert!(by_substring(&items, "xyz").is_empty());
    }

    #[test]
    fn test_by_series_is_exact() {
        let items = sample();
        assert_eq!(by_series(&items, "Super Mario").len(), 3);
        assert!(by_series(&items, "super mario").is_empty());
    }

    #[test]
    fn test_by_selection_keeps_catalog_order() {
        let items = sample();
        let mut set = IndexSet::new();
        set.insert(items[4].id.clone());
        set.insert(items[1].id.clone());
        assert_eq!(by_selection(&items, &set), vec![1, 4]);
        assert!(by_selection(&items, &IndexSet::new()).is_empty());
    }

    #[test]
    fn test_pick_random() {
        let items = sample();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let idx = pick_random(&items, &mut rng).unwrap();
            assert!(idx < items.len());
        }
        assert_eq!(pick_random(&[], &mut rng), None);
    }
}
