//! Render-ready view models for the grid and the detail pane.
//!
//! These are derived from `AppState` on every frame so the widgets in `ui`
//! never read selection membership or release dates on their own.

use crate::model::Item;
use crate::selection::{SelectionKind, SelectionStore};

/// Maximum number of item tiles the grid shows.
pub const GRID_CAP: usize = 50;

/// Placeholder shown when an item has no release date for the region.
pub const UNKNOWN_RELEASE: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tile {
    /// Position in the grid list and the catalog index it shows.
    Item { position: usize, catalog_idx: usize },
    /// Trailing summary for entries beyond [`GRID_CAP`].
    More { omitted: usize },
}

impl Tile {
    pub fn summary_label(omitted: usize) -> String {
        format!("+{omitted} more...")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridView {
    pub tiles: Vec<Tile>,
}

impl GridView {
    /// Caps `indices` at [`GRID_CAP`] tiles in input order and appends one
    /// summary tile when anything was cut.
    pub fn build(indices: &[usize]) -> Self {
        let mut tiles: Vec<Tile> = indices
            .iter()
            .take(GRID_CAP)
            .enumerate()
            .map(|(position, &catalog_idx)| Tile::Item {
                position,
                catalog_idx,
            })
            .collect();
        if indices.len() > GRID_CAP {
            tiles.push(Tile::More {
                omitted: indices.len() - GRID_CAP,
            });
        }
        Self { tiles }
    }

    pub fn item_tile_count(&self) -> usize {
        self.tiles
            .iter()
            .filter(|tile| matches!(tile, Tile::Item { .. }))
            .count()
    }
}

/// Two-state toggle button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleButton {
    pub label: &'static str,
    pub active: bool,
}

impl ToggleButton {
    pub fn for_kind(kind: SelectionKind, active: bool) -> Self {
        let label = match (kind, active) {
            (SelectionKind::Owned, false) => "Toggle Owned",
            (SelectionKind::Owned, true) => "Owned ✓",
            (SelectionKind::Wishlist, false) => "Toggle Wishlist",
            (SelectionKind::Wishlist, true) => "In Wishlist ★",
        };
        Self { label, active }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub image: String,
    pub image_alt: String,
    pub name: String,
    pub character: String,
    pub game_series: String,
    pub item_type: String,
    pub amiibo_series: String,
    pub release: String,
    pub owned: ToggleButton,
    pub wishlist: ToggleButton,
}

impl DetailView {
    pub fn build(item: &Item, selections: &SelectionStore, region: &str) -> Self {
        let owned = selections.contains(SelectionKind::Owned, &item.id);
        let wishlist = selections.contains(SelectionKind::Wishlist, &item.id);
        Self {
            image: item.image.clone(),
            image_alt: item.name.clone(),
            name: item.name.clone(),
            character: item.character.clone(),
            game_series: item.game_series.clone(),
            item_type: item.item_type.clone(),
            amiibo_series: item.amiibo_series.clone(),
            release: item
                .release_in(region)
                .unwrap_or(UNKNOWN_RELEASE)
                .to_string(),
            owned: ToggleButton::for_kind(SelectionKind::Owned, owned),
            wishlist: ToggleButton::for_kind(SelectionKind::Wishlist, wishlist),
        }
    }
}
