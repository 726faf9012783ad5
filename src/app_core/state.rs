//! Shared application state and the controller transitions over it.
//!
//! This module is runtime-agnostic. Runtimes construct `AppState` with their
//! own storage backend and RNG seed, install the catalog once it is fetched,
//! and feed converted input events through `app_core::reducer`.

use crate::app_core::ingest::CatalogLoad;
use crate::app_core::text_input::TextInput;
use crate::catalog::{self, CategoryFilter};
use crate::model::Item;
use crate::selection::{SelectionKind, SelectionStore};
use crate::theme::ThemeConfig;
use crate::view::{DetailView, GRID_CAP, GridView};
use rand::rngs::StdRng;
use ratatui::layout::{Position, Rect};
use tracing::{debug, error, info};

/// Current input mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Keys edit the search box.
    Searching,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Grid,
    Details,
    Search,
}

/// State of the one-time catalog fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready { items: usize, skipped: usize },
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct ProgressStage {
    pub label: String,
    pub ratio: f64,
    pub done: bool,
}

/// Clickable element recorded during render for mouse hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Title,
    SearchInput,
    SearchButton,
    Filter(CategoryFilter),
    ToggleOwned,
    ToggleWishlist,
    ShowSeries,
    ShowOwned,
    ShowWishlist,
    /// Item tile at this grid position.
    Tile(usize),
}

/// Application state for the ratatui app.
pub struct AppState {
    /// Immutable after `install_catalog`.
    pub catalog: Vec<Item>,
    /// Catalog indices currently shown in the grid, before the display cap.
    pub grid: Vec<usize>,
    /// Grid position of the keyboard cursor.
    pub grid_cursor: Option<usize>,
    /// First visible tile row.
    pub grid_scroll: usize,
    /// Tile columns and visible rows from the last render.
    pub grid_columns: usize,
    pub grid_rows: usize,
    pub current_filter: CategoryFilter,
    /// Catalog index shown in the detail pane.
    pub current_amiibo: Option<usize>,
    pub search: TextInput,
    pub selections: SelectionStore,
    /// Release region shown in the detail pane.
    pub region: String,
    pub load_status: LoadStatus,
    /// Last transient message for the status bar (e.g. a failed storage write).
    pub notice: Option<String>,
    pub input_mode: InputMode,
    pub focused_pane: FocusPane,
    pub theme: ThemeConfig,
    pub app_version: String,
    pub should_quit: bool,
    pub show_help: bool,
    /// Loading indicator.
    pub show_progress: bool,
    pub progress_title: String,
    pub progress_stages: Vec<ProgressStage>,
    /// Clickable regions from the last render, topmost last.
    pub hit_areas: Vec<(Control, Rect)>,
    /// Inner area of the search box (set during render).
    pub search_input_area: Option<Rect>,
    pub grid_area: Option<Rect>,
    /// Size of the last rendered frame in cells.
    pub frame_size: Option<(u16, u16)>,
    rng: StdRng,
}

impl AppState {
    /// Creates the state with an empty catalog in the loading status.
    pub fn new(
        selections: SelectionStore,
        theme: ThemeConfig,
        region: impl Into<String>,
        app_version: impl Into<String>,
        rng: StdRng,
    ) -> Self {
        Self {
            catalog: Vec::new(),
            grid: Vec::new(),
            grid_cursor: None,
            grid_scroll: 0,
            grid_columns: 1,
            grid_rows: 1,
            current_filter: CategoryFilter::All,
            current_amiibo: None,
            search: TextInput::default(),
            selections,
            region: region.into(),
            load_status: LoadStatus::Loading,
            notice: None,
            input_mode: InputMode::Normal,
            focused_pane: FocusPane::Grid,
            theme,
            app_version: app_version.into(),
            should_quit: false,
            show_help: false,
            show_progress: false,
            progress_title: String::new(),
            progress_stages: Vec::new(),
            hit_areas: Vec::new(),
            search_input_area: None,
            grid_area: None,
            frame_size: None,
            rng,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.load_status == LoadStatus::Loading
    }

    // -----------------------------------------------------------------------
    // Catalog lifecycle
    // -----------------------------------------------------------------------

    /// Installs the fetched catalog and shows the default view with a random pick.
    pub fn install_catalog(&mut self, load: CatalogLoad) {
        let skipped = load.skipped();
        self.catalog = load.items;
        self.load_status = LoadStatus::Ready {
            items: self.catalog.len(),
            skipped,
        };
        info!(items = self.catalog.len(), skipped, "catalog installed");
        self.render_grid(self.category_view());
        self.display_random();
    }

    /// Records a failed fetch. The app stays interactive with an empty catalog.
    pub fn fail_load(&mut self, message: impl Into<String>) {
        let message = message.into();
        error!(error = %message, "catalog load failed");
        self.catalog.clear();
        self.current_amiibo = None;
        self.render_grid(Vec::new());
        self.load_status = LoadStatus::Failed(message);
    }

    // -----------------------------------------------------------------------
    // Presenters
    // -----------------------------------------------------------------------

    /// Replaces the grid contents; the cursor returns to the first tile.
    pub fn render_grid(&mut self, indices: Vec<usize>) {
        self.grid = indices;
        self.grid_scroll = 0;
        self.grid_cursor = if self.grid.is_empty() { None } else { Some(0) };
    }

    /// Shows the catalog entry at `catalog_idx` in the detail pane.
    pub fn show(&mut self, catalog_idx: usize) {
        if catalog_idx < self.catalog.len() {
            self.current_amiibo = Some(catalog_idx);
        }
    }

    pub fn current_item(&self) -> Option<&Item> {
        self.current_amiibo.and_then(|idx| self.catalog.get(idx))
    }

    pub fn grid_view(&self) -> GridView {
        GridView::build(&self.grid)
    }

    pub fn detail_view(&self) -> Option<DetailView> {
        self.current_item()
            .map(|item| DetailView::build(item, &self.selections, &self.region))
    }

    pub fn category_view(&self) -> Vec<usize> {
        catalog::by_category(&self.catalog, self.current_filter)
    }

    // -----------------------------------------------------------------------
    // Controller transitions
    // -----------------------------------------------------------------------

    /// Picks a random catalog entry for the detail pane. No-op on an empty catalog.
    pub fn display_random(&mut self) {
        if let Some(idx) = catalog::pick_random(&self.catalog, &mut self.rng) {
            self.show(idx);
        }
    }

    /// Title click: clear the search, show the category view and a random pick.
    pub fn go_home(&mut self) {
        self.search.clear();
        self.render_grid(self.category_view());
        self.display_random();
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        debug!(%filter, "category filter");
        self.current_filter = filter;
        self.render_grid(self.category_view());
    }

    /// Runs the search box query.
    ///
    /// A blank query behaves like `go_home` without clearing the box. Zero
    /// matches empty the grid and leave the detail pane as it was.
    pub fn submit_search(&mut self) {
        if self.search.is_blank() {
            self.render_grid(self.category_view());
            self.display_random();
            return;
        }

        let matches = catalog::by_substring(&self.catalog, self.search.text());
        debug!(query = self.search.text(), matches = matches.len(), "search");
        if let Some(&first) = matches.first() {
            self.show(first);
        }
        self.render_grid(matches);
    }

    pub fn toggle(&mut self, kind: SelectionKind) {
        let Some(id) = self.current_item().map(|item| item.id.clone()) else {
            return;
        };
        let (member, persisted) = self.selections.toggle(kind, &id);
        debug!(%id, ?kind, member, "selection toggled");
        match persisted {
            Ok(()) => self.notice = None,
            Err(err) => {
                error!(%id, ?kind, error = %err, "failed to persist selection");
                self.notice = Some(format!("Could not save {}: {err}", kind.storage_key()));
            }
        }
    }

    pub fn show_same_series(&mut self) {
        let Some(series) = self.current_item().map(|item| item.game_series.clone()) else {
            return;
        };
        self.render_grid(catalog::by_series(&self.catalog, &series));
        self.search.clear();
    }

    /// Shows owned or wishlisted items; the first one becomes the detail item.
    pub fn show_selection(&mut self, kind: SelectionKind) {
        let matches = catalog::by_selection(&self.catalog, self.selections.set(kind));
        if let Some(&first) = matches.first() {
            self.show(first);
        }
        self.render_grid(matches);
        self.search.clear();
    }

    /// Activates the item tile at `position`; the summary tile is not selectable.
    pub fn select_tile(&mut self, position: usize) {
        if position >= self.visible_tile_count() {
            return;
        }
        if let Some(&catalog_idx) = self.grid.get(position) {
            self.grid_cursor = Some(position);
            self.show(catalog_idx);
        }
    }

    // -----------------------------------------------------------------------
    // Grid cursor
    // -----------------------------------------------------------------------

    pub fn visible_tile_count(&self) -> usize {
        self.grid.len().min(GRID_CAP)
    }

    /// Moves the grid cursor by `delta` tiles, clamped to the item tiles.
    pub fn move_cursor(&mut self, delta: isize) {
        let count = self.visible_tile_count();
        if count == 0 {
            self.grid_cursor = None;
            return;
        }
        let current = self.grid_cursor.unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, count as isize - 1);
        self.grid_cursor = Some(next as usize);
    }

    pub fn move_cursor_rows(&mut self, rows: isize) {
        self.move_cursor(rows * self.grid_columns.max(1) as isize);
    }

    pub fn activate_cursor(&mut self) {
        if let Some(position) = self.grid_cursor {
            self.select_tile(position);
        }
    }

    /// Adjusts `grid_scroll` so the cursor row is visible.
    pub fn scroll_to_cursor(&mut self) {
        let columns = self.grid_columns.max(1);
        let rows = self.grid_rows.max(1);
        let Some(cursor) = self.grid_cursor else {
            self.grid_scroll = 0;
            return;
        };
        let cursor_row = cursor / columns;
        if cursor_row < self.grid_scroll {
            self.grid_scroll = cursor_row;
        } else if cursor_row >= self.grid_scroll + rows {
            self.grid_scroll = cursor_row + 1 - rows;
        }
    }

    // -----------------------------------------------------------------------
    // Focus and layout bookkeeping
    // -----------------------------------------------------------------------

    pub fn focus_pane(&mut self, pane: FocusPane) {
        self.focused_pane = pane;
        self.input_mode = if pane == FocusPane::Search {
            InputMode::Searching
        } else {
            InputMode::Normal
        };
    }

    pub fn focus_next_pane(&mut self) {
        let next = match self.focused_pane {
            FocusPane::Grid => FocusPane::Details,
            FocusPane::Details => FocusPane::Search,
            FocusPane::Search => FocusPane::Grid,
        };
        self.focus_pane(next);
    }

    pub fn focus_prev_pane(&mut self) {
        let prev = match self.focused_pane {
            FocusPane::Grid => FocusPane::Search,
            FocusPane::Search => FocusPane::Details,
            FocusPane::Details => FocusPane::Grid,
        };
        self.focus_pane(prev);
    }

    /// Topmost control under the cell, if any.
    pub fn control_at(&self, column: u16, row: u16) -> Option<Control> {
        self.hit_areas
            .iter()
            .rev()
            .find(|(_, area)| area.contains(Position::new(column, row)))
            .map(|(control, _)| *control)
    }

    // -----------------------------------------------------------------------
    // Loading indicator
    // -----------------------------------------------------------------------

    pub fn start_progress(&mut self, title: impl Into<String>, stages: &[&str]) {
        self.show_progress = true;
        self.progress_title = title.into();
        self.progress_stages = stages
            .iter()
            .map(|label| ProgressStage {
                label: (*label).to_string(),
                ratio: 0.0,
                done: false,
            })
            .collect();
    }

    pub fn update_stage(&mut self, label: &str, ratio: f64) {
        if let Some(stage) = self
            .progress_stages
            .iter_mut()
            .find(|stage| stage.label == label)
        {
            stage.ratio = ratio.clamp(0.0, 1.0);
            if stage.ratio >= 1.0 {
                stage.done = true;
            }
        }
    }

    pub fn finish_stage(&mut self, label: &str) {
        self.update_stage(label, 1.0);
    }

    pub fn clear_progress(&mut self) {
        self.show_progress = false;
        self.progress_title.clear();
        self.progress_stages.clear();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::test_item;
    use crate::theme::Theme;
    use rand::SeedableRng;

    pub(crate) fn make_app(items: Vec<Item>) -> AppState {
        let mut app = AppState::new(
            SelectionStore::in_memory(),
            Theme::Dracula.config(),
            "na",
            "v0.1.0",
            StdRng::seed_from_u64(7),
        );
        app.install_catalog(CatalogLoad {
            items,
            ..Default::default()
        });
        app
    }

    pub(crate) fn mario_luigi() -> Vec<Item> {
        vec![
            test_item("Mario", "00", "01", "Figure"),
            test_item("Luigi", "00", "02", "Figure"),
        ]
    }

    fn grid_names(app: &AppState) -> Vec<&str> {
        app.grid
            .iter()
            .map(|&idx| app.catalog[idx].name.as_str())
            .collect()
    }

    #[test]
    fn test_install_shows_category_view_and_random_pick() {
        let app = make_app(mario_luigi());
        assert_eq!(app.load_status, LoadStatus::Ready { items: 2, skipped: 0 });
        assert_eq!(grid_names(&app), vec!["Mario", "Luigi"]);
        assert!(app.current_amiibo.is_some());
        assert_eq!(app.grid_cursor, Some(0));
    }

    #[test]
    fn test_null_payload_installs_empty_ready_catalog() {
        let response = crate::app_core::ingest::parse_catalog(r#"{"amiibo": null}"#).unwrap();
        let load = crate::app_core::ingest::build_catalog(response.amiibo, |_| {});
        let mut app = make_app(Vec::new());
        app.install_catalog(load);
        assert_eq!(app.load_status, LoadStatus::Ready { items: 0, skipped: 0 });
        assert!(app.grid.is_empty());
        assert_eq!(app.current_amiibo, None);
    }

    #[test]
    fn test_failed_load_leaves_empty_interactive_state() {
        let mut app = AppState::new(
            SelectionStore::in_memory(),
            Theme::Dracula.config(),
            "na",
            "v0",
            StdRng::seed_from_u64(1),
        );
        assert!(app.is_loading());
        app.fail_load("connection refused");
        assert_eq!(
            app.load_status,
            LoadStatus::Failed("connection refused".to_string())
        );
        assert!(app.grid.is_empty());
        assert_eq!(app.current_amiibo, None);

        app.display_random();
        app.toggle(SelectionKind::Owned);
        app.show_same_series();
        assert_eq!(app.current_amiibo, None);
        assert!(app.selections.set(SelectionKind::Owned).is_empty());
    }

    #[test]
    fn test_search_scenario() {
        let mut app = make_app(mario_luigi());

        app.search.set_text("mario");
        app.submit_search();
        assert_eq!(app.current_item().map(|i| i.name.as_str()), Some("Mario"));
        assert_eq!(grid_names(&app), vec!["Mario"]);

        app.search.set_text("xyz");
        app.submit_search();
        assert!(app.grid.is_empty());
        assert_eq!(app.grid_cursor, None);
        assert_eq!(app.current_item().map(|i| i.name.as_str()), Some("Mario"));
    }

    #[test]
    fn test_blank_search_matches_category_view_plus_random_pick() {
        let mut items = mario_luigi();
        items.push(test_item("Isabelle", "00", "03", "Card"));
        let mut app = make_app(items);
        app.set_filter(CategoryFilter::Card);
        app.current_amiibo = None;

        app.search.set_text("   ");
        app.submit_search();
        assert_eq!(app.grid, catalog::by_category(&app.catalog, CategoryFilter::Card));
        assert!(app.current_amiibo.is_some());
        assert_eq!(app.search.text(), "   ");
    }

    #[test]
    fn test_wishlist_scenario() {
        let mut app = make_app(mario_luigi());
        app.select_tile(1);
        assert_eq!(app.current_item().map(|i| i.name.as_str()), Some("Luigi"));
        app.toggle(SelectionKind::Wishlist);

        app.go_home();
        app.select_tile(0);
        app.search.set_text("mar");
        app.show_selection(SelectionKind::Wishlist);

        assert_eq!(grid_names(&app), vec!["Luigi"]);
        assert_eq!(app.current_item().map(|i| i.name.as_str()), Some("Luigi"));
        assert_eq!(app.search.text(), "");
        let detail = app.detail_view().unwrap();
        assert!(detail.wishlist.active);
        assert_eq!(detail.wishlist.label, "In Wishlist ★");
    }

    #[test]
    fn test_empty_selection_view_keeps_detail() {
        let mut app = make_app(mario_luigi());
        app.select_tile(1);
        app.show_selection(SelectionKind::Owned);
        assert!(app.grid.is_empty());
        assert_eq!(app.current_item().map(|i| i.name.as_str()), Some("Luigi"));
    }

    #[test]
    fn test_toggle_twice_restores_state_and_storage() {
        let mut app = make_app(mario_luigi());
        app.select_tile(0);
        app.toggle(SelectionKind::Owned);
        assert!(app.detail_view().unwrap().owned.active);
        app.toggle(SelectionKind::Owned);
        assert!(!app.detail_view().unwrap().owned.active);
        assert!(app.notice.is_none());
    }

    #[test]
    fn test_same_series_and_home() {
        let mut items = mario_luigi();
        let mut isabelle = test_item("Isabelle", "00", "03", "Card");
        isabelle.game_series = "Animal Crossing".to_string();
        items.push(isabelle);
        let mut app = make_app(items);

        app.select_tile(2);
        app.search.set_text("isa");
        app.show_same_series();
        assert_eq!(grid_names(&app), vec!["Isabelle"]);
        assert_eq!(app.search.text(), "");

        app.search.set_text("leftover");
        app.go_home();
        assert_eq!(app.search.text(), "");
        assert_eq!(app.grid.len(), 3);
    }

    #[test]
    fn test_filter_does_not_touch_detail() {
        let mut items = mario_luigi();
        let mut yarn = test_item("Yarn Yoshi", "00", "03", "Figure");
        yarn.amiibo_series = "Yarn".to_string();
        items.push(yarn);
        let mut app = make_app(items);
        app.select_tile(0);

        app.set_filter(CategoryFilter::Yarn);
        assert_eq!(grid_names(&app), vec!["Yarn Yoshi"]);
        assert_eq!(app.current_item().map(|i| i.name.as_str()), Some("Mario"));
        assert_eq!(app.current_filter, CategoryFilter::Yarn);
    }

    #[test]
    fn test_summary_tile_is_not_selectable() {
        let items: Vec<Item> = (0..60)
            .map(|i| test_item(&format!("Figure {i}"), "ff", &format!("{i:02}"), "Figure"))
            .collect();
        let mut app = make_app(items);
        app.select_tile(10);
        let before = app.current_amiibo;
        app.select_tile(50);
        assert_eq!(app.current_amiibo, before);
        assert_eq!(app.grid_cursor, Some(10));
    }

    #[test]
    fn test_cursor_movement_and_scroll() {
        let items: Vec<Item> = (0..20)
            .map(|i| test_item(&format!("Card {i}"), "aa", &format!("{i:02}"), "Card"))
            .collect();
        let mut app = make_app(items);
        app.grid_columns = 4;
        app.grid_rows = 2;

        app.move_cursor_rows(3);
        assert_eq!(app.grid_cursor, Some(12));
        app.scroll_to_cursor();
        assert_eq!(app.grid_scroll, 2);

        app.move_cursor(100);
        assert_eq!(app.grid_cursor, Some(19));
        app.move_cursor(-100);
        assert_eq!(app.grid_cursor, Some(0));
        app.scroll_to_cursor();
        assert_eq!(app.grid_scroll, 0);

        app.move_cursor(5);
        app.activate_cursor();
        assert_eq!(app.current_item().map(|i| i.name.as_str()), Some("Card 5"));
    }

    #[test]
    fn test_control_at_prefers_topmost() {
        let mut app = make_app(mario_luigi());
        app.hit_areas = vec![
            (Control::Title, Rect::new(0, 0, 40, 3)),
            (Control::Tile(0), Rect::new(0, 0, 10, 3)),
        ];
        assert_eq!(app.control_at(2, 1), Some(Control::Tile(0)));
        assert_eq!(app.control_at(20, 1), Some(Control::Title));
        assert_eq!(app.control_at(20, 5), None);
    }
}
