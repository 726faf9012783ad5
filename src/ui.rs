use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{
        Block, BorderType, Borders, Clear, LineGauge, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Wrap,
    },
};
use unicode_width::UnicodeWidthStr;

use crate::app_core::state::{AppState, Control, FocusPane, InputMode, LoadStatus};
use crate::catalog::CategoryFilter;
use crate::selection::SelectionKind;
use crate::view::{DetailView, Tile, ToggleButton};

pub const TILE_WIDTH: u16 = 26;
pub const TILE_HEIGHT: u16 = 5;
const FILTER_BUTTON_WIDTH: u16 = 10;
const SEARCH_BUTTON_WIDTH: u16 = 10;

/// Main UI entry point that renders the entire application layout.
pub fn ui(f: &mut Frame, app: &mut AppState) {
    let area = f.area();
    app.hit_areas.clear();
    app.frame_size = Some((area.width, area.height));

    f.render_widget(
        Block::default().style(Style::default().bg(app.theme.background)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Search and filters
            Constraint::Min(0),    // Grid and details
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[2]);

    render_header(f, app, chunks[0]);
    render_search_row(f, app, chunks[1]);
    render_grid(f, app, main_chunks[0]);
    render_details(f, app, main_chunks[1]);
    render_status_bar(f, app, chunks[3]);

    if app.show_progress {
        render_progress_modal(f, app);
    } else if app.show_help {
        render_help_overlay(f, app);
    }
}

fn pane_block(app: &AppState, pane: FocusPane, title: String) -> Block<'static> {
    let is_focused = app.focused_pane == pane;
    Block::default()
        .borders(Borders::ALL)
        .border_style(if is_focused {
            app.theme.border_selected
        } else {
            app.theme.border
        })
        .title(title)
        .title_style(app.theme.title)
        .style(app.theme.text)
}

fn render_header(f: &mut Frame, app: &mut AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(app.theme.border)
        .style(app.theme.text);
    let header = Paragraph::new(Line::from(Span::styled("amiibo catalog", app.theme.title)))
        .alignment(Alignment::Center)
        .block(block);
    f.render_widget(header, area);
    app.hit_areas.push((Control::Title, area));
}

fn render_search_row(f: &mut Frame, app: &mut AppState, area: Rect) {
    let mut constraints = vec![
        Constraint::Min(12),
        Constraint::Length(SEARCH_BUTTON_WIDTH),
    ];
    constraints.extend(CategoryFilter::ALL.map(|_| Constraint::Length(FILTER_BUTTON_WIDTH)));
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    render_search_input(f, app, chunks[0]);
    let button_style = app.theme.tile;
    render_boxed_button(
        f,
        app,
        chunks[1],
        "Search",
        button_style,
        Control::SearchButton,
    );
    for (filter, chunk) in CategoryFilter::ALL.into_iter().zip(chunks.iter().skip(2)) {
        let style = if filter == app.current_filter {
            app.theme.tile_selected
        } else {
            app.theme.tile
        };
        render_boxed_button(f, app, *chunk, filter.label(), style, Control::Filter(filter));
    }
}

fn render_search_input(f: &mut Frame, app: &mut AppState, area: Rect) {
    let is_searching = app.input_mode == InputMode::Searching;
    let block = pane_block(app, FocusPane::Search, " Search (/) ".to_string()).title_bottom(
        if is_searching {
            Line::from(" Enter search • Esc back ").right_aligned()
        } else {
            Line::from("")
        },
    );

    let inner = block.inner(area);
    app.search_input_area = Some(inner);
    app.hit_areas.push((Control::SearchInput, area));
    let horizontal_scroll = app.search.horizontal_scroll(inner.width);

    let content = if app.search.text().is_empty() && !is_searching {
        Text::from(Line::from(Span::styled(
            "name contains...",
            app.theme.muted.add_modifier(Modifier::ITALIC),
        )))
    } else {
        Text::from(app.search.text())
    };

    let paragraph = Paragraph::new(content)
        .block(block)
        .style(app.theme.text)
        .scroll((0, horizontal_scroll));
    f.render_widget(paragraph, area);

    if is_searching && inner.width > 0 && inner.height > 0 {
        let max_x = inner.width.saturating_sub(1);
        let visible_cursor_offset = app.search.cursor_offset().saturating_sub(horizontal_scroll);
        f.set_cursor_position((inner.x + visible_cursor_offset.min(max_x), inner.y));
    }
}

fn render_boxed_button(
    f: &mut Frame,
    app: &mut AppState,
    area: Rect,
    label: &str,
    style: Style,
    control: Control,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border)
        .style(style);
    f.render_widget(
        Paragraph::new(label.to_string())
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
    app.hit_areas.push((control, area));
}

fn render_inline_button(
    f: &mut Frame,
    app: &mut AppState,
    area: Rect,
    label: &str,
    style: Style,
    control: Control,
) {
    f.render_widget(
        Paragraph::new(format!("[ {label} ]"))
            .style(style)
            .alignment(Alignment::Center),
        area,
    );
    app.hit_areas.push((control, area));
}

fn inline_button_width(label: &str) -> u16 {
    label.width() as u16 + 4
}

fn render_grid(f: &mut Frame, app: &mut AppState, area: Rect) {
    let grid_view = app.grid_view();
    let block = pane_block(app, FocusPane::Grid, format!(" Amiibo ({}) ", app.grid.len()))
        .title_bottom(if app.focused_pane == FocusPane::Grid {
            Line::from(" ←↑↓→ move • Enter show • Tab cycle ").right_aligned()
        } else {
            Line::from("")
        });
    let inner = block.inner(area);
    f.render_widget(block, area);
    app.grid_area = Some(inner);

    if grid_view.tiles.is_empty() {
        let message = match &app.load_status {
            LoadStatus::Loading => Span::styled("Loading catalog...", app.theme.muted),
            LoadStatus::Failed(err) => {
                Span::styled(format!("Could not load catalog: {err}"), app.theme.error)
            }
            LoadStatus::Ready { .. } => Span::styled("No amiibo match.", app.theme.muted),
        };
        f.render_widget(
            Paragraph::new(Line::from(message))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            inner.inner(Margin {
                vertical: 1,
                horizontal: 1,
            }),
        );
        return;
    }

    let columns = (inner.width / TILE_WIDTH).max(1) as usize;
    let rows = (inner.height / TILE_HEIGHT).max(1) as usize;
    app.grid_columns = columns;
    app.grid_rows = rows;
    app.scroll_to_cursor();

    let first = app.grid_scroll * columns;
    for (slot, tile) in grid_view
        .tiles
        .iter()
        .skip(first)
        .take(columns * rows)
        .enumerate()
    {
        let col = (slot % columns) as u16;
        let row = (slot / columns) as u16;
        let tile_area = Rect::new(
            inner.x + col * TILE_WIDTH,
            inner.y + row * TILE_HEIGHT,
            TILE_WIDTH.min(inner.width),
            TILE_HEIGHT.min(inner.height.saturating_sub(row * TILE_HEIGHT)),
        );
        render_tile(f, app, tile, tile_area);
    }

    let total_rows = grid_view.tiles.len().div_ceil(columns);
    if total_rows > rows {
        let mut scrollbar_state =
            ScrollbarState::new(total_rows.saturating_sub(rows)).position(app.grid_scroll);
        f.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }
}

fn render_tile(f: &mut Frame, app: &mut AppState, tile: &Tile, area: Rect) {
    match *tile {
        Tile::Item {
            position,
            catalog_idx,
        } => {
            let Some(item) = app.catalog.get(catalog_idx) else {
                return;
            };
            let selected = app.grid_cursor == Some(position);
            let shown = app.current_amiibo == Some(catalog_idx);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(if shown {
                    BorderType::Thick
                } else {
                    BorderType::Rounded
                })
                .border_style(if selected {
                    app.theme.border_selected
                } else {
                    app.theme.border
                })
                .style(if selected {
                    app.theme.tile_selected
                } else {
                    app.theme.tile
                });

            let mut meta = vec![Span::styled(item.item_type.clone(), app.theme.muted)];
            if app.selections.contains(SelectionKind::Owned, &item.id) {
                meta.push(Span::raw(" "));
                meta.push(Span::styled("✓", app.theme.owned));
            }
            if app.selections.contains(SelectionKind::Wishlist, &item.id) {
                meta.push(Span::raw(" "));
                meta.push(Span::styled("★", app.theme.wishlist));
            }
            let lines = vec![
                Line::from(item.name.clone()),
                Line::from(Span::styled(item.character.clone(), app.theme.muted)),
                Line::from(meta),
            ];
            f.render_widget(Paragraph::new(lines).block(block), area);
            app.hit_areas.push((Control::Tile(position), area));
        }
        Tile::More { omitted } => {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(app.theme.border)
                .style(app.theme.muted);
            f.render_widget(
                Paragraph::new(Tile::summary_label(omitted))
                    .alignment(Alignment::Center)
                    .block(block),
                area,
            );
        }
    }
}

/// Renders the details pane for the current item with its action buttons.
///
/// The owned/wishlist view shortcuts stay available when nothing is selected.
fn render_details(f: &mut Frame, app: &mut AppState, area: Rect) {
    let block = pane_block(app, FocusPane::Details, " Details ".to_string());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1), // Selection toggles and series
            Constraint::Length(1),
            Constraint::Length(1), // Owned / wishlist views
        ])
        .horizontal_margin(1)
        .split(inner);

    let tile_style = app.theme.tile;
    render_button_row(
        f,
        app,
        chunks[3],
        &[
            ("Show Owned", tile_style, Control::ShowOwned),
            ("Show Wishlist", tile_style, Control::ShowWishlist),
        ],
    );

    let Some(detail) = app.detail_view() else {
        f.render_widget(
            Paragraph::new(Span::styled("Nothing selected", app.theme.muted))
                .alignment(Alignment::Center),
            chunks[0],
        );
        return;
    };

    f.render_widget(
        Paragraph::new(detail_lines(app, &detail)).wrap(Wrap { trim: false }),
        chunks[0],
    );

    let owned_style = toggle_style(app, &detail.owned, app.theme.owned);
    let wishlist_style = toggle_style(app, &detail.wishlist, app.theme.wishlist);
    render_button_row(
        f,
        app,
        chunks[1],
        &[
            (detail.owned.label, owned_style, Control::ToggleOwned),
            (detail.wishlist.label, wishlist_style, Control::ToggleWishlist),
            ("Show Series", tile_style, Control::ShowSeries),
        ],
    );
}

fn toggle_style(app: &AppState, button: &ToggleButton, active: Style) -> Style {
    if button.active { active } else { app.theme.tile }
}

fn render_button_row(
    f: &mut Frame,
    app: &mut AppState,
    area: Rect,
    buttons: &[(&str, Style, Control)],
) {
    let mut constraints = Vec::with_capacity(buttons.len() * 2);
    for (label, _, _) in buttons {
        constraints.push(Constraint::Length(inline_button_width(label)));
        constraints.push(Constraint::Length(1));
    }
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);
    for (idx, (label, style, control)) in buttons.iter().enumerate() {
        render_inline_button(f, app, chunks[idx * 2], label, *style, *control);
    }
}

fn detail_lines(app: &AppState, detail: &DetailView) -> Vec<Line<'static>> {
    let key_style = app.theme.title;
    let value_style = app.theme.text;
    let field = |key: &str, value: &str| {
        Line::from(vec![
            Span::styled(format!("{: <15}", key), key_style),
            Span::styled(value.to_string(), value_style),
        ])
    };

    vec![
        Line::from(Span::styled(
            detail.name.clone(),
            key_style.add_modifier(Modifier::UNDERLINED),
        )),
        Line::from(""),
        field("Character", &detail.character),
        field("Game series", &detail.game_series),
        field("Type", &detail.item_type),
        field("Amiibo series", &detail.amiibo_series),
        field(&format!("Release ({})", app.region), &detail.release),
        Line::from(""),
        Line::from(Span::styled(detail.image_alt.clone(), app.theme.muted)),
        Line::from(Span::styled(detail.image.clone(), app.theme.muted)),
    ]
}

/// Renders the multisection status bar at the bottom.
fn render_status_bar(f: &mut Frame, app: &mut AppState, area: Rect) {
    let area = Rect::new(
        area.x + 1,
        area.y,
        area.width.saturating_sub(2),
        area.height,
    );

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(40),
            Constraint::Percentage(20),
        ])
        .split(area);

    let bar_style = app.theme.text.add_modifier(Modifier::DIM);
    let key_style = app.theme.title;

    let shortcuts = Line::from(vec![
        Span::styled("/ ", key_style),
        Span::raw("search  "),
        Span::styled("r ", key_style),
        Span::raw("random  "),
        Span::styled("? ", key_style),
        Span::raw("help  "),
        Span::styled("q ", key_style),
        Span::raw("quit"),
    ]);
    f.render_widget(
        Paragraph::new(shortcuts)
            .style(bar_style)
            .alignment(Alignment::Left),
        chunks[0],
    );

    let status = match (&app.notice, &app.load_status) {
        (Some(notice), _) => Span::styled(notice.clone(), app.theme.error),
        (None, LoadStatus::Loading) => Span::raw("Loading..."),
        (None, LoadStatus::Failed(err)) => {
            Span::styled(format!("Load failed: {err}"), app.theme.error)
        }
        (None, LoadStatus::Ready { items, skipped: 0 }) => Span::raw(format!("Amiibo: {items}")),
        (None, LoadStatus::Ready { items, skipped }) => {
            Span::raw(format!("Amiibo: {items} ({skipped} skipped)"))
        }
    };
    f.render_widget(
        Paragraph::new(Line::from(status))
            .style(bar_style)
            .alignment(Alignment::Center),
        chunks[1],
    );

    f.render_widget(
        Paragraph::new(Line::from(app.app_version.clone()))
            .style(bar_style)
            .alignment(Alignment::Right),
        chunks[2],
    );
}

fn render_help_overlay(f: &mut Frame, app: &mut AppState) {
    let area = f.area();
    let popup_width = area.width.min(60).saturating_sub(4);
    let popup_height = 26.min(area.height.saturating_sub(2));
    if popup_width == 0 || popup_height == 0 {
        return;
    }
    let popup_rect = Rect::new(
        area.x + (area.width.saturating_sub(popup_width)) / 2,
        area.y + (area.height.saturating_sub(popup_height)) / 2,
        popup_width,
        popup_height,
    );

    f.render_widget(Clear, popup_rect);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_selected)
        .style(app.theme.text)
        .title(" Help ")
        .border_type(BorderType::Double)
        .title_style(app.theme.title);

    let inner_area = block.inner(popup_rect);
    f.render_widget(block, popup_rect);

    let key_style = app.theme.title;
    let desc_style = app.theme.text;
    let header_style = key_style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

    let format_section = |title: &str, items: Vec<(&str, &str)>| -> Vec<Line<'static>> {
        let mut lines = vec![Line::from(Span::styled(title.to_string(), header_style))];
        for (key, desc) in items {
            lines.push(Line::from(vec![
                Span::styled(format!("{: <14}", key), key_style),
                Span::styled(desc.to_string(), desc_style),
            ]));
        }
        lines
    };

    let mut lines = format_section(
        "Browse",
        vec![
            ("Arrows", "move between tiles"),
            ("Enter | Click", "show tile details"),
            ("1-4", "all | figure | card | yarn"),
            ("r", "random amiibo"),
            ("h | Title", "home"),
            ("Tab", "cycle focus"),
            ("q", "quit"),
        ],
    );
    lines.push(Line::from(""));
    lines.extend(format_section(
        "Collection",
        vec![
            ("o | w", "toggle owned | wishlist"),
            ("O | W", "show owned | wishlist"),
            ("s", "same game series"),
        ],
    ));
    lines.push(Line::from(""));
    lines.extend(format_section(
        "Search",
        vec![
            ("/", "focus search box"),
            ("Enter", "search names"),
            ("Ctrl+U", "clear search"),
            ("Ctrl+W", "delete word"),
            ("Ctrl+A | E", "start | end of line"),
        ],
    ));

    f.render_widget(
        Paragraph::new(lines),
        inner_area.inner(Margin {
            vertical: 1,
            horizontal: 1,
        }),
    );
}

fn render_progress_modal(f: &mut Frame, app: &mut AppState) {
    let area = f.area();
    let stages_len = app.progress_stages.len().max(1) as u16;
    let popup_width = area.width.min(60).saturating_sub(4);
    let popup_height = area.height.saturating_sub(2).min(stages_len + 4);
    if popup_width == 0 || popup_height == 0 {
        return;
    }

    let popup_rect = Rect::new(
        area.x + (area.width.saturating_sub(popup_width)) / 2,
        area.y + (area.height.saturating_sub(popup_height)) / 2,
        popup_width,
        popup_height,
    );

    f.render_widget(Clear, popup_rect);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_selected)
        .style(app.theme.text)
        .title(format!(" {} ", app.progress_title))
        .title_style(app.theme.title);

    let inner_area = block.inner(popup_rect);
    f.render_widget(block, popup_rect);

    let content_area = inner_area.inner(Margin {
        vertical: 1,
        horizontal: 1,
    });
    if content_area.width == 0 || content_area.height == 0 {
        return;
    }

    let min_gauge_width = 10u16;
    let percent_width = 4u16;
    let mut label_width = app
        .progress_stages
        .iter()
        .map(|stage| stage.label.width())
        .max()
        .unwrap_or(0) as u16;
    if content_area.width <= min_gauge_width {
        label_width = 0;
    } else {
        let max_label = content_area
            .width
            .saturating_sub(min_gauge_width + percent_width + 2);
        label_width = label_width.min(max_label);
    }
    let gap = if label_width > 0 { 1 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(1); stages_len as usize])
        .split(content_area);

    for (stage, row) in app.progress_stages.iter().zip(chunks.iter()) {
        let ratio = stage.ratio.clamp(0.0, 1.0);
        let row_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(label_width),
                Constraint::Length(gap),
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(percent_width),
            ])
            .split(*row);

        if label_width > 0 {
            f.render_widget(
                Paragraph::new(stage.label.clone()).style(app.theme.text),
                row_chunks[0],
            );
        }

        let gauge = LineGauge::default()
            .filled_style(app.theme.title)
            .unfilled_style(app.theme.border)
            .ratio(ratio)
            .label("");
        f.render_widget(gauge, row_chunks[2]);

        f.render_widget(
            Paragraph::new(format!("{:.0}%", ratio * 100.0))
                .style(app.theme.text)
                .alignment(Alignment::Right),
            row_chunks[4],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_core::state::tests::{make_app, mario_luigi};
    use crate::model::{Item, test_item};
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(app: &mut AppState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_renders_grid_detail_and_buttons() {
        let mut app = make_app(mario_luigi());
        app.select_tile(1);
        let screen = draw(&mut app, 160, 40);

        assert!(screen.contains("amiibo catalog"));
        assert!(screen.contains("Mario"));
        assert!(screen.contains("Luigi"));
        assert!(screen.contains("Toggle Owned"));
        assert!(screen.contains("Toggle Wishlist"));
        assert!(screen.contains("Show Series"));
        assert!(screen.contains("Amiibo: 2"));

        let tiles: Vec<_> = app
            .hit_areas
            .iter()
            .filter(|(control, _)| matches!(control, Control::Tile(_)))
            .collect();
        assert_eq!(tiles.len(), 2);
        assert!(
            app.hit_areas
                .iter()
                .any(|(control, _)| *control == Control::Filter(CategoryFilter::Yarn))
        );
        assert_eq!(app.grid_columns, 3);
    }

    #[test]
    fn test_tile_hit_area_matches_click_target() {
        let mut app = make_app(mario_luigi());
        draw(&mut app, 160, 40);
        let (_, rect) = app
            .hit_areas
            .iter()
            .find(|(control, _)| *control == Control::Tile(1))
            .copied()
            .unwrap();
        assert_eq!(app.control_at(rect.x + 2, rect.y + 1), Some(Control::Tile(1)));
    }

    #[test]
    fn test_active_toggle_label() {
        let mut app = make_app(mario_luigi());
        app.select_tile(0);
        app.toggle(SelectionKind::Owned);
        let screen = draw(&mut app, 160, 40);
        assert!(screen.contains("Owned ✓"));
        assert!(!screen.contains("Toggle Owned"));
    }

    #[test]
    fn test_empty_grid_messages() {
        let mut app = make_app(mario_luigi());
        app.search.set_text("xyz");
        app.submit_search();
        let screen = draw(&mut app, 160, 40);
        assert!(screen.contains("No amiibo match."));

        app.fail_load("timed out");
        let screen = draw(&mut app, 160, 40);
        assert!(screen.contains("Could not load catalog: timed out"));
        assert!(screen.contains("Nothing selected"));
    }

    #[test]
    fn test_tile_shows_name_and_character() {
        let mut gold = test_item("Mario - Gold Edition", "00", "03", "Figure");
        gold.character = "Plumberman".to_string();
        let mut app = make_app(vec![gold]);
        let screen = draw(&mut app, 160, 40);

        let (_, rect) = app
            .hit_areas
            .iter()
            .find(|(control, _)| *control == Control::Tile(0))
            .copied()
            .unwrap();
        let row = |y: u16| -> String {
            let line = screen.lines().nth(y as usize).unwrap_or_default();
            line.chars()
                .skip(rect.x as usize)
                .take(rect.width as usize)
                .collect()
        };
        assert!(row(rect.y + 1).contains("Mario - Gold Edition"));
        assert!(row(rect.y + 2).contains("Plumberman"));
        assert!(row(rect.y + 3).contains("Figure"));
    }

    #[test]
    fn test_view_shortcuts_without_selection() {
        let mut app = make_app(mario_luigi());
        app.current_amiibo = None;
        let screen = draw(&mut app, 160, 40);
        assert!(screen.contains("Nothing selected"));
        assert!(screen.contains("Show Owned"));
        assert!(screen.contains("Show Wishlist"));
        assert!(!screen.contains("Toggle Owned"));

        let (_, rect) = app
            .hit_areas
            .iter()
            .find(|(control, _)| *control == Control::ShowWishlist)
            .copied()
            .unwrap();
        assert_eq!(
            app.control_at(rect.x + 1, rect.y),
            Some(Control::ShowWishlist)
        );
    }

    #[test]
    fn test_summary_tile_rendered_after_cap() {
        let items: Vec<Item> = (0..55)
            .map(|i| test_item(&format!("Figure {i}"), "ff", &format!("{i:02}"), "Figure"))
            .collect();
        let mut app = make_app(items);
        let screen = draw(&mut app, 220, 80);
        assert!(screen.contains("+5 more..."));
        assert!(screen.contains("Amiibo (55)"));
        let tiles = app
            .hit_areas
            .iter()
            .filter(|(control, _)| matches!(control, Control::Tile(_)))
            .count();
        assert_eq!(tiles, 50);
    }

    #[test]
    fn test_progress_modal_and_help_overlay() {
        let mut app = make_app(mario_luigi());
        app.start_progress("Loading catalog", &["Downloading", "Parsing"]);
        app.update_stage("Downloading", 0.5);
        let screen = draw(&mut app, 100, 30);
        assert!(screen.contains("Downloading"));
        assert!(screen.contains("50%"));

        app.clear_progress();
        app.show_help = true;
        let screen = draw(&mut app, 100, 40);
        assert!(screen.contains("Help"));
        assert!(screen.contains("toggle owned | wishlist"));
    }
}
