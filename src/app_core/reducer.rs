//! Shared event reducer: handlers for key and mouse events.
//!
//! Both the native and web runtimes call these functions after converting their
//! platform-specific events to [`AppKeyEvent`] / [`AppMouseEvent`].

use crate::app_core::input::{AppKeyCode, AppKeyEvent, AppMouseEvent, AppMouseKind};
use crate::app_core::state::{AppState, Control, FocusPane, InputMode};
use crate::catalog::CategoryFilter;
use crate::selection::SelectionKind;

/// Tile rows moved per mouse wheel notch.
pub const SCROLL_ROWS: isize = 1;

/// Handle a runtime-agnostic key event, mutating `app` in place.
pub fn handle_key_event(app: &mut AppState, event: AppKeyEvent) {
    let code = event.code;
    let ctrl = event.ctrl;
    let alt = event.alt;

    if ctrl && code == AppKeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    if app.is_loading() {
        if code == AppKeyCode::Char('q') || code == AppKeyCode::Esc {
            app.should_quit = true;
        }
        return;
    }

    if app.show_help {
        if matches!(code, AppKeyCode::Char('?') | AppKeyCode::Esc) {
            app.show_help = false;
        }
        return;
    }

    if code == AppKeyCode::Tab || code == AppKeyCode::BackTab {
        if code == AppKeyCode::BackTab || event.shift {
            app.focus_prev_pane();
        } else {
            app.focus_next_pane();
        }
        return;
    }

    match app.input_mode {
        InputMode::Normal => match code {
            AppKeyCode::Char('q') => app.should_quit = true,
            AppKeyCode::Char('/') => {
                app.focus_pane(FocusPane::Search);
                app.search.move_to_end();
            }
            AppKeyCode::Char('?') => app.show_help = true,
            AppKeyCode::Char('r') if !ctrl => app.display_random(),
            AppKeyCode::Char('h') if !ctrl => app.go_home(),
            AppKeyCode::Char('o') if !ctrl => app.toggle(SelectionKind::Owned),
            AppKeyCode::Char('w') if !ctrl => app.toggle(SelectionKind::Wishlist),
            AppKeyCode::Char('O') => app.show_selection(SelectionKind::Owned),
            AppKeyCode::Char('W') => app.show_selection(SelectionKind::Wishlist),
            AppKeyCode::Char('s') if !ctrl => app.show_same_series(),
            AppKeyCode::Char(c @ '1'..='4') if !alt => {
                let idx = c as usize - '1' as usize;
                app.set_filter(CategoryFilter::ALL[idx]);
            }
            AppKeyCode::Left => app.move_cursor(-1),
            AppKeyCode::Right => app.move_cursor(1),
            AppKeyCode::Up => app.move_cursor_rows(-1),
            AppKeyCode::Down => app.move_cursor_rows(1),
            AppKeyCode::PageUp => app.move_cursor_rows(-(app.grid_rows.max(1) as isize)),
            AppKeyCode::PageDown => app.move_cursor_rows(app.grid_rows.max(1) as isize),
            AppKeyCode::Home => app.move_cursor(isize::MIN / 2),
            AppKeyCode::End => app.move_cursor(isize::MAX / 2),
            AppKeyCode::Enter => app.activate_cursor(),
            _ => {}
        },
        InputMode::Searching => match code {
            AppKeyCode::Enter => {
                app.submit_search();
                app.focus_pane(FocusPane::Grid);
            }
            AppKeyCode::Esc => app.focus_pane(FocusPane::Grid),
            AppKeyCode::Char('u') if ctrl => app.search.clear(),
            AppKeyCode::Char('w') if ctrl => app.search.delete_word(),
            AppKeyCode::Char('a') if ctrl => app.search.move_to_start(),
            AppKeyCode::Char('e') if ctrl => app.search.move_to_end(),
            AppKeyCode::Char(c) if !ctrl => app.search.insert(c),
            AppKeyCode::Backspace => app.search.backspace(),
            AppKeyCode::Delete => app.search.delete(),
            AppKeyCode::Left => app.search.move_left(),
            AppKeyCode::Right => app.search.move_right(),
            AppKeyCode::Home => app.search.move_to_start(),
            AppKeyCode::End => app.search.move_to_end(),
            _ => {}
        },
    }
    app.scroll_to_cursor();
}

/// Handle a runtime-agnostic mouse event.
///
/// `event.column` and `event.row` must already be in terminal cell coordinates.
/// Returns `true` if the UI needs to be redrawn.
pub fn handle_mouse_event(app: &mut AppState, event: AppMouseEvent) -> bool {
    if app.is_loading() {
        return false;
    }
    if app.show_help {
        if event.kind == AppMouseKind::LeftDown {
            app.show_help = false;
            return true;
        }
        return false;
    }

    let over_grid = app
        .grid_area
        .is_some_and(|area| area.contains((event.column, event.row).into()));

    match event.kind {
        AppMouseKind::ScrollUp | AppMouseKind::ScrollDown => {
            if !over_grid || app.grid.is_empty() {
                return false;
            }
            let rows = if event.kind == AppMouseKind::ScrollDown {
                SCROLL_ROWS
            } else {
                -SCROLL_ROWS
            };
            app.move_cursor_rows(rows);
            app.scroll_to_cursor();
            true
        }
        AppMouseKind::LeftDown => {
            let Some(control) = app.control_at(event.column, event.row) else {
                if over_grid {
                    app.focus_pane(FocusPane::Grid);
                    return true;
                }
                return false;
            };
            activate_control(app, control, event.column);
            app.scroll_to_cursor();
            true
        }
    }
}

fn activate_control(app: &mut AppState, control: Control, column: u16) {
    match control {
        Control::Title => app.go_home(),
        Control::SearchInput => {
            app.focus_pane(FocusPane::Search);
            if let Some(area) = app.search_input_area {
                let scroll = app.search.horizontal_scroll(area.width);
                let local_x = column.saturating_sub(area.x);
                app.search.set_cursor_at_column(scroll + local_x);
            }
        }
        Control::SearchButton => {
            app.submit_search();
            app.focus_pane(FocusPane::Grid);
        }
        Control::Filter(filter) => app.set_filter(filter),
        Control::ToggleOwned => app.toggle(SelectionKind::Owned),
        Control::ToggleWishlist => app.toggle(SelectionKind::Wishlist),
        Control::ShowSeries => app.show_same_series(),
        Control::ShowOwned => app.show_selection(SelectionKind::Owned),
        Control::ShowWishlist => app.show_selection(SelectionKind::Wishlist),
        Control::Tile(position) => {
            app.focus_pane(FocusPane::Grid);
            app.select_tile(position);
        }
    }
}
