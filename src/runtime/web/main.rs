#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, unused_imports, unused_variables)
)]

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("amiibo-tui-web must be built for wasm32-unknown-unknown");
}

// ---------------------------------------------------------------------------
// Web target (wasm32): everything below is only compiled for the browser.
// ---------------------------------------------------------------------------

#[cfg(target_arch = "wasm32")]
use amiibo_tui::app_core::ingest::{self, DEFAULT_ENDPOINT};
#[cfg(target_arch = "wasm32")]
use amiibo_tui::app_core::input::{AppKeyCode, AppKeyEvent, AppMouseEvent, AppMouseKind};
#[cfg(target_arch = "wasm32")]
use amiibo_tui::app_core::pointer::{DomGrid, PixelRect};
#[cfg(target_arch = "wasm32")]
use amiibo_tui::app_core::reducer;
#[cfg(target_arch = "wasm32")]
use amiibo_tui::app_core::state::AppState;
#[cfg(target_arch = "wasm32")]
use amiibo_tui::runtime::web::{data, logging, storage::LocalStorageStore};
#[cfg(target_arch = "wasm32")]
use amiibo_tui::selection::{MemoryStore, SelectionStore};
#[cfg(target_arch = "wasm32")]
use amiibo_tui::{theme, ui};
#[cfg(target_arch = "wasm32")]
use anyhow::Result;
#[cfg(target_arch = "wasm32")]
use js_sys::Promise;
#[cfg(target_arch = "wasm32")]
use rand::SeedableRng;
#[cfg(target_arch = "wasm32")]
use rand::rngs::StdRng;
#[cfg(target_arch = "wasm32")]
use ratatui::Terminal;
#[cfg(target_arch = "wasm32")]
use ratzilla::web_sys::wasm_bindgen::{JsCast, JsValue};
#[cfg(target_arch = "wasm32")]
use ratzilla::{
    DomBackend, WebRenderer,
    event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind},
};
#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use tracing::{Level, info, warn};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen_futures::{JsFuture, spawn_local};

// ---------------------------------------------------------------------------
// Ratzilla → shared input type adapters
// ---------------------------------------------------------------------------

#[cfg(target_arch = "wasm32")]
fn ratzilla_to_app_key_event(key: KeyEvent) -> Option<AppKeyEvent> {
    let key_code = match key.code {
        KeyCode::Char(c) => AppKeyCode::Char(c),
        KeyCode::Backspace => AppKeyCode::Backspace,
        KeyCode::Delete => AppKeyCode::Delete,
        KeyCode::Enter => AppKeyCode::Enter,
        KeyCode::Esc => AppKeyCode::Esc,
        KeyCode::Up => AppKeyCode::Up,
        KeyCode::Down => AppKeyCode::Down,
        KeyCode::Left => AppKeyCode::Left,
        KeyCode::Right => AppKeyCode::Right,
        KeyCode::Home => AppKeyCode::Home,
        KeyCode::End => AppKeyCode::End,
        KeyCode::PageUp => AppKeyCode::PageUp,
        KeyCode::PageDown => AppKeyCode::PageDown,
        // Shift-tab arrives as Tab with the shift modifier
        KeyCode::Tab if key.shift => AppKeyCode::BackTab,
        KeyCode::Tab => AppKeyCode::Tab,
        _ => return None,
    };
    Some(AppKeyEvent {
        code: key_code,
        ctrl: key.ctrl,
        alt: key.alt,
        shift: key.shift,
    })
}

/// Ratzilla only reports presses, releases and moves, so wheel scrolling is
/// not available in the browser.
#[cfg(target_arch = "wasm32")]
fn ratzilla_to_app_mouse_event(column: u16, row: u16, mouse: &MouseEvent) -> Option<AppMouseEvent> {
    match mouse.event {
        MouseEventKind::Pressed if mouse.button == MouseButton::Left => {
            Some(AppMouseEvent::new(AppMouseKind::LeftDown, column, row))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Web-specific helpers
// ---------------------------------------------------------------------------

#[cfg(target_arch = "wasm32")]
async fn yield_to_browser() {
    let promise = Promise::new(&mut |resolve, _reject| {
        if let Some(window) = ratzilla::web_sys::window() {
            let _ = window
                .set_timeout_with_callback_and_timeout_and_arguments_0(resolve.unchecked_ref(), 0);
        } else {
            let _ = resolve.call0(&JsValue::NULL);
        }
    });
    let _ = JsFuture::from(promise).await;
}

/// Measures the rendered DOM grid so pixel positions can be mapped to cells.
#[cfg(target_arch = "wasm32")]
fn measure_dom_grid(app: &AppState) -> Option<DomGrid> {
    let window = ratzilla::web_sys::window()?;
    let document = window.document()?;
    let grid: ratzilla::web_sys::HtmlElement = document
        .get_element_by_id("grid_ratzilla_grid")?
        .dyn_into()
        .ok()?;
    let rect = grid.get_bounding_client_rect();

    let mut cell_px = None;
    if let Some(first_row) = grid.first_element_child()
        && let Ok(first_row) = first_row.dyn_into::<ratzilla::web_sys::HtmlElement>()
        && let Some(first_cell) = first_row.first_element_child()
        && let Ok(first_cell) = first_cell.dyn_into::<ratzilla::web_sys::HtmlElement>()
    {
        let row_rect = first_row.get_bounding_client_rect();
        let cell_rect = first_cell.get_bounding_client_rect();
        cell_px = Some((cell_rect.width(), row_rect.height()));
    }

    Some(DomGrid {
        rect: PixelRect {
            left: rect.left(),
            top: rect.top(),
            width: rect.width(),
            height: rect.height(),
        },
        cell_px,
        cells: app.frame_size,
    })
}

#[cfg(target_arch = "wasm32")]
fn handle_key_event(app: &mut AppState, key_event: KeyEvent) {
    if let Some(event) = ratzilla_to_app_key_event(key_event) {
        reducer::handle_key_event(app, event);
    }
}

#[cfg(target_arch = "wasm32")]
fn handle_mouse_event(app: &mut AppState, mouse: MouseEvent) -> bool {
    let Some((column, row)) =
        measure_dom_grid(app).and_then(|grid| grid.cell_at(mouse.x as f64, mouse.y as f64))
    else {
        return false;
    };
    let Some(event) = ratzilla_to_app_mouse_event(column, row, &mouse) else {
        return false;
    };
    reducer::handle_mouse_event(app, event)
}

#[cfg(target_arch = "wasm32")]
fn open_selections() -> SelectionStore {
    match LocalStorageStore::open() {
        Some(store) => SelectionStore::load(Box::new(store)),
        None => {
            warn!("localStorage unavailable, selections will not persist");
            SelectionStore::load(Box::new(MemoryStore::new()))
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog loading (async, web-specific)
// ---------------------------------------------------------------------------

#[cfg(target_arch = "wasm32")]
fn start_load_catalog(app_state: Rc<RefCell<AppState>>) {
    app_state
        .borrow_mut()
        .start_progress("Loading catalog", &["Downloading", "Parsing"]);

    spawn_local(async move {
        if let Err(err) = load_catalog(&app_state).await {
            let mut app = app_state.borrow_mut();
            app.clear_progress();
            app.fail_load(format!("{err:#}"));
        }
    });
}

#[cfg(target_arch = "wasm32")]
async fn load_catalog(app_state: &Rc<RefCell<AppState>>) -> Result<()> {
    app_state.borrow_mut().update_stage("Downloading", 0.05);

    let response = data::fetch_catalog(DEFAULT_ENDPOINT).await?;

    app_state.borrow_mut().finish_stage("Downloading");
    yield_to_browser().await;

    let load = ingest::build_catalog(response.amiibo, |_| {});

    let mut app = app_state.borrow_mut();
    app.finish_stage("Parsing");
    app.install_catalog(load);
    app.clear_progress();
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[cfg(target_arch = "wasm32")]
fn main() -> Result<()> {
    console_error_panic_hook::set_once();
    logging::init(Level::INFO);

    let app_version = format!("v{}", env!("CARGO_PKG_VERSION"));
    info!(version = %app_version, "starting");

    let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
    let app = Rc::new(RefCell::new(AppState::new(
        open_selections(),
        theme::Theme::default().config(),
        "na",
        app_version,
        StdRng::seed_from_u64(seed),
    )));

    start_load_catalog(app.clone());

    let backend = DomBackend::new_by_id("grid").map_err(|err| anyhow::anyhow!(err.to_string()))?;
    let terminal = Terminal::new(backend)?;

    terminal.on_key_event({
        let event_state = app.clone();
        move |key_event| {
            let mut state = event_state.borrow_mut();
            handle_key_event(&mut state, key_event);
        }
    });

    terminal.on_mouse_event({
        let event_state = app.clone();
        move |mouse_event| {
            let mut state = event_state.borrow_mut();
            let _ = handle_mouse_event(&mut state, mouse_event);
        }
    });

    terminal.draw_web(move |f| {
        let mut state = app.borrow_mut();
        ui::ui(f, &mut state);
    });

    Ok(())
}
