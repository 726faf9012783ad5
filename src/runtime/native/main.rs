//! # amiibo-tui
//!
//! A terminal user interface for browsing the amiibo catalog and tracking
//! owned and wishlisted figures.

use amiibo_tui::app_core::ingest::{self, CatalogLoad, DEFAULT_ENDPOINT};
use amiibo_tui::app_core::input::{AppKeyCode, AppKeyEvent, AppMouseEvent, AppMouseKind};
use amiibo_tui::app_core::reducer;
use amiibo_tui::app_core::state::AppState;
use amiibo_tui::runtime::native::{data, logging, storage::FileStore};
use amiibo_tui::selection::{SelectionKind, SelectionStore};
use amiibo_tui::{theme, ui};
use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::{Duration, Instant};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = "amiibo-tui: a terminal catalog of amiibo figures and cards.\n\
                  Search by name, filter by category, and keep owned and wishlist sets."
)]
struct Args {
    /// Load the catalog from a saved API response instead of the network
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Catalog endpoint
    #[arg(short, long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Release region shown in the details pane (na, eu, jp, au)
    #[arg(short, long, default_value = "na")]
    region: String,

    /// UI theme (dracula, solarized, gruvbox, everforest_light)
    #[arg(short, long)]
    theme: Option<String>,

    /// Show all paths used by the application (data, selections, log)
    #[arg(long)]
    config: bool,

    /// Remove the stored owned and wishlist sets
    #[arg(long)]
    clear_selections: bool,
}

// ---------------------------------------------------------------------------
// Crossterm → shared-reducer adapters
// ---------------------------------------------------------------------------

fn crossterm_to_app_key_event(
    code: KeyCode,
    modifiers: KeyModifiers,
    kind: KeyEventKind,
) -> Option<AppKeyEvent> {
    if matches!(kind, KeyEventKind::Release) {
        return None;
    }

    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    let alt = modifiers.contains(KeyModifiers::ALT);
    let shift = modifiers.contains(KeyModifiers::SHIFT);
    let super_key = modifiers.contains(KeyModifiers::SUPER);

    let key_code = match code {
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
        KeyCode::Tab => AppKeyCode::Tab,
        KeyCode::BackTab => AppKeyCode::BackTab,
        _ => return None,
    };

    Some(AppKeyEvent {
        code: key_code,
        ctrl: ctrl || super_key,
        alt,
        shift,
    })
}

fn crossterm_to_app_mouse_event(mouse: &event::MouseEvent) -> Option<AppMouseEvent> {
    let kind = match mouse.kind {
        MouseEventKind::Down(event::MouseButton::Left) => AppMouseKind::LeftDown,
        MouseEventKind::ScrollUp => AppMouseKind::ScrollUp,
        MouseEventKind::ScrollDown => AppMouseKind::ScrollDown,
        _ => return None,
    };
    Some(AppMouseEvent::new(kind, mouse.column, mouse.row))
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let args = Args::parse();
    let app_version = format!("v{}", env!("CARGO_PKG_VERSION"));

    let theme_name = args.theme.as_deref().unwrap_or("dracula");
    let theme = theme::Theme::from_str(theme_name)
        .map_err(anyhow::Error::msg)?
        .config();

    let data_dir = data::get_data_dir()?;
    let store = FileStore::new(&data_dir);

    if args.config {
        println!("App Paths:");
        println!("  Data:     {}", data_dir.display());
        for kind in [SelectionKind::Owned, SelectionKind::Wishlist] {
            println!(
                "  {: <9} {}",
                format!("{}:", kind.storage_key()),
                store.path_for(kind.storage_key()).display()
            );
        }
        println!(
            "  Log:      {}",
            data_dir.join(logging::LOG_FILE_NAME).display()
        );
        return Ok(());
    }

    if args.clear_selections {
        SelectionStore::load(Box::new(store)).clear()?;
        println!("Owned and wishlist selections cleared.");
        return Ok(());
    }

    logging::init(&data_dir)?;
    info!(version = %app_version, endpoint = %args.endpoint, "starting");

    let selections = SelectionStore::load(Box::new(store));
    let mut app = AppState::new(
        selections,
        theme,
        args.region.clone(),
        app_version,
        StdRng::from_os_rng(),
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = (|| -> Result<()> {
        load_catalog_with_ui(&mut terminal, &mut app, &args)?;
        run_app(&mut terminal, &mut app)
    })();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = %err, "exiting with error");
    }
    res
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    terminal.draw(|f| ui::ui(f, app))?;

    loop {
        if app.should_quit {
            break;
        }

        match event::read()? {
            Event::Key(key) => {
                if let Some(event) = crossterm_to_app_key_event(key.code, key.modifiers, key.kind)
                {
                    reducer::handle_key_event(app, event);
                    terminal.draw(|f| ui::ui(f, app))?;
                }
            }
            Event::Mouse(mouse) => {
                if let Some(event) = crossterm_to_app_mouse_event(&mouse)
                    && reducer::handle_mouse_event(app, event)
                {
                    terminal.draw(|f| ui::ui(f, app))?;
                }
            }
            Event::Resize(_, _) => {
                terminal.draw(|f| ui::ui(f, app))?;
            }
            _ => {}
        }
    }
    Ok(())
}

/// Fetches the catalog while drawing the loading modal.
///
/// A failed fetch is recorded in the app state and the UI keeps running;
/// only terminal errors are returned.
fn load_catalog_with_ui<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    args: &Args,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let response = if let Some(file) = &args.file {
        app.start_progress("Loading catalog", &["Reading", "Parsing"]);
        terminal.draw(|f| ui::ui(f, app))?;
        let response = data::load_catalog_file(file);
        app.finish_stage("Reading");
        response
    } else {
        app.start_progress("Loading catalog", &["Downloading", "Parsing"]);
        terminal.draw(|f| ui::ui(f, app))?;

        let mut last_ratio = -1.0;
        let mut last_draw = Instant::now();
        let mut draw_error: Option<anyhow::Error> = None;
        let response = data::fetch_catalog_with_progress(&args.endpoint, |progress| {
            let ratio = progress.ratio();
            let elapsed_ok = last_draw.elapsed() >= Duration::from_millis(120);
            let ratio_ok = (ratio - last_ratio).abs() >= 0.01;
            let should_draw = if progress.total.is_some() {
                ratio_ok || elapsed_ok
            } else {
                elapsed_ok
            };
            if !should_draw || draw_error.is_some() {
                return;
            }
            app.update_stage("Downloading", ratio);
            if let Err(err) = terminal.draw(|f| ui::ui(f, app)) {
                draw_error = Some(anyhow::Error::from(err));
            } else {
                last_draw = Instant::now();
                last_ratio = ratio;
            }
        });

        if let Some(err) = draw_error {
            return Err(err);
        }
        app.finish_stage("Downloading");
        response
    };
    terminal.draw(|f| ui::ui(f, app))?;

    match response {
        Ok(response) => {
            let mut last_draw = Instant::now();
            let mut draw_error: Option<anyhow::Error> = None;
            let load: CatalogLoad = ingest::build_catalog(response.amiibo, |ratio| {
                if draw_error.is_some() {
                    return;
                }
                app.update_stage("Parsing", ratio);
                if last_draw.elapsed() >= Duration::from_millis(120) {
                    if let Err(err) = terminal.draw(|f| ui::ui(f, app)) {
                        draw_error = Some(anyhow::Error::from(err));
                    } else {
                        last_draw = Instant::now();
                    }
                }
            });
            if let Some(err) = draw_error {
                return Err(err);
            }
            app.finish_stage("Parsing");
            terminal.draw(|f| ui::ui(f, app))?;
            app.install_catalog(load);
        }
        Err(err) => app.fail_load(format!("{err:#}")),
    }

    app.clear_progress();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{MouseButton, MouseEvent};

    fn mouse_event(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_key_adapter_maps_modifiers() {
        let event = crossterm_to_app_key_event(
            KeyCode::Char('w'),
            KeyModifiers::CONTROL,
            KeyEventKind::Press,
        )
        .unwrap();
        assert_eq!(event, AppKeyEvent::with_ctrl(AppKeyCode::Char('w')));

        let event =
            crossterm_to_app_key_event(KeyCode::Char('u'), KeyModifiers::SUPER, KeyEventKind::Press)
                .unwrap();
        assert!(event.ctrl);

        let event =
            crossterm_to_app_key_event(KeyCode::BackTab, KeyModifiers::SHIFT, KeyEventKind::Press)
                .unwrap();
        assert_eq!(event, AppKeyEvent::with_shift(AppKeyCode::BackTab));
    }

    #[test]
    fn test_key_adapter_drops_release_and_unknown_keys() {
        assert!(
            crossterm_to_app_key_event(KeyCode::Char('q'), KeyModifiers::NONE, KeyEventKind::Release)
                .is_none()
        );
        assert!(
            crossterm_to_app_key_event(KeyCode::F(5), KeyModifiers::NONE, KeyEventKind::Press)
                .is_none()
        );
        assert!(
            crossterm_to_app_key_event(KeyCode::Enter, KeyModifiers::NONE, KeyEventKind::Repeat)
                .is_some()
        );
    }

    #[test]
    fn test_mouse_adapter() {
        let down = mouse_event(MouseEventKind::Down(MouseButton::Left), 4, 9);
        assert_eq!(
            crossterm_to_app_mouse_event(&down),
            Some(AppMouseEvent::new(AppMouseKind::LeftDown, 4, 9))
        );
        let wheel = mouse_event(MouseEventKind::ScrollDown, 1, 2);
        assert_eq!(
            crossterm_to_app_mouse_event(&wheel).map(|e| e.kind),
            Some(AppMouseKind::ScrollDown)
        );
        let right = mouse_event(MouseEventKind::Down(MouseButton::Right), 1, 2);
        assert!(crossterm_to_app_mouse_event(&right).is_none());
        let moved = mouse_event(MouseEventKind::Moved, 1, 2);
        assert!(crossterm_to_app_mouse_event(&moved).is_none());
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["amiibo-tui"]);
        assert_eq!(args.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(args.region, "na");
        assert!(args.file.is_none());
        assert!(!args.clear_selections);

        let args = Args::parse_from(["amiibo-tui", "--file", "cache.json", "-r", "jp"]);
        assert_eq!(args.file, Some(PathBuf::from("cache.json")));
        assert_eq!(args.region, "jp");
    }
}
