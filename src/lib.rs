//! amiibo-tui library: shared application core for native and web runtimes.

pub mod app_core;
pub mod catalog;
pub mod model;
pub mod runtime;
pub mod selection;
pub mod theme;
pub mod ui;
pub mod view;
