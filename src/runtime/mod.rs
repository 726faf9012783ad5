//! Platform runtimes. Each one owns fetching, storage and logging for its target
//! and drives the shared `app_core`.

#[cfg(not(target_arch = "wasm32"))]
pub mod native;

#[cfg(target_arch = "wasm32")]
pub mod web;
