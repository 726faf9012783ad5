//! Browser runtime support: catalog fetch, `localStorage` persistence and console logging.

pub mod data;
pub mod logging;
pub mod storage;
