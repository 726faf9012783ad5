//! Native runtime support: data directory, catalog download, file storage and logging.

pub mod data;
pub mod logging;
pub mod storage;
