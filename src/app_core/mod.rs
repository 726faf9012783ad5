//! Shared application core: state, input types, reducer, and catalog ingestion.

pub mod ingest;
pub mod input;
pub mod pointer;
pub mod reducer;
pub mod state;
pub mod text_input;
