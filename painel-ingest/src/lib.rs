//! painel-ingest: turns an uploaded transaction export into a [`painel_core::Dataset`].

pub mod cells;
pub mod error;
pub mod loader;

pub use cells::{parse_amount, parse_date};
pub use error::{FormatError, LoadError};
pub use loader::{load_path, load_reader, load_str};
