//! Scenario files

pub mod loader;

pub use loader::{everglades, load_from_path, parse_toml, EVERGLADES};
