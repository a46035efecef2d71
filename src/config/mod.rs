//! Configuration loaded from the vault base directory.

pub mod settings;

pub use settings::{Backend, Settings};
