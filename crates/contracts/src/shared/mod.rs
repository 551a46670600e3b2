pub mod config;
pub mod descriptor;
pub mod envelope;
pub mod error;
pub mod form_state;
pub mod format;
pub mod list_state;
pub mod normalizer;
pub mod path;
