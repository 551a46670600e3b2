pub mod list;
pub mod rates_editor;
