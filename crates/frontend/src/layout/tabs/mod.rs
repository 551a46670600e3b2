//! Tab management module
//!
//! - `page`: TabPage wrapper that shows or hides one tab's content
//! - `registry`: tab key to view mapping
//! - `tab_labels`: tab keys and titles
//! - `tab_bar`: the strip of open tabs

pub mod page;
pub mod registry;
pub mod tab_bar;
pub mod tab_labels;

pub use page::TabPage;
pub use tab_bar::Tabs;
pub use tab_labels::{detail_key, detail_tab_label, tab_label_for_key};
