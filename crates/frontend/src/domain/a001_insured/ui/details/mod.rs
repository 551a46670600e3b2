//! Customer page
//!
//! - model.rs: customer fetch
//! - view_model.rs: page state and nested create forms
//! - view.rs: Leptos component

mod model;
mod view;
mod view_model;

pub use model::fetch_customer;
pub use view::InsuredDetails;
pub use view_model::InsuredDetailsViewModel;
