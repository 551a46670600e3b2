pub mod aggregate;
pub mod registry;
