pub mod aggregate;
pub mod rates;
