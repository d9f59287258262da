// Render module - turns rows into the text handed back to the caller
pub mod price;
pub mod table;

pub use price::{PriceCell, PRICE_UNAVAILABLE};
pub use table::Table;
