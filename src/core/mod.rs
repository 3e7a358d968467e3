//! Core module - typed value storage and the parse result table

pub mod table;
pub mod value;

pub use table::ResultTable;
pub use value::Value;
