// src/lib.rs

pub mod error;
pub mod open;
pub mod pipeline;
pub mod report;
pub mod simulate;
pub mod table;

pub use error::ReportError;
pub use table::Table;
