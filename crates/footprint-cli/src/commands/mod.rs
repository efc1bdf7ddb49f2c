pub mod calculate;
pub mod catalog;
