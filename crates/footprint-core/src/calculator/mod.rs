pub mod pipeline;
pub mod severity;

pub use pipeline::calculate_footprint;
