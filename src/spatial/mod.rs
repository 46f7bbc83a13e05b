pub mod analyzer;
pub mod index;

pub use analyzer::SpatialAnalyzer;
pub use index::GridIndex;
