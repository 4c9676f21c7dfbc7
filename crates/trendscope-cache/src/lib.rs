pub mod memory;

pub use memory::{SeriesCache, SeriesKey};
