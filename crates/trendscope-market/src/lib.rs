pub mod client;
pub mod error;
pub mod schema;

pub mod test_support;

pub use client::{MarketDataClient, MarketstackClient};
pub use error::MarketDataError;
