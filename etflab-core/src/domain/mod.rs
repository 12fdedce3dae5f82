//! Domain types: price history, realtime quote, instrument identity.

pub mod instrument;
pub mod price_point;
pub mod quote;
pub mod series;

pub use instrument::Instrument;
pub use price_point::PricePoint;
pub use quote::RealtimeQuote;
pub use series::{PriceSeries, SeriesError};
