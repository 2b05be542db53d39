pub mod category;
pub mod coerce;
pub mod collate;
pub mod color;
pub mod error;
pub mod period;
pub mod schema;

pub use category::{CategoryStats, DeputyCategory, Metric};
pub use coerce::safe_parse_int;
pub use collate::collate;
pub use color::{Hsl, color_for, colors_for};
pub use error::FeedError;
pub use period::{DateOption, compare_periods, parse_period};
pub use schema::{export, feed};
