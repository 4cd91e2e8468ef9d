mod basket;
mod comparison;
mod error;
mod filter;
pub mod loader;
pub mod model;
mod percentage;

pub use basket::{complement, Basket, ComparisonConfig, ReportWindow, DEFAULT_REPORT_END};
pub use comparison::Comparison;
pub use error::{ConfigError, DataError};
pub use filter::{filter_series, FilteredSeries};
pub use model::{Dataset, PriceRecord, PriceTable};
pub use percentage::{compute_series, resolve_price, Contribution, PercentageSeries, PriceLookup};

/// ISO calendar date format used for series keys and CLI arguments
pub const DATE_FORMAT: &str = "%Y-%m-%d";
