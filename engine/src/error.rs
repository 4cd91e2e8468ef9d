use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("No basket configured, expected `TICKER:WEIGHT,...`")]
    MissingBasket,
    #[error("Malformed basket entry `{0}`, expected `TICKER:WEIGHT`")]
    MalformedEntry(String),
    #[error("Basket entry `{0}` has an empty ticker")]
    EmptyTicker(String),
    #[error("No comparison window configured, expected a number of months")]
    MissingCompareMonths,
    #[error("Comparison window must be at least one month, got {0}")]
    InvalidCompareMonths(u32),
}

#[derive(Debug, Error)]
pub enum DataError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Date parse error on line {line}: {source}")]
    DateParse {
        line: u64,
        source: chrono::ParseError,
    },
    #[error("Invalid open price `{value}` on line {line}")]
    InvalidPrice { line: u64, value: String },
    #[error("Missing required column: {0}")]
    MissingColumn(String),
}
