use chrono::{Duration, Months, NaiveDate};

use crate::error::ConfigError;

/// Last trading day in the bundled five year S&P 500 dataset
pub const DEFAULT_REPORT_END: &str = "2018-02-07";

/// The configured set of tickers that make up the synthetic fund.
///
/// Weights are carried as they were written in the configuration and are not
/// used by the percentage math, every ticker counts equally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Basket {
    tickers: Vec<String>,
    weights: Vec<String>,
}

impl Basket {
    /// Parses a `TICKER1:WEIGHT1,TICKER2:WEIGHT2` string
    pub fn parse(input: &str) -> Result<Basket, ConfigError> {
        let mut tickers = vec![];
        let mut weights = vec![];

        for entry in input.split(',') {
            let mut parts = entry.splitn(2, ':');

            let ticker = parts.next().unwrap_or_default().trim();
            let weight = match parts.next() {
                Some(weight) => weight.trim(),
                None => return Err(ConfigError::MalformedEntry(entry.trim().to_string())),
            };

            if ticker.is_empty() {
                return Err(ConfigError::EmptyTicker(entry.trim().to_string()));
            }

            tickers.push(ticker.to_string());
            weights.push(weight.to_string());
        }

        Ok(Basket { tickers, weights })
    }

    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    pub fn weights(&self) -> &[String] {
        &self.weights
    }

    pub fn contains(&self, ticker: &str) -> bool {
        self.tickers.iter().any(|t| t == ticker)
    }

    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tickers.len()
    }
}

/// Every ticker in `universe` that isn't part of `basket`, in universe order
pub fn complement(universe: &[String], basket: &Basket) -> Vec<String> {
    universe
        .iter()
        .filter(|ticker| !basket.contains(ticker))
        .cloned()
        .collect()
}

/// Half open `[start, end)` range of calendar days to report on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> ReportWindow {
        ReportWindow { start, end }
    }

    /// Window of `months` calendar months ending (exclusive) at `end`
    pub fn months_before(end: NaiveDate, months: u32) -> Result<ReportWindow, ConfigError> {
        if months == 0 {
            return Err(ConfigError::InvalidCompareMonths(months));
        }

        let start = end
            .checked_sub_months(Months::new(months))
            .ok_or(ConfigError::InvalidCompareMonths(months))?;

        Ok(ReportWindow { start, end })
    }

    /// Iterates every calendar day in the window
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;

        self.start
            .iter_days()
            .take_while(move |day| *day < end)
    }

    pub fn num_days(self) -> i64 {
        (self.end - self.start).num_days().max(0)
    }

    /// Last day contained in the window
    pub fn last_day(self) -> NaiveDate {
        self.end - Duration::days(1)
    }
}

/// Validated configuration, built once at startup
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonConfig {
    pub basket: Basket,
    pub compare_months: u32,
    pub window: ReportWindow,
}

impl ComparisonConfig {
    pub fn new(
        basket: Option<&str>,
        compare_months: Option<u32>,
        end_date: NaiveDate,
    ) -> Result<ComparisonConfig, ConfigError> {
        let basket = Basket::parse(basket.ok_or(ConfigError::MissingBasket)?)?;
        let compare_months = compare_months.ok_or(ConfigError::MissingCompareMonths)?;
        let window = ReportWindow::months_before(end_date, compare_months)?;

        log::info!(
            "Configured basket of {} tickers over {} months ending {}",
            basket.len(),
            compare_months,
            end_date
        );

        Ok(ComparisonConfig {
            basket,
            compare_months,
            window,
        })
    }
}
