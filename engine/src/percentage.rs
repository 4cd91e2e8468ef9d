use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Unbounded};

use chrono::NaiveDate;
use serde::Serialize;

use crate::basket::ReportWindow;
use crate::filter::FilteredSeries;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceLookup {
    Available(f64),
    /// No price recorded after the query day
    Unavailable,
}

impl PriceLookup {
    pub fn value(self) -> Option<f64> {
        match self {
            PriceLookup::Available(price) => Some(price),
            PriceLookup::Unavailable => None,
        }
    }
}

/// First recorded price strictly after `date`.
///
/// Same result as stepping forward one calendar day at a time until a price
/// shows up, with the walk ending at the last recorded day of the series.
pub fn resolve_price(series: &BTreeMap<NaiveDate, f64>, date: NaiveDate) -> PriceLookup {
    series
        .range((Excluded(date), Unbounded))
        .next()
        .map(|(_, price)| PriceLookup::Available(*price))
        .unwrap_or(PriceLookup::Unavailable)
}

/// One ticker's share of a day's aggregate
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contribution {
    /// Percent change from the baseline price
    Change(f64),
    /// Baseline or current price missing, counts as zero in the aggregate
    NoData,
}

impl Contribution {
    pub fn between(baseline: PriceLookup, current: PriceLookup) -> Contribution {
        match (baseline, current) {
            (PriceLookup::Available(bought), PriceLookup::Available(price)) => {
                let percent = (price - bought) / bought * 100.0;

                if percent.is_finite() {
                    Contribution::Change(percent)
                } else {
                    Contribution::NoData
                }
            }
            _ => Contribution::NoData,
        }
    }

    pub fn as_term(self) -> f64 {
        match self {
            Contribution::Change(percent) => percent,
            Contribution::NoData => 0.0,
        }
    }
}

/// Aggregate profit / loss percentage per calendar day
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PercentageSeries(BTreeMap<NaiveDate, f64>);

impl PercentageSeries {
    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.0.get(&date).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.0.iter().map(|(date, pct)| (*date, *pct))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<(NaiveDate, f64)> {
        self.0.iter().next_back().map(|(date, pct)| (*date, *pct))
    }

    pub fn min_max(&self) -> Option<(f64, f64)> {
        self.0.values().fold(None, |acc, pct| match acc {
            None => Some((*pct, *pct)),
            Some((min, max)) => Some((min.min(*pct), max.max(*pct))),
        })
    }

    /// What `amount` invested at the baseline is worth on the last day
    pub fn value_of(&self, amount: u64) -> Option<f64> {
        self.last()
            .map(|(_, pct)| amount as f64 * (1.0 + pct / 100.0))
    }
}

/// Averages each ticker's percent change from its baseline price, for every
/// day in `window`.
///
/// Every ticker in `tickers` counts towards the denominator, including the
/// ones without data for that day.
pub fn compute_series<S: AsRef<str>>(
    tickers: &[S],
    filtered: &FilteredSeries,
    purchase_date: NaiveDate,
    window: ReportWindow,
) -> PercentageSeries {
    if tickers.is_empty() {
        log::warn!("Computing series for an empty basket, every day reports 0%");

        return PercentageSeries(window.days().map(|day| (day, 0.0)).collect());
    }

    let empty = BTreeMap::new();
    let series: Vec<_> = tickers
        .iter()
        .map(|ticker| filtered.get(ticker.as_ref()).unwrap_or(&empty))
        .collect();

    let baselines: Vec<_> = series
        .iter()
        .map(|prices| resolve_price(prices, purchase_date))
        .collect();

    let count = tickers.len() as f64;

    let percentages = window
        .days()
        .map(|day| {
            let sum: f64 = series
                .iter()
                .zip(baselines.iter())
                .map(|(prices, baseline)| {
                    Contribution::between(*baseline, resolve_price(prices, day)).as_term()
                })
                .sum();

            (day, sum / count)
        })
        .collect();

    PercentageSeries(percentages)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, crate::DATE_FORMAT).unwrap()
    }

    fn series(points: &[(&str, f64)]) -> BTreeMap<NaiveDate, f64> {
        points.iter().map(|(d, p)| (date(d), *p)).collect()
    }

    fn filtered(entries: &[(&str, &[(&str, f64)])]) -> FilteredSeries {
        entries
            .iter()
            .map(|(ticker, points)| (ticker.to_string(), series(points)))
            .collect()
    }

    #[test]
    fn resolves_first_price_strictly_after_query() {
        let prices = series(&[("2018-01-03", 10.0), ("2018-01-05", 12.0)]);

        assert_eq!(
            resolve_price(&prices, date("2018-01-01")),
            PriceLookup::Available(10.0)
        );
        assert_eq!(
            resolve_price(&prices, date("2018-01-03")),
            PriceLookup::Available(12.0)
        );
        assert_eq!(
            resolve_price(&prices, date("2018-01-05")),
            PriceLookup::Unavailable
        );
    }

    #[test]
    fn sparse_series_resolves_same_price_until_newer_date() {
        let prices = series(&[("2018-01-01", 100.0)]);

        assert_eq!(
            resolve_price(&prices, date("2017-12-31")),
            PriceLookup::Available(100.0)
        );
        assert_eq!(
            resolve_price(&prices, date("2017-12-20")),
            PriceLookup::Available(100.0)
        );
        assert_eq!(
            resolve_price(&prices, date("2018-01-01")),
            PriceLookup::Unavailable
        );
    }

    #[test]
    fn walk_past_last_date_terminates() {
        let prices = series(&[("2013-02-08", 1.0)]);

        assert_eq!(
            resolve_price(&prices, date("2099-01-01")),
            PriceLookup::Unavailable
        );
        assert_eq!(resolve_price(&BTreeMap::new(), date("2013-01-01")).value(), None);
    }

    #[test]
    fn missing_data_contributes_zero() {
        assert_eq!(
            Contribution::between(PriceLookup::Unavailable, PriceLookup::Available(1.0)),
            Contribution::NoData
        );
        assert_eq!(
            Contribution::between(PriceLookup::Available(1.0), PriceLookup::Unavailable),
            Contribution::NoData
        );
        assert_eq!(Contribution::NoData.as_term(), 0.0);
    }

    #[test]
    fn zero_baseline_is_no_data() {
        assert_eq!(
            Contribution::between(PriceLookup::Available(0.0), PriceLookup::Available(5.0)),
            Contribution::NoData
        );
        assert_eq!(
            Contribution::between(PriceLookup::Available(0.0), PriceLookup::Available(0.0)),
            Contribution::NoData
        );
    }

    #[test]
    fn missing_ticker_dilutes_average() {
        let data = filtered(&[("A", &[("2018-01-02", 100.0), ("2018-01-03", 110.0)])]);
        let window = ReportWindow::new(date("2018-01-02"), date("2018-01-03"));

        let result = compute_series(&["A", "B"], &data, date("2018-01-01"), window);

        assert_eq!(result.len(), 1);
        assert!((result.get(date("2018-01-02")).unwrap() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn window_produces_exactly_one_entry_per_day() {
        let data = filtered(&[("A", &[("2017-12-31", 10.0)])]);
        let window = ReportWindow::new(date("2018-01-01"), date("2018-01-04"));

        let result = compute_series(&["A"], &data, date("2017-12-30"), window);

        let keys: Vec<_> = result.iter().map(|(day, _)| day).collect();
        assert_eq!(
            keys,
            vec![date("2018-01-01"), date("2018-01-02"), date("2018-01-03")]
        );
    }

    #[test]
    fn percent_change_follows_next_available_price() {
        let data = filtered(&[(
            "A",
            &[
                ("2018-01-02", 100.0),
                ("2018-01-05", 120.0),
                ("2018-01-08", 90.0),
            ],
        )]);
        let window = ReportWindow::new(date("2018-01-02"), date("2018-01-09"));

        let result = compute_series(&["A"], &data, date("2018-01-01"), window);

        let values: Vec<_> = result.iter().map(|(_, pct)| pct).collect();
        // 01-02..01-04 resolve to 01-05, 01-05..01-07 resolve to 01-08, 01-08 has nothing after it
        assert_eq!(values, vec![20.0, 20.0, 20.0, -10.0, -10.0, -10.0, 0.0]);
    }

    #[test]
    fn ticker_starting_after_window_contributes_zero() {
        let data = filtered(&[
            ("A", &[("2018-01-01", 10.0), ("2018-03-01", 20.0)]),
            ("LATE", &[("2019-01-01", 50.0)]),
        ]);
        let window = ReportWindow::new(date("2018-01-01"), date("2018-01-03"));

        let result = compute_series(&["A", "LATE"], &data, date("2017-12-01"), window);

        // A: baseline 10, price 20 => 100%, LATE: baseline 50, price 50 => 0%
        assert_eq!(result.get(date("2018-01-01")), Some(50.0));
        assert_eq!(result.get(date("2018-01-02")), Some(50.0));
    }

    #[test]
    fn empty_basket_yields_zero_for_every_day() {
        let window = ReportWindow::new(date("2018-01-01"), date("2018-01-04"));
        let tickers: [&str; 0] = [];

        let result = compute_series(&tickers, &FilteredSeries::new(), date("2017-01-01"), window);

        assert_eq!(result.len(), 3);
        assert!(result.iter().all(|(_, pct)| pct == 0.0));
    }

    #[test]
    fn identical_inputs_give_identical_output() {
        let data = filtered(&[
            ("A", &[("2018-01-02", 100.0), ("2018-01-04", 101.5)]),
            ("B", &[("2018-01-03", 40.0), ("2018-01-06", 38.0)]),
        ]);
        let window = ReportWindow::new(date("2018-01-01"), date("2018-01-10"));

        let first = compute_series(&["A", "B"], &data, date("2018-01-01"), window);
        let second = compute_series(&["A", "B"], &data, date("2018-01-01"), window);

        assert_eq!(first, second);
    }

    #[test]
    fn value_of_projects_last_day() {
        let data = filtered(&[("A", &[("2018-01-02", 100.0), ("2018-01-03", 150.0)])]);
        let window = ReportWindow::new(date("2018-01-02"), date("2018-01-03"));

        let result = compute_series(&["A"], &data, date("2018-01-01"), window);

        assert_eq!(result.last(), Some((date("2018-01-02"), 50.0)));
        assert_eq!(result.value_of(1000), Some(1500.0));
        assert_eq!(result.min_max(), Some((50.0, 50.0)));
        assert_eq!(PercentageSeries::default().value_of(1000), None);
    }

    #[test]
    fn serializes_with_iso_keys() {
        let data = filtered(&[("A", &[("2018-01-02", 100.0), ("2018-01-03", 110.0)])]);
        let window = ReportWindow::new(date("2018-01-02"), date("2018-01-03"));

        let result = compute_series(&["A"], &data, date("2018-01-01"), window);
        let json = serde_json::to_string(&result).unwrap();

        assert_eq!(json, r#"{"2018-01-02":10.0}"#);
    }
}
