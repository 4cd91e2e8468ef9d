use std::io::Write;

use anyhow::{format_err, Context, Result};
use chrono::NaiveDate;
use engine::{loader, Comparison, ComparisonConfig, Dataset};
use serde::Serialize;

use crate::opts::Opts;

#[derive(Debug, Serialize)]
struct Report<'a> {
    tickers: &'a [String],
    weights: &'a [String],
    amount: Option<u64>,
    fund_value: Option<f64>,
    rest_value: Option<f64>,
    #[serde(flatten)]
    comparison: &'a Comparison,
}

/// Loads the dataset on the current thread, computes once and writes the
/// result as pretty JSON
pub fn print<W: Write>(opts: &Opts, config: &ComparisonConfig, out: &mut W) -> Result<()> {
    let data_path = opts.data_path()?;

    let dataset = async_std::task::block_on(loader::load_dataset(&data_path))
        .with_context(|| format!("Failed to load dataset from {}", data_path.display()))?;

    write_report(&dataset, opts.purchase_date, opts.amount, config, out)
}

fn write_report<W: Write>(
    dataset: &Dataset,
    purchase_date: Option<NaiveDate>,
    amount: Option<u64>,
    config: &ComparisonConfig,
    out: &mut W,
) -> Result<()> {
    let purchase_date = purchase_date
        .or_else(|| dataset.table.first_date())
        .ok_or_else(|| format_err!("Dataset has no prices, pass --purchase-date"))?;

    let comparison = Comparison::compute(&dataset.table, &config.basket, purchase_date, config.window)
        .ok_or_else(|| format_err!("Basket has no tickers to compare"))?;

    let report = Report {
        tickers: config.basket.tickers(),
        weights: config.basket.weights(),
        amount,
        fund_value: amount.and_then(|a| comparison.basket.value_of(a)),
        rest_value: amount.and_then(|a| comparison.complement.value_of(a)),
        comparison: &comparison,
    };

    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use engine::loader::read_dataset;

    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, engine::DATE_FORMAT).unwrap()
    }

    const CSV: &str = "\
date,open,high,low,close,volume,Name
2018-01-02,100,0,0,0,0,AAA
2018-01-03,150,0,0,0,0,AAA
2018-01-02,100,0,0,0,0,BBB
2018-01-03,90,0,0,0,0,BBB
";

    #[test]
    fn report_contains_both_series_and_values() {
        let dataset = read_dataset(CSV.as_bytes()).unwrap();
        // Window ends on 2018-01-02, the last day with a newer price
        let config = ComparisonConfig::new(Some("AAA:100"), Some(1), date("2018-01-03")).unwrap();

        let mut out = vec![];
        write_report(&dataset, Some(date("2018-01-01")), Some(1000), &config, &mut out).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(json["tickers"], serde_json::json!(["AAA"]));
        assert_eq!(json["weights"], serde_json::json!(["100"]));
        assert_eq!(json["purchase_date"], "2018-01-01");
        assert_eq!(json["start"], "2017-12-03");
        assert_eq!(json["end"], "2018-01-03");
        assert_eq!(json["basket"]["2018-01-02"], 50.0);
        assert_eq!(json["complement"]["2018-01-02"], -10.0);
        assert_eq!(json["fund_value"], 1500.0);
        assert_eq!(json["rest_value"], 900.0);
        assert!(json.get("complement_size").is_none());
    }

    #[test]
    fn purchase_date_defaults_to_first_known_day() {
        let dataset = read_dataset(CSV.as_bytes()).unwrap();
        let config = ComparisonConfig::new(Some("AAA:100"), Some(1), date("2018-01-04")).unwrap();

        let mut out = vec![];
        write_report(&dataset, None, None, &config, &mut out).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(json["purchase_date"], "2018-01-02");
        assert!(json["fund_value"].is_null());
    }

    #[test]
    fn missing_dataset_is_an_error() {
        let opts = Opts {
            data: Some("does/not/exist.csv".into()),
            ..Default::default()
        };
        let config = ComparisonConfig::new(Some("AAA:100"), Some(1), date("2018-01-04")).unwrap();

        let err = print(&opts, &config, &mut vec![]).unwrap_err();

        assert!(err.to_string().contains("does/not/exist.csv"));
    }
}
