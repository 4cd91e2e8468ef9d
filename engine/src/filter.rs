use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::model::PriceTable;

/// Per ticker open prices, restricted to days after the purchase date
pub type FilteredSeries = BTreeMap<String, BTreeMap<NaiveDate, f64>>;

/// Keeps only prices strictly after `purchase_date` for each of `tickers`.
///
/// Tickers the table doesn't know get an empty series.
pub fn filter_series<S: AsRef<str>>(
    tickers: &[S],
    table: &PriceTable,
    purchase_date: NaiveDate,
) -> FilteredSeries {
    tickers
        .iter()
        .map(|ticker| {
            let ticker = ticker.as_ref();

            let prices = table
                .series(ticker)
                .map(|series| {
                    series
                        .iter()
                        .filter(|(date, _)| **date > purchase_date)
                        .map(|(date, price)| (*date, *price))
                        .collect()
                })
                .unwrap_or_default();

            (ticker.to_string(), prices)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PriceRecord;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, crate::DATE_FORMAT).unwrap()
    }

    fn table() -> PriceTable {
        PriceTable::from_records(&[
            PriceRecord::new("AAA", date("2018-01-01"), Some(1.0)),
            PriceRecord::new("AAA", date("2018-01-02"), Some(2.0)),
            PriceRecord::new("AAA", date("2018-01-03"), Some(3.0)),
            PriceRecord::new("BBB", date("2018-01-01"), Some(5.0)),
        ])
    }

    #[test]
    fn keeps_only_dates_after_purchase() {
        let filtered = filter_series(&["AAA"], &table(), date("2018-01-02"));

        let aaa = &filtered["AAA"];
        assert_eq!(aaa.len(), 1);
        assert_eq!(aaa.get(&date("2018-01-03")), Some(&3.0));
        assert_eq!(aaa.get(&date("2018-01-02")), None);
    }

    #[test]
    fn unknown_and_exhausted_tickers_get_empty_series() {
        let filtered = filter_series(&["BBB", "ZZZ"], &table(), date("2018-01-01"));

        assert_eq!(filtered.len(), 2);
        assert!(filtered["BBB"].is_empty());
        assert!(filtered["ZZZ"].is_empty());
    }

    #[test]
    fn only_requested_tickers_are_returned() {
        let filtered = filter_series(&["BBB".to_string()], &table(), date("2017-12-31"));

        assert_eq!(filtered.keys().collect::<Vec<_>>(), vec!["BBB"]);
        assert_eq!(filtered["BBB"].len(), 1);
    }
}
