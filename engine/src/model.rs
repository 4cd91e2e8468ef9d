use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::NaiveDate;

/// A single day of a single ticker, as read from the dataset
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRecord {
    pub ticker: String,
    pub date: NaiveDate,
    /// `None` when the source row has no opening price
    pub open: Option<f64>,
}

impl PriceRecord {
    pub fn new(ticker: impl Into<String>, date: NaiveDate, open: Option<f64>) -> PriceRecord {
        PriceRecord {
            ticker: ticker.into(),
            date,
            open,
        }
    }
}

/// Open prices keyed by ticker, then date
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    prices: HashMap<String, BTreeMap<NaiveDate, f64>>,
    universe: Vec<String>,
}

impl PriceTable {
    pub fn from_records(records: &[PriceRecord]) -> PriceTable {
        let mut prices: HashMap<String, BTreeMap<NaiveDate, f64>> = HashMap::new();
        let mut universe = BTreeSet::new();

        for record in records {
            universe.insert(record.ticker.clone());

            let series = prices.entry(record.ticker.clone()).or_default();

            match record.open {
                Some(open) => {
                    series.insert(record.date, open);
                }
                None => {
                    series.remove(&record.date);
                }
            }
        }

        PriceTable {
            prices,
            universe: universe.into_iter().collect(),
        }
    }

    /// Sorted list of every ticker seen in the dataset
    pub fn universe(&self) -> &[String] {
        &self.universe
    }

    pub fn series(&self, ticker: &str) -> Option<&BTreeMap<NaiveDate, f64>> {
        self.prices.get(ticker)
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.prices
            .values()
            .filter_map(|s| s.keys().next())
            .min()
            .copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.prices
            .values()
            .filter_map(|s| s.keys().next_back())
            .max()
            .copied()
    }

    pub fn is_empty(&self) -> bool {
        self.universe.is_empty()
    }
}

/// Immutable snapshot handed out by the loader
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<PriceRecord>,
    pub table: PriceTable,
}

impl Dataset {
    pub fn new(records: Vec<PriceRecord>) -> Dataset {
        let table = PriceTable::from_records(&records);

        Dataset { records, table }
    }

    pub fn universe(&self) -> &[String] {
        self.table.universe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, crate::DATE_FORMAT).unwrap()
    }

    fn price(table: &PriceTable, ticker: &str, day: NaiveDate) -> Option<f64> {
        table.series(ticker).and_then(|s| s.get(&day)).copied()
    }

    #[test]
    fn table_indexes_by_ticker_and_date() {
        let records = vec![
            PriceRecord::new("BBB", date("2018-01-02"), Some(20.0)),
            PriceRecord::new("AAA", date("2018-01-02"), Some(10.0)),
            PriceRecord::new("AAA", date("2018-01-03"), Some(11.0)),
        ];

        let table = PriceTable::from_records(&records);

        assert_eq!(table.universe(), &["AAA".to_string(), "BBB".to_string()]);
        assert_eq!(price(&table, "AAA", date("2018-01-03")), Some(11.0));
        assert_eq!(price(&table, "AAA", date("2018-01-04")), None);
        assert_eq!(price(&table, "CCC", date("2018-01-02")), None);
        assert_eq!(table.first_date(), Some(date("2018-01-02")));
        assert_eq!(table.last_date(), Some(date("2018-01-03")));
    }

    #[test]
    fn rows_without_open_count_as_missing() {
        let records = vec![
            PriceRecord::new("AAA", date("2018-01-02"), None),
            PriceRecord::new("AAA", date("2018-01-03"), Some(11.0)),
        ];

        let table = PriceTable::from_records(&records);

        assert_eq!(price(&table, "AAA", date("2018-01-02")), None);
        assert_eq!(table.series("AAA").map(|s| s.len()), Some(1));
        assert_eq!(table.universe(), &["AAA".to_string()]);
    }

    #[test]
    fn duplicate_rows_keep_the_last() {
        let records = vec![
            PriceRecord::new("AAA", date("2018-01-02"), Some(1.0)),
            PriceRecord::new("AAA", date("2018-01-02"), Some(2.0)),
        ];

        let table = PriceTable::from_records(&records);

        assert_eq!(price(&table, "AAA", date("2018-01-02")), Some(2.0));
    }

    #[test]
    fn empty_table_has_no_dates() {
        let table = PriceTable::default();

        assert!(table.is_empty());
        assert_eq!(table.first_date(), None);
        assert_eq!(table.last_date(), None);
    }
}
