//! Reads the daily price dataset.
//!
//! The expected layout is the Kaggle S&P 500 five year dump:
//!
//! ```text
//! date,open,high,low,close,volume,Name
//! 2013-02-08,15.07,15.12,14.63,14.75,8407500,AAL
//! ```
//!
//! Only the `date`, `open` and `Name` (or `ticker`) columns are read, header
//! names are matched case insensitively and every other column is ignored.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::DataError;
use crate::model::{Dataset, PriceRecord};
use crate::DATE_FORMAT;

struct Columns {
    date: usize,
    open: usize,
    ticker: usize,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Columns, DataError> {
        let find = |names: &[&str]| {
            headers
                .iter()
                .position(|h| names.iter().any(|n| h.eq_ignore_ascii_case(n)))
                .ok_or_else(|| DataError::MissingColumn(names[0].to_string()))
        };

        Ok(Columns {
            date: find(&["date"])?,
            open: find(&["open"])?,
            ticker: find(&["Name", "ticker"])?,
        })
    }
}

fn parse_record(
    columns: &Columns,
    row: &StringRecord,
    line: u64,
) -> Result<Option<PriceRecord>, DataError> {
    let ticker = row.get(columns.ticker).unwrap_or_default();
    if ticker.is_empty() {
        return Ok(None);
    }

    let date = row.get(columns.date).unwrap_or_default();
    let date = NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|source| DataError::DateParse { line, source })?;

    let open = match row.get(columns.open).unwrap_or_default() {
        "" => None,
        value => {
            let open = value.parse::<f64>().map_err(|_| DataError::InvalidPrice {
                line,
                value: value.to_string(),
            })?;

            // NaN and infinities are kept out of the table like empty cells
            if open.is_finite() {
                Some(open)
            } else {
                log::debug!("Skipping non-finite open `{}` on line {}", value, line);
                None
            }
        }
    };

    Ok(Some(PriceRecord::new(ticker, date, open)))
}

pub fn read_dataset<R: Read>(reader: R) -> Result<Dataset, DataError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let columns = Columns::locate(rdr.headers()?)?;

    let mut records = vec![];
    for row in rdr.records() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();

        if let Some(record) = parse_record(&columns, &row, line)? {
            records.push(record);
        }
    }

    let dataset = Dataset::new(records);

    log::info!(
        "Read {} price records for {} tickers",
        dataset.records.len(),
        dataset.universe().len()
    );

    Ok(dataset)
}

pub async fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset, DataError> {
    let path = path.as_ref();

    log::debug!("Loading dataset from {}", path.display());

    let bytes = async_std::fs::read(path).await?;

    read_dataset(bytes.as_slice())
}
