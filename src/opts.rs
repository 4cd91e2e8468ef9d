use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{format_err, Context, Error, Result};
use chrono::NaiveDate;
use engine::{ComparisonConfig, DATE_FORMAT, DEFAULT_REPORT_END};
use serde::Deserialize;
use structopt::StructOpt;

use crate::common::MAX_AMOUNT_DIGITS;
use crate::theme::Theme;

pub fn resolve_opts() -> Result<Opts> {
    let mut opts = get_cli_opts();

    if let Some(config_opts) = get_config_opts()? {
        opts.merge(config_opts);
    }

    Ok(opts)
}

fn get_cli_opts() -> Opts {
    Opts::from_args()
}

fn get_config_opts() -> Result<Option<Opts>> {
    let config_dir = match dirs_next::config_dir() {
        Some(dir) => dir.join("fundcmp"),
        None => return Ok(None),
    };

    read_config_file(&config_dir.join("config.yml"))
}

/// A missing file is not an error, anything unreadable or malformed is
fn read_config_file(config_path: &Path) -> Result<Option<Opts>> {
    let config = match fs::read_to_string(config_path) {
        Ok(config) => config,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(Error::new(e)
                .context(format!("Failed to read config file {}", config_path.display())))
        }
    };

    let opts = serde_yaml::from_str(&config)
        .with_context(|| format!("Invalid config file {}", config_path.display()))?;

    Ok(Some(opts))
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .with_context(|| format!("Invalid date `{}`, expected YYYY-MM-DD", s))
}

fn parse_amount(s: &str) -> Result<u64> {
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return Err(format_err!("Amount must only contain digits, got `{}`", s));
    }

    if s.len() > MAX_AMOUNT_DIGITS {
        return Err(format_err!(
            "Amount can have at most {} digits, got `{}`",
            MAX_AMOUNT_DIGITS,
            s
        ));
    }

    Ok(s.parse()?)
}

#[derive(Debug, StructOpt, Clone, Deserialize, Default)]
#[structopt(
    name = "fundcmp",
    about = "Compare a mutual fund basket against the rest of the market 📈",
    version = env!("CARGO_PKG_VERSION")
)]
#[serde(default)]
pub struct Opts {
    // Options
    //
    #[structopt(short, long, env = "FUNDCMP_DATA")]
    /// CSV file of daily prices with `date`, `open` and `Name` columns
    pub data: Option<PathBuf>,
    #[structopt(short, long, env = "FUNDCMP_BASKET")]
    /// Fund basket as comma separated TICKER:WEIGHT pairs
    pub basket: Option<String>,
    #[structopt(short = "m", long, env = "FUNDCMP_COMPARE_MONTHS")]
    /// Length of the reporting window in months
    pub compare_months: Option<u32>,
    #[structopt(short, long, parse(try_from_str = parse_date))]
    /// Last day (exclusive) of the reporting window [default: 2018-02-07]
    pub end_date: Option<NaiveDate>,
    #[structopt(short, long, parse(try_from_str = parse_date))]
    /// Purchase date to start with [default: first day in the dataset]
    pub purchase_date: Option<NaiveDate>,
    #[structopt(short, long, parse(try_from_str = parse_amount))]
    /// Amount to invest to start with
    pub amount: Option<u64>,
    #[structopt(long)]
    /// Write logs to this file
    pub log_file: Option<PathBuf>,
    #[structopt(skip)]
    pub theme: Option<Theme>,

    // Flags
    //
    #[structopt(long)]
    /// Compute once and print both series as JSON instead of starting the dashboard
    pub print: bool,
    #[structopt(long)]
    /// Hide help hint in top right
    pub hide_help: bool,
}

impl Opts {
    /// Fills in anything not given on the command line from `config_opts`
    pub fn merge(&mut self, config_opts: Opts) {
        // Options
        self.data = self.data.take().or(config_opts.data);
        self.basket = self.basket.take().or(config_opts.basket);
        self.compare_months = self.compare_months.or(config_opts.compare_months);
        self.end_date = self.end_date.or(config_opts.end_date);
        self.purchase_date = self.purchase_date.or(config_opts.purchase_date);
        self.amount = self.amount.or(config_opts.amount);
        self.log_file = self.log_file.take().or(config_opts.log_file);
        self.theme = self.theme.or(config_opts.theme);

        // Flags
        self.print = self.print || config_opts.print;
        self.hide_help = self.hide_help || config_opts.hide_help;
    }

    pub fn data_path(&self) -> Result<PathBuf> {
        self.data
            .clone()
            .ok_or_else(|| format_err!("No dataset configured, pass --data or set FUNDCMP_DATA"))
    }

    pub fn end_date(&self) -> Result<NaiveDate> {
        match self.end_date {
            Some(date) => Ok(date),
            None => parse_date(DEFAULT_REPORT_END),
        }
    }

    pub fn comparison_config(&self) -> Result<ComparisonConfig> {
        let config = ComparisonConfig::new(
            self.basket.as_deref(),
            self.compare_months,
            self.end_date()?,
        )?;

        Ok(config)
    }

    pub fn theme(&self) -> Theme {
        self.theme.unwrap_or_default()
    }
}
