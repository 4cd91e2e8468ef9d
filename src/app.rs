use std::path::PathBuf;

use async_std::sync::Arc;
use crossbeam_channel::Sender;
use engine::{Comparison, ComparisonConfig, Dataset};

use crate::opts::Opts;
use crate::service::dashboard::{DashboardService, Update};
use crate::service::Service;
use crate::task::compare::CompareRequest;
use crate::theme::Theme;
use crate::widget::{self, NUM_LOADING_TICKS};

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Mode {
    EditAmount,
    EditDate,
    DisplayChart,
    Help,
}

impl Mode {
    pub fn next_focus(self) -> Mode {
        match self {
            Mode::EditAmount => Mode::EditDate,
            Mode::EditDate => Mode::DisplayChart,
            Mode::DisplayChart => Mode::EditAmount,
            Mode::Help => Mode::Help,
        }
    }

    pub fn previous_focus(self) -> Mode {
        match self {
            Mode::EditAmount => Mode::DisplayChart,
            Mode::EditDate => Mode::EditAmount,
            Mode::DisplayChart => Mode::EditDate,
            Mode::Help => Mode::Help,
        }
    }
}

pub enum DataState {
    Loading,
    Loaded(Arc<Dataset>),
    Failed(String),
}

pub struct App {
    pub mode: Mode,
    pub previous_mode: Mode,
    pub config: ComparisonConfig,
    pub amount: widget::AmountInputState,
    pub purchase_date: widget::DatePickerState,
    pub data: DataState,
    pub comparison: Option<Comparison>,
    pub loading: bool,
    pub loading_tick: usize,
    pub status: String,
    pub dashboard: DashboardService,
    pub theme: Theme,
    pub hide_help: bool,
}

impl App {
    /// Starts loading the dataset in the background
    pub fn new(
        opts: &Opts,
        config: ComparisonConfig,
        data_path: PathBuf,
        data_received: Sender<()>,
    ) -> App {
        let purchase_date =
            widget::DatePickerState::new(opts.purchase_date, config.window.last_day());

        let starting_mode = if opts.amount.is_some() {
            Mode::DisplayChart
        } else {
            Mode::EditAmount
        };

        App {
            mode: starting_mode,
            previous_mode: starting_mode,
            config,
            amount: widget::AmountInputState::new(opts.amount),
            purchase_date,
            data: DataState::Loading,
            comparison: None,
            loading: false,
            loading_tick: 0,
            status: format!("Loading {}", data_path.display()),
            dashboard: DashboardService::new(data_path, data_received),
            theme: opts.theme(),
            hide_help: opts.hide_help,
        }
    }

    pub fn dataset(&self) -> Option<&Arc<Dataset>> {
        match &self.data {
            DataState::Loaded(dataset) => Some(dataset),
            _ => None,
        }
    }

    /// Applies anything the background tasks have sent since the last call
    pub fn update(&mut self) {
        for update in self.dashboard.updates() {
            match update {
                Update::Dataset(dataset) => {
                    log::info!(
                        "Dataset ready with {} records for {} tickers",
                        dataset.records.len(),
                        dataset.universe().len()
                    );

                    if let Some(first) = dataset.table.first_date() {
                        self.purchase_date.set_min(first);
                    }

                    self.status = match (dataset.table.first_date(), dataset.table.last_date()) {
                        (Some(first), Some(last)) => format!(
                            "Loaded {} tickers from {} to {}",
                            dataset.universe().len(),
                            first,
                            last
                        ),
                        _ => "Dataset has no prices".to_string(),
                    };
                    self.data = DataState::Loaded(dataset);

                    if self.amount.amount().is_some() {
                        self.submit();
                    }
                }
                Update::DatasetFailed(error) => {
                    log::error!("{}", error);

                    self.status = error.clone();
                    self.data = DataState::Failed(error);
                }
                Update::Comparison(comparison) => {
                    self.loading = false;

                    self.status = match comparison.as_ref() {
                        Some(c) => format!(
                            "{} fund tickers vs {} others",
                            self.config.basket.len(),
                            c.complement_size
                        ),
                        None => "Nothing to compare".to_string(),
                    };
                    self.comparison = comparison;
                }
            }
        }
    }

    pub fn remove_chart(&mut self) {
        self.comparison.take();
    }

    /// Recomputes both series in the background. Returns false, leaving the
    /// current chart in place, when the inputs aren't ready.
    pub fn submit(&mut self) -> bool {
        let dataset = match &self.data {
            DataState::Loaded(dataset) => dataset.clone(),
            DataState::Loading => {
                self.status = "Dataset is still loading".to_string();
                return false;
            }
            DataState::Failed(_) => return false,
        };

        let purchase_date = match self.purchase_date.date() {
            Some(date) => date,
            None => {
                self.status = "Pick a purchase date".to_string();
                return false;
            }
        };

        if self.amount.amount().is_none() {
            self.status = "Enter an amount to invest".to_string();
            return false;
        }

        if self.config.basket.is_empty() {
            return false;
        }

        log::info!(
            "Comparing from {} over {} - {}",
            purchase_date,
            self.config.window.start,
            self.config.window.end
        );

        self.remove_chart();
        self.loading = true;
        self.loading_tick = 0;
        self.status = "Computing".to_string();

        self.dashboard.request_comparison(CompareRequest {
            dataset,
            basket: self.config.basket.clone(),
            purchase_date,
            window: self.config.window,
        });

        true
    }

    /// Applies `step` to the purchase date and recomputes when it moved. The
    /// chart is dropped when the new date can't be compared yet.
    pub fn change_purchase_date<F: FnOnce(&mut widget::DatePickerState)>(&mut self, step: F) {
        let before = self.purchase_date.date();
        step(&mut self.purchase_date);

        if self.purchase_date.date() == before {
            return;
        }

        if !self.submit() {
            self.remove_chart();
        }
    }

    pub fn tick(&mut self) {
        if self.loading {
            self.loading_tick = (self.loading_tick + 1) % (NUM_LOADING_TICKS + 1);
        }
    }
}
