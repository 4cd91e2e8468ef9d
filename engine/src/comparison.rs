use chrono::NaiveDate;
use serde::Serialize;

use crate::basket::{complement, Basket, ReportWindow};
use crate::filter::filter_series;
use crate::model::PriceTable;
use crate::percentage::{compute_series, PercentageSeries};

/// Basket and complement series over the same window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub purchase_date: NaiveDate,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub basket: PercentageSeries,
    pub complement: PercentageSeries,
    #[serde(skip)]
    pub complement_size: usize,
}

impl Comparison {
    /// Returns `None` when the basket has no tickers
    pub fn compute(
        table: &PriceTable,
        basket: &Basket,
        purchase_date: NaiveDate,
        window: ReportWindow,
    ) -> Option<Comparison> {
        if basket.is_empty() {
            return None;
        }

        let rest = complement(table.universe(), basket);

        let basket_data = filter_series(basket.tickers(), table, purchase_date);
        let rest_data = filter_series(rest.as_slice(), table, purchase_date);

        let basket_series = compute_series(basket.tickers(), &basket_data, purchase_date, window);
        let rest_series = compute_series(rest.as_slice(), &rest_data, purchase_date, window);

        log::info!(
            "Computed {} days for {} basket and {} complement tickers from {}",
            basket_series.len(),
            basket.len(),
            rest.len(),
            purchase_date
        );

        Some(Comparison {
            purchase_date,
            start: window.start,
            end: window.end,
            basket: basket_series,
            complement: rest_series,
            complement_size: rest.len(),
        })
    }

    pub fn window(&self) -> ReportWindow {
        ReportWindow::new(self.start, self.end)
    }

    /// Lowest and highest percentage across both series
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match (self.basket.min_max(), self.complement.min_max()) {
            (Some((a_min, a_max)), Some((b_min, b_max))) => {
                Some((a_min.min(b_min), a_max.max(b_max)))
            }
            (Some(bounds), None) | (None, Some(bounds)) => Some(bounds),
            (None, None) => None,
        }
    }
}
