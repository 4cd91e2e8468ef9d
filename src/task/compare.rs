use chrono::NaiveDate;
use engine::{Basket, Comparison, Dataset, ReportWindow};

use super::*;

/// Everything needed to recompute both series
#[derive(Debug, Clone)]
pub struct CompareRequest {
    pub dataset: Arc<Dataset>,
    pub basket: Basket,
    pub purchase_date: NaiveDate,
    pub window: ReportWindow,
}

/// Runs the basket / complement computation off the UI thread
pub struct Compare {
    request: CompareRequest,
}

impl Compare {
    pub fn new(request: CompareRequest) -> Compare {
        Compare { request }
    }
}

impl AsyncTask for Compare {
    type Input = CompareRequest;
    type Response = Option<Comparison>;

    fn input(&self) -> Self::Input {
        self.request.clone()
    }

    fn task<'a>(input: Arc<Self::Input>) -> BoxFuture<'a, Option<Self::Response>> {
        Box::pin(async move {
            let comparison = Comparison::compute(
                &input.dataset.table,
                &input.basket,
                input.purchase_date,
                input.window,
            );

            Some(comparison)
        })
    }
}
