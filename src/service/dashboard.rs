use std::path::PathBuf;

use anyhow::Result;
use async_std::sync::Arc;
use crossbeam_channel::Sender;
use engine::{Comparison, Dataset};

use super::*;
use crate::task::compare::CompareRequest;
use crate::task::*;

/// Owns the dataset load and the most recent comparison request
pub struct DashboardService {
    data_received: Sender<()>,
    dataset_handle: AsyncTaskHandle<Result<Dataset>>,
    compare_handle: Option<AsyncTaskHandle<Option<Comparison>>>,
}

impl DashboardService {
    pub fn new(data_path: PathBuf, data_received: Sender<()>) -> DashboardService {
        let task = LoadDataset::new(data_path);
        let dataset_handle = task.connect(data_received.clone());

        DashboardService {
            data_received,
            dataset_handle,
            compare_handle: None,
        }
    }

    /// Replaces any in flight comparison, dropping the old handle cancels it
    pub fn request_comparison(&mut self, request: CompareRequest) {
        let task = Compare::new(request);

        self.compare_handle = Some(task.connect(self.data_received.clone()));
    }
}

#[derive(Debug)]
pub enum Update {
    Dataset(Arc<Dataset>),
    DatasetFailed(String),
    Comparison(Option<Comparison>),
}

impl Service for DashboardService {
    type Update = Update;

    fn updates(&self) -> Vec<Self::Update> {
        let mut updates = vec![];

        let dataset_updates = self
            .dataset_handle
            .response()
            .try_iter()
            .map(|response| match response {
                Ok(dataset) => Update::Dataset(Arc::new(dataset)),
                Err(e) => Update::DatasetFailed(format!("{:#}", e)),
            });
        updates.extend(dataset_updates);

        if let Some(handle) = self.compare_handle.as_ref() {
            let compare_updates = handle.response().try_iter().map(Update::Comparison);
            updates.extend(compare_updates);
        }

        updates
    }
}
