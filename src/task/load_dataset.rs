use std::path::PathBuf;

use anyhow::{Context, Result};
use engine::{loader, Dataset};

use super::*;

/// Reads the price dataset from disk, once
pub struct LoadDataset {
    path: PathBuf,
}

impl LoadDataset {
    pub fn new(path: PathBuf) -> LoadDataset {
        LoadDataset { path }
    }
}

impl AsyncTask for LoadDataset {
    type Input = PathBuf;
    type Response = Result<Dataset>;

    fn input(&self) -> Self::Input {
        self.path.clone()
    }

    fn task<'a>(input: Arc<Self::Input>) -> BoxFuture<'a, Option<Self::Response>> {
        Box::pin(async move {
            let path = input.as_path();

            let dataset = loader::load_dataset(path)
                .await
                .with_context(|| format!("Failed to load dataset from {}", path.display()));

            Some(dataset)
        })
    }
}
