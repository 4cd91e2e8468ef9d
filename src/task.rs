use async_std::sync::Arc;
use async_std::task;
use crossbeam_channel::{unbounded, Receiver, Sender};
use futures::future::BoxFuture;
use task::JoinHandle;

pub use self::compare::Compare;
pub use self::load_dataset::LoadDataset;

pub mod compare;
mod load_dataset;

/// Trait to define a type that spawns an Async Task to complete background
/// work.
pub trait AsyncTask: 'static {
    type Input: Send + Sync + 'static;
    type Response: Send + 'static;

    /// Input data needed for the `task`
    fn input(&self) -> Self::Input;

    /// Defines the async task that will get executed and return` Response`
    ///
    /// Returning `None` sends nothing back
    fn task<'a>(input: Arc<Self::Input>) -> BoxFuture<'a, Option<Self::Response>>;

    /// Runs the task once on the async runtime and returns a handle to query
    /// the result from. `data_received` is signalled when a response is sent
    /// so the UI can redraw.
    fn connect(&self, data_received: Sender<()>) -> AsyncTaskHandle<Self::Response> {
        let (response_sender, response_receiver) = unbounded::<Self::Response>();

        let input = Arc::new(self.input());

        let handle = task::spawn(async move {
            if let Some(response) = <Self as AsyncTask>::task(input).await {
                let _ = response_sender.send(response);
                let _ = data_received.try_send(());
            }
        });

        AsyncTaskHandle {
            response: response_receiver,
            handle: Some(handle),
        }
    }
}

pub struct AsyncTaskHandle<R> {
    response: Receiver<R>,
    handle: Option<JoinHandle<()>>,
}

impl<R> AsyncTaskHandle<R> {
    pub fn response(&self) -> &Receiver<R> {
        &self.response
    }
}

impl<R> Drop for AsyncTaskHandle<R> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            task::spawn(async { handle.cancel().await });
        }
    }
}
