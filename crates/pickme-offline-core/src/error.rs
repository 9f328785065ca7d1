use thiserror::Error;

use crate::cache::CacheError;
use crate::host::HostError;
use crate::lifecycle::WorkerState;
use crate::net::FetchError;

pub type WorkerResult<T> = Result<T, WorkerError>;

#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("Precache failed for {url}: {source}")]
    Precache {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("Network request failed: {0}")]
    Network(#[from] FetchError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Host error: {0}")]
    Host(#[from] HostError),

    #[error("Cannot {action} a worker in state {state:?}")]
    InvalidState {
        action: &'static str,
        state: WorkerState,
    },
}
