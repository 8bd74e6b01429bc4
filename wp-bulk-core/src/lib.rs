pub mod client;
pub mod config;
pub mod deleter;
pub mod error;
pub mod humanize;
pub mod ids;
pub mod jsonl;
pub mod outcome;
pub mod pool;
pub mod resolver;
pub mod sampler;
pub mod status;

pub use client::WpClient;
pub use config::{Credentials, RunConfig};
pub use deleter::{BatchDeleter, BatchProgress};
pub use error::{Error, Result};
pub use ids::RecordId;
pub use outcome::{DeleteOutcome, StatusRecord};
pub use pool::{PoolError, WorkerPool};
pub use resolver::{ResolvedSlug, SlugResolver};
