//! # ff-infra
//!
//! Production implementations of the `ff-core` ports: a local
//! filesystem store with change notifications, a JSON configuration
//! repository and a JSONL move-history log.

pub mod config;
pub mod fs;
pub mod history;
pub mod time;

pub use config::FileConfigRepository;
pub use fs::{LocalFileStore, NotifyChangeStream};
pub use history::JsonlHistorySink;
pub use time::SystemClock;
