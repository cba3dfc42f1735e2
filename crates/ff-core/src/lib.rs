//! # ff-core
//!
//! Core domain models and ports for Fileflow.
//!
//! This crate contains pure business logic without any infrastructure
//! dependencies: the file record model, type/source classification,
//! the recency dedup cache, the move error taxonomy, and the port
//! traits implemented by `ff-infra` and consumed by `ff-app`.

pub mod candidate;
pub mod config;
pub mod dedup;
pub mod errors;
pub mod feedback;
pub mod file;
pub mod history;
pub mod matcher;
pub mod ports;
pub mod resources;

pub use candidate::{MoveCandidate, MoveMode, MoveOutcome};
pub use config::{NavigatorConfig, SourceConfig};
pub use dedup::RecencyCache;
pub use errors::{MoveError, StoreError};
pub use feedback::Feedback;
pub use file::{DestinationRef, FileKind, FileRecord, Source, SourceKind};
pub use history::MoveEntry;
pub use resources::{CorrelationId, ResourceHandle, SlotId};
