//! # ff-app
//!
//! Application services for Fileflow: the change-watcher pipeline, the
//! candidate router, the move orchestrator and the notification
//! resource tracker, wired together by the [`navigator::FileNavigator`]
//! facade. All external concerns are reached through the ports defined
//! in `ff-core`.

pub mod deps;
pub mod navigator;
pub mod orchestrator;
pub mod resources;
pub mod router;
pub mod watcher;

#[cfg(test)]
mod testutil;

pub use deps::NavigatorDeps;
pub use navigator::FileNavigator;
pub use orchestrator::MoveOrchestrator;
pub use resources::ResourceTracker;
pub use router::{Action, CandidateRouter};
