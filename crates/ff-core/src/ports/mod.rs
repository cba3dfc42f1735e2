//! Port interfaces between the application services and the outside
//! world.
//!
//! Ports keep the watcher pipeline and the move orchestrator independent
//! of the concrete store, configuration storage, history log and the
//! user-facing surface. `ff-infra` provides the production
//! implementations; tests substitute hand-rolled mocks.

mod action_surface;
mod change_stream;
mod clock;
mod config_source;
mod file_store;
mod history_sink;

pub use action_surface::ActionSurfacePort;
pub use change_stream::{ChangeNotice, ChangeStreamPort, FileRef, WatchScope};
pub use clock::ClockPort;
pub use config_source::ConfigSourcePort;
pub use file_store::FileStorePort;
pub use history_sink::HistorySinkPort;
