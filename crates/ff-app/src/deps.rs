//! Dependency grouping for navigator construction.
//!
//! Not a builder: no build steps, no defaults, no hidden logic, just
//! parameter grouping. Every long-lived service is constructed once at
//! startup and passed by handle; there is no global state.

use std::sync::Arc;

use ff_core::ports::{
    ActionSurfacePort, ChangeStreamPort, ClockPort, ConfigSourcePort, FileStorePort,
    HistorySinkPort,
};

#[derive(Clone)]
pub struct NavigatorDeps {
    pub store: Arc<dyn FileStorePort>,
    pub changes: Arc<dyn ChangeStreamPort>,
    pub config: Arc<dyn ConfigSourcePort>,
    pub history: Arc<dyn HistorySinkPort>,
    pub surface: Arc<dyn ActionSurfacePort>,
    pub clock: Arc<dyn ClockPort>,
}
