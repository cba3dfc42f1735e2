use serde::{Deserialize, Serialize};

/// Routes a user action on the surface back to its originating
/// candidate. Allocated from a process-lifetime monotonic counter and
/// never reused while the process lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(pub u32);

impl std::fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One reserved action slot on the surface (a pending-intent request
/// code in the original affordance model).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(pub u32);

/// The correlation id plus the action slots reserved for one live
/// candidate's affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceHandle {
    pub correlation: CorrelationId,
    pub slots: Vec<SlotId>,
}
