pub mod kind;
pub mod record;
pub mod source;

pub use kind::FileKind;
pub use record::{DestinationRef, FileRecord};
pub use source::{Source, SourceKind};
