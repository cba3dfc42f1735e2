mod change_stream;
mod store;

pub use change_stream::NotifyChangeStream;
pub use store::LocalFileStore;
