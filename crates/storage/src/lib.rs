#![forbid(unsafe_code)]

mod entry;
mod store;
mod sweeper;

pub use entry::Entry;
pub use store::ExpiringStore;
