pub mod types;
pub mod wrapper;

pub use types::{NameFilter, PurgeRecord, PurgeTotals};
pub use wrapper::S3Wrapper;

#[cfg(test)]
mod tests;
