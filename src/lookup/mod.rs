pub mod command;

use crate::error::FilterError;
use async_trait::async_trait;

pub use command::CommandLookup;

/// Bulk reference lookup. One call per batch; the returned text is the raw
/// JSON produced by the backend.
#[async_trait]
pub trait LookupTool: Send {
    async fn lookup(&mut self, batch: &[String]) -> Result<String, FilterError>;

    /// Human-readable form of the call made for `batch`, used in logs.
    fn describe(&self, batch: &[String]) -> String;
}
