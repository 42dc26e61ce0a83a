use std::io::Write;

use crate::batch;
use crate::error::FilterError;
use crate::filter;
use crate::lookup::LookupTool;

/// Counters for one completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub batches: usize,
    pub records: usize,
    pub matched: usize,
}

/// Look up `references` batch by batch and write the identifiers of passing
/// records to `out`.
///
/// Batches run strictly in order, one lookup at a time. The first failure
/// stops the run; identifiers already written for earlier batches stay
/// written. A batch's output is only written once its whole response parsed.
pub async fn run<L, W>(
    references: &[String],
    batch_size: usize,
    lookup: &mut L,
    out: &mut W,
) -> Result<RunSummary, FilterError>
where
    L: LookupTool + ?Sized,
    W: Write,
{
    let total = batch::batch_count(references.len(), batch_size);
    let mut summary = RunSummary::default();

    for (index, chunk) in batch::batches(references, batch_size).enumerate() {
        tracing::debug!(
            batch = index + 1,
            total,
            size = chunk.len(),
            command = %lookup.describe(chunk),
            "looking up batch"
        );

        let raw = lookup.lookup(chunk).await?;
        let records = filter::parse_response(&raw)?;
        let ids = filter::matching_ids(&records);
        filter::emit(out, &ids)?;

        tracing::debug!(
            batch = index + 1,
            records = records.len(),
            matched = ids.len(),
            "batch filtered"
        );

        summary.batches += 1;
        summary.records += records.len();
        summary.matched += ids.len();
    }

    Ok(summary)
}
