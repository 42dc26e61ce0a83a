use serde_json::Value;
use std::io::Write;

use crate::error::FilterError;

/// Nested reference name that is counted on the first stop.
pub const SHIPMENTS_REFERENCE: &str = "Shipments";
/// A record is emitted once its first stop carries at least this many Shipments references.
pub const MIN_SHIPMENTS_REFERENCES: usize = 2;

/// Parse one batch's raw lookup output. Anything other than a JSON array is fatal.
pub fn parse_response(raw: &str) -> Result<Vec<Value>, FilterError> {
    let data: Value = serde_json::from_str(raw).map_err(|source| FilterError::MalformedJson {
        source,
        raw: raw.to_string(),
    })?;

    match data {
        Value::Array(records) => Ok(records),
        _ => Err(FilterError::UnexpectedResponse {
            raw: raw.to_string(),
        }),
    }
}

/// Read-only view over one element of a lookup response. Every accessor is
/// total: absent or wrong-typed fields read as `None` / zero.
#[derive(Debug, Clone, Copy)]
pub struct LookupRecord<'a>(&'a Value);

impl<'a> LookupRecord<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self(value)
    }

    /// `referenceID` as text, or `None` when missing, null or `false`.
    pub fn reference_id(&self) -> Option<String> {
        match self.0.get("referenceID")? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// `References` of the first entry in `transformedContent.Stops`.
    pub fn first_stop_references(&self) -> &'a [Value] {
        self.0
            .get("transformedContent")
            .and_then(|content| content.get("Stops"))
            .and_then(Value::as_array)
            .and_then(|stops| stops.first())
            .and_then(|stop| stop.get("References"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn shipments_reference_count(&self) -> usize {
        self.first_stop_references()
            .iter()
            .filter(|r| r.get("ReferenceName").and_then(Value::as_str) == Some(SHIPMENTS_REFERENCE))
            .count()
    }

    pub fn passes(&self) -> bool {
        self.shipments_reference_count() >= MIN_SHIPMENTS_REFERENCES
    }
}

/// Identifiers of the passing records, in response order.
pub fn matching_ids(records: &[Value]) -> Vec<String> {
    records
        .iter()
        .map(LookupRecord::new)
        .filter_map(|record| {
            let id = record.reference_id()?;
            record.passes().then_some(id)
        })
        .collect()
}

/// Write identifiers one per line and flush, so they survive a later fatal error.
pub fn emit<W: Write>(out: &mut W, ids: &[String]) -> Result<(), FilterError> {
    for id in ids {
        writeln!(out, "{}", id)?;
    }
    out.flush()?;
    Ok(())
}
