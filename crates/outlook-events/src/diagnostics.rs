//! Where failure details go before a fixed error is returned to the caller.

use std::sync::{Arc, Mutex};

/// Receives one record per failed request.
pub trait DiagnosticSink: Send + Sync {
    /// `label` names the operation, e.g. `"Error creating event:"`.
    fn record(&self, label: &'static str, detail: &str);
}

/// Writes failure records as `error` level `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, label: &'static str, detail: &str) {
        tracing::error!(label, detail, "{label} {detail}");
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Arc<S> {
    fn record(&self, label: &'static str, detail: &str) {
        (**self).record(label, detail);
    }
}

/// Keeps records in memory, for callers that surface them elsewhere.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<(&'static str, String)>>,
}

impl MemorySink {
    /// An empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records collected so far, oldest first.
    pub fn records(&self) -> Vec<(&'static str, String)> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

impl DiagnosticSink for MemorySink {
    fn record(&self, label: &'static str, detail: &str) {
        if let Ok(mut records) = self.records.lock() {
            records.push((label, detail.to_string()));
        }
    }
}
