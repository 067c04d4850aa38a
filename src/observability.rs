use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ObservabilitySnapshot {
    pub requests: u64,
    pub rejected_missing_key: u64,
    pub rejected_invalid_prompt: u64,
    pub upstream_calls: u64,
    pub upstream_errors: u64,
    pub generated: u64,
}

#[derive(Debug, Default)]
pub struct Observability {
    snapshot: ObservabilitySnapshot,
}

impl Observability {
    pub fn record_request(&mut self) {
        self.snapshot.requests = self.snapshot.requests.saturating_add(1);
    }

    pub fn record_missing_key(&mut self) {
        self.snapshot.rejected_missing_key = self.snapshot.rejected_missing_key.saturating_add(1);
    }

    pub fn record_invalid_prompt(&mut self) {
        self.snapshot.rejected_invalid_prompt =
            self.snapshot.rejected_invalid_prompt.saturating_add(1);
    }

    pub fn record_upstream_call(&mut self) {
        self.snapshot.upstream_calls = self.snapshot.upstream_calls.saturating_add(1);
    }

    pub fn record_upstream_error(&mut self) {
        self.snapshot.upstream_errors = self.snapshot.upstream_errors.saturating_add(1);
    }

    pub fn record_generated(&mut self) {
        self.snapshot.generated = self.snapshot.generated.saturating_add(1);
    }

    pub fn snapshot(&self) -> ObservabilitySnapshot {
        self.snapshot.clone()
    }
}
