/// Aggregated outcome of a multi-step deletion cascade.
///
/// Cascades keep attempting remaining sub-steps after an individual failure;
/// the report collects what went wrong so the overall operation can claim
/// success only when every sub-step succeeded.
#[derive(Debug, Default, Clone)]
pub struct CascadeReport {
    failures: Vec<String>,
}

impl CascadeReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_failure(&mut self, context: impl Into<String>) {
        self.failures.push(context.into());
    }

    pub fn absorb(&mut self, other: CascadeReport) {
        self.failures.extend(other.failures);
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
