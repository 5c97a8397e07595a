//! Prometheus metrics for admission verdicts.
//!
//! The guard records one counter increment per evaluation, labelled by
//! verdict outcome. Serving a metrics endpoint is the host's concern; the
//! text exposition is available through [`GuardMetrics::encode_text`].

use prometheus_client::encoding::text::encode;
use prometheus_client::encoding::{EncodeLabel, EncodeLabelSet, LabelSetEncoder};
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::registry::Registry;

use crate::guard::Verdict;

/// Labels for verdict metrics
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct VerdictLabels {
    pub verdict: String,
}

impl EncodeLabelSet for VerdictLabels {
    fn encode(&self, mut encoder: LabelSetEncoder<'_>) -> Result<(), std::fmt::Error> {
        ("verdict", self.verdict.as_str()).encode(encoder.encode_label())?;
        Ok(())
    }
}

/// Shared metrics for the guard
pub struct GuardMetrics {
    /// Total evaluations by verdict outcome
    verdicts_total: Family<VerdictLabels, Counter>,
    /// Prometheus registry
    registry: Registry,
}

impl Default for GuardMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl GuardMetrics {
    /// Create a new metrics instance with registered metrics
    pub fn new() -> Self {
        let mut registry = Registry::default();

        let verdicts_total = Family::<VerdictLabels, Counter>::default();
        registry.register(
            "armguard_admission_verdicts",
            "Total number of admission evaluations by verdict",
            verdicts_total.clone(),
        );

        Self {
            verdicts_total,
            registry,
        }
    }

    /// Record the outcome of one evaluation.
    pub fn record_verdict(&self, verdict: &Verdict) {
        let outcome = match verdict {
            Verdict::Allow => "allowed",
            Verdict::Deny { .. } => "denied",
            Verdict::Error { .. } => "errored",
        };
        self.verdicts_total
            .get_or_create(&VerdictLabels {
                verdict: outcome.to_string(),
            })
            .inc();
    }

    /// Render the registry in Prometheus text exposition format.
    pub fn encode_text(&self) -> Result<String, std::fmt::Error> {
        let mut output = String::new();
        encode(&mut output, &self.registry)?;
        Ok(output)
    }
}
