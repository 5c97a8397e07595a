//! The admission decision engine.
//!
//! `ArmGuard` combines operation kind, managed state of the proposed object,
//! and the requesting identity into a verdict. Evaluation is a pure function
//! of its inputs: no caching, no I/O, no state carried between requests.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, error, warn};

use super::managed::is_arm_managed;
use super::metadata::{ObjectRole, extract_metadata};
use super::{GuardContext, Operation, Verdict};
use crate::metrics::GuardMetrics;

/// HTTP-equivalent status returned when an object state cannot be decoded.
const DECODE_FAILURE_CODE: u16 = 500;

/// Admission guard for ARM managed resources.
///
/// Holds the whitelist of trusted usernames, read-only after construction;
/// a single guard may be shared across concurrent evaluations.
pub struct ArmGuard {
    whitelisted_users: HashSet<String>,
    metrics: Option<Arc<GuardMetrics>>,
}

impl ArmGuard {
    /// Create a guard trusting the given usernames.
    ///
    /// Duplicates are harmless and order is irrelevant; membership is exact
    /// string equality.
    pub fn new<I, S>(whitelisted_users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            whitelisted_users: whitelisted_users.into_iter().map(Into::into).collect(),
            metrics: None,
        }
    }

    /// Create a guard that records verdict metrics.
    pub fn with_metrics<I, S>(whitelisted_users: I, metrics: Arc<GuardMetrics>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut guard = Self::new(whitelisted_users);
        guard.metrics = Some(metrics);
        guard
    }

    /// Evaluate one admission request.
    pub fn evaluate(&self, ctx: &GuardContext<'_>) -> Verdict {
        let verdict = self.decide(ctx);
        if let Some(metrics) = &self.metrics {
            metrics.record_verdict(&verdict);
        }
        verdict
    }

    fn decide(&self, ctx: &GuardContext<'_>) -> Verdict {
        debug!(
            operation = ?ctx.operation,
            user = %ctx.username,
            kind = %ctx.kind,
            name = %ctx.name,
            namespace = %ctx.namespace,
            "evaluating admission request"
        );

        // Only CREATE and UPDATE are policed. Everything else passes without
        // touching the object states, so an undecodable payload on an
        // unpoliced operation never blocks it.
        if !matches!(ctx.operation, Operation::Create | Operation::Update) {
            return Verdict::Allow;
        }

        // The old state is decoded only so corrupt payloads surface as
        // errors; the managed check reads the proposed state.
        if let Err(err) = extract_metadata(ctx.old_object.as_ref(), ObjectRole::Old) {
            error!(error = %err, name = %ctx.name, "failed to extract object metadata");
            return Verdict::Error {
                code: DECODE_FAILURE_CODE,
                message: err.to_string(),
            };
        }

        let new_metadata = match extract_metadata(ctx.new_object.as_ref(), ObjectRole::New) {
            Ok(metadata) => metadata,
            Err(err) => {
                error!(error = %err, name = %ctx.name, "failed to extract object metadata");
                return Verdict::Error {
                    code: DECODE_FAILURE_CODE,
                    message: err.to_string(),
                };
            }
        };

        if !is_arm_managed(&new_metadata) {
            return Verdict::Allow;
        }

        if self.whitelisted_users.contains(ctx.username) {
            debug!(
                user = %ctx.username,
                name = %ctx.name,
                "whitelisted user modifying ARM managed resource"
            );
            return Verdict::Allow;
        }

        warn!(
            user = %ctx.username,
            kind = %ctx.kind,
            name = %ctx.name,
            namespace = %ctx.namespace,
            "denying modification of ARM managed resource"
        );
        Verdict::Deny {
            message: denied_message(ctx),
        }
    }
}

/// Format the denial reason for a managed resource.
fn denied_message(ctx: &GuardContext<'_>) -> String {
    format!(
        "resource {} \"{}\" in namespace \"{}\" is managed by ARM, changes are limited to whitelisted users",
        ctx.kind, ctx.name, ctx.namespace
    )
}
