//! arm-guard library crate
//!
//! Admission-control decision engine protecting ARM managed resources from
//! mutation by callers outside a trusted identity set. The engine is
//! transport-agnostic: a webhook server hands it an already-parsed admission
//! request and translates the returned verdict into its response encoding.

pub mod guard;
pub mod metrics;

pub use guard::{ArmGuard, GuardContext, ObjectState, Verdict};
pub use metrics::GuardMetrics;
