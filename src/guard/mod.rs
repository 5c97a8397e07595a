//! Admission guard for ARM managed resources.
//!
//! The guard is evaluated synchronously for every admission request on a
//! watched resource type:
//! - Metadata extraction: labels and annotations from the old and new object states
//! - Managed-state check: does the proposed state carry the ARM marker
//! - Decision: allow, deny with a formatted reason, or error
//!
//! Transport concerns (TLS, routing, webhook registration) live outside this
//! crate; `GuardContext::from_request` and `Verdict::into_response` are the
//! seams a webhook server plugs into.

mod engine;
mod error;
mod managed;
mod metadata;

pub use engine::ArmGuard;
pub use error::{DecodeError, Result};
pub use managed::{ARM_MANAGED_KEY, ARM_MANAGED_VALUE, has_arm_marker, is_arm_managed};
pub use metadata::{ExtractedMetadata, ObjectRole, ObjectState, extract_metadata};

// Re-export kube-rs admission types for contract testing
pub use kube::core::admission::{AdmissionRequest, AdmissionResponse, AdmissionReview, Operation};

use kube::core::DynamicObject;

/// Verdict of a single admission evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The request may proceed.
    Allow,
    /// The request is rejected; the message names the offending resource.
    Deny {
        /// Human-readable denial reason.
        message: String,
    },
    /// The request could not be evaluated.
    Error {
        /// HTTP-equivalent status code.
        code: u16,
        /// What prevented the evaluation.
        message: String,
    },
}

impl Verdict {
    /// Translate this verdict into an admission response for `request`.
    ///
    /// Allow passes the request's response through untouched, deny carries
    /// the denial reason, and error additionally sets the status code.
    pub fn into_response(self, request: &AdmissionRequest<DynamicObject>) -> AdmissionResponse {
        let response = AdmissionResponse::from(request);
        match self {
            Verdict::Allow => response,
            Verdict::Deny { message } => response.deny(message),
            Verdict::Error { code, message } => {
                let mut response = response.deny(message);
                response.result.code = code;
                response
            }
        }
    }
}

/// Context for one admission evaluation.
///
/// Borrowed from the transport's decoded request; nothing here is retained
/// once the verdict is returned.
pub struct GuardContext<'a> {
    /// The operation the request performs.
    pub operation: Operation,
    /// Username of the requesting identity; empty when the transport has none.
    pub username: &'a str,
    /// Kind of the resource under admission.
    pub kind: &'a str,
    /// Name of the resource under admission.
    pub name: &'a str,
    /// Namespace of the resource under admission.
    pub namespace: &'a str,
    /// Prior object state (absent on CREATE).
    pub old_object: Option<ObjectState<'a>>,
    /// Proposed object state (absent on DELETE).
    pub new_object: Option<ObjectState<'a>>,
}

impl<'a> GuardContext<'a> {
    /// Borrow an evaluation context from a decoded admission request.
    pub fn from_request(request: &'a AdmissionRequest<DynamicObject>) -> Self {
        Self {
            operation: request.operation.clone(),
            username: request.user_info.username.as_deref().unwrap_or(""),
            kind: &request.kind.kind,
            name: &request.name,
            namespace: request.namespace.as_deref().unwrap_or(""),
            old_object: request.old_object.as_ref().map(ObjectState::Typed),
            new_object: request.object.as_ref().map(ObjectState::Typed),
        }
    }
}
