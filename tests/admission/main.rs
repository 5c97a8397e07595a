// Test code is allowed to panic on failure
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

//! Integration tests for the ARM admission guard.
//!
//! These drive the public API the way a webhook transport would: an
//! `AdmissionReview` JSON document is decoded into an `AdmissionRequest`,
//! evaluated, and the verdict translated back into an `AdmissionResponse`.
//! No Kubernetes cluster is required.

mod fixtures;
