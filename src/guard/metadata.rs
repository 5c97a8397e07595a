//! Metadata extraction from admission object states.
//!
//! An object state arrives either as an already-decoded `DynamicObject` or as
//! the raw serialized bytes of one. Only the metadata is read; the resource's
//! full schema is never depended on.

use std::collections::BTreeMap;
use std::fmt;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::core::DynamicObject;
use serde::Deserialize;

use super::error::{DecodeError, Result};

/// One of the two object states carried by an admission request.
#[derive(Debug, Clone, Copy)]
pub enum ObjectState<'a> {
    /// An object the transport has already decoded.
    Typed(&'a DynamicObject),
    /// Uninterpreted serialized bytes of an object.
    Raw(&'a [u8]),
}

/// Which object state of the request is being processed.
///
/// Only used to attribute decode failures in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectRole {
    /// The prior object state.
    Old,
    /// The proposed object state.
    New,
}

impl fmt::Display for ObjectRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectRole::Old => f.write_str("old"),
            ObjectRole::New => f.write_str("new"),
        }
    }
}

/// Labels and annotations of one object state.
///
/// `None` means the object carries no mapping at all; the managed-state check
/// treats it the same as an empty mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedMetadata {
    /// The object's labels, if any.
    pub labels: Option<BTreeMap<String, String>>,
    /// The object's annotations, if any.
    pub annotations: Option<BTreeMap<String, String>>,
}

/// Minimal decode target for raw object bytes: metadata only.
#[derive(Deserialize)]
struct RawObject {
    #[serde(default)]
    metadata: Option<ObjectMeta>,
}

/// Extract labels and annotations from an object state.
///
/// An absent state yields empty metadata. A decode failure on raw bytes is a
/// hard error; the caller aborts the evaluation rather than continuing with
/// partial metadata.
pub fn extract_metadata(
    state: Option<&ObjectState<'_>>,
    role: ObjectRole,
) -> Result<ExtractedMetadata> {
    let Some(state) = state else {
        return Ok(ExtractedMetadata::default());
    };

    match state {
        ObjectState::Typed(object) => Ok(ExtractedMetadata {
            labels: object.metadata.labels.clone(),
            annotations: object.metadata.annotations.clone(),
        }),
        ObjectState::Raw(bytes) => {
            let raw: RawObject =
                serde_json::from_slice(bytes).map_err(|source| DecodeError { role, source })?;
            let metadata = raw.metadata.unwrap_or_default();
            Ok(ExtractedMetadata {
                labels: metadata.labels,
                annotations: metadata.annotations,
            })
        }
    }
}
