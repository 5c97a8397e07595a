//! ARM managed-state marker and predicate.
//!
//! An object is ARM managed when its labels or its annotations map the
//! reserved marker key to exactly the reserved value. The key with any other
//! value does not count.

use std::collections::BTreeMap;

use super::metadata::ExtractedMetadata;

/// Reserved marker key identifying ARM managed objects.
pub const ARM_MANAGED_KEY: &str = "kubernetes.azure.com/managed-by";

/// Reserved marker value for [`ARM_MANAGED_KEY`].
pub const ARM_MANAGED_VALUE: &str = "arm";

/// Check a single label or annotation mapping for the ARM marker.
pub fn has_arm_marker(map: Option<&BTreeMap<String, String>>) -> bool {
    match map {
        Some(map) => map.get(ARM_MANAGED_KEY).map(String::as_str) == Some(ARM_MANAGED_VALUE),
        None => false,
    }
}

/// Check whether an object's metadata marks it as ARM managed.
pub fn is_arm_managed(metadata: &ExtractedMetadata) -> bool {
    has_arm_marker(metadata.labels.as_ref()) || has_arm_marker(metadata.annotations.as_ref())
}
