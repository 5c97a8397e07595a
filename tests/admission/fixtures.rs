//! Test fixtures building admission requests the way the API server sends them.

use arm_guard::guard::{AdmissionRequest, AdmissionReview};
use kube::core::DynamicObject;
use serde_json::{Value, json};

/// Builder for admission requests decoded from AdmissionReview JSON.
///
/// # Example
/// ```
/// let request = AdmissionRequestBuilder::new("CREATE")
///     .username("some-user")
///     .object(arm_managed_object_with_labels())
///     .build();
/// ```
#[derive(Clone, Debug)]
pub struct AdmissionRequestBuilder {
    operation: String,
    username: Option<String>,
    kind: String,
    name: String,
    namespace: String,
    object: Option<Value>,
    old_object: Option<Value>,
}

impl AdmissionRequestBuilder {
    /// Create a builder for the given operation ("CREATE", "UPDATE", ...).
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            username: None,
            kind: "TestKind".to_string(),
            name: "test-resource".to_string(),
            namespace: "default".to_string(),
            object: None,
            old_object: None,
        }
    }

    /// Set the requesting username.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the proposed object state.
    pub fn object(mut self, object: Value) -> Self {
        self.object = Some(object);
        self
    }

    /// Set the prior object state.
    pub fn old_object(mut self, old_object: Value) -> Self {
        self.old_object = Some(old_object);
        self
    }

    /// Decode the request from a full AdmissionReview document.
    pub fn build(self) -> AdmissionRequest<DynamicObject> {
        let review: AdmissionReview<DynamicObject> = serde_json::from_value(json!({
            "apiVersion": "admission.k8s.io/v1",
            "kind": "AdmissionReview",
            "request": {
                "uid": "705ab4f5-6393-4947-b908-f91073e368e3",
                "kind": {
                    "group": "fleet.azure.com",
                    "version": "v1alpha1",
                    "kind": self.kind,
                },
                "resource": {
                    "group": "fleet.azure.com",
                    "version": "v1alpha1",
                    "resource": "testkinds",
                },
                "name": self.name,
                "namespace": self.namespace,
                "operation": self.operation,
                "userInfo": {"username": self.username},
                "object": self.object,
                "oldObject": self.old_object,
                "dryRun": false,
            },
        }))
        .expect("fixture AdmissionReview must deserialize");

        review
            .try_into()
            .expect("fixture AdmissionReview must carry a request")
    }
}

/// An object JSON value with the given labels and annotations.
pub fn object_with_metadata(labels: Value, annotations: Value) -> Value {
    json!({
        "apiVersion": "fleet.azure.com/v1alpha1",
        "kind": "TestKind",
        "metadata": {
            "name": "test-resource",
            "namespace": "default",
            "labels": labels,
            "annotations": annotations,
        },
        "spec": {},
    })
}

/// An object whose labels carry the ARM marker.
pub fn arm_managed_object_with_labels() -> Value {
    object_with_metadata(
        json!({"kubernetes.azure.com/managed-by": "arm"}),
        Value::Null,
    )
}

/// An object whose annotations carry the ARM marker.
pub fn arm_managed_object_with_annotations() -> Value {
    object_with_metadata(
        Value::Null,
        json!({"kubernetes.azure.com/managed-by": "arm"}),
    )
}

/// An object without the ARM marker anywhere.
pub fn unmanaged_object() -> Value {
    object_with_metadata(json!({"foo": "bar"}), Value::Null)
}
