//! Hostname-association response normalization.
//!
//! # Responsibilities
//! - Decode the two historical upstream shapes for the association resource
//! - Reshape bare hostname strings into self-describing records for the UI
//! - Apply client-side certificate filtering on the legacy flat shape
//! - Extract the bare hostname list for the delete read-modify-write
//!
//! # Design Decisions
//! - The dual shape is a tagged union decoded explicitly (serde untagged
//!   enum), not ad hoc field probing
//! - "Owner unknown" is a real enum variant; it serializes to the legacy
//!   literal `default_cert_id` so existing UI consumers keep working
//! - A result that matches neither shape normalizes to an empty list

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::upstream::types::UpstreamEnvelope;

/// Sentinel owner id emitted when the upstream shape does not say which
/// certificate a hostname belongs to.
pub const DEFAULT_CERT_ID: &str = "default_cert_id";

/// Certificate filter parsed from the `certId` request parameter.
///
/// The literal `"all"` (and an absent or empty parameter) means "no filter".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CertificateFilter {
    All,
    Certificate(String),
}

impl CertificateFilter {
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            None => CertificateFilter::All,
            Some(p) if p.is_empty() || p == "all" => CertificateFilter::All,
            Some(p) => CertificateFilter::Certificate(p.to_string()),
        }
    }

    /// The certificate id to send upstream, if any.
    pub fn id(&self) -> Option<&str> {
        match self {
            CertificateFilter::All => None,
            CertificateFilter::Certificate(id) => Some(id),
        }
    }
}

/// Which certificate owns a normalized association record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CertificateOwner {
    Certificate(String),
    /// The upstream bare-string shape does not disambiguate ownership when
    /// no filter was applied.
    Unknown,
}

impl Serialize for CertificateOwner {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CertificateOwner::Certificate(id) => serializer.serialize_str(id),
            CertificateOwner::Unknown => serializer.serialize_str(DEFAULT_CERT_ID),
        }
    }
}

impl From<&CertificateFilter> for CertificateOwner {
    fn from(filter: &CertificateFilter) -> Self {
        match filter {
            CertificateFilter::All => CertificateOwner::Unknown,
            CertificateFilter::Certificate(id) => CertificateOwner::Certificate(id.clone()),
        }
    }
}

/// A normalized association record as exposed to the UI.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedAssociation {
    pub hostname: String,
    pub mtls_certificate_id: CertificateOwner,
    pub status: &'static str,
}

/// The two upstream result shapes for the association resource.
///
/// The current shape keys a bare hostname list under `hostnames`; the legacy
/// shape is a flat array of records. Variant order matters for untagged
/// decoding: an object with `hostnames` can never match `Flat`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AssociationShape {
    Keyed { hostnames: Vec<String> },
    Flat(Vec<FlatAssociation>),
}

/// A legacy association record. Unknown fields are preserved so the flat
/// shape passes through unchanged.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FlatAssociation {
    pub hostname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtls_certificate_id: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Rebuild an upstream association envelope into the normalized shape.
///
/// `success`, `errors` and `messages` pass through verbatim; `result` becomes
/// a list of self-describing records (empty when the upstream result carries
/// no recognizable associations or reported failure).
pub fn reshape_associations(
    envelope: UpstreamEnvelope,
    filter: &CertificateFilter,
) -> UpstreamEnvelope {
    let mut reshaped = UpstreamEnvelope {
        success: envelope.success,
        errors: envelope.errors,
        messages: envelope.messages,
        result: Value::Array(Vec::new()),
    };

    if !reshaped.success {
        return reshaped;
    }

    match serde_json::from_value::<AssociationShape>(envelope.result) {
        Ok(AssociationShape::Keyed { hostnames }) => {
            let records: Vec<NormalizedAssociation> = hostnames
                .into_iter()
                .map(|hostname| NormalizedAssociation {
                    hostname,
                    mtls_certificate_id: CertificateOwner::from(filter),
                    status: "Active",
                })
                .collect();
            // Serialization of these records cannot fail.
            reshaped.result = serde_json::to_value(records).unwrap_or_default();
        }
        Ok(AssociationShape::Flat(records)) => {
            let filtered: Vec<FlatAssociation> = match filter.id() {
                Some(cert_id) => records
                    .into_iter()
                    .filter(|r| r.mtls_certificate_id.as_deref() == Some(cert_id))
                    .collect(),
                None => records,
            };
            reshaped.result = serde_json::to_value(filtered).unwrap_or_default();
        }
        Err(_) => {}
    }

    reshaped
}

/// Extract the bare hostname list from either upstream shape.
///
/// Used by the delete sequence to compute the reduced association set.
pub fn hostname_list(result: Value) -> Vec<String> {
    match serde_json::from_value::<AssociationShape>(result) {
        Ok(AssociationShape::Keyed { hostnames }) => hostnames,
        Ok(AssociationShape::Flat(records)) => {
            records.into_iter().map(|r| r.hostname).collect()
        }
        Err(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(result: Value) -> UpstreamEnvelope {
        UpstreamEnvelope {
            success: true,
            errors: Vec::new(),
            messages: Vec::new(),
            result,
        }
    }

    #[test]
    fn test_keyed_shape_without_filter_uses_sentinel_owner() {
        let reshaped = reshape_associations(
            envelope(json!({"hostnames": ["a.com", "b.com"]})),
            &CertificateFilter::All,
        );
        assert_eq!(
            reshaped.result,
            json!([
                {"hostname": "a.com", "mtls_certificate_id": "default_cert_id", "status": "Active"},
                {"hostname": "b.com", "mtls_certificate_id": "default_cert_id", "status": "Active"},
            ])
        );
    }

    #[test]
    fn test_keyed_shape_with_filter_carries_certificate_id() {
        let filter = CertificateFilter::from_param(Some("cert123"));
        let reshaped =
            reshape_associations(envelope(json!({"hostnames": ["a.com"]})), &filter);
        assert_eq!(
            reshaped.result[0]["mtls_certificate_id"],
            json!("cert123")
        );
        assert_eq!(reshaped.result[0]["status"], json!("Active"));
    }

    #[test]
    fn test_all_param_means_no_filter() {
        assert_eq!(
            CertificateFilter::from_param(Some("all")),
            CertificateFilter::All
        );
        assert_eq!(CertificateFilter::from_param(None), CertificateFilter::All);
        assert_eq!(
            CertificateFilter::from_param(Some("")),
            CertificateFilter::All
        );
    }

    #[test]
    fn test_flat_shape_passes_through_with_extra_fields() {
        let reshaped = reshape_associations(
            envelope(json!([
                {"hostname": "a.com", "mtls_certificate_id": "c1", "status": "Pending", "created_at": "2024-01-01"},
            ])),
            &CertificateFilter::All,
        );
        assert_eq!(reshaped.result[0]["status"], json!("Pending"));
        assert_eq!(reshaped.result[0]["created_at"], json!("2024-01-01"));
    }

    #[test]
    fn test_flat_shape_filtered_client_side() {
        let reshaped = reshape_associations(
            envelope(json!([
                {"hostname": "a.com", "mtls_certificate_id": "c1"},
                {"hostname": "b.com", "mtls_certificate_id": "c2"},
            ])),
            &CertificateFilter::Certificate("c2".into()),
        );
        assert_eq!(
            reshaped.result,
            json!([{"hostname": "b.com", "mtls_certificate_id": "c2"}])
        );
    }

    #[test]
    fn test_failed_envelope_keeps_errors_and_empties_result() {
        let input = UpstreamEnvelope {
            success: false,
            errors: vec![json!({"message": "nope"})],
            messages: Vec::new(),
            result: json!({"hostnames": ["a.com"]}),
        };
        let reshaped = reshape_associations(input, &CertificateFilter::All);
        assert!(!reshaped.success);
        assert_eq!(reshaped.errors[0]["message"], json!("nope"));
        assert_eq!(reshaped.result, json!([]));
    }

    #[test]
    fn test_unrecognized_result_normalizes_to_empty_list() {
        let reshaped =
            reshape_associations(envelope(json!("weird")), &CertificateFilter::All);
        assert_eq!(reshaped.result, json!([]));
    }

    #[test]
    fn test_hostname_list_handles_both_shapes() {
        assert_eq!(
            hostname_list(json!({"hostnames": ["a.com", "b.com"]})),
            vec!["a.com", "b.com"]
        );
        assert_eq!(
            hostname_list(json!([
                {"hostname": "a.com", "mtls_certificate_id": "c1"},
                {"hostname": "b.com"},
            ])),
            vec!["a.com", "b.com"]
        );
        assert!(hostname_list(json!(null)).is_empty());
    }
}
