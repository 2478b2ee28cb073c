//! Wire types shared with the upstream API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The `{success, errors, messages, result}` envelope used by the upstream
/// API (and mirrored on our own responses).
///
/// Every field defaults so that partially shaped or failed responses still
/// decode; `errors` and `messages` elements are kept as raw JSON so upstream
/// error codes survive a round trip.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamEnvelope {
    pub success: bool,
    pub errors: Vec<Value>,
    pub messages: Vec<Value>,
    pub result: Value,
}

/// Outbound payload for `POST /accounts/{id}/mtls_certificates`.
#[derive(Debug, Clone, Serialize)]
pub struct CertificateUpload {
    pub name: String,
    pub certificates: String,
    pub ca: bool,
}

/// Outbound payload for `PUT /zones/{id}/certificate_authorities/hostname_associations`.
///
/// This endpoint has full-replace semantics: the hostname list supplied here
/// becomes the complete association set for the certificate.
#[derive(Debug, Clone, Serialize)]
pub struct AssociationReplacement {
    pub hostnames: Vec<String>,
    pub mtls_certificate_id: String,
}

/// Outbound payload for `PUT /zones/{id}/access/certificates/settings`.
#[derive(Debug, Clone, Serialize)]
pub struct ForwardingSettingsUpdate {
    pub settings: Vec<ForwardingSetting>,
}

/// A single per-hostname forwarding setting.
#[derive(Debug, Clone, Serialize)]
pub struct ForwardingSetting {
    pub hostname: String,
    pub client_certificate_forwarding: bool,
    /// Always false: no caller-facing control for this field exists. Known
    /// limitation carried over from the original service.
    pub china_network: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_decodes_with_missing_fields() {
        let envelope: UpstreamEnvelope = serde_json::from_value(json!({
            "success": true,
            "result": {"hostnames": ["a.com"]}
        }))
        .unwrap();
        assert!(envelope.success);
        assert!(envelope.errors.is_empty());
        assert!(envelope.messages.is_empty());
    }

    #[test]
    fn test_envelope_preserves_error_codes() {
        let envelope: UpstreamEnvelope = serde_json::from_value(json!({
            "success": false,
            "errors": [{"code": 10000, "message": "Authentication error"}]
        }))
        .unwrap();
        assert_eq!(envelope.errors[0]["code"], 10000);
    }

    #[test]
    fn test_forwarding_payload_shape() {
        let payload = ForwardingSettingsUpdate {
            settings: vec![ForwardingSetting {
                hostname: "a.com".into(),
                client_certificate_forwarding: true,
                china_network: false,
            }],
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({"settings": [{
                "hostname": "a.com",
                "client_certificate_forwarding": true,
                "china_network": false
            }]})
        );
    }
}
