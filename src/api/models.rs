use std::fmt;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A DNS zone as reported by `GET /zones`. The client only ever reads these.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub development_mode: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_registrar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_dnshost: Option<String>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub original_name_servers: Vec<String>,
    #[serde(rename = "created_on", default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(rename = "modified_on", default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub name_servers: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_false")]
    pub paused: bool,
    #[serde(rename = "type", default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub zone_type: String,
    #[serde(rename = "checked_on", default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<DateTime<Utc>>,
}

/// A single DNS record.
///
/// Records passed to update or delete must carry `id` and `zone_id`; take
/// them from a previous listing and modify the fields you want to change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DnsRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub record_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "is_unset_ttl")]
    pub ttl: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub proxiable: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub proxied: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub locked: bool,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub zone_id: String,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub zone_name: String,
    #[serde(rename = "created_on", default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(rename = "modified_on", default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
    /// Type-specific payload (SRV, CAA, ...), passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl DnsRecord {
    /// A record carrying only name, type and content, as sent on create.
    pub fn new(
        name: impl Into<String>,
        record_type: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            record_type: record_type.into(),
            content: content.into(),
            ..Default::default()
        }
    }
}

impl fmt::Display for DnsRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.record_type, self.content)
    }
}

/// Envelope around every list response.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct ApiResponse<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub errors: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub result: Vec<T>,
}

impl<T: DeserializeOwned> ApiResponse<T> {
    /// Decodes a response body. Only a JSON object is accepted as envelope.
    pub fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        let envelope: Map<String, Value> = serde_json::from_slice(body)?;
        serde_json::from_value(Value::Object(envelope))
    }
}

fn default_success() -> bool {
    true
}

// The API sends `null` for unset strings and lists.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

fn is_unset_ttl(value: &Option<u32>) -> bool {
    matches!(value, None | Some(0))
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_record_omits_empty_fields() {
        let record = DnsRecord::new("test.example.com", "A", "192.168.0.2");
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(
            value,
            json!({
                "name": "test.example.com",
                "type": "A",
                "content": "192.168.0.2",
                "proxiable": false,
                "proxied": false,
                "locked": false,
            })
        );
    }

    #[test]
    fn record_decodes_provider_payload() {
        let record: DnsRecord = serde_json::from_value(json!({
            "id": "372e67954025e0ba6aaa6d586b9e0b59",
            "type": "SRV",
            "name": "_sip._tcp.example.com",
            "content": "10\t5060\tsip.example.com",
            "proxiable": false,
            "proxied": false,
            "ttl": 120,
            "locked": false,
            "zone_id": "023e105f4ecef8ad9ca31a8372d0c353",
            "zone_name": "example.com",
            "created_on": "2014-01-01T05:20:00.12345Z",
            "modified_on": "2014-01-01T05:20:00.12345Z",
            "data": { "priority": 1, "weight": 10, "port": 5060, "target": "sip.example.com" },
            "meta": { "auto_added": false }
        }))
        .unwrap();

        assert_eq!(record.id, "372e67954025e0ba6aaa6d586b9e0b59");
        assert_eq!(record.record_type, "SRV");
        assert_eq!(record.ttl, Some(120));
        assert_eq!(record.zone_name, "example.com");
        assert!(record.created.is_some());
        assert_eq!(record.data.as_ref().unwrap()["port"], 5060);
    }

    #[test]
    fn nulls_decode_as_empty() {
        let zone: Zone = serde_json::from_value(json!({
            "id": "z1",
            "name": "example.com",
            "original_registrar": null,
            "original_name_servers": null,
            "status": null,
            "paused": null
        }))
        .unwrap();

        assert_eq!(zone.id, "z1");
        assert!(zone.original_registrar.is_none());
        assert!(zone.original_name_servers.is_empty());
        assert_eq!(zone.status, "");
        assert!(!zone.paused);
    }

    #[test]
    fn zero_ttl_is_omitted() {
        let mut record: DnsRecord = serde_json::from_value(json!({
            "id": "r1",
            "zone_id": "z1",
            "name": "test.example.com",
            "type": "A",
            "content": "192.168.0.2",
            "ttl": 0
        }))
        .unwrap();
        assert_eq!(record.ttl, Some(0));

        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("ttl").is_none());
        assert_eq!(value["id"], "r1");

        record.ttl = Some(120);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["ttl"], 120);
    }

    #[test]
    fn envelope_must_be_an_object() {
        assert!(ApiResponse::<Zone>::from_slice(b"[]").is_err());
        assert!(ApiResponse::<Zone>::from_slice(b"null").is_err());

        let response = ApiResponse::<Zone>::from_slice(br#"{"result":[{"id":"z1"}]}"#).unwrap();
        assert_eq!(response.result[0].id, "z1");
    }

    #[test]
    fn record_displays_name_type_content() {
        let record = DnsRecord::new("www.example.com", "CNAME", "example.com");
        assert_eq!(record.to_string(), "www.example.com CNAME example.com");
    }

    #[test]
    fn envelope_without_result_is_empty() {
        let response: ApiResponse<Zone> =
            serde_json::from_value(json!({ "success": false, "errors": [{"code": 9103}] }))
                .unwrap();
        assert!(!response.success);
        assert_eq!(response.errors.len(), 1);
        assert!(response.result.is_empty());
    }
}
