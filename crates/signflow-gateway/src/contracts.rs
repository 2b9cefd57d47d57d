//! Typed views of the provider payloads this crate reads and writes.

use serde::{Deserialize, Serialize};

use signflow_core::models::SignatureFieldSpec;

#[derive(Debug, Deserialize)]
pub(crate) struct UploadResponse {
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EmbeddedSendingResponse {
    pub data: Option<EmbeddedSendingData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EmbeddedSendingData {
    pub url: Option<String>,
}

impl EmbeddedSendingResponse {
    pub fn into_url(self) -> Option<String> {
        self.data
            .and_then(|data| data.url)
            .filter(|url| !url.trim().is_empty())
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct EmbeddedSendingRequest<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub redirect_uri: &'a str,
    pub link_expiration: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct FieldsRequest<'a> {
    pub fields: Vec<FieldEntry<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct FieldEntry<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub page_number: i32,
    pub role: &'a str,
    pub label: &'a str,
    pub required: bool,
}

impl<'a> From<&'a SignatureFieldSpec> for FieldsRequest<'a> {
    fn from(spec: &'a SignatureFieldSpec) -> Self {
        Self {
            fields: vec![FieldEntry {
                kind: "signature",
                x: spec.x,
                y: spec.y,
                width: spec.width,
                height: spec.height,
                page_number: spec.page_number,
                role: &spec.role,
                label: &spec.label,
                required: spec.required,
            }],
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SigningLinkRequest<'a> {
    pub document_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_session_url_is_none() {
        let empty: EmbeddedSendingResponse = serde_json::from_value(json!({ "data": {} })).unwrap();
        assert!(empty.into_url().is_none());

        let blank: EmbeddedSendingResponse =
            serde_json::from_value(json!({ "data": { "url": " " } })).unwrap();
        assert!(blank.into_url().is_none());

        let ok: EmbeddedSendingResponse =
            serde_json::from_value(json!({ "data": { "url": "https://sign.example/s/1" } }))
                .unwrap();
        assert_eq!(ok.into_url().as_deref(), Some("https://sign.example/s/1"));
    }

    #[test]
    fn test_fields_request_shape() {
        let spec = SignatureFieldSpec::default();
        let body = serde_json::to_value(FieldsRequest::from(&spec)).unwrap();
        assert_eq!(
            body,
            json!({
                "fields": [{
                    "type": "signature",
                    "x": spec.x,
                    "y": spec.y,
                    "width": spec.width,
                    "height": spec.height,
                    "page_number": spec.page_number,
                    "role": spec.role,
                    "label": spec.label,
                    "required": true
                }]
            })
        );
    }
}
