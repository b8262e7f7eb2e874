use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use uuid::Uuid;

/// Request identifier (UUID v4) for correlating output with logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Envelope metadata. Field order is fixed to keep JSON output stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub request_id: RequestId,
    pub generated_at: String,
    pub latency_ms: u64,
}

impl Metadata {
    pub fn new(latency_ms: u64) -> Self {
        Self {
            request_id: RequestId::new_v4(),
            generated_at: OffsetDateTime::now_utc()
                .format(&Rfc3339)
                .unwrap_or_default(),
            latency_ms,
        }
    }
}

/// Structured error carried in the envelope instead of failing the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvelopeError {
    pub code: String,
    pub message: String,
}

impl From<&stockboard_core::FetchError> for EnvelopeError {
    fn from(error: &stockboard_core::FetchError) -> Self {
        Self {
            code: error.code().to_owned(),
            message: error.message().to_owned(),
        }
    }
}

/// Output document: `{ meta, data, errors }`.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub meta: Metadata,
    pub data: T,
    pub errors: Vec<EnvelopeError>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockboard_core::FetchError;

    #[test]
    fn request_id_is_uuid_v4() {
        let request_id = RequestId::new_v4();
        assert_eq!(request_id.0.get_version_num(), 4);
    }

    #[test]
    fn generated_at_is_rfc3339() {
        let metadata = Metadata::new(42);
        assert!(OffsetDateTime::parse(&metadata.generated_at, &Rfc3339).is_ok());
        assert_eq!(metadata.latency_ms, 42);
    }

    #[test]
    fn envelope_serializes_meta_data_errors() {
        let envelope = Envelope {
            meta: Metadata::new(7),
            data: serde_json::Value::Null,
            errors: vec![EnvelopeError::from(&FetchError::missing_ticker())],
        };

        let value = serde_json::to_value(&envelope).expect("serializes");

        assert_eq!(value["meta"]["latency_ms"], 7);
        assert!(value["data"].is_null());
        assert_eq!(value["errors"][0]["code"], "fetch.missing_ticker");
    }
}
