//! Protobuf report sent by the UDP operation.

use prost::Message;

use crate::error::Result;

/// A single key/value attribute of a report.
#[derive(Clone, PartialEq, Message)]
pub struct KeyValue {
    /// Attribute key.
    #[prost(string, tag = "1")]
    pub key: String,
    /// Attribute value.
    #[prost(string, tag = "2")]
    pub value: String,
}

/// Small report message, one per invocation.
#[derive(Clone, PartialEq, Message)]
pub struct Report {
    /// Identifier taken from the filler value.
    #[prost(int32, tag = "1")]
    pub id: i32,
    /// Attributes.
    #[prost(message, repeated, tag = "2")]
    pub field: Vec<KeyValue>,
}

/// Size of the generated report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadShape {
    /// Number of attributes.
    pub num_keys: usize,
    /// Length of every key.
    pub key_size: usize,
    /// Length of every value.
    pub val_size: usize,
}

impl Default for PayloadShape {
    fn default() -> Self {
        Self {
            num_keys: 10,
            key_size: 10,
            val_size: 10,
        }
    }
}

/// Build a report with `shape.num_keys` attributes of `k…`/`v…` strings.
pub fn build_report(id: i32, shape: PayloadShape) -> Report {
    let field = (0..shape.num_keys)
        .map(|_| KeyValue {
            key: "k".repeat(shape.key_size),
            value: "v".repeat(shape.val_size),
        })
        .collect();
    Report { id, field }
}

/// Encode a report into a freshly sized buffer.
pub fn encode_report(report: &Report) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(report.encoded_len());
    report.encode(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_has_requested_shape() {
        let report = build_report(7, PayloadShape::default());
        assert_eq!(report.id, 7);
        assert_eq!(report.field.len(), 10);
        assert!(report.field.iter().all(|kv| kv.key == "kkkkkkkkkk"));
        assert!(report.field.iter().all(|kv| kv.value == "vvvvvvvvvv"));
    }

    #[test]
    fn encodes_and_decodes() {
        let report = build_report(i32::MAX, PayloadShape::default());
        let bytes = encode_report(&report).unwrap();
        assert_eq!(bytes.len(), report.encoded_len());
        let decoded = Report::decode(bytes.as_slice()).unwrap();
        assert_eq!(decoded, report);
    }
}
