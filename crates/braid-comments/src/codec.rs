//! Wire codec for comment payloads.
//!
//! A comment is persisted as a flat, string-keyed payload: binary identifier
//! fields travel base64-encoded, the date travels as an RFC 3339 string.
//! Encoding is canonical (struct field order fixes the key order, serde_json
//! fixes the number formatting), so the same logical record always serializes
//! to the same bytes, and therefore hashes to the same name.
//!
//! Decoding is the sole defense against corrupted or adversarial external
//! data, since the substrate imposes no schema: every required key must be
//! present with the expected primitive type, base64 must decode to identifier
//! bytes of the right length, and the date must parse. The decoder rejects,
//! it never coerces.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use braid_types::ContentId;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CommentError, CommentResult};

/// Logical payload of a comment record.
///
/// A decoded `CommentInfo` carries fresh identifier values for `parent` and
/// `replies`: identity is by content, not by in-process handle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommentInfo {
    /// Display identity of the author. Resolved externally; never empty.
    pub owner: String,
    /// Comment body. Opaque to this layer.
    pub text: String,
    /// Point in time of last write.
    pub date: DateTime<Utc>,
    /// Version of the parent record observed at write time. A snapshot, not
    /// a live reference; goes stale if the parent is later rewritten.
    pub parent_version: u64,
    /// True iff `parent` identifies a video rather than another comment.
    pub is_root_comment: bool,
    /// Identifier of the video or parent comment.
    pub parent: ContentId,
    /// Identifier of this comment's append-only reply list.
    pub replies: ContentId,
}

/// Wire form. Field order here is the canonical key order.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePayload {
    owner: String,
    text: String,
    date: String,
    is_root_comment: bool,
    parent_version: u64,
    parent: String,
    replies: String,
}

/// Encode a comment payload into its canonical wire bytes.
///
/// Derived-only state (the record's own identifier) is never encoded.
pub fn encode(info: &CommentInfo) -> CommentResult<Vec<u8>> {
    let wire = WirePayload {
        owner: info.owner.clone(),
        text: info.text.clone(),
        date: info.date.to_rfc3339_opts(SecondsFormat::Secs, true),
        is_root_comment: info.is_root_comment,
        parent_version: info.parent_version,
        parent: BASE64.encode(info.parent.to_bytes()),
        replies: BASE64.encode(info.replies.to_bytes()),
    };
    serde_json::to_vec(&wire).map_err(|e| CommentError::MalformedPayload(e.to_string()))
}

/// Decode wire bytes into a comment payload, validating strictly.
///
/// Pure and total over well-typed input: equal bytes always yield an equal
/// `CommentInfo`.
pub fn decode(payload: &[u8]) -> CommentResult<CommentInfo> {
    let wire: WirePayload = serde_json::from_slice(payload)
        .map_err(|e| CommentError::MalformedPayload(e.to_string()))?;
    let date = DateTime::parse_from_rfc3339(&wire.date)
        .map_err(|e| CommentError::MalformedPayload(format!("date: {e}")))?
        .with_timezone(&Utc);
    let parent = decode_identifier("parent", &wire.parent)?;
    let replies = decode_identifier("replies", &wire.replies)?;
    Ok(CommentInfo {
        owner: wire.owner,
        text: wire.text,
        date,
        parent_version: wire.parent_version,
        is_root_comment: wire.is_root_comment,
        parent,
        replies,
    })
}

fn decode_identifier(field: &str, encoded: &str) -> CommentResult<ContentId> {
    let bytes = BASE64
        .decode(encoded)
        .map_err(|e| CommentError::MalformedPayload(format!("{field}: {e}")))?;
    ContentId::from_slice(&bytes)
        .map_err(|e| CommentError::MalformedPayload(format!("{field}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_info() -> CommentInfo {
        CommentInfo {
            owner: "alice".to_string(),
            text: "nice video".to_string(),
            date: DateTime::from_timestamp(1_714_564_800, 0).unwrap(),
            parent_version: 3,
            is_root_comment: true,
            parent: ContentId::from_raw([0xaa; 32]),
            replies: ContentId::from_raw([0xbb; 32]),
        }
    }

    /// Wire payload with every field well-formed, as a JSON value that tests
    /// can corrupt one field at a time.
    fn valid_wire() -> serde_json::Value {
        serde_json::json!({
            "owner": "bob",
            "text": "x",
            "date": "2024-05-01T12:00:00Z",
            "parentVersion": 0,
            "isRootComment": true,
            "parent": BASE64.encode([1u8; 32]),
            "replies": BASE64.encode([2u8; 32]),
        })
    }

    fn decode_value(value: &serde_json::Value) -> CommentResult<CommentInfo> {
        decode(&serde_json::to_vec(value).unwrap())
    }

    #[test]
    fn roundtrip_preserves_every_field() {
        let info = sample_info();
        let decoded = decode(&encode(&info).unwrap()).unwrap();
        assert_eq!(decoded, info);
        // Identifiers compare by serialized bytes, not by handle.
        assert_eq!(decoded.parent.to_bytes(), info.parent.to_bytes());
        assert_eq!(decoded.replies.to_bytes(), info.replies.to_bytes());
    }

    #[test]
    fn encoding_is_deterministic() {
        let info = sample_info();
        assert_eq!(encode(&info).unwrap(), encode(&info).unwrap());
    }

    #[test]
    fn key_order_is_canonical() {
        let payload = encode(&sample_info()).unwrap();
        let json = String::from_utf8(payload).unwrap();
        let positions: Vec<usize> = [
            "\"owner\"",
            "\"text\"",
            "\"date\"",
            "\"isRootComment\"",
            "\"parentVersion\"",
            "\"parent\"",
            "\"replies\"",
        ]
        .iter()
        .map(|key| json.find(key).expect("key present"))
        .collect();
        for w in positions.windows(2) {
            assert!(w[0] < w[1], "keys out of canonical order in {json}");
        }
    }

    #[test]
    fn date_is_rfc3339_seconds_utc() {
        let payload = encode(&sample_info()).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&payload).unwrap();
        assert_eq!(json["date"], "2024-05-01T12:00:00Z");
    }

    #[test]
    fn self_identifier_is_never_encoded() {
        let payload = encode(&sample_info()).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&payload).unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 7);
    }

    #[test]
    fn decode_accepts_offset_dates() {
        let mut wire = valid_wire();
        wire["date"] = "2024-05-01T14:00:00+02:00".into();
        let decoded = decode_value(&wire).unwrap();
        assert_eq!(
            decoded.date,
            DateTime::from_timestamp(1_714_564_800, 0).unwrap()
        );
    }

    #[test]
    fn decode_is_pure() {
        let wire = valid_wire();
        assert_eq!(decode_value(&wire).unwrap(), decode_value(&wire).unwrap());
    }

    // -----------------------------------------------------------------------
    // Rejection: the decoder rejects, it never coerces
    // -----------------------------------------------------------------------

    fn assert_malformed(value: &serde_json::Value) {
        match decode_value(value) {
            Err(CommentError::MalformedPayload(_)) => {}
            other => panic!("expected MalformedPayload, got {other:?}"),
        }
    }

    #[test]
    fn rejects_any_missing_key() {
        for key in [
            "owner",
            "text",
            "date",
            "parentVersion",
            "isRootComment",
            "parent",
            "replies",
        ] {
            let mut wire = valid_wire();
            wire.as_object_mut().unwrap().remove(key);
            assert_malformed(&wire);
        }
    }

    #[test]
    fn rejects_parent_version_as_string() {
        let mut wire = valid_wire();
        wire["parentVersion"] = "0".into();
        assert_malformed(&wire);
    }

    #[test]
    fn rejects_negative_parent_version() {
        let mut wire = valid_wire();
        wire["parentVersion"] = (-1).into();
        assert_malformed(&wire);
    }

    #[test]
    fn rejects_is_root_comment_as_number() {
        let mut wire = valid_wire();
        wire["isRootComment"] = 1.into();
        assert_malformed(&wire);
    }

    #[test]
    fn rejects_malformed_date() {
        let mut wire = valid_wire();
        wire["date"] = "not-a-date".into();
        assert_malformed(&wire);
    }

    #[test]
    fn rejects_malformed_base64() {
        let mut wire = valid_wire();
        wire["parent"] = "not base64!".into();
        assert_malformed(&wire);
    }

    #[test]
    fn rejects_identifier_of_wrong_length() {
        let mut wire = valid_wire();
        wire["replies"] = BASE64.encode([0u8; 4]).into();
        assert_malformed(&wire);
    }

    #[test]
    fn rejects_non_object_payloads() {
        assert!(matches!(
            decode(b"[]"),
            Err(CommentError::MalformedPayload(_))
        ));
        assert!(matches!(
            decode(b"not json at all"),
            Err(CommentError::MalformedPayload(_))
        ));
    }
}
