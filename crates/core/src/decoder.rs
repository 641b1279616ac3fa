use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::prelude::BASE64_STANDARD;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::blob::locate_blob;
use crate::errors::{DecodeError, Result};

/// standard alphabet that accepts both padded and unpadded input.
pub(crate) const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// one playable server entry recovered from the embed payload.
///
/// only `hash` is interpreted; everything else upstream sends (usually a
/// `name`) is kept verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDescriptor {
    #[serde(default, deserialize_with = "hash_or_empty")]
    pub hash: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ItemDescriptor {
    pub fn new(hash: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            extra: Map::new(),
        }
    }

    /// server name as labelled by upstream, if present.
    pub fn name(&self) -> Option<&str> {
        self.extra.get("name").and_then(Value::as_str)
    }
}

/// a null or non-string hash becomes empty so only that item is skipped.
fn hash_or_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(hash) => hash,
        _ => String::new(),
    })
}

#[derive(Debug, Deserialize)]
struct EmbedConfig {
    hash: Option<String>,
}

fn decode_text(input: &str, stage: &'static str) -> Result<String> {
    let compact: String = input.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = LENIENT_BASE64
        .decode(compact)
        .map_err(|source| DecodeError::Base64 { stage, source })?;
    String::from_utf8(bytes).map_err(|source| DecodeError::Utf8 { stage, source })
}

fn decode_json<T: DeserializeOwned>(input: &str, stage: &'static str) -> Result<T> {
    let text = decode_text(input, stage)?;
    serde_json::from_str(&text).map_err(|source| DecodeError::Json { stage, source })
}

/// reverses every `.`-separated segment in place, drops the separators,
/// then reverses the joined result as a whole.
pub fn unscramble(text: &str) -> String {
    let joined: String = text.split('.').flat_map(|seg| seg.chars().rev()).collect();
    joined.chars().rev().collect()
}

/// decodes the inner `hash` value into the list of server descriptors.
pub fn decode_hash(hash: &str) -> Result<Vec<ItemDescriptor>> {
    let scrambled = decode_text(hash, "item hash")?;
    let items: Option<Vec<ItemDescriptor>> = decode_json(&unscramble(&scrambled), "item list")?;

    let items = items
        .filter(|items| !items.is_empty())
        .ok_or(DecodeError::NoItems)?;

    debug!(items = items.len(), "decoded item descriptors");
    Ok(items)
}

/// decodes the literal captured from the embed page into descriptors.
pub fn decode_blob(blob: &str) -> Result<Vec<ItemDescriptor>> {
    let config: EmbedConfig = decode_json(blob, "embed config")?;
    let hash = config
        .hash
        .filter(|hash| !hash.is_empty())
        .ok_or(DecodeError::MissingHash)?;

    decode_hash(&hash)
}

/// locates and decodes the payload of a whole embed page.
pub fn decode_page(html: &str) -> Result<Vec<ItemDescriptor>> {
    let blob = locate_blob(html).ok_or(DecodeError::BlobNotFound)?;
    decode_blob(blob)
}

/// builds a literal that [`decode_blob`] turns back into `items`.
///
/// the scrambled text is cut into `segment_len` sized segments; `0` keeps
/// it as a single segment.
pub fn encode_blob(items: &[ItemDescriptor], segment_len: usize) -> Result<String> {
    let json = serde_json::to_string(items).map_err(|source| DecodeError::Json {
        stage: "item list",
        source,
    })?;

    let reversed: Vec<char> = BASE64_STANDARD.encode(json).chars().rev().collect();
    let size = match segment_len {
        0 => reversed.len().max(1),
        n => n,
    };

    let scrambled = reversed
        .chunks(size)
        .map(|chunk| chunk.iter().rev().collect::<String>())
        .collect::<Vec<_>>()
        .join(".");

    let config = serde_json::json!({ "hash": BASE64_STANDARD.encode(scrambled) });
    Ok(BASE64_STANDARD.encode(config.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // captured from a live embed page
    const LIVE_HASH: &str = "Tm5aRTVtYlZvNFEycDBWMUJCVFROTE0zZzFRbFZLT0ZsdWVHdGxRVUl5UW5jaWZWMC5XM3NpYm1GdFpTSTZJblpwY0dWeUlpd2lhR0Z6YUNJNkltWlJjRFZDU0hSa1l6Qk9MVw";

    fn descriptor(name: &str, hash: &str) -> ItemDescriptor {
        let mut item = ItemDescriptor::new(hash);
        item.extra.insert("name".into(), Value::from(name));
        item
    }

    #[test]
    fn unscramble_reverses_segments_then_whole() {
        assert_eq!(unscramble("cba.fed"), "fedcba");
        assert_eq!(unscramble("olleh"), "olleh");
        assert_eq!(unscramble("ab.cd.ef"), "efcdab");
    }

    #[test]
    fn unscramble_is_not_a_single_reversal() {
        let input = "cba.fed";
        let single: String = input.chars().rev().collect();
        assert_ne!(unscramble(input), single);
        assert_ne!(unscramble(input), single.replace('.', ""));
    }

    #[test]
    fn decodes_live_hash() {
        let items = decode_hash(LIVE_HASH).expect("live hash should decode");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name(), Some("viper"));
        assert_eq!(items[0].hash, "fQp5BHtdc0N-cgdNfmZ8CjtWPAM3K3x5BUJ8YnxkeAB2Bw");
    }

    #[test]
    fn encoded_blob_decodes_to_same_items() {
        let items = vec![
            descriptor("viper", "abc"),
            descriptor("vidplay", "def-123_xyz"),
            ItemDescriptor::new("ghi"),
        ];

        for segment_len in [0, 1, 3, 7, 64, 10_000] {
            let blob = encode_blob(&items, segment_len).expect("encode");
            assert_eq!(decode_blob(&blob).expect("decode"), items, "segment_len={segment_len}");
        }
    }

    #[test]
    fn decode_page_reads_blob_from_html() {
        let blob = encode_blob(&[descriptor("viper", "abc")], 5).expect("encode");
        let html = format!("<script>window.vConfig = JSON.parse(atob(`{blob}`));</script>");

        let items = decode_page(&html).expect("page should decode");
        assert_eq!(items[0].hash, "abc");
    }

    #[test]
    fn page_without_blob_is_not_found() {
        let err = decode_page("<html></html>").expect_err("no blob");
        assert!(matches!(err, DecodeError::BlobNotFound));
        assert!(err.is_not_found());
    }

    #[test]
    fn missing_or_empty_hash_is_not_found() {
        for config in [r#"{"title":"x"}"#, r#"{"hash":""}"#, r#"{"hash":null}"#] {
            let blob = BASE64_STANDARD.encode(config);
            let err = decode_blob(&blob).expect_err("no hash");
            assert!(matches!(err, DecodeError::MissingHash), "{config}");
        }
    }

    #[test]
    fn empty_or_null_item_list_is_not_found() {
        // a single segment unscrambles to itself
        for list in ["[]", "null"] {
            let hash = BASE64_STANDARD.encode(BASE64_STANDARD.encode(list));
            let err = decode_hash(&hash).expect_err("no items");
            assert!(matches!(err, DecodeError::NoItems), "{list}");
        }
    }

    #[test]
    fn malformed_layers_report_their_stage() {
        let err = decode_blob("%%%not base64%%%").expect_err("bad base64");
        assert!(matches!(err, DecodeError::Base64 { stage: "embed config", .. }));
        assert!(!err.is_not_found());

        let err = decode_blob(&BASE64_STANDARD.encode("{not json")).expect_err("bad json");
        assert!(matches!(err, DecodeError::Json { stage: "embed config", .. }));

        let config = serde_json::json!({ "hash": BASE64_STANDARD.encode("a.b.!") });
        let err = decode_blob(&BASE64_STANDARD.encode(config.to_string())).expect_err("bad list");
        assert!(matches!(err, DecodeError::Base64 { stage: "item list", .. }));
    }

    #[test]
    fn non_string_hash_only_blanks_that_item() {
        let json = r#"[{"name":"a","hash":null},{"name":"b","hash":12345},{"name":"viper","hash":"good"}]"#;
        let items = decode_hash(&BASE64_STANDARD.encode(BASE64_STANDARD.encode(json)))
            .expect("siblings should survive");

        let hashes: Vec<_> = items.iter().map(|i| i.hash.as_str()).collect();
        assert_eq!(hashes, vec!["", "", "good"]);
        assert_eq!(items[2].name(), Some("viper"));
    }

    #[test]
    fn whitespace_inside_literal_is_ignored() {
        let blob = encode_blob(&[descriptor("viper", "abc")], 4).expect("encode");
        let wrapped = format!("{}\n  {}\r\n{}", &blob[..8], &blob[8..20], &blob[20..]);

        let items = decode_blob(&wrapped).expect("wrapped literal should decode");
        assert_eq!(items[0].hash, "abc");
    }

    #[test]
    fn unknown_descriptor_fields_are_preserved() {
        let json = r#"[{"name":"viper","hash":"abc","extra":{"a":1}}]"#;
        let items = decode_hash(&BASE64_STANDARD.encode(BASE64_STANDARD.encode(json)))
            .expect("decode");

        assert_eq!(items[0].hash, "abc");
        assert_eq!(items[0].extra["extra"]["a"], 1);
    }
}
