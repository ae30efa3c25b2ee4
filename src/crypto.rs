//! Hashing primitives for VaultCoin
//!
//! Block digests are SHA-256 over a canonical JSON rendering: object keys
//! sorted, `", "` and `": "` separators, and every non-ASCII character
//! escaped as `\uXXXX`. The output matches `json.dumps(value, sort_keys=True)`
//! byte for byte.

use serde::{Serialize, Serializer};
use serde_json::ser::{Formatter, Serializer as JsonSerializer};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::io;

/// Lowercase hex SHA-256 of arbitrary bytes.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Digest of the canonical rendering of `value`.
pub fn hash_value(value: &Value) -> String {
    sha256_hex(canonical_json(value).as_bytes())
}

/// Render `value` in canonical form.
pub fn canonical_json(value: &Value) -> String {
    let mut out = Vec::new();
    let mut serializer = JsonSerializer::with_formatter(&mut out, SpacedAsciiFormatter);
    // Every key of a `Value` is a string and a `Vec` sink never fails.
    let _ = SortedKeys(value).serialize(&mut serializer);
    String::from_utf8_lossy(&out).into_owned()
}

/// Serializes a [`Value`] with object keys in code point order, whichever
/// map type serde_json was built with.
struct SortedKeys<'a>(&'a Value);

impl Serialize for SortedKeys<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Array(items) => serializer.collect_seq(items.iter().map(SortedKeys)),
            Value::Object(map) => {
                let mut entries: Vec<_> = map.iter().collect();
                entries.sort_by(|a, b| a.0.cmp(b.0));
                serializer.collect_map(entries.into_iter().map(|(key, value)| (key, SortedKeys(value))))
            }
            other => other.serialize(serializer),
        }
    }
}

/// Compact output with `", "` and `": "` separators. Anything outside
/// printable ASCII is written as `\uXXXX` UTF-16 units.
struct SpacedAsciiFormatter;

impl Formatter for SpacedAsciiFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        for c in fragment.chars() {
            if (' '..='~').contains(&c) {
                writer.write_all(&[c as u8])?;
            } else {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units).iter() {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sha256_hex_known_vector() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_canonical_json_sorts_keys_and_spaces_separators() {
        let value = json!({"proof": 1, "index": 1, "transactions": [], "previous_hash": "0"});
        assert_eq!(
            canonical_json(&value),
            r#"{"index": 1, "previous_hash": "0", "proof": 1, "transactions": []}"#
        );
    }

    #[test]
    fn test_canonical_json_nested_objects() {
        let value = json!({"b": [{"z": 1, "a": 2.5}, null, true]});
        assert_eq!(canonical_json(&value), r#"{"b": [{"a": 2.5, "z": 1}, null, true]}"#);
    }

    #[test]
    fn test_canonical_json_escapes_like_ensure_ascii() {
        let value = json!("é\"\n\u{1}😀");
        assert_eq!(
            canonical_json(&value),
            r#""\u00e9\"\n\u0001\ud83d\ude00""#
        );
    }

    #[test]
    fn test_canonical_json_escapes_delete_character() {
        assert_eq!(canonical_json(&json!("a\u{7f}b")), r#""a\u007fb""#);
    }

    #[test]
    fn test_canonical_json_sorts_keys_by_code_point() {
        let value = json!({"é": 1, "b": 2, "B": 3});
        assert_eq!(canonical_json(&value), r#"{"B": 3, "b": 2, "\u00e9": 1}"#);
    }

    #[test]
    fn test_hash_is_insensitive_to_key_insertion_order() {
        let a = json!({"sender": "A", "receiver": "B", "amount": 10});
        let b = json!({"amount": 10, "receiver": "B", "sender": "A"});
        assert_eq!(hash_value(&a), hash_value(&b));
        assert_eq!(hash_value(&a).len(), 64);
    }

    #[test]
    fn test_hash_changes_with_content() {
        let a = json!({"amount": 10});
        let b = json!({"amount": 11});
        assert_ne!(hash_value(&a), hash_value(&b));
    }
}
