//! Hashing - SHA-256 over canonical JSON
//!
//! Stable digests of requests and designs, usable as memoization keys.

use serde::Serialize;
use serde_json::{to_string, Value};
use sha2::{Digest, Sha256};

/// SHA-256 of bytes as lowercase hex
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Convert to canonical JSON (sorted keys, no whitespace)
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let v: Value = serde_json::to_value(value)?;
    to_string(&sort_value(&v))
}

fn sort_value(v: &Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut sorted: Vec<_> = map.iter().collect();
            sorted.sort_by(|a, b| a.0.cmp(b.0));
            Value::Object(
                sorted
                    .into_iter()
                    .map(|(k, v)| (k.clone(), sort_value(v)))
                    .collect(),
            )
        }
        Value::Array(arr) => Value::Array(arr.iter().map(sort_value).collect()),
        _ => v.clone(),
    }
}

/// Digest of a derived card design.
pub fn compute_design_hash<T: Serialize>(design: &T) -> Result<String, serde_json::Error> {
    let canonical = canonical_json(design)?;
    Ok(sha256_hex(canonical.as_bytes()))
}

/// request_hash = sha256(canonical_request + ":" + engine_version)
pub fn compute_request_hash(
    request: &impl Serialize,
    engine_version: &str,
) -> Result<String, serde_json::Error> {
    let canonical = canonical_json(request)?;
    Ok(sha256_hex(format!("{}:{}", canonical, engine_version).as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonical_json_sorted() {
        let obj = json!({"z": 1, "a": 2, "m": {"y": true, "b": null}});
        assert_eq!(
            canonical_json(&obj).unwrap(),
            r#"{"a":2,"m":{"b":null,"y":true},"z":1}"#
        );
    }

    #[test]
    fn test_sha256_known_vector() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_request_hash_depends_on_engine_version() {
        let request = json!({"wording": "Hi"});
        let a = compute_request_hash(&request, "1.0.0").unwrap();
        let b = compute_request_hash(&request, "1.0.1").unwrap();
        assert_ne!(a, b);
        assert_eq!(a, compute_request_hash(&request, "1.0.0").unwrap());
    }
}
