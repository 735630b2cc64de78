//! Serialization contract for cached todo values.
//!
//! Cache values cross a process boundary in real deployments, so the wire
//! format is pinned here in one place: JSON via serde, one encoder/decoder
//! pair for single items and one for the full collection. The format is an
//! internal detail of the cache layer (callers only ever see `Todo` values)
//! but it must round-trip a `Todo` exactly, timestamps included.

use crate::todo::Todo;

use super::traits::CacheError;

/// Encode a single todo for cache storage.
pub fn encode_todo(todo: &Todo) -> Result<Vec<u8>, CacheError> {
    serde_json::to_vec(todo).map_err(|e| CacheError::Codec(e.to_string()))
}

/// Decode a single todo from cache bytes.
pub fn decode_todo(bytes: &[u8]) -> Result<Todo, CacheError> {
    serde_json::from_slice(bytes).map_err(|e| CacheError::Codec(e.to_string()))
}

/// Encode the full todo collection, preserving order.
pub fn encode_todo_list(todos: &[Todo]) -> Result<Vec<u8>, CacheError> {
    serde_json::to_vec(todos).map_err(|e| CacheError::Codec(e.to_string()))
}

/// Decode the full todo collection.
pub fn decode_todo_list(bytes: &[u8]) -> Result<Vec<Todo>, CacheError> {
    serde_json::from_slice(bytes).map_err(|e| CacheError::Codec(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::todo::TodoId;
    use chrono::Utc;

    fn sample() -> Todo {
        Todo {
            id: TodoId(7),
            title: "Buy milk".into(),
            description: "2%".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_todo_roundtrips_exactly() {
        let todo = sample();
        let decoded = decode_todo(&encode_todo(&todo).unwrap()).unwrap();
        assert_eq!(decoded, todo);
    }

    #[test]
    fn test_list_preserves_order() {
        let mut a = sample();
        a.id = TodoId(1);
        let mut b = sample();
        b.id = TodoId(2);

        let decoded = decode_todo_list(&encode_todo_list(&[a.clone(), b.clone()]).unwrap()).unwrap();
        assert_eq!(decoded, vec![a, b]);
    }

    #[test]
    fn test_decode_garbage_is_codec_error() {
        let err = decode_todo(b"not json").unwrap_err();
        assert!(matches!(err, CacheError::Codec(_)));
    }

    #[test]
    fn test_decode_wrong_shape_is_codec_error() {
        // Valid JSON, wrong schema
        let err = decode_todo(br#"{"unexpected": true}"#).unwrap_err();
        assert!(matches!(err, CacheError::Codec(_)));
    }
}
