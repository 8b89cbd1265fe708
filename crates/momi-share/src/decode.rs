use std::io::Read;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use flate2::read::DeflateDecoder;
use serde_json::Value;

use momi_core::models::payload::{SharedBookPayload, PAYLOAD_VERSION};

use crate::link::token_from_link;
use crate::DecodeFailure;

/// Longest token accepted, in characters.
const MAX_TOKEN_LEN: usize = 1 << 20;
/// Largest decompressed payload accepted, in bytes.
const MAX_PAYLOAD_BYTES: usize = 8 << 20;

/// Unpack a share token.
///
/// Pure: no storage or network access. The result is ready for
/// `BookRepository::import_book`.
pub fn decode(token: &str) -> Result<SharedBookPayload, DecodeFailure> {
    let token = token.trim().trim_end_matches('=');
    if token.is_empty() {
        return Err(DecodeFailure::Empty);
    }
    if token.len() > MAX_TOKEN_LEN {
        return Err(DecodeFailure::TooLarge {
            limit: MAX_TOKEN_LEN,
        });
    }

    let compressed = URL_SAFE_NO_PAD
        .decode(token)
        .map_err(|e| DecodeFailure::Encoding(e.to_string()))?;
    let bytes = inflate(&compressed)?;
    let text = String::from_utf8(bytes).map_err(|_| DecodeFailure::NotText)?;
    let value: Value =
        serde_json::from_str(&text).map_err(|e| DecodeFailure::Parse(e.to_string()))?;

    check_shape(&value)?;
    let payload: SharedBookPayload =
        serde_json::from_value(value).map_err(|e| DecodeFailure::Shape(e.to_string()))?;
    tracing::debug!(
        name = %payload.name,
        recipes = payload.recipes.len(),
        categories = payload.categories.len(),
        "decoded share token"
    );
    Ok(payload)
}

/// Decode from a full share link or a bare token.
pub fn decode_link(input: &str) -> Result<SharedBookPayload, DecodeFailure> {
    decode(&token_from_link(input))
}

fn inflate(compressed: &[u8]) -> Result<Vec<u8>, DecodeFailure> {
    let mut bytes = Vec::new();
    DeflateDecoder::new(compressed)
        .take(MAX_PAYLOAD_BYTES as u64 + 1)
        .read_to_end(&mut bytes)
        .map_err(|e| DecodeFailure::Decompress(e.to_string()))?;
    if bytes.len() > MAX_PAYLOAD_BYTES {
        return Err(DecodeFailure::TooLarge {
            limit: MAX_PAYLOAD_BYTES,
        });
    }
    if bytes.is_empty() {
        return Err(DecodeFailure::Decompress("no data recovered".into()));
    }
    Ok(bytes)
}

/// Top-level checks with readable messages, before the typed parse also
/// validates every recipe and category.
fn check_shape(value: &Value) -> Result<(), DecodeFailure> {
    let obj = value
        .as_object()
        .ok_or_else(|| DecodeFailure::Shape("expected an object".into()))?;

    if let Some(version) = obj.get("version") {
        let found = version
            .as_u64()
            .ok_or_else(|| DecodeFailure::Shape("version must be a number".into()))?;
        if found > u64::from(PAYLOAD_VERSION) {
            return Err(DecodeFailure::UnsupportedVersion {
                found,
                supported: PAYLOAD_VERSION,
            });
        }
    }

    match obj.get("name").and_then(Value::as_str) {
        Some(name) if !name.is_empty() => {}
        _ => return Err(DecodeFailure::Shape("missing book name".into())),
    }
    if !obj.get("recipes").is_some_and(Value::is_array) {
        return Err(DecodeFailure::Shape("recipes must be a list".into()));
    }
    if !obj.get("categories").is_some_and(Value::is_array) {
        return Err(DecodeFailure::Shape("categories must be a list".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::encode::encode;
    use flate2::write::DeflateEncoder;
    use flate2::Compression;
    use momi_core::models::book::RecipeBook;
    use momi_core::models::recipe::{Recipe, RecipeDraft};
    use serde_json::json;

    fn pack(bytes: &[u8]) -> String {
        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(bytes).unwrap();
        URL_SAFE_NO_PAD.encode(encoder.finish().unwrap())
    }

    fn pack_json(value: &Value) -> String {
        pack(&serde_json::to_vec(value).unwrap())
    }

    fn sample_book() -> RecipeBook {
        let mut book = RecipeBook::new("Mormors bog".into(), "#8b5cf6".into());
        book.categories = vec!["Kage".into(), "Småkager".into()];
        let mut fav = Recipe::from_draft(RecipeDraft::new(
            "Vaniljekranse",
            "https://mormor.dk/vaniljekranse",
            "Småkager",
        ));
        fav.is_favorite = true;
        book.recipes.push(fav);
        book.recipes.push(Recipe::from_draft(RecipeDraft::new(
            "Drømmekage",
            "https://mormor.dk/droemmekage",
            "Kage",
        )));
        book
    }

    #[test]
    fn test_round_trip() {
        let book = sample_book();
        let payload = decode(&encode(&book).unwrap()).unwrap();
        assert_eq!(payload.name, book.name);
        assert_eq!(payload.color, book.color);
        assert_eq!(payload.recipes, book.recipes);
        assert_eq!(payload.categories, book.categories);
        assert_eq!(payload.version, PAYLOAD_VERSION);
    }

    #[test]
    fn test_round_trip_empty_book() {
        let book = RecipeBook::new("Tom".into(), "#3b82f6".into());
        let payload = decode(&encode(&book).unwrap()).unwrap();
        assert_eq!(payload.name, "Tom");
        assert!(payload.recipes.is_empty());
        assert!(payload.categories.is_empty());
    }

    #[test]
    fn test_round_trip_whitespace_name() {
        let book = RecipeBook::new("   ".into(), "#3b82f6".into());
        let payload = decode(&encode(&book).unwrap()).unwrap();
        assert_eq!(payload.name, "   ");
    }

    #[test]
    fn test_rejects_garbage_and_empty() {
        assert!(decode("not-a-valid-token").is_err());
        assert_eq!(decode(""), Err(DecodeFailure::Empty));
        assert_eq!(decode("   "), Err(DecodeFailure::Empty));
        assert!(matches!(decode("ab$cd"), Err(DecodeFailure::Encoding(_))));
    }

    #[test]
    fn test_rejects_truncated_token() {
        let token = encode(&sample_book()).unwrap();
        let truncated = &token[..token.len() / 2];
        assert!(decode(truncated).is_err());
    }

    #[test]
    fn test_rejects_non_json_text() {
        let token = pack(b"hello there");
        assert!(matches!(decode(&token), Err(DecodeFailure::Parse(_))));
    }

    #[test]
    fn test_rejects_binary_payload() {
        let token = pack(&[0xff, 0xfe, 0x00, 0x81]);
        assert_eq!(decode(&token), Err(DecodeFailure::NotText));
    }

    #[test]
    fn test_shape_validation() {
        let missing_name = pack_json(&json!({"color": "#fff", "recipes": [], "categories": [], "sharedAt": 1}));
        assert!(matches!(decode(&missing_name), Err(DecodeFailure::Shape(_))));

        let empty_name = pack_json(&json!({"name": "", "recipes": [], "categories": [], "sharedAt": 1}));
        assert!(matches!(decode(&empty_name), Err(DecodeFailure::Shape(_))));

        let recipes_object = pack_json(&json!({"name": "x", "recipes": {}, "categories": [], "sharedAt": 1}));
        assert!(matches!(decode(&recipes_object), Err(DecodeFailure::Shape(_))));

        let categories_string = pack_json(&json!({"name": "x", "recipes": [], "categories": "Kage", "sharedAt": 1}));
        assert!(matches!(decode(&categories_string), Err(DecodeFailure::Shape(_))));

        let bad_element = pack_json(&json!({"name": "x", "recipes": [42], "categories": [], "sharedAt": 1}));
        assert!(matches!(decode(&bad_element), Err(DecodeFailure::Shape(_))));

        let not_object = pack_json(&json!([1, 2, 3]));
        assert!(matches!(decode(&not_object), Err(DecodeFailure::Shape(_))));
    }

    #[test]
    fn test_accepts_versionless_web_client_payload() {
        let token = pack_json(&json!({
            "name": "Delt bog",
            "color": "#10b981",
            "recipes": [{
                "id": "1712345678901",
                "titel": "Koldskål",
                "link": "https://sommer.dk/koldskaal",
                "kategori": "Dessert",
                "createdAt": 1712345678901i64
            }],
            "categories": ["Dessert"],
            "sharedAt": 1712349999999i64
        }));
        let payload = decode(&token).unwrap();
        assert_eq!(payload.version, 1);
        assert_eq!(payload.recipes[0].title, "Koldskål");
        assert!(!payload.recipes[0].is_favorite);
    }

    #[test]
    fn test_rejects_newer_version() {
        let token = pack_json(&json!({"version": 99, "name": "x", "recipes": [], "categories": [], "sharedAt": 1}));
        assert_eq!(
            decode(&token),
            Err(DecodeFailure::UnsupportedVersion {
                found: 99,
                supported: PAYLOAD_VERSION
            })
        );
    }

    #[test]
    fn test_rejects_oversized_payload() {
        let token = pack(&vec![b' '; MAX_PAYLOAD_BYTES + 16]);
        assert_eq!(
            decode(&token),
            Err(DecodeFailure::TooLarge {
                limit: MAX_PAYLOAD_BYTES
            })
        );
    }

    #[test]
    fn test_padded_token_accepted() {
        let token = encode(&sample_book()).unwrap();
        assert!(decode(&format!("{token}==")).is_ok());
    }
}
