use std::io::Write;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use flate2::write::DeflateEncoder;
use flate2::Compression;

use momi_core::error::MomiError;
use momi_core::models::book::RecipeBook;
use momi_core::models::payload::SharedBookPayload;

/// Pack `book` into a share token, stamped with the current time.
///
/// The book's id and creation time are not included.
pub fn encode(book: &RecipeBook) -> Result<String, MomiError> {
    encode_payload(&SharedBookPayload::from_book(book))
}

pub fn encode_payload(payload: &SharedBookPayload) -> Result<String, MomiError> {
    let json = serde_json::to_vec(payload)?;
    let mut encoder = DeflateEncoder::new(Vec::with_capacity(json.len() / 2), Compression::best());
    encoder.write_all(&json)?;
    let compressed = encoder.finish()?;
    let token = URL_SAFE_NO_PAD.encode(compressed);
    tracing::debug!(
        json_bytes = json.len(),
        token_len = token.len(),
        recipes = payload.recipes.len(),
        "encoded share token"
    );
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use momi_core::models::recipe::{Recipe, RecipeDraft};

    #[test]
    fn test_token_is_url_path_safe() {
        let mut book = RecipeBook::new("Søndag & fest / 100%".into(), "#ec4899".into());
        book.categories.push("Kød?".into());
        book.recipes.push(Recipe::from_draft(RecipeDraft::new(
            "Flæskesteg",
            "https://example.com/opskrift?id=1&x=ø#top",
            "Kød?",
        )));
        let token = encode(&book).unwrap();
        assert!(!token.is_empty());
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_compression_pays_off_for_repetitive_books() {
        let mut book = RecipeBook::new("Stor".into(), "#3b82f6".into());
        for i in 0..50 {
            book.recipes.push(Recipe::from_draft(RecipeDraft::new(
                format!("Opskrift nummer {i}"),
                format!("https://www.valdemarsro.dk/opskrift-{i}/"),
                "Aftensmad",
            )));
        }
        let json_len = serde_json::to_vec(&SharedBookPayload::from_book(&book))
            .unwrap()
            .len();
        let token = encode(&book).unwrap();
        assert!(token.len() < json_len);
    }
}
