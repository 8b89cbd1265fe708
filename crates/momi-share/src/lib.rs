//! Share tokens: a whole recipe book packed into one URL path segment.
//!
//! A token is the JSON form of a [`SharedBookPayload`], raw-deflate
//! compressed and base64url encoded without padding. Links take the form
//! `<origin>/importer/<token>`.

pub mod decode;
pub mod encode;
pub mod link;

use momi_core::error::MomiError;

pub use decode::{decode, decode_link};
pub use encode::{encode, encode_payload};
pub use link::{share_link, token_from_link, IMPORT_SEGMENT};

pub use momi_core::models::payload::SharedBookPayload;

/// Why a share token could not be turned back into a book.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeFailure {
    #[error("no share token given")]
    Empty,

    #[error("token is not valid base64url: {0}")]
    Encoding(String),

    #[error("token could not be decompressed: {0}")]
    Decompress(String),

    #[error("share data exceeds {limit} bytes")]
    TooLarge { limit: usize },

    #[error("share data is not text")]
    NotText,

    #[error("share data is not valid JSON: {0}")]
    Parse(String),

    #[error("share data has the wrong shape: {0}")]
    Shape(String),

    #[error("share data version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u64, supported: u32 },
}

impl From<DecodeFailure> for MomiError {
    fn from(e: DecodeFailure) -> Self {
        MomiError::Decode {
            reason: e.to_string(),
        }
    }
}
