//! Decoding of on-chain token URIs

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;
use thiserror::Error;

const JSON_MEDIA_TYPE: &str = "application/json";

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("token URI is not a data URI")]
    NotDataUri,
    #[error("unsupported media type `{0}`, expected application/json")]
    MediaType(String),
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("invalid metadata JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Attribute {
    pub trait_type: String,
    pub value: String,
}

/// Token metadata as served by `tokenURI`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl TokenMetadata {
    /// Parse a `data:application/json[;base64],<payload>` URI.
    pub fn from_token_uri(uri: &str) -> Result<Self, MetadataError> {
        let (header, payload) = uri
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(','))
            .ok_or(MetadataError::NotDataUri)?;

        let mut params = header.split(';');
        let media_type = params.next().unwrap_or_default();
        if media_type != JSON_MEDIA_TYPE {
            return Err(MetadataError::MediaType(media_type.to_string()));
        }

        let json = if params.any(|p| p == "base64") {
            STANDARD.decode(payload)?
        } else {
            payload.as_bytes().to_vec()
        };
        Ok(serde_json::from_slice(&json)?)
    }

    /// Value of the `Color` attribute, if present.
    pub fn color(&self) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.trait_type.eq_ignore_ascii_case("color"))
            .map(|a| a.value.as_str())
    }
}
