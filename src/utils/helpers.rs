use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::utils::error::CustomError;

/// Decode an optional base64 image upload.
pub fn decode_image(image: Option<&str>) -> Result<Option<Vec<u8>>, CustomError> {
    match image.map(str::trim) {
        None | Some("") => Ok(None),
        Some(encoded) => STANDARD
            .decode(encoded)
            .map(Some)
            .map_err(|_| CustomError::ValidationError("Image must be base64 encoded".to_string())),
    }
}

pub fn encode_image(image: Option<&[u8]>) -> Option<String> {
    image.map(|bytes| STANDARD.encode(bytes))
}
