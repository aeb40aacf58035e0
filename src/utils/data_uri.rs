use base64::{Engine, engine::general_purpose::STANDARD as BASE64};

const PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// Embed raw image bytes as `data:<mime>;base64,<payload>`.
pub fn encode_image(mime: &str, bytes: &[u8]) -> Result<String, String> {
    let mime = mime.trim().to_ascii_lowercase();
    if !mime.starts_with("image/") {
        return Err(format!("Expected an image content type, got '{mime}'"));
    }
    if bytes.is_empty() {
        return Err("Image payload is empty".to_string());
    }
    Ok(format!("{PREFIX}{mime}{BASE64_MARKER}{}", BASE64.encode(bytes)))
}

/// Split a base64 image data URI into its mime type and decoded bytes.
pub fn decode_image(data_uri: &str) -> Result<(String, Vec<u8>), String> {
    let rest = data_uri
        .strip_prefix(PREFIX)
        .ok_or_else(|| "Not a data URI".to_string())?;
    let (mime, payload) = rest
        .split_once(BASE64_MARKER)
        .ok_or_else(|| "Data URI is not base64 encoded".to_string())?;

    if !mime.starts_with("image/") {
        return Err(format!("Data URI is not an image: '{mime}'"));
    }

    let bytes = BASE64
        .decode(payload.trim())
        .map_err(|e| format!("Invalid base64 payload: {e}"))?;
    Ok((mime.to_string(), bytes))
}

/// Checks a client-built data URI (e.g. a drawn signature) before storing it.
pub fn validate_image(data_uri: &str) -> Result<(), String> {
    decode_image(data_uri).map(|_| ())
}

/// File extension genpdf's image loader can recognise.
pub fn extension_for(mime: &str) -> &'static str {
    match mime {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/gif" => "gif",
        "image/bmp" => "bmp",
        "image/webp" => "webp",
        _ => "png",
    }
}
