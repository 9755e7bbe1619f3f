//! Provider response handling shared by the HTTP providers
//!
//! Bodies are decoded with the charset the provider declares in its
//! `Content-Type` header. Without a declaration the body must be UTF-8.
//! Invalid byte sequences are reported instead of being replaced.

use crate::mt::error::{MtError, MtResult};
use encoding_rs::{Encoding, UTF_8};
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;

/// Extract the `charset` parameter from a `Content-Type` value
pub fn charset_from_content_type(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|part| {
        let (name, value) = part.trim().split_once('=')?;
        name.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"'))
    })
}

/// Decode a response body into a `String`
pub fn decode_body(bytes: &[u8], content_type: Option<&str>) -> MtResult<String> {
    let encoding = match content_type.and_then(charset_from_content_type) {
        Some(label) => Encoding::for_label(label.as_bytes())
            .ok_or_else(|| MtError::MalformedResponse(format!("unknown charset \"{}\"", label)))?,
        None => UTF_8,
    };

    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
        .ok_or_else(|| {
            MtError::MalformedResponse(format!("body is not valid {}", encoding.name()))
        })
}

/// Check the status, decode the body and deserialize it
pub async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> MtResult<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(MtError::Transport(status.as_u16()));
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = response.bytes().await?;
    let body = decode_body(&bytes, content_type.as_deref())?;

    serde_json::from_str(&body).map_err(|e| MtError::MalformedResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charset_from_content_type() {
        assert_eq!(
            charset_from_content_type("application/json; charset=utf-8"),
            Some("utf-8")
        );
        assert_eq!(
            charset_from_content_type("application/json;Charset=\"ISO-8859-1\""),
            Some("ISO-8859-1")
        );
        assert_eq!(charset_from_content_type("application/json"), None);
    }

    #[test]
    fn test_decode_utf8_multibyte() {
        let bytes = "m² café 東京".as_bytes();
        let text = decode_body(bytes, Some("application/json; charset=utf-8")).unwrap();
        assert_eq!(text, "m² café 東京");
    }

    #[test]
    fn test_decode_defaults_to_utf8() {
        let text = decode_body("Grüße".as_bytes(), None).unwrap();
        assert_eq!(text, "Grüße");
    }

    #[test]
    fn test_decode_declared_latin1() {
        // "m²" in ISO-8859-1
        let bytes = [b'm', 0xB2];
        let text = decode_body(&bytes, Some("text/plain; charset=iso-8859-1")).unwrap();
        assert_eq!(text, "m²");
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        let bytes = [b'm', 0xB2];
        let result = decode_body(&bytes, Some("application/json; charset=utf-8"));
        assert!(matches!(result, Err(MtError::MalformedResponse(_))));
    }

    #[test]
    fn test_decode_unknown_charset() {
        let result = decode_body(b"{}", Some("application/json; charset=klingon"));
        match result {
            Err(MtError::MalformedResponse(msg)) => assert!(msg.contains("klingon")),
            other => panic!("Expected MalformedResponse, got {:?}", other),
        }
    }
}
