//! Codec between [`ContentMetadata`] records and HTTP headers.
//!
//! This module implements the field-by-field mapping used on the wire:
//!
//! - `content_type` ↔ `Content-Type` (raw string)
//! - `content_disposition` ↔ `Content-Disposition` (raw string)
//! - `content_encoding` ↔ `Content-Encoding` (raw string)
//! - `content_language` ↔ `Content-Language` (raw string)
//! - `content_length` ↔ `Content-Length` (decimal)
//! - `content_md5` ↔ `Content-MD5` (standard base64 of the raw digest)
//! - `expires` ↔ `Expires` (RFC 1123 date)
//!
//! Decoding follows HTTP/1.1 semantics where the headers call for it: a
//! `Transfer-Encoding: chunked` marker invalidates any declared
//! `Content-Length`, and an unparseable `Expires` is treated as already
//! expired rather than as an error.

use std::time::SystemTime;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, header};
use tracing::debug;

use crate::protocol::{ContentMetadata, DecodeError, EncodeError};

/// The `Content-MD5` header name, which `http` does not predefine.
pub const CONTENT_MD5: HeaderName = HeaderName::from_static("content-md5");

/// Translates between [`ContentMetadata`] records and the equivalent HTTP
/// headers, in both directions.
///
/// The codec is a stateless value: construct one with
/// [`ContentMetadataCodec::new`] and pass it to whoever encodes or decodes.
/// It performs no I/O and keeps no cache, so a single instance may be shared
/// across threads without coordination.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentMetadataCodec;

impl ContentMetadataCodec {
    /// Creates a new codec.
    pub fn new() -> Self {
        Self
    }

    /// Generates the standard HTTP headers for the populated fields of
    /// `metadata`.
    ///
    /// Absent fields contribute no header. `Content-Length` is rendered in
    /// decimal, `Content-MD5` as standard base64 of the raw digest bytes and
    /// `Expires` as an RFC 1123 date such as `Sun, 06 Nov 1994 08:49:37 GMT`.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::InvalidHeaderValue`] if a free-form string
    /// field contains bytes that are not legal in an HTTP header value.
    /// Values rendered by the codec itself always encode.
    pub fn to_headers(&self, metadata: &ContentMetadata) -> Result<HeaderMap, EncodeError> {
        let mut headers = HeaderMap::new();

        if let Some(content_type) = metadata.content_type() {
            headers.append(header::CONTENT_TYPE, raw_value(header::CONTENT_TYPE, content_type)?);
        }
        if let Some(content_disposition) = metadata.content_disposition() {
            headers.append(header::CONTENT_DISPOSITION, raw_value(header::CONTENT_DISPOSITION, content_disposition)?);
        }
        if let Some(content_encoding) = metadata.content_encoding() {
            headers.append(header::CONTENT_ENCODING, raw_value(header::CONTENT_ENCODING, content_encoding)?);
        }
        if let Some(content_language) = metadata.content_language() {
            headers.append(header::CONTENT_LANGUAGE, raw_value(header::CONTENT_LANGUAGE, content_language)?);
        }
        if let Some(content_length) = metadata.content_length() {
            headers.append(header::CONTENT_LENGTH, HeaderValue::from(content_length));
        }
        if let Some(content_md5) = metadata.content_md5() {
            // Safe to unwrap since base64 output is always visible ascii
            let value = HeaderValue::from_str(&BASE64.encode(content_md5)).unwrap();
            headers.append(CONTENT_MD5, value);
        }
        if let Some(expires) = metadata.expires() {
            // Safe to unwrap since httpdate renders visible ascii only
            let value = HeaderValue::from_str(&httpdate::fmt_http_date(expires)).unwrap();
            headers.append(header::EXPIRES, value);
        }

        Ok(headers)
    }

    /// Populates `metadata` from the content-describing headers in
    /// `headers`, leaving fields with no corresponding header untouched.
    ///
    /// Header names match case-insensitively. Unrecognized headers are
    /// ignored, and a recognized name appearing more than once is applied
    /// last-one-wins in map order. When any `Transfer-Encoding` header is
    /// exactly `chunked` (ignoring case), `Content-Length` entries are
    /// skipped: chunked transfer invalidates a declared length. A malformed
    /// `Expires` never fails the decode; it is recorded as already expired
    /// (see [`parse_expires`](ContentMetadataCodec::parse_expires)).
    ///
    /// # Errors
    ///
    /// A malformed `Content-Length` or `Content-MD5` aborts the decode with
    /// [`DecodeError::InvalidContentLength`] or
    /// [`DecodeError::InvalidContentMd5`]; neither gets a silent fallback. A
    /// recognized header other than `Expires` whose value is not visible
    /// ascii fails with [`DecodeError::OpaqueHeaderValue`].
    pub fn from_headers(&self, metadata: &mut ContentMetadata, headers: &HeaderMap) -> Result<(), DecodeError> {
        // Scan for the chunked marker before applying any Content-Length
        let chunked = headers.get_all(header::TRANSFER_ENCODING).iter().any(is_chunked_marker);

        for (name, value) in headers {
            if name == &header::CONTENT_LENGTH {
                if chunked {
                    continue;
                }
                let raw = str_value(name, value)?;
                let length = raw
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| DecodeError::invalid_content_length(format!("value {raw} is not u64")))?;
                metadata.set_content_length(Some(length));
            } else if name == &CONTENT_MD5 {
                let raw = str_value(name, value)?;
                let digest = BASE64
                    .decode(raw.trim())
                    .map_err(|e| DecodeError::invalid_content_md5(format!("value {raw} is not base64: {e}")))?;
                metadata.set_content_md5(Some(Bytes::from(digest)));
            } else if name == &header::CONTENT_TYPE {
                metadata.set_content_type(Some(str_value(name, value)?.to_owned()));
            } else if name == &header::CONTENT_DISPOSITION {
                metadata.set_content_disposition(Some(str_value(name, value)?.to_owned()));
            } else if name == &header::CONTENT_ENCODING {
                metadata.set_content_encoding(Some(str_value(name, value)?.to_owned()));
            } else if name == &header::CONTENT_LANGUAGE {
                metadata.set_content_language(Some(str_value(name, value)?.to_owned()));
            } else if name == &header::EXPIRES {
                metadata.set_expires(match value.to_str() {
                    Ok(raw) => self.parse_expires(Some(raw)),
                    Err(_) => {
                        debug!(header = %name, "opaque Expires value, treating as already expired");
                        Some(SystemTime::UNIX_EPOCH)
                    }
                });
            }
        }

        Ok(())
    }

    /// Parses an `Expires` header value.
    ///
    /// HTTP/1.1 directs clients to treat an unparseable `Expires` as
    /// already expired, so a malformed value maps to the epoch instead of an
    /// error or an absent result. Input accepts the IMF-fixdate form
    /// (`Sun, 06 Nov 1994 08:49:37 GMT`) as well as the two obsolete HTTP
    /// date formats; resolution is one second.
    pub fn parse_expires(&self, expires: Option<&str>) -> Option<SystemTime> {
        let raw = expires?;
        match httpdate::parse_http_date(raw) {
            Ok(instant) => Some(instant),
            Err(e) => {
                debug!(value = raw, cause = %e, "invalid Expires header, should be an RFC 1123 date, treating as already expired");
                Some(SystemTime::UNIX_EPOCH)
            }
        }
    }
}

/// Builds a header value from a caller-supplied string, tagging failures
/// with the header name.
fn raw_value(name: HeaderName, value: &str) -> Result<HeaderValue, EncodeError> {
    HeaderValue::from_str(value).map_err(|source| EncodeError::invalid_header_value(name, source))
}

/// Extracts a header value as a string, failing on values that are not
/// visible ascii.
fn str_value<'a>(name: &HeaderName, value: &'a HeaderValue) -> Result<&'a str, DecodeError> {
    value.to_str().map_err(|_| DecodeError::opaque_header_value(name.clone()))
}

/// Checks whether a Transfer-Encoding value is exactly `chunked`.
///
/// The whole value must match, ignoring ascii case. A chunked entry inside
/// a comma-separated encoding list is not the marker.
fn is_chunked_marker(value: &HeaderValue) -> bool {
    value.as_bytes().trim_ascii().eq_ignore_ascii_case(b"chunked")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    /// Epoch seconds of `Sun, 06 Nov 1994 08:49:37 GMT`.
    const NOV_06_1994: u64 = 784_111_777;

    /// MD5 digest of the empty input.
    const EMPTY_MD5: [u8; 16] =
        [0xd4, 0x1d, 0x8c, 0xd9, 0x8f, 0x00, 0xb2, 0x04, 0xe9, 0x80, 0x09, 0x98, 0xec, 0xf8, 0x42, 0x7e];

    fn codec() -> ContentMetadataCodec {
        ContentMetadataCodec::new()
    }

    #[test]
    fn round_trip_preserves_populated_fields() {
        let metadata = ContentMetadata::builder()
            .content_type("application/octet-stream")
            .content_disposition("attachment; filename=\"data.bin\"")
            .content_encoding("gzip")
            .content_language("en")
            .content_length(1024)
            .content_md5(EMPTY_MD5.to_vec())
            .expires(SystemTime::UNIX_EPOCH + Duration::from_secs(NOV_06_1994))
            .build();

        let headers = codec().to_headers(&metadata).unwrap();

        let mut decoded = ContentMetadata::default();
        codec().from_headers(&mut decoded, &headers).unwrap();

        assert_eq!(decoded, metadata);
    }

    #[test]
    fn round_trip_of_partial_record_keeps_other_fields_absent() {
        let metadata = ContentMetadata::builder().content_type("text/html").content_length(7).build();

        let headers = codec().to_headers(&metadata).unwrap();
        assert_eq!(headers.len(), 2);

        let mut decoded = ContentMetadata::default();
        codec().from_headers(&mut decoded, &headers).unwrap();

        assert_eq!(decoded, metadata);
        assert_eq!(decoded.content_md5(), None);
        assert_eq!(decoded.expires(), None);
    }

    #[test]
    fn empty_record_encodes_to_no_headers() {
        let headers = codec().to_headers(&ContentMetadata::default()).unwrap();
        assert!(headers.is_empty());
    }

    #[test]
    fn content_length_encodes_in_decimal() {
        let metadata = ContentMetadata::builder().content_length(123).build();
        let headers = codec().to_headers(&metadata).unwrap();

        assert_eq!(headers.get(header::CONTENT_LENGTH), Some(&HeaderValue::from_static("123")));
    }

    #[test]
    fn zero_digest_encodes_to_padded_base64() {
        let metadata = ContentMetadata::builder().content_md5(vec![0u8; 16]).build();
        let headers = codec().to_headers(&metadata).unwrap();

        assert_eq!(headers.get(&CONTENT_MD5), Some(&HeaderValue::from_static("AAAAAAAAAAAAAAAAAAAAAA==")));
    }

    #[test]
    fn expires_encodes_as_rfc1123() {
        let metadata =
            ContentMetadata::builder().expires(SystemTime::UNIX_EPOCH + Duration::from_secs(NOV_06_1994)).build();
        let headers = codec().to_headers(&metadata).unwrap();

        assert_eq!(headers.get(header::EXPIRES), Some(&HeaderValue::from_static("Sun, 06 Nov 1994 08:49:37 GMT")));
    }

    #[test]
    fn encode_rejects_illegal_header_value() {
        let metadata = ContentMetadata::builder().content_type("text/plain\r\nevil: yes").build();
        let result = codec().to_headers(&metadata);

        assert!(matches!(result, Err(EncodeError::InvalidHeaderValue { .. })));
    }

    #[test]
    fn header_name_matching_is_case_insensitive() {
        for name in ["content-type", "CONTENT-TYPE", "Content-Type"] {
            let mut headers = HeaderMap::new();
            headers.insert(name.parse::<HeaderName>().unwrap(), HeaderValue::from_static("text/plain"));

            let mut decoded = ContentMetadata::default();
            codec().from_headers(&mut decoded, &headers).unwrap();

            assert_eq!(decoded.content_type(), Some("text/plain"));
        }
    }

    #[test]
    fn chunked_transfer_suppresses_content_length() {
        let mut headers = HeaderMap::new();
        headers.insert(header::TRANSFER_ENCODING, HeaderValue::from_static("chunked"));
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("123"));

        let mut decoded = ContentMetadata::default();
        codec().from_headers(&mut decoded, &headers).unwrap();

        assert_eq!(decoded.content_length(), None);
    }

    #[test]
    fn chunked_marker_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert(header::TRANSFER_ENCODING, HeaderValue::from_static("CHUNKED"));
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("123"));

        let mut decoded = ContentMetadata::default();
        codec().from_headers(&mut decoded, &headers).unwrap();

        assert_eq!(decoded.content_length(), None);
    }

    #[test]
    fn chunked_inside_encoding_list_does_not_suppress_content_length() {
        let mut headers = HeaderMap::new();
        headers.insert(header::TRANSFER_ENCODING, HeaderValue::from_static("chunked, gzip"));
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("123"));

        let mut decoded = ContentMetadata::default();
        codec().from_headers(&mut decoded, &headers).unwrap();

        assert_eq!(decoded.content_length(), Some(123));
    }

    #[test]
    fn unrelated_headers_are_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("example.org"));
        headers.insert(header::ETAG, HeaderValue::from_static("\"xyzzy\""));
        headers.insert(header::CONTENT_LANGUAGE, HeaderValue::from_static("fr"));

        let mut decoded = ContentMetadata::default();
        codec().from_headers(&mut decoded, &headers).unwrap();

        assert_eq!(decoded.content_language(), Some("fr"));
        assert_eq!(decoded.content_type(), None);
        assert_eq!(decoded.content_length(), None);
    }

    #[test]
    fn repeated_recognized_header_is_last_one_wins() {
        let mut headers = HeaderMap::new();
        headers.append(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        headers.append(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut decoded = ContentMetadata::default();
        codec().from_headers(&mut decoded, &headers).unwrap();

        assert_eq!(decoded.content_type(), Some("application/json"));
    }

    #[test]
    fn decode_leaves_unrelated_fields_untouched() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));

        let mut decoded = ContentMetadata::builder().content_language("en").build();
        codec().from_headers(&mut decoded, &headers).unwrap();

        assert_eq!(decoded.content_type(), Some("text/plain"));
        assert_eq!(decoded.content_language(), Some("en"));
    }

    #[test]
    fn malformed_content_length_fails_decode() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("twelve"));

        let mut decoded = ContentMetadata::default();
        let result = codec().from_headers(&mut decoded, &headers);

        assert!(matches!(result, Err(DecodeError::InvalidContentLength { .. })));
    }

    #[test]
    fn malformed_content_md5_fails_decode() {
        let mut headers = HeaderMap::new();
        headers.insert(&CONTENT_MD5, HeaderValue::from_static("!!not-base64!!"));

        let mut decoded = ContentMetadata::default();
        let result = codec().from_headers(&mut decoded, &headers);

        assert!(matches!(result, Err(DecodeError::InvalidContentMd5 { .. })));
    }

    #[test]
    fn decoded_md5_matches_original_digest() {
        let mut headers = HeaderMap::new();
        headers.insert(&CONTENT_MD5, HeaderValue::from_static("1B2M2Y8AsgTpgAmY7PhCfg=="));

        let mut decoded = ContentMetadata::default();
        codec().from_headers(&mut decoded, &headers).unwrap();

        assert_eq!(decoded.content_md5(), Some(&Bytes::from(EMPTY_MD5.to_vec())));
    }

    #[test]
    fn parse_expires_absent_is_absent() {
        assert_eq!(codec().parse_expires(None), None);
    }

    #[test]
    fn parse_expires_malformed_is_already_expired() {
        assert_eq!(codec().parse_expires(Some("not-a-date")), Some(SystemTime::UNIX_EPOCH));
    }

    #[test]
    fn parse_expires_rfc1123() {
        assert_eq!(
            codec().parse_expires(Some("Sun, 06 Nov 1994 08:49:37 GMT")),
            Some(SystemTime::UNIX_EPOCH + Duration::from_secs(NOV_06_1994))
        );
    }

    #[test]
    fn malformed_expires_header_does_not_fail_decode() {
        let mut headers = HeaderMap::new();
        headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));

        let mut decoded = ContentMetadata::default();
        codec().from_headers(&mut decoded, &headers).unwrap();

        assert_eq!(decoded.expires(), Some(SystemTime::UNIX_EPOCH));
        assert_eq!(decoded.content_type(), Some("text/plain"));
    }

    #[test]
    fn check_is_chunked_marker() {
        assert!(is_chunked_marker(&HeaderValue::from_static("chunked")));
        assert!(is_chunked_marker(&HeaderValue::from_static("CHUNKED")));
        assert!(is_chunked_marker(&HeaderValue::from_static(" chunked ")));

        assert!(!is_chunked_marker(&HeaderValue::from_static("gzip, chunked")));
        assert!(!is_chunked_marker(&HeaderValue::from_static("chunked, gzip")));
        assert!(!is_chunked_marker(&HeaderValue::from_static("gzip")));
    }
}
