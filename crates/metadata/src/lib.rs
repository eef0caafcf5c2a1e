//! A bidirectional codec between content metadata and HTTP headers
//!
//! This crate translates the content-describing headers of an HTTP message
//! (`Content-Type`, `Content-Disposition`, `Content-Encoding`,
//! `Content-Language`, `Content-Length`, `Content-MD5` and `Expires`) into a
//! structured [`ContentMetadata`](protocol::ContentMetadata) record and back,
//! as used by object storage and similar APIs that describe payloads through
//! headers.
//!
//! # Features
//!
//! - Encoding of any subset of populated fields; absent fields emit nothing
//! - Case-insensitive header recognition on decode, unknown headers ignored
//! - `Transfer-Encoding: chunked` awareness: a declared `Content-Length` is
//!   not applied when the message is chunked
//! - HTTP/1.1-compliant `Expires` handling: an unparseable value is treated
//!   as already expired instead of failing the decode
//! - Structured errors for malformed `Content-Length` and `Content-MD5`
//!
//! # Example
//!
//! ```
//! use content_metadata::codec::ContentMetadataCodec;
//! use content_metadata::protocol::ContentMetadata;
//! use http::HeaderValue;
//!
//! let codec = ContentMetadataCodec::new();
//!
//! let metadata = ContentMetadata::builder()
//!     .content_type("application/json")
//!     .content_length(2)
//!     .build();
//!
//! let headers = codec.to_headers(&metadata).unwrap();
//! assert_eq!(headers.get(http::header::CONTENT_TYPE), Some(&HeaderValue::from_static("application/json")));
//! assert_eq!(headers.get(http::header::CONTENT_LENGTH), Some(&HeaderValue::from_static("2")));
//!
//! let mut decoded = ContentMetadata::default();
//! codec.from_headers(&mut decoded, &headers).unwrap();
//! assert_eq!(decoded, metadata);
//! ```
//!
//! # Architecture
//!
//! The crate is organized into two modules:
//!
//! - [`protocol`]: The [`ContentMetadata`](protocol::ContentMetadata) record,
//!   its builder and the error types
//! - [`codec`]: The [`ContentMetadataCodec`](codec::ContentMetadataCodec)
//!   performing the translation in both directions
//!
//! # Concurrency
//!
//! Every operation is a pure, synchronous transformation without shared
//! state. The codec itself is a stateless value that can be shared freely
//! across threads; construct one explicitly and pass it to whoever needs it.

pub mod codec;
pub mod protocol;
