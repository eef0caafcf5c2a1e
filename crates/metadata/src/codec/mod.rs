//! Codec module for translating content metadata to and from HTTP headers.
//!
//! The codec sits between an HTTP transport and application-level
//! [`ContentMetadata`](crate::protocol::ContentMetadata) records. Its only
//! wire format is the set of content-describing header names and values;
//! the transport itself (request sending, response reading) is entirely the
//! caller's concern.
//!
//! # Components
//!
//! - [`ContentMetadataCodec`]: Encodes records into header maps and decodes
//!   header maps into records
//! - [`CONTENT_MD5`]: The `Content-MD5` header name, absent from
//!   `http::header`

mod metadata_codec;

pub use metadata_codec::{CONTENT_MD5, ContentMetadataCodec};
