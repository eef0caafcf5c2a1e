//! Structured content metadata record.
//!
//! This module provides [`ContentMetadata`], the typed view of the
//! content-describing headers of an HTTP message. All fields are optional:
//! `None` means the header is not specified, which is distinct from an empty
//! string or a zero length.

use std::time::SystemTime;

use bytes::Bytes;

/// Content-related metadata of an HTTP payload.
///
/// A record is request/response-scoped and transient; it owns its field
/// values and nothing else. Construct one with [`ContentMetadata::builder`],
/// or start from [`ContentMetadata::default`] (the all-absent record) and
/// populate it through the setters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentMetadata {
    content_type: Option<String>,
    content_disposition: Option<String>,
    content_encoding: Option<String>,
    content_language: Option<String>,
    content_length: Option<u64>,
    content_md5: Option<Bytes>,
    expires: Option<SystemTime>,
}

impl ContentMetadata {
    /// Creates a builder for assembling a record field by field.
    pub fn builder() -> ContentMetadataBuilder {
        ContentMetadataBuilder::default()
    }

    /// Returns the MIME type of the payload.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Returns the presentation disposition of the payload.
    pub fn content_disposition(&self) -> Option<&str> {
        self.content_disposition.as_deref()
    }

    /// Returns the encoding applied to the payload.
    pub fn content_encoding(&self) -> Option<&str> {
        self.content_encoding.as_deref()
    }

    /// Returns the natural language of the payload.
    pub fn content_language(&self) -> Option<&str> {
        self.content_language.as_deref()
    }

    /// Returns the payload size in bytes.
    pub fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    /// Returns the raw MD5 digest of the payload (16 bytes for MD5).
    pub fn content_md5(&self) -> Option<&Bytes> {
        self.content_md5.as_ref()
    }

    /// Returns the instant after which the payload is stale.
    pub fn expires(&self) -> Option<SystemTime> {
        self.expires
    }

    /// Sets or clears the MIME type.
    pub fn set_content_type(&mut self, content_type: Option<String>) {
        self.content_type = content_type;
    }

    /// Sets or clears the presentation disposition.
    pub fn set_content_disposition(&mut self, content_disposition: Option<String>) {
        self.content_disposition = content_disposition;
    }

    /// Sets or clears the payload encoding.
    pub fn set_content_encoding(&mut self, content_encoding: Option<String>) {
        self.content_encoding = content_encoding;
    }

    /// Sets or clears the payload language.
    pub fn set_content_language(&mut self, content_language: Option<String>) {
        self.content_language = content_language;
    }

    /// Sets or clears the payload size.
    pub fn set_content_length(&mut self, content_length: Option<u64>) {
        self.content_length = content_length;
    }

    /// Sets or clears the raw MD5 digest.
    pub fn set_content_md5(&mut self, content_md5: Option<Bytes>) {
        self.content_md5 = content_md5;
    }

    /// Sets or clears the expiry instant.
    pub fn set_expires(&mut self, expires: Option<SystemTime>) {
        self.expires = expires;
    }
}

/// Builder for [`ContentMetadata`].
///
/// Every method populates one field; fields never set stay absent. `build`
/// is infallible, validity of string values against the header value
/// grammar is checked at encode time.
#[derive(Debug, Default)]
pub struct ContentMetadataBuilder {
    metadata: ContentMetadata,
}

impl ContentMetadataBuilder {
    /// Sets the MIME type of the payload.
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.metadata.content_type = Some(content_type.into());
        self
    }

    /// Sets the presentation disposition of the payload.
    pub fn content_disposition(mut self, content_disposition: impl Into<String>) -> Self {
        self.metadata.content_disposition = Some(content_disposition.into());
        self
    }

    /// Sets the encoding applied to the payload.
    pub fn content_encoding(mut self, content_encoding: impl Into<String>) -> Self {
        self.metadata.content_encoding = Some(content_encoding.into());
        self
    }

    /// Sets the natural language of the payload.
    pub fn content_language(mut self, content_language: impl Into<String>) -> Self {
        self.metadata.content_language = Some(content_language.into());
        self
    }

    /// Sets the payload size in bytes.
    pub fn content_length(mut self, content_length: u64) -> Self {
        self.metadata.content_length = Some(content_length);
        self
    }

    /// Sets the raw MD5 digest of the payload.
    pub fn content_md5(mut self, content_md5: impl Into<Bytes>) -> Self {
        self.metadata.content_md5 = Some(content_md5.into());
        self
    }

    /// Sets the instant after which the payload is stale.
    pub fn expires(mut self, expires: SystemTime) -> Self {
        self.metadata.expires = Some(expires);
        self
    }

    /// Finishes the record.
    pub fn build(self) -> ContentMetadata {
        self.metadata
    }
}
