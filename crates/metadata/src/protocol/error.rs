use http::HeaderName;
use http::header::InvalidHeaderValue;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("encode error: {source}")]
    Encode {
        #[from]
        source: EncodeError,
    },

    #[error("decode error: {source}")]
    Decode {
        #[from]
        source: DecodeError,
    },
}

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("value for {name} is not a legal header value: {source}")]
    InvalidHeaderValue { name: HeaderName, source: InvalidHeaderValue },
}

impl EncodeError {
    pub fn invalid_header_value(name: HeaderName, source: InvalidHeaderValue) -> Self {
        Self::InvalidHeaderValue { name, source }
    }
}

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("invalid content-length header: {reason}")]
    InvalidContentLength { reason: String },

    #[error("invalid content-md5 header: {reason}")]
    InvalidContentMd5 { reason: String },

    #[error("header {name} holds a value that is not visible ascii")]
    OpaqueHeaderValue { name: HeaderName },
}

impl DecodeError {
    pub fn invalid_content_length<S: ToString>(str: S) -> Self {
        Self::InvalidContentLength { reason: str.to_string() }
    }

    pub fn invalid_content_md5<S: ToString>(str: S) -> Self {
        Self::InvalidContentMd5 { reason: str.to_string() }
    }

    pub fn opaque_header_value(name: HeaderName) -> Self {
        Self::OpaqueHeaderValue { name }
    }
}
