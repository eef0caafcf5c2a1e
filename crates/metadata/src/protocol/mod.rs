//! Core types for content metadata handling.
//!
//! This module provides the building blocks the codec operates on:
//!
//! - **Metadata record**: the [`ContentMetadata`] record and its
//!   [`ContentMetadataBuilder`]
//! - **Error handling**: [`CodecError`] as the top-level error type, with
//!   [`EncodeError`] and [`DecodeError`] for each direction

mod content_metadata;
mod error;

pub use content_metadata::{ContentMetadata, ContentMetadataBuilder};
pub use error::{CodecError, DecodeError, EncodeError};
