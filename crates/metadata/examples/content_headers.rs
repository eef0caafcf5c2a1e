use std::time::{Duration, SystemTime};

use content_metadata::codec::ContentMetadataCodec;
use content_metadata::protocol::ContentMetadata;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

/// MD5 digest of the empty input.
const EMPTY_MD5: [u8; 16] =
    [0xd4, 0x1d, 0x8c, 0xd9, 0x8f, 0x00, 0xb2, 0x04, 0xe9, 0x80, 0x09, 0x98, 0xec, 0xf8, 0x42, 0x7e];

fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::DEBUG).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let codec = ContentMetadataCodec::new();

    let metadata = ContentMetadata::builder()
        .content_type("application/octet-stream")
        .content_disposition("attachment; filename=\"data.bin\"")
        .content_length(4096)
        .content_md5(EMPTY_MD5.to_vec())
        .expires(SystemTime::now() + Duration::from_secs(3600))
        .build();

    let headers = codec.to_headers(&metadata).expect("metadata should encode");
    for (name, value) in &headers {
        info!(header = %name, value = ?value, "encoded");
    }

    let mut decoded = ContentMetadata::default();
    codec.from_headers(&mut decoded, &headers).expect("headers should decode");
    info!(
        content_type = ?decoded.content_type(),
        content_length = ?decoded.content_length(),
        expires = ?decoded.expires(),
        "decoded"
    );

    // an unparseable Expires is already expired, not an error
    let expired = codec.parse_expires(Some("not-a-date"));
    info!(expires = ?expired, "malformed Expires value");
}
