pub mod blob;
pub mod decoder;
pub mod errors;
pub mod manifest;
pub mod quality;

pub use blob::locate_blob;
pub use decoder::{ItemDescriptor, decode_blob, decode_hash, decode_page, encode_blob, unscramble};
pub use errors::{DecodeError, Result};
pub use manifest::{PROXY_MARKER, ProxyVariant, proxy_lines, rewrite_proxy_path, scan_manifest};
pub use quality::{DEFAULT_QUALITY, decode_quality, quality_label};
