use tracing::debug;

use crate::quality::decode_quality;

/// marker that identifies a variant line in an upstream manifest.
pub const PROXY_MARKER: &str = "/proxy/";

/// a stream variant recovered from one proxy line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyVariant {
    /// playable manifest url.
    pub file: String,
    /// vertical resolution (for example `720`).
    pub quality: u32,
}

/// lines of `manifest` that reference a proxied stream.
pub fn proxy_lines(manifest: &str) -> Vec<&str> {
    manifest
        .lines()
        .filter(|line| line.contains(PROXY_MARKER))
        .collect()
}

fn domain_host(domain: &str) -> &str {
    domain
        .split_once("://")
        .map(|(_, host)| host)
        .unwrap_or(domain)
        .trim_end_matches('/')
}

/// turns a proxy line into a direct manifest url.
///
/// upstream disguises playlists as `.png` files behind its own
/// `/api/proxy/viper/` prefix; the prefix is dropped so the url points at
/// the real host, and the extension is restored.
pub fn rewrite_proxy_path(domain: &str, line: &str) -> String {
    let prefix = format!("{}/api/proxy/viper/", domain_host(domain));

    format!("{domain}{line}")
        .replacen(&prefix, "", 1)
        .replacen(".png", ".m3u8", 1)
}

/// collects every quality variant listed in `manifest`.
pub fn scan_manifest(domain: &str, manifest: &str) -> Vec<ProxyVariant> {
    let variants: Vec<ProxyVariant> = proxy_lines(manifest)
        .into_iter()
        .map(|line| ProxyVariant {
            file: rewrite_proxy_path(domain, line),
            quality: decode_quality(line),
        })
        .collect();

    debug!(variants = variants.len(), "scanned manifest");
    variants
}
