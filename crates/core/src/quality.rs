use base64::Engine;
use tracing::debug;

use crate::decoder::LENIENT_BASE64;

/// resolution assumed when a proxy path carries no readable size token.
pub const DEFAULT_QUALITY: u32 = 1080;

/// reads the base64 size token (second-to-last path segment) of a proxy line.
pub fn decode_quality(line: &str) -> u32 {
    let segments: Vec<&str> = line.split('/').collect();
    let token = segments
        .len()
        .checked_sub(2)
        .and_then(|idx| segments.get(idx))
        .copied();

    let quality = token
        .and_then(|token| LENIENT_BASE64.decode(token.trim()).ok())
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .and_then(|text| text.trim().parse::<u32>().ok())
        .filter(|quality| *quality > 0);

    quality.unwrap_or_else(|| {
        debug!(?token, "unreadable size token; assuming {DEFAULT_QUALITY}p");
        DEFAULT_QUALITY
    })
}

pub fn quality_label(quality: u32) -> String {
    format!("{quality}p")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_size_token() {
        assert_eq!(decode_quality("/api/proxy/viper/cdn.host/NzIw/index.png"), 720);
        assert_eq!(decode_quality("/proxy/viper/MTA4MA==/poster.png"), 1080);
        assert_eq!(decode_quality("/proxy/viper/NDgw/poster.png"), 480);
    }

    #[test]
    fn accepts_unpadded_token() {
        assert_eq!(decode_quality("/proxy/viper/MzYw/poster.png"), 360);
        assert_eq!(decode_quality("/proxy/viper/MTA4MA/poster.png"), 1080);
    }

    #[test]
    fn trims_decoded_token() {
        // base64 of " 720 "
        assert_eq!(decode_quality("/proxy/viper/IDcyMCA=/poster.png"), 720);
    }

    #[test]
    fn falls_back_on_bad_token() {
        // not base64
        assert_eq!(decode_quality("/proxy/viper/%%%/poster.png"), DEFAULT_QUALITY);
        // base64 of "abc"
        assert_eq!(decode_quality("/proxy/viper/YWJj/poster.png"), DEFAULT_QUALITY);
        // base64 of "0"
        assert_eq!(decode_quality("/proxy/viper/MA==/poster.png"), DEFAULT_QUALITY);
        assert_eq!(decode_quality("poster.png"), DEFAULT_QUALITY);
        assert_eq!(decode_quality(""), DEFAULT_QUALITY);
    }

    #[test]
    fn labels_with_suffix() {
        assert_eq!(quality_label(decode_quality("/proxy/NzIw/a.png")), "720p");
        assert_eq!(quality_label(decode_quality("/proxy/!!/a.png")), "1080p");
    }
}
