use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

static BLOB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)JSON\.parse\(atob\(`([^`]+)").expect("blob regex must compile")
});

/// finds the inline `JSON.parse(atob(`...`))` literal in an embed page.
///
/// returns `None` when the page carries no payload, which is how upstream
/// serves titles it has nothing for.
pub fn locate_blob(html: &str) -> Option<&str> {
    let blob = BLOB_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str());

    match blob {
        Some(b) => debug!(len = b.len(), "located embed payload"),
        None => debug!("embed payload pattern not present"),
    }

    blob
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locates_literal_inside_script() {
        let html = r#"<script>window.vConfig = JSON.parse(atob(`eyJoYXNoIjoiYWJjIn0=`));</script>"#;
        assert_eq!(locate_blob(html), Some("eyJoYXNoIjoiYWJjIn0="));
    }

    #[test]
    fn pattern_is_case_insensitive() {
        let html = "json.PARSE(ATOB(`abcd`))";
        assert_eq!(locate_blob(html), Some("abcd"));
    }

    #[test]
    fn returns_first_match() {
        let html = "JSON.parse(atob(`first`)) JSON.parse(atob(`second`))";
        assert_eq!(locate_blob(html), Some("first"));
    }

    #[test]
    fn missing_pattern_is_none() {
        assert_eq!(locate_blob("<html><body>not found</body></html>"), None);
        assert_eq!(locate_blob("JSON.parse(atob(``))"), None);
    }
}
