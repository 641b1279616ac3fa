use std::sync::LazyLock;

use regex::Regex;

/// a TMDB numeric id or an IMDb `tt` id.
pub static CONTENT_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\d+|tt\d+)$").expect("content id regex must compile"));

pub static EMBED_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^https?://[^/]+/embed/(?:movie/(?<movie>[a-z0-9]+)|tv/(?<show>[a-z0-9]+)/(?<season>\d+)/(?<episode>\d+))/?(?:[?#].*)?$",
    )
    .expect("embed link regex must compile")
});
