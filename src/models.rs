use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// provider name reported on every source group.
pub const PROVIDER: &str = "EmbedSu";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Episode {
    pub season: u32,
    pub episode: u32,
}

/// what to extract: a movie, or one episode of a show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRequest {
    /// upstream content id (a TMDB id).
    pub content_id: String,
    pub episode: Option<Episode>,
}

impl ContentRequest {
    pub fn movie(content_id: impl Into<String>) -> Self {
        Self {
            content_id: content_id.into(),
            episode: None,
        }
    }

    pub fn episode(content_id: impl Into<String>, season: u32, episode: u32) -> Self {
        Self {
            content_id: content_id.into(),
            episode: Some(Episode { season, episode }),
        }
    }

    /// builds a request from loose inputs.
    ///
    /// an episode is only targeted when both `season` and `episode` are set;
    /// otherwise the id is treated as a movie.
    pub fn from_parts(
        content_id: impl Into<String>,
        season: Option<u32>,
        episode: Option<u32>,
    ) -> Self {
        let content_id = content_id.into();
        match (season, episode) {
            (Some(season), Some(episode)) => Self::episode(content_id, season, episode),
            (None, None) => Self::movie(content_id),
            (season, episode) => {
                warn!(%content_id, ?season, ?episode, "season and episode must be given together; treating as movie");
                Self::movie(content_id)
            }
        }
    }

    /// path of the embed page relative to the domain.
    pub fn embed_path(&self) -> String {
        match self.episode {
            Some(Episode { season, episode }) => {
                format!("embed/tv/{}/{season}/{episode}", self.content_id)
            }
            None => format!("embed/movie/{}", self.content_id),
        }
    }
}

/// subtitle entry as returned by the item api.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SubtitleEntry {
    pub file: Option<String>,
    pub label: Option<String>,
}

impl SubtitleEntry {
    /// language code taken from the label, e.g. `en` for `en-SDH`.
    pub fn lang(&self) -> Option<String> {
        let label = self.label.as_deref().unwrap_or_default();
        let lang = label.split_once('-').map_or(label, |(lang, _)| lang).trim();
        (!lang.is_empty()).then(|| lang.to_string())
    }

    pub fn to_track(&self) -> Option<SubtitleTrack> {
        Some(SubtitleTrack {
            url: self.file.clone().unwrap_or_default(),
            lang: self.lang()?,
        })
    }
}

/// direct source of one item descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedItem {
    pub source_url: String,
    pub subtitles: Vec<SubtitleEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualityVariant {
    pub file: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// resolution label such as `720p`.
    pub quality: String,
    pub lang: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceGroup {
    pub provider: String,
    pub files: Vec<QualityVariant>,
    /// headers a player must send to fetch `files`.
    pub headers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubtitleTrack {
    pub url: String,
    pub lang: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    pub sources: Vec<SourceGroup>,
    pub subtitles: Vec<SubtitleTrack>,
}

impl ExtractionResult {
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty() && self.subtitles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(label: Option<&str>) -> SubtitleEntry {
        SubtitleEntry {
            file: Some("s.vtt".into()),
            label: label.map(String::from),
        }
    }

    #[test]
    fn movie_and_episode_paths() {
        assert_eq!(ContentRequest::movie("123").embed_path(), "embed/movie/123");
        assert_eq!(
            ContentRequest::episode("1399", 1, 2).embed_path(),
            "embed/tv/1399/1/2"
        );
    }

    #[test]
    fn from_parts_needs_both_season_and_episode() {
        assert_eq!(
            ContentRequest::from_parts("1", Some(2), Some(3)),
            ContentRequest::episode("1", 2, 3)
        );
        assert_eq!(ContentRequest::from_parts("1", Some(2), None), ContentRequest::movie("1"));
        assert_eq!(ContentRequest::from_parts("1", None, Some(3)), ContentRequest::movie("1"));
        assert_eq!(ContentRequest::from_parts("1", None, None), ContentRequest::movie("1"));
    }

    #[test]
    fn subtitle_lang_is_label_prefix() {
        assert_eq!(entry(Some("en-SDH")).lang().as_deref(), Some("en"));
        assert_eq!(entry(Some(" fr - Forced")).lang().as_deref(), Some("fr"));
        assert_eq!(entry(Some("English")).lang().as_deref(), Some("English"));
    }

    #[test]
    fn subtitle_without_lang_is_dropped() {
        assert_eq!(entry(Some("")).to_track(), None);
        assert_eq!(entry(Some("-SDH")).to_track(), None);
        assert_eq!(entry(Some("  -x")).to_track(), None);
        assert_eq!(entry(None).to_track(), None);

        assert_eq!(
            entry(Some("en-Full")).to_track(),
            Some(SubtitleTrack {
                url: "s.vtt".into(),
                lang: "en".into(),
            })
        );
    }

    #[test]
    fn empty_result_serializes_to_empty_lists() {
        let value = serde_json::to_value(ExtractionResult::default()).unwrap();
        assert_eq!(value, serde_json::json!({ "sources": [], "subtitles": [] }));
        assert!(ExtractionResult::default().is_empty());
    }

    #[test]
    fn variant_serializes_type_field() {
        let variant = QualityVariant {
            file: "https://x/a.m3u8".into(),
            kind: "hls".into(),
            quality: "720p".into(),
            lang: "en".into(),
        };

        let value = serde_json::to_value(variant).unwrap();
        assert_eq!(value["type"], "hls");
        assert_eq!(value["quality"], "720p");
    }
}
