use std::collections::BTreeMap;

use futures::stream::{self, StreamExt};
use reqwest::header::{HeaderMap, HeaderValue, ORIGIN, REFERER, USER_AGENT};
use serde::Deserialize;
use tracing::{debug, info, warn};

use embedsu_core::{ItemDescriptor, decode_page, quality_label, scan_manifest};

use crate::errors::{EmbedSuError, Result};
use crate::models::*;
use crate::transport::Transport;

#[derive(Debug, Deserialize)]
struct SourceResponse {
    source: Option<String>,
    subtitles: Option<Vec<SubtitleEntry>>,
}

pub struct EmbedSuClient {
    domain: String,
    user_agent: String,
    concurrency: usize,
    transport: Box<dyn Transport>,
}

impl EmbedSuClient {
    pub(crate) fn new(
        domain: String,
        user_agent: String,
        concurrency: usize,
        transport: Box<dyn Transport>,
    ) -> Self {
        Self {
            domain,
            user_agent,
            concurrency,
            transport,
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if let Ok(v) = HeaderValue::from_str(&self.user_agent) {
            headers.insert(USER_AGENT, v);
        }

        if let Ok(v) = HeaderValue::from_str(&self.domain) {
            headers.insert(REFERER, v.clone());
            headers.insert(ORIGIN, v);
        }

        headers
    }

    /// headers attached to every source group so players can fetch the streams.
    pub fn playback_headers(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("User-Agent".to_string(), self.user_agent.clone()),
            ("Referer".to_string(), self.domain.clone()),
            ("Origin".to_string(), self.domain.clone()),
        ])
    }

    pub fn embed_url(&self, request: &ContentRequest) -> String {
        format!("{}/{}", self.domain, request.embed_path())
    }

    /// downloads the embed page html for a movie or episode.
    pub async fn fetch_embed_page(&self, request: &ContentRequest) -> Result<String> {
        let url = self.embed_url(request);
        info!(%url, "fetching embed page");
        self.transport.get_text(&url, &self.headers()).await
    }

    /// looks up the direct source and subtitles of one descriptor.
    pub async fn resolve_item(&self, item: &ItemDescriptor) -> Result<ResolvedItem> {
        if item.hash.is_empty() {
            return Err(EmbedSuError::MissingHash);
        }

        let url = format!("{}/api/e/{}", self.domain, item.hash);
        let body = self.transport.get_text(&url, &self.headers()).await?;
        let parsed: SourceResponse =
            serde_json::from_str(&body).map_err(|source| EmbedSuError::Json {
                context: format!("parsing item response for {}", item.hash),
                source,
            })?;

        let source_url = parsed
            .source
            .filter(|source| !source.is_empty())
            .ok_or_else(|| EmbedSuError::MissingSource {
                hash: item.hash.clone(),
            })?;

        Ok(ResolvedItem {
            source_url,
            subtitles: parsed.subtitles.unwrap_or_default(),
        })
    }

    /// fetches the source manifest and lists its quality variants.
    pub async fn fetch_variants(&self, resolved: &ResolvedItem) -> Result<Vec<QualityVariant>> {
        let manifest = self
            .transport
            .get_text(&resolved.source_url, &self.headers())
            .await?;

        let variants = scan_manifest(&self.domain, &manifest)
            .into_iter()
            .map(|variant| QualityVariant {
                file: variant.file,
                kind: "hls".to_string(),
                quality: quality_label(variant.quality),
                lang: "en".to_string(),
            })
            .collect();

        Ok(variants)
    }

    async fn resolve_group(
        &self,
        item: &ItemDescriptor,
    ) -> Result<(SourceGroup, Vec<SubtitleTrack>)> {
        let resolved = self.resolve_item(item).await?;
        let files = self.fetch_variants(&resolved).await?;

        if files.is_empty() {
            return Err(EmbedSuError::NoVariants {
                hash: item.hash.clone(),
            });
        }

        let tracks = resolved
            .subtitles
            .iter()
            .filter_map(SubtitleEntry::to_track)
            .collect::<Vec<_>>();

        debug!(
            hash = %item.hash,
            name = ?item.name(),
            variants = files.len(),
            subtitles = tracks.len(),
            "resolved item"
        );

        let group = SourceGroup {
            provider: PROVIDER.to_string(),
            files,
            headers: self.playback_headers(),
        };

        Ok((group, tracks))
    }

    /// runs the whole pipeline, surfacing the first failure before any item
    /// is resolved. failures of single items are logged and skipped.
    pub async fn try_extract(&self, request: &ContentRequest) -> Result<ExtractionResult> {
        let html = self.fetch_embed_page(request).await?;
        let items = decode_page(&html)?;
        info!(items = items.len(), "decoded embed payload");

        // `buffered` yields in input order regardless of completion order
        let outcomes: Vec<_> = stream::iter(&items)
            .map(|item| self.resolve_group(item))
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut result = ExtractionResult::default();

        for (item, outcome) in items.iter().zip(outcomes) {
            match outcome {
                Ok((group, tracks)) => {
                    result.sources.push(group);
                    result.subtitles.extend(tracks);
                }
                Err(err) => {
                    warn!(hash = %item.hash, error = %err, "skipping item");
                }
            }
        }

        Ok(result)
    }

    /// extracts sources and subtitles; every failure resolves to an empty result.
    pub async fn extract(&self, request: &ContentRequest) -> ExtractionResult {
        let content_id = &request.content_id;

        match self.try_extract(request).await {
            Ok(result) => {
                info!(
                    %content_id,
                    sources = result.sources.len(),
                    subtitles = result.subtitles.len(),
                    "extraction finished"
                );
                result
            }
            Err(EmbedSuError::Decode(err)) if err.is_not_found() => {
                info!(%content_id, reason = %err, "no playable content");
                ExtractionResult::default()
            }
            Err(err) => {
                warn!(%content_id, error = %err, "extraction failed");
                ExtractionResult::default()
            }
        }
    }
}
