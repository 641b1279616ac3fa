use embedsu::errors::*;

use crate::args::RuntimeArgs;
use crate::constants::*;

/// accepts a bare id or an embed page url and returns what to extract.
///
/// season and episode embedded in a tv url take precedence over the ones
/// passed alongside.
pub fn normalize_target(raw: &str, season: Option<u32>, episode: Option<u32>) -> Result<RuntimeArgs> {
    let input = raw.trim();

    if CONTENT_ID_RE.is_match(input) {
        return Ok(RuntimeArgs::new(input.to_string(), season, episode));
    }

    if let Some(caps) = EMBED_LINK_RE.captures(input) {
        if let Some(id) = caps.name("movie") {
            return Ok(RuntimeArgs::new(id.as_str().to_string(), None, None));
        }

        if let (Some(id), Some(s), Some(e)) =
            (caps.name("show"), caps.name("season"), caps.name("episode"))
            && let (Ok(s), Ok(e)) = (s.as_str().parse::<u32>(), e.as_str().parse::<u32>())
        {
            return Ok(RuntimeArgs::new(id.as_str().to_string(), Some(s), Some(e)));
        }
    }

    Err(EmbedSuError::Message(format!(
        "invalid --id {input:?}: expected a TMDB id, an IMDb tt id, or an /embed/movie|tv url"
    )))
}
