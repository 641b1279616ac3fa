use owo_colors::OwoColorize;

use embedsu::errors::*;
use embedsu::models::ExtractionResult;

pub fn render_json(result: &ExtractionResult) -> Result<String> {
    serde_json::to_string_pretty(result).map_err(|source| EmbedSuError::Json {
        context: "rendering result".to_string(),
        source,
    })
}

pub fn render_text(result: &ExtractionResult) -> String {
    let mut out = String::new();

    for (i, group) in result.sources.iter().enumerate() {
        out.push_str(&format!(
            "{} {}\n",
            format!("source {}", i + 1).bold(),
            group.provider.dimmed()
        ));

        for file in &group.files {
            out.push_str(&format!(
                "  {:>6} {} {}\n",
                file.quality.green(),
                file.kind.dimmed(),
                file.file.yellow()
            ));
        }
    }

    if !result.subtitles.is_empty() {
        out.push_str(&format!("{}\n", "subtitles".bold()));
        for track in &result.subtitles {
            out.push_str(&format!("  {:>6} {}\n", track.lang.cyan(), track.url));
        }
    }

    out
}
