use embedsu::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = EmbedSuBuilder::new().build()?;

    let request = ContentRequest::movie("550");
    let result = client.try_extract(&request).await?;

    for group in &result.sources {
        for file in &group.files {
            println!("{} {}", file.quality, file.file);
        }
    }

    for track in &result.subtitles {
        println!("subtitle [{}] {}", track.lang, track.url);
    }

    Ok(())
}
