use inquire::*;
use embedsu::errors::*;

use crate::args::*;
use crate::utils::*;

fn prompt_number(message: &str, initial: Option<u32>) -> Result<u32> {
    let mut prompt = CustomType::<u32>::new(message).with_error_message("please type a number");
    if let Some(initial) = initial {
        prompt = prompt.with_default(initial);
    }

    prompt
        .prompt()
        .map_err(|err| EmbedSuError::Message(format!("failed to read {message} {err}")))
}

pub fn prompt_for_args(args: &ResolveArgs) -> Result<RuntimeArgs> {
    let id_default = args.id.clone().unwrap_or_default();

    let id = Text::new("id:")
        .with_help_message("TMDB id, IMDb tt id, or an embed url")
        .with_initial_value(&id_default)
        .prompt()
        .map_err(|err| EmbedSuError::Message(format!("failed to read id: {err}")))?;

    let target = normalize_target(&id, args.season, args.episode)?;
    if target.id != id.trim() {
        // an embed url already names the movie or episode
        return Ok(target);
    }

    let kinds = vec!["movie", "tv"];
    let start = usize::from(target.season.is_some());
    let kind = Select::new("kind:", kinds)
        .with_starting_cursor(start)
        .prompt()
        .map_err(|err| EmbedSuError::Message(format!("failed to read kind: {err}")))?;

    if kind == "movie" {
        return Ok(RuntimeArgs::new(target.id, None, None));
    }

    let season = prompt_number("season:", target.season)?;
    let episode = prompt_number("episode:", target.episode)?;

    Ok(RuntimeArgs::new(target.id, Some(season), Some(episode)))
}
