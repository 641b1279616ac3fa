use clap::Args;

use embedsu::prelude::*;

#[derive(Debug, Clone, Args)]
pub struct AppArgs {
    /// Logging verbosity (error, warn, info, debug)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Use interactive prompts to edit arguments before execution
    #[arg(short, long)]
    pub interactive: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ClientArgs {
    /// Upstream origin
    #[arg(long, env = "EMBEDSU_DOMAIN", default_value = DEFAULT_DOMAIN)]
    pub domain: String,

    /// User-Agent sent with every request
    #[arg(long, env = "EMBEDSU_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "EMBEDSU_TIMEOUT", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout: u64,

    /// How many servers to resolve at once
    #[arg(long, env = "EMBEDSU_CONCURRENCY", default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,
}

#[derive(Debug, Clone, Args)]
pub struct ResolveArgs {
    /// TMDB id (or an embed page url)
    #[arg(long)]
    pub id: Option<String>,

    /// Season number; requires --episode
    #[arg(short, long, requires = "episode")]
    pub season: Option<u32>,

    /// Episode number; requires --season
    #[arg(short, long, requires = "season")]
    pub episode: Option<u32>,

    #[command(flatten)]
    pub client: ClientArgs,

    #[command(flatten)]
    pub app_args: AppArgs,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeArgs {
    pub id: String,
    pub season: Option<u32>,
    pub episode: Option<u32>,
}

impl RuntimeArgs {
    pub fn new(id: String, season: Option<u32>, episode: Option<u32>) -> Self {
        Self {
            id,
            season,
            episode,
        }
    }

    pub fn request(&self) -> ContentRequest {
        ContentRequest::from_parts(self.id.clone(), self.season, self.episode)
    }
}
