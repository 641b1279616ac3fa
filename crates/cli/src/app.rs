use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;

use embedsu::prelude::*;

use crate::args::*;
use crate::logger::*;
use crate::prompt::*;
use crate::render::*;
use crate::utils::*;

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub resolve_args: ResolveArgs,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract stream urls and subtitles for a movie or episode
    Resolve(ResolveArgs),
}

impl Cli {
    fn resolve_args(&self) -> &ResolveArgs {
        match &self.command {
            Some(Commands::Resolve(args)) => args,
            None => &self.resolve_args,
        }
    }
}

#[derive(Debug)]
pub struct App {
    cli: Cli,
    logger: Arc<CliLogger>,
}

impl App {
    pub fn new() -> Self {
        let cli = Cli::parse();
        let logger = Arc::new(CliLogger::new(&cli.resolve_args().app_args.log_level));
        init_tracing(Arc::clone(&logger));
        Self { cli, logger }
    }

    /// returns false when nothing playable was found or the run failed.
    pub async fn run(&self) -> bool {
        match self.resolve(self.cli.resolve_args()).await {
            Ok(found) => found,
            Err(err) => {
                self.logger.failed(format!("{err}"));
                false
            }
        }
    }

    fn runtime_args(&self, args: &ResolveArgs) -> Result<RuntimeArgs> {
        match &args.id {
            Some(id) if !args.app_args.interactive => {
                normalize_target(id, args.season, args.episode)
            }
            _ => prompt_for_args(args),
        }
    }

    fn client(&self, args: &ClientArgs) -> Result<EmbedSuClient> {
        let mut builder = EmbedSuBuilder::new()
            .domain(&args.domain)
            .timeout(Duration::from_secs(args.timeout))
            .concurrency(args.concurrency);

        if let Some(user_agent) = &args.user_agent {
            builder = builder.user_agent(user_agent);
        }

        builder.build()
    }

    pub async fn resolve(&self, args: &ResolveArgs) -> Result<bool> {
        let logger = &self.logger;
        let runtime = self.runtime_args(args)?;
        let request = runtime.request();

        let client = self.client(&args.client)?;
        logger.debug("app", format!("embed url: {}", client.embed_url(&request)));

        let result = logger
            .while_loading(
                format!("extracting {}", request.embed_path().yellow()),
                client.extract(&request),
            )
            .await;

        if args.app_args.json {
            println!("{}", render_json(&result)?);
        } else {
            print!("{}", render_text(&result));
        }

        if result.sources.is_empty() {
            logger.failed("no playable sources found");
            return Ok(false);
        }

        logger.success(format!(
            "found {} source(s) and {} subtitle(s)",
            result.sources.len().yellow(),
            result.subtitles.len().yellow()
        ));

        Ok(true)
    }
}
