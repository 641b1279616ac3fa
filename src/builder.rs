use std::time::Duration;

use crate::prelude::*;

pub const DEFAULT_DOMAIN: &str = "https://embed.su";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);
pub const DEFAULT_CONCURRENCY: usize = 4;

pub struct EmbedSuBuilder {
    domain: String,
    user_agent: String,
    timeout: Duration,
    concurrency: usize,
    transport: Option<Box<dyn Transport>>,
}

impl Default for EmbedSuBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EmbedSuBuilder {
    /// creates a builder pointed at embed.su with the default browser headers.
    pub fn new() -> Self {
        Self {
            domain: DEFAULT_DOMAIN.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            concurrency: DEFAULT_CONCURRENCY,
            transport: None,
        }
    }

    /// sets the upstream origin, e.g. `https://embed.su`.
    pub fn domain(mut self, domain: &str) -> Self {
        self.domain = domain.trim_end_matches('/').to_string();
        self
    }

    pub fn user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    /// sets the timeout applied to each outbound request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// sets how many item descriptors are resolved at once. `1` resolves
    /// them one after another.
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// replaces the reqwest transport, e.g. with an in-memory one in tests.
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Box::new(transport));
        self
    }

    /// builds an [`EmbedSuClient`] using the configured options.
    pub fn build(self) -> Result<EmbedSuClient> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => Box::new(HttpTransport::new(self.timeout)?),
        };

        Ok(EmbedSuClient::new(
            self.domain,
            self.user_agent,
            self.concurrency,
            transport,
        ))
    }
}
