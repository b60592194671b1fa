use crate::error::{ConfigError, Result};
use crate::report::{self, Formatter, DEFAULT_METRIC_PREFIX, OUTPUT_TSV};
use crate::source::{
    api_root, GiteaSource, GithubSource, ListOptions, PullRequestSource, DEFAULT_BASE_URL,
};
use clap::Parser;
use std::sync::Arc;

pub const GITHUB_TOKEN_VAR: &str = "GITHUB_API_TOKEN";
pub const GITEA_TOKEN_VAR: &str = "GITEA_API_TOKEN";

#[derive(Parser, Debug, Clone)]
#[command(about = "Counts pull requests sent and reviewed per user of a repository")]
pub struct Args {
    /// Owner of the repository
    #[arg(long, default_value = "")]
    pub owner: String,
    /// Repository name
    #[arg(long, default_value = "")]
    pub repo: String,
    /// Number of most recently updated pull requests to scan
    #[arg(long = "per-page", default_value_t = 10, allow_negative_numbers = true)]
    pub per_page: i64,
    /// Review fetches in flight at once (defaults to the number of CPUs)
    #[arg(long = "max-concurrency")]
    pub max_concurrency: Option<usize>,
    /// API base url; a GitHub Enterprise or Gitea host
    #[arg(long = "base-url")]
    pub base_url: Option<String>,
    /// Skip verification of the server certificate
    #[arg(long = "insecure-skip-verify")]
    pub insecure_skip_verify: bool,
    /// Output format: tsv, sensu, markdown or json
    #[arg(long, default_value = OUTPUT_TSV)]
    pub format: String,
    /// Metric name prefix of the sensu format
    #[arg(long = "metric-prefix", default_value = DEFAULT_METRIC_PREFIX)]
    pub metric_prefix: String,
    /// Hosting platform: github or gitea
    #[arg(long, default_value = "github")]
    pub platform: String,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Platform {
    Github,
    Gitea,
}

impl Platform {
    fn parse(platform: &str) -> std::result::Result<Self, ConfigError> {
        match platform {
            "github" => Ok(Self::Github),
            "gitea" => Ok(Self::Gitea),
            unknown => Err(ConfigError::UnknownPlatform(unknown.to_string())),
        }
    }

    pub fn token_var(&self) -> &'static str {
        match self {
            Self::Github => GITHUB_TOKEN_VAR,
            Self::Gitea => GITEA_TOKEN_VAR,
        }
    }
}

/// Validated settings of one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub owner: String,
    pub repo: String,
    pub list_options: ListOptions,
    pub max_concurrency: usize,
    pub base_url: String,
    pub insecure_skip_verify: bool,
    pub platform: Platform,
    pub token: String,
    pub format: String,
    pub metric_prefix: String,
}

impl Config {
    /// Checks every setting up front so a bad value never costs a request.
    /// `env` looks up credentials by variable name.
    pub fn from_args<F>(args: Args, env: F) -> std::result::Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if args.owner.is_empty() {
            return Err(ConfigError::MissingOwner);
        }
        if args.repo.is_empty() {
            return Err(ConfigError::MissingRepo);
        }
        let per_page = u32::try_from(args.per_page)
            .ok()
            .filter(|per_page| *per_page > 0)
            .ok_or(ConfigError::InvalidPerPage(args.per_page))?;
        let max_concurrency = args.max_concurrency.unwrap_or_else(num_cpus::get);
        if max_concurrency == 0 {
            return Err(ConfigError::InvalidMaxConcurrency(max_concurrency));
        }
        report::formatter_for(&args.format, &args.metric_prefix)?;

        let platform = Platform::parse(&args.platform)?;
        let base_url = match (platform, args.base_url) {
            (_, Some(base_url)) if !base_url.is_empty() => base_url,
            (Platform::Github, _) => DEFAULT_BASE_URL.to_string(),
            (Platform::Gitea, _) => return Err(ConfigError::MissingBaseUrl(args.platform)),
        };
        if platform == Platform::Github {
            api_root(&base_url)?;
        }

        let token_var = platform.token_var();
        let token = env(token_var)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ConfigError::MissingToken(token_var.to_string()))?;

        Ok(Self {
            owner: args.owner,
            repo: args.repo,
            list_options: ListOptions::recently_updated(per_page),
            max_concurrency,
            base_url,
            insecure_skip_verify: args.insecure_skip_verify,
            platform,
            token,
            format: args.format,
            metric_prefix: args.metric_prefix,
        })
    }

    pub fn formatter(&self) -> std::result::Result<Box<dyn Formatter>, ConfigError> {
        report::formatter_for(&self.format, &self.metric_prefix)
    }

    pub fn source(&self) -> Result<Arc<dyn PullRequestSource>> {
        match self.platform {
            Platform::Github => Ok(Arc::new(GithubSource::new(
                &self.base_url,
                &self.token,
                self.insecure_skip_verify,
            )?)),
            Platform::Gitea => {
                if self.insecure_skip_verify {
                    tracing::warn!("--insecure-skip-verify is not supported for gitea, ignoring");
                }
                Ok(Arc::new(GiteaSource::new(&self.base_url, &self.token)))
            }
        }
    }
}
