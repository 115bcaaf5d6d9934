//! remut - send one HTTP mutation from the command line.

pub mod config;
pub mod run;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::{ArgAction, Parser};
use remut_mutate::{MutationConfig, Payload, RequestOptions, Verb};

pub use config::Config;

#[derive(Clone, Debug, Parser)]
#[command(name = "remut", version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
pub struct Cli {
    /// POST, PUT, PATCH or DELETE.
    pub verb: Verb,

    /// Path relative to the scope base.
    pub path: Option<String>,

    /// Config file (defaults to ~/.remut.toml).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Root base URL, replacing the configured one.
    #[arg(long)]
    pub root: Option<String>,

    /// Base URL used instead of the scope when --absolute is set.
    #[arg(long, requires = "absolute")]
    pub base: Option<String>,

    /// Ignore the scope base and target --base (or the root base) directly.
    #[arg(long)]
    pub absolute: bool,

    /// Extra header as `name: value`. Repeatable.
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Request timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Raw text body (POST/PUT/PATCH).
    #[arg(short, long, conflicts_with_all = ["json", "id"])]
    pub data: Option<String>,

    /// JSON body (POST/PUT/PATCH).
    #[arg(long, conflicts_with = "id")]
    pub json: Option<String>,

    /// Resource identifier appended to the path (DELETE).
    #[arg(long)]
    pub id: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

fn parse_header(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once(':')
        .ok_or_else(|| format!("invalid header `{s}`, expected `name: value`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("invalid header `{s}`, empty name"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

impl Cli {
    pub fn config(&self) -> anyhow::Result<Config> {
        Config::load(self.config.as_deref()).context("Failed to load configuration")
    }

    /// Definition of the mutation, with flag headers and timeout as its
    /// call-site options.
    pub fn mutation_config(&self) -> MutationConfig {
        let mut options = RequestOptions::default();
        for (name, value) in &self.headers {
            options.headers.insert(name, value.clone());
        }
        options.timeout = self.timeout.map(Duration::from_secs);

        let mut config = MutationConfig::new(self.verb)
            .absolute(self.absolute)
            .request_options(options);
        config.path = self.path.clone();
        config.base = self.base.clone();
        config
    }

    /// The identifier or body for this invocation, checked against the verb.
    pub fn payload(&self) -> anyhow::Result<Option<Payload>> {
        match self.verb {
            Verb::Delete => {
                if self.data.is_some() || self.json.is_some() {
                    bail!("DELETE takes --id, not a body");
                }
                Ok(self.id.clone().map(Payload::Text))
            }
            verb => {
                if self.id.is_some() {
                    bail!("--id is only valid for DELETE, use --data or --json with {verb}");
                }
                if let Some(json) = &self.json {
                    let value: serde_json::Value =
                        serde_json::from_str(json).context("--json is not valid JSON")?;
                    return Ok(Some(Payload::Json(value)));
                }
                Ok(self.data.clone().map(Payload::Text))
            }
        }
    }

    /// Filter directive for the log subscriber.
    pub fn log_filter(&self) -> Option<&'static str> {
        match self.verbose {
            0 => None,
            1 => Some("remut=debug,remut_mutate=debug"),
            _ => Some("remut=trace,remut_mutate=trace"),
        }
    }
}
