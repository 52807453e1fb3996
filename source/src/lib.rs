//! Repository descriptors fetched from hosting provider CLIs.

use async_trait::async_trait;
use displaydoc::Display;
use repomarks_cmd::{Command, CommandError};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Provider {
    GitHub,
    Bitbucket,
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::GitHub, Provider::Bitbucket];

    /// Name used to select the provider's template.
    pub fn template_name(&self) -> &'static str {
        match self {
            Provider::GitHub => "github",
            Provider::Bitbucket => "bitbucket",
        }
    }

    /// CLI binary that must be on `PATH` to fetch from this provider.
    pub fn binary(&self) -> &'static str {
        match self {
            Provider::GitHub => "gh",
            Provider::Bitbucket => "bitbucket",
        }
    }

    pub fn is_installed(&self) -> bool {
        which::which(self.binary()).is_ok()
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::GitHub => write!(f, "GitHub"),
            Provider::Bitbucket => write!(f, "Bitbucket"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Display)]
/// unknown template: {0}
pub struct UnknownTemplate(pub String);

impl FromStr for Provider {
    type Err = UnknownTemplate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Provider::ALL
            .into_iter()
            .find(|provider| provider.template_name() == s)
            .ok_or_else(|| UnknownTemplate(s.to_owned()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoDescriptor {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Error, Display)]
pub enum SourceError {
    /// {provider} is unavailable
    Unavailable {
        provider: Provider,
        #[source]
        source: CommandError,
    },
    /// failed to parse {provider} repository data
    Parse {
        provider: Provider,
        #[source]
        source: serde_json::Error,
    },
}

#[async_trait]
pub trait RepoSource {
    fn provider(&self) -> Provider;

    async fn fetch(&self, project_id: Option<&str>) -> Result<Vec<RepoDescriptor>, SourceError>;
}

/// Fetches descriptors by shelling out to the provider's CLI.
#[derive(Debug, Clone, Copy)]
pub struct CliSource {
    provider: Provider,
}

impl CliSource {
    pub fn new(provider: Provider) -> Self {
        Self { provider }
    }

    fn command(&self, project_id: Option<&str>) -> Command {
        let mut command = Command::new(self.provider.binary());
        command.args(["repo", "view"]);
        if let Some(project_id) = project_id {
            command.arg(project_id);
        }
        match self.provider {
            Provider::GitHub => {
                command.args(["--json", "name,url"]).env("GH_PROMPT_DISABLED", "1");
            }
            Provider::Bitbucket => {
                command.arg("--json");
            }
        }
        command
    }
}

#[async_trait]
impl RepoSource for CliSource {
    fn provider(&self) -> Provider {
        self.provider
    }

    async fn fetch(&self, project_id: Option<&str>) -> Result<Vec<RepoDescriptor>, SourceError> {
        let stdout = self
            .command(project_id)
            .stdout()
            .await
            .map_err(|source| SourceError::Unavailable {
                provider: self.provider,
                source,
            })?;
        let repos = parse_descriptors(self.provider, &stdout)?;
        debug!(provider = %self.provider, count = repos.len(), "fetched repositories");
        Ok(repos)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<RepoDescriptor>),
    One(RepoDescriptor),
}

/// Parses CLI output holding either one descriptor object or an array of them.
pub fn parse_descriptors(
    provider: Provider,
    json: &str,
) -> Result<Vec<RepoDescriptor>, SourceError> {
    let parsed: OneOrMany =
        serde_json::from_str(json).map_err(|source| SourceError::Parse { provider, source })?;
    Ok(match parsed {
        OneOrMany::Many(repos) => repos,
        OneOrMany::One(repo) => vec![repo],
    })
}
