mod config;
mod output;
mod props;
mod template;

use std::{env, error::Error, path::PathBuf};

use clap::{Args, Parser, Subcommand};
use comfy_table::Table;
use repomarks_source::{CliSource, Provider, RepoDescriptor, RepoSource, SourceError};
use repomarks_tree::{Forest, TreeError};
use repomarks_view::{Format, Render, RenderError};
use thiserror::Error as ThisError;
use tracing::{info, warn};

pub use crate::config::{CONFIG_FILE_NAME, Config, ConfigError};
pub use crate::output::{OutputError, remove_existing, write_output};
pub use crate::props::{Props, PropsError};
pub use crate::template::{apply_template, run_templates};

const DEFAULT_OUTPUT: &str = "index.html";

#[derive(Parser, Debug)]
#[command(
    name = "repomarks",
    version,
    about = "Generate browser bookmarks for your repositories"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(long = "config", env = "REPOMARKS_CONFIG", global = true)]
    pub config_path: Option<PathBuf>,

    #[arg(long = "log", global = true, default_value = "info")]
    pub log: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch GitHub repository data
    FetchGithubRepoData {
        #[command(flatten)]
        project: ProjectArgs,
    },
    /// Fetch Bitbucket repository data
    FetchBitbucketRepoData {
        #[command(flatten)]
        project: ProjectArgs,
    },
    /// Check required binaries are installed
    Precheck {
        #[command(flatten)]
        templates: TemplateArgs,
    },
    /// Generate JSON bookmarks
    GenerateBookmarkJson {
        #[command(flatten)]
        generate: GenerateArgs,
    },
    /// Generate HTML bookmarks
    GenerateBookmarkHtml {
        #[command(flatten)]
        generate: GenerateArgs,

        /// Output JSON data for debugging instead of writing HTML.
        #[arg(long = "output-json")]
        output_json: bool,

        /// Where to write the HTML file.
        #[arg(long = "output")]
        output: Option<PathBuf>,
    },
    /// Print bookmarks as a tree
    Tree {
        #[command(flatten)]
        generate: GenerateArgs,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// The project ID for GitHub or Bitbucket.
    #[arg(long = "project-id", env = "REPOMARKS_PROJECT_ID")]
    pub project_id: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct TemplateArgs {
    /// Comma-separated list of templates to use.
    #[arg(long = "templates", value_delimiter = ',')]
    pub templates: Vec<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    #[command(flatten)]
    pub templates: TemplateArgs,

    /// Additional JSON metadata.
    #[arg(long = "props")]
    pub props: Option<String>,

    /// File containing additional JSON metadata.
    #[arg(long = "props-file")]
    pub props_file: Option<PathBuf>,
}

#[derive(ThisError, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Props(#[from] PropsError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error("failed to get current directory")]
    CurrentDir(#[source] std::io::Error),

    #[error("missing binaries to run template: {}", .binaries.join(", "))]
    MissingBinaries { binaries: Vec<&'static str> },
}

/// Flags merged over the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub project_id: Option<String>,
    pub templates: Vec<String>,
    pub props: Props,
    pub output: PathBuf,
}

impl Settings {
    pub async fn resolve(config: Config, args: &GenerateArgs) -> Result<Self, AppError> {
        let Config {
            project_id,
            templates,
            output,
            props,
        } = config;
        let props = if let Some(json) = &args.props {
            Props::from_json(json)?
        } else if let Some(path) = &args.props_file {
            Props::from_file(path).await?
        } else {
            props
        };
        Ok(Self {
            project_id: args.project.project_id.clone().or(project_id),
            templates: if args.templates.templates.is_empty() {
                templates
            } else {
                args.templates.templates.clone()
            },
            props,
            output: output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
        })
    }

    /// Name of the top folder each template opens.
    pub fn project(&self) -> &str {
        self.props
            .project_id()
            .or(self.project_id.as_deref())
            .unwrap_or_default()
    }
}

/// Formats an error followed by each of its causes, separated by `: `.
pub fn error_chain(err: &(dyn Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Parses template names, warning about and dropping unknown ones.
pub fn providers(templates: &[String]) -> Vec<Provider> {
    templates
        .iter()
        .filter_map(|template| match template.parse() {
            Ok(provider) => Some(provider),
            Err(err) => {
                warn!("{err}");
                None
            }
        })
        .collect()
}

pub async fn get_config(cli: &Cli) -> Result<Config, AppError> {
    let config = match &cli.config_path {
        Some(path) => Config::load(path).await?,
        None => {
            let dir = env::current_dir().map_err(AppError::CurrentDir)?;
            Config::load_default(&dir).await?
        }
    };
    Ok(config)
}

pub async fn run(cli: Cli) -> Result<(), AppError> {
    let config = get_config(&cli).await?;
    match cli.command {
        Command::FetchGithubRepoData { project } => {
            cmd_fetch(config, Provider::GitHub, project).await
        }
        Command::FetchBitbucketRepoData { project } => {
            cmd_fetch(config, Provider::Bitbucket, project).await
        }
        Command::Precheck { templates } => cmd_precheck(config, templates).await,
        Command::GenerateBookmarkJson { generate } => {
            cmd_generate(config, generate, Format::Json, None).await
        }
        Command::GenerateBookmarkHtml {
            generate,
            output_json,
            output,
        } => {
            let format = if output_json {
                Format::Json
            } else {
                Format::Html
            };
            cmd_generate(config, generate, format, output).await
        }
        Command::Tree { generate } => cmd_generate(config, generate, Format::Tree, None).await,
    }
}

async fn cmd_fetch(
    config: Config,
    provider: Provider,
    project: ProjectArgs,
) -> Result<(), AppError> {
    let project_id = project.project_id.or(config.project_id);
    let repos = CliSource::new(provider)
        .fetch(project_id.as_deref())
        .await?;
    info!("Fetched {provider} data: {} repositories", repos.len());
    print_repos(&repos);
    Ok(())
}

async fn cmd_precheck(config: Config, templates: TemplateArgs) -> Result<(), AppError> {
    let templates = if templates.templates.is_empty() {
        config.templates
    } else {
        templates.templates
    };

    let mut table = table(vec!["template", "binary", "installed"]);

    let mut missing = Vec::new();
    for provider in providers(&templates) {
        let installed = provider.is_installed();
        if !installed {
            missing.push(provider.binary());
        }
        table.add_row(vec![
            provider.template_name(),
            provider.binary(),
            if installed { "yes" } else { "no" },
        ]);
    }
    println!("{table}");

    if !missing.is_empty() {
        return Err(AppError::MissingBinaries { binaries: missing });
    }
    info!("All required binaries are installed.");
    Ok(())
}

async fn cmd_generate(
    config: Config,
    generate: GenerateArgs,
    format: Format,
    output: Option<PathBuf>,
) -> Result<(), AppError> {
    let settings = Settings::resolve(config, &generate).await?;
    let output = output.unwrap_or_else(|| settings.output.clone());
    if format == Format::Html {
        remove_existing(&output).await?;
    }

    let forest = generate_forest(&settings).await?;
    let rendered = format.render(&forest)?;

    match format {
        Format::Html => write_output(&output, &rendered).await?,
        Format::Json | Format::Tree => println!("{rendered}"),
    }
    Ok(())
}

pub async fn generate_forest(settings: &Settings) -> Result<Forest, AppError> {
    let sources: Vec<Box<dyn RepoSource>> = providers(&settings.templates)
        .into_iter()
        .map(|provider| Box::new(CliSource::new(provider)) as Box<dyn RepoSource>)
        .collect();
    let forest = run_templates(
        &sources,
        settings.project_id.as_deref(),
        settings.project(),
    )
    .await?;
    Ok(forest)
}

fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(comfy_table::presets::UTF8_FULL)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS)
        .set_content_arrangement(comfy_table::ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn print_repos(repos: &[RepoDescriptor]) {
    let mut table = table(vec!["name", "url"]);
    for RepoDescriptor { name, url } in repos {
        table.add_row(vec![name, url]);
    }
    println!("{table}")
}
