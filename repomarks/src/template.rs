use repomarks_source::{Provider, RepoDescriptor, RepoSource};
use repomarks_tree::{BookmarkBuilder, Forest, Link, TreeError};
use tracing::{Instrument, debug_span, error, instrument};

use crate::error_chain;

/// Bookmark names and the path each one appends to a repository url.
fn repo_pages(provider: Provider) -> [(&'static str, &'static str); 3] {
    match provider {
        Provider::GitHub => [
            ("Pull Requests", "/pulls"),
            ("Branch: main", "/tree/main"),
            ("Branch: develop", "/tree/develop"),
        ],
        Provider::Bitbucket => [
            ("Pull Requests", "/pull-requests"),
            ("Branch: main", "/branch/main"),
            ("Branch: develop", "/branch/develop"),
        ],
    }
}

/// Drives `builder` through one provider's repositories and returns the
/// resulting forest.
///
/// Every repository gets its own `project / provider / repo` folder chain
/// opened from the forest root.
#[instrument(level = "debug", skip(builder, repos))]
pub fn apply_template(
    provider: Provider,
    builder: &mut BookmarkBuilder,
    project: &str,
    repos: &[RepoDescriptor],
) -> Result<Forest, TreeError> {
    for repo in repos {
        builder
            .root()
            .folders([project.to_owned(), provider.to_string(), repo.name.clone()])?
            .computed_links(repo_pages(provider), |(name, path)| {
                Link::new(name, format!("{}{path}", repo.url))
            });
    }
    Ok(builder.build())
}

/// Runs each source's template in order and concatenates their forests.
///
/// A source that fails to fetch contributes nothing; the failure is logged
/// and the remaining templates still run.
pub async fn run_templates(
    sources: &[Box<dyn RepoSource>],
    project_id: Option<&str>,
    project: &str,
) -> Result<Forest, TreeError> {
    let mut forest = Forest::new();
    for source in sources {
        let provider = source.provider();
        let span = debug_span!("template", template = provider.template_name());
        let repos = match source.fetch(project_id).instrument(span).await {
            Ok(repos) => repos,
            Err(err) => {
                let reason = error_chain(&err);
                match project_id {
                    Some(project_id) => {
                        error!("failed to fetch {provider} data for project {project_id}: {reason}")
                    }
                    None => error!("failed to fetch {provider} data: {reason}"),
                }
                continue;
            }
        };
        let mut builder = BookmarkBuilder::new();
        forest.extend(apply_template(provider, &mut builder, project, &repos)?);
    }
    Ok(forest)
}
