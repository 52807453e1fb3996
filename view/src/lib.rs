mod html;
mod tree;

use repomarks_tree::Node;
use thiserror::Error;

pub use crate::html::HtmlDocument;
pub use crate::tree::Tree;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to serialize bookmarks as json")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Pretty-printed structural dump of the forest.
    Json,
    /// Netscape bookmark file, importable by browsers.
    Html,
    /// Terminal tree, for eyeballing.
    Tree,
}

pub trait Render {
    fn render(&self, forest: &[Node]) -> Result<String, RenderError>;
}

impl Render for Format {
    fn render(&self, forest: &[Node]) -> Result<String, RenderError> {
        match self {
            Format::Json => Ok(serde_json::to_string_pretty(forest)?),
            Format::Html => Ok(HtmlDocument::new(forest).to_string()),
            Format::Tree => Ok(Tree::from_forest("bookmarks", forest).to_string()),
        }
    }
}
