//! Bookmark trees and the cursor-based builder that assembles them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Folder { name: String, children: Vec<Node> },
    Link { name: String, href: String },
}

pub type Forest = Vec<Node>;

impl Node {
    pub fn folder(name: impl Into<String>, children: Vec<Node>) -> Self {
        Self::Folder {
            name: name.into(),
            children,
        }
    }

    pub fn link(name: impl Into<String>, href: impl Into<String>) -> Self {
        Self::Link {
            name: name.into(),
            href: href.into(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Node::Folder { name, .. } => name,
            Node::Link { name, .. } => name,
        }
    }

    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Folder { children, .. } => Some(children),
            Node::Link { .. } => None,
        }
    }

    pub fn is_link(&self) -> bool {
        matches!(self, Node::Link { .. })
    }
}

/// A link waiting to be inserted by [`BookmarkBuilder::links`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub name: String,
    pub href: String,
}

impl Link {
    pub fn new(name: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            href: href.into(),
        }
    }
}

impl From<Link> for Node {
    fn from(value: Link) -> Self {
        let Link { name, href } = value;
        Node::Link { name, href }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("missing required argument: {argument}")]
    MissingArgument { argument: &'static str },
}

/// Builds a [`Forest`] through a movable insertion cursor.
///
/// The cursor is the path of child indices from the forest root to the
/// folder currently being filled. Each entry is pushed when a folder is
/// opened and popped when it is closed, so the path doubles as the
/// ancestor stack and no node ever refers back to its parent.
#[derive(Debug, Clone, Default)]
pub struct BookmarkBuilder {
    forest: Forest,
    ancestors: Vec<usize>,
}

impl BookmarkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new folder at the cursor and moves the cursor into it.
    ///
    /// An empty name is rejected and leaves the builder untouched.
    pub fn folder(&mut self, name: impl Into<String>) -> Result<&mut Self, TreeError> {
        let name = name.into();
        if name.is_empty() {
            return Err(TreeError::MissingArgument { argument: "name" });
        }
        let nodes = self.cursor_mut();
        let index = nodes.len();
        nodes.push(Node::folder(name, Vec::new()));
        self.ancestors.push(index);
        Ok(self)
    }

    /// Opens each folder one level deeper than the last.
    ///
    /// Stops at the first empty name. Folders opened before it are kept.
    pub fn folders<I, S>(&mut self, names: I) -> Result<&mut Self, TreeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.folder(name)?;
        }
        Ok(self)
    }

    /// Moves the cursor back to the parent folder, or stays at the forest
    /// root when no folder is open.
    pub fn end_folder(&mut self) -> &mut Self {
        self.ancestors.pop();
        self
    }

    /// Moves the cursor to the forest root and forgets every open folder.
    pub fn root(&mut self) -> &mut Self {
        self.ancestors.clear();
        self
    }

    pub fn link(&mut self, name: impl Into<String>, href: impl Into<String>) -> &mut Self {
        self.cursor_mut().push(Node::link(name, href));
        self
    }

    pub fn links<I>(&mut self, links: I) -> &mut Self
    where
        I: IntoIterator<Item = Link>,
    {
        self.cursor_mut().extend(links.into_iter().map(Node::from));
        self
    }

    pub fn computed_links<I, F>(&mut self, items: I, create_link: F) -> &mut Self
    where
        I: IntoIterator,
        F: FnMut(I::Item) -> Link,
    {
        self.links(items.into_iter().map(create_link))
    }

    pub fn reset(&mut self) -> &mut Self {
        self.forest = Vec::new();
        self.ancestors = Vec::new();
        self
    }

    /// Takes the accumulated forest and resets the builder.
    pub fn build(&mut self) -> Forest {
        let forest = std::mem::take(&mut self.forest);
        self.reset();
        forest
    }

    /// Number of folders currently open above the cursor.
    pub fn depth(&self) -> usize {
        self.ancestors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forest.is_empty()
    }

    fn cursor_mut(&mut self) -> &mut Vec<Node> {
        let mut nodes = &mut self.forest;
        for &index in &self.ancestors {
            let Node::Folder { children, .. } = &mut nodes[index] else {
                unreachable!("ancestor path points at a link");
            };
            nodes = children;
        }
        nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json, to_value};

    const NAME: &str = "test_folderName";
    const LINK_NAME: &str = "test_linkName";
    const LINK_HREF: &str = "test_linkHref";

    fn build_json(builder: &mut BookmarkBuilder) -> Value {
        to_value(builder.build()).unwrap()
    }

    #[test]
    fn build_empty() {
        let mut builder = BookmarkBuilder::new();
        assert_eq!(builder.build(), Vec::<Node>::new());
    }

    #[test]
    fn folder_single() {
        let mut builder = BookmarkBuilder::new();
        builder.folder(NAME).unwrap();
        assert_eq!(build_json(&mut builder), json!([{ "name": NAME, "children": [] }]));
    }

    #[test]
    fn folder_nested_chain() {
        let mut builder = BookmarkBuilder::new();
        builder.folder(NAME).unwrap().folder(NAME).unwrap().folder(NAME).unwrap();
        assert_eq!(builder.depth(), 3);
        assert_eq!(
            build_json(&mut builder),
            json!([
                { "name": NAME, "children": [
                    { "name": NAME, "children": [
                        { "name": NAME, "children": [] }
                    ] }
                ] }
            ])
        );
    }

    #[test]
    fn end_folder_makes_siblings() {
        let mut builder = BookmarkBuilder::new();
        builder
            .folder("a")
            .unwrap()
            .end_folder()
            .folder("b")
            .unwrap()
            .folder("c")
            .unwrap();
        assert_eq!(
            build_json(&mut builder),
            json!([
                { "name": "a", "children": [] },
                { "name": "b", "children": [
                    { "name": "c", "children": [] }
                ] }
            ])
        );
    }

    #[test]
    fn end_folder_at_root_stays_at_root() {
        let mut builder = BookmarkBuilder::new();
        builder.end_folder().end_folder().link(LINK_NAME, LINK_HREF);
        assert_eq!(builder.depth(), 0);
        assert_eq!(
            build_json(&mut builder),
            json!([{ "name": LINK_NAME, "href": LINK_HREF }])
        );
    }

    #[test]
    fn root_when_empty() {
        let mut builder = BookmarkBuilder::new();
        builder.root();
        assert_eq!(builder.build(), Vec::<Node>::new());
    }

    #[test]
    fn root_returns_to_forest_root() {
        let mut builder = BookmarkBuilder::new();
        builder.folder(NAME).unwrap().root();
        builder.folder(NAME).unwrap().folder(NAME).unwrap().root();
        builder.link(LINK_NAME, LINK_HREF);
        assert_eq!(
            build_json(&mut builder),
            json!([
                { "name": NAME, "children": [] },
                { "name": NAME, "children": [
                    { "name": NAME, "children": [] }
                ] },
                { "name": LINK_NAME, "href": LINK_HREF }
            ])
        );
    }

    #[test]
    fn root_clears_ancestors() {
        let mut builder = BookmarkBuilder::new();
        builder.folder("a").unwrap().folder("b").unwrap().root().end_folder();
        assert_eq!(builder.depth(), 0);
        builder.link(LINK_NAME, LINK_HREF);
        let forest = builder.build();
        assert_eq!(forest.len(), 2);
        assert!(forest[1].is_link());
    }

    #[test]
    fn reset_when_empty() {
        let mut builder = BookmarkBuilder::new();
        builder.reset();
        assert_eq!(builder.build(), Vec::<Node>::new());
    }

    #[test]
    fn reset_clears_folders() {
        let mut builder = BookmarkBuilder::new();
        builder
            .folder(NAME)
            .unwrap()
            .end_folder()
            .folder(NAME)
            .unwrap()
            .folder(NAME)
            .unwrap()
            .reset();
        assert_eq!(builder.depth(), 0);
        assert!(builder.is_empty());
        assert_eq!(builder.build(), Vec::<Node>::new());
    }

    #[test]
    fn reset_then_reuse() {
        let mut builder = BookmarkBuilder::new();
        builder.folder("a").unwrap().folder("b").unwrap().reset();
        builder.link(LINK_NAME, LINK_HREF);
        assert_eq!(builder.build(), vec![Node::link(LINK_NAME, LINK_HREF)]);
    }

    #[test]
    fn link_at_root() {
        let mut builder = BookmarkBuilder::new();
        builder.link(LINK_NAME, LINK_HREF);
        assert_eq!(
            build_json(&mut builder),
            json!([{ "name": LINK_NAME, "href": LINK_HREF }])
        );
    }

    #[test]
    fn link_at_depth() {
        let mut builder = BookmarkBuilder::new();
        builder
            .link(LINK_NAME, LINK_HREF)
            .folder(NAME)
            .unwrap()
            .link(LINK_NAME, LINK_HREF)
            .end_folder()
            .folder(NAME)
            .unwrap()
            .folder(NAME)
            .unwrap()
            .link(LINK_NAME, LINK_HREF);
        assert_eq!(
            build_json(&mut builder),
            json!([
                { "name": LINK_NAME, "href": LINK_HREF },
                { "name": NAME, "children": [
                    { "name": LINK_NAME, "href": LINK_HREF }
                ] },
                { "name": NAME, "children": [
                    { "name": NAME, "children": [
                        { "name": LINK_NAME, "href": LINK_HREF }
                    ] }
                ] }
            ])
        );
    }

    #[test]
    fn link_appends_after_existing_children() {
        let mut builder = BookmarkBuilder::new();
        builder
            .folder("outer")
            .unwrap()
            .link("first", "1")
            .folder("inner")
            .unwrap()
            .end_folder()
            .link("last", "2");
        let forest = builder.build();
        let names: Vec<&str> = forest[0]
            .children()
            .unwrap()
            .iter()
            .map(Node::name)
            .collect();
        assert_eq!(names, ["first", "inner", "last"]);
    }

    #[test]
    fn folders_matches_chained_folder() {
        let mut batched = BookmarkBuilder::new();
        batched.folders(["a", "b", "c"]).unwrap();

        let mut chained = BookmarkBuilder::new();
        chained.folder("a").unwrap().folder("b").unwrap().folder("c").unwrap();

        assert_eq!(batched.depth(), 3);
        assert_eq!(batched.build(), chained.build());
    }

    #[test]
    fn folders_keeps_names_before_failure() {
        let mut builder = BookmarkBuilder::new();
        let error = builder.folders(["a", "", "c"]).unwrap_err();
        assert_eq!(error, TreeError::MissingArgument { argument: "name" });
        assert_eq!(builder.depth(), 1);
        assert_eq!(builder.build(), vec![Node::folder("a", Vec::new())]);
    }

    #[test]
    fn links_in_order() {
        let mut builder = BookmarkBuilder::new();
        builder.links(vec![
            Link::new("one", "1"),
            Link::new("two", "2"),
            Link::new("three", "3"),
        ]);
        assert_eq!(
            build_json(&mut builder),
            json!([
                { "name": "one", "href": "1" },
                { "name": "two", "href": "2" },
                { "name": "three", "href": "3" }
            ])
        );
    }

    #[test]
    fn computed_links_matches_links() {
        let create_link = |n: u32| Link::new(format!("item {n}"), format!("https://x/{n}"));

        let mut computed = BookmarkBuilder::new();
        computed.folder(NAME).unwrap().computed_links([1, 2, 3], create_link);

        let mut direct = BookmarkBuilder::new();
        direct
            .folder(NAME)
            .unwrap()
            .links([create_link(1), create_link(2), create_link(3)]);

        assert_eq!(computed.build(), direct.build());
    }

    #[test]
    fn folder_empty_name_changes_nothing() {
        let mut builder = BookmarkBuilder::new();
        builder.folder("a").unwrap().link("l", "h");
        let error = builder.folder("").unwrap_err();
        assert_eq!(error.to_string(), "missing required argument: name");
        assert_eq!(builder.depth(), 1);
        builder.link("m", "i");
        assert_eq!(
            build_json(&mut builder),
            json!([
                { "name": "a", "children": [
                    { "name": "l", "href": "h" },
                    { "name": "m", "href": "i" }
                ] }
            ])
        );
    }

    #[test]
    fn link_name_and_href_not_validated() {
        let mut builder = BookmarkBuilder::new();
        builder.link("", "");
        assert_eq!(builder.build(), vec![Node::link("", "")]);
    }

    #[test]
    fn build_is_independent_of_builder() {
        let mut builder = BookmarkBuilder::new();
        builder.folder("a").unwrap().link("l", "h");
        let first = builder.build();
        let snapshot = first.clone();

        assert!(builder.is_empty());
        assert_eq!(builder.depth(), 0);

        builder.link("other", "x");
        let second = builder.build();

        assert_eq!(first, snapshot);
        assert_ne!(first, second);
        assert_eq!(second, vec![Node::link("other", "x")]);
    }

    #[test]
    fn deserialize_forest() {
        let forest: Forest = serde_json::from_value(json!([
            { "name": "a", "children": [{ "name": "l", "href": "h" }] },
            { "name": "m", "href": "i" }
        ]))
        .unwrap();
        assert_eq!(
            forest,
            vec![
                Node::folder("a", vec![Node::link("l", "h")]),
                Node::link("m", "i"),
            ]
        );
    }
}
