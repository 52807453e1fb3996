use repomarks_tree::Node;
use std::fmt::Display;
use termtree::Tree as DisplayTree;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tree {
    Branch { label: String, nodes: Vec<Tree> },
    Leaf { label: String },
}

impl Tree {
    pub fn from_forest(label: impl Into<String>, forest: &[Node]) -> Self {
        Tree::Branch {
            label: label.into(),
            nodes: forest.iter().map(Tree::from).collect(),
        }
    }
}

impl Display for Tree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        DisplayTree::<String>::from(self.clone()).fmt(f)
    }
}

impl From<&Node> for Tree {
    fn from(value: &Node) -> Self {
        match value {
            Node::Folder { name, children } => Tree::Branch {
                label: name.clone(),
                nodes: children.iter().map(Tree::from).collect(),
            },
            Node::Link { name, href } => Tree::Leaf {
                label: format!("{name} ({href})"),
            },
        }
    }
}

impl From<Tree> for DisplayTree<String> {
    fn from(value: Tree) -> Self {
        match value {
            Tree::Branch { label, nodes } => DisplayTree::new(label).with_leaves(nodes),
            Tree::Leaf { label } => DisplayTree::new(label),
        }
    }
}
