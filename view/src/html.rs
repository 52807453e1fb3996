use std::fmt::{self, Display};

use repomarks_tree::Node;

const INDENT: &str = "    ";
const TITLE: &str = "Bookmarks";

/// A forest rendered as a Netscape bookmark file.
///
/// Folders become `<H3>` headings followed by a nested `<DL>` list, links
/// become anchors. Nodes are written in forest order.
#[derive(Debug, Clone, Copy)]
pub struct HtmlDocument<'a> {
    forest: &'a [Node],
}

impl<'a> HtmlDocument<'a> {
    pub fn new(forest: &'a [Node]) -> Self {
        Self { forest }
    }
}

impl Display for HtmlDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<!DOCTYPE NETSCAPE-Bookmark-file-1>")?;
        writeln!(
            f,
            r#"<META HTTP-EQUIV="Content-Type" CONTENT="text/html; charset=UTF-8">"#
        )?;
        writeln!(f, "<TITLE>{TITLE}</TITLE>")?;
        writeln!(f, "<H1>{TITLE}</H1>")?;
        write_list(f, self.forest, 0)
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, nodes: &[Node], depth: usize) -> fmt::Result {
    let indent = INDENT.repeat(depth);
    writeln!(f, "{indent}<DL><p>")?;
    for node in nodes {
        match node {
            Node::Folder { name, children } => {
                writeln!(f, "{indent}{INDENT}<DT><H3>{}</H3>", Escaped(name))?;
                write_list(f, children, depth + 1)?;
            }
            Node::Link { name, href } => {
                writeln!(
                    f,
                    r#"{indent}{INDENT}<DT><A HREF="{}">{}</A>"#,
                    Escaped(href),
                    Escaped(name)
                )?;
            }
        }
    }
    writeln!(f, "{indent}</DL><p>")
}

struct Escaped<'a>(&'a str);

impl Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                c => write!(f, "{c}")?,
            }
        }
        Ok(())
    }
}
