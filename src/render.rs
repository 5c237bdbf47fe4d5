//! Text rendering of a profiled image forest.
//!
//! One line per node, pre-order. Each non-root line is
//! `prefix + branch + padding + title`, where the prefix carries the vertical
//! continuation bars of all ancestors and the padding stretches every id to the same
//! column regardless of depth:
//!
//! ```text
//!        IMAGE ID     TAGS        CONTAINERS
//! └─┬─── 0123456789ab os:22.04
//!   ├─── 3c9a0e51d2f4 *
//!   └─┬─ 9f1b2c3d4e5f -
//!     └─ 77aa6e8c10bd app:1.0  => web
//! ```

use crate::format::UNTAGGED;
use crate::outline::Outline;
use crate::tree::Node;
use anyhow::{Context, Result};
use std::io::Write;

/// Digest algorithm prefix skipped when excerpting ids
const ID_PREFIX: &str = "sha256:";
const ID_EXCERPT_LEN: usize = 12;

/// Root line when the header row is disabled
const ROOT_GLYPH: &str = ".";
const LEAF_PLACEHOLDER: &str = "*";
const BRANCH_PLACEHOLDER: &str = "-";

pub struct Renderer<'a> {
    outline: &'a Outline,
    header: bool,
}

impl<'a> Renderer<'a> {
    /// `header` selects a column heading row for the root instead of a bare glyph
    pub fn new(outline: &'a Outline, header: bool) -> Self {
        Self { outline, header }
    }

    /// Writes the whole tree below and including `root`
    pub fn render<W: Write>(&self, root: &Node, out: &mut W) -> Result<()> {
        self.render_node(root, "", "", out)
    }

    fn render_node<W: Write>(
        &self,
        node: &Node,
        prefix: &str,
        branch: &str,
        out: &mut W,
    ) -> Result<()> {
        let line = if node.is_root {
            self.root_line()
        } else {
            format!("{}{}{}{}", prefix, branch, self.padding(node), self.title(node))
        };
        writeln!(out, "{}", line).context("Failed to write tree output")?;

        let child_prefix = match (node.is_root, node.is_end) {
            (true, _) => prefix.to_string(),
            (false, true) => format!("{}  ", prefix),
            (false, false) => format!("{}│ ", prefix),
        };
        for child in &node.children {
            let child_branch = if child.is_end { "└─" } else { "├─" };
            self.render_node(child, &child_prefix, child_branch, out)?;
        }
        Ok(())
    }

    fn root_line(&self) -> String {
        if !self.header {
            return ROOT_GLYPH.to_string();
        }

        let outline = self.outline;
        let mut line = "  ".repeat(outline.max_depth.saturating_sub(1));
        line.push_str(" IMAGE ID    ");
        line.push_str(&format!(" {:<width$}", "TAGS", width = outline.max_tags_len));
        if outline.print_size {
            line.push_str(&format!("  {:>width$}", "SIZE", width = outline.max_size_len));
        }
        if outline.print_created {
            line.push_str(&format!(
                "  {:>width$}",
                "CREATED",
                width = outline.max_created_len
            ));
        }
        if outline.print_containers {
            line.push_str("     CONTAINERS");
        }
        line
    }

    /// Horizontal run between the branch and the id; `┬` marks a node with children
    fn padding(&self, node: &Node) -> String {
        let remaining = self.outline.max_depth.saturating_sub(node.depth);
        if node.is_leaf() {
            "──".repeat(remaining)
        } else {
            format!("┬─{}", "──".repeat(remaining.saturating_sub(1)))
        }
    }

    fn title(&self, node: &Node) -> String {
        let outline = self.outline;
        let short_id = node.id.strip_prefix(ID_PREFIX).unwrap_or(&node.id);
        let mut title = format!(" {:<len$.len$}", short_id, len = ID_EXCERPT_LEN);

        let tags = match (node.tags == UNTAGGED, node.is_leaf()) {
            (true, true) => LEAF_PLACEHOLDER,
            (true, false) => BRANCH_PLACEHOLDER,
            (false, _) => node.tags.as_str(),
        };
        title.push_str(&format!(" {:<width$}", tags, width = outline.max_tags_len));

        if outline.print_size {
            title.push_str(&format!("  {:>width$}", node.size, width = outline.max_size_len));
        }
        if outline.print_created {
            title.push_str(&format!(
                "  {:>width$}",
                node.created,
                width = outline.max_created_len
            ));
        }
        if outline.print_containers && !node.containers.is_empty() {
            title.push_str("  => ");
            title.push_str(&node.containers.join(", "));
        }
        title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, tags: &str, children: Vec<Node>) -> Node {
        Node {
            id: format!("sha256:{}", id.repeat(64 / id.len())),
            parent_id: String::new(),
            tags: tags.to_string(),
            size: "1.00 KB".to_string(),
            created: "3 hours ago".to_string(),
            children,
            containers: Vec::new(),
            depth: 0,
            is_root: false,
            is_end: false,
        }
    }

    fn render_tree(mut root: Node, size: bool, created: bool, header: bool) -> Vec<String> {
        let outline = Outline::profile(&mut root, size, created);
        let mut buffer = Vec::new();
        Renderer::new(&outline, header)
            .render(&root, &mut buffer)
            .unwrap();
        String::from_utf8(buffer)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_render_chain_with_container() {
        let mut c = node("c", "c:1", vec![]);
        c.containers.push("web".to_string());
        let mut root = Node::root();
        root.children = vec![node("a", "a:1", vec![node("b", "b:1", vec![c])])];

        let lines = render_tree(root, false, false, true);

        assert_eq!(
            lines,
            vec![
                "       IMAGE ID     TAGS     CONTAINERS",
                "└─┬─── aaaaaaaaaaaa a:1",
                "  └─┬─ bbbbbbbbbbbb b:1",
                "    └─ cccccccccccc c:1  => web",
            ]
        );
    }

    #[test]
    fn test_render_placeholders_and_continuation_bars() {
        let mut root = Node::root();
        root.children = vec![
            node("a", "a:1", vec![node("c", UNTAGGED, vec![node("d", "d:1", vec![])])]),
            node("e", UNTAGGED, vec![]),
        ];

        let lines = render_tree(root, false, false, false);

        // "<none>:<none>" sorts before "a:1"
        assert_eq!(
            lines,
            vec![
                ".",
                "├───── eeeeeeeeeeee *",
                "└─┬─── aaaaaaaaaaaa a:1",
                "  └─┬─ cccccccccccc -",
                "    └─ dddddddddddd d:1",
            ]
        );
    }

    #[test]
    fn test_render_vertical_bar_under_open_sibling() {
        let mut root = Node::root();
        root.children = vec![
            node("a", "a:1", vec![node("c", "c:1", vec![])]),
            node("b", "b:1", vec![]),
        ];

        let lines = render_tree(root, false, false, false);

        assert_eq!(
            lines,
            vec![
                ".",
                "├─┬─ aaaaaaaaaaaa a:1",
                "│ └─ cccccccccccc c:1",
                "└─── bbbbbbbbbbbb b:1",
            ]
        );
    }

    #[test]
    fn test_render_size_and_created_columns() {
        let mut big = node("a", "a:1", vec![]);
        big.size = "123 MB".to_string();
        let mut root = Node::root();
        root.children = vec![big, node("b", "bb:latest", vec![])];

        let lines = render_tree(root, true, true, true);

        assert_eq!(
            lines,
            vec![
                "   IMAGE ID     TAGS          SIZE      CREATED",
                "├─ aaaaaaaaaaaa a:1         123 MB  3 hours ago",
                "└─ bbbbbbbbbbbb bb:latest  1.00 KB  3 hours ago",
            ]
        );
    }

    #[test]
    fn test_render_pads_tags_to_widest_with_containers() {
        let mut short = node("a", "abc", vec![]);
        short.containers.push("one".to_string());
        let mut long = node("b", "abcdefghij", vec![]);
        long.containers = vec!["two".to_string(), "three".to_string()];
        let mut root = Node::root();
        root.children = vec![short, long];

        let lines = render_tree(root, false, false, true);

        assert_eq!(
            lines,
            vec![
                "   IMAGE ID     TAGS           CONTAINERS",
                "├─ aaaaaaaaaaaa abc         => one",
                "└─ bbbbbbbbbbbb abcdefghij  => two, three",
            ]
        );
    }

    #[test]
    fn test_render_short_ids_without_prefix() {
        let mut leaf = node("a", "a:1", vec![]);
        leaf.id = "abc".to_string();
        let mut root = Node::root();
        root.children = vec![leaf];

        let lines = render_tree(root, false, false, false);

        assert_eq!(lines, vec![".", "└─ abc          a:1"]);
    }

    #[test]
    fn test_render_empty_forest() {
        let lines = render_tree(Node::root(), false, false, true);
        assert_eq!(lines, vec![" IMAGE ID     TAGS"]);
    }
}
