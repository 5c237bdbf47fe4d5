use crate::tree::Node;

/// Layout statistics gathered in one pass over the forest before rendering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outline {
    pub max_depth: usize,
    pub max_tags_len: usize,
    pub max_size_len: usize,
    pub max_created_len: usize,
    pub print_size: bool,
    pub print_created: bool,
    /// Some image in the forest has at least one container
    pub print_containers: bool,
}

impl Outline {
    /// Sorts siblings by tags, stamps `depth`/`is_end` on every node and returns
    /// the column widths needed to align the rendered tree.
    pub fn profile(root: &mut Node, print_size: bool, print_created: bool) -> Self {
        let mut outline = Self {
            print_size,
            print_created,
            ..Self::default()
        };
        outline.visit(root);
        outline
    }

    fn visit(&mut self, node: &mut Node) {
        self.max_depth = self.max_depth.max(node.depth);

        // Tags are padded only if something is printed after them
        let tags_len = node.tags.chars().count();
        if !node.containers.is_empty() || self.print_size || self.print_created {
            self.max_tags_len = self.max_tags_len.max(tags_len);
        }
        self.max_size_len = self.max_size_len.max(node.size.chars().count());
        self.max_created_len = self.max_created_len.max(node.created.chars().count());
        if !node.containers.is_empty() {
            self.print_containers = true;
        }

        // sort_by is stable, equal tags keep their discovery order
        node.children.sort_by(|a, b| a.tags.cmp(&b.tags));

        let last = node.children.len().saturating_sub(1);
        let depth = node.depth + 1;
        for (i, child) in node.children.iter_mut().enumerate() {
            child.depth = depth;
            child.is_end = i == last;
            self.visit(child);
        }
    }
}
