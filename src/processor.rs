//! End-to-end "runtime inventory → text tree" pipeline.
//!
//! [`TreeProcessor`] pulls images and containers from a concrete
//! [`crate::sources::Source`], then:
//! - builds the derivation forest ([`Node::build`]),
//! - collapses anonymous intermediate layers unless asked to keep them,
//! - profiles the outline (sibling order, depth, column widths),
//! - renders the tree.
//!
//! The tree is rendered into memory first; nothing reaches the output unless every
//! step succeeded.

use crate::outline::Outline;
use crate::render::Renderer;
use crate::sources::Source;
use crate::tree::Node;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::{debug, info};
use std::io::Write;

/// What to show in the rendered tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeOptions {
    /// Keep untagged pass-through layers
    pub include_intermediate: bool,
    pub show_size: bool,
    pub show_created: bool,
    /// Column heading row on the root line instead of a bare glyph
    pub show_header: bool,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            include_intermediate: false,
            show_size: false,
            show_created: false,
            show_header: true,
        }
    }
}

pub struct TreeProcessor<S: Source> {
    source: S,
}

impl<S: Source> TreeProcessor<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Prints the image tree of the source to `out`, ages measured from now
    pub fn print<W: Write>(&self, options: &TreeOptions, out: &mut W) -> Result<()> {
        self.print_at(options, Utc::now(), out)
    }

    /// Prints the image tree of the source to `out`, ages measured from `now`
    pub fn print_at<W: Write>(
        &self,
        options: &TreeOptions,
        now: DateTime<Utc>,
        out: &mut W,
    ) -> Result<()> {
        let mut root = self.build_tree(options, now)?;
        let outline = Outline::profile(&mut root, options.show_size, options.show_created);
        debug!("Outline: {:?}", outline);

        let mut buffer = Vec::new();
        Renderer::new(&outline, options.show_header).render(&root, &mut buffer)?;

        out.write_all(&buffer).context("Failed to write image tree")?;
        out.flush().context("Failed to flush image tree")?;
        Ok(())
    }

    /// Fetches the inventory and returns the (optionally pruned) forest, unprofiled
    pub fn build_tree(&self, options: &TreeOptions, now: DateTime<Utc>) -> Result<Node> {
        info!("Reading inventory from {}", self.source.name());
        let images = self
            .source
            .list_images()
            .with_context(|| format!("Failed to list images from {}", self.source.name()))?;
        let containers = self
            .source
            .list_containers()
            .with_context(|| format!("Failed to list containers from {}", self.source.name()))?;
        info!(
            "Found {} images and {} containers",
            images.len(),
            containers.len()
        );

        let mut root = Node::build(&images, &containers, now)?;
        if !options.include_intermediate {
            debug!("Removing intermediate images");
            root.remove_intermediates();
        }
        Ok(root)
    }
}
