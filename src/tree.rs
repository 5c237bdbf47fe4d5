//! Image derivation forest.
//!
//! [`Node::build`] turns flat inventory records into a forest owned by one synthetic
//! root node. Every image ends up exactly once in the forest:
//! - images whose parent reference resolves hang under that parent,
//! - images with an empty, unknown or self-referencing parent hang under the root,
//! - images whose parent chain loops back onto themselves are detached onto the root.
//!
//! [`Node::remove_intermediates`] then collapses anonymous pass-through layers so the
//! tree shows only images a user would recognise.

use crate::format::{format_age_at, format_size, format_tags, UNTAGGED};
use crate::inventory::{ContainerRecord, ImageRecord};
use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use log::{debug, trace, warn};
use std::collections::HashMap;

/// Id carried by the synthetic root; real image ids never take this form
pub const ROOT_ID: &str = "<root>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: String,
    pub parent_id: String,
    pub tags: String,
    pub size: String,
    pub created: String,
    pub children: Vec<Node>,
    /// Container names in discovery order
    pub containers: Vec<String>,
    /// Root is 1. Valid after profiling.
    pub depth: usize,
    pub is_root: bool,
    /// Last among its siblings. Valid after profiling.
    pub is_end: bool,
}

impl Node {
    /// Synthetic root that owns every image without a resolvable parent
    pub fn root() -> Self {
        Self {
            id: ROOT_ID.to_string(),
            parent_id: String::new(),
            tags: String::new(),
            size: String::new(),
            created: String::new(),
            children: Vec::new(),
            containers: Vec::new(),
            depth: 1,
            is_root: true,
            is_end: false,
        }
    }

    fn from_record(image: &ImageRecord, now: DateTime<Utc>) -> Self {
        Self {
            id: image.id.clone(),
            parent_id: image.parent.clone(),
            tags: format_tags(&image.tags),
            size: format_size(image.size),
            created: format_age_at(image.created, now),
            children: Vec::new(),
            containers: Vec::new(),
            depth: 0,
            is_root: false,
            is_end: false,
        }
    }

    /// Builds the image forest and attaches containers to their images.
    ///
    /// `now` is the reference point for the relative "created" column.
    ///
    /// # Errors
    /// Fails if a container references an image id that is not in `images`.
    pub fn build(
        images: &[ImageRecord],
        containers: &[ContainerRecord],
        now: DateTime<Utc>,
    ) -> Result<Node> {
        let mut nodes: Vec<Node> = Vec::with_capacity(images.len());
        let mut index: HashMap<String, usize> = HashMap::with_capacity(images.len());

        for image in images {
            if index.contains_key(&image.id) {
                warn!("Ignoring duplicate image record {}", image.id);
                continue;
            }
            index.insert(image.id.clone(), nodes.len());
            nodes.push(Node::from_record(image, now));
        }
        debug!("Indexed {} images", nodes.len());

        for container in containers {
            let slot = index.get(&container.image_id).copied().ok_or_else(|| {
                anyhow!(
                    "Container {} references unknown image {}",
                    container.id,
                    container.image_id
                )
            })?;
            nodes[slot]
                .containers
                .extend(container.display_names().map(str::to_string));
        }

        // Second pass, so a child listed before its parent still resolves
        let mut parents: Vec<Option<usize>> = nodes
            .iter()
            .enumerate()
            .map(|(slot, node)| {
                index
                    .get(&node.parent_id)
                    .copied()
                    .filter(|&parent| parent != slot)
            })
            .collect();

        for slot in break_cycles(&mut parents) {
            warn!(
                "Image {} is part of a parent cycle, attaching it to the root",
                nodes[slot].id
            );
        }

        let mut children_of: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
        let mut top_level = Vec::new();
        for (slot, parent) in parents.iter().enumerate() {
            match parent {
                Some(parent) => children_of[*parent].push(slot),
                None => {
                    trace!("Image {} has no local parent", nodes[slot].id);
                    top_level.push(slot);
                }
            }
        }

        let mut slots: Vec<Option<Node>> = nodes.into_iter().map(Some).collect();
        let mut root = Node::root();
        root.children = top_level
            .into_iter()
            .filter_map(|slot| assemble(slot, &mut slots, &children_of))
            .collect();

        Ok(root)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Untagged, has children and no container was created from it
    pub fn is_collapsible(&self) -> bool {
        self.tags == UNTAGGED && !self.children.is_empty() && self.containers.is_empty()
    }

    /// Replaces every collapsible descendant by its own children, in place.
    ///
    /// Spliced-in children are examined again before the scan moves on, so chains
    /// of anonymous layers collapse in a single call. Order among survivors is the
    /// order a depth-first flattening would produce.
    pub fn remove_intermediates(&mut self) {
        let mut pending: Vec<Node> = std::mem::take(&mut self.children);
        pending.reverse();

        let mut kept = Vec::with_capacity(pending.len());
        while let Some(child) = pending.pop() {
            if child.is_collapsible() {
                trace!("Collapsing intermediate image {}", child.id);
                pending.extend(child.children.into_iter().rev());
            } else {
                kept.push(child);
            }
        }
        self.children = kept;

        for child in &mut self.children {
            child.remove_intermediates();
        }
    }
}

/// Detaches images whose parent chain leads back to themselves.
/// Returns the detached slots in input order.
fn break_cycles(parents: &mut [Option<usize>]) -> Vec<usize> {
    let mut detached = Vec::new();
    for start in 0..parents.len() {
        let mut current = parents[start];
        let mut steps = 0;
        while let Some(slot) = current {
            if slot == start {
                parents[start] = None;
                detached.push(start);
                break;
            }
            steps += 1;
            // Stuck in a loop that does not contain `start`; a later slot will break it
            if steps > parents.len() {
                break;
            }
            current = parents[slot];
        }
    }
    detached
}

fn assemble(slot: usize, slots: &mut [Option<Node>], children_of: &[Vec<usize>]) -> Option<Node> {
    let mut node = slots[slot].take()?;
    node.children = children_of[slot]
        .iter()
        .filter_map(|&child| assemble(child, slots, children_of))
        .collect();
    Some(node)
}
