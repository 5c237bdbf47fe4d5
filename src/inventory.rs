//! Flat inventory records as reported by a container runtime.
//!
//! Sources produce these; [`crate::tree::Node::build`] consumes them. Nothing here
//! knows about tree shape or display formatting.

/// One local image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    /// Full image id, usually `sha256:<hex>`
    pub id: String,
    /// Parent reference: an image id, an external image reference, or empty
    pub parent: String,
    /// Repository tags, empty for anonymous images
    pub tags: Vec<String>,
    /// Size in bytes
    pub size: i64,
    /// Creation time in unix seconds
    pub created: i64,
}

/// One container, running or stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerRecord {
    pub id: String,
    /// Id of the image the container was created from
    pub image_id: String,
    /// Display names, possibly prefixed with `/`
    pub names: Vec<String>,
}

impl ContainerRecord {
    /// Names with the leading path separator removed, in their original order
    pub fn display_names(&self) -> impl Iterator<Item = &str> {
        self.names
            .iter()
            .map(|name| name.strip_prefix('/').unwrap_or(name))
    }
}
