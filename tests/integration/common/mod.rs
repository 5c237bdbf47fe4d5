//! Common utilities for integration tests

use anyhow::Result;
use ditree::{Source, TreeOptions, TreeProcessor};

/// Prints the tree of `source` with `options` and returns its lines
#[allow(dead_code)]
pub fn print_tree<S: Source>(source: S, options: TreeOptions) -> Result<Vec<String>> {
    let mut out = Vec::new();
    TreeProcessor::new(source).print(&options, &mut out)?;
    Ok(String::from_utf8(out)?.lines().map(str::to_string).collect())
}

/// Every id reported by `source` is a full `sha256:` digest, and container images are known
#[allow(dead_code)]
pub fn assert_consistent_inventory<S: Source>(source: &S) -> Result<()> {
    let images = source.list_images()?;
    let containers = source.list_containers()?;

    for image in &images {
        assert!(
            image.id.starts_with("sha256:"),
            "Unexpected image id {}",
            image.id
        );
    }
    for container in &containers {
        assert!(
            images.iter().any(|image| image.id == container.image_id),
            "Container {} uses unlisted image {}",
            container.id,
            container.image_id
        );
    }
    Ok(())
}
