//! Docker integration tests
//!
//! Reads the inventory of the local Docker daemon. The daemon's content is not
//! controlled here, so only structural properties are checked.

#[cfg(all(test, feature = "docker"))]
mod tests {
    use crate::integration::common::*;
    use ditree::sources::{DockerSource, Source};
    use ditree::TreeOptions;

    #[test]
    fn test_docker_source_creation() {
        let docker_source = DockerSource::new();
        assert!(
            docker_source.is_ok(),
            "Should be able to create DockerSource"
        );

        let source = docker_source.unwrap();
        assert_eq!(source.name(), "docker");
    }

    #[test]
    fn test_docker_inventory_is_consistent() {
        let source = DockerSource::new().expect("Should create DockerSource");
        assert_consistent_inventory(&source).expect("Should read Docker inventory");
    }

    #[test]
    fn test_docker_tree_lists_every_image_with_all() {
        let source = DockerSource::new().expect("Should create DockerSource");
        let image_count = source.list_images().expect("Should list images").len();

        let lines = print_tree(
            source,
            TreeOptions {
                include_intermediate: true,
                ..TreeOptions::default()
            },
        )
        .expect("Should print tree");

        // Header plus one line per image
        assert_eq!(lines.len(), image_count + 1);
        assert!(lines[0].contains("IMAGE ID"));
    }

    #[test]
    fn test_docker_pruned_tree_is_not_larger() {
        let all = print_tree(
            DockerSource::new().expect("Should create DockerSource"),
            TreeOptions {
                include_intermediate: true,
                ..TreeOptions::default()
            },
        )
        .expect("Should print full tree");
        let pruned = print_tree(
            DockerSource::new().expect("Should create DockerSource"),
            TreeOptions::default(),
        )
        .expect("Should print pruned tree");

        assert!(pruned.len() <= all.len());
    }
}
