//! Nerdctl integration tests
//!
//! Same checks as the Docker tests, against containerd through nerdctl's
//! docker-compatible output.

#[cfg(all(test, feature = "nerdctl"))]
mod tests {
    use crate::integration::common::*;
    use ditree::sources::{NerdctlSource, Source};
    use ditree::TreeOptions;

    #[test]
    fn test_nerdctl_source_creation() {
        let nerdctl_source = NerdctlSource::new();
        assert!(
            nerdctl_source.is_ok(),
            "Should be able to create NerdctlSource"
        );

        let source = nerdctl_source.unwrap();
        assert_eq!(source.name(), "nerdctl");
    }

    #[test]
    fn test_nerdctl_inventory_is_consistent() {
        let source = NerdctlSource::new().expect("Should create NerdctlSource");
        assert_consistent_inventory(&source).expect("Should read nerdctl inventory");
    }

    #[test]
    fn test_nerdctl_headerless_tree() {
        let source = NerdctlSource::new().expect("Should create NerdctlSource");

        let lines = print_tree(
            source,
            TreeOptions {
                show_header: false,
                show_size: true,
                show_created: true,
                ..TreeOptions::default()
            },
        )
        .expect("Should print tree");

        assert_eq!(lines[0], ".");
    }
}
