pub mod format;
pub mod inventory;
pub mod outline;
pub mod processor;
pub mod render;
pub mod sources;
pub mod tree;

// Re-exports for easy access
pub use inventory::{ContainerRecord, ImageRecord};
pub use outline::Outline;
pub use processor::{TreeOptions, TreeProcessor};
pub use render::Renderer;
pub use sources::DockerSource;
pub use sources::NerdctlSource;
pub use sources::Source;
pub use tree::Node;
