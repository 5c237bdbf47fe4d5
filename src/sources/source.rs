use anyhow::Result;

use crate::inventory::{ContainerRecord, ImageRecord};

/// Source trait for reading the image and container inventory of a container runtime
pub trait Source {
    /// Returns the name of the source for identification purposes
    fn name(&self) -> &str;

    /// Lists every local image, intermediate layers included.
    /// Each record already carries its resolved parent reference.
    fn list_images(&self) -> Result<Vec<ImageRecord>>;

    /// Lists every container, running or stopped
    fn list_containers(&self) -> Result<Vec<ContainerRecord>>;
}
