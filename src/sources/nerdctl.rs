use anyhow::Result;
use log::info;

use super::runtime::RuntimeCli;
use super::Source;
use crate::inventory::{ContainerRecord, ImageRecord};

/// nerdctl (containerd) implementation of the Source trait.
/// Relies on nerdctl's docker-compatible inspect output.
pub struct NerdctlSource {
    cli: RuntimeCli,
}

impl NerdctlSource {
    pub fn new() -> Result<Self> {
        Ok(Self {
            cli: RuntimeCli::probe("nerdctl")?,
        })
    }
}

impl Source for NerdctlSource {
    fn name(&self) -> &str {
        "nerdctl"
    }

    fn list_images(&self) -> Result<Vec<ImageRecord>> {
        info!("Listing nerdctl images...");
        self.cli.list_images()
    }

    fn list_containers(&self) -> Result<Vec<ContainerRecord>> {
        info!("Listing nerdctl containers...");
        self.cli.list_containers()
    }
}
