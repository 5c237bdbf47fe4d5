use anyhow::Result;
use log::info;

use super::runtime::RuntimeCli;
use super::Source;
use crate::inventory::{ContainerRecord, ImageRecord};

/// Docker implementation of the Source trait.
/// Talks to whatever daemon the `docker` CLI is configured for (`DOCKER_HOST`, contexts).
pub struct DockerSource {
    cli: RuntimeCli,
}

impl DockerSource {
    pub fn new() -> Result<Self> {
        Ok(Self {
            cli: RuntimeCli::probe("docker")?,
        })
    }
}

impl Source for DockerSource {
    fn name(&self) -> &str {
        "docker"
    }

    fn list_images(&self) -> Result<Vec<ImageRecord>> {
        info!("Listing Docker images...");
        self.cli.list_images()
    }

    fn list_containers(&self) -> Result<Vec<ContainerRecord>> {
        info!("Listing Docker containers...");
        self.cli.list_containers()
    }
}
