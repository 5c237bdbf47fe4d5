use anyhow::{anyhow, Context, Result};
use log::{debug, trace};
use std::process::Command;

use super::inspect;
use crate::inventory::{ContainerRecord, ImageRecord};

/// Ids per `inspect` invocation, keeps the command line well below ARG_MAX
const INSPECT_BATCH: usize = 500;

/// Thin wrapper over a docker-compatible runtime CLI binary
#[derive(Debug, Clone)]
pub struct RuntimeCli {
    binary: &'static str,
}

impl RuntimeCli {
    /// Checks that `binary --version` runs successfully
    pub fn probe(binary: &'static str) -> Result<Self> {
        let output = Command::new(binary)
            .arg("--version")
            .output()
            .with_context(|| format!("Failed to execute {}. Is it installed?", binary))?;

        if !output.status.success() {
            return Err(anyhow!("{} is not available", binary));
        }

        debug!(
            "Using {}",
            String::from_utf8_lossy(&output.stdout).trim()
        );
        Ok(Self { binary })
    }

    fn run_command(&self, args: &[&str]) -> Result<String> {
        trace!("Running {} {}", self.binary, args.join(" "));
        let output = Command::new(self.binary)
            .args(args)
            .output()
            .with_context(|| format!("Failed to execute {} command: {:?}", self.binary, args))?;

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("{} command failed: {}", self.binary, error.trim()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    fn inspect_all(&self, object: &str, ids: &[String]) -> Result<Vec<String>> {
        ids.chunks(INSPECT_BATCH)
            .map(|chunk| {
                let mut args = vec![object, "inspect"];
                args.extend(chunk.iter().map(String::as_str));
                self.run_command(&args)
            })
            .collect()
    }

    pub fn list_images(&self) -> Result<Vec<ImageRecord>> {
        let listing = self.run_command(&["image", "ls", "--all", "--quiet", "--no-trunc"])?;
        let ids = inspect::parse_id_list(&listing);
        debug!("{} reported {} images", self.binary, ids.len());

        let mut images = Vec::with_capacity(ids.len());
        for json in self.inspect_all("image", &ids)? {
            images.extend(inspect::parse_images(&json)?);
        }
        Ok(images)
    }

    pub fn list_containers(&self) -> Result<Vec<ContainerRecord>> {
        let listing = self.run_command(&["container", "ls", "--all", "--quiet", "--no-trunc"])?;
        let ids = inspect::parse_id_list(&listing);
        debug!("{} reported {} containers", self.binary, ids.len());

        let mut containers = Vec::with_capacity(ids.len());
        for json in self.inspect_all("container", &ids)? {
            containers.extend(inspect::parse_containers(&json)?);
        }

        let refs = inspect::unresolved_image_refs(&containers);
        if !refs.is_empty() {
            debug!("Resolving {} image references to ids", refs.len());
            let ids_output = self.resolve_image_ids(&refs)?;
            inspect::apply_image_ids(&mut containers, &refs, &ids_output)?;
        }
        Ok(containers)
    }

    /// `image inspect --format {{.Id}}` over `refs`, one id per line in input order
    fn resolve_image_ids(&self, refs: &[String]) -> Result<String> {
        let outputs = refs
            .chunks(INSPECT_BATCH)
            .map(|chunk| {
                let mut args = vec!["image", "inspect", "--format", "{{.Id}}"];
                args.extend(chunk.iter().map(String::as_str));
                self.run_command(&args)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(outputs.concat())
    }
}
