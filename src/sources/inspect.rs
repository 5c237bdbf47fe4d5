//! Parsing of `image inspect` / `container inspect` JSON as printed by the docker
//! CLI and by nerdctl in its docker-compatible mode.

use anyhow::{anyhow, Context, Result};
use chrono::DateTime;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

use crate::format::UNTAGGED;
use crate::inventory::{ContainerRecord, ImageRecord};

#[derive(Debug, Clone, Deserialize)]
pub struct InspectedImage {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(default, rename = "Parent")]
    pub parent: Option<String>,
    #[serde(default, rename = "RepoTags")]
    pub repo_tags: Option<Vec<String>>,
    #[serde(default, rename = "Size")]
    pub size: i64,
    /// Left out by the daemon when the image config carries no creation date
    #[serde(default, rename = "Created")]
    pub created: Option<String>,
    #[serde(default, rename = "Config")]
    pub config: Option<InspectedConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InspectedConfig {
    #[serde(default, rename = "Image")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InspectedContainer {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(default, rename = "Name")]
    pub name: String,
    /// Image id for docker, image reference (`docker.io/library/nginx:alpine`) for nerdctl
    #[serde(rename = "Image")]
    pub image: String,
}

/// Digest algorithm prefix of a content-addressed image id
const IMAGE_ID_PREFIX: &str = "sha256:";

/// Parent reference of an inspected image.
///
/// `Config.Image`, the image this one was built from, takes precedence. The legacy
/// `Parent` layer is used only when the config names no image. Empty when neither is set.
pub fn parent_reference_of(image: &InspectedImage) -> String {
    let config_image = image
        .config
        .as_ref()
        .and_then(|config| config.image.as_deref())
        .unwrap_or_default();
    if !config_image.is_empty() {
        return config_image.to_string();
    }
    image.parent.clone().unwrap_or_default()
}

impl InspectedImage {
    pub fn into_record(self) -> Result<ImageRecord> {
        let parent = parent_reference_of(&self);
        // Missing or empty creation time counts as the epoch
        let created = match self.created.as_deref().map(str::trim) {
            None | Some("") => 0,
            Some(created) => DateTime::parse_from_rfc3339(created)
                .with_context(|| {
                    format!("Invalid creation time {:?} for image {}", created, self.id)
                })?
                .timestamp(),
        };
        let tags = self
            .repo_tags
            .unwrap_or_default()
            .into_iter()
            .filter(|tag| tag != UNTAGGED)
            .collect();

        Ok(ImageRecord {
            id: self.id,
            parent,
            tags,
            size: self.size,
            created,
        })
    }
}

impl From<InspectedContainer> for ContainerRecord {
    fn from(container: InspectedContainer) -> Self {
        ContainerRecord {
            id: container.id,
            image_id: container.image,
            names: vec![container.name],
        }
    }
}

/// Splits `--quiet` listing output into ids, keeping first occurrences only
pub fn parse_id_list(output: &str) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut ids: Vec<String> = Vec::new();
    for id in output.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if seen.insert(id) {
            ids.push(id.to_string());
        }
    }
    ids
}

/// Container image fields that are references rather than image ids, first occurrences only
pub fn unresolved_image_refs(containers: &[ContainerRecord]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    containers
        .iter()
        .map(|container| container.image_id.as_str())
        .filter(|image| !image.starts_with(IMAGE_ID_PREFIX))
        .filter(|image| seen.insert(*image))
        .map(str::to_string)
        .collect()
}

/// Rewrites container image references to image ids.
///
/// `ids_output` is `image inspect --format '{{.Id}}'` output for `refs`, one id per
/// line in the same order.
pub fn apply_image_ids(
    containers: &mut [ContainerRecord],
    refs: &[String],
    ids_output: &str,
) -> Result<()> {
    let ids: Vec<&str> = ids_output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if ids.len() != refs.len() {
        return Err(anyhow!(
            "Resolved {} image ids for {} image references",
            ids.len(),
            refs.len()
        ));
    }

    let resolved: HashMap<&str, &str> = refs.iter().map(String::as_str).zip(ids).collect();
    for container in containers.iter_mut() {
        if let Some(id) = resolved.get(container.image_id.as_str()) {
            container.image_id = id.to_string();
        }
    }
    Ok(())
}

pub fn parse_images(json: &str) -> Result<Vec<ImageRecord>> {
    let inspected: Vec<InspectedImage> =
        serde_json::from_str(json).context("Failed to parse image inspect output")?;
    inspected
        .into_iter()
        .map(InspectedImage::into_record)
        .collect()
}

pub fn parse_containers(json: &str) -> Result<Vec<ContainerRecord>> {
    let inspected: Vec<InspectedContainer> =
        serde_json::from_str(json).context("Failed to parse container inspect output")?;
    Ok(inspected.into_iter().map(ContainerRecord::from).collect())
}
