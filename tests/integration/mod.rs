//! Integration tests for ditree
//!
//! This module contains integration tests that read the inventory of a real
//! container runtime and check the shape of the resulting tree.

pub mod common;
pub mod docker;
pub mod nerdctl;
