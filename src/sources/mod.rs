//! Inventory providers.
//!
//! Every provider implements [`Source`]. The Docker and nerdctl providers shell out to
//! the runtime's CLI and parse its docker-compatible `inspect` JSON.

mod docker;
pub mod inspect;
mod nerdctl;
mod runtime;
mod source;

pub use docker::DockerSource;
pub use nerdctl::NerdctlSource;
pub use source::Source;
