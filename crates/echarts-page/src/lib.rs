//! ECharts page generation — chart request types, HTML rendering, artifact
//! persistence, and public URL resolution.

pub mod render;
pub mod store;
pub mod types;
pub mod url;

pub use render::{canonicalize, load_template, render, DEFAULT_TEMPLATE};
pub use store::ArtifactStore;
pub use types::*;
pub use url::resolve_public_url;
