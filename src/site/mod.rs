// src/site/mod.rs
//! Static site generation: one JSON artifact and one HTML page per post.

mod artifact;
mod builder;

pub use artifact::{artifact_path, page_path, PageArtifact};
pub use builder::{BuildReport, PostFailure, StaticSiteBuilder};
