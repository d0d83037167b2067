// src/config.rs
use crate::error::AppError;
use crate::types::{PostId, ValidatedUrl};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Environment variable holding the content API base URL.
pub const API_URL_ENV: &str = "BLOG_API_URL";

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Base URL of the content API (overrides BLOG_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Page shell template file (defaults to the built-in template)
    #[arg(long, global = true)]
    pub template: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List the post IDs a build would generate
    Paths,

    /// Generate a JSON artifact and an HTML page per post
    Build {
        /// Directory the artifacts are written to
        #[arg(short, long, default_value = "out")]
        out_dir: PathBuf,

        /// Regenerate artifacts still inside their revalidation window
        #[arg(long, default_value_t = false)]
        force: bool,
    },

    /// Fetch one post and print its rendered HTML page
    Render {
        post_id: String,

        /// Render every toggle expanded
        #[arg(long, default_value_t = false)]
        expand_toggles: bool,

        /// Write the page to this file instead of stdout
        #[arg(short, long)]
        output_file: Option<PathBuf>,
    },

    /// Mount a page view, wait for its refresh and image checks, and report
    View {
        post_id: String,

        /// Build artifact to use as the initial snapshot
        #[arg(long)]
        artifact: Option<PathBuf>,
    },
}

/// Resolved configuration shared by every subcommand.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub api_base: ValidatedUrl,
    pub template_path: Option<PathBuf>,
    pub verbose: bool,
}

impl SiteConfig {
    /// Resolves the configuration from CLI input and environment.
    pub fn resolve(cli: &CommandLineInput) -> Result<Self, AppError> {
        let api_url = match &cli.api_url {
            Some(url) => url.clone(),
            None => std::env::var(API_URL_ENV).map_err(|_| {
                AppError::MissingConfiguration(format!(
                    "{} environment variable not set and --api-url not given",
                    API_URL_ENV
                ))
            })?,
        };

        Ok(SiteConfig {
            api_base: ValidatedUrl::parse(&api_url)?,
            template_path: cli.template.clone(),
            verbose: cli.verbose,
        })
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            api_base: Self::example_api_base(),
            template_path: None,
            verbose: false,
        }
    }
}

impl SiteConfig {
    fn example_api_base() -> ValidatedUrl {
        ValidatedUrl::parse("http://localhost:3000")
            .expect("Example API base should always be valid")
    }
}

/// Parses a post ID argument, reporting validation failures as configuration errors.
pub fn parse_post_id(raw: &str) -> Result<PostId, AppError> {
    Ok(PostId::new(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_subcommand() {
        let cli = CommandLineInput::try_parse_from([
            "notion-blog",
            "--api-url",
            "https://blog.example.com",
            "build",
            "--out-dir",
            "public",
            "--force",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Command::Build {
                out_dir: PathBuf::from("public"),
                force: true
            }
        );

        let config = SiteConfig::resolve(&cli).unwrap();
        assert_eq!(config.api_base.as_str(), "https://blog.example.com/");
    }

    #[test]
    fn test_parse_render_subcommand() {
        let cli = CommandLineInput::try_parse_from([
            "notion-blog",
            "render",
            "abc",
            "--expand-toggles",
        ])
        .unwrap();
        match cli.command {
            Command::Render {
                post_id,
                expand_toggles,
                output_file,
            } => {
                assert_eq!(post_id, "abc");
                assert!(expand_toggles);
                assert!(output_file.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_resolve_rejects_bad_url() {
        let cli = CommandLineInput::try_parse_from([
            "notion-blog",
            "--api-url",
            "ftp://example.com",
            "paths",
        ])
        .unwrap();
        assert!(SiteConfig::resolve(&cli).is_err());
    }

    #[test]
    fn test_parse_post_id() {
        assert!(parse_post_id("hello-world").is_ok());
        assert!(parse_post_id("a/b").is_err());
    }
}
