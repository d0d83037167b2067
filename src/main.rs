// src/main.rs

use chrono::Utc;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion_blog::{
    deliver, extract_title, measure_snapshot, parse_post_id, AppError, BlogHttpClient,
    Command, CommandLineInput, DeliveryTarget, HttpImageValidator, OutputPlan, PageArtifact,
    PageComposer, PageSnapshot, PageView, PostRepository, RenderContext, SiteConfig,
    StaticSiteBuilder,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Sets up logging configuration.
///
/// The console logs to stderr so rendered pages can be piped from stdout.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("notion_blog.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let console_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(log_level)))
                .build("console", Box::new(console_appender)),
        )
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("console")
                .appender("file")
                .build(LevelFilter::Debug),
        )?;

    log4rs::init_config(config)?;
    log::debug!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Runs the subcommands against the configured content API.
struct BlogCommands<'a> {
    config: &'a SiteConfig,
}

impl<'a> BlogCommands<'a> {
    fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    fn client(&self) -> Result<BlogHttpClient, AppError> {
        BlogHttpClient::new(self.config.api_base.clone())
    }

    fn composer(&self) -> Result<PageComposer, AppError> {
        PageComposer::load(self.config.template_path.as_deref())
    }

    async fn run(&self, command: &Command) -> Result<(), AppError> {
        match command {
            Command::Paths => self.paths().await,
            Command::Build { out_dir, force } => self.build(out_dir, *force).await,
            Command::Render {
                post_id,
                expand_toggles,
                output_file,
            } => self.render(post_id, *expand_toggles, output_file.as_ref()).await,
            Command::View { post_id, artifact } => self.view(post_id, artifact.as_deref()).await,
        }
    }

    async fn paths(&self) -> Result<(), AppError> {
        let post_ids = self.client()?.list_post_ids().await?;
        for id in &post_ids {
            println!("/{}", id);
        }
        log::info!("{} post(s)", post_ids.len());
        Ok(())
    }

    async fn build(&self, out_dir: &Path, force: bool) -> Result<(), AppError> {
        let builder =
            StaticSiteBuilder::new(self.client()?, self.composer()?, out_dir).force(force);
        let report = builder.build(Utc::now()).await?;

        println!(
            "Built {} post(s) into {} ({} still fresh, {} failed)",
            report.generated.len(),
            builder.out_dir().display(),
            report.skipped.len(),
            report.failed.len()
        );
        for failure in &report.failed {
            eprintln!("✗ {}: {}", failure.post_id, failure.error);
        }

        report.check()
    }

    async fn render(
        &self,
        post_id: &str,
        expand_toggles: bool,
        output_file: Option<&PathBuf>,
    ) -> Result<(), AppError> {
        let post_id = parse_post_id(post_id)?;
        let snapshot = self.client()?.fetch_snapshot(&post_id).await?;
        log_snapshot(&snapshot);

        let ctx = if expand_toggles {
            RenderContext::expand_all()
        } else {
            RenderContext::new()
        };
        let page = self.composer()?.compose(&snapshot, &ctx)?;

        let target = match output_file {
            Some(path) => DeliveryTarget::WriteFile {
                path: path.clone(),
                content: page.into_string(),
            },
            None => DeliveryTarget::PrintToStdout {
                content: page.into_string(),
            },
        };
        let report = deliver(OutputPlan::new().with_operation(target));
        if !report.is_success() {
            return Err(AppError::DeliveryFailed {
                failures: report.failure_messages(),
            });
        }

        if let Some(path) = output_file {
            eprintln!("✓ Page saved to {}", path.display());
        }
        Ok(())
    }

    async fn view(&self, post_id: &str, artifact: Option<&Path>) -> Result<(), AppError> {
        let post_id = parse_post_id(post_id)?;
        let initial = match artifact {
            Some(path) => {
                let artifact = PageArtifact::load(path)?;
                if artifact.post_id != post_id {
                    log::warn!(
                        "Artifact {} belongs to post '{}', not '{}'",
                        path.display(),
                        artifact.post_id,
                        post_id
                    );
                }
                Some(artifact.to_snapshot()?)
            }
            None => None,
        };

        let mut view = PageView::new(
            Arc::new(self.client()?),
            Arc::new(HttpImageValidator::new()?),
        );
        view.mount(Some(post_id.clone()), initial);
        println!("Mounted '{}' ({:?})", post_id, view.state());

        view.wait_for_refresh().await;
        let failed_images = view.wait_for_image_checks().await;

        match view.snapshot() {
            Some(snapshot) => {
                log_snapshot(&snapshot);
                println!("Showing '{}' ({:?})", extract_title(&snapshot), view.state());
            }
            None => println!("No snapshot available for '{}'", post_id),
        }
        if view.is_image_expired() {
            println!("⚠️  {} image(s) failed to load; the page needs a rebuild", failed_images);
        }

        view.unmount();
        Ok(())
    }
}

fn log_snapshot(snapshot: &PageSnapshot) {
    let stats = measure_snapshot(snapshot);
    log::info!(
        "'{}': {} blocks ({} top-level, depth {}), {} image(s), {} unsupported",
        extract_title(snapshot),
        stats.blocks,
        stats.top_level_blocks,
        stats.deepest_nesting,
        stats.images,
        stats.unsupported
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = SiteConfig::resolve(&cli)?;

    BlogCommands::new(&config).run(&cli.command).await?;

    Ok(())
}
