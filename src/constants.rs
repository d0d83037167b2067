// src/constants.rs
//! Domain constants that define the operational boundaries of the blog.
//!
//! Each constant is named for the domain concept it constrains. Reading them
//! tells you how the page lifecycle is timed and how deep rendering goes.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Page lifecycle
// ---------------------------------------------------------------------------

/// How long a mounted page waits before refreshing its snapshot from the live API.
///
/// The build-time snapshot is shown first; the refresh picks up edits made in
/// Notion since the last build. It happens once per mount, never as a poll.
pub const REFRESH_DELAY: Duration = Duration::from_secs(3);

/// Staleness window of a build artifact, in seconds.
///
/// Once `generatedAt + REVALIDATE_INTERVAL_SECS` has passed, the next build
/// regenerates the artifact instead of keeping it.
pub const REVALIDATE_INTERVAL_SECS: u64 = 10;

/// Upper bound on image checks in flight for one page view.
pub const IMAGE_CHECK_CONCURRENCY: usize = 8;

/// Timeout for a single image liveness check.
pub const IMAGE_CHECK_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for content API requests.
pub const API_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Rendering boundaries
// ---------------------------------------------------------------------------

/// Maximum nesting depth when recursively rendering blocks to markup.
///
/// Children below this depth are dropped with a warning.
pub const BLOCK_MAX_RENDER_DEPTH: usize = 32;

/// Offset from a heading block's logical level to its HTML element level.
///
/// The page chrome uses `h1` for the site header and `h2` for the post title,
/// so `heading_1` renders as `h3`.
pub const HEADING_LEVEL_OFFSET: u8 = 2;

// ---------------------------------------------------------------------------
// Page chrome
// ---------------------------------------------------------------------------

/// Site header shown above every post.
pub const SITE_HEADER: &str = "Notion Blog";

/// Content of `<meta name="description">` on every page.
pub const PAGE_DESCRIPTION: &str = "Generated by create next app";

/// Content of `<meta name="viewport">` on every page.
pub const PAGE_VIEWPORT: &str = "width=device-width, initial-scale=1";

/// Favicon link target.
pub const FAVICON_HREF: &str = "/favicon.ico";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;

// ---------------------------------------------------------------------------
// Static build
// ---------------------------------------------------------------------------

/// Upper bound on snapshot fetches in flight during a build.
pub const BUILD_FETCH_CONCURRENCY: usize = 4;
