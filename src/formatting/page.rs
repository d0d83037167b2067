// src/formatting/page.rs
//! Composes a full HTML page from a snapshot: page chrome plus rendered body.

use super::block_renderer::{render_page_body, RenderContext};
use crate::constants::{FAVICON_HREF, PAGE_DESCRIPTION, PAGE_VIEWPORT, SITE_HEADER};
use crate::error::AppError;
use crate::model::{extract_title, PageSnapshot};
use crate::types::RenderedPage;
use handlebars::Handlebars;
use serde_json::json;
use std::path::Path;

const PAGE_TEMPLATE_NAME: &str = "page";
const DEFAULT_PAGE_TEMPLATE: &str = include_str!("../../templates/page.hbs");

/// Renders page snapshots into complete HTML documents.
pub struct PageComposer {
    handlebars: Handlebars<'static>,
}

impl PageComposer {
    /// A composer using the built-in page template.
    pub fn new() -> Result<Self, AppError> {
        Self::from_template_source(DEFAULT_PAGE_TEMPLATE)
    }

    /// A composer using the template at `path`, or the built-in one when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let Some(path) = path else {
            return Self::new();
        };
        let source = std::fs::read_to_string(path).map_err(|e| AppError::TemplateNotFound {
            path: path.display().to_string(),
            source: e,
        })?;
        log::debug!("Loaded page template from {}", path.display());
        Self::from_template_source(&source)
    }

    fn from_template_source(source: &str) -> Result<Self, AppError> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        handlebars.register_escape_fn(|s| {
            html_escape::encode_double_quoted_attribute(s).into_owned()
        });
        handlebars
            .register_template_string(PAGE_TEMPLATE_NAME, source)
            .map_err(|e| AppError::TemplateRenderError {
                name: PAGE_TEMPLATE_NAME.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self { handlebars })
    }

    /// Renders `snapshot` into a full page.
    pub fn compose(
        &self,
        snapshot: &PageSnapshot,
        ctx: &RenderContext,
    ) -> Result<RenderedPage, AppError> {
        let title = extract_title(snapshot);
        let body = render_page_body(snapshot, ctx).to_html();

        let data = json!({
            "title": title,
            "description": PAGE_DESCRIPTION,
            "viewport": PAGE_VIEWPORT,
            "favicon": FAVICON_HREF,
            "site_header": SITE_HEADER,
            "cover": snapshot.cover().map(|c| c.url()),
            "body": body,
        });

        let html = self
            .handlebars
            .render(PAGE_TEMPLATE_NAME, &data)
            .map_err(|e| AppError::TemplateRenderError {
                name: PAGE_TEMPLATE_NAME.to_string(),
                message: e.to_string(),
            })?;

        log::debug!("Composed page '{}' ({} bytes)", title, html.len());
        Ok(RenderedPage::new(html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BlockCommon, Block, ParagraphBlock, TextBlockContent};
    use crate::types::{PageId, RichTextItem};
    use serde_json::Value;

    fn snapshot(title: &str) -> PageSnapshot {
        PageSnapshot::new(
            PageId::new_v4(),
            vec![RichTextItem::plain_text(title)],
            None,
            vec![Block::Paragraph(ParagraphBlock {
                common: BlockCommon::default(),
                content: TextBlockContent::new(vec![RichTextItem::plain_text("Body text")]),
            })],
            Value::Null,
        )
    }

    #[test]
    fn test_page_chrome() {
        let page = PageComposer::new()
            .unwrap()
            .compose(&snapshot("My <Post>"), &RenderContext::new())
            .unwrap();
        let html = page.as_str();

        assert!(html.contains("<title>My &lt;Post&gt;</title>"));
        assert!(html.contains(
            r#"<meta name="description" content="Generated by create next app">"#
        ));
        assert!(html.contains(
            r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#
        ));
        assert!(html.contains(r#"<link rel="icon" href="/favicon.ico">"#));
        assert!(html.contains("<h2 class=\"post-title\">My &lt;Post&gt;</h2>"));
        assert!(html.contains("<p>Body text</p>"));
    }

    #[test]
    fn test_custom_template_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mini.hbs");
        std::fs::write(&path, "<h1>{{title}}</h1>{{{body}}}").unwrap();

        let page = PageComposer::load(Some(&path))
            .unwrap()
            .compose(&snapshot("Hi"), &RenderContext::new())
            .unwrap();
        assert!(page.as_str().starts_with("<h1>Hi</h1><article"));
    }

    #[test]
    fn test_missing_template_file() {
        let result = PageComposer::load(Some(Path::new("/nonexistent/page.hbs")));
        assert!(matches!(result, Err(AppError::TemplateNotFound { .. })));
    }
}
