// tests/rendering.rs
//! Rendered markup of whole block trees.

mod common;

use common::*;
use notion_blog::{
    render_block, render_blocks, rich_text_to_html, Annotations, Block, BlockCommon,
    BulletedListItemBlock, MarkupNode, NumberedListItemBlock, PageComposer, RenderContext,
    RichTextItem, BLOCK_MAX_RENDER_DEPTH,
};
use pretty_assertions::assert_eq;

fn bulleted(n: u32, content: &str) -> Block {
    Block::BulletedListItem(BulletedListItemBlock {
        common: BlockCommon::new(block_id(n)),
        content: text(content),
    })
}

fn numbered(n: u32, content: &str) -> Block {
    Block::NumberedListItem(NumberedListItemBlock {
        common: BlockCommon::new(block_id(n)),
        content: text(content),
    })
}

#[test]
fn toggle_renders_collapsed_children_one_level_deeper() {
    let block = toggle(1, "Details", vec![paragraph(2, "Inside")]);
    let html = render_block(&block, 0, &RenderContext::new()).to_html();

    insta::assert_snapshot!(html, @r#"<div class="block toggle-block" data-depth="0"><details class="toggle" data-depth="0"><summary><span class="toggle-label">Details</span></summary><div class="toggle-children"><div class="block paragraph" data-depth="1"><p>Inside</p></div></div></details></div>"#);
}

#[test]
fn expanded_toggle_is_open() {
    let block = toggle(1, "Details", vec![paragraph(2, "Inside")]);
    let ctx = RenderContext::new().with_expanded(block_id(1));
    let html = render_block(&block, 0, &ctx).to_html();

    assert!(html.contains(r#"<details class="toggle" data-depth="0" open="">"#));

    let other = RenderContext::new().with_expanded(block_id(99));
    assert!(!render_block(&block, 0, &other).to_html().contains("open"));
}

#[test]
fn plain_heading_hides_children() {
    let block = heading_1(1, "Intro", false, vec![paragraph(2, "Child")]);
    let html = render_block(&block, 0, &RenderContext::expand_all()).to_html();

    insta::assert_snapshot!(html, @r#"<div class="block heading heading-1" data-depth="0"><h3 id="00000000000000000000000000000001">Intro</h3></div>"#);
}

#[test]
fn toggleable_heading_nests_children() {
    let block = heading_1(1, "Intro", true, vec![paragraph(2, "Child")]);
    let html = render_block(&block, 0, &RenderContext::new()).to_html();

    insta::assert_snapshot!(html, @r#"<div class="block heading heading-1" data-depth="0"><details class="toggle" data-depth="0"><summary><h3 id="00000000000000000000000000000001">Intro</h3></summary><div class="toggle-children"><div class="block paragraph" data-depth="1"><p>Child</p></div></div></details></div>"#);
}

#[test]
fn consecutive_list_items_share_a_list() {
    let blocks = vec![
        bulleted(1, "a"),
        bulleted(2, "b"),
        paragraph(3, "c"),
        numbered(4, "d"),
    ];
    let html = render_blocks(&blocks, 0, &RenderContext::new()).to_html();

    insta::assert_snapshot!(html, @r#"<ul class="bulleted-list" data-depth="0"><li class="block bulleted-list-item" data-depth="0">a</li><li class="block bulleted-list-item" data-depth="0">b</li></ul><div class="block paragraph" data-depth="0"><p>c</p></div><ol class="numbered-list" data-depth="0"><li class="block numbered-list-item" data-depth="0">d</li></ol>"#);
}

#[test]
fn rich_text_keeps_span_order() {
    let items = vec![
        RichTextItem::plain_text("Hello "),
        RichTextItem::plain_text("world").with_annotations(Annotations {
            bold: true,
            ..Default::default()
        }),
        RichTextItem::plain_text(" & "),
        RichTextItem::plain_text("docs").with_link("https://example.com/docs"),
    ];

    assert_eq!(
        rich_text_to_html(&items),
        r#"Hello <strong>world</strong> &amp; <a href="https://example.com/docs">docs</a>"#
    );
}

#[test]
fn deep_nesting_is_cut_off() {
    let mut block = paragraph(1000, "leaf");
    for n in 0..(BLOCK_MAX_RENDER_DEPTH as u32 + 5) {
        block = toggle(n + 1, "level", vec![block]);
    }

    let node = render_block(&block, 0, &RenderContext::expand_all());
    let depths: Vec<usize> = node
        .find_all("details")
        .iter()
        .filter_map(|d| d.get_attr("data-depth"))
        .filter_map(|d| d.parse().ok())
        .collect();

    assert_eq!(depths.iter().max(), Some(&BLOCK_MAX_RENDER_DEPTH));
    assert!(!node.text_content().contains("leaf"));
}

#[test]
fn composed_page_has_chrome_and_body() {
    let page = PageComposer::new()
        .unwrap()
        .compose(
            &snapshot("A post", vec![heading_1(1, "Intro", false, vec![]), paragraph(2, "Text")]),
            &RenderContext::new(),
        )
        .unwrap();
    let html = page.as_str();

    assert!(html.contains("<title>A post</title>"));
    assert!(html.contains("<h1>Notion Blog</h1>"));
    assert!(html.contains(r#"<h2 class="post-title">A post</h2>"#));
    assert!(html.contains(r#"<article class="notion-page">"#));
    assert!(html.find("Intro").unwrap() < html.find("Text").unwrap());
}

#[test]
fn markup_escapes_text_and_attributes() {
    let node = MarkupNode::element("a")
        .attr("href", r#"/x?a=1&b="2""#)
        .child(MarkupNode::text("<script>"));

    assert_eq!(
        node.to_html(),
        r#"<a href="/x?a=1&amp;b=&quot;2&quot;">&lt;script&gt;</a>"#
    );
}
