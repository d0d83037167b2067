use super::blocks::*;
use super::common::BlockCommon;
use crate::types::{BlockId, RichTextItem};
use serde::{Deserialize, Serialize};

/// Macro to reduce boilerplate in Block enum methods
macro_rules! match_all_blocks {
    ($self:expr, $pattern:pat => $result:expr) => {
        match $self {
            Block::Paragraph($pattern) => $result,
            Block::Heading1($pattern) => $result,
            Block::Heading2($pattern) => $result,
            Block::Heading3($pattern) => $result,
            Block::BulletedListItem($pattern) => $result,
            Block::NumberedListItem($pattern) => $result,
            Block::ToDo($pattern) => $result,
            Block::Toggle($pattern) => $result,
            Block::Quote($pattern) => $result,
            Block::Callout($pattern) => $result,
            Block::Code($pattern) => $result,
            Block::Equation($pattern) => $result,
            Block::Divider($pattern) => $result,
            Block::Image($pattern) => $result,
            Block::Video($pattern) => $result,
            Block::File($pattern) => $result,
            Block::Pdf($pattern) => $result,
            Block::Bookmark($pattern) => $result,
            Block::Embed($pattern) => $result,
            Block::ChildPage($pattern) => $result,
            Block::Table($pattern) => $result,
            Block::TableRow($pattern) => $result,
            Block::ColumnList($pattern) => $result,
            Block::Column($pattern) => $result,
            Block::Unsupported($pattern) => $result,
        }
    };
}

/// Block represents every Notion block kind the blog renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    Paragraph(ParagraphBlock),
    Heading1(HeadingBlock),
    Heading2(HeadingBlock),
    Heading3(HeadingBlock),
    BulletedListItem(BulletedListItemBlock),
    NumberedListItem(NumberedListItemBlock),
    ToDo(ToDoBlock),
    Toggle(ToggleBlock),
    Quote(QuoteBlock),
    Callout(CalloutBlock),
    Code(CodeBlock),
    Equation(EquationBlock),
    Divider(DividerBlock),
    Image(MediaBlock),
    Video(MediaBlock),
    File(MediaBlock),
    Pdf(MediaBlock),
    Bookmark(BookmarkBlock),
    Embed(EmbedBlock),
    ChildPage(ChildPageBlock),
    Table(TableBlock),
    TableRow(TableRowBlock),
    ColumnList(ColumnListBlock),
    Column(ColumnBlock),
    Unsupported(UnsupportedBlock),
}

impl Block {
    /// Get the block's ID
    pub fn id(&self) -> &BlockId {
        match_all_blocks!(self, b => &b.common.id)
    }

    /// Get the block's children
    pub fn children(&self) -> &[Block] {
        match_all_blocks!(self, b => &b.common.children)
    }

    /// Check if block has children
    pub fn has_children(&self) -> bool {
        self.common().has_children
    }

    /// Get common block data
    pub fn common(&self) -> &BlockCommon {
        match_all_blocks!(self, b => &b.common)
    }

    /// Get block type name, as it appears in the `type` field on the wire
    pub fn block_type(&self) -> &'static str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::Heading1(_) => "heading_1",
            Block::Heading2(_) => "heading_2",
            Block::Heading3(_) => "heading_3",
            Block::BulletedListItem(_) => "bulleted_list_item",
            Block::NumberedListItem(_) => "numbered_list_item",
            Block::ToDo(_) => "to_do",
            Block::Toggle(_) => "toggle",
            Block::Quote(_) => "quote",
            Block::Callout(_) => "callout",
            Block::Code(_) => "code",
            Block::Equation(_) => "equation",
            Block::Divider(_) => "divider",
            Block::Image(_) => "image",
            Block::Video(_) => "video",
            Block::File(_) => "file",
            Block::Pdf(_) => "pdf",
            Block::Bookmark(_) => "bookmark",
            Block::Embed(_) => "embed",
            Block::ChildPage(_) => "child_page",
            Block::Table(_) => "table",
            Block::TableRow(_) => "table_row",
            Block::ColumnList(_) => "column_list",
            Block::Column(_) => "column",
            Block::Unsupported(_) => "unsupported",
        }
    }

    /// Visits this block and then every descendant, depth first, in document order.
    pub fn walk<F: FnMut(&Block)>(&self, f: &mut F) {
        f(self);
        for child in self.children() {
            child.walk(f);
        }
    }

    /// Accept a visitor
    pub fn accept<V: BlockVisitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Block::Paragraph(b) => visitor.visit_paragraph(b),
            Block::Heading1(b) => visitor.visit_heading(1, b),
            Block::Heading2(b) => visitor.visit_heading(2, b),
            Block::Heading3(b) => visitor.visit_heading(3, b),
            Block::BulletedListItem(b) => visitor.visit_bulleted_list_item(b),
            Block::NumberedListItem(b) => visitor.visit_numbered_list_item(b),
            Block::ToDo(b) => visitor.visit_todo(b),
            Block::Toggle(b) => visitor.visit_toggle(b),
            Block::Quote(b) => visitor.visit_quote(b),
            Block::Callout(b) => visitor.visit_callout(b),
            Block::Code(b) => visitor.visit_code(b),
            Block::Equation(b) => visitor.visit_equation(b),
            Block::Divider(b) => visitor.visit_divider(b),
            Block::Image(b) => visitor.visit_image(b),
            Block::Video(b) => visitor.visit_video(b),
            Block::File(b) => visitor.visit_file(b),
            Block::Pdf(b) => visitor.visit_pdf(b),
            Block::Bookmark(b) => visitor.visit_bookmark(b),
            Block::Embed(b) => visitor.visit_embed(b),
            Block::ChildPage(b) => visitor.visit_child_page(b),
            Block::Table(b) => visitor.visit_table(b),
            Block::TableRow(b) => visitor.visit_table_row(&b.common.id, &b.cells),
            Block::ColumnList(b) => visitor.visit_column_list(b),
            Block::Column(b) => visitor.visit_column(b),
            Block::Unsupported(b) => visitor.visit_unsupported(b),
        }
    }
}

/// Visitor trait for traversing block structures.
///
/// All methods have default implementations that return `Default::default()`,
/// so implementors only need to override the methods they care about.
pub trait BlockVisitor {
    type Output: Default;

    fn visit_paragraph(&mut self, _block: &ParagraphBlock) -> Self::Output {
        Default::default()
    }
    fn visit_heading(&mut self, _level: u8, _block: &HeadingBlock) -> Self::Output {
        Default::default()
    }
    fn visit_bulleted_list_item(&mut self, _block: &BulletedListItemBlock) -> Self::Output {
        Default::default()
    }
    fn visit_numbered_list_item(&mut self, _block: &NumberedListItemBlock) -> Self::Output {
        Default::default()
    }
    fn visit_todo(&mut self, _block: &ToDoBlock) -> Self::Output {
        Default::default()
    }
    fn visit_toggle(&mut self, _block: &ToggleBlock) -> Self::Output {
        Default::default()
    }
    fn visit_quote(&mut self, _block: &QuoteBlock) -> Self::Output {
        Default::default()
    }
    fn visit_callout(&mut self, _block: &CalloutBlock) -> Self::Output {
        Default::default()
    }
    fn visit_code(&mut self, _block: &CodeBlock) -> Self::Output {
        Default::default()
    }
    fn visit_equation(&mut self, _block: &EquationBlock) -> Self::Output {
        Default::default()
    }
    fn visit_divider(&mut self, _block: &DividerBlock) -> Self::Output {
        Default::default()
    }
    fn visit_image(&mut self, _block: &MediaBlock) -> Self::Output {
        Default::default()
    }
    fn visit_video(&mut self, _block: &MediaBlock) -> Self::Output {
        Default::default()
    }
    fn visit_file(&mut self, _block: &MediaBlock) -> Self::Output {
        Default::default()
    }
    fn visit_pdf(&mut self, _block: &MediaBlock) -> Self::Output {
        Default::default()
    }
    fn visit_bookmark(&mut self, _block: &BookmarkBlock) -> Self::Output {
        Default::default()
    }
    fn visit_embed(&mut self, _block: &EmbedBlock) -> Self::Output {
        Default::default()
    }
    fn visit_child_page(&mut self, _block: &ChildPageBlock) -> Self::Output {
        Default::default()
    }
    fn visit_table(&mut self, _block: &TableBlock) -> Self::Output {
        Default::default()
    }
    fn visit_table_row(&mut self, _id: &BlockId, _cells: &[Vec<RichTextItem>]) -> Self::Output {
        Default::default()
    }
    fn visit_column_list(&mut self, _block: &ColumnListBlock) -> Self::Output {
        Default::default()
    }
    fn visit_column(&mut self, _block: &ColumnBlock) -> Self::Output {
        Default::default()
    }
    fn visit_unsupported(&mut self, _block: &UnsupportedBlock) -> Self::Output {
        Default::default()
    }
}
