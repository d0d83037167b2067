// src/analytics/mod.rs
//! Content measurement for page snapshots.

use crate::model::{extract_image_urls, Block, BlockVisitor, PageSnapshot, UnsupportedBlock};

/// Statistics about one snapshot, for progress and diagnostic messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentMeasurement {
    /// Every block, nested ones included.
    pub blocks: usize,
    pub top_level_blocks: usize,
    /// Depth of the most deeply nested block; top-level blocks are depth 1.
    pub deepest_nesting: usize,
    /// Distinct image URLs, cover included.
    pub images: usize,
    /// Blocks of a type this crate cannot render.
    pub unsupported: usize,
}

/// Counts blocks this crate renders as placeholders.
#[derive(Default)]
struct UnsupportedCounter {
    count: usize,
}

impl BlockVisitor for UnsupportedCounter {
    type Output = ();

    fn visit_unsupported(&mut self, block: &UnsupportedBlock) {
        log::trace!("Unsupported block type '{}'", block.block_type);
        self.count += 1;
    }
}

/// Measures a snapshot's block tree.
pub fn measure_snapshot(snapshot: &PageSnapshot) -> ContentMeasurement {
    let mut measurement = ContentMeasurement {
        top_level_blocks: snapshot.block_count(),
        images: extract_image_urls(snapshot).len(),
        ..Default::default()
    };
    let mut unsupported = UnsupportedCounter::default();

    for block in snapshot.blocks() {
        block.walk(&mut |b: &Block| {
            measurement.blocks += 1;
            b.accept(&mut unsupported);
        });
        measurement.deepest_nesting = measurement.deepest_nesting.max(max_depth(block, 1));
    }

    measurement.unsupported = unsupported.count;
    measurement
}

fn max_depth(block: &Block, depth: usize) -> usize {
    block
        .children()
        .iter()
        .map(|child| max_depth(child, depth + 1))
        .max()
        .unwrap_or(depth)
}
