//! Block slides: many independently positioned content blocks per slide.

use crate::document::{ChartSlide, SlideDocument};
use crate::geometry::LayoutBox;
use crate::id::generate_id;
use serde::{Deserialize, Serialize};

/// Identifier of a block within its slide.
pub type BlockId = String;

/// Generate a fresh block id.
pub fn next_block_id() -> BlockId {
    generate_id("blk")
}

/// Typed payload of a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BlockData {
    Text {
        text: String,
        #[serde(default = "default_block_font_size", rename = "fontSize")]
        font_size: f64,
    },
    /// An embedded diagram, drawn by the renderer of the wrapped slide type.
    Diagram { document: Box<SlideDocument> },
    Chart { chart: ChartSlide },
    Image {
        src: String,
        #[serde(default, skip_serializing_if = "String::is_empty")]
        alt: String,
    },
}

fn default_block_font_size() -> f64 {
    24.0
}

impl BlockData {
    pub fn text(text: impl Into<String>) -> Self {
        BlockData::Text {
            text: text.into(),
            font_size: default_block_font_size(),
        }
    }
}

/// One positioned block. Uses the same percent-box semantics as a content box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub id: BlockId,
    #[serde(flatten)]
    pub frame: LayoutBox,
    pub data: BlockData,
}

impl ContentBlock {
    /// Create a block with a freshly generated id.
    pub fn new(frame: LayoutBox, data: BlockData) -> Self {
        Self {
            id: next_block_id(),
            frame,
            data,
        }
    }

    pub fn with_frame(&self, frame: LayoutBox) -> Self {
        Self {
            frame,
            ..self.clone()
        }
    }
}

/// Payload of a block slide.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BlockSlide {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub blocks: Vec<ContentBlock>,
}

impl BlockSlide {
    pub fn block(&self, id: &str) -> Option<&ContentBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }

    /// Topmost block containing a point (later blocks draw above earlier ones).
    pub fn block_at(&self, point: kurbo::Point) -> Option<&ContentBlock> {
        self.blocks.iter().rev().find(|b| b.frame.contains(point))
    }

    /// A copy with the block appended.
    pub fn with_block_added(&self, block: ContentBlock) -> Self {
        let mut blocks = self.blocks.clone();
        blocks.push(block);
        Self {
            title: self.title.clone(),
            blocks,
        }
    }

    /// A copy with the block of the same id replaced. None if the id is unknown.
    pub fn with_block_replaced(&self, block: ContentBlock) -> Option<Self> {
        let index = self.blocks.iter().position(|b| b.id == block.id)?;
        let mut blocks = self.blocks.clone();
        blocks[index] = block;
        Some(Self {
            title: self.title.clone(),
            blocks,
        })
    }

    /// A copy without the given block. None if the id is unknown.
    pub fn with_block_removed(&self, id: &str) -> Option<Self> {
        if self.block(id).is_none() {
            return None;
        }
        Some(Self {
            title: self.title.clone(),
            blocks: self.blocks.iter().filter(|b| b.id != id).cloned().collect(),
        })
    }

    /// A copy with only the payload of one block replaced; position is kept.
    pub fn with_block_data(&self, id: &str, data: BlockData) -> Option<Self> {
        let block = self.block(id)?;
        self.with_block_replaced(ContentBlock {
            id: block.id.clone(),
            frame: block.frame,
            data,
        })
    }

    /// Give every block a new id, for pasted or duplicated slides.
    pub fn with_fresh_ids(&self) -> Self {
        Self {
            title: self.title.clone(),
            blocks: self
                .blocks
                .iter()
                .map(|b| ContentBlock {
                    id: next_block_id(),
                    ..b.clone()
                })
                .collect(),
        }
    }
}
