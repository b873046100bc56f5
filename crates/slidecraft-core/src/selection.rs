//! Selection targets and how positional indices follow structural edits.

use crate::block::BlockId;
use crate::overlay::OverlayId;
use serde::{Deserialize, Serialize};

/// What the user currently has selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Selection {
    #[serde(rename_all = "camelCase")]
    ContentBox { slide_index: usize },
    #[serde(rename_all = "camelCase")]
    Block {
        slide_index: usize,
        block_id: BlockId,
    },
    #[serde(rename_all = "camelCase")]
    Overlay {
        slide_index: usize,
        overlay_id: OverlayId,
    },
}

impl Selection {
    pub fn slide_index(&self) -> usize {
        match self {
            Selection::ContentBox { slide_index }
            | Selection::Block { slide_index, .. }
            | Selection::Overlay { slide_index, .. } => *slide_index,
        }
    }

    /// The same target re-addressed to another slide position.
    pub fn at_slide(&self, index: usize) -> Self {
        match self {
            Selection::ContentBox { .. } => Selection::ContentBox { slide_index: index },
            Selection::Block { block_id, .. } => Selection::Block {
                slide_index: index,
                block_id: block_id.clone(),
            },
            Selection::Overlay { overlay_id, .. } => Selection::Overlay {
                slide_index: index,
                overlay_id: overlay_id.clone(),
            },
        }
    }

    pub fn is_overlay(&self, slide: usize, id: &str) -> bool {
        match self {
            Selection::Overlay {
                slide_index,
                overlay_id,
            } => *slide_index == slide && overlay_id == id,
            _ => false,
        }
    }

    pub fn is_block(&self, slide: usize, id: &str) -> bool {
        match self {
            Selection::Block {
                slide_index,
                block_id,
            } => *slide_index == slide && block_id == id,
            _ => false,
        }
    }
}

/// A structural edit of the slide list, expressed by positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexShift {
    Insert { at: usize },
    Delete { at: usize },
    /// `to` is the requested target before removal of `from`.
    Move { from: usize, to: usize },
}

impl IndexShift {
    /// Final position of a slide moved from `from` towards `to`.
    pub fn move_target(from: usize, to: usize) -> usize {
        if to > from { to - 1 } else { to }
    }

    /// Where a slide at `index` ends up. `None` if it was deleted.
    pub fn apply(self, index: usize) -> Option<usize> {
        match self {
            IndexShift::Insert { at } => Some(if index >= at { index + 1 } else { index }),
            IndexShift::Delete { at } => match index.cmp(&at) {
                std::cmp::Ordering::Less => Some(index),
                std::cmp::Ordering::Equal => None,
                std::cmp::Ordering::Greater => Some(index - 1),
            },
            IndexShift::Move { from, to } => {
                let target = Self::move_target(from, to);
                if index == from {
                    return Some(target);
                }
                let after_delete = IndexShift::Delete { at: from }.apply(index)?;
                IndexShift::Insert { at: target }.apply(after_delete)
            }
        }
    }

    pub fn apply_to_selection(self, selection: Option<&Selection>) -> Option<Selection> {
        let selection = selection?;
        self.apply(selection.slide_index()).map(|index| selection.at_slide(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_shifts_at_and_after() {
        let shift = IndexShift::Insert { at: 1 };
        assert_eq!(shift.apply(0), Some(0));
        assert_eq!(shift.apply(1), Some(2));
        assert_eq!(shift.apply(3), Some(4));
    }

    #[test]
    fn test_delete_drops_and_shifts_down() {
        let shift = IndexShift::Delete { at: 1 };
        assert_eq!(shift.apply(0), Some(0));
        assert_eq!(shift.apply(1), None);
        assert_eq!(shift.apply(4), Some(3));
    }

    #[test]
    fn test_move_forward_and_backward() {
        // [A,B,C,D] move(0 -> 3): target 2, giving [B,C,A,D]
        let forward = IndexShift::Move { from: 0, to: 3 };
        assert_eq!(forward.apply(0), Some(2));
        assert_eq!(forward.apply(1), Some(0));
        assert_eq!(forward.apply(2), Some(1));
        assert_eq!(forward.apply(3), Some(3));

        // [A,B,C,D] move(3 -> 0): giving [D,A,B,C]
        let backward = IndexShift::Move { from: 3, to: 0 };
        assert_eq!(backward.apply(3), Some(0));
        assert_eq!(backward.apply(0), Some(1));
        assert_eq!(backward.apply(2), Some(3));
    }

    #[test]
    fn test_selection_follows_shift() {
        let selected = Selection::Overlay {
            slide_index: 3,
            overlay_id: "ov-1".into(),
        };
        let inserted = IndexShift::Insert { at: 1 }.apply_to_selection(Some(&selected)).unwrap();
        assert_eq!(inserted.slide_index(), 4);
        assert!(inserted.is_overlay(4, "ov-1"));

        assert!(IndexShift::Delete { at: 3 }.apply_to_selection(Some(&selected)).is_none());
        assert!(IndexShift::Delete { at: 0 }.apply_to_selection(None).is_none());
    }

    #[test]
    fn test_selection_serialization() {
        let sel = Selection::Block {
            slide_index: 2,
            block_id: "blk-1".into(),
        };
        let json = serde_json::to_value(&sel).unwrap();
        assert_eq!(json["kind"], "block");
        assert_eq!(json["slideIndex"], 2);
        assert_eq!(json["blockId"], "blk-1");
    }
}
