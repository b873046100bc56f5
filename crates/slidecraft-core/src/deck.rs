//! The undoable edit payload of a deck.
//!
//! Per-slide edit states live in an arena keyed by [`SlideId`], so structural
//! edits only touch the slide list. Every update returns a new value and
//! shares untouched slides by `Arc`.

use crate::document::SlideDocument;
use crate::geometry::LayoutBox;
use crate::overlay::OverlayElement;
use crate::slide_list::{SlideEntry, SlideId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Edits applied to one slide. Absent fields mean "no edit".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideEditState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_box: Option<LayoutBox>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slide_data_override: Option<Arc<SlideDocument>>,
    #[serde(default)]
    pub overlays: Vec<OverlayElement>,
}

impl SlideEditState {
    pub fn is_empty(&self) -> bool {
        self.content_box.is_none() && self.slide_data_override.is_none() && self.overlays.is_empty()
    }

    pub fn overlay(&self, id: &str) -> Option<&OverlayElement> {
        self.overlays.iter().find(|o| o.id() == id)
    }

    pub fn with_content_box(&self, content_box: Option<LayoutBox>) -> Self {
        Self {
            content_box,
            ..self.clone()
        }
    }

    pub fn with_override(&self, document: Option<Arc<SlideDocument>>) -> Self {
        Self {
            slide_data_override: document,
            ..self.clone()
        }
    }

    pub fn with_overlay_added(&self, overlay: OverlayElement) -> Self {
        let mut overlays = self.overlays.clone();
        overlays.push(overlay);
        Self {
            overlays,
            ..self.clone()
        }
    }

    /// Replace the overlay with the same id. None if it doesn't exist.
    pub fn with_overlay_replaced(&self, overlay: OverlayElement) -> Option<Self> {
        let index = self.overlays.iter().position(|o| o.id() == overlay.id())?;
        let mut overlays = self.overlays.clone();
        overlays[index] = overlay;
        Some(Self {
            overlays,
            ..self.clone()
        })
    }

    pub fn with_overlay_removed(&self, id: &str) -> Option<Self> {
        self.overlay(id)?;
        Some(Self {
            overlays: self.overlays.iter().filter(|o| o.id() != id).cloned().collect(),
            ..self.clone()
        })
    }
}

/// Sparse edit state of a whole deck; the unit snapshotted into history.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckEditState {
    #[serde(default, with = "arena")]
    pub slides: BTreeMap<SlideId, Arc<SlideEditState>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slide_list: Option<Vec<SlideEntry>>,
    /// Slides appended by older versions, before the list was stored.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub added_slides: Vec<SlideDocument>,
}

impl DeckEditState {
    pub fn slide_state(&self, id: SlideId) -> Option<&Arc<SlideEditState>> {
        self.slides.get(&id)
    }

    /// A copy with one slide's edit state replaced by `update(current)`.
    ///
    /// Empty results are dropped from the arena.
    pub fn with_slide_state(
        &self,
        id: SlideId,
        update: impl FnOnce(&SlideEditState) -> SlideEditState,
    ) -> Self {
        let current = self.slides.get(&id).map(|s| s.as_ref()).cloned().unwrap_or_default();
        let next = update(&current);
        let mut slides = self.slides.clone();
        if next.is_empty() {
            slides.remove(&id);
        } else {
            slides.insert(id, Arc::new(next));
        }
        Self {
            slides,
            ..self.clone()
        }
    }

    pub fn with_slide_list(&self, list: Vec<SlideEntry>) -> Self {
        Self {
            slide_list: Some(list),
            ..self.clone()
        }
    }

    /// A copy without the edit state of a removed slide.
    pub fn without_slide_state(&self, id: SlideId) -> Self {
        if !self.slides.contains_key(&id) {
            return self.clone();
        }
        let mut slides = self.slides.clone();
        slides.remove(&id);
        Self {
            slides,
            ..self.clone()
        }
    }

    /// True if the deck carries no edits at all.
    pub fn is_pristine(&self) -> bool {
        self.slides.is_empty() && self.slide_list.is_none() && self.added_slides.is_empty()
    }
}

/// Serializes the arena as a list of `[id, state]` pairs, since JSON object
/// keys must be strings.
mod arena {
    use super::{SlideEditState, SlideId};
    use serde::{Deserialize, Deserializer, Serializer};
    use std::collections::BTreeMap;
    use std::sync::Arc;

    type Arena = BTreeMap<SlideId, Arc<SlideEditState>>;

    pub fn serialize<S>(map: &Arena, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(map.iter())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Arena, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = Vec::<(SlideId, Arc<SlideEditState>)>::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}
