//! Ordered slide list and its materialization from a sparse edit state.

use crate::deck::DeckEditState;
use crate::document::SlideDocument;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Stable identity of a slide, independent of its current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlideId {
    /// The n-th baseline document supplied by the host.
    Original(usize),
    /// The n-th entry of the legacy `addedSlides` list.
    Appended(usize),
    /// A slide created during editing.
    Added(Uuid),
}

impl SlideId {
    pub fn new_added() -> Self {
        SlideId::Added(Uuid::new_v4())
    }
}

/// One position of the slide list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SlideEntry {
    /// Refers to `original_slides[index]`.
    Original { index: usize },
    /// Carries its own document.
    Added {
        id: SlideId,
        data: Arc<SlideDocument>,
    },
}

impl SlideEntry {
    /// A freshly added slide with a new identity.
    pub fn added(data: SlideDocument) -> Self {
        SlideEntry::Added {
            id: SlideId::new_added(),
            data: Arc::new(data),
        }
    }

    pub fn id(&self) -> SlideId {
        match self {
            SlideEntry::Original { index } => SlideId::Original(*index),
            SlideEntry::Added { id, .. } => *id,
        }
    }

    /// The entry's base document, before any override is applied.
    ///
    /// Returns `None` for an original index the baseline doesn't have.
    pub fn base_document<'a>(
        &'a self,
        originals: &'a [Arc<SlideDocument>],
    ) -> Option<&'a Arc<SlideDocument>> {
        match self {
            SlideEntry::Original { index } => originals.get(*index),
            SlideEntry::Added { data, .. } => Some(data),
        }
    }
}

/// Produce the ordered slide list for a deck.
///
/// A stored list is returned verbatim. Otherwise every original slide is
/// listed in order, followed by the legacy `addedSlides`.
pub fn materialize_slide_list(deck: &DeckEditState, original_count: usize) -> Vec<SlideEntry> {
    if let Some(list) = &deck.slide_list {
        return list.clone();
    }

    (0..original_count)
        .map(|index| SlideEntry::Original { index })
        .chain(deck.added_slides.iter().enumerate().map(|(i, data)| SlideEntry::Added {
            id: SlideId::Appended(i),
            data: Arc::new(data.clone()),
        }))
        .collect()
}

/// Number of slides without cloning the list.
pub fn slide_count(deck: &DeckEditState, original_count: usize) -> usize {
    match &deck.slide_list {
        Some(list) => list.len(),
        None => original_count + deck.added_slides.len(),
    }
}
