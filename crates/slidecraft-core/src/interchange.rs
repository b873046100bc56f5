//! Deck export and validated import.
//!
//! The interchange format is a JSON envelope:
//! `{ "version": 1, "title": ..., "description": ..., "slides": [...] }`.
//! Import is all-or-nothing: any violation rejects the whole payload.

use crate::document::{SlideDocument, SlideKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Envelope version this build reads and writes.
pub const EXPORT_VERSION: u32 = 1;

/// A deck as read from an export envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckMeta {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub slides: Vec<SlideDocument>,
}

#[derive(Serialize)]
struct Envelope<'a> {
    version: u32,
    title: &'a str,
    description: &'a str,
    slides: Vec<&'a SlideDocument>,
}

/// Errors from exporting a deck.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Reasons an import is rejected.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("File is not valid JSON: {0}")]
    InvalidJson(serde_json::Error),
    #[error("Expected a JSON object at the top level")]
    NotAnObject,
    #[error("Missing version field")]
    MissingVersion,
    #[error("Unsupported version {found}, expected 1")]
    UnsupportedVersion { found: Value },
    #[error("Deck title is missing or empty")]
    MissingTitle,
    #[error("Deck has no slides")]
    NoSlides,
    #[error("Slide {index} has no type")]
    MissingSlideType { index: usize },
    #[error("Slide {index} has unknown type \"{tag}\"")]
    UnknownSlideType { index: usize, tag: String },
    #[error("Slide {index} is malformed: {source}")]
    InvalidSlide {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Serialize a deck into the export envelope.
pub fn export_document(
    title: &str,
    description: &str,
    slides: &[Arc<SlideDocument>],
) -> Result<Vec<u8>, ExportError> {
    let envelope = Envelope {
        version: EXPORT_VERSION,
        title,
        description,
        slides: slides.iter().map(|s| s.as_ref()).collect(),
    };
    let bytes = serde_json::to_vec_pretty(&envelope)?;
    log::debug!("Exported deck \"{}\" with {} slides", title, slides.len());
    Ok(bytes)
}

/// Parse and validate an export envelope.
pub fn import_document(bytes: &[u8]) -> Result<DeckMeta, ImportError> {
    validate(bytes).inspect_err(|e| log::warn!("Rejected import: {e}"))
}

fn validate(bytes: &[u8]) -> Result<DeckMeta, ImportError> {
    let value: Value = serde_json::from_slice(bytes).map_err(ImportError::InvalidJson)?;
    let Value::Object(mut object) = value else {
        return Err(ImportError::NotAnObject);
    };

    let version = object.get("version").ok_or(ImportError::MissingVersion)?;
    if version.as_u64() != Some(u64::from(EXPORT_VERSION)) {
        return Err(ImportError::UnsupportedVersion {
            found: version.clone(),
        });
    }

    let title = match object.get("title") {
        Some(Value::String(title)) if !title.trim().is_empty() => title.clone(),
        _ => return Err(ImportError::MissingTitle),
    };
    let description = match object.get("description") {
        Some(Value::String(description)) => description.clone(),
        _ => String::new(),
    };

    let raw_slides = match object.remove("slides") {
        Some(Value::Array(slides)) if !slides.is_empty() => slides,
        _ => return Err(ImportError::NoSlides),
    };

    // Check every tag before deserializing anything so the reported error is
    // the first unknown type, not a serde message about it.
    for (index, slide) in raw_slides.iter().enumerate() {
        let tag = slide
            .get("type")
            .and_then(Value::as_str)
            .ok_or(ImportError::MissingSlideType { index })?;
        if SlideKind::from_tag(tag).is_none() {
            return Err(ImportError::UnknownSlideType {
                index,
                tag: tag.to_string(),
            });
        }
    }

    let slides = raw_slides
        .into_iter()
        .enumerate()
        .map(|(index, slide)| {
            serde_json::from_value(slide)
                .map_err(|source| ImportError::InvalidSlide { index, source })
        })
        .collect::<Result<Vec<SlideDocument>, _>>()?;

    log::info!("Imported deck \"{}\" with {} slides", title, slides.len());
    Ok(DeckMeta {
        title,
        description,
        slides,
    })
}
