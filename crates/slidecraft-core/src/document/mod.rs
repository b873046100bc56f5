//! Slide documents: the closed set of slide types a deck is built from.
//!
//! Documents are plain immutable values. The editor never patches a document
//! field by field; an edit produces a whole replacement document.

mod convert;

pub use convert::{NormalizedContent, build_document, convert_document, extract_content};

use crate::block::BlockSlide;
use serde::{Deserialize, Serialize};

/// A labelled entry used by list-like slide types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub label: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl ListItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Opening or section slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleSlide {
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub subtitle: String,
}

impl TitleSlide {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: String::new(),
        }
    }
}

/// A single emphasized statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyPointSlide {
    pub heading: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body: String,
}

/// Chart kinds the renderer knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Bar,
    Line,
    Pie,
    Donut,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDatum {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSlide {
    pub title: String,
    #[serde(default)]
    pub chart_type: ChartType,
    #[serde(default)]
    pub data: Vec<ChartDatum>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridItemSlide {
    pub title: String,
    #[serde(default)]
    pub items: Vec<ListItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceSlide {
    pub title: String,
    #[serde(default)]
    pub steps: Vec<ListItem>,
}

/// Layout of a compare slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareMode {
    #[default]
    Columns,
    Quadrant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareSlide {
    pub title: String,
    #[serde(default)]
    pub mode: CompareMode,
    #[serde(default)]
    pub items: Vec<ListItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelSlide {
    pub title: String,
    #[serde(default)]
    pub stages: Vec<ListItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcentricSlide {
    pub title: String,
    #[serde(default)]
    pub rings: Vec<ListItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HubSpokeSlide {
    pub title: String,
    pub hub: String,
    #[serde(default)]
    pub spokes: Vec<ListItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VennSlide {
    pub title: String,
    #[serde(default)]
    pub sets: Vec<ListItem>,
}

/// A slide document, tagged by its `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SlideDocument {
    #[serde(rename = "title")]
    Title(TitleSlide),
    #[serde(rename = "key-point")]
    KeyPoint(KeyPointSlide),
    #[serde(rename = "chart")]
    Chart(ChartSlide),
    #[serde(rename = "grid-item")]
    GridItem(GridItemSlide),
    #[serde(rename = "sequence")]
    Sequence(SequenceSlide),
    #[serde(rename = "compare")]
    Compare(CompareSlide),
    #[serde(rename = "funnel")]
    Funnel(FunnelSlide),
    #[serde(rename = "concentric")]
    Concentric(ConcentricSlide),
    #[serde(rename = "hub-spoke")]
    HubSpoke(HubSpokeSlide),
    #[serde(rename = "venn")]
    Venn(VennSlide),
    #[serde(rename = "block-slide")]
    Blocks(BlockSlide),
}

/// Type tag of a slide document, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlideKind {
    Title,
    KeyPoint,
    Chart,
    GridItem,
    Sequence,
    Compare,
    Funnel,
    Concentric,
    HubSpoke,
    Venn,
    BlockSlide,
}

impl SlideKind {
    pub const ALL: [SlideKind; 11] = [
        SlideKind::Title,
        SlideKind::KeyPoint,
        SlideKind::Chart,
        SlideKind::GridItem,
        SlideKind::Sequence,
        SlideKind::Compare,
        SlideKind::Funnel,
        SlideKind::Concentric,
        SlideKind::HubSpoke,
        SlideKind::Venn,
        SlideKind::BlockSlide,
    ];

    /// The serialized `type` tag.
    pub fn tag(self) -> &'static str {
        match self {
            SlideKind::Title => "title",
            SlideKind::KeyPoint => "key-point",
            SlideKind::Chart => "chart",
            SlideKind::GridItem => "grid-item",
            SlideKind::Sequence => "sequence",
            SlideKind::Compare => "compare",
            SlideKind::Funnel => "funnel",
            SlideKind::Concentric => "concentric",
            SlideKind::HubSpoke => "hub-spoke",
            SlideKind::Venn => "venn",
            SlideKind::BlockSlide => "block-slide",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }
}

impl SlideDocument {
    /// An empty title slide, used for freshly inserted slides awaiting a template.
    pub fn blank() -> Self {
        SlideDocument::Title(TitleSlide::new(""))
    }

    pub fn kind(&self) -> SlideKind {
        match self {
            SlideDocument::Title(_) => SlideKind::Title,
            SlideDocument::KeyPoint(_) => SlideKind::KeyPoint,
            SlideDocument::Chart(_) => SlideKind::Chart,
            SlideDocument::GridItem(_) => SlideKind::GridItem,
            SlideDocument::Sequence(_) => SlideKind::Sequence,
            SlideDocument::Compare(_) => SlideKind::Compare,
            SlideDocument::Funnel(_) => SlideKind::Funnel,
            SlideDocument::Concentric(_) => SlideKind::Concentric,
            SlideDocument::HubSpoke(_) => SlideKind::HubSpoke,
            SlideDocument::Venn(_) => SlideKind::Venn,
            SlideDocument::Blocks(_) => SlideKind::BlockSlide,
        }
    }

    /// The slide's headline text.
    pub fn title(&self) -> &str {
        match self {
            SlideDocument::Title(s) => &s.title,
            SlideDocument::KeyPoint(s) => &s.heading,
            SlideDocument::Chart(s) => &s.title,
            SlideDocument::GridItem(s) => &s.title,
            SlideDocument::Sequence(s) => &s.title,
            SlideDocument::Compare(s) => &s.title,
            SlideDocument::Funnel(s) => &s.title,
            SlideDocument::Concentric(s) => &s.title,
            SlideDocument::HubSpoke(s) => &s.title,
            SlideDocument::Venn(s) => &s.title,
            SlideDocument::Blocks(s) => &s.title,
        }
    }

    pub fn is_block_slide(&self) -> bool {
        matches!(self, SlideDocument::Blocks(_))
    }

    pub fn as_block_slide(&self) -> Option<&BlockSlide> {
        match self {
            SlideDocument::Blocks(b) => Some(b),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_serialization() {
        let doc = SlideDocument::HubSpoke(HubSpokeSlide {
            title: "Platform".into(),
            hub: "Core".into(),
            spokes: vec![ListItem::new("Billing"), ListItem::new("Search")],
        });
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["type"], "hub-spoke");
        assert_eq!(json["hub"], "Core");

        let back: SlideDocument = serde_json::from_value(json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_kind_tags_match_serde() {
        let doc = SlideDocument::KeyPoint(KeyPointSlide {
            heading: "Ship it".into(),
            body: String::new(),
        });
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["type"], doc.kind().tag());
        assert_eq!(SlideKind::from_tag("block-slide"), Some(SlideKind::BlockSlide));
        assert_eq!(SlideKind::from_tag("pie"), None);
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let doc: SlideDocument =
            serde_json::from_str(r#"{"type":"chart","title":"Revenue"}"#).unwrap();
        match doc {
            SlideDocument::Chart(chart) => {
                assert_eq!(chart.chart_type, ChartType::Bar);
                assert!(chart.data.is_empty());
            }
            other => panic!("Expected chart, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_is_empty_title() {
        let blank = SlideDocument::blank();
        assert_eq!(blank.kind(), SlideKind::Title);
        assert_eq!(blank.title(), "");
    }
}
