//! Slide type conversion through a normalized intermediate form.
//!
//! Converting A -> B is `build_document(B, extract_content(A))`. Each slide type
//! only has to know how to map itself to and from [`NormalizedContent`].

use super::{
    ChartDatum, ChartSlide, CompareSlide, ConcentricSlide, FunnelSlide, GridItemSlide,
    HubSpokeSlide, KeyPointSlide, ListItem, SequenceSlide, SlideDocument, SlideKind, TitleSlide,
    VennSlide,
};
use crate::block::{BlockData, BlockSlide, ContentBlock};
use crate::geometry::LayoutBox;

/// Type-independent view of a slide's content.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedContent {
    pub title: String,
    /// Secondary text: subtitle, key-point body, or hub label.
    pub subtitle: String,
    pub items: Vec<NormalizedItem>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedItem {
    pub label: String,
    pub description: String,
    pub value: Option<f64>,
}

impl From<&ListItem> for NormalizedItem {
    fn from(item: &ListItem) -> Self {
        Self {
            label: item.label.clone(),
            description: item.description.clone(),
            value: None,
        }
    }
}

impl From<&NormalizedItem> for ListItem {
    fn from(item: &NormalizedItem) -> Self {
        ListItem {
            label: item.label.clone(),
            description: item.description.clone(),
        }
    }
}

fn list(items: &[ListItem]) -> Vec<NormalizedItem> {
    items.iter().map(NormalizedItem::from).collect()
}

impl NormalizedContent {
    fn listed(title: String, items: &[ListItem]) -> Self {
        Self {
            title,
            subtitle: String::new(),
            items: list(items),
        }
    }
}

/// Extract the normalized content of any slide document.
pub fn extract_content(document: &SlideDocument) -> NormalizedContent {
    let title = document.title().to_string();
    match document {
        SlideDocument::Title(s) => NormalizedContent {
            title,
            subtitle: s.subtitle.clone(),
            items: Vec::new(),
        },
        SlideDocument::KeyPoint(s) => NormalizedContent {
            title,
            subtitle: s.body.clone(),
            items: Vec::new(),
        },
        SlideDocument::Chart(s) => NormalizedContent {
            title,
            subtitle: String::new(),
            items: s
                .data
                .iter()
                .map(|d| NormalizedItem {
                    label: d.label.clone(),
                    description: String::new(),
                    value: Some(d.value),
                })
                .collect(),
        },
        SlideDocument::GridItem(s) => NormalizedContent::listed(title, &s.items),
        SlideDocument::Sequence(s) => NormalizedContent::listed(title, &s.steps),
        SlideDocument::Compare(s) => NormalizedContent::listed(title, &s.items),
        SlideDocument::Funnel(s) => NormalizedContent::listed(title, &s.stages),
        SlideDocument::Concentric(s) => NormalizedContent::listed(title, &s.rings),
        SlideDocument::HubSpoke(s) => NormalizedContent {
            title,
            subtitle: s.hub.clone(),
            items: list(&s.spokes),
        },
        SlideDocument::Venn(s) => NormalizedContent::listed(title, &s.sets),
        SlideDocument::Blocks(s) => NormalizedContent {
            title,
            subtitle: String::new(),
            items: s
                .blocks
                .iter()
                .filter_map(|block| match &block.data {
                    BlockData::Text { text, .. } => Some(NormalizedItem {
                        label: text.clone(),
                        ..Default::default()
                    }),
                    BlockData::Diagram { document } => Some(NormalizedItem {
                        label: document.title().to_string(),
                        ..Default::default()
                    }),
                    BlockData::Chart { chart } => Some(NormalizedItem {
                        label: chart.title.clone(),
                        ..Default::default()
                    }),
                    BlockData::Image { .. } => None,
                })
                .collect(),
        },
    }
}

/// Build a document of the given kind from normalized content.
pub fn build_document(kind: SlideKind, content: &NormalizedContent) -> SlideDocument {
    let title = content.title.clone();
    let items = || content.items.iter().map(ListItem::from).collect::<Vec<_>>();
    match kind {
        SlideKind::Title => SlideDocument::Title(TitleSlide {
            title,
            subtitle: content.subtitle.clone(),
        }),
        SlideKind::KeyPoint => {
            let body = if content.subtitle.is_empty() {
                content
                    .items
                    .iter()
                    .map(|item| item.label.as_str())
                    .collect::<Vec<_>>()
                    .join("\n")
            } else {
                content.subtitle.clone()
            };
            SlideDocument::KeyPoint(KeyPointSlide {
                heading: title,
                body,
            })
        }
        SlideKind::Chart => SlideDocument::Chart(ChartSlide {
            title,
            chart_type: Default::default(),
            data: content
                .items
                .iter()
                .map(|item| ChartDatum {
                    label: item.label.clone(),
                    value: item.value.unwrap_or(0.0),
                })
                .collect(),
        }),
        SlideKind::GridItem => SlideDocument::GridItem(GridItemSlide {
            title,
            items: items(),
            columns: None,
        }),
        SlideKind::Sequence => SlideDocument::Sequence(SequenceSlide {
            title,
            steps: items(),
        }),
        SlideKind::Compare => SlideDocument::Compare(CompareSlide {
            title,
            mode: Default::default(),
            items: items(),
        }),
        SlideKind::Funnel => SlideDocument::Funnel(FunnelSlide {
            title,
            stages: items(),
        }),
        SlideKind::Concentric => SlideDocument::Concentric(ConcentricSlide {
            title,
            rings: items(),
        }),
        SlideKind::HubSpoke => {
            let hub = if content.subtitle.is_empty() {
                content.title.clone()
            } else {
                content.subtitle.clone()
            };
            SlideDocument::HubSpoke(HubSpokeSlide {
                title,
                hub,
                spokes: items(),
            })
        }
        SlideKind::Venn => SlideDocument::Venn(VennSlide {
            title,
            sets: items(),
        }),
        SlideKind::BlockSlide => SlideDocument::Blocks(build_block_slide(content)),
    }
}

/// Stack the content as text blocks: one heading block, then one per item.
fn build_block_slide(content: &NormalizedContent) -> BlockSlide {
    const MARGIN: f64 = 5.0;
    const HEADING_HEIGHT: f64 = 15.0;

    let mut blocks = vec![ContentBlock::new(
        LayoutBox::new(MARGIN, MARGIN, 100.0 - 2.0 * MARGIN, HEADING_HEIGHT),
        BlockData::text(content.title.clone()),
    )];

    if !content.items.is_empty() {
        let top = 2.0 * MARGIN + HEADING_HEIGHT;
        let row = (100.0 - top - MARGIN) / content.items.len() as f64;
        for (i, item) in content.items.iter().enumerate() {
            blocks.push(ContentBlock::new(
                LayoutBox::new(MARGIN, top + row * i as f64, 100.0 - 2.0 * MARGIN, row),
                BlockData::text(item.label.clone()),
            ));
        }
    }

    BlockSlide {
        title: content.title.clone(),
        blocks,
    }
}

/// Convert a document to another slide type. Same-kind conversion returns a clone.
pub fn convert_document(document: &SlideDocument, kind: SlideKind) -> SlideDocument {
    if document.kind() == kind {
        return document.clone();
    }
    build_document(kind, &extract_content(document))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence() -> SlideDocument {
        SlideDocument::Sequence(SequenceSlide {
            title: "Roadmap".into(),
            steps: vec![
                ListItem::new("Discover").with_description("Interviews"),
                ListItem::new("Build"),
                ListItem::new("Launch"),
            ],
        })
    }

    #[test]
    fn test_sequence_to_funnel_keeps_items() {
        let funnel = convert_document(&sequence(), SlideKind::Funnel);
        match funnel {
            SlideDocument::Funnel(f) => {
                assert_eq!(f.title, "Roadmap");
                assert_eq!(f.stages.len(), 3);
                assert_eq!(f.stages[0].description, "Interviews");
            }
            other => panic!("Expected funnel, got {other:?}"),
        }
    }

    #[test]
    fn test_chart_values_survive_chart_round_trip() {
        let chart = SlideDocument::Chart(ChartSlide {
            title: "Sales".into(),
            chart_type: Default::default(),
            data: vec![ChartDatum {
                label: "Q1".into(),
                value: 4.0,
            }],
        });
        let content = extract_content(&chart);
        assert_eq!(content.items[0].value, Some(4.0));
        assert_eq!(build_document(SlideKind::Chart, &content), chart);
    }

    #[test]
    fn test_hub_spoke_falls_back_to_title_hub() {
        let doc = convert_document(&sequence(), SlideKind::HubSpoke);
        match doc {
            SlideDocument::HubSpoke(h) => assert_eq!(h.hub, "Roadmap"),
            other => panic!("Expected hub-spoke, got {other:?}"),
        }
    }

    #[test]
    fn test_key_point_joins_items() {
        let doc = convert_document(&sequence(), SlideKind::KeyPoint);
        match doc {
            SlideDocument::KeyPoint(k) => assert_eq!(k.body, "Discover\nBuild\nLaunch"),
            other => panic!("Expected key-point, got {other:?}"),
        }
    }

    #[test]
    fn test_block_slide_stacks_text_blocks() {
        let doc = convert_document(&sequence(), SlideKind::BlockSlide);
        let blocks = doc.as_block_slide().unwrap();
        assert_eq!(blocks.blocks.len(), 4);
        let last = &blocks.blocks[3];
        assert!((last.frame.bottom() - 95.0).abs() < 1e-9);
    }

    #[test]
    fn test_same_kind_is_identity() {
        let doc = sequence();
        assert_eq!(convert_document(&doc, SlideKind::Sequence), doc);
    }
}
