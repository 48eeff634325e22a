use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::child::{ChildItem, ChildList};

/// Identifier of a block within a document
pub type BlockId = String;

/// Lowest and highest score a product rating may hold
pub const RATING_MIN: f64 = 0.0;
pub const RATING_MAX: f64 = 5.0;

/// Heading levels the editor offers
pub const HEADING_LEVEL_MIN: u8 = 1;
pub const HEADING_LEVEL_MAX: u8 = 3;

/// One typed unit of structured article content.
///
/// The fields shared by every variant live here; variant-specific attributes
/// live in [`BlockKind`], which is flattened into the same JSON object so the
/// persisted shape is `{"id": .., "type": "heading", "order": 0, "level": 2, ..}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: BlockId,
    #[serde(default)]
    pub order: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_id: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(flatten)]
    pub kind: BlockKind,
}

impl Block {
    pub fn block_type(&self) -> BlockType {
        self.kind.block_type()
    }

    /// Child list by name, if this block's variant owns it
    pub fn child_list(&self, list: ChildList) -> Option<&Vec<ChildItem>> {
        match (&self.kind, list) {
            (BlockKind::Rating { highlights, .. }, ChildList::Highlights) => Some(highlights),
            (BlockKind::Rating { custom_fields, .. }, ChildList::CustomFields) => {
                Some(custom_fields)
            }
            (BlockKind::ProsCons { pros, .. }, ChildList::Pros) => Some(pros),
            (BlockKind::ProsCons { cons, .. }, ChildList::Cons) => Some(cons),
            (BlockKind::ProsCons { ingredients, .. }, ChildList::Ingredients) => Some(ingredients),
            (BlockKind::Ingredients { ingredients, .. }, ChildList::Ingredients) => {
                Some(ingredients)
            }
            _ => None,
        }
    }

    pub fn child_list_mut(&mut self, list: ChildList) -> Option<&mut Vec<ChildItem>> {
        match (&mut self.kind, list) {
            (BlockKind::Rating { highlights, .. }, ChildList::Highlights) => Some(highlights),
            (BlockKind::Rating { custom_fields, .. }, ChildList::CustomFields) => {
                Some(custom_fields)
            }
            (BlockKind::ProsCons { pros, .. }, ChildList::Pros) => Some(pros),
            (BlockKind::ProsCons { cons, .. }, ChildList::Cons) => Some(cons),
            (BlockKind::ProsCons { ingredients, .. }, ChildList::Ingredients) => Some(ingredients),
            (BlockKind::Ingredients { ingredients, .. }, ChildList::Ingredients) => {
                Some(ingredients)
            }
            _ => None,
        }
    }
}

/// Variant-specific attributes of a [`Block`].
///
/// Superseded tags from older documents are accepted on read and mapped onto
/// the consolidated variants; they are never written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum BlockKind {
    Heading {
        #[serde(default = "default_heading_level")]
        level: u8,
    },
    Paragraph,
    Image {
        #[serde(default)]
        url: String,
        #[serde(default)]
        alt: String,
        #[serde(default)]
        caption: String,
    },
    Quote {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        citation: Option<String>,
    },
    List {
        #[serde(default)]
        style: ListStyle,
    },
    Code {
        #[serde(default = "default_code_language")]
        language: String,
    },
    Html,
    Divider,
    Cta {
        #[serde(default)]
        button_text: String,
        #[serde(default)]
        button_url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        background_color: Option<String>,
    },
    #[serde(alias = "productRating")]
    Rating {
        #[serde(default)]
        product_name: String,
        #[serde(default)]
        ratings: ProductRatings,
        #[serde(default)]
        highlights: Vec<ChildItem>,
        #[serde(default)]
        custom_fields: Vec<ChildItem>,
    },
    #[serde(alias = "productReview")]
    ProsCons {
        #[serde(default)]
        pros: Vec<ChildItem>,
        #[serde(default)]
        cons: Vec<ChildItem>,
        #[serde(default)]
        ingredients: Vec<ChildItem>,
    },
    #[serde(alias = "ingredientsSection")]
    Ingredients {
        #[serde(default)]
        product_name: String,
        #[serde(default)]
        introduction: String,
        #[serde(default)]
        ingredients: Vec<ChildItem>,
    },
}

fn default_heading_level() -> u8 {
    2
}

fn default_code_language() -> String {
    "plaintext".to_string()
}

impl BlockKind {
    pub fn block_type(&self) -> BlockType {
        match self {
            BlockKind::Heading { .. } => BlockType::Heading,
            BlockKind::Paragraph => BlockType::Paragraph,
            BlockKind::Image { .. } => BlockType::Image,
            BlockKind::Quote { .. } => BlockType::Quote,
            BlockKind::List { .. } => BlockType::List,
            BlockKind::Code { .. } => BlockType::Code,
            BlockKind::Html => BlockType::Html,
            BlockKind::Divider => BlockType::Divider,
            BlockKind::Cta { .. } => BlockType::Cta,
            BlockKind::Rating { .. } => BlockType::Rating,
            BlockKind::ProsCons { .. } => BlockType::ProsCons,
            BlockKind::Ingredients { .. } => BlockType::Ingredients,
        }
    }

    /// Product name carried by the review-style variants
    pub fn product_name(&self) -> Option<&str> {
        match self {
            BlockKind::Rating { product_name, .. }
            | BlockKind::Ingredients { product_name, .. } => Some(product_name),
            _ => None,
        }
    }
}

/// Field-less discriminator of [`BlockKind`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    Heading,
    Paragraph,
    Image,
    Quote,
    List,
    Code,
    Html,
    Divider,
    Cta,
    Rating,
    ProsCons,
    Ingredients,
}

impl BlockType {
    pub const ALL: [BlockType; 12] = [
        BlockType::Heading,
        BlockType::Paragraph,
        BlockType::Image,
        BlockType::Quote,
        BlockType::List,
        BlockType::Code,
        BlockType::Html,
        BlockType::Divider,
        BlockType::Cta,
        BlockType::Rating,
        BlockType::ProsCons,
        BlockType::Ingredients,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BlockType::Heading => "heading",
            BlockType::Paragraph => "paragraph",
            BlockType::Image => "image",
            BlockType::Quote => "quote",
            BlockType::List => "list",
            BlockType::Code => "code",
            BlockType::Html => "html",
            BlockType::Divider => "divider",
            BlockType::Cta => "cta",
            BlockType::Rating => "rating",
            BlockType::ProsCons => "pros-cons",
            BlockType::Ingredients => "ingredients",
        }
    }

    /// Whether free-text `content` is meaningful for this variant
    pub fn carries_text(self) -> bool {
        !matches!(
            self,
            BlockType::Divider | BlockType::Rating | BlockType::ProsCons | BlockType::Image
        )
    }

    /// Next type in [`BlockType::ALL`], wrapping around
    pub fn next(self) -> BlockType {
        let index = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown block type: {0}")]
pub struct UnknownBlockType(pub String);

impl FromStr for BlockType {
    type Err = UnknownBlockType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownBlockType(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListStyle {
    Ordered,
    #[default]
    Unordered,
}

/// Per-criterion scores of a reviewed product, each in `0.0..=5.0`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductRatings {
    pub ingredients: f64,
    pub value: f64,
    pub manufacturer: f64,
    pub safety: f64,
    pub effectiveness: f64,
}

impl ProductRatings {
    pub fn clamped(self) -> Self {
        Self {
            ingredients: clamp_rating(self.ingredients),
            value: clamp_rating(self.value),
            manufacturer: clamp_rating(self.manufacturer),
            safety: clamp_rating(self.safety),
            effectiveness: clamp_rating(self.effectiveness),
        }
    }

    /// Named scores, in display order
    pub fn scores(&self) -> [(&'static str, f64); 5] {
        [
            ("ingredients", self.ingredients),
            ("value", self.value),
            ("manufacturer", self.manufacturer),
            ("safety", self.safety),
            ("effectiveness", self.effectiveness),
        ]
    }

    pub fn average(&self) -> f64 {
        let scores = self.scores();
        scores.iter().map(|(_, score)| score).sum::<f64>() / scores.len() as f64
    }
}

/// Clamp a score into the rating range; NaN collapses to the minimum
pub fn clamp_rating(score: f64) -> f64 {
    if score.is_nan() {
        RATING_MIN
    } else {
        score.clamp(RATING_MIN, RATING_MAX)
    }
}

pub fn clamp_heading_level(level: u8) -> u8 {
    level.clamp(HEADING_LEVEL_MIN, HEADING_LEVEL_MAX)
}

pub fn rating_in_bounds(score: f64) -> bool {
    (RATING_MIN..=RATING_MAX).contains(&score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(BlockType::Heading, "heading")]
    #[case(BlockType::ProsCons, "pros-cons")]
    #[case(BlockType::Cta, "cta")]
    #[case(BlockType::Ingredients, "ingredients")]
    fn test_block_type_names_round_trip(#[case] block_type: BlockType, #[case] name: &str) {
        assert_eq!(block_type.to_string(), name);
        assert_eq!(name.parse::<BlockType>().unwrap(), block_type);
    }

    #[test]
    fn test_superseded_type_names_are_not_parsed() {
        assert_eq!(
            "productRating".parse::<BlockType>(),
            Err(UnknownBlockType("productRating".to_string()))
        );
    }

    #[test]
    fn test_block_serializes_with_flat_type_tag() {
        let block = Block {
            id: "b1".to_string(),
            order: 3,
            article_id: None,
            content: "Why magnesium?".to_string(),
            kind: BlockKind::Heading { level: 2 },
        };

        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": "b1",
                "order": 3,
                "content": "Why magnesium?",
                "type": "heading",
                "level": 2
            })
        );
    }

    #[test]
    fn test_cta_fields_use_camel_case() {
        let json = r##"{"id":"c","type":"cta","order":0,"buttonText":"Buy","buttonUrl":"https://shop","backgroundColor":"#fff"}"##;
        let block: Block = serde_json::from_str(json).unwrap();

        assert_eq!(
            block.kind,
            BlockKind::Cta {
                button_text: "Buy".to_string(),
                button_url: "https://shop".to_string(),
                background_color: Some("#fff".to_string()),
            }
        );
    }

    #[test]
    fn test_legacy_product_rating_reads_as_rating() {
        let json = r#"{"id":"r","type":"productRating","order":0,"productName":"Mag+","ratings":{"value":4.5}}"#;
        let block: Block = serde_json::from_str(json).unwrap();

        assert_eq!(block.block_type(), BlockType::Rating);
        assert_eq!(block.kind.product_name(), Some("Mag+"));
        let written = serde_json::to_value(&block).unwrap();
        assert_eq!(written["type"], "rating");
    }

    #[test]
    fn test_legacy_ingredients_section_reads_as_ingredients() {
        let json = r#"{"id":"i","type":"ingredientsSection","introduction":"Inside the capsule"}"#;
        let block: Block = serde_json::from_str(json).unwrap();

        assert_eq!(block.block_type(), BlockType::Ingredients);
        assert_eq!(block.order, 0);
    }

    #[test]
    fn test_unknown_type_fails_to_deserialize() {
        let json = r#"{"id":"x","type":"carousel","order":0}"#;
        assert!(serde_json::from_str::<Block>(json).is_err());
    }

    #[rstest]
    #[case(-1.0, 0.0)]
    #[case(2.5, 2.5)]
    #[case(7.0, 5.0)]
    #[case(f64::NAN, 0.0)]
    fn test_clamp_rating(#[case] input: f64, #[case] expected: f64) {
        assert_eq!(clamp_rating(input), expected);
    }

    #[test]
    fn test_heading_level_clamped() {
        assert_eq!(clamp_heading_level(0), 1);
        assert_eq!(clamp_heading_level(2), 2);
        assert_eq!(clamp_heading_level(6), 3);
    }

    #[test]
    fn test_next_type_wraps() {
        assert_eq!(BlockType::Heading.next(), BlockType::Paragraph);
        assert_eq!(BlockType::Ingredients.next(), BlockType::Heading);
    }

    #[test]
    fn test_child_list_ownership() {
        let block = Block {
            id: "p".to_string(),
            order: 0,
            article_id: None,
            content: String::new(),
            kind: BlockKind::ProsCons {
                pros: vec![],
                cons: vec![],
                ingredients: vec![],
            },
        };

        assert!(block.child_list(ChildList::Pros).is_some());
        assert!(block.child_list(ChildList::Ingredients).is_some());
        assert!(block.child_list(ChildList::Highlights).is_none());
    }
}
