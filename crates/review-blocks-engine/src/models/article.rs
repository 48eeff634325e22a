use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::models::block::{
    Block, BlockKind, HEADING_LEVEL_MAX, HEADING_LEVEL_MIN, ProductRatings, rating_in_bounds,
};
use crate::models::child::ChildContent;

/// Sentinel id meaning "start a new article"
pub const NEW_ARTICLE_ID: &str = "new";

/// Full article record exchanged with the persistence backend.
///
/// Field names are the backend contract. Fields this crate does not model are
/// kept in `extra` so a load/save cycle does not drop them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Article {
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_number"
    )]
    pub id: Option<String>,
    pub title: String,
    pub slug: String,
    pub overview: String,
    pub description: String,
    pub product_name: String,
    pub overall_rating: f64,
    pub ratings: ProductRatings,
    pub structured_content: Vec<Block>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Backends disagree on whether ids are strings or numbers
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(id)) => Ok(Some(id)),
        Some(serde_json::Value::Number(id)) => Ok(Some(id.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string or numeric id, got {other}"
        ))),
    }
}

/// One failed field check
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All field checks that failed for an article; submission is blocked while non-empty
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{} field(s) failed validation: {}", .errors.len(), summarize(.errors))]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn for_field(&self, field: &str) -> impl Iterator<Item = &FieldError> {
        self.errors.iter().filter(move |e| e.field == field)
    }
}

impl Article {
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Check required fields and bounded values before submission
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();

        if self.title.trim().is_empty() {
            errors.push(FieldError::new("title", "is required"));
        }
        if !rating_in_bounds(self.overall_rating) {
            errors.push(FieldError::new("overallRating", "must be between 0 and 5"));
        }
        check_ratings("ratings", &self.ratings, &mut errors);

        for (index, block) in self.structured_content.iter().enumerate() {
            check_block(index, block, &mut errors);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors { errors })
        }
    }
}

fn check_ratings(prefix: &str, ratings: &ProductRatings, errors: &mut Vec<FieldError>) {
    for (name, score) in ratings.scores() {
        if !rating_in_bounds(score) {
            errors.push(FieldError::new(
                format!("{prefix}.{name}"),
                "must be between 0 and 5",
            ));
        }
    }
}

fn check_block(index: usize, block: &Block, errors: &mut Vec<FieldError>) {
    let prefix = format!("structuredContent[{index}]");
    match &block.kind {
        BlockKind::Heading { level } => {
            if !(HEADING_LEVEL_MIN..=HEADING_LEVEL_MAX).contains(level) {
                errors.push(FieldError::new(
                    format!("{prefix}.level"),
                    "must be between 1 and 3",
                ));
            }
        }
        BlockKind::Cta { button_url, .. } => {
            if button_url.trim().is_empty() {
                errors.push(FieldError::new(format!("{prefix}.buttonUrl"), "is required"));
            }
        }
        BlockKind::Rating { ratings, .. } => {
            check_ratings(&format!("{prefix}.ratings"), ratings, errors);
        }
        BlockKind::Ingredients { ingredients, .. } => {
            for (child_index, item) in ingredients.iter().enumerate() {
                if let ChildContent::Ingredient(detail) = &item.content
                    && detail.name.trim().is_empty()
                {
                    errors.push(FieldError::new(
                        format!("{prefix}.ingredients[{child_index}].name"),
                        "is required",
                    ));
                }
            }
        }
        BlockKind::Paragraph
        | BlockKind::Image { .. }
        | BlockKind::Quote { .. }
        | BlockKind::List { .. }
        | BlockKind::Code { .. }
        | BlockKind::Html
        | BlockKind::Divider
        | BlockKind::ProsCons { .. } => {}
    }
}
