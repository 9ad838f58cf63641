//! Field candidate data models.

use serde::{Deserialize, Serialize};

use crate::value::{TypedValue, ValueShape};

/// A proposed structured field mined from free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldCandidate {
    /// Label text as captured, trimmed, original casing.
    pub label: String,

    /// Value text as captured, trimmed.
    pub value: String,

    /// Canonical schema field, or the snake_case form of the label.
    pub matched_field: String,

    /// Confidence score (0.0 - 1.0).
    pub confidence: f32,

    /// Strategy that claimed the label.
    pub strategy: Strategy,

    /// Shape of the value.
    pub shape: ValueShape,
}

impl FieldCandidate {
    /// Interpret the value as a typed value for storage.
    pub fn interpret(&self) -> TypedValue {
        TypedValue::interpret(&self.value)
    }

    /// Whether the confidence reaches `threshold`.
    pub fn is_high_confidence(&self, threshold: f32) -> bool {
        self.confidence >= threshold
    }
}

/// Extraction strategies, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// `Label: value`
    Colon,
    /// `Label = value` or `Label - value`
    Separator,
    /// `Label $1,234.56`
    Dollar,
    /// `Label    value` (whitespace-aligned)
    Table,
    /// Known date labels followed by a date.
    Date,
}

impl Strategy {
    /// All strategies in the order they run.
    pub const ORDER: [Strategy; 5] = [
        Strategy::Colon,
        Strategy::Separator,
        Strategy::Dollar,
        Strategy::Table,
        Strategy::Date,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Colon => "colon",
            Strategy::Separator => "separator",
            Strategy::Dollar => "dollar",
            Strategy::Table => "table",
            Strategy::Date => "date",
        }
    }
}

/// Semantic bucket for a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Financial,
    Coverage,
    Dates,
    Identifiers,
    Contact,
    Other,
}

impl Category {
    /// All categories in the order they are checked.
    pub const ALL: [Category; 6] = [
        Category::Financial,
        Category::Coverage,
        Category::Dates,
        Category::Identifiers,
        Category::Contact,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Financial => "financial",
            Category::Coverage => "coverage",
            Category::Dates => "dates",
            Category::Identifiers => "identifiers",
            Category::Contact => "contact",
            Category::Other => "other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Candidates partitioned into the six categories.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategorizedFields {
    pub financial: Vec<FieldCandidate>,
    pub coverage: Vec<FieldCandidate>,
    pub dates: Vec<FieldCandidate>,
    pub identifiers: Vec<FieldCandidate>,
    pub contact: Vec<FieldCandidate>,
    pub other: Vec<FieldCandidate>,
}

impl CategorizedFields {
    /// Candidates in one bucket.
    pub fn bucket(&self, category: Category) -> &[FieldCandidate] {
        match category {
            Category::Financial => &self.financial,
            Category::Coverage => &self.coverage,
            Category::Dates => &self.dates,
            Category::Identifiers => &self.identifiers,
            Category::Contact => &self.contact,
            Category::Other => &self.other,
        }
    }

    pub(crate) fn bucket_mut(&mut self, category: Category) -> &mut Vec<FieldCandidate> {
        match category {
            Category::Financial => &mut self.financial,
            Category::Coverage => &mut self.coverage,
            Category::Dates => &mut self.dates,
            Category::Identifiers => &mut self.identifiers,
            Category::Contact => &mut self.contact,
            Category::Other => &mut self.other,
        }
    }

    /// Total candidates across all buckets.
    pub fn len(&self) -> usize {
        Category::ALL.iter().map(|c| self.bucket(*c).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bucket holding the candidate with `label`, if any.
    pub fn category_of(&self, label: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|c| self.bucket(*c).iter().any(|f| f.label == label))
    }
}

/// Summary numbers for one extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionSummary {
    /// Number of accepted candidates.
    pub total_fields: usize,

    /// Candidates at or above the high-confidence threshold.
    pub high_confidence_count: usize,

    /// Input length in characters.
    pub text_length: usize,

    /// Number of newlines in the input.
    pub line_count: usize,
}

/// Full output of one extraction call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionReport {
    /// Candidates, highest confidence first.
    pub fields: Vec<FieldCandidate>,

    /// Candidates grouped by category.
    pub categories: CategorizedFields,

    /// Caller-supplied document type, passed through untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,

    /// Overall extraction quality (0.0 - 1.0).
    pub quality_score: f32,

    /// Counts and input metadata.
    pub summary: ExtractionSummary,
}

impl ExtractionReport {
    /// Candidate with the given label.
    pub fn field(&self, label: &str) -> Option<&FieldCandidate> {
        self.fields.iter().find(|f| f.label == label)
    }

    /// First candidate resolved to the given schema field.
    pub fn matched(&self, matched_field: &str) -> Option<&FieldCandidate> {
        self.fields.iter().find(|f| f.matched_field == matched_field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
