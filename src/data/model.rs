use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::DatasetError;

/// Columns every review table must carry.
pub const REQUIRED_COLUMNS: [&str; 13] = [
    "make",
    "model",
    "assigned_topic",
    "make_cluster_perc",
    "assigned_topic_cluster_perc",
    "sentiment",
    "sentiment_score",
    "cluster",
    "vehicle_title",
    "review",
    "text_for_clustering",
    "strengths",
    "weaknesses",
];

/// Columns only the recommendation write-up reads. Checked at load time too,
/// so a table without them fails on startup instead of on the first click.
pub const RENDER_COLUMNS: [&str; 1] = ["rating"];

/// Topic label meaning "unclassified"; never offered as a choice.
pub const UNCLASSIFIED_TOPIC: &str = "other";

/// The only sentiment label eligible for recommendation.
pub const POSITIVE_SENTIMENT: &str = "positive";

// ---------------------------------------------------------------------------
// CellValue – a single cell of the source table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring the dtypes a review export can carry.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            // Whole floats keep their ".0", as a float column prints.
            CellValue::Float(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 => {
                write!(f, "{v:.1}")
            }
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Interpret the cell as a number. Null maps to NaN; text that does not
    /// parse yields `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Null => Some(f64::NAN),
            CellValue::String(s) => s.trim().parse().ok(),
            CellValue::Bool(_) => None,
        }
    }

    /// The cell cast to text, or `None` for a null cell.
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            other => Some(other.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// ReviewRecord – one row of the table
// ---------------------------------------------------------------------------

/// One enriched vehicle review.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRecord {
    pub make: String,
    pub model: String,
    pub vehicle_title: String,
    pub assigned_topic: String,
    /// Prevalence of the make within its cluster, in [0, 1].
    pub make_cluster_perc: f64,
    /// Prevalence of the assigned topic within its cluster, in [0, 1].
    pub assigned_topic_cluster_perc: f64,
    pub sentiment: String,
    pub sentiment_score: f64,
    /// Carried through for display, never ranked on.
    pub cluster: CellValue,
    pub review: String,
    pub text_for_clustering: String,
    pub strengths: String,
    pub weaknesses: String,
    /// Numeric or null; kept as a cell so it prints with its column's type.
    pub rating: CellValue,
}

impl ReviewRecord {
    /// Build a record from a row of named cells. Missing cells count as null.
    ///
    /// `row` is the zero-based data row number, used in error messages.
    pub fn from_cells(row: usize, cells: &BTreeMap<String, CellValue>) -> Result<Self, DatasetError> {
        let text = |col: &str| cell(cells, col).as_text().unwrap_or_default();
        let number = |col: &str| -> Result<f64, DatasetError> {
            let value = cell(cells, col);
            value.as_f64().ok_or_else(|| DatasetError::NonNumeric {
                row,
                column: col.to_string(),
                value: value.to_string(),
            })
        };

        let rating = match number("rating")? {
            r if r.is_nan() => CellValue::Null,
            _ => cell(cells, "rating").clone(),
        };

        Ok(ReviewRecord {
            make: text("make"),
            model: text("model"),
            vehicle_title: text("vehicle_title"),
            assigned_topic: text("assigned_topic"),
            make_cluster_perc: number("make_cluster_perc")?,
            assigned_topic_cluster_perc: number("assigned_topic_cluster_perc")?,
            sentiment: text("sentiment"),
            sentiment_score: number("sentiment_score")?,
            cluster: cell(cells, "cluster").clone(),
            review: text("review"),
            text_for_clustering: text("text_for_clustering"),
            strengths: text("strengths"),
            weaknesses: text("weaknesses"),
            rating,
        })
    }

    pub fn is_positive(&self) -> bool {
        self.sentiment == POSITIVE_SENTIMENT
    }

    /// The rating as a number, `None` when it is missing.
    pub fn rating_value(&self) -> Option<f64> {
        self.rating.as_f64().filter(|r| !r.is_nan())
    }
}

fn cell<'a>(cells: &'a BTreeMap<String, CellValue>, column: &str) -> &'a CellValue {
    const NULL: &CellValue = &CellValue::Null;
    cells.get(column).unwrap_or(NULL)
}

// ---------------------------------------------------------------------------
// ReviewTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The loaded review table with pre-computed filter options.
#[derive(Debug, Clone, Default)]
pub struct ReviewTable {
    /// All records, in file order.
    pub records: Vec<ReviewRecord>,
    /// Sorted unique non-null makes.
    pub makes: BTreeSet<String>,
    /// Sorted unique non-null topics, without the unclassified sentinel.
    pub topics: BTreeSet<String>,
}

impl ReviewTable {
    /// Validate the columns and convert raw rows into records.
    pub fn from_rows(
        column_names: Vec<String>,
        rows: Vec<BTreeMap<String, CellValue>>,
    ) -> Result<Self, DatasetError> {
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .chain(RENDER_COLUMNS.iter())
            .filter(|col| !column_names.iter().any(|c| c == *col))
            .map(|col| col.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(DatasetError::MissingColumns(missing));
        }

        let mut makes = BTreeSet::new();
        let mut topics = BTreeSet::new();
        let mut records = Vec::with_capacity(rows.len());

        for (i, cells) in rows.iter().enumerate() {
            if let Some(make) = cell(cells, "make").as_text() {
                makes.insert(make);
            }
            if let Some(topic) = cell(cells, "assigned_topic").as_text() {
                if !is_unclassified(&topic) {
                    topics.insert(topic);
                }
            }
            records.push(ReviewRecord::from_cells(i, cells)?);
        }

        Ok(ReviewTable {
            records,
            makes,
            topics,
        })
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Whether a topic label is the unclassified sentinel (case-insensitive).
pub fn is_unclassified(topic: &str) -> bool {
    topic.to_lowercase() == UNCLASSIFIED_TOPIC
}
