use std::collections::{BTreeSet, HashSet};

use super::model::{ReviewRecord, ReviewTable};

/// How many candidates a recommendation run covers.
pub const TOP_N: usize = 3;

const MAKE_WEIGHT: f64 = 0.4;
const TOPIC_WEIGHT: f64 = 0.4;
const SENTIMENT_WEIGHT: f64 = 0.2;

// ---------------------------------------------------------------------------
// Selection: which makes and topics the user picked
// ---------------------------------------------------------------------------

/// User selection. An empty set means "no filter" for that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub topics: BTreeSet<String>,
    pub makes: BTreeSet<String>,
}

impl Selection {
    pub fn new<T, M>(topics: T, makes: M) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        M: IntoIterator,
        M::Item: Into<String>,
    {
        Selection {
            topics: topics.into_iter().map(Into::into).collect(),
            makes: makes.into_iter().map(Into::into).collect(),
        }
    }

    /// Drop every value the table does not offer as an option. This is what
    /// keeps the unclassified topic out of any selection.
    pub fn restricted_to(&self, table: &ReviewTable) -> Self {
        Selection {
            topics: self.topics.intersection(&table.topics).cloned().collect(),
            makes: self.makes.intersection(&table.makes).cloned().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// A record that survived filtering, with its composite score.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub record: ReviewRecord,
    pub rank_score: f64,
}

/// `0.4 * make prevalence + 0.4 * topic prevalence + 0.2 * sentiment confidence`.
pub fn rank_score(record: &ReviewRecord) -> f64 {
    MAKE_WEIGHT * record.make_cluster_perc
        + TOPIC_WEIGHT * record.assigned_topic_cluster_perc
        + SENTIMENT_WEIGHT * record.sentiment_score
}

/// Filter, score, deduplicate and pick the best [`TOP_N`] records.
///
/// Steps, in order:
/// * keep rows whose make is selected (all rows when no make is selected)
/// * keep rows whose topic is selected (all rows when no topic is selected)
/// * keep positive-sentiment rows only
/// * keep the first row per `(make, model)` pair
/// * stable sort by `rank_score` descending, so ties keep file order
///
/// Rows with a NaN score never make the cut. The table is not touched; the
/// result is a fresh copy.
pub fn rank_candidates(table: &ReviewTable, selection: &Selection) -> Vec<Candidate> {
    let mut seen: HashSet<(&str, &str)> = HashSet::new();

    let mut candidates: Vec<Candidate> = table
        .records
        .iter()
        .filter(|r| selection.makes.is_empty() || selection.makes.contains(&r.make))
        .filter(|r| selection.topics.is_empty() || selection.topics.contains(&r.assigned_topic))
        .filter(|r| r.is_positive())
        .filter(|r| seen.insert((r.make.as_str(), r.model.as_str())))
        .map(|r| Candidate {
            rank_score: rank_score(r),
            record: r.clone(),
        })
        .filter(|c| !c.rank_score.is_nan())
        .collect();

    candidates.sort_by(|a, b| b.rank_score.total_cmp(&a.rank_score));
    candidates.truncate(TOP_N);
    candidates
}
