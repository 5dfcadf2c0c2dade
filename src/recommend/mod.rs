//! Recommendation renderer: turn ranked candidates into written
//! recommendations, one text-generation call per vehicle.

pub mod generator;
pub mod prompt;
pub mod render;

use std::sync::Arc;

use crate::data::filter::Candidate;
use generator::{GenerationError, TextGenerator};
use prompt::{GenerationRequest, build_messages};

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Fixed parameters of every generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f64,
    /// Prime the request with the fixed example exchanges.
    pub few_shot: bool,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.into(),
            temperature: DEFAULT_TEMPERATURE,
            few_shot: false,
        }
    }
}

/// One rendered recommendation block.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub title: String,
    pub stars: String,
    pub summary: String,
    pub link: String,
    pub rank_score: f64,
}

/// Runs the generation calls for a set of candidates.
#[derive(Clone)]
pub struct Recommender {
    generator: Arc<dyn TextGenerator>,
    settings: GenerationSettings,
}

impl Recommender {
    pub fn new(generator: Arc<dyn TextGenerator>, settings: GenerationSettings) -> Self {
        Self { generator, settings }
    }

    pub fn request_for(&self, candidate: &Candidate) -> GenerationRequest {
        GenerationRequest {
            model: self.settings.model.clone(),
            messages: build_messages(&candidate.record, self.settings.few_shot),
            temperature: self.settings.temperature,
        }
    }

    /// Generate the recommendation for one candidate.
    pub fn recommend_one(&self, candidate: &Candidate) -> Result<Recommendation, GenerationError> {
        let record = &candidate.record;
        log::debug!("Generating recommendation for {}", record.vehicle_title);

        let text = self.generator.generate(&self.request_for(candidate))?;

        Ok(Recommendation {
            title: record.vehicle_title.clone(),
            stars: render::star_rating(record.rating_value()),
            summary: text.trim().to_string(),
            link: render::info_link(&record.make),
            rank_score: candidate.rank_score,
        })
    }

    /// Generate recommendations in ranked order, handing each to `emit` as
    /// soon as it is ready. The first failure stops the run; whatever was
    /// already emitted stays emitted.
    pub fn run<F>(&self, candidates: &[Candidate], mut emit: F) -> Result<(), GenerationError>
    where
        F: FnMut(Recommendation),
    {
        let mut summaries = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let rec = self.recommend_one(candidate).inspect_err(|e| {
                log::error!("Generation failed for {}: {e}", candidate.record.vehicle_title);
            })?;
            summaries.push(rec.summary.clone());
            emit(rec);
        }

        for (a, b) in render::repeated_openings(&summaries) {
            log::warn!(
                "Recommendations {} and {} open the same way: {:?}",
                a + 1,
                b + 1,
                render::opening_phrase(&summaries[b])
            );
        }
        Ok(())
    }
}
