use serde::{Deserialize, Serialize};

use crate::data::model::{CellValue, ReviewRecord};

pub const SYSTEM_INSTRUCTION: &str = "You are a friendly automotive reviewer.";

/// Fixed example exchanges for style conditioning: (request, answer).
pub const FEW_SHOT: [(&str, &str); 2] = [
    (
        "2025 Mercedes SL: Smooth ride, powerful V8...",
        "The 2025 Mercedes-Benz SL remains a benchmark...",
    ),
    (
        "2025 Toyota Camry: Reliable sedan...",
        "The 2025 Toyota Camry delivers class-leading reliability...",
    ),
];

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".into(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".into(), content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: "assistant".into(), content: content.into() }
    }
}

/// Everything one call to the text-generation service needs.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
}

/// The user instruction for one vehicle.
pub fn user_instruction(record: &ReviewRecord) -> String {
    format!(
        "Write a friendly, step-by-step review of {title}, highlighting {highlights}. \
         Mention its strengths ({strengths}) and cons ({weaknesses}). \
         Note the rating ({rating}/5) and sentiment score ({score:.2}).\
         Assume that the reader has not purchased his or her vehicle yet and you help him/her decide. \
         So avoid saying Congratulations on your new car. \
         Use different greetings in every car review. \
         Make sure that the beginning of the review is different for each recommended car. \
         Do not use the same greeting for every car review. ",
        title = record.vehicle_title,
        highlights = record.text_for_clustering,
        strengths = record.strengths,
        weaknesses = record.weaknesses,
        rating = format_rating(&record.rating),
        score = record.sentiment_score,
    )
}

/// Message list for one vehicle: system framing, optional few-shot pairs,
/// then the vehicle-specific instruction.
pub fn build_messages(record: &ReviewRecord, few_shot: bool) -> Vec<ChatMessage> {
    let mut messages = vec![ChatMessage::system(SYSTEM_INSTRUCTION)];
    if few_shot {
        for (ask, answer) in FEW_SHOT {
            messages.push(ChatMessage::user(ask));
            messages.push(ChatMessage::assistant(answer));
        }
    }
    messages.push(ChatMessage::user(user_instruction(record)));
    messages
}

fn format_rating(rating: &CellValue) -> String {
    match rating {
        CellValue::Null => "n/a".to_string(),
        other => other.to_string(),
    }
}
