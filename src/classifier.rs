//! Interaction Classifier
//!
//! Two stages:
//! - Intent: greetings and "who are you" questions, matched by keyword with no
//!   outbound call
//! - Mood: a single-word label from the LLM, coerced to `unknown` on any failure

use std::sync::Arc;
use tracing::{debug, warn};

use crate::gemini::LanguageModel;
use crate::history::ConversationTurn;
use crate::mapping;
use crate::models::{Interaction, MoodLabel};

/// Static keyword lists
const GREETING_WORDS: &[&str] = &[
    "hello", "hi", "hey", "hiya", "salam", "salaam", "assalamu", "asalamu", "greetings", "yo",
];

/// Filler allowed alongside a greeting word ("hi there", "hello friend")
const GREETING_FILLER: &[&str] = &[
    "there", "friend", "agent", "bot", "alaikum", "alaykum", "everyone", "again", "good",
    "morning", "evening", "afternoon",
];

const SELF_INTRO_PHRASES: &[&str] = &[
    "who are you",
    "what are you",
    "who r u",
    "introduce yourself",
    "tell me about yourself",
    "what is your name",
    "what's your name",
    "whats your name",
    "what can you do",
    "what do you do",
];

/// Politeness allowed around a self-intro question ("please introduce yourself")
const SELF_INTRO_FILLER: &[&str] = &["please", "exactly", "again", "anyway"];

/// Intent detected before any LLM call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    SelfIntro,
    MoodSharing,
}

/// Keyword-based intent check
pub fn detect_intent(text: &str) -> Intent {
    let words = words(&text.to_lowercase());

    if is_self_intro(&words) {
        return Intent::SelfIntro;
    }

    let greets = words.first().is_some_and(|w| GREETING_WORDS.contains(&w.as_str()));
    let only_pleasantries = words
        .iter()
        .all(|w| GREETING_WORDS.contains(&w.as_str()) || GREETING_FILLER.contains(&w.as_str()));

    if greets && only_pleasantries {
        Intent::Greeting
    } else {
        Intent::MoodSharing
    }
}

fn is_pleasantry(word: &str) -> bool {
    GREETING_WORDS.contains(&word)
        || GREETING_FILLER.contains(&word)
        || SELF_INTRO_FILLER.contains(&word)
}

/// The message is a self-intro question and nothing more: optional
/// pleasantries, one phrase on word boundaries, optional pleasantries.
fn is_self_intro(words: &[String]) -> bool {
    let start = words.iter().take_while(|w| is_pleasantry(w)).count();
    let rest = &words[start..];

    SELF_INTRO_PHRASES.iter().any(|phrase| {
        let phrase: Vec<&str> = phrase.split(' ').collect();
        rest.len() >= phrase.len()
            && rest.iter().zip(&phrase).all(|(w, p)| w == p)
            && rest[phrase.len()..].iter().all(|w| is_pleasantry(w))
    })
}

fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .map(|w| w.trim_matches('\'').to_string())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Parse the LLM reply into a mood label.
///
/// Only the first word counts; anything outside the closed set is `Unknown`.
pub fn parse_mood(reply: &str) -> MoodLabel {
    let lowered = reply.to_lowercase();
    let first = lowered
        .split(|c: char| !c.is_alphabetic())
        .find(|w| !w.is_empty())
        .unwrap_or("");

    first.parse::<MoodLabel>().unwrap_or(MoodLabel::Unknown)
}

fn mood_instruction() -> String {
    let labels: Vec<&str> = MoodLabel::KNOWN.iter().map(|m| m.as_str()).collect();
    format!(
        "You identify the primary mood expressed in a user's message. \
         Respond with exactly one lowercase word from this list: {}. \
         If the mood is unclear or neutral, respond with 'unknown'. \
         Do not add punctuation or explanation.",
        labels.join(", ")
    )
}

/// LLM-backed mood classifier
pub struct MoodClassifier {
    llm: Arc<dyn LanguageModel>,
    instruction: String,
}

impl MoodClassifier {
    pub fn new(llm: Arc<dyn LanguageModel>) -> Self {
        Self {
            llm,
            instruction: mood_instruction(),
        }
    }

    /// Classify a message. Never fails: errors become `Unknown`.
    pub async fn classify(&self, text: &str, history: &[ConversationTurn]) -> MoodLabel {
        let prompt = format!("Text: '{}'\nMood:", text);
        debug!("Mood prompt: {}", prompt);

        match self.llm.generate(&self.instruction, history, &prompt).await {
            Ok(reply) => {
                let mood = parse_mood(&reply);
                if mood.is_unknown() {
                    debug!(raw = %reply.trim(), "LLM reply outside the mood set");
                }
                mood
            }
            Err(e) => {
                warn!("Mood classification failed, treating as unknown: {}", e);
                MoodLabel::Unknown
            }
        }
    }

    /// Resolve the branch for a message.
    pub async fn classify_interaction(
        &self,
        text: &str,
        history: &[ConversationTurn],
    ) -> Interaction {
        match detect_intent(text) {
            Intent::Greeting => Interaction::Greeting,
            Intent::SelfIntro => Interaction::SelfIntro,
            Intent::MoodSharing => {
                let mood = self.classify(text, history).await;
                match mapping::category_for(mood) {
                    Some(category) => Interaction::MoodMatched { mood, category },
                    None => Interaction::MoodUnknown { mood },
                }
            }
        }
    }
}
