//! Response composition
//!
//! Fixed replies for greetings, self-introduction and unclear moods; an LLM
//! reflection for verses, with a templated reflection when the LLM fails.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::gemini::LanguageModel;
use crate::history::ConversationTurn;
use crate::mapping;
use crate::models::{Category, MoodLabel, Verse, VerseOrigin, VerseSelection};

pub const GREETING_MESSAGE: &str = "Assalamu Alaikum! I am your Quran Mood Agent. Tell me how you're feeling, and I'll find a relevant Quranic verse for you.";

pub const IDENTITY_MESSAGE: &str = "I am the Quran Mood Agent. Share how you're feeling and I'll suggest a verse from the Quran that speaks to that mood, along with a short reflection on why it fits.";

pub const CLARIFICATION_MESSAGE: &str = "I couldn't understand your mood. Please try expressing it more clearly, for example \"I feel anxious\" or \"I'm grateful today\", so I can find a relevant Quran quote.";

const PERSONA: &str = "You are a compassionate and knowledgeable Quranic assistant. Your primary \
goal is to provide comfort, guidance, and relevant Quranic verses to users based on their \
emotional state. Keep responses empathetic and concise: one short paragraph, no headings, \
and do not quote other verses.";

pub struct ResponseComposer {
    llm: Arc<dyn LanguageModel>,
}

impl ResponseComposer {
    pub fn new(llm: Arc<dyn LanguageModel>) -> Self {
        Self { llm }
    }

    /// Explain how the selected verse speaks to the user's mood.
    pub async fn explain(
        &self,
        mood: MoodLabel,
        category: Option<Category>,
        user_message: &str,
        selection: &VerseSelection,
        history: &[ConversationTurn],
    ) -> String {
        let prompt = build_prompt(mood, category, user_message, selection);
        debug!("Explanation prompt: {}", prompt);

        match self.llm.generate(PERSONA, history, &prompt).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => {
                warn!("LLM returned an empty explanation, using template");
                templated_explanation(mood, &selection.verse)
            }
            Err(e) => {
                warn!("Explanation generation failed, using template: {}", e);
                templated_explanation(mood, &selection.verse)
            }
        }
    }
}

fn build_prompt(
    mood: MoodLabel,
    category: Option<Category>,
    user_message: &str,
    selection: &VerseSelection,
) -> String {
    let mut prompt = format!(
        "The user is feeling {} because they said: \"{}\".\n",
        mood, user_message
    );

    match (selection.origin, category) {
        (VerseOrigin::CategoryMatch, Some(category)) => {
            prompt.push_str(&format!(
                "Here is a Quranic verse on the theme of {} (related themes: {}): {}.\n",
                category,
                mapping::themes_for(mood).join(", "),
                selection.verse
            ));
            prompt.push_str(&format!(
                "Explain in one short paragraph how this verse addresses someone feeling {}.",
                mood
            ));
        }
        _ => {
            prompt.push_str(&format!(
                "Here is a Quranic verse: {}.\n\
                 It was not chosen specifically for this mood. \
                 Explain in one short paragraph how it can still be relevant or comforting to someone feeling {}.",
                selection.verse, mood
            ));
        }
    }

    prompt
}

/// Reflection used when the LLM is unavailable.
pub fn templated_explanation(mood: MoodLabel, verse: &Verse) -> String {
    format!(
        "I couldn't prepare a tailored reflection right now, but here is something to hold on to while you're feeling {}: {}. \
         Take a quiet moment with these words and let them remind you that you are not alone in what you feel.",
        mood, verse
    )
}
