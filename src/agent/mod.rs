//! Mood agent - the request pipeline
//!
//! VALIDATE → CLASSIFY → (GREETING | SELF_INTRO | MOOD_MATCHED | MOOD_UNKNOWN) → RESPOND

use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::classifier::MoodClassifier;
use crate::composer::{
    ResponseComposer, CLARIFICATION_MESSAGE, GREETING_MESSAGE, IDENTITY_MESSAGE,
};
use crate::error::AgentError;
use crate::gemini::LanguageModel;
use crate::history::{recent_turns, ConversationTurn, MAX_HISTORY_TURNS};
use crate::models::{AgentResponse, Category, Interaction, InteractionKind, MoodLabel, SERVICE_NAME};
use crate::verses::{VerseProvider, VerseSource};
use crate::Result;

/// One validated user turn
#[derive(Debug, Clone, Default)]
pub struct AgentRequest {
    pub text: String,
    pub history: Vec<ConversationTurn>,
    /// Opaque conversation id, echoed back untouched
    pub session_id: Option<String>,
}

impl AgentRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

pub struct MoodAgent {
    classifier: MoodClassifier,
    verses: VerseProvider,
    composer: ResponseComposer,
}

impl MoodAgent {
    pub fn new(llm: Arc<dyn LanguageModel>, verse_source: Arc<dyn VerseSource>) -> Self {
        Self {
            classifier: MoodClassifier::new(llm.clone()),
            verses: VerseProvider::new(verse_source),
            composer: ResponseComposer::new(llm),
        }
    }

    /// Run the pipeline for one message
    pub async fn respond(&self, request: AgentRequest) -> Result<AgentResponse> {
        let start_time = Instant::now();

        let text = request.text.trim();
        if text.is_empty() {
            return Err(AgentError::InvalidRequest(
                "I didn't receive a clear message. Please try again.".to_string(),
            ));
        }

        let history = recent_turns(&request.history, MAX_HISTORY_TURNS);

        info!(
            session_id = request.session_id.as_deref().unwrap_or("-"),
            history_turns = history.len(),
            "Agent: message received"
        );

        let interaction = self.classifier.classify_interaction(text, &history).await;
        info!(
            interaction = ?interaction.kind(),
            mood = %interaction.mood(),
            "Agent: message classified"
        );

        let mut response = match interaction {
            Interaction::Greeting => Self::fixed_reply(GREETING_MESSAGE, InteractionKind::Greeting),
            Interaction::SelfIntro => Self::fixed_reply(IDENTITY_MESSAGE, InteractionKind::SelfIntro),
            Interaction::MoodUnknown { mood } => Self::clarify(mood),
            Interaction::MoodMatched { mood, category } => {
                self.mood_matched(mood, category, text, &history).await
            }
        };
        response.session_id = request.session_id;

        info!(
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            has_verse = response.verse.is_some(),
            "Agent: response composed"
        );

        Ok(response)
    }

    fn fixed_reply(message: &str, interaction: InteractionKind) -> AgentResponse {
        AgentResponse {
            message: message.to_string(),
            mood_detected: MoodLabel::Unknown,
            verse: None,
            interaction,
            note: None,
            session_id: None,
            source: SERVICE_NAME.to_string(),
        }
    }

    fn clarify(mood: MoodLabel) -> AgentResponse {
        AgentResponse {
            mood_detected: mood,
            ..Self::fixed_reply(CLARIFICATION_MESSAGE, InteractionKind::MoodUnknown)
        }
    }

    async fn mood_matched(
        &self,
        mood: MoodLabel,
        category: Category,
        text: &str,
        history: &[ConversationTurn],
    ) -> AgentResponse {
        let selection = self.verses.select(Some(category)).await;

        let message = self
            .composer
            .explain(mood, Some(category), text, &selection, history)
            .await;

        AgentResponse {
            message,
            mood_detected: mood,
            verse: Some(selection.verse),
            interaction: InteractionKind::MoodMatched,
            note: selection.note,
            session_id: None,
            source: SERVICE_NAME.to_string(),
        }
    }
}
