//! Core data models for the mood agent

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

//
// ================= Mood =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MoodLabel {
    Happy,
    Sad,
    Anxious,
    Angry,
    Grateful,
    Stressed,
    Hopeful,
    Fearful,
    Calm,
    Lonely,
    Confused,
    Motivated,
    Tired,
    Thankful,
    Inspired,
    Unknown,
}

impl MoodLabel {
    /// Every classifiable mood, excluding the `Unknown` sentinel.
    pub const KNOWN: [MoodLabel; 15] = [
        MoodLabel::Happy,
        MoodLabel::Sad,
        MoodLabel::Anxious,
        MoodLabel::Angry,
        MoodLabel::Grateful,
        MoodLabel::Stressed,
        MoodLabel::Hopeful,
        MoodLabel::Fearful,
        MoodLabel::Calm,
        MoodLabel::Lonely,
        MoodLabel::Confused,
        MoodLabel::Motivated,
        MoodLabel::Tired,
        MoodLabel::Thankful,
        MoodLabel::Inspired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MoodLabel::Happy => "happy",
            MoodLabel::Sad => "sad",
            MoodLabel::Anxious => "anxious",
            MoodLabel::Angry => "angry",
            MoodLabel::Grateful => "grateful",
            MoodLabel::Stressed => "stressed",
            MoodLabel::Hopeful => "hopeful",
            MoodLabel::Fearful => "fearful",
            MoodLabel::Calm => "calm",
            MoodLabel::Lonely => "lonely",
            MoodLabel::Confused => "confused",
            MoodLabel::Motivated => "motivated",
            MoodLabel::Tired => "tired",
            MoodLabel::Thankful => "thankful",
            MoodLabel::Inspired => "inspired",
            MoodLabel::Unknown => "unknown",
        }
    }

    pub fn is_unknown(&self) -> bool {
        *self == MoodLabel::Unknown
    }
}

impl FromStr for MoodLabel {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        if lowered == "unknown" {
            return Ok(MoodLabel::Unknown);
        }
        MoodLabel::KNOWN
            .iter()
            .copied()
            .find(|mood| mood.as_str() == lowered)
            .ok_or(())
    }
}

impl fmt::Display for MoodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

//
// ================= Category =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Joy,
    Patience,
    Peace,
    Forgiveness,
    Gratitude,
    Hope,
    Protection,
    Tranquility,
    Companionship,
    Guidance,
    Strive,
    Rest,
    Creation,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Joy => "joy",
            Category::Patience => "patience",
            Category::Peace => "peace",
            Category::Forgiveness => "forgiveness",
            Category::Gratitude => "gratitude",
            Category::Hope => "hope",
            Category::Protection => "protection",
            Category::Tranquility => "tranquility",
            Category::Companionship => "companionship",
            Category::Guidance => "guidance",
            Category::Strive => "strive",
            Category::Rest => "rest",
            Category::Creation => "creation",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

//
// ================= Verse =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Verse {
    /// e.g. "Al-Baqara 2:153"
    pub reference: String,
    /// Arabic source text
    pub text: String,
    /// English rendering of `text`
    pub translation: String,
}

impl fmt::Display for Verse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" (Quran {})", self.translation, self.reference)
    }
}

/// How a verse was obtained.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VerseOrigin {
    /// Live API result matched to the requested category
    CategoryMatch,
    /// Live API result picked at random
    Random,
    /// Embedded verse used because the live API failed
    Offline,
}

#[derive(Debug, Clone)]
pub struct VerseSelection {
    pub verse: Verse,
    pub origin: VerseOrigin,
    /// User-facing notice when live retrieval failed
    pub note: Option<String>,
}

//
// ================= Interaction =================
//

/// Which branch handled a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    Greeting,
    SelfIntro,
    MoodMatched { mood: MoodLabel, category: Category },
    MoodUnknown { mood: MoodLabel },
}

impl Interaction {
    pub fn kind(&self) -> InteractionKind {
        match self {
            Interaction::Greeting => InteractionKind::Greeting,
            Interaction::SelfIntro => InteractionKind::SelfIntro,
            Interaction::MoodMatched { .. } => InteractionKind::MoodMatched,
            Interaction::MoodUnknown { .. } => InteractionKind::MoodUnknown,
        }
    }

    pub fn mood(&self) -> MoodLabel {
        match self {
            Interaction::MoodMatched { mood, .. } | Interaction::MoodUnknown { mood } => *mood,
            Interaction::Greeting | Interaction::SelfIntro => MoodLabel::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    Greeting,
    SelfIntro,
    MoodMatched,
    MoodUnknown,
}

//
// ================= Response =================
//

pub const SERVICE_NAME: &str = "Quran Mood Agent";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResponse {
    pub message: String,
    pub mood_detected: MoodLabel,
    pub verse: Option<Verse>,
    pub interaction: InteractionKind,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub session_id: Option<String>,
    pub source: String,
}

impl AgentResponse {
    /// Single text block for clients that only display text.
    pub fn render_text(&self) -> String {
        let mut text = match &self.verse {
            Some(verse) => format!(
                "Verse: {}\n{}\n\nExplanation: {}",
                verse.text, verse, self.message
            ),
            None => self.message.clone(),
        };

        if let Some(note) = &self.note {
            text.push_str("\n\nNote: ");
            text.push_str(note);
        }

        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_text() {
        let mut response = AgentResponse {
            message: "Patience brings relief.".to_string(),
            mood_detected: MoodLabel::Sad,
            verse: Some(Verse {
                reference: "Al-Baqara 2:153".to_string(),
                text: "إِنَّ اللَّهَ مَعَ الصَّابِرِينَ".to_string(),
                translation: "Indeed, Allah is with the patient.".to_string(),
            }),
            interaction: InteractionKind::MoodMatched,
            note: None,
            session_id: None,
            source: SERVICE_NAME.to_string(),
        };

        let text = response.render_text();
        assert!(text.starts_with(
            "Verse: إِنَّ اللَّهَ مَعَ الصَّابِرِينَ\n\"Indeed, Allah is with the patient.\" (Quran Al-Baqara 2:153)"
        ));
        assert!(text.ends_with("Explanation: Patience brings relief."));

        response.note = Some("offline".to_string());
        assert!(response.render_text().ends_with("Note: offline"));

        response.verse = None;
        response.note = None;
        assert_eq!(response.render_text(), "Patience brings relief.");
    }

    #[test]
    fn test_mood_parsing() {
        assert_eq!("sad".parse::<MoodLabel>(), Ok(MoodLabel::Sad));
        assert_eq!(" Grateful ".parse::<MoodLabel>(), Ok(MoodLabel::Grateful));
        assert_eq!("unknown".parse::<MoodLabel>(), Ok(MoodLabel::Unknown));
        assert!("excited".parse::<MoodLabel>().is_err());
        assert!("".parse::<MoodLabel>().is_err());
    }

    #[test]
    fn test_mood_serializes_lowercase() {
        let json = serde_json::to_string(&MoodLabel::Anxious).unwrap();
        assert_eq!(json, "\"anxious\"");
        for mood in MoodLabel::KNOWN {
            let json = serde_json::to_string(&mood).unwrap();
            assert_eq!(json, format!("\"{}\"", mood));
        }
    }

    #[test]
    fn test_verse_display() {
        let verse = Verse {
            reference: "Ash-Sharh 94:5".to_string(),
            text: "فَإِنَّ مَعَ الْعُسْرِ يُسْرًا".to_string(),
            translation: "For indeed, with hardship [will be] ease.".to_string(),
        };
        assert_eq!(
            verse.to_string(),
            "\"For indeed, with hardship [will be] ease.\" (Quran Ash-Sharh 94:5)"
        );
    }

    #[test]
    fn test_response_omits_empty_optionals() {
        let response = AgentResponse {
            message: "Hi".to_string(),
            mood_detected: MoodLabel::Unknown,
            verse: None,
            interaction: InteractionKind::Greeting,
            note: None,
            session_id: None,
            source: SERVICE_NAME.to_string(),
        };
        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("note").is_none());
        assert!(value.get("session_id").is_none());
        assert!(value["verse"].is_null());
        assert_eq!(value["interaction"], "greeting");
    }
}
