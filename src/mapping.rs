//! Mood → category lookup
//!
//! A static table: changing which theme a mood draws from means editing
//! `MOOD_TABLE`, not the pipeline.

use crate::models::{Category, MoodLabel};

/// (mood, primary category, related themes used as prompt context)
const MOOD_TABLE: &[(MoodLabel, Category, &[&str])] = &[
    (MoodLabel::Happy, Category::Joy, &["joy", "gratitude", "blessing"]),
    (MoodLabel::Sad, Category::Patience, &["patience", "hope", "comfort", "grief"]),
    (MoodLabel::Anxious, Category::Peace, &["peace", "trust", "guidance"]),
    (MoodLabel::Angry, Category::Forgiveness, &["forgiveness", "patience", "calm"]),
    (MoodLabel::Grateful, Category::Gratitude, &["gratitude", "thanks", "blessing"]),
    (MoodLabel::Stressed, Category::Peace, &["peace", "reliance", "ease"]),
    (MoodLabel::Hopeful, Category::Hope, &["hope", "mercy", "future"]),
    (MoodLabel::Fearful, Category::Protection, &["protection", "trust", "strength"]),
    (MoodLabel::Calm, Category::Tranquility, &["tranquility", "reflection", "peace"]),
    (MoodLabel::Lonely, Category::Companionship, &["companionship", "Allah", "nearness"]),
    (MoodLabel::Confused, Category::Guidance, &["guidance", "clarity", "wisdom"]),
    (MoodLabel::Motivated, Category::Strive, &["strive", "success", "effort"]),
    (MoodLabel::Tired, Category::Rest, &["rest", "ease", "strength"]),
    (MoodLabel::Thankful, Category::Gratitude, &["gratitude", "thanks", "blessing"]),
    (MoodLabel::Inspired, Category::Creation, &["creation", "signs", "knowledge"]),
];

/// Category a mood draws verses from. `None` for `Unknown`.
pub fn category_for(mood: MoodLabel) -> Option<Category> {
    MOOD_TABLE
        .iter()
        .find(|(m, _, _)| *m == mood)
        .map(|(_, category, _)| *category)
}

/// Related themes for a mood, empty when unmapped.
pub fn themes_for(mood: MoodLabel) -> &'static [&'static str] {
    MOOD_TABLE
        .iter()
        .find(|(m, _, _)| *m == mood)
        .map(|(_, _, themes)| *themes)
        .unwrap_or(&[])
}
