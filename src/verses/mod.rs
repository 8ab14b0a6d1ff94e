//! Verse retrieval
//!
//! Category search first, a random verse when the category has no match,
//! and an offline verse when the live API fails. Selection never errors.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::models::{Category, Verse, VerseOrigin, VerseSelection};
use crate::Result;

pub mod fallback;
pub mod quran_api;

pub use fallback::offline_verse;
pub use quran_api::QuranApiClient;

pub const OFFLINE_NOTE: &str = "Live verse retrieval is unavailable right now, so this verse comes from a small offline collection.";

/// Trait for a live verse source
#[async_trait]
pub trait VerseSource: Send + Sync {
    /// A verse tagged with the category, `None` when the source has no match.
    async fn by_category(&self, category: Category) -> Result<Option<Verse>>;

    async fn random(&self) -> Result<Verse>;
}

pub struct VerseProvider {
    source: Arc<dyn VerseSource>,
}

impl VerseProvider {
    pub fn new(source: Arc<dyn VerseSource>) -> Self {
        Self { source }
    }

    pub async fn select(&self, category: Option<Category>) -> VerseSelection {
        if let Some(category) = category {
            match self.source.by_category(category).await {
                Ok(Some(verse)) => {
                    info!(category = %category, reference = %verse.reference, "Category verse retrieved");
                    return VerseSelection {
                        verse,
                        origin: VerseOrigin::CategoryMatch,
                        note: None,
                    };
                }
                Ok(None) => {
                    info!(category = %category, "No category match, using a random verse");
                }
                Err(e) => {
                    warn!("Verse search failed: {}", e);
                    return Self::offline(Some(category));
                }
            }
        }

        match self.source.random().await {
            Ok(verse) => VerseSelection {
                verse,
                origin: VerseOrigin::Random,
                note: None,
            },
            Err(e) => {
                warn!("Random verse retrieval failed: {}", e);
                Self::offline(category)
            }
        }
    }

    fn offline(category: Option<Category>) -> VerseSelection {
        VerseSelection {
            verse: offline_verse(category),
            origin: VerseOrigin::Offline,
            note: Some(OFFLINE_NOTE.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AgentError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Behavior {
        Match,
        NoMatch,
        Down,
    }

    struct StubSource {
        behavior: Behavior,
        random_calls: AtomicUsize,
    }

    impl StubSource {
        fn new(behavior: Behavior) -> Arc<Self> {
            Arc::new(Self { behavior, random_calls: AtomicUsize::new(0) })
        }
    }

    fn verse(reference: &str) -> Verse {
        Verse {
            reference: reference.to_string(),
            text: "نص".to_string(),
            translation: "translation".to_string(),
        }
    }

    #[async_trait]
    impl VerseSource for StubSource {
        async fn by_category(&self, _category: Category) -> Result<Option<Verse>> {
            match self.behavior {
                Behavior::Match => Ok(Some(verse("Al-Baqara 2:153"))),
                Behavior::NoMatch => Ok(None),
                Behavior::Down => Err(AgentError::VerseApi("connection refused".into())),
            }
        }

        async fn random(&self) -> Result<Verse> {
            self.random_calls.fetch_add(1, Ordering::SeqCst);
            match self.behavior {
                Behavior::Down => Err(AgentError::VerseApi("connection refused".into())),
                _ => Ok(verse("Ash-Sharh 94:6")),
            }
        }
    }

    #[tokio::test]
    async fn test_category_match() {
        let source = StubSource::new(Behavior::Match);
        let provider = VerseProvider::new(source.clone());

        let selection = provider.select(Some(Category::Patience)).await;
        assert_eq!(selection.origin, VerseOrigin::CategoryMatch);
        assert!(selection.note.is_none());
        assert_eq!(source.random_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_no_match_falls_back_to_random() {
        let provider = VerseProvider::new(StubSource::new(Behavior::NoMatch));

        let selection = provider.select(Some(Category::Strive)).await;
        assert_eq!(selection.origin, VerseOrigin::Random);
        assert_eq!(selection.verse.reference, "Ash-Sharh 94:6");
    }

    #[tokio::test]
    async fn test_no_category_uses_random() {
        let provider = VerseProvider::new(StubSource::new(Behavior::Match));

        let selection = provider.select(None).await;
        assert_eq!(selection.origin, VerseOrigin::Random);
    }

    #[tokio::test]
    async fn test_outage_uses_offline_verse() {
        let source = StubSource::new(Behavior::Down);
        let provider = VerseProvider::new(source.clone());

        let selection = provider.select(Some(Category::Gratitude)).await;
        assert_eq!(selection.origin, VerseOrigin::Offline);
        assert_eq!(selection.verse.reference, "Ibrahim 14:7");
        assert_eq!(selection.note.as_deref(), Some(OFFLINE_NOTE));
        assert_eq!(source.random_calls.load(Ordering::SeqCst), 0);
    }
}
