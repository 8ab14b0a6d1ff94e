//! alquran.cloud client
//!
//! `search/{keyword}/all/{edition}` finds ayahs for a category and
//! `ayah/{number}/editions/quran-uthmani,{edition}` fetches the Arabic text
//! together with the translation.

use async_trait::async_trait;
use rand::Rng;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::VerseSource;
use crate::config::AgentConfig;
use crate::error::AgentError;
use crate::models::{Category, Verse};
use crate::Result;

/// Ayahs in the Quran, numbered globally from 1.
pub const TOTAL_AYAHS: u32 = 6236;

/// Edition holding the Arabic source text.
pub const ARABIC_EDITION: &str = "quran-uthmani";

#[derive(Clone)]
pub struct QuranApiClient {
    client: Client,
    base_url: String,
    edition: String,
}

impl QuranApiClient {
    pub fn new(base_url: &str, edition: &str) -> Result<Self> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(60))
            .pool_max_idle_per_host(8)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            edition: edition.to_string(),
        })
    }

    pub fn from_config(config: &AgentConfig) -> Result<Self> {
        Self::new(&config.quran_api_base_url, &config.quran_edition)
    }

    /// GET a path; `Ok(None)` when the API answers 404.
    async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let url = format!("{}{}", self.base_url, path);

        let response = self.client.get(&url).send().await.map_err(|e| {
            AgentError::VerseApi(format!("Verse API request failed for {}: {}", path, e))
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("Verse API has nothing for {}", path);
            return Ok(None);
        }
        if !status.is_success() {
            return Err(AgentError::VerseApi(format!(
                "Verse API returned {} for {}",
                status, path
            )));
        }

        let envelope = response
            .json::<ApiEnvelope<T>>()
            .await
            .map_err(|e| AgentError::VerseApi(format!("Invalid verse API response: {}", e)))?;

        Ok(Some(envelope.data))
    }
}

#[async_trait]
impl VerseSource for QuranApiClient {
    async fn by_category(&self, category: Category) -> Result<Option<Verse>> {
        let path = format!("/search/{}/all/{}", category.as_str(), self.edition);

        let Some(result) = self.get_data::<SearchData>(&path).await? else {
            return Ok(None);
        };

        if result.matches.is_empty() {
            return Ok(None);
        }

        let index = rand::thread_rng().gen_range(0..result.matches.len());
        let number = result.matches[index].number;
        debug!(
            category = %category,
            count = result.count.unwrap_or(result.matches.len()),
            "Picked search match {} (ayah {})",
            index,
            number
        );

        self.verse_by_number(number).await.map(Some)
    }

    async fn random(&self) -> Result<Verse> {
        let number: u32 = rand::thread_rng().gen_range(1..=TOTAL_AYAHS);
        self.verse_by_number(number).await
    }
}

impl QuranApiClient {
    /// Arabic text and translation of one ayah by its global number.
    async fn verse_by_number(&self, number: u32) -> Result<Verse> {
        let path = format!("/ayah/{}/editions/{},{}", number, ARABIC_EDITION, self.edition);

        match self.get_data::<Vec<Ayah>>(&path).await? {
            Some(ayahs) => pair_into_verse(ayahs, &self.edition),
            None => {
                warn!("Verse API returned 404 for ayah {}", number);
                Err(AgentError::VerseApi(format!("Ayah {} not found", number)))
            }
        }
    }
}

//
// ================= Wire types =================
//

#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct SearchData {
    count: Option<usize>,
    #[serde(default)]
    matches: Vec<Ayah>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Ayah {
    /// Global ayah number, 1..=6236
    number: u32,
    text: String,
    number_in_surah: u32,
    surah: SurahInfo,
    edition: EditionInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SurahInfo {
    number: u32,
    english_name: String,
}

#[derive(Debug, Deserialize)]
struct EditionInfo {
    identifier: String,
}

/// Join the Arabic and translated editions of one ayah.
fn pair_into_verse(ayahs: Vec<Ayah>, edition: &str) -> Result<Verse> {
    let mut arabic = None;
    let mut translated = None;

    for ayah in ayahs {
        if ayah.edition.identifier == ARABIC_EDITION {
            arabic = Some(ayah);
        } else if ayah.edition.identifier == edition {
            translated = Some(ayah);
        }
    }

    let (Some(arabic), Some(translated)) = (arabic, translated) else {
        return Err(AgentError::VerseApi(format!(
            "Verse API response is missing the {} or {} edition",
            ARABIC_EDITION, edition
        )));
    };

    Ok(Verse {
        reference: format!(
            "{} {}:{}",
            translated.surah.english_name, translated.surah.number, translated.number_in_surah
        ),
        text: arabic.text.trim().to_string(),
        translation: translated.text.trim().to_string(),
    })
}
