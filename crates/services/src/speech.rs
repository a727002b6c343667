//! Text-to-speech requests for Malayalam pronunciation.
//!
//! The synthesizer itself lives at the edge (the desktop UI drives the
//! platform speech engine); this module owns the request shape and the
//! contract every backend implements.

use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, SpeechError};

/// BCP 47 tag requested from the speech engine.
pub const MALAYALAM_LANG: &str = "ml-IN";

/// Playback speeds offered to learners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SpeechRate {
    VerySlow,
    #[default]
    Slow,
    Normal,
}

impl SpeechRate {
    pub const ALL: [SpeechRate; 3] = [SpeechRate::VerySlow, SpeechRate::Slow, SpeechRate::Normal];

    #[must_use]
    pub fn factor(self) -> f32 {
        match self {
            SpeechRate::VerySlow => 0.5,
            SpeechRate::Slow => 0.7,
            SpeechRate::Normal => 1.0,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SpeechRate::VerySlow => "0.5x",
            SpeechRate::Slow => "0.7x",
            SpeechRate::Normal => "1.0x",
        }
    }
}

impl fmt::Display for SpeechRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SpeechRate {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_end_matches('x') {
            "0.5" => Ok(SpeechRate::VerySlow),
            "0.7" => Ok(SpeechRate::Slow),
            "1" | "1.0" => Ok(SpeechRate::Normal),
            _ => Err(ConfigError::InvalidSpeechRate(s.to_owned())),
        }
    }
}

/// One utterance to be spoken.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeechRequest {
    pub text: String,
    pub lang: &'static str,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl SpeechRequest {
    /// A Malayalam utterance at the given rate, full pitch and volume.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::EmptyText` for blank text.
    pub fn malayalam(text: &str, rate: SpeechRate) -> Result<Self, SpeechError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SpeechError::EmptyText);
        }
        Ok(Self {
            text: text.to_owned(),
            lang: MALAYALAM_LANG,
            rate: rate.factor(),
            pitch: 1.0,
            volume: 1.0,
        })
    }
}

/// How an utterance finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechEvent {
    Ended,
    Cancelled,
}

/// A speech backend. Starting a new utterance cancels the one in flight.
#[async_trait(?Send)]
pub trait SpeechSynthesizer {
    /// Speak `request`, resolving when playback ends or is cancelled.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` when the platform cannot speak.
    async fn speak(&self, request: &SpeechRequest) -> Result<SpeechEvent, SpeechError>;

    /// Stop any ongoing utterance.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` when the platform rejects the call.
    async fn cancel(&self) -> Result<(), SpeechError>;
}

/// Synthesizer that records requests instead of producing sound.
#[derive(Debug, Default)]
pub struct SilentSpeech {
    spoken: Mutex<Vec<SpeechRequest>>,
}

impl SilentSpeech {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn spoken(&self) -> Vec<SpeechRequest> {
        self.spoken.lock().map(|g| g.clone()).unwrap_or_default()
    }
}

#[async_trait(?Send)]
impl SpeechSynthesizer for SilentSpeech {
    async fn speak(&self, request: &SpeechRequest) -> Result<SpeechEvent, SpeechError> {
        let mut guard = self
            .spoken
            .lock()
            .map_err(|e| SpeechError::Failed(e.to_string()))?;
        guard.push(request.clone());
        Ok(SpeechEvent::Ended)
    }

    async fn cancel(&self) -> Result<(), SpeechError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rate_is_slow() {
        assert_eq!(SpeechRate::default(), SpeechRate::Slow);
        assert!((SpeechRate::default().factor() - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn parses_rates() {
        assert_eq!("0.5".parse::<SpeechRate>().unwrap(), SpeechRate::VerySlow);
        assert_eq!("1.0x".parse::<SpeechRate>().unwrap(), SpeechRate::Normal);
        assert!("2".parse::<SpeechRate>().is_err());
    }

    #[test]
    fn request_targets_malayalam() {
        let req = SpeechRequest::malayalam(" നമസ്കാരം ", SpeechRate::Normal).unwrap();
        assert_eq!(req.text, "നമസ്കാരം");
        assert_eq!(req.lang, "ml-IN");
        assert!((req.pitch - 1.0).abs() < f32::EPSILON);
        assert!(SpeechRequest::malayalam("  ", SpeechRate::Slow).is_err());
    }

    #[tokio::test]
    async fn silent_speech_records_requests() {
        let speech = SilentSpeech::new();
        let req = SpeechRequest::malayalam("നന്ദി", SpeechRate::Slow).unwrap();
        assert_eq!(speech.speak(&req).await.unwrap(), SpeechEvent::Ended);
        assert_eq!(speech.spoken(), vec![req]);
    }
}
