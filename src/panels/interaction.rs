//! Interaction Panel
//!
//! Holds the user's text and the latest analysis/sentiment results.
//! The state is a snapshot replaced wholesale on every event (keystroke,
//! request start, request completion) and published through a watch channel.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

use crate::service::AnalyticsService;

/// Shown in place of the response when `/analyze` fails
pub const ANALYSIS_FAILED: &str = "❌ Error analyzing text.";

/// Shown in place of the label when `/sentiment` fails
pub const SENTIMENT_FAILED: &str = "❌ Sentiment analysis failed.";

/// Colour family for a sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentTone {
    Positive,
    Negative,
    Neutral,
}

impl SentimentTone {
    /// Classify a label by raw substring: "positive" wins over "negative",
    /// anything else is neutral. Case is not normalized, so "Positive" is
    /// neutral.
    pub fn from_label(label: &str) -> Self {
        if label.contains("positive") {
            SentimentTone::Positive
        } else if label.contains("negative") {
            SentimentTone::Negative
        } else {
            SentimentTone::Neutral
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            SentimentTone::Positive => "#4CAF50",
            SentimentTone::Negative => "#FF5252",
            SentimentTone::Neutral => "#FFC107",
        }
    }
}

/// Snapshot of the interaction panel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InteractionState {
    /// Text currently in the input box
    pub query: String,
    /// Latest generated text (or the analysis error string)
    pub response_text: String,
    /// Latest sentiment label (or the sentiment error string)
    pub sentiment_text: String,
    /// True while any request is in flight
    pub loading: bool,
    #[serde(skip)]
    pub(crate) in_flight: usize,
}

impl InteractionState {
    /// Tone of the current sentiment label, if there is one
    pub fn sentiment_tone(&self) -> Option<SentimentTone> {
        if self.sentiment_text.is_empty() {
            None
        } else {
            Some(SentimentTone::from_label(&self.sentiment_text))
        }
    }

    fn with_query(&self, query: String) -> Self {
        Self {
            query,
            ..self.clone()
        }
    }

    fn request_started(&self) -> Self {
        let in_flight = self.in_flight + 1;
        Self {
            in_flight,
            loading: true,
            ..self.clone()
        }
    }

    fn request_finished(&self) -> Self {
        let in_flight = self.in_flight.saturating_sub(1);
        Self {
            in_flight,
            loading: in_flight > 0,
            ..self.clone()
        }
    }
}

/// Text box plus the analyze and sentiment actions
pub struct InteractionPanel {
    service: Arc<dyn AnalyticsService>,
    state: watch::Sender<InteractionState>,
}

impl InteractionPanel {
    pub fn new(service: Arc<dyn AnalyticsService>) -> Self {
        let (state, _) = watch::channel(InteractionState::default());
        Self { service, state }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> InteractionState {
        self.state.borrow().clone()
    }

    /// Receive every future snapshot
    pub fn subscribe(&self) -> watch::Receiver<InteractionState> {
        self.state.subscribe()
    }

    /// Replace the input text
    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.replace(|s| s.with_query(query));
    }

    /// Send `text` to `/analyze` and store the generated text.
    ///
    /// Any failure stores [`ANALYSIS_FAILED`] instead. `loading` is true for
    /// the duration of the request either way.
    pub async fn submit_analysis(&self, text: &str) -> InteractionState {
        self.replace(InteractionState::request_started);

        let response_text = match self.service.analyze(text).await {
            Ok(generated) => generated,
            Err(e) => {
                tracing::error!(error = %e, "Error fetching analysis");
                ANALYSIS_FAILED.to_string()
            }
        };

        self.replace(|s| InteractionState {
            response_text,
            ..s.request_finished()
        });
        self.snapshot()
    }

    /// Send `text` to `/sentiment` and store the returned label.
    ///
    /// Any failure stores [`SENTIMENT_FAILED`] instead.
    pub async fn submit_sentiment(&self, text: &str) -> InteractionState {
        self.replace(InteractionState::request_started);

        let sentiment_text = match self.service.sentiment(text).await {
            Ok(label) => label,
            Err(e) => {
                tracing::error!(error = %e, "Error fetching sentiment");
                SENTIMENT_FAILED.to_string()
            }
        };

        self.replace(|s| InteractionState {
            sentiment_text,
            ..s.request_finished()
        });
        self.snapshot()
    }

    fn replace(&self, next: impl FnOnce(&InteractionState) -> InteractionState) {
        self.state.send_modify(|state| *state = next(state));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::stub::StubService;
    use tokio::sync::Notify;

    fn panel(service: StubService) -> InteractionPanel {
        InteractionPanel::new(Arc::new(service))
    }

    #[test]
    fn test_sentiment_tone_raw_substring() {
        assert_eq!(SentimentTone::from_label("positive"), SentimentTone::Positive);
        assert_eq!(SentimentTone::from_label("very negative"), SentimentTone::Negative);
        assert_eq!(SentimentTone::from_label("neutral"), SentimentTone::Neutral);
        // no case folding
        assert_eq!(SentimentTone::from_label("Positive"), SentimentTone::Neutral);
        assert_eq!(SentimentTone::from_label("NEGATIVE"), SentimentTone::Neutral);
        // "positive" is checked first
        assert_eq!(
            SentimentTone::from_label("positive and negative"),
            SentimentTone::Positive
        );
        assert_eq!(SentimentTone::Positive.color(), "#4CAF50");
        assert_eq!(SentimentTone::Negative.color(), "#FF5252");
        assert_eq!(SentimentTone::Neutral.color(), "#FFC107");
    }

    #[tokio::test]
    async fn test_analysis_success() {
        let panel = panel(StubService {
            analyze: Some("**Hello**".to_string()),
            ..Default::default()
        });

        let state = panel.submit_analysis("hi").await;
        assert_eq!(state.response_text, "**Hello**");
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_analysis_failure_uses_fallback() {
        let panel = panel(StubService::default());

        let state = panel.submit_analysis("hi").await;
        assert_eq!(state.response_text, ANALYSIS_FAILED);
        assert!(!state.loading);
        assert_eq!(panel.snapshot(), state);
    }

    #[tokio::test]
    async fn test_sentiment_success_and_failure() {
        let ok = panel(StubService {
            sentiment: Some("negative".to_string()),
            ..Default::default()
        });
        let state = ok.submit_sentiment("awful").await;
        assert_eq!(state.sentiment_text, "negative");
        assert_eq!(state.sentiment_tone(), Some(SentimentTone::Negative));

        let failing = panel(StubService::default());
        let state = failing.submit_sentiment("awful").await;
        assert_eq!(state.sentiment_text, SENTIMENT_FAILED);
        assert_eq!(state.sentiment_tone(), Some(SentimentTone::Neutral));
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_loading_true_while_in_flight() {
        let gate = Arc::new(Notify::new());
        let panel = Arc::new(panel(StubService {
            analyze: Some("done".to_string()),
            gate: Some(Arc::clone(&gate)),
            ..Default::default()
        }));
        let mut rx = panel.subscribe();

        let worker = {
            let panel = Arc::clone(&panel);
            tokio::spawn(async move { panel.submit_analysis("hi").await })
        };

        rx.wait_for(|s| s.loading).await.unwrap();
        assert!(panel.snapshot().response_text.is_empty());

        gate.notify_one();
        let state = worker.await.unwrap();
        assert_eq!(state.response_text, "done");
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_set_query_keeps_results() {
        let panel = panel(StubService {
            sentiment: Some("positive".to_string()),
            ..Default::default()
        });
        panel.submit_sentiment("great").await;
        panel.set_query("new text");

        let state = panel.snapshot();
        assert_eq!(state.query, "new text");
        assert_eq!(state.sentiment_text, "positive");
        assert_eq!(state.sentiment_tone(), Some(SentimentTone::Positive));
    }

    #[test]
    fn test_no_tone_without_label() {
        assert_eq!(InteractionState::default().sentiment_tone(), None);
    }
}
