use anyhow::Result;
use std::time::Duration;

use super::ClipboardSource;
use crate::backend::TranslationBackend;
use crate::config::{
    DEFAULT_INTERVAL_MS, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_BACKOFF_MS, ResolvedConfig,
};
use crate::render::{Delivery, Sinks, WatchEvent};
use crate::session::{TranslationPair, TranslationSession};
use crate::shutdown::Cancellation;

/// Where the watcher is in its poll/translate cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    Idle,
    Changed,
    Processing,
    Stopped,
}

/// Timing and retry settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchPolicy {
    /// Fixed delay between clipboard polls.
    pub interval: Duration,
    /// Attempts per clipboard change, including the first.
    pub max_attempts: u32,
    /// Delay before the first retry; doubles for each further retry.
    pub retry_backoff: Duration,
}

impl Default for WatchPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_backoff: Duration::from_millis(DEFAULT_RETRY_BACKOFF_MS),
        }
    }
}

impl From<&ResolvedConfig> for WatchPolicy {
    fn from(config: &ResolvedConfig) -> Self {
        Self {
            interval: config.interval,
            max_attempts: config.max_attempts,
            retry_backoff: config.retry_backoff,
        }
    }
}

/// Counters reported when the watcher stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchSummary {
    /// Clipboard changes translated and rendered.
    pub processed: usize,
    /// Clipboard changes given up on after every attempt failed.
    pub failed: usize,
    /// Whether cancellation cut a batch short.
    pub interrupted: bool,
}

enum Attempt {
    Done,
    Interrupted,
}

/// Polls a clipboard source and translates every new text.
pub struct ClipboardWatcher<C, B> {
    source: C,
    session: TranslationSession<B>,
    sinks: Sinks,
    policy: WatchPolicy,
    state: WatchState,
    last_seen: Option<String>,
}

impl<C: ClipboardSource, B: TranslationBackend> ClipboardWatcher<C, B> {
    pub const fn new(
        source: C,
        session: TranslationSession<B>,
        sinks: Sinks,
        policy: WatchPolicy,
    ) -> Self {
        Self {
            source,
            session,
            sinks,
            policy,
            state: WatchState::Idle,
            last_seen: None,
        }
    }

    pub const fn state(&self) -> WatchState {
        self.state
    }

    /// Runs until `cancel` fires.
    ///
    /// Text already on the clipboard at startup is taken as the baseline and
    /// not translated.
    pub async fn run(&mut self, mut cancel: Cancellation) -> WatchSummary {
        tracing::info!(
            backend = self.session.backend().name(),
            interval_ms = self.policy.interval.as_millis() as u64,
            max_attempts = self.policy.max_attempts,
            "watching clipboard"
        );

        let mut summary = WatchSummary::default();
        self.last_seen = self.poll();
        self.sinks.notify(&WatchEvent::Waiting);

        while !cancel.is_cancelled() {
            self.state = WatchState::Idle;

            if let Some(text) = self.poll_change() {
                self.state = WatchState::Changed;
                if !self.process(&text, &mut cancel, &mut summary).await {
                    summary.interrupted = true;
                    break;
                }
                self.state = WatchState::Idle;
                self.sinks.notify(&WatchEvent::Waiting);
            }

            if !cancel.sleep(self.policy.interval).await {
                break;
            }
        }

        self.state = WatchState::Stopped;
        self.sinks.notify(&WatchEvent::Farewell);
        tracing::info!(
            processed = summary.processed,
            failed = summary.failed,
            "watcher stopped"
        );
        summary
    }

    fn poll(&mut self) -> Option<String> {
        match self.source.read() {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!(error = %e, "clipboard read failed");
                None
            }
        }
    }

    /// Returns new, non-blank clipboard text. Last-seen is updated before
    /// any processing, so a text that keeps failing is not picked up again.
    fn poll_change(&mut self) -> Option<String> {
        let text = self.poll()?;
        if self.last_seen.as_deref() == Some(text.as_str()) {
            return None;
        }
        self.last_seen = Some(text.clone());

        if text.trim().is_empty() {
            tracing::debug!("skipping blank clipboard text");
            return None;
        }
        Some(text)
    }

    /// Translates and renders `text` with retries. Returns `false` when
    /// cancellation stopped the work.
    ///
    /// The text is translated once; a retry only resumes the sinks that
    /// have not taken every pair yet.
    async fn process(
        &mut self,
        text: &str,
        cancel: &mut Cancellation,
        summary: &mut WatchSummary,
    ) -> bool {
        self.state = WatchState::Processing;
        self.sinks.notify(&WatchEvent::Processing {
            chars: text.chars().count(),
        });

        let max_attempts = self.policy.max_attempts.max(1);
        let mut backoff = self.policy.retry_backoff;
        let mut translated = None;
        let mut delivery = Delivery::default();

        for attempt in 1..=max_attempts {
            let error = match self
                .attempt(text, &mut translated, &mut delivery, cancel)
                .await
            {
                Ok(Attempt::Done) => {
                    summary.processed += 1;
                    return true;
                }
                Ok(Attempt::Interrupted) => return false,
                Err(e) => format!("{e:#}"),
            };

            tracing::warn!(attempt, max_attempts, error = %error, "batch attempt failed");

            if attempt == max_attempts {
                self.sinks.notify(&WatchEvent::Failed {
                    attempts: max_attempts,
                    error,
                });
                summary.failed += 1;
                return true;
            }

            self.sinks.notify(&WatchEvent::Retrying {
                attempt,
                max_attempts,
                error,
            });
            if !cancel.sleep(backoff).await {
                return false;
            }
            backoff = backoff.saturating_mul(2);
        }

        true
    }

    async fn attempt(
        &mut self,
        text: &str,
        translated: &mut Option<Vec<TranslationPair>>,
        delivery: &mut Delivery,
        cancel: &mut Cancellation,
    ) -> Result<Attempt> {
        if translated.is_none() {
            match self.session.run(text, cancel).await {
                Ok(pairs) => *translated = Some(pairs),
                Err(interrupted) => {
                    tracing::info!(%interrupted, "batch interrupted");
                    self.sinks.render(&interrupted.completed, delivery)?;
                    return Ok(Attempt::Interrupted);
                }
            }
        }

        self.sinks
            .render(translated.as_deref().unwrap_or_default(), delivery)?;
        Ok(Attempt::Done)
    }
}
