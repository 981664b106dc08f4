//! One batch: normalize, split and translate a clipboard snapshot.

use futures_util::StreamExt;
use futures_util::stream;
use std::pin::pin;

use crate::backend::TranslationBackend;
use crate::config::DEFAULT_CONCURRENCY;
use crate::shutdown::Cancellation;
use crate::text::{SentenceSplitter, TextNormalizer};

/// A sentence and its translation.
///
/// When `failed` is set, `translated` holds a visible error marker instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationPair {
    pub original: String,
    pub translated: String,
    pub failed: bool,
}

impl TranslationPair {
    fn failed(original: String, reason: &str) -> Self {
        Self {
            original,
            translated: format!("[translation failed: {reason}]"),
            failed: true,
        }
    }
}

/// Cancellation arrived before every sentence was translated.
#[derive(Debug, thiserror::Error)]
#[error("interrupted after {} of {total} sentences", .completed.len())]
pub struct Interrupted {
    /// Pairs finished before cancellation, in sentence order.
    pub completed: Vec<TranslationPair>,
    pub total: usize,
}

/// Runs the translation pipeline over a backend.
pub struct TranslationSession<B> {
    backend: B,
    normalizer: TextNormalizer,
    splitter: SentenceSplitter,
    concurrency: usize,
}

impl<B: TranslationBackend> TranslationSession<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            normalizer: TextNormalizer::default_rules().clone(),
            splitter: SentenceSplitter,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    #[must_use]
    pub fn with_normalizer(mut self, normalizer: TextNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Sets how many sentence requests may be in flight (at least one).
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Sentence units of `raw`, without translating.
    pub fn sentences(&self, raw: &str) -> Vec<String> {
        self.splitter.split(&self.normalizer.normalize(raw))
    }

    /// Translates every sentence of `raw`.
    ///
    /// Returns one pair per sentence in source order. A failing sentence
    /// becomes a failed pair; it never aborts the batch.
    pub async fn run(
        &self,
        raw: &str,
        cancel: &mut Cancellation,
    ) -> Result<Vec<TranslationPair>, Interrupted> {
        let sentences = self.sentences(raw);
        let total = sentences.len();
        if total == 0 {
            return Ok(Vec::new());
        }

        tracing::debug!(backend = self.backend.name(), total, "translating batch");

        let mut results = pin!(
            stream::iter(sentences)
                .map(|sentence| self.translate_one(sentence))
                .buffered(self.concurrency)
        );
        let mut pairs = Vec::with_capacity(total);

        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    return Err(Interrupted { completed: pairs, total });
                }
                next = results.next() => match next {
                    Some(pair) => pairs.push(pair),
                    None => break,
                },
            }
        }

        Ok(pairs)
    }

    async fn translate_one(&self, original: String) -> TranslationPair {
        match self.backend.translate(&original).await {
            Ok(translated) => {
                tracing::trace!(chars = original.chars().count(), "sentence translated");
                TranslationPair {
                    original,
                    translated,
                    failed: false,
                }
            }
            Err(e) => {
                tracing::warn!(backend = self.backend.name(), error = %e, "sentence failed");
                TranslationPair::failed(original, &e.to_string())
            }
        }
    }
}
