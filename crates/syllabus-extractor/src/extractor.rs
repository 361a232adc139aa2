//! Extraction driver: one model call per chunk, in order

use crate::chunking::TextChunker;
use crate::config::{ExtractorConfig, FailurePolicy};
use crate::error::ExtractorError;
use crate::prompt::PrimingSet;
use crate::session::ExtractionSession;
use crate::types::{ChunkFailure, ExtractionMetadata, ExtractionResult};
use std::sync::Arc;
use std::time::Instant;
use syllabus_domain::traits::ChatModel;
use syllabus_domain::{Message, RunId};
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Turns documents into ordered lists of learning objectives
///
/// Each call to [`Extractor::extract`] runs its own [`ExtractionSession`],
/// so one extractor can serve several documents, concurrently if desired.
/// Within a document, chunks are strictly sequential.
pub struct Extractor<M>
where
    M: ChatModel,
{
    model: Arc<M>,
    priming: PrimingSet,
    config: ExtractorConfig,
}

impl<M> Extractor<M>
where
    M: ChatModel + Send + Sync + 'static,
    M::Error: std::fmt::Display,
{
    /// Create a new Extractor
    ///
    /// # Errors
    ///
    /// Returns [`ExtractorError::Config`] if `config` is invalid.
    pub fn new(model: M, priming: PrimingSet, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        Self::with_shared_model(Arc::new(model), priming, config)
    }

    /// Create a new Extractor around a shared model client
    pub fn with_shared_model(
        model: Arc<M>,
        priming: PrimingSet,
        config: ExtractorConfig,
    ) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        Ok(Self {
            model,
            priming,
            config,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Reject documents that must not reach the model
    pub fn check_document(&self, text: &str) -> Result<(), ExtractorError> {
        if text.is_empty() {
            return Err(ExtractorError::EmptyDocument);
        }
        let len = text.chars().count();
        if len > self.config.max_text_length {
            return Err(ExtractorError::TextTooLong(len, self.config.max_text_length));
        }
        Ok(())
    }

    /// Extract objectives from one document
    ///
    /// Per-chunk failures are handled according to the configured
    /// [`FailurePolicy`]. Under `SkipChunk` the run always completes and the
    /// failures are listed in the result.
    pub async fn extract(&self, text: &str) -> Result<ExtractionResult, ExtractorError> {
        self.check_document(text)?;

        let start = Instant::now();
        let run_id = RunId::new();
        let chunker = TextChunker::new(self.config.chunk_size);
        let total_chunks = chunker.count(text);

        info!(
            %run_id,
            chars = text.chars().count(),
            total_chunks,
            "starting extraction"
        );

        let mut session = ExtractionSession::new(&self.config);
        let mut failures = Vec::new();
        let mut chunks_sent = 0;

        for chunk in chunker.chunk(text) {
            debug!(%run_id, "processing chunk {}/{}", chunk.index + 1, total_chunks);

            let messages = self.priming.messages_for(chunk.text);
            chunks_sent += 1;

            let outcome = match self.call_model(messages).await {
                Ok(reply) => session.apply_response(&reply).map(|_| ()),
                Err(e) => Err(e),
            };

            if let Err(e) = outcome {
                match self.config.failure_policy {
                    FailurePolicy::SkipChunk => {
                        warn!(%run_id, chunk = chunk.index, error = %e, "chunk failed, skipping");
                        failures.push(ChunkFailure {
                            chunk_index: chunk.index,
                            reason: e.to_string(),
                        });
                    }
                    FailurePolicy::Abort => {
                        return Err(ExtractorError::ChunkFailed {
                            index: chunk.index,
                            source: Box::new(e),
                        });
                    }
                }
            }

            if session.is_stopped() {
                info!(%run_id, chunk = chunk.index, "stop signal received");
                break;
            }
        }

        let outcome = session.finish();
        if let Some(fragment) = &outcome.discarded_carry {
            warn!(%run_id, fragment = %fragment, "discarding incomplete objective at end of document");
        }

        let metadata = ExtractionMetadata {
            run_id,
            model_name: self.model.model_name().to_string(),
            total_chunks,
            chunks_sent,
            chunks_failed: failures.len(),
            stopped_early: outcome.stopped && chunks_sent < total_chunks,
            discarded_carry: outcome.discarded_carry,
            processing_time_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            %run_id,
            objectives = outcome.objectives.len(),
            chunks_sent,
            chunks_failed = metadata.chunks_failed,
            "extraction complete"
        );

        Ok(ExtractionResult {
            objectives: outcome.objectives,
            failures,
            metadata,
        })
    }

    /// Call the model on the blocking pool, bounded by the chunk timeout
    ///
    /// A blocking call cannot be cancelled, so on timeout the call is still
    /// awaited before returning. The next chunk is never sent while an
    /// earlier call is in flight.
    async fn call_model(&self, messages: Vec<Message>) -> Result<String, ExtractorError> {
        let model = Arc::clone(&self.model);

        let mut call = tokio::task::spawn_blocking(move || {
            model
                .complete(&messages)
                .map_err(|e| ExtractorError::Llm(e.to_string()))
        });

        match timeout(self.config.chunk_timeout(), &mut call).await {
            Ok(joined) => {
                joined.map_err(|e| ExtractorError::Llm(format!("Task join error: {}", e)))?
            }
            Err(_) => {
                warn!(
                    timeout_secs = self.config.chunk_timeout_secs,
                    "model call timed out, waiting for it to return"
                );
                // reply is discarded; the chunk counts as failed
                let _ = call.await;
                Err(ExtractorError::Timeout(self.config.chunk_timeout_secs))
            }
        }
    }
}
