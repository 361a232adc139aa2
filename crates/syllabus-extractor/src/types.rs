//! Result types for extraction

use syllabus_domain::RunId;

/// Result of extracting objectives from one document
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Objectives in emission order (chunk order, then split order)
    pub objectives: Vec<String>,

    /// Chunks that failed and were skipped
    pub failures: Vec<ChunkFailure>,

    /// Metadata about the run
    pub metadata: ExtractionMetadata,
}

/// A chunk whose model call or reply could not be used
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkFailure {
    /// Zero-based chunk index
    pub chunk_index: usize,

    /// Why the chunk failed
    pub reason: String,
}

/// Metadata about an extraction run
#[derive(Debug, Clone)]
pub struct ExtractionMetadata {
    /// Run identifier
    pub run_id: RunId,

    /// Name of the chat model used
    pub model_name: String,

    /// Number of chunks the document splits into
    pub total_chunks: usize,

    /// Number of chunks actually sent to the model
    pub chunks_sent: usize,

    /// Number of chunks that failed
    pub chunks_failed: usize,

    /// Whether the stop signal ended the run before the last chunk
    pub stopped_early: bool,

    /// Incomplete objective dropped at the end of the run
    pub discarded_carry: Option<String>,

    /// Wall-clock processing time in milliseconds
    pub processing_time_ms: u64,
}
