//! Chunked bulk writes
//!
//! Each chunk is one atomic `batch_write`. Chunks run strictly in sequence;
//! the first failing chunk stops the run and committed chunks stay committed.

use std::sync::Arc;

use shared::mutation::{BatchReport, CatalogMutation};
use shared::{AppError, AppResult, ErrorCode};

use crate::db::CatalogStore;

#[derive(Clone)]
pub struct BatchWriter {
    store: Arc<dyn CatalogStore>,
    chunk_size: usize,
}

impl std::fmt::Debug for BatchWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchWriter")
            .field("chunk_size", &self.chunk_size)
            .finish()
    }
}

impl BatchWriter {
    /// `chunk_size` is clamped to `1..=store.max_batch_size()`
    pub fn new(store: Arc<dyn CatalogStore>, chunk_size: usize) -> Self {
        let chunk_size = chunk_size.min(store.max_batch_size()).max(1);
        Self { store, chunk_size }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Commit `mutations` chunk by chunk
    ///
    /// On failure the error carries `committed_chunks` and `committed` details.
    pub async fn commit(&self, mutations: Vec<CatalogMutation>) -> AppResult<BatchReport> {
        let mut report = BatchReport::default();
        if mutations.is_empty() {
            return Ok(report);
        }

        let total_chunks = mutations.len().div_ceil(self.chunk_size);
        let mut pending = mutations.into_iter().peekable();
        while pending.peek().is_some() {
            let chunk: Vec<CatalogMutation> = pending.by_ref().take(self.chunk_size).collect();
            let size = chunk.len();

            if let Err(e) = self.store.batch_write(chunk).await {
                tracing::error!(
                    chunk = report.chunks + 1,
                    total_chunks,
                    committed = report.committed,
                    error = %e,
                    "Batch chunk failed"
                );
                return Err(AppError::with_message(
                    ErrorCode::BatchChunkFailed,
                    format!(
                        "Batch chunk {} of {} failed: {}",
                        report.chunks + 1,
                        total_chunks,
                        e
                    ),
                )
                .with_detail("committed_chunks", report.chunks)
                .with_detail("committed", report.committed));
            }

            report.chunks += 1;
            report.committed += size;
            tracing::debug!(chunk = report.chunks, total_chunks, size, "Batch chunk committed");
        }

        Ok(report)
    }
}
