use std::path::PathBuf;

/// Failures reported by a [`crate::DocumentSource`] or one of its documents.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to open {}: {reason}", .path.display())]
    Open { path: PathBuf, reason: String },
    #[error("page {page} out of range (page_count={page_count})")]
    PageOutOfRange { page: usize, page_count: usize },
    #[error("failed to render page {page}: {reason}")]
    Render { page: usize, reason: String },
    #[error("failed to extract text from page {page}: {reason}")]
    Text { page: usize, reason: String },
    #[error("backend error: {0}")]
    Backend(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("{} has no pages", .0.display())]
    EmptyDocument(PathBuf),
}
