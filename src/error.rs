use thiserror::Error;

/// The main error type for hubmirror operations.
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid dataset reference '{input}': {message}")]
    InvalidDatasetRef { input: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Hugging Face API error for '{repo_id}': {message}")]
    HfApi { repo_id: String, message: String },

    #[error("Failed to list files of '{repo_id}': {message}")]
    Listing { repo_id: String, message: String },

    #[error("Failed to run '{program}': {message}")]
    Command { program: String, message: String },
}
