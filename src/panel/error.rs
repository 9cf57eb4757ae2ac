//! Error handling for the panel module

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PanelError {
    /// A JSON payload carried by a command failed to parse.
    #[error("Malformed payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// An item declared a layout tag no renderer exists for.
    #[error("Unsupported layout tag: {0}")]
    UnsupportedLayout(String),
}
