use std::io;
use std::path::PathBuf;

/// Errors surfaced by the arcade shell. Game logic itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),

    #[error("could not parse settings file {}: {source}", .path.display())]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid setting `{key}`: {reason}")]
    InvalidSetting { key: &'static str, reason: String },

    #[error("keyboard event channel closed")]
    EventChannelClosed,
}
