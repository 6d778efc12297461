use thiserror::Error;

/// Everything that can go wrong inside a tool invocation. Each variant maps
/// to a distinct user-facing string; none of them escape the tool layer as a
/// fault.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("could not understand the {0} time")]
    ParseFailure(String),
    #[error("proposed booking overlaps '{0}'")]
    Conflict(String),
    #[error("event creation failed")]
    CreationFailed,
    #[error("calendar request failed: {0}")]
    Transport(String),
    #[error("invalid tool arguments: {0}")]
    BadArguments(String),
}

impl ToolError {
    /// Renders the failure as a chat message. Every message starts with a
    /// failure marker so the model (and the user) can tell it apart from a
    /// successful tool result.
    pub fn to_user_message(&self) -> String {
        match self {
            ToolError::ParseFailure(which) => {
                format!("❌ Could not understand the {} time.", which)
            }
            ToolError::Conflict(title) => {
                format!("⚠️ You already have a meeting **'{}'** at that time.", title)
            }
            ToolError::CreationFailed => {
                "❌ Failed to create event. Please check your credentials or input format."
                    .to_string()
            }
            ToolError::Transport(detail) => {
                format!("❌ Error talking to the calendar: {}", detail)
            }
            ToolError::BadArguments(detail) => {
                format!("❌ Invalid tool arguments: {}", detail)
            }
        }
    }
}
