use crate::error::HostError;
use async_trait::async_trait;

/// Identity of the board the plugin is running on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardInfo {
    /// Host-assigned board id.
    pub id: String,
}

/// Whiteboard host SDK surface consumed by the plugin.
#[async_trait(?Send)]
pub trait BoardHost {
    /// Board identity for the current session.
    async fn board_info(&self) -> Result<BoardInfo, HostError>;

    /// Short-lived signature token forwarded to the backend.
    async fn id_token(&self) -> Result<String, HostError>;

    /// Show a host-native error notification.
    fn show_error(&self, message: &str);
}
