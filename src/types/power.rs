use serde::{Deserialize, Serialize};
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PowerActionKind {
    Shutdown,
    Restart,
}

impl PowerActionKind {
    /// Name used in failure messages ("Shutdown failed: ...")
    pub fn name(&self) -> &'static str {
        match self {
            Self::Shutdown => "Shutdown",
            Self::Restart => "Restart",
        }
    }

    /// Progressive form used by the countdown ("Shutting down in 3 seconds...")
    pub fn progressive(&self) -> &'static str {
        match self {
            Self::Shutdown => "Shutting down",
            Self::Restart => "Restarting",
        }
    }

    pub fn started_message(&self, countdown_seconds: u32) -> String {
        match self {
            Self::Shutdown => format!("System shutting down in {countdown_seconds} seconds..."),
            Self::Restart => format!("System restarting in {countdown_seconds} seconds..."),
        }
    }

    pub fn completed_message(&self) -> &'static str {
        match self {
            Self::Shutdown => "System shutdown initiated. Connection will be lost.",
            Self::Restart => {
                "System restarting. Client will reload when the system comes back online."
            }
        }
    }
}

impl std::fmt::Display for PowerActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Shutdown => write!(f, "shutdown"),
            Self::Restart => write!(f, "restart"),
        }
    }
}

/// Phase of a power action
///
/// `Cancelled` and `Failed` are transient: the controller resets to `Idle`
/// in the same update that reaches them, so only the notification shows them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum PowerPhase {
    #[default]
    Idle,
    Confirming,
    Requesting,
    CountingDown,
    Completing,
    Cancelled,
    Failed,
}

/// The single power action a client may have in flight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerAction {
    pub kind: PowerActionKind,
    pub phase: PowerPhase,
    /// Fixed when the request is sent
    pub countdown_seconds: u32,
    /// Absolute deadline, set once the server acknowledged the request
    pub end_at: Option<Instant>,
    /// A terminal callback (the post-restart reload) is pending
    pub completion_scheduled: bool,
}

impl PowerAction {
    pub fn confirming(kind: PowerActionKind) -> Self {
        Self {
            kind,
            phase: PowerPhase::Confirming,
            countdown_seconds: 0,
            end_at: None,
            completion_scheduled: false,
        }
    }
}

/// Presentation of the power action for the shell
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PowerActionView {
    pub kind: Option<PowerActionKind>,
    pub phase: PowerPhase,
    pub remaining_seconds: Option<u32>,
    pub message: Option<String>,
    pub cancellable: bool,
}

/// Status line shown while a countdown is running
pub fn countdown_message(kind: PowerActionKind, remaining_seconds: u32) -> String {
    match remaining_seconds {
        0 => format!("{} now...", kind.progressive()),
        1 => format!("{} in 1 second...", kind.progressive()),
        n => format!("{} in {n} seconds...", kind.progressive()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_message_pluralizes() {
        assert_eq!(
            countdown_message(PowerActionKind::Shutdown, 3),
            "Shutting down in 3 seconds..."
        );
        assert_eq!(
            countdown_message(PowerActionKind::Restart, 1),
            "Restarting in 1 second..."
        );
        assert_eq!(
            countdown_message(PowerActionKind::Restart, 0),
            "Restarting now..."
        );
    }

    #[test]
    fn kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&PowerActionKind::Restart).unwrap(),
            r#""restart""#
        );
    }
}
