use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComposeState {
    #[default]
    Empty,
    Generating,
    Drafted,
    Editing,
    Sending,
    Sent,
    PartialFailure,
    Failed,
}

impl ComposeState {
    pub fn can_generate(self) -> bool {
        matches!(
            self,
            ComposeState::Empty
                | ComposeState::Drafted
                | ComposeState::Sent
                | ComposeState::PartialFailure
                | ComposeState::Failed
        )
    }

    /// The last generate or send has finished and its result is on display.
    pub fn is_settled(self) -> bool {
        matches!(
            self,
            ComposeState::Sent | ComposeState::PartialFailure | ComposeState::Failed
        )
    }
}

impl fmt::Display for ComposeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ComposeState::Empty => "empty",
            ComposeState::Generating => "generating",
            ComposeState::Drafted => "drafted",
            ComposeState::Editing => "editing",
            ComposeState::Sending => "sending",
            ComposeState::Sent => "sent",
            ComposeState::PartialFailure => "partially failed",
            ComposeState::Failed => "failed",
        };
        f.write_str(label)
    }
}
