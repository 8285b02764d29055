use serde::{Deserialize, Serialize};

/// Lifecycle state of a tween.
///
/// Pausing is orthogonal and tracked separately; a paused tween keeps its
/// lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TweenState {
    /// Waiting out the start delay
    #[default]
    Delaying,
    /// Timeline is advancing
    Running,
    /// Reached its final loop, or was superseded in the registry
    Complete,
    /// Stopped by `kill` or because its target went away
    Killed,
}

impl TweenState {
    /// Get the name of this state
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Delaying => "delaying",
            Self::Running => "running",
            Self::Complete => "complete",
            Self::Killed => "killed",
        }
    }

    /// Terminal states never advance again
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Killed)
    }

    /// Killed counts as complete; the converse does not hold
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.is_terminal()
    }

    #[inline]
    pub fn was_killed(&self) -> bool {
        matches!(self, Self::Killed)
    }
}
