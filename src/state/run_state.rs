/// Run state definitions for tracking harvest progress
use std::fmt;

/// Represents the current state of a harvest run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RunState {
    /// Nothing has been loaded yet
    Pending,

    /// Both reference lists are in memory
    Loaded,

    /// Language records carry their languoid classification
    Unified,

    /// Regions and countries are crawled and the language index is built
    Indexed,

    /// Languages are being fetched, persisted and submitted
    Processing,

    /// Every language in scope was handled
    Done,
}

impl RunState {
    /// The only state this one may move to, if any
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::Loaded),
            Self::Loaded => Some(Self::Unified),
            Self::Unified => Some(Self::Indexed),
            Self::Indexed => Some(Self::Processing),
            Self::Processing => Some(Self::Done),
            Self::Done => None,
        }
    }

    /// Returns true if moving to `to` follows the linear sequence
    pub fn can_transition_to(&self, to: Self) -> bool {
        self.next() == Some(to)
    }

    /// Lowercase name used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Loaded => "loaded",
            Self::Unified => "unified",
            Self::Indexed => "indexed",
            Self::Processing => "processing",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
