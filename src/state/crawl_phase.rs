/// Crawl lifecycle definitions
///
/// A coordinator starts `Idle`, moves to `Running` when its crawl starts and
/// ends in `Done` once the frontier is exhausted, the page budget is spent, or
/// the run is cancelled.
use std::fmt;

/// Represents the lifecycle phase of a crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// Constructed, not started
    Idle,

    /// Actively dequeuing and fetching
    Running,

    /// Terminal: nothing more will be fetched
    Done,
}

impl CrawlPhase {
    /// Returns true if no further work will happen in this phase
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns true if `next` is a legal successor of this phase
    ///
    /// `Running -> Running` is the loop's own step and is allowed.
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Running)
                | (Self::Running, Self::Running)
                | (Self::Running, Self::Done)
        )
    }

    /// Returns the lowercase name of the phase
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
