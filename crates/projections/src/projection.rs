//! Core projection trait and position tracking.

use async_trait::async_trait;
use event_store::EventEnvelope;

use crate::Result;

/// How far into the global event stream a projection has read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectionPosition {
    /// Number of events this projection has processed.
    pub events_processed: u64,
}

impl ProjectionPosition {
    /// Position before any event.
    pub fn zero() -> Self {
        Self {
            events_processed: 0,
        }
    }

    /// Position after one more event.
    pub fn advance(&self) -> Self {
        Self {
            events_processed: self.events_processed + 1,
        }
    }
}

impl std::fmt::Display for ProjectionPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "position({})", self.events_processed)
    }
}

/// Turns stored events into a denormalized read model.
///
/// A projection must advance its position for every event it is handed,
/// including events it ignores, so catch-up can skip what it has seen.
#[async_trait]
pub trait Projection: Send + Sync {
    /// Name of this projection, for logs and metrics.
    fn name(&self) -> &'static str;

    /// Folds one event into the read model.
    async fn handle(&self, event: &EventEnvelope) -> Result<()>;

    /// Current position.
    async fn position(&self) -> ProjectionPosition;

    /// Clears the read model back to empty.
    async fn reset(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_starts_at_zero_and_advances() {
        let pos = ProjectionPosition::zero();
        assert_eq!(pos.events_processed, 0);
        assert_eq!(pos.advance().advance().events_processed, 2);
    }

    #[test]
    fn position_display() {
        let pos = ProjectionPosition {
            events_processed: 7,
        };
        assert_eq!(pos.to_string(), "position(7)");
    }
}
