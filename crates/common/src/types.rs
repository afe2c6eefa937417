use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error returned when a string is not a valid aggregate identifier.
#[derive(Debug, thiserror::Error)]
#[error("invalid aggregate id {input:?}: {source}")]
pub struct ParseIdError {
    input: String,
    #[source]
    source: uuid::Error,
}

/// Identity of one aggregate instance.
///
/// A UUID newtype so post ids cannot be confused with other identifiers
/// floating around the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregateId(Uuid);

impl AggregateId {
    /// Generates a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses an identifier from its canonical string form.
    pub fn parse(input: &str) -> Result<Self, ParseIdError> {
        Uuid::parse_str(input)
            .map(Self)
            .map_err(|source| ParseIdError {
                input: input.to_string(),
                source,
            })
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for AggregateId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AggregateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for AggregateId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<AggregateId> for Uuid {
    fn from(id: AggregateId) -> Self {
        id.0
    }
}

impl std::str::FromStr for AggregateId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
