//! Request and transaction identifiers.

use uuid::Uuid;

/// Allocates the ids attached to each commit envelope.
///
/// Every call must return an id not used by any other request.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> Uuid;
}

/// Random UUID v4 ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}
