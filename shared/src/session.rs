use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic request generation for one data stream.
///
/// Each load takes a ticket; only the newest ticket may apply its result, so
/// a slow response from a superseded reload is dropped instead of painting
/// over fresher data.
#[derive(Debug, Clone, Default)]
pub struct GenerationCounter(Arc<AtomicU64>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket(u64);

impl GenerationCounter {
    pub fn begin(&self) -> RefreshTicket {
        RefreshTicket(self.0.fetch_add(1, Ordering::Relaxed).wrapping_add(1))
    }

    pub fn is_current(&self, ticket: RefreshTicket) -> bool {
        self.0.load(Ordering::Relaxed) == ticket.0
    }
}

/// Everything tied to one resolved identity. Created once per username and
/// passed to every fetch and render call.
#[derive(Debug, Clone)]
pub struct SessionContext {
    username: String,
    pub friends_generation: GenerationCounter,
    pub requests_generation: GenerationCounter,
}

impl SessionContext {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            friends_generation: GenerationCounter::default(),
            requests_generation: GenerationCounter::default(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

#[cfg(test)]
mod tests {
    use super::{GenerationCounter, SessionContext};

    #[test]
    fn newer_ticket_supersedes_older() {
        let counter = GenerationCounter::default();
        let first = counter.begin();
        assert!(counter.is_current(first));
        let second = counter.begin();
        assert!(!counter.is_current(first));
        assert!(counter.is_current(second));
    }

    #[test]
    fn streams_are_independent() {
        let session = SessionContext::new("alice");
        let friends = session.friends_generation.begin();
        let _requests = session.requests_generation.begin();
        assert!(session.friends_generation.is_current(friends));
        assert_eq!(session.username(), "alice");
    }

    #[test]
    fn clones_share_generation() {
        let session = SessionContext::new("alice");
        let copy = session.clone();
        let stale = session.friends_generation.begin();
        copy.friends_generation.begin();
        assert!(!session.friends_generation.is_current(stale));
    }
}
