//! Transport configuration.

/// Capacity of a node's inbox.
///
/// Unbounded inboxes never block the sending side. Bounded inboxes block a
/// sender while the target inbox is full; `Bounded(0)` makes every delivery a
/// rendezvous with the consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InboxCapacity {
    #[default]
    Unbounded,
    Bounded(usize),
}

impl From<Option<usize>> for InboxCapacity {
    fn from(capacity: Option<usize>) -> Self {
        match capacity {
            Some(n) => InboxCapacity::Bounded(n),
            None => InboxCapacity::Unbounded,
        }
    }
}

/// Per-node settings applied at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransportConfig {
    pub inbox_capacity: InboxCapacity,
}

impl TransportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_inbox_capacity(mut self, capacity: impl Into<InboxCapacity>) -> Self {
        self.inbox_capacity = capacity.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unbounded() {
        assert_eq!(TransportConfig::default().inbox_capacity, InboxCapacity::Unbounded);
    }

    #[test]
    fn test_capacity_from_option() {
        let cfg = TransportConfig::new().with_inbox_capacity(Some(16));
        assert_eq!(cfg.inbox_capacity, InboxCapacity::Bounded(16));

        let cfg = cfg.with_inbox_capacity(None);
        assert_eq!(cfg.inbox_capacity, InboxCapacity::Unbounded);
    }
}
