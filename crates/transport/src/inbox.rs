//! Per-node inbound queue.
//!
//! Each node owns exactly one inbox for its whole lifetime. Producers are the
//! peers that deliver into it; the node's owner drains it through
//! [`Consume`]. The queue is a crossbeam channel, so neither side needs any
//! external locking.

use std::time::Duration;

use crossbeam::channel::{self, Receiver, Sender};

use crate::config::InboxCapacity;
use crate::rpc::Rpc;

/// Multi-producer FIFO of RPCs addressed to one node.
pub(crate) struct Inbox<P> {
    tx: Sender<Rpc<P>>,
    rx: Receiver<Rpc<P>>,
    capacity: InboxCapacity,
}

impl<P> Inbox<P> {
    pub(crate) fn new(capacity: InboxCapacity) -> Self {
        let (tx, rx) = match capacity {
            InboxCapacity::Unbounded => channel::unbounded(),
            InboxCapacity::Bounded(n) => channel::bounded(n),
        };
        Self { tx, rx, capacity }
    }

    /// Enqueue an RPC. Blocks only when the inbox is bounded and full.
    pub(crate) fn push(&self, rpc: Rpc<P>) {
        // The inbox holds its own receiver, so the channel never disconnects.
        let _ = self.tx.send(rpc);
    }

    pub(crate) fn consume(&self) -> Consume<P> {
        Consume::new(self.rx.clone())
    }

    pub(crate) fn capacity(&self) -> InboxCapacity {
        self.capacity
    }

    pub(crate) fn len(&self) -> usize {
        self.rx.len()
    }
}

/// Live, blocking stream of a node's inbound RPCs.
///
/// Every read removes the oldest queued message. Iterating blocks while the
/// inbox is empty and only ends once the node and every handle able to
/// deliver to it are gone. The stream is not replayable: a message taken by
/// one `Consume` is never seen by another.
#[derive(Debug)]
pub struct Consume<P> {
    rx: Receiver<Rpc<P>>,
}

impl<P> Consume<P> {
    /// Wrap the receiving end of a channel that a transport feeds with
    /// inbound RPCs.
    pub fn new(rx: Receiver<Rpc<P>>) -> Self {
        Self { rx }
    }

    /// Take the oldest message without blocking.
    pub fn try_next(&self) -> Option<Rpc<P>> {
        self.rx.try_recv().ok()
    }

    /// Wait at most `timeout` for the next message.
    pub fn next_timeout(&self, timeout: Duration) -> Option<Rpc<P>> {
        self.rx.recv_timeout(timeout).ok()
    }

    /// Number of messages currently queued.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

impl<P> From<Receiver<Rpc<P>>> for Consume<P> {
    fn from(rx: Receiver<Rpc<P>>) -> Self {
        Self::new(rx)
    }
}

impl<P> Iterator for Consume<P> {
    type Item = Rpc<P>;

    fn next(&mut self) -> Option<Self::Item> {
        self.rx.recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeId;
    use std::thread;

    #[test]
    fn test_fifo_order() {
        let inbox = Inbox::new(InboxCapacity::Unbounded);
        for i in 0..5u32 {
            inbox.push(Rpc::new(NodeId(1), i));
        }

        let consume = inbox.consume();
        let got: Vec<u32> = consume.take(5).map(|rpc| rpc.payload).collect();
        assert_eq!(got, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_try_next_on_empty() {
        let inbox: Inbox<u32> = Inbox::new(InboxCapacity::Unbounded);
        let consume = inbox.consume();
        assert!(consume.is_empty());
        assert_eq!(consume.try_next(), None);
        assert_eq!(consume.next_timeout(Duration::from_millis(10)), None);
    }

    #[test]
    fn test_consume_blocks_until_push() {
        let inbox = Inbox::new(InboxCapacity::Unbounded);
        let mut consume = inbox.consume();

        thread::scope(|s| {
            let reader = s.spawn(move || consume.next());
            inbox.push(Rpc::new(NodeId(9), "late"));
            let rpc = reader.join().unwrap();
            assert_eq!(rpc, Some(Rpc::new(NodeId(9), "late")));
        });
    }

    #[test]
    fn test_consume_from_foreign_channel() {
        let (tx, rx) = channel::unbounded();
        let consume = Consume::from(rx);

        tx.send(Rpc::new(NodeId(4), 'x')).unwrap();
        assert_eq!(consume.len(), 1);
        assert_eq!(consume.try_next(), Some(Rpc::new(NodeId(4), 'x')));

        drop(tx);
        assert_eq!(consume.count(), 0);
    }

    #[test]
    fn test_bounded_reports_capacity() {
        let inbox: Inbox<u8> = Inbox::new(InboxCapacity::Bounded(2));
        assert_eq!(inbox.capacity(), InboxCapacity::Bounded(2));

        inbox.push(Rpc::new(NodeId(0), 1));
        inbox.push(Rpc::new(NodeId(0), 2));
        assert_eq!(inbox.len(), 2);
    }
}
