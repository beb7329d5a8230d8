use std::collections::HashMap;

use crate::error::TrackerError;
use crate::message::Tracked;

// Upper bound on what `new` reserves up front; larger trackers grow on demand.
const PREALLOC_LIMIT: usize = 4096;

/// What happened to a message handed to [`MessageTracker::add`].
#[derive(Debug, Clone, PartialEq)]
pub enum Admission<M> {
    /// Stored; the tracker had room.
    Stored,
    /// Stored after dropping the oldest message, which is returned.
    Evicted(M),
    /// A message with the same id is already tracked. The stored one is
    /// left untouched and the new one is handed back.
    Duplicate(M),
    /// The tracker has zero capacity and keeps nothing.
    Discarded(M),
}

impl<M> Admission<M> {
    pub fn is_stored(&self) -> bool {
        matches!(self, Admission::Stored | Admission::Evicted(_))
    }
}

#[derive(Debug, Clone)]
struct Node<M> {
    message: M,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Bounded FIFO store of recently seen messages.
///
/// Messages live in a slot arena threaded into a doubly linked list (oldest
/// at the head, newest at the tail). An id → slot map gives constant-time
/// existence checks, lookups and removal from anywhere in the list. Freed
/// slots are recycled, so the arena never grows past `capacity`.
#[derive(Debug, Clone)]
pub struct MessageTracker<M> {
    capacity: usize,
    slots: Vec<Option<Node<M>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    index: HashMap<String, usize>,
}

impl<M: Tracked> MessageTracker<M> {
    /// Creates an empty tracker holding at most `capacity` messages.
    ///
    /// A capacity of zero is valid: such a tracker never stores anything.
    pub fn new(capacity: usize) -> Self {
        let reserve = capacity.min(PREALLOC_LIMIT);
        Self {
            capacity,
            slots: Vec::with_capacity(reserve),
            free: Vec::new(),
            head: None,
            tail: None,
            index: HashMap::with_capacity(reserve),
        }
    }

    /// Tracks `message`, evicting the oldest entry first when full.
    ///
    /// A message whose id is already tracked is ignored, including its
    /// payload. At most one message is evicted per call.
    pub fn add(&mut self, message: M) -> Admission<M> {
        if self.index.contains_key(message.id()) {
            log::trace!("tracker: ignoring duplicate message {}", message.id());
            return Admission::Duplicate(message);
        }

        if self.capacity == 0 {
            log::trace!("tracker: zero capacity, dropping message {}", message.id());
            return Admission::Discarded(message);
        }

        let evicted = if self.index.len() >= self.capacity {
            self.pop_front()
        } else {
            None
        };

        let id = message.id().to_owned();
        let slot = self.push_back(message);
        self.index.insert(id, slot);

        match evicted {
            Some(oldest) => {
                log::debug!("tracker: full at {}, evicted message {}", self.capacity, oldest.id());
                Admission::Evicted(oldest)
            }
            None => Admission::Stored,
        }
    }

    /// Stops tracking the message with `id` and returns it.
    ///
    /// The order of the remaining messages is unchanged.
    pub fn delete(&mut self, id: &str) -> Result<M, TrackerError> {
        let slot = self.index.remove(id).ok_or(TrackerError::NotFound)?;
        let message = self.unlink(slot).ok_or(TrackerError::NotFound)?;
        log::trace!("tracker: deleted message {}", id);
        Ok(message)
    }

    /// Returns the message with `id` without removing it or changing its
    /// position.
    pub fn message(&self, id: &str) -> Result<&M, TrackerError> {
        self.index
            .get(id)
            .and_then(|&slot| self.node(slot))
            .map(|node| &node.message)
            .ok_or(TrackerError::NotFound)
    }

    /// All tracked messages, oldest first.
    pub fn messages(&self) -> Vec<&M> {
        self.iter().collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> Iter<'_, M> {
        Iter {
            slots: &self.slots,
            next: self.head,
            remaining: self.index.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.index.clear();
        self.head = None;
        self.tail = None;
    }

    fn pop_front(&mut self) -> Option<M> {
        let slot = self.head?;
        let message = self.unlink(slot)?;
        self.index.remove(message.id());
        Some(message)
    }

    fn push_back(&mut self, message: M) -> usize {
        let node = Node {
            message,
            prev: self.tail,
            next: None,
        };

        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(node);
                slot
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };

        match self.tail {
            Some(tail) => {
                if let Some(node) = self.node_mut(tail) {
                    node.next = Some(slot);
                }
            }
            None => self.head = Some(slot),
        }
        self.tail = Some(slot);

        slot
    }

    fn unlink(&mut self, slot: usize) -> Option<M> {
        let node = self.slots.get_mut(slot).and_then(Option::take)?;

        match node.prev {
            Some(prev) => {
                if let Some(prev) = self.node_mut(prev) {
                    prev.next = node.next;
                }
            }
            None => self.head = node.next,
        }

        match node.next {
            Some(next) => {
                if let Some(next) = self.node_mut(next) {
                    next.prev = node.prev;
                }
            }
            None => self.tail = node.prev,
        }

        self.free.push(slot);
        Some(node.message)
    }

    fn node(&self, slot: usize) -> Option<&Node<M>> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, slot: usize) -> Option<&mut Node<M>> {
        self.slots.get_mut(slot).and_then(Option::as_mut)
    }
}

/// FIFO iterator over a [`MessageTracker`], oldest message first.
pub struct Iter<'a, M> {
    slots: &'a [Option<Node<M>>],
    next: Option<usize>,
    remaining: usize,
}

impl<'a, M> Iterator for Iter<'a, M> {
    type Item = &'a M;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.next?;
        let node = self.slots.get(slot)?.as_ref()?;
        self.next = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.message)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<M> ExactSizeIterator for Iter<'_, M> {}

impl<'a, M: Tracked> IntoIterator for &'a MessageTracker<M> {
    type Item = &'a M;
    type IntoIter = Iter<'a, M>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
