//! The skip-list node (§3.1, §3.2).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crossbeam_epoch::{Atomic, Guard, Owned, Shared};

use crate::comparator::Key;

/// A single skip-list cell.
///
/// `forward` holds one [`Atomic`] link per level the node participates in (`forward[i]` is the
/// link at level `i`). The Finder (§4.3) reads these links with no lock at all; only a thread
/// holding `lock` may write them, per the mutator protocol in §4.4/§4.5.
///
/// `fully_linked` and `marked` are the two status flags from §3.1's node state machine. Both are
/// written with `Release` ordering and read with `Acquire` ordering: lockless readers rely on
/// this to observe a node's links before they observe it as linked, and to never observe a
/// removed node as still live.
#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) key: Key,
    forward: Box<[Atomic<Node>]>,
    fully_linked: AtomicBool,
    marked: AtomicBool,
    /// Guards mutation of `forward` and `marked` for this node, and is the unit of lock
    /// ordering described in §5 ("Locking discipline").
    pub(crate) lock: Mutex<()>,
}

impl Node {
    /// The node's top level: it participates in levels `0..=top_level()`.
    #[inline]
    pub(crate) fn top_level(&self) -> usize {
        self.forward.len() - 1
    }

    #[inline]
    pub(crate) fn is_fully_linked(&self) -> bool {
        self.fully_linked.load(Ordering::Acquire)
    }

    #[inline]
    pub(crate) fn set_fully_linked(&self) {
        self.fully_linked.store(true, Ordering::Release);
    }

    #[inline]
    pub(crate) fn is_marked(&self) -> bool {
        self.marked.load(Ordering::Acquire)
    }

    /// Sets `marked`. Caller must hold `self.lock`.
    #[inline]
    pub(crate) fn set_marked(&self) {
        self.marked.store(true, Ordering::Release);
    }

    #[inline]
    pub(crate) fn load_forward<'g>(&self, level: usize, guard: &'g Guard) -> Shared<'g, Node> {
        self.forward[level].load(Ordering::Acquire, guard)
    }

    /// Writes `forward[level]`. Caller must hold `self.lock` (the predecessor's, when linking a
    /// new node in, or the node-to-delete's own, when the Finder reads it during unlinking).
    #[inline]
    pub(crate) fn store_forward(&self, level: usize, next: Shared<'_, Node>) {
        self.forward[level].store(next, Ordering::Release);
    }

    /// Builds a sentinel node (the list's `-inf`/`+inf` endpoints): fully linked from birth,
    /// never marked (§3.2 invariant 5), with `forward[i]` initialized from `links`.
    ///
    /// The left sentinel is built with `links` set to `height` copies of the (already
    /// constructed) right sentinel; the right sentinel is built with `height` null links.
    pub(crate) fn sentinel<'g>(
        key: Key,
        links: impl Iterator<Item = Shared<'g, Node>>,
        guard: &'g Guard,
    ) -> Shared<'g, Node> {
        let forward: Box<[Atomic<Node>]> = links.map(Atomic::from).collect();
        let node = Owned::new(Node {
            key,
            forward,
            fully_linked: AtomicBool::new(true),
            marked: AtomicBool::new(false),
            lock: Mutex::new(()),
        });
        node.into_shared(guard)
    }

    /// Builds a new, not-yet-linked element node. `fully_linked` starts false and is set only
    /// after every `forward[i]` has been published (§4.4 step e).
    pub(crate) fn new<'g>(
        key: Key,
        top_level: usize,
        successors: impl Iterator<Item = Shared<'g, Node>>,
    ) -> Owned<Node> {
        let forward: Box<[Atomic<Node>]> = successors.map(Atomic::from).collect();
        debug_assert_eq!(forward.len(), top_level + 1);
        Owned::new(Node {
            key,
            forward,
            fully_linked: AtomicBool::new(false),
            marked: AtomicBool::new(false),
            lock: Mutex::new(()),
        })
    }
}
