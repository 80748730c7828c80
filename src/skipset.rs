//! The set itself: construction, and the `add`/`contains`/`remove` mutator protocol (§4.4–§4.6).

use std::sync::atomic::Ordering;
use std::sync::MutexGuard;

use crossbeam_epoch::{self as epoch, Atomic, Guard, Shared};
use crossbeam_utils::Backoff;

use crate::comparator::{Key, SharedComparator};
use crate::config::SkipSetConfig;
use crate::error::ConfigError;
use crate::finder::{find, FindResult};
use crate::level::random_top_level;
use crate::node::Node;

/// A concurrent, ordered set of byte strings backed by a lazy, lock-based skip list.
///
/// Reads (`contains`) never block and never take a lock. Writes (`add`/`remove`) lock only the
/// handful of predecessor nodes a given key touches, and validate optimistically before
/// committing (§4.4/§4.5). See the crate documentation for the full protocol.
pub struct SkipSet {
    head: Atomic<Node>,
    max_level: usize,
    p: f64,
    comparator: SharedComparator,
}

impl std::fmt::Debug for SkipSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkipSet")
            .field("max_level", &self.max_level)
            .field("p", &self.p)
            .finish_non_exhaustive()
    }
}

impl SkipSet {
    /// Builds an empty set from `config`, rejecting it per [`SkipSetConfig::validate`].
    pub fn new(config: SkipSetConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let height = config.max_level;

        // SAFETY: the sentinels are being constructed fresh and are not yet reachable from
        // anywhere another thread could observe; no guard protection is needed until `head` is
        // published below.
        let guard = unsafe { epoch::unprotected() };
        let tail = Node::sentinel(Key::PosInf, std::iter::repeat(Shared::null()).take(height), guard);
        let head = Node::sentinel(Key::NegInf, std::iter::repeat(tail).take(height), guard);

        Ok(Self {
            head: Atomic::from(head),
            max_level: height,
            p: config.p,
            comparator: config.comparator,
        })
    }

    fn head_ptr<'g>(&self, guard: &'g Guard) -> Shared<'g, Node> {
        self.head.load(Ordering::Acquire, guard)
    }

    fn find<'g>(&self, key: &Key, guard: &'g Guard) -> FindResult<'g> {
        find(self.head_ptr(guard), self.max_level, self.comparator.as_ref(), key, guard)
    }

    /// Returns whether `value` is present (§4.6).
    ///
    /// A node counts as present only once it is fully linked and not yet marked for removal;
    /// a node mid-insertion or mid-removal is invisible to this check either way.
    pub fn contains(&self, value: &[u8]) -> bool {
        let guard = &epoch::pin();
        let key = Key::value(value);
        let found = self.find(&key, guard);
        match found.matched() {
            // SAFETY: `matched` only ever returns a pointer read out of `found.succ`, which
            // `find` always populates with live, dereferenceable nodes (§4.3).
            Some(node) => {
                let node_ref = unsafe { node.deref() };
                node_ref.is_fully_linked() && !node_ref.is_marked()
            }
            None => false,
        }
    }

    /// Inserts `value`, returning `true` if it was added and `false` if it was already present
    /// (§4.4).
    pub fn add(&self, value: &[u8]) -> bool {
        let guard = &epoch::pin();
        let key = Key::value(value);
        let top_level = random_top_level(self.max_level, self.p);

        loop {
            let found = self.find(&key, guard);

            if let Some(level) = found.level_found {
                // SAFETY: `found.succ[level]` is the match `find` just reported; always live.
                let existing = unsafe { found.succ[level].deref() };
                if existing.is_marked() {
                    // A concurrent remove is mid-flight on the same value; once it physically
                    // unlinks, a fresh `find` will no longer see it. Restart without having
                    // taken any locks.
                    tracing::trace!("add: racing a concurrent remove of the same value, restarting");
                    continue;
                }
                let backoff = Backoff::new();
                while !existing.is_fully_linked() {
                    backoff.snooze();
                }
                return false;
            }

            let guards = lock_predecessors(&found.pred[..=top_level]);
            if !validate_add(&found, top_level, guard) {
                drop(guards);
                tracing::trace!("add: validation failed, retrying");
                continue;
            }

            let new_node = Node::new(key.clone(), top_level, (0..=top_level).map(|level| found.succ[level]));
            let new_shared = new_node.into_shared(guard);
            for level in 0..=top_level {
                // SAFETY: `found.pred[level]` is held locked via `guards` for the duration of
                // this loop body.
                unsafe { found.pred[level].deref() }.store_forward(level, new_shared);
            }
            // SAFETY: `new_shared` was just published into every level it participates in.
            unsafe { new_shared.deref() }.set_fully_linked();
            tracing::debug!(top_level, "add: committed");
            return true;
        }
    }

    /// Snapshots the values reachable at `level`, left to right, excluding both sentinels.
    /// Used only to check the order/level-subset/no-dangling invariants from tests; real callers
    /// have no use for internal levels (iteration is explicitly out of scope for this crate).
    #[cfg(test)]
    fn level_snapshot(&self, level: usize) -> Vec<Vec<u8>> {
        let guard = &epoch::pin();
        let mut values = Vec::new();
        // SAFETY: every forward chain is always either another live node or the right sentinel.
        let mut current = unsafe { self.head_ptr(guard).deref() }.load_forward(level, guard);
        loop {
            let node = unsafe { current.deref() };
            match &node.key {
                Key::Value(v) => {
                    values.push(v.to_vec());
                    current = node.load_forward(level, guard);
                }
                Key::PosInf => break,
                Key::NegInf => unreachable!("the left sentinel is never a forward target"),
            }
        }
        values
    }

    /// Removes `value`, returning `true` if it was present and `false` otherwise (§4.5).
    pub fn remove(&self, value: &[u8]) -> bool {
        let guard = &epoch::pin();
        let key = Key::value(value);

        let (victim, victim_lock, top_level) = loop {
            let found = self.find(&key, guard);
            let Some(level) = found.level_found else {
                return false;
            };
            // SAFETY: see `add`.
            let candidate = found.succ[level];
            let candidate_ref = unsafe { candidate.deref() };
            if !can_delete(candidate_ref, level) {
                return false;
            }

            let lock = candidate_ref.lock.lock().unwrap();
            if candidate_ref.is_marked() {
                // Another remover already won the race for this node; definitive under the lock.
                return false;
            }
            candidate_ref.set_marked();
            break (candidate, lock, candidate_ref.top_level());
        };

        loop {
            let found = self.find(&key, guard);
            let guards = lock_predecessors(&found.pred[..=top_level]);
            if !validate_remove(&found.pred[..=top_level], victim, guard) {
                drop(guards);
                tracing::trace!("remove: predecessor validation failed, retrying");
                continue;
            }

            // SAFETY: `victim` is still linked at every level up to `top_level` (nothing but
            // this call ever unlinks it, since it is marked and this thread alone holds its
            // lock), so its own forward pointers are safe to read and splice in.
            let victim_ref = unsafe { victim.deref() };
            for level in (0..=top_level).rev() {
                let next = victim_ref.load_forward(level, guard);
                // SAFETY: `found.pred[level]` is locked via `guards`.
                unsafe { found.pred[level].deref() }.store_forward(level, next);
            }
            drop(guards);
            drop(victim_lock);
            // SAFETY: `victim` is now unreachable from `head`; the epoch guard defers the actual
            // free until no pinned thread could still hold a reference obtained before the
            // unlink above.
            unsafe { guard.defer_destroy(victim) };
            tracing::debug!(top_level, "remove: committed");
            return true;
        }
    }
}

impl Drop for SkipSet {
    fn drop(&mut self) {
        // SAFETY: `&mut self` means no concurrent access is possible; nothing else can be
        // pinned against this list's nodes once it is being dropped.
        unsafe {
            let guard = epoch::unprotected();
            let mut current = self.head.load(Ordering::Relaxed, guard);
            while !current.is_null() {
                let next = current.deref().load_forward(0, guard);
                drop(current.into_owned());
                current = next;
            }
        }
    }
}

/// Acquires, once per distinct node, the locks for every predecessor in `pred` (§4.4 step c /
/// §4.5 step e). Consecutive repeats are common: many levels above the lowest typically share
/// the same predecessor.
fn lock_predecessors<'g>(pred: &[Shared<'g, Node>]) -> Vec<MutexGuard<'g, ()>> {
    let mut guards = Vec::with_capacity(pred.len());
    let mut prev: Option<Shared<'g, Node>> = None;
    for &node in pred {
        if prev != Some(node) {
            // SAFETY: every `pred` entry comes from `find`, which only ever returns live nodes.
            let node_ref = unsafe { node.deref() };
            guards.push(node_ref.lock.lock().unwrap());
            prev = Some(node);
        }
    }
    guards
}

/// §4.4 step d: every predecessor and its immediate successor must still be unmarked, and the
/// predecessor's forward link must not have moved since `find` observed it.
fn validate_add(found: &FindResult<'_>, top_level: usize, guard: &Guard) -> bool {
    for level in 0..=top_level {
        // SAFETY: both arrays hold only live nodes populated by `find`.
        let pred_ref = unsafe { found.pred[level].deref() };
        let succ_ref = unsafe { found.succ[level].deref() };
        if pred_ref.is_marked() || succ_ref.is_marked() {
            return false;
        }
        if pred_ref.load_forward(level, guard) != found.succ[level] {
            return false;
        }
    }
    true
}

/// §4.5 step f: every predecessor must still be unmarked and still point directly at `victim`.
/// Unlike `validate_add`, the successor itself (`victim`) need not be re-checked for marking:
/// this thread marked it and nothing else can unmark it.
fn validate_remove(pred: &[Shared<'_, Node>], victim: Shared<'_, Node>, guard: &Guard) -> bool {
    for (level, &pred_node) in pred.iter().enumerate() {
        // SAFETY: see `validate_add`.
        let pred_ref = unsafe { pred_node.deref() };
        if pred_ref.is_marked() {
            return false;
        }
        if pred_ref.load_forward(level, guard) != victim {
            return false;
        }
    }
    true
}

/// §4.5 step b: a node is eligible for removal only once fully linked, unmarked, and matched at
/// its own top level (matching it at a lower level would mean some other node with equal key is
/// still being inserted above it, which the add protocol's duplicate check rules out in a
/// correctly-synchronized list, but checking here keeps `remove` independently correct).
fn can_delete(node: &Node, level_found: usize) -> bool {
    node.is_fully_linked() && node.top_level() == level_found && !node.is_marked()
}
