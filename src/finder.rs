//! Lock-free top-down search (§4.3).

use std::cmp::Ordering;

use crossbeam_epoch::{Guard, Shared};

use crate::comparator::{compare_keys, Comparator, Key};
use crate::node::Node;

/// Compile-time cap on the predecessor/successor arrays a [`find`] call returns.
///
/// `find` returns these arrays by value on the stack rather than allocating a `Vec` per call; a
/// [`crate::SkipSetConfig`] whose `max_level` exceeds this cap is rejected at construction time.
pub const MAX_LEVEL_CAP: usize = 32;

/// The result of a single top-down search: one predecessor/successor pair per level, and the
/// highest level at which the target key was observed, if any.
pub(crate) struct FindResult<'g> {
    pub(crate) pred: [Shared<'g, Node>; MAX_LEVEL_CAP],
    pub(crate) succ: [Shared<'g, Node>; MAX_LEVEL_CAP],
    pub(crate) level_found: Option<usize>,
}

impl<'g> FindResult<'g> {
    /// The node that matched `key`, when `level_found` is present.
    pub(crate) fn matched(&self) -> Option<Shared<'g, Node>> {
        self.level_found.map(|level| self.succ[level])
    }
}

/// Walks the list from `max_level - 1` down to `0`, as in §4.3.
///
/// Takes no locks and reads neither `marked` nor `fully_linked`: it decides purely from
/// comparator output against the forward-chained keys. It may therefore walk through nodes that
/// are marked or not yet fully linked; callers (the mutator protocol, and `contains`) compensate
/// by checking those flags themselves after `find` returns.
pub(crate) fn find<'g>(
    head: Shared<'g, Node>,
    max_level: usize,
    cmp: &dyn Comparator,
    key: &Key,
    guard: &'g Guard,
) -> FindResult<'g> {
    debug_assert!(max_level <= MAX_LEVEL_CAP);

    let mut pred_arr = [Shared::null(); MAX_LEVEL_CAP];
    let mut succ_arr = [Shared::null(); MAX_LEVEL_CAP];
    let mut level_found = None;

    let mut pred = head;
    for level in (0..max_level).rev() {
        // SAFETY: `pred` is either `head` or a node previously read off a forward link; both are
        // always live for the duration of `guard`'s pin.
        let pred_ref = unsafe { pred.deref() };
        let mut curr = pred_ref.load_forward(level, guard);

        loop {
            // SAFETY: every forward chain terminates at the right sentinel, which is never null,
            // so `curr` is always dereferenceable here.
            let curr_ref = unsafe { curr.deref() };
            if compare_keys(cmp, &curr_ref.key, key) == Ordering::Less {
                pred = curr;
                // SAFETY: see above.
                curr = unsafe { pred.deref() }.load_forward(level, guard);
            } else {
                break;
            }
        }

        if level_found.is_none() {
            // SAFETY: see above.
            let curr_ref = unsafe { curr.deref() };
            if compare_keys(cmp, &curr_ref.key, key) == Ordering::Equal {
                level_found = Some(level);
            }
        }

        pred_arr[level] = pred;
        succ_arr[level] = curr;
    }

    FindResult {
        pred: pred_arr,
        succ: succ_arr,
        level_found,
    }
}
