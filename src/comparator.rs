//! Element ordering.
//!
//! The list never compares raw byte strings directly: every comparison goes through [`Key`],
//! which dispatches the two sentinel values by enum variant before ever invoking a
//! user-supplied [`Comparator`]. This sidesteps the classic hazard of a byte-string sentinel
//! colliding with a real element (see the reference implementation's `HOPSCOTCH_VAL_LIST_DEFAULT_*`
//! constants, which this crate deliberately does not reproduce).

use std::cmp::Ordering;
use std::sync::Arc;

/// A total-order predicate over byte strings.
///
/// Implementations must be consistent: `compare(a, b)` and `compare(b, a)` must agree (up to
/// sign), and the relation must be transitive. The trait is intentionally infallible, mirroring
/// [`Ord`]; a comparator that wants to reject malformed input should validate before calling
/// [`crate::SkipSet::add`].
pub trait Comparator: Send + Sync {
    /// Compares two elements already known to be ordinary values (never sentinels).
    fn compare(&self, a: &[u8], b: &[u8]) -> Ordering;
}

/// The default comparator: lexicographic byte compare up to the shorter length, ties broken by
/// length (the shorter string sorts first).
#[derive(Debug, Default, Clone, Copy)]
pub struct LexicographicComparator;

impl Comparator for LexicographicComparator {
    fn compare(&self, a: &[u8], b: &[u8]) -> Ordering {
        let n = a.len().min(b.len());
        match a[..n].cmp(&b[..n]) {
            Ordering::Equal => a.len().cmp(&b.len()),
            ord => ord,
        }
    }
}

/// A node's key: either a sentinel or a user element.
///
/// `NegInf`/`PosInf` are distinguished by *variant*, not by byte content, so no user-supplied
/// byte string can ever be confused with a sentinel.
#[derive(Debug, Clone)]
pub enum Key {
    /// The list's left sentinel. Compares less than every other key.
    NegInf,
    /// A real element.
    Value(Box<[u8]>),
    /// The list's right sentinel. Compares greater than every other key.
    PosInf,
}

impl Key {
    pub(crate) fn value(bytes: &[u8]) -> Self {
        Key::Value(bytes.into())
    }

    pub(crate) fn as_value(&self) -> Option<&[u8]> {
        match self {
            Key::Value(v) => Some(v),
            _ => None,
        }
    }
}

/// Orders two keys, special-casing the sentinels before consulting `cmp`.
pub(crate) fn compare_keys(cmp: &dyn Comparator, a: &Key, b: &Key) -> Ordering {
    match (a, b) {
        (Key::NegInf, Key::NegInf) => Ordering::Equal,
        (Key::NegInf, _) => Ordering::Less,
        (_, Key::NegInf) => Ordering::Greater,
        (Key::PosInf, Key::PosInf) => Ordering::Equal,
        (Key::PosInf, _) => Ordering::Greater,
        (_, Key::PosInf) => Ordering::Less,
        (Key::Value(x), Key::Value(y)) => cmp.compare(x, y),
    }
}

/// A shared, cloneable handle to a comparator, as carried by [`crate::SkipSetConfig`].
pub type SharedComparator = Arc<dyn Comparator>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexicographic_orders_by_bytes_then_length() {
        let cmp = LexicographicComparator;
        assert_eq!(cmp.compare(b"a", b"b"), Ordering::Less);
        assert_eq!(cmp.compare(b"ab", b"a"), Ordering::Greater);
        assert_eq!(cmp.compare(b"a", b"a"), Ordering::Equal);
        assert_eq!(cmp.compare(b"", b"a"), Ordering::Less);
    }

    #[test]
    fn sentinels_compare_by_identity_not_content() {
        let cmp = LexicographicComparator;
        let min = Key::NegInf;
        let max = Key::PosInf;
        // A user value that happens to equal what a byte-string sentinel encoding might have
        // used historically must still sort strictly between the two sentinels.
        let tricky = Key::value(b"<<<-INFINITY>>>");
        assert_eq!(compare_keys(&cmp, &min, &tricky), Ordering::Less);
        assert_eq!(compare_keys(&cmp, &tricky, &max), Ordering::Less);
        assert_eq!(compare_keys(&cmp, &min, &max), Ordering::Less);
        assert_eq!(compare_keys(&cmp, &max, &min), Ordering::Greater);
    }
}
