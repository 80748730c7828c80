//! A concurrent, ordered set of byte strings backed by a lazy, lock-based skip list.
//!
//! Reads (`contains`) are lock-free: they walk the list guided only by comparator output and
//! never touch a mutex. Writes (`add`/`remove`) optimistically locate the handful of nodes a key
//! touches, lock just those, and validate that the list hasn't changed underneath them before
//! committing, retrying from scratch on a validation failure rather than blocking.
//!
//! ```
//! use lazy_skipset::SkipSet;
//!
//! let set = SkipSet::new(Default::default()).unwrap();
//! assert!(set.add(b"banana"));
//! assert!(!set.add(b"banana"));
//! assert!(set.contains(b"banana"));
//! assert!(set.remove(b"banana"));
//! assert!(!set.contains(b"banana"));
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(unreachable_pub)]

mod comparator;
mod config;
mod error;
mod finder;
mod level;
mod node;
mod skipset;

pub mod test_support;

pub use comparator::{Comparator, LexicographicComparator};
pub use config::{SkipSetConfig, SkipSetConfigBuilder};
pub use error::ConfigError;
pub use skipset::SkipSet;
