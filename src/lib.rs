//! A from-scratch singly-linked list with array-like ergonomics.
//!
//! The core is [`List`]: positional insertion and removal, front/back access,
//! functional transforms, bubble sort, shuffling, concatenation, reversal and
//! text serialization. Around it sit a JSON layer ([`json`]), a TOML
//! configuration ([`config`]) and a small command interpreter ([`script`])
//! used by the `seqlist` binary.

pub mod config;
pub mod error;
pub mod json;
pub mod list;
pub mod record;
pub mod render;
pub mod script;

pub use config::{ConfigError, ListConfig};
pub use error::{ListError, Result};
pub use list::{IntoIter, Iter, IterMut, List, DEFAULT_SHUFFLE_DEPTH};
pub use record::Entry;
pub use render::PrintStyle;
pub use script::{ScriptError, Session};

/// Builds a [`List`] from its arguments, first argument at the front.
///
/// ```
/// let list = seqlist::seqlist![1, 2, 3];
/// assert_eq!(list.len(), 3);
/// assert_eq!(list.front().ok(), Some(&1));
/// ```
#[macro_export]
macro_rules! seqlist {
    () => {
        $crate::List::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::List::from_sequence([$($value),+])
    };
}
