//! # Interleave
//!
//! Deterministic merge of several ordered line sequences into one.
//!
//! Two policies are provided:
//! - [`union`]: round-robin by global index, in source order, up to the longest
//!   sequence (canonical)
//! - [`waves`]: the legacy form, interleaving in waves bounded by the shortest
//!   remaining sequence and dropping exhausted sequences after each wave
//!
//! Both emit every element exactly once.
//!
//! ## Usage Example
//!
//! ```
//! use interleave::{Interleaver, InterleavePolicy};
//!
//! let merged = Interleaver::new(InterleavePolicy::Union).merge(vec![
//!     vec!["Hello".to_string()],
//!     vec!["World".to_string(), "is big".to_string()],
//! ]);
//! assert_eq!(&*merged, ["Hello", "World", "is big"]);
//! ```

mod interleaver;
mod union;
mod waves;

pub use contracts::{InterleavePolicy, Lines, MergedLines};
pub use interleaver::{interleave, Interleaver};
pub use union::union;
pub use waves::waves;
