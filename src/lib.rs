//! # IterComb - Lazy Iteration Combinators
//!
//! A single chainable abstraction, [`Iterate`], over arrays, maps, sets,
//! trees, linked lists, plain iterables and custom sources.
//!
//! Chains are built from three kinds of calls:
//!
//! - **Views** (`filter`, `take`, `sorted`, `transform`, ...) describe a new
//!   chain without touching the source
//! - **Operations** (`count`, `first`, `array`, `min`, ...) drive the source
//!   and return a value
//! - **Mutations** (`delete`, `update`, `extract`, ...) drive the source and
//!   write back to it through every view in between
//!
//! Each element is exchanged with the consumer through a [`Cursor`], which
//! answers with one [`Action`]: continue, stop, remove or replace.
//!
//! ```
//! use itercomb::{array, compare};
//!
//! let mut data = vec![1, 6, 2, 3, 8, 7, 0, 3];
//! array(&mut data)
//!     .sorted_by(compare::natural())
//!     .take(3)
//!     .delete()
//!     .unwrap();
//! assert_eq!(data, vec![6, 3, 8, 7, 3]);
//! ```

pub mod action;
pub mod backing;
pub mod compare;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod filter;
pub mod iterate;
pub mod mutations;
pub mod operations;
pub mod resolved;
pub mod set_ops;
pub mod source;
pub mod sources;
pub mod structure;
pub mod threshold;
pub mod transform;
pub mod window;

#[cfg(test)]
mod testing;

pub use action::{Action, Cursor};
pub use backing::Backing;
pub use config::{Comparator, Config, Equality};
pub use dispatch::{IntoIterate, custom, from, pipeline};
pub use error::{ErrorKind, IterateError, Result};
pub use iterate::Iterate;
pub use source::{Driver, Source};
pub use sources::{
    HasEntries, Linked, TraversalOrder, TreePath, TreeSource, array, empty, entries, iterable, join, linked,
    map, pairs, set, single, tree, tree_owned, tree_with, vec,
};
pub use structure::{Split, Unzip};
pub use threshold::Bound;
