pub mod array;
pub mod entries;
pub mod iterable;
pub mod join;
pub mod linked;
pub mod tree;

pub use array::{ArraySource, EntryList, array, empty, pairs, single, vec};
pub use entries::{EntriesSource, HasEntries, entries, map, set};
pub use iterable::{IterableSource, iterable};
pub use join::{Join, join};
pub use linked::{Linked, linked};
pub use tree::{TraversalOrder, TreePath, TreeSource, tree, tree_owned, tree_with};
