//! Dataset collaborators
//!
//! Reads the tab-separated SMS collection and splits it into disjoint
//! train/cv/test subsets with an explicit seed.

pub mod loader;
pub mod split;

pub use loader::{load_messages, read_messages};
pub use split::{split, Split, SplitProportions};
