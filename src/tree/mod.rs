//! Tree operations over JSON documents: translation walk, structural diff
//! and merge.

pub mod diff;
pub mod error;
pub mod merge;
pub mod walker;

pub use diff::{diff, is_empty_container};
pub use error::{TreeError, TreeResult, kind_name};
pub use merge::merge;
pub use walker::{SkipSet, translate_tree};
