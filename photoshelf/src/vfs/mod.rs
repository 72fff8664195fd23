//! Root-anchored virtual filesystem view.
//!
//! Everything the gallery serves is addressed by a *subpath*: a
//! forward-slash relative path interpreted against a fixed root
//! directory. [`VfsRoot`] owns that root and provides the three
//! primitives the rest of the crate builds on:
//!
//! - [`VfsRoot::resolve`]: subpath to [`Entry`], with containment
//!   checks so a request can never escape the root,
//! - [`VfsRoot::list_children`]: immediate children in deterministic
//!   name order,
//! - [`VfsRoot::find_first`]: breadth-first search for the first file
//!   matching a predicate, used to pick folder preview images.
//!
//! All lookups degrade rather than fail hard: a missing or unreadable
//! path yields an empty listing or a [`VfsError`], never a panic.

mod entry;
mod error;
mod find;
mod list;
mod root;

pub use entry::Entry;
pub use error::{VfsError, VfsResult};
pub use root::VfsRoot;

pub(crate) use root::normalize_subpath;
