//! Fixture-aware selection of test definition files.
//!
//! The crate discovers filter categories from a directory tree of JSON test
//! definitions, keeps a checkable selection over them, and answers queries
//! for the files compatible with the station's configured fixture. Embedders
//! render the categories however they like and drive the model through
//! [`FilterSelector`]; selection changes arrive on the channel returned by
//! [`FilterSelector::subscribe`].

mod error;
mod fixture;
mod scan;
mod selector;

pub use error::FilterError;
pub use fixture::{SHARED_SETTINGS_FILE, per_fixture_settings_name};
pub use scan::Category;
pub use selector::{FilterSelector, SelectionChanged};
