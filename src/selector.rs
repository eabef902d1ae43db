//! Checkable selection over the discovered test file categories.
//!
//! [`FilterSelector`] owns the category list and the per-category checked
//! flags. A presentation layer renders the categories however it likes,
//! forwards toggles by index, and listens for [`SelectionChanged`] on the
//! channel handed out by [`FilterSelector::subscribe`].

use std::collections::HashSet;
use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};

use crate::error::FilterError;
use crate::fixture;
use crate::scan::{self, Category, ROOT_CATEGORY};

/// Notification delivered to subscribers whenever a category is toggled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChanged;

/// Selection model for the test file filter dropdown.
///
/// Categories are discovered once at construction and never change; only
/// their checked flags do. All queries after construction are pure in-memory
/// reads.
#[derive(Debug)]
pub struct FilterSelector {
    fixture_id: String,
    fixture_type: String,
    categories: Vec<Category>,
    checked: Vec<bool>,
    subscribers: Vec<Sender<SelectionChanged>>,
}

impl FilterSelector {
    /// Build a selector for the fixture configured next to `app_path`.
    ///
    /// Reads the fixture id from the executable's sibling `config.json`, the
    /// fixture type from the settings file in `settings_dir`, then scans
    /// `test_files_root` for compatible test definitions. Every discovered
    /// category starts unchecked.
    pub fn new(
        app_path: &Path,
        settings_dir: &Path,
        test_files_root: &Path,
    ) -> Result<Self, FilterError> {
        let fixture_id = fixture::load_fixture_id(app_path)?;
        let fixture_type = fixture::load_fixture_type(settings_dir, &fixture_id)?;
        let categories = scan::scan_categories(test_files_root, &fixture_type);
        let checked = vec![false; categories.len()];

        Ok(Self {
            fixture_id,
            fixture_type,
            categories,
            checked,
            subscribers: Vec::new(),
        })
    }

    /// Fixture id resolved from the host application's `config.json`.
    #[must_use]
    pub fn fixture_id(&self) -> &str {
        &self.fixture_id
    }

    /// Fixture type resolved from the settings file.
    #[must_use]
    pub fn fixture_type(&self) -> &str {
        &self.fixture_type
    }

    /// Discovered categories in discovery order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Checked flag for the category at `index`, if the index is valid.
    #[must_use]
    pub fn is_checked(&self, index: usize) -> Option<bool> {
        self.checked.get(index).copied()
    }

    /// Register an observer for selection changes.
    ///
    /// Receivers that have been dropped are pruned at the next notification.
    pub fn subscribe(&mut self) -> Receiver<SelectionChanged> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Flip the checked flag for the category at `index` and notify
    /// subscribers.
    pub fn toggle(&mut self, index: usize) -> Result<(), FilterError> {
        let len = self.checked.len();
        let Some(flag) = self.checked.get_mut(index) else {
            return Err(FilterError::IndexOutOfRange { index, len });
        };
        *flag = !*flag;
        self.notify();
        Ok(())
    }

    /// Restore the selection from a comma-separated list of category names.
    ///
    /// Categories named in the list become checked, all others unchecked.
    /// Unknown names are ignored. Restoring does not notify subscribers;
    /// callers replaying saved state drive their own refresh.
    pub fn load_checked(&mut self, comma_separated: &str) {
        let wanted: HashSet<&str> = comma_separated.split(',').collect();
        for (category, flag) in self.categories.iter().zip(self.checked.iter_mut()) {
            *flag = wanted.contains(category.name.as_str());
        }
    }

    /// Comma-separated names of the checked categories, in discovery order.
    ///
    /// Inverse of [`load_checked`](Self::load_checked) for any selection
    /// reachable through it.
    #[must_use]
    pub fn checked_string(&self) -> String {
        let names: Vec<&str> = self
            .categories
            .iter()
            .zip(&self.checked)
            .filter(|(_, checked)| **checked)
            .map(|(category, _)| category.name.as_str())
            .collect();
        names.join(",")
    }

    /// Test files ending in `suffix` across all checked categories.
    ///
    /// Files from the root category are returned bare; every other category
    /// prefixes its files with the category name as a path segment. Results
    /// follow category discovery order.
    #[must_use]
    pub fn compatible_files(&self, suffix: &str) -> Vec<String> {
        let mut results = Vec::new();
        for (category, checked) in self.categories.iter().zip(&self.checked) {
            if !checked {
                continue;
            }
            for file in category.files.iter().filter(|file| file.ends_with(suffix)) {
                if category.name == ROOT_CATEGORY {
                    results.push(file.clone());
                } else {
                    results.push(format!("{}/{file}", category.name));
                }
            }
        }
        results
    }

    fn notify(&mut self) {
        self.subscribers
            .retain(|tx| tx.send(SelectionChanged).is_ok());
    }
}
