//! Directory scan that groups test definition files into filter categories.
//!
//! Every directory under the test files root is a candidate category: the
//! root itself is published as `"Production"`, subdirectories under their
//! path relative to the root. A category only survives the scan if at least
//! one of its files is compatible with the active fixture type.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde_json::Value;
use walkdir::WalkDir;

/// Category name given to test files living directly in the scanned root.
pub(crate) const ROOT_CATEGORY: &str = "Production";

/// A discovered group of test files compatible with the active fixture.
#[derive(Debug, Clone)]
pub struct Category {
    pub name: String,
    pub files: BTreeSet<String>,
}

impl Category {
    fn new(name: String) -> Self {
        Self {
            name,
            files: BTreeSet::new(),
        }
    }
}

/// Walk `root` and build the category list in discovery order.
///
/// The walk is sorted by file name so discovery order is stable across
/// platforms. Files that cannot be read or parsed as JSON are skipped with a
/// diagnostic; a missing root yields an empty list.
pub(crate) fn scan_categories(root: &Path, fixture_type: &str) -> Vec<Category> {
    let mut categories: Vec<Category> = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("skipping unreadable entry under {}: {err}", root.display());
                continue;
            }
        };

        if entry.file_type().is_dir() {
            categories.push(Category::new(category_name(root, entry.path())));
            continue;
        }
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                log::warn!("cannot read {}: {err}", path.display());
                continue;
            }
        };
        let data: Value = match serde_json::from_str(&text) {
            Ok(data) => data,
            Err(err) => {
                log::warn!("cannot load {} as JSON: {err}", path.display());
                continue;
            }
        };
        if !fixture_type_matches(&data, fixture_type) {
            continue;
        }

        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        let parent = category_name(root, path.parent().unwrap_or(root));
        if let Some(category) = categories.iter_mut().rev().find(|c| c.name == parent) {
            category.files.insert(file_name.to_string());
        }
    }

    categories.retain(|category| !category.files.is_empty());
    categories
}

/// Resolve the category name for a directory under `root`.
fn category_name(root: &Path, dir: &Path) -> String {
    let relative = dir.strip_prefix(root).unwrap_or(dir);
    if relative.as_os_str().is_empty() {
        ROOT_CATEGORY.to_string()
    } else {
        relative.to_string_lossy().replace('\\', "/")
    }
}

/// Whether a test definition admits the active fixture type.
///
/// A missing `fixture_type` key (including non-object definitions) declares
/// no restriction. A declared value admits the fixture when it is an array
/// containing the type, or a string equal to it.
fn fixture_type_matches(data: &Value, fixture_type: &str) -> bool {
    match data.get("fixture_type") {
        None => true,
        Some(Value::Array(types)) => types.iter().any(|t| t.as_str() == Some(fixture_type)),
        Some(Value::String(single)) => single == fixture_type,
        Some(_) => false,
    }
}
