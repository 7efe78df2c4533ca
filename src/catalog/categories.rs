//! Category catalog: dotted `parent.child` identifiers grouped by parent.
//!
//! The source is a plain text file, one identifier per line. Lines with
//! no `.` are ignored. Parents and children keep first-seen order; the
//! sorted parent list is derived on demand.

use super::CatalogError;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Category used when the catalog is empty.
pub const DEFAULT_CATEGORY: &str = "activity";

const SEPARATOR: char = '.';

#[derive(Debug, Clone, Default)]
pub struct CategoryCatalog {
    groups: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
}

impl CategoryCatalog {
    /// Build a catalog from the text of a category file.
    pub fn parse(text: &str) -> Self {
        let mut catalog = Self::default();
        for line in text.lines() {
            let line = line.trim();
            let Some(dot) = line.find(SEPARATOR) else {
                continue;
            };
            catalog.insert(&line[..dot], line);
        }
        catalog
    }

    /// Read and parse a category file, surfacing read/decode errors.
    pub fn try_load(path: &Path) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    /// Read a category file, degrading to an empty catalog on failure.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(catalog) => {
                tracing::debug!(
                    path = %path.display(),
                    parents = catalog.len(),
                    "category catalog loaded"
                );
                catalog
            }
            Err(e) => {
                tracing::warn!(error = %e, "category catalog unavailable, using default category");
                Self::default()
            }
        }
    }

    fn insert(&mut self, parent: &str, full: &str) {
        let slot = match self.index.get(parent) {
            Some(&i) => i,
            None => {
                self.groups.push((parent.to_string(), Vec::new()));
                self.index.insert(parent.to_string(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        self.groups[slot].1.push(full.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of parent categories.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Parent names, sorted.
    pub fn parents(&self) -> Vec<&str> {
        let mut parents: Vec<&str> = self.groups.iter().map(|(p, _)| p.as_str()).collect();
        parents.sort_unstable();
        parents
    }

    /// Parent names in the order they first appeared in the source.
    pub fn parents_in_source_order(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(p, _)| p.as_str())
    }

    /// Full dotted identifiers filed under `parent` (empty if unknown).
    pub fn children(&self, parent: &str) -> &[String] {
        self.index
            .get(parent)
            .map(|&i| self.groups[i].1.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains_parent(&self, parent: &str) -> bool {
        self.index.contains_key(parent)
    }

    /// The category a search should use when the user made no choice.
    pub fn default_category(&self) -> &str {
        self.parents().first().copied().unwrap_or(DEFAULT_CATEGORY)
    }

    /// Compose the category identifier for a parent and optional child.
    ///
    /// `child` may be a full dotted identifier (`catering.cafe`) or just
    /// the suffix (`cafe`). Anything not filed under `parent` selects the
    /// parent itself.
    pub fn select(&self, parent: &str, child: Option<&str>) -> String {
        let children = self.children(parent);
        match child.map(str::trim).filter(|c| !c.is_empty()) {
            Some(c) if children.iter().any(|k| k == c) => c.to_string(),
            Some(c) => {
                let full = format!("{}{}{}", parent, SEPARATOR, c);
                if children.contains(&full) {
                    full
                } else {
                    parent.to_string()
                }
            }
            None => parent.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "\
catering
catering.restaurant
catering.restaurant.pizza
accommodation.hotel
catering.cafe
activity
accommodation.hostel
";

    #[test]
    fn test_groups_by_first_separator() {
        let catalog = CategoryCatalog::parse(SAMPLE);
        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.children("catering"),
            &["catering.restaurant", "catering.restaurant.pizza", "catering.cafe"]
        );
        assert_eq!(
            catalog.children("accommodation"),
            &["accommodation.hotel", "accommodation.hostel"]
        );
    }

    #[test]
    fn test_lines_without_separator_ignored() {
        let catalog = CategoryCatalog::parse(SAMPLE);
        assert!(!catalog.contains_parent("activity"));
        let all: Vec<&String> = catalog
            .parents_in_source_order()
            .flat_map(|p| catalog.children(p))
            .collect();
        assert!(all.iter().all(|c| c.contains('.')));
    }

    #[test]
    fn test_children_start_with_parent() {
        let catalog = CategoryCatalog::parse(SAMPLE);
        for parent in catalog.parents() {
            for child in catalog.children(parent) {
                assert!(child.starts_with(&format!("{}.", parent)));
            }
        }
    }

    #[test]
    fn test_parent_order() {
        let catalog = CategoryCatalog::parse(SAMPLE);
        let seen: Vec<&str> = catalog.parents_in_source_order().collect();
        assert_eq!(seen, vec!["catering", "accommodation"]);
        assert_eq!(catalog.parents(), vec!["accommodation", "catering"]);
    }

    #[test]
    fn test_whitespace_trimmed() {
        let catalog = CategoryCatalog::parse("  leisure.park  \r\n\n");
        assert_eq!(catalog.children("leisure"), &["leisure.park"]);
    }

    #[test]
    fn test_missing_file_degrades_to_empty() {
        let catalog = CategoryCatalog::load(Path::new("/nonexistent/categories.txt"));
        assert!(catalog.is_empty());
        assert_eq!(catalog.default_category(), DEFAULT_CATEGORY);
    }

    #[test]
    fn test_try_load_reports_missing_file() {
        let err = CategoryCatalog::try_load(Path::new("/nonexistent/categories.txt")).unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
    }

    #[test]
    fn test_invalid_utf8_degrades_to_empty() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0x63, 0x2e, 0xff, 0xfe, 0x0a]).unwrap();
        assert!(CategoryCatalog::load(file.path()).is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let catalog = CategoryCatalog::load(file.path());
        assert_eq!(catalog.default_category(), "accommodation");
    }

    #[test]
    fn test_select() {
        let catalog = CategoryCatalog::parse(SAMPLE);
        assert_eq!(catalog.select("catering", None), "catering");
        assert_eq!(catalog.select("catering", Some("")), "catering");
        assert_eq!(catalog.select("catering", Some("catering.cafe")), "catering.cafe");
        assert_eq!(catalog.select("catering", Some("cafe")), "catering.cafe");
        assert_eq!(catalog.select("catering", Some("bakery")), "catering");
        assert_eq!(catalog.select("catering", Some("accommodation.hotel")), "catering");
    }
}
