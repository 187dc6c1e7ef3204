use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Metadata file written upstream for each bill
pub const DATA_JSON_FILE: &str = "data.json";

/// Bill text file under `text-versions/<version>/`
pub const DOCUMENT_XML_FILE: &str = "document.xml";

/// Scanner for finding bill files under a congress data directory
pub struct DataFileScanner {
    root: PathBuf,
}

impl DataFileScanner {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Every `data.json` under the root, sorted
    pub fn scan_data_json(&self) -> Vec<PathBuf> {
        let files = self.scan_named(DATA_JSON_FILE);
        log::info!("Found {} {DATA_JSON_FILE} files", files.len());
        files
    }

    /// Every `document.xml` under the root, sorted
    pub fn scan_documents(&self) -> Vec<PathBuf> {
        let files = self.scan_named(DOCUMENT_XML_FILE);
        log::info!("Found {} {DOCUMENT_XML_FILE} files", files.len());
        files
    }

    /// Every regular file called `file_name` under the root, sorted
    pub fn scan_named(&self, file_name: &str) -> Vec<PathBuf> {
        let mut files = Vec::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !Self::is_hidden_dir(entry));

        for result in walker {
            match result {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        continue;
                    }
                    if entry.file_name().to_str() == Some(file_name) {
                        files.push(entry.into_path());
                    }
                }
                Err(e) => log::warn!("Failed to read entry: {e}"),
            }
        }

        files.sort();
        files
    }

    // .git, .cache and the like never hold bill data
    fn is_hidden_dir(entry: &DirEntry) -> bool {
        entry.file_type().is_dir() && entry.file_name().to_string_lossy().starts_with('.')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn finds_data_json_sorted() {
        let temp = tempdir().unwrap();
        for bill in ["hr2", "hr10", "hr1"] {
            let dir = temp.path().join("116/bills/hr").join(bill);
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("data.json"), b"{}").unwrap();
            fs::write(dir.join("data.xml"), b"<bill/>").unwrap();
        }

        let files = DataFileScanner::new(temp.path()).scan_data_json();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.parent().unwrap().file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["hr1", "hr10", "hr2"]);
    }

    #[test]
    fn skips_hidden_directories() {
        let temp = tempdir().unwrap();
        let hidden = temp.path().join(".git/116/bills/hr/hr1");
        let ih = temp.path().join("116/bills/hr/hr1/text-versions/ih");
        let rh = temp.path().join("116/bills/hr/hr1/text-versions/rh");
        for dir in [&hidden, &ih, &rh] {
            fs::create_dir_all(dir).unwrap();
            fs::write(dir.join("document.xml"), b"<bill/>").unwrap();
        }

        let files = DataFileScanner::new(temp.path()).scan_documents();
        assert_eq!(files, vec![ih.join("document.xml"), rh.join("document.xml")]);
    }
}
