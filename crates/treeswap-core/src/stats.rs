use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchStats {
    pub content_matches: BTreeMap<String, usize>,
    pub dir_name_matches: BTreeMap<String, usize>,
    pub file_name_matches: BTreeMap<String, usize>,
    pub files_seen: BTreeMap<String, usize>,
    pub files_modified: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchLocation {
    DirectoryName,
    FileName,
    Content,
}

impl std::fmt::Display for MatchLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchLocation::DirectoryName => write!(f, "directory name"),
            MatchLocation::FileName => write!(f, "file name"),
            MatchLocation::Content => write!(f, "file contents"),
        }
    }
}

impl MatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_matches(&mut self, location: MatchLocation, pattern: &str, count: usize) {
        let counter = match location {
            MatchLocation::DirectoryName => &mut self.dir_name_matches,
            MatchLocation::FileName => &mut self.file_name_matches,
            MatchLocation::Content => &mut self.content_matches,
        };
        increment(counter, pattern, count);
    }

    pub fn record_file_seen(&mut self, path: &Path) {
        increment(&mut self.files_seen, &extension_key(path), 1);
    }

    pub fn record_file_modified(&mut self, path: &Path) {
        increment(&mut self.files_modified, &extension_key(path), 1);
    }

    pub fn merge(&mut self, other: MatchStats) {
        let pairs = [
            (&mut self.content_matches, other.content_matches),
            (&mut self.dir_name_matches, other.dir_name_matches),
            (&mut self.file_name_matches, other.file_name_matches),
            (&mut self.files_seen, other.files_seen),
            (&mut self.files_modified, other.files_modified),
        ];
        for (counter, incoming) in pairs {
            for (key, count) in incoming {
                *counter.entry(key).or_insert(0) += count;
            }
        }
    }

    pub fn matches(&self, location: MatchLocation) -> &BTreeMap<String, usize> {
        match location {
            MatchLocation::DirectoryName => &self.dir_name_matches,
            MatchLocation::FileName => &self.file_name_matches,
            MatchLocation::Content => &self.content_matches,
        }
    }

    pub fn total_matches(&self, location: MatchLocation) -> usize {
        self.matches(location).values().sum()
    }

    pub fn total_files_seen(&self) -> usize {
        self.files_seen.values().sum()
    }

    pub fn total_files_modified(&self) -> usize {
        self.files_modified.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.content_matches.is_empty()
            && self.dir_name_matches.is_empty()
            && self.file_name_matches.is_empty()
    }
}

fn increment(counter: &mut BTreeMap<String, usize>, key: &str, by: usize) {
    *counter.entry(key.to_string()).or_insert(0) += by;
}

/// Suffix from the last `.` of the file name: `.txt` for `notes.txt`, `.gitignore`
/// for `.gitignore`, empty for `Makefile` and for names ending in `.`.
pub fn extension_key(path: &Path) -> String {
    let Some(name) = path.file_name() else {
        return String::new();
    };
    let name = name.to_string_lossy();
    match name.rfind('.') {
        Some(dot) if dot + 1 < name.len() => name[dot..].to_string(),
        _ => String::new(),
    }
}
