use crate::{Result, SweepError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindReplacePairs {
    pairs: Vec<(String, String)>,
}

impl FindReplacePairs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_flat<S: AsRef<str>>(values: &[S]) -> Result<Self> {
        if values.len() % 2 != 0 {
            return Err(SweepError::Configuration {
                message: format!(
                    "replace values must come in find/replace pairs, got {} value(s)",
                    values.len()
                ),
            });
        }

        let mut pairs = Self::new();
        for pair in values.chunks(2) {
            pairs.push(pair[0].as_ref(), pair[1].as_ref())?;
        }

        Ok(pairs)
    }

    pub fn push(&mut self, find: impl Into<String>, replace: impl Into<String>) -> Result<()> {
        let find = find.into();
        if self.pairs.iter().any(|(existing, _)| *existing == find) {
            return Err(SweepError::Configuration {
                message: format!("find pattern '{}' is given more than once", find),
            });
        }
        self.pairs.push((find, replace.into()));
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(f, r)| (f.as_str(), r.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Fully resolved run configuration. The core never fills in defaults for
/// `includes`; callers are expected to pass `*` when everything should match.
#[derive(Debug, Clone)]
pub struct ReplaceConfig {
    pub pairs: FindReplacePairs,
    pub includes: Vec<String>,
    pub excludes: Vec<String>,
    pub recursive: bool,
    pub dry_run: bool,
    pub verbose: bool,
    pub binary: bool,
    pub use_git_move: bool,
}

impl ReplaceConfig {
    pub fn new(pairs: FindReplacePairs) -> Self {
        Self {
            pairs,
            includes: Vec::new(),
            excludes: Vec::new(),
            recursive: true,
            dry_run: false,
            verbose: false,
            binary: false,
            use_git_move: false,
        }
    }
}
