//! Named level allow-list

/// Argument to `Logger::set_levels`
///
/// A list replaces the active levels wholesale; a single name is appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Levels {
    Replace(Vec<String>),
    Append(String),
}

impl From<Vec<String>> for Levels {
    fn from(levels: Vec<String>) -> Self {
        Levels::Replace(levels)
    }
}

impl From<Vec<&str>> for Levels {
    fn from(levels: Vec<&str>) -> Self {
        Levels::Replace(levels.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Levels {
    fn from(levels: &[&str]) -> Self {
        Levels::Replace(levels.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Levels {
    fn from(levels: [&str; N]) -> Self {
        Levels::Replace(levels.iter().map(|s| s.to_string()).collect())
    }
}

impl From<&str> for Levels {
    fn from(level: &str) -> Self {
        Levels::Append(level.to_string())
    }
}

impl From<String> for Levels {
    fn from(level: String) -> Self {
        Levels::Append(level)
    }
}

/// Ordered list of active level names; empty means unrestricted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelFilter {
    active: Vec<String>,
}

impl LevelFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, levels: Levels) {
        match levels {
            Levels::Replace(levels) => self.active = levels,
            Levels::Append(level) => self.active.push(level),
        }
    }

    /// Remove the first occurrence of `level`; returns whether one was found
    pub fn remove(&mut self, level: &str) -> bool {
        match self.active.iter().position(|l| l == level) {
            Some(idx) => {
                self.active.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Whether a call tagged with `level` may pass
    ///
    /// An untagged call always passes, even with a non-empty allow-list.
    /// An empty tag counts as untagged.
    pub fn allows(&self, level: Option<&str>) -> bool {
        match level {
            None | Some("") => true,
            Some(level) => self.active.iter().any(|l| l == level),
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.active
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
