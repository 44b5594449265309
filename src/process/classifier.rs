//! Process importance classification.
//!
//! Names are matched exactly and case-insensitively against two lists: user
//! facing applications ("important") and OS bootstrap processes ("root").
//! The built-in lists are embedded from `data/processes.toml`; configuration
//! may add names but never removes built-in ones.

use ahash::AHashSet as HashSet;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::fmt;

/// Importance class of a process name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Importance {
    VeryImportant,
    RootEssential,
    Excluded,
}

impl Importance {
    /// Whether processes of this class belong in the graph.
    pub fn is_included(self) -> bool {
        !matches!(self, Importance::Excluded)
    }
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Importance::VeryImportant => "important",
            Importance::RootEssential => "root",
            Importance::Excluded => "excluded",
        };
        f.write_str(s)
    }
}

#[derive(Deserialize)]
struct NameList {
    names: Vec<String>,
}

/// Layout of the embedded lists file.
#[derive(Deserialize)]
struct ProcessListsFile {
    important: NameList,
    root: NameList,
}

/// Built-in name lists in file order, as written in `data/processes.toml`.
#[derive(Debug, Clone)]
pub struct ProcessLists {
    pub important: Vec<String>,
    pub root: Vec<String>,
}

/// Helper: parse the lists file. Names are stored lower-cased.
fn load_lists_from_str(content: &str) -> Result<ProcessLists, toml::de::Error> {
    let parsed: ProcessListsFile = toml::from_str(content)?;
    let lower = |v: Vec<String>| v.into_iter().map(|n| n.to_lowercase()).collect();
    Ok(ProcessLists {
        important: lower(parsed.important.names),
        root: lower(parsed.root.names),
    })
}

/// Built-in lists embedded at compile time.
pub static BUILTIN_LISTS: Lazy<ProcessLists> = Lazy::new(|| {
    let content = include_str!("../../data/processes.toml");
    match load_lists_from_str(content) {
        Ok(lists) => lists,
        Err(e) => {
            eprintln!("Failed to parse built-in process lists: {}", e);
            ProcessLists {
                important: Vec::new(),
                root: Vec::new(),
            }
        }
    }
});

/// Classifier over the built-in lists plus any configured additions.
#[derive(Debug, Clone)]
pub struct Classifier {
    important: HashSet<String>,
    root: HashSet<String>,
    extra_important: Vec<String>,
    extra_root: Vec<String>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Classifier {
    /// Classifier over the built-in lists only.
    pub fn builtin() -> Self {
        Self {
            important: BUILTIN_LISTS.important.iter().cloned().collect(),
            root: BUILTIN_LISTS.root.iter().cloned().collect(),
            extra_important: Vec::new(),
            extra_root: Vec::new(),
        }
    }

    /// Built-in lists extended with configured names.
    pub fn with_extra(extra_important: &[String], extra_root: &[String]) -> Self {
        let mut classifier = Self::builtin();
        for name in extra_important {
            let key = name.trim().to_lowercase();
            if !key.is_empty() && classifier.important.insert(key.clone()) {
                classifier.extra_important.push(key);
            }
        }
        for name in extra_root {
            let key = name.trim().to_lowercase();
            if !key.is_empty() && classifier.root.insert(key.clone()) {
                classifier.extra_root.push(key);
            }
        }
        classifier
    }

    /// Classifies a process name. Absent and empty names are excluded.
    ///
    /// A name on both lists counts as very important.
    pub fn classify(&self, name: Option<&str>) -> Importance {
        let name = match name {
            Some(n) if !n.is_empty() => n.to_lowercase(),
            _ => return Importance::Excluded,
        };
        if self.important.contains(&name) {
            Importance::VeryImportant
        } else if self.root.contains(&name) {
            Importance::RootEssential
        } else {
            Importance::Excluded
        }
    }

    pub fn is_very_important(&self, name: Option<&str>) -> bool {
        self.classify(name) == Importance::VeryImportant
    }

    pub fn is_root_process(&self, name: Option<&str>) -> bool {
        self.classify(name) == Importance::RootEssential
    }

    /// Whether a process with this name belongs in the graph.
    pub fn should_include(&self, name: Option<&str>) -> bool {
        self.classify(name).is_included()
    }

    /// Names added through configuration, per class.
    pub fn extra_names(&self, class: Importance) -> &[String] {
        match class {
            Importance::VeryImportant => &self.extra_important,
            Importance::RootEssential => &self.extra_root,
            Importance::Excluded => &[],
        }
    }

    /// All names of a class: built-in ones in file order, then additions.
    pub fn names(&self, class: Importance) -> Vec<&str> {
        let builtin = match class {
            Importance::VeryImportant => &BUILTIN_LISTS.important,
            Importance::RootEssential => &BUILTIN_LISTS.root,
            Importance::Excluded => return Vec::new(),
        };
        builtin
            .iter()
            .chain(self.extra_names(class))
            .map(String::as_str)
            .collect()
    }
}
