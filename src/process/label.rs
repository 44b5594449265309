//! Node label formatting.

use once_cell::sync::Lazy;
use regex::Regex;

// Windows directory prefix ("C:\WINDOWS\System32\") and ".exe" suffix
static DIR_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[a-z]:\\(?:[^\\]*\\)*").expect("valid regex"));
static EXE_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\.exe$").expect("valid regex"));

/// Strips the directory prefix and `.exe` suffix from an image name.
pub fn clean_label(name: &str) -> String {
    let without_dir = DIR_PREFIX.replace(name, "");
    EXE_SUFFIX.replace(&without_dir, "").into_owned()
}

/// Two-line node label: cleaned name above the PID.
pub fn node_label(name: &str, pid: u32) -> (String, String) {
    (clean_label(name), format!("(PID: {})", pid))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_label() {
        assert_eq!(clean_label("chrome.exe"), "chrome");
        assert_eq!(clean_label("EXPLORER.EXE"), "EXPLORER");
        assert_eq!(clean_label(r"C:\WINDOWS\System32\smss.exe"), "smss");
        assert_eq!(clean_label("System"), "System");
        assert_eq!(clean_label("PID 42"), "PID 42");
        // Only a trailing suffix is removed
        assert_eq!(clean_label("my.exe.tool"), "my.exe.tool");
    }

    #[test]
    fn test_node_label() {
        let (name, pid) = node_label("code.exe", 1234);
        assert_eq!(name, "code");
        assert_eq!(pid, "(PID: 1234)");
    }
}
