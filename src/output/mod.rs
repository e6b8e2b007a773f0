//! Cheatsheet document assembly and file output.

use crate::error::{CheatsheetError, Result};
use regex::Regex;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, info};

/// Render the cheatsheet markdown.
///
/// Sections always appear as summary, takeaways, then metadata; absent sections are skipped.
pub fn render(
    title: &str,
    metadata: Option<&str>,
    takeaways: Option<&str>,
    summary: Option<&str>,
) -> String {
    let mut document = format!("# {}\n\n", title);

    if let Some(summary) = summary {
        document.push_str(summary);
        document.push_str("\n---\n");
    }
    if let Some(takeaways) = takeaways {
        document.push_str(takeaways);
        document.push_str("\n---\n");
    }
    if let Some(metadata) = metadata {
        document.push_str(metadata);
    }

    document
}

/// Lower-cased, hyphen-separated rendering of a title, safe to use as a file name.
///
/// Letters and digits from any script are kept; every other run becomes one `-`.
pub fn slugify(title: &str) -> String {
    static NON_ALNUM: OnceLock<Regex> = OnceLock::new();
    let re = NON_ALNUM
        .get_or_init(|| Regex::new(r"[^\p{Alphabetic}\p{N}]+").expect("valid regex"));

    let lowered = title.to_lowercase();
    let slug = re.replace_all(&lowered, "-");
    let slug = slug.trim_matches('-');

    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug.to_string()
    }
}

/// Write `content` to `<dir>/<slug>.md` and return the path.
///
/// Never overwrites: the destination is checked first and the file is opened
/// create-new, so an existing file is left untouched.
pub fn write_document(title: &str, content: &str, dir: &Path) -> Result<PathBuf> {
    if !dir.is_dir() {
        return Err(CheatsheetError::DirectoryInvalid(dir.to_path_buf()));
    }

    let path = dir.join(format!("{}.md", slugify(title)));
    if path.exists() {
        return Err(CheatsheetError::FileExists(path));
    }

    debug!("Writing document to {}", path.display());
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::AlreadyExists => CheatsheetError::FileExists(path.clone()),
            _ => CheatsheetError::Io(e),
        })?;
    file.write_all(content.as_bytes())?;

    info!("Wrote {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_render_title_only() {
        assert_eq!(render("My Talk", None, None, None), "# My Talk\n\n");
    }

    #[test]
    fn test_render_section_order() {
        assert_eq!(
            render("t", Some("m"), Some("k"), Some("s")),
            "# t\n\ns\n---\nk\n---\nm"
        );
        assert_eq!(render("t", Some("m"), None, Some("s")), "# t\n\ns\n---\nm");
        assert_eq!(render("t", None, Some("k"), None), "# t\n\nk\n---\n");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Rust in 100 Seconds"), "rust-in-100-seconds");
        assert_eq!(slugify("  What's new?! (2024)  "), "what-s-new-2024");
        assert_eq!(slugify("---"), "untitled");
    }

    #[test]
    fn test_slugify_keeps_non_latin_letters() {
        assert_eq!(slugify("Café Olé"), "café-olé");
        assert_eq!(slugify("日本語の動画"), "日本語の動画");
        assert_eq!(slugify("Привет, Мир!"), "привет-мир");
    }

    #[test]
    fn test_write_distinct_non_latin_titles() {
        let dir = TempDir::new().unwrap();

        let first = write_document("日本語の動画", "ja", dir.path()).unwrap();
        let second = write_document("Привет мир", "ru", dir.path()).unwrap();

        assert_ne!(first, second);
        assert_eq!(std::fs::read_to_string(first).unwrap(), "ja");
        assert_eq!(std::fs::read_to_string(second).unwrap(), "ru");
    }

    #[test]
    fn test_write_document() {
        let dir = TempDir::new().unwrap();

        let path = write_document("Hello World", "# Hello World\n\n", dir.path()).unwrap();
        assert_eq!(path, dir.path().join("hello-world.md"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Hello World\n\n");
    }

    #[test]
    fn test_write_twice_fails_and_keeps_first() {
        let dir = TempDir::new().unwrap();

        write_document("Same Title", "first", dir.path()).unwrap();
        let err = write_document("Same Title", "second", dir.path()).unwrap_err();

        assert!(matches!(err, CheatsheetError::FileExists(_)));
        let content = std::fs::read_to_string(dir.path().join("same-title.md")).unwrap();
        assert_eq!(content, "first");
    }

    #[test]
    fn test_write_invalid_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        let err = write_document("t", "c", &missing).unwrap_err();
        assert!(matches!(err, CheatsheetError::DirectoryInvalid(_)));

        let file = dir.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();
        let err = write_document("t", "c", &file).unwrap_err();
        assert!(matches!(err, CheatsheetError::DirectoryInvalid(_)));
    }
}
