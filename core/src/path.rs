use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("empty line")]
    Empty,
    #[error("comment line")]
    Comment,
    #[error("path starts with a parent directory")]
    ParentTraversal,
}

pub const fn is_separator(b: u8) -> bool {
    matches!(b, b'/' | b'\\')
}

fn is_separator_char(c: char) -> bool {
    matches!(c, '/' | '\\')
}

/// Splits on both separators, dropping the empty segments of repeated separators
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(is_separator_char).filter(|s| !s.is_empty())
}

/// A path line with any drive or root prefix removed
///
/// Never starts with `..`. Either separator is accepted regardless of platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedPath<'a> {
    path: &'a str,
    file_start: usize,
}

impl<'a> NormalizedPath<'a> {
    pub fn new(line: &'a str) -> Result<Self, PathError> {
        let bytes = line.as_bytes();
        if bytes.first() == Some(&b'#') {
            return Err(PathError::Comment);
        }
        let start = match bytes {
            [_, b':', sep, ..] if is_separator(*sep) => 3,
            [sep, ..] if is_separator(*sep) => 1,
            _ => 0,
        };
        let path = &line[start..];
        if path.is_empty() {
            return Err(PathError::Empty);
        }
        if path.starts_with("..") {
            return Err(PathError::ParentTraversal);
        }
        let file_start = path.rfind(is_separator_char).map_or(0, |i| i + 1);
        Ok(Self { path, file_start })
    }

    pub fn as_str(&self) -> &'a str {
        self.path
    }

    /// Everything up to and including the last separator
    pub fn directory(&self) -> Option<&'a str> {
        (self.file_start > 0).then(|| &self.path[..self.file_start])
    }

    pub fn file_name(&self) -> &'a str {
        &self.path[self.file_start..]
    }

    /// Lines ending in a separator name a directory and get no stub
    pub fn is_directory_only(&self) -> bool {
        self.file_name().is_empty()
    }

    /// Rebuilds the path under `root` using the native separator
    pub fn resolve(&self, root: &Path) -> PathBuf {
        let mut resolved = root.to_path_buf();
        resolved.extend(segments(self.path));
        resolved
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use quickcheck::TestResult;

    use super::{NormalizedPath, PathError, segments};

    fn normalize(line: &str) -> Result<&str, PathError> {
        NormalizedPath::new(line).map(|p| p.as_str())
    }

    #[test]
    fn strips_drive_prefix() {
        assert_eq!(normalize("C:\\foo\\bar.c"), Ok("foo\\bar.c"));
        assert_eq!(normalize("d:/foo/bar.c"), Ok("foo/bar.c"));
    }

    #[test]
    fn strips_leading_separator() {
        assert_eq!(normalize("/src/module.asm"), Ok("src/module.asm"));
        assert_eq!(normalize("\\src\\module.asm"), Ok("src\\module.asm"));
        // only the first one goes
        assert_eq!(normalize("//src/a.c"), Ok("/src/a.c"));
    }

    #[test]
    fn drive_without_separator_is_kept() {
        assert_eq!(normalize("C:foo.c"), Ok("C:foo.c"));
    }

    #[test]
    fn rejects_parent_traversal() {
        assert_eq!(normalize("../etc/passwd"), Err(PathError::ParentTraversal));
        assert_eq!(normalize("/../etc"), Err(PathError::ParentTraversal));
        assert_eq!(normalize("C:\\..\\x"), Err(PathError::ParentTraversal));
        assert_eq!(normalize("..hidden"), Err(PathError::ParentTraversal));
        assert_eq!(normalize("a/../b.c"), Ok("a/../b.c"));
    }

    #[test]
    fn rejects_empty_and_comments() {
        assert_eq!(normalize(""), Err(PathError::Empty));
        assert_eq!(normalize("/"), Err(PathError::Empty));
        assert_eq!(normalize("C:\\"), Err(PathError::Empty));
        assert_eq!(normalize("# generated listing"), Err(PathError::Comment));
    }

    #[test]
    fn directory_portion() {
        let p = NormalizedPath::new("C:\\foo\\bar/baz.c").unwrap();
        assert_eq!(p.directory(), Some("foo\\bar/"));
        assert_eq!(p.file_name(), "baz.c");

        let p = NormalizedPath::new("notes.txt").unwrap();
        assert_eq!(p.directory(), None);
        assert_eq!(p.file_name(), "notes.txt");
        assert!(!p.is_directory_only());

        let p = NormalizedPath::new("a/b/").unwrap();
        assert_eq!(p.directory(), Some("a/b/"));
        assert!(p.is_directory_only());
    }

    #[test]
    fn resolve_uses_native_separators() {
        let p = NormalizedPath::new("C:\\foo\\\\bar.c").unwrap();
        assert_eq!(p.resolve(Path::new("out")), Path::new("out").join("foo").join("bar.c"));
    }

    #[test]
    fn segments_skip_repeated_separators() {
        assert_eq!(
            segments("a//b\\\\c/").collect::<Vec<_>>(),
            vec!["a", "b", "c"]
        );
    }

    #[expect(clippy::needless_pass_by_value)]
    #[quickcheck_macros::quickcheck]
    fn never_starts_with_prefix(line: String) -> TestResult {
        match NormalizedPath::new(&line) {
            Ok(p) => TestResult::from_bool(
                !p.as_str().starts_with("..") && line.ends_with(p.as_str()),
            ),
            Err(_) => TestResult::discard(),
        }
    }
}
