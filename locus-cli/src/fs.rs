//! Capability-based file access for request inputs.

use std::io;

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};

/// Open a UTF-8 file path using ambient authority.
pub(crate) fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Return whether `path` names a regular file.
///
/// The parent directory is opened as a capability and the entry inspected
/// through it; a missing entry surfaces as [`io::ErrorKind::NotFound`].
pub(crate) fn is_regular_file(path: &Utf8Path) -> io::Result<bool> {
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.metadata(name).map(|meta| meta.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use rstest::rstest;
    use tempfile::TempDir;

    fn workspace() -> (TempDir, Utf8PathBuf) {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
        (tmp, root)
    }

    #[rstest]
    fn regular_file_is_detected() {
        let (_tmp, root) = workspace();
        let path = root.join("request.json");
        std::fs::write(&path, b"{}").expect("write file");
        assert!(is_regular_file(&path).expect("inspect file"));
    }

    #[rstest]
    fn directory_is_not_a_regular_file() {
        let (_tmp, root) = workspace();
        let path = root.join("nested");
        std::fs::create_dir(&path).expect("create dir");
        assert!(!is_regular_file(&path).expect("inspect dir"));
    }

    #[rstest]
    fn missing_entry_reports_not_found() {
        let (_tmp, root) = workspace();
        let err = is_regular_file(&root.join("absent.json")).expect_err("missing entry");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[rstest]
    fn open_reads_contents() {
        let (_tmp, root) = workspace();
        let path = root.join("request.json");
        std::fs::write(&path, b"{\"city\": \"Paris\"}").expect("write file");
        let mut contents = String::new();
        io::Read::read_to_string(&mut open_utf8_file(&path).expect("open file"), &mut contents)
            .expect("read file");
        assert_eq!(contents, "{\"city\": \"Paris\"}");
    }
}
