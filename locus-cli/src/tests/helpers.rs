//! Test helpers for staging request files in temporary workspaces.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::json;
use tempfile::TempDir;

/// Create a temporary directory addressed by a UTF-8 path.
pub(super) fn utf8_workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

/// Write `contents` to `path`, panicking on failure.
pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).unwrap_or_else(|err| panic!("write {path}: {err}"));
}

/// A well-formed request in the shape clients send, numbers as strings
/// included.
pub(super) fn request_payload() -> serde_json::Value {
    json!({
        "current_location": "52.51,13.37",
        "city": "Berlin",
        "country": "Germany",
        "best_location_type": "library",
        "time_preference": 1,
        "rating_preference": "1",
        "min_rating": "4.0",
        "amenities": "cafe, gym"
    })
}
