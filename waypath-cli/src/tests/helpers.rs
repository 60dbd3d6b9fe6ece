//! Test helpers for writing network files into temporary workspaces.

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// A three-node network: `1 -> 2` (1200 m), `2 -> 3` (800 m) and a direct
/// `1 -> 3` (2500 m), all two-way.
pub(super) const SAMPLE_NETWORK: &str = r#"{
    "nodes": [
        { "id": 1, "lat": 55.9533, "lon": -3.1883 },
        { "id": 2, "lat": 55.9570, "lon": -3.1990 },
        { "id": 3, "lat": 55.9486, "lon": -3.2008 }
    ],
    "edges": [
        { "from": 1, "to": 2, "length": 1200.0, "bidirectional": true },
        { "from": 2, "to": 3, "length": 800.0, "bidirectional": true },
        { "from": 1, "to": 3, "length": 2500.0, "bidirectional": true }
    ]
}"#;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write test file");
}

pub(super) fn workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

pub(super) fn write_sample_network(root: &Utf8Path) -> Utf8PathBuf {
    let path = root.join("network.json");
    write_utf8(&path, SAMPLE_NETWORK.as_bytes());
    path
}
