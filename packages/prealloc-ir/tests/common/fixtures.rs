//! Test fixture helpers

use std::path::PathBuf;

/// `tests/testdata` of this package
pub fn testdata_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("testdata")
}

pub fn fixture_path(name: &str) -> PathBuf {
    testdata_dir().join(name)
}

pub fn load_fixture(name: &str) -> String {
    let path = fixture_path(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read fixture {}: {}", path.display(), e))
}

/// A file with one function `f` holding `body` (lines already indented)
pub fn fixture_func(params: &str, body: &[&str]) -> String {
    format!("package p\n\nfunc f({}) {{\n{}\n}}\n", params, body.join("\n"))
}
