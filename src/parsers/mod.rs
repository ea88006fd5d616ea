//! Source code parsers using tree-sitter
//!
//! Go is the only language gocheck analyzes; this module keeps the file
//! type checks next to the parser so discovery and parsing agree.

pub mod go;

use std::path::Path;

/// Get all supported file extensions
pub fn supported_extensions() -> &'static [&'static str] {
    &["go"]
}

/// Whether `path` names a file the parser accepts
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| supported_extensions().contains(&ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_supported() {
        assert!(is_supported(Path::new("pkg/server.go")));
        assert!(is_supported(Path::new("server_test.go")));
        assert!(!is_supported(Path::new("README.md")));
        assert!(!is_supported(Path::new("go")));
        assert!(!is_supported(Path::new("main.GO")));
    }
}
