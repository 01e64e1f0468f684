//! Dataset module for origami image handling
//!
//! This module provides:
//! - The fixed class label mapping for the six origami configurations
//! - Enumeration of a prediction folder in deterministic filename order
//!
//! Each class corresponds to a single quantum dot (1QD) bound to a growing
//! number of DNA origami tiles, imaged under fluorescence microscopy.

pub mod folder;

// Re-export main types for convenience
pub use folder::{ImageFile, PredictionFolder};

/// Total number of origami classes
pub const NUM_CLASSES: usize = 6;

/// Class names, indexed by model output position
///
/// Format: "1QD-<n>origami" where n is the origami tile count.
pub const CLASS_NAMES: [&str; 6] = [
    "1QD-1origami",
    "1QD-2origami",
    "1QD-3origami",
    "1QD-4origami",
    "1QD-5origami",
    "1QD-6origami",
];

/// Get the class name for a given label index
pub fn class_name(label: usize) -> Option<&'static str> {
    CLASS_NAMES.get(label).copied()
}

/// Get the label index for a given class name
pub fn class_index(name: &str) -> Option<usize> {
    CLASS_NAMES.iter().position(|&n| n == name)
}

/// Get the origami tile count for a class (e.g., 3 for "1QD-3origami")
pub fn origami_count(label: usize) -> Option<usize> {
    // Label indices are zero-based, tile counts start at one
    (label < NUM_CLASSES).then_some(label + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_name() {
        assert_eq!(class_name(0), Some("1QD-1origami"));
        assert_eq!(class_name(2), Some("1QD-3origami"));
        assert_eq!(class_name(5), Some("1QD-6origami"));
        assert_eq!(class_name(6), None);
    }

    #[test]
    fn test_class_index() {
        assert_eq!(class_index("1QD-1origami"), Some(0));
        assert_eq!(class_index("1QD-6origami"), Some(5));
        assert_eq!(class_index("2QD-1origami"), None);
    }

    #[test]
    fn test_origami_count() {
        assert_eq!(origami_count(0), Some(1));
        assert_eq!(origami_count(5), Some(6));
        assert_eq!(origami_count(6), None);
    }

    #[test]
    fn test_class_names_cover_all_indices() {
        assert_eq!(CLASS_NAMES.len(), NUM_CLASSES);
        for idx in 0..NUM_CLASSES {
            assert!(class_name(idx).is_some());
        }
    }
}
