//! Numbered output files (`output0.txt`, `output1.txt`, ...)

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::DecayError;

/// Smallest N such that `outputN.txt` does not exist in `dir`
///
/// Files whose middle part is not a decimal number (`output_old.txt`) are ignored.
pub fn next_output_number(dir: &Path) -> Result<usize, DecayError> {
    let mut used = HashSet::new();

    for entry in fs::read_dir(dir)? {
        let name = entry?.file_name();
        if let Some(number) = name
            .to_str()
            .and_then(|n| n.strip_prefix("output"))
            .and_then(|n| n.strip_suffix(".txt"))
            .filter(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
            .and_then(|n| n.parse::<usize>().ok())
        {
            used.insert(number);
        }
    }

    Ok((0..).find(|n| !used.contains(n)).unwrap_or(used.len()))
}

/// `dir/outputN.txt`
pub fn report_path(dir: &Path, number: usize) -> PathBuf {
    dir.join(format!("output{}.txt", number))
}

/// `dir/imageN.png`, the reference graph written next to report N
pub fn reference_image_path(dir: &Path, number: usize) -> PathBuf {
    dir.join(format!("image{}.png", number))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "").unwrap();
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        assert_eq!(next_output_number(dir.path()).unwrap(), 0);
    }

    #[test]
    fn test_first_gap_is_used() {
        let dir = TempDir::new().unwrap();
        for name in ["output0.txt", "output1.txt", "output3.txt"] {
            touch(dir.path(), name);
        }
        assert_eq!(next_output_number(dir.path()).unwrap(), 2);

        touch(dir.path(), "output2.txt");
        assert_eq!(next_output_number(dir.path()).unwrap(), 4);
    }

    #[test]
    fn test_unrelated_files_ignored() {
        let dir = TempDir::new().unwrap();
        for name in ["output.txt", "outputA.txt", "output0.csv", "image0.png", "output-1.txt"] {
            touch(dir.path(), name);
        }
        assert_eq!(next_output_number(dir.path()).unwrap(), 0);
    }

    #[test]
    fn test_paths() {
        let dir = Path::new("runs");
        assert_eq!(report_path(dir, 7), Path::new("runs/output7.txt"));
        assert_eq!(reference_image_path(dir, 7), Path::new("runs/image7.png"));
    }
}
