//! The snapshot-list file: one time-directory identifier per line.

use std::path::Path;

/// Read the list of time entries, one per line, in file order.
///
/// Lines are taken verbatim apart from a trailing carriage return; blank
/// lines are skipped (they cannot name a time directory).
pub fn read_time_entries(path: &Path) -> std::io::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_reads_entries_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("times.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "0.000\n0.005\n\n0.010\n").unwrap();

        let entries = read_time_entries(&path).unwrap();
        assert_eq!(entries, vec!["0.000", "0.005", "0.010"]);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_time_entries(&dir.path().join("absent.txt")).is_err());
    }
}
