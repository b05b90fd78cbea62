use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ignore::WalkBuilder;

use crate::bank::CardBank;

/// A discovered study set: one CSV file of term/definition rows, named after
/// its file stem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudySet {
    pub name: String,
    pub path: PathBuf,
}

fn is_study_set_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

fn set_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Walks the given files and directories and returns every study set found,
/// sorted by name.
pub fn find_sets(paths: &[PathBuf]) -> Result<Vec<StudySet>> {
    let mut iter = paths.iter();
    let Some(first) = iter.next() else {
        return Ok(Vec::new());
    };
    let mut builder = WalkBuilder::new(first);
    for path in iter {
        builder.add(path);
    }
    builder.hidden(false).git_ignore(true).git_exclude(true);

    let mut sets = Vec::new();
    for entry in builder.build() {
        let entry = entry?;
        if !entry.file_type().map(|ft| ft.is_file()).unwrap_or(false) {
            continue;
        }
        let path = entry.path();
        if !is_study_set_file(path) {
            continue;
        }
        sets.push(StudySet {
            name: set_name(path),
            path: path.to_path_buf(),
        });
    }

    sets.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(sets)
}

/// Reads the usable rows of a study set file. A leading `Term,Definition`
/// header row is skipped, rows with a blank term or definition are dropped,
/// and columns past the second are ignored.
pub fn load_rows(path: &Path) -> Result<Vec<(String, String)>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open study set {}", path.display()))?;

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record =
            record.with_context(|| format!("Failed to read study set {}", path.display()))?;
        let term = record.get(0).map(str::trim).unwrap_or("");
        let definition = record.get(1).map(str::trim).unwrap_or("");

        if idx == 0
            && term.eq_ignore_ascii_case("term")
            && definition.eq_ignore_ascii_case("definition")
        {
            continue;
        }
        if term.is_empty() || definition.is_empty() {
            continue;
        }
        rows.push((term.to_string(), definition.to_string()));
    }

    Ok(rows)
}

/// Loads a study set file straight into a validated bank.
pub fn load_bank(set: &StudySet) -> Result<CardBank> {
    let rows = load_rows(&set.path)?;
    CardBank::load(rows)
        .with_context(|| format!("Study set '{}' cannot be drilled", set.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn loads_rows_dropping_header_and_blanks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("section_c.csv");
        fs::write(
            &path,
            "Term,Definition\n\
             Reinforcement,A consequence that strengthens behavior\n\
             ,missing term\n\
             Punishment,\n\
             Extinction,Withholding reinforcement for a response\n",
        )
        .unwrap();

        let rows = load_rows(&path).unwrap();
        assert_eq!(
            rows,
            vec![
                (
                    "Reinforcement".to_string(),
                    "A consequence that strengthens behavior".to_string()
                ),
                (
                    "Extinction".to_string(),
                    "Withholding reinforcement for a response".to_string()
                ),
            ]
        );
    }

    #[test]
    fn headerless_files_keep_their_first_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("set.csv");
        fs::write(&path, "Shaping,Reinforcing successive approximations\nChaining,Linking responses\n").unwrap();

        let rows = load_rows(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0, "Shaping");
    }

    #[test]
    fn find_sets_walks_directories_and_sorts_by_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("section_d.csv"), "A,x\nB,y\n").unwrap();
        fs::write(dir.path().join("nested/section_c.csv"), "A,x\nB,y\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "not a set").unwrap();

        let sets = find_sets(&[dir.path().to_path_buf()]).unwrap();
        let names: Vec<&str> = sets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["section_c", "section_d"]);
    }

    #[test]
    fn find_sets_accepts_a_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("only.csv");
        fs::write(&path, "A,x\nB,y\n").unwrap();

        let sets = find_sets(&[path.clone()]).unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].name, "only");
        assert_eq!(sets[0].path, path);
    }

    #[test]
    fn no_paths_means_no_sets() {
        assert!(find_sets(&[]).unwrap().is_empty());
    }

    #[test]
    fn load_bank_rejects_degenerate_sets() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.csv");
        fs::write(&path, "Term,Definition\nShaping,Reinforcing approximations\n").unwrap();

        let set = StudySet {
            name: "tiny".into(),
            path,
        };
        assert!(load_bank(&set).is_err());
    }
}
