use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::domain::substitution::Substituter;

/// The files rewritten by a bootstrap run, relative to the template root.
///
/// Sorted and free of duplicates; never contains the entry point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    files: Vec<PathBuf>,
}

impl FileSet {
    pub fn assemble(
        discovered: impl IntoIterator<Item = PathBuf>,
        extra: &[PathBuf],
        entry_point: &Path,
    ) -> Self {
        let files: BTreeSet<PathBuf> = discovered
            .into_iter()
            .chain(extra.iter().cloned())
            .filter(|p| p != entry_point)
            .collect();
        Self {
            files: files.into_iter().collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Where a rewritten file moves to when its stem is a placeholder.
///
/// `pkg/pythontemplate.py` with `pythontemplate -> myproj` becomes
/// `pkg/myproj.py`. The extension is kept.
pub fn rename_target(path: &Path, substituter: &Substituter) -> Option<PathBuf> {
    let stem = path.file_stem()?.to_str()?;
    let replacement = substituter.lookup(stem)?;
    let file_name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{replacement}.{ext}"),
        None => replacement.to_owned(),
    };
    Some(path.with_file_name(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::substitution::SubstitutionTable;

    fn paths(items: &[&str]) -> Vec<PathBuf> {
        items.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn assemble_sorts_dedups_and_drops_entry_point() {
        let set = FileSet::assemble(
            paths(&["b.py", "a.py", "primer.toml", "a.py"]),
            &paths(&["pyproject.toml", "b.py"]),
            Path::new("primer.toml"),
        );
        let got: Vec<_> = set.iter().map(Path::to_path_buf).collect();
        assert_eq!(got, paths(&["a.py", "b.py", "pyproject.toml"]));
    }

    #[test]
    fn rename_target_keeps_directory_and_extension() {
        let mut table = SubstitutionTable::new();
        table.insert("pythontemplate", "myproj").unwrap();
        let s = Substituter::new(table).unwrap();

        assert_eq!(
            rename_target(Path::new("pkg/pythontemplate.py"), &s),
            Some(PathBuf::from("pkg/myproj.py"))
        );
        assert_eq!(rename_target(Path::new("pkg/main.py"), &s), None);
        assert_eq!(
            rename_target(Path::new("pythontemplate"), &s),
            Some(PathBuf::from("myproj"))
        );
    }
}
