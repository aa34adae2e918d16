use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use spdlog::{debug, info, warn};

/// Probes an ordered list of candidate directories and picks the first one
/// that exists and actually contains markdown files. The environment
/// override is consulted first; the fallback list comes from configuration,
/// never from hard-coded deployment paths.
pub struct DirectoryResolver {
    env_var: String,
    candidates: Vec<PathBuf>,
}

pub struct ResolvedDir {
    pub path: PathBuf,
    pub files: Vec<PathBuf>,
}

impl DirectoryResolver {
    pub fn new(env_var: impl Into<String>, candidates: Vec<PathBuf>) -> DirectoryResolver {
        DirectoryResolver {
            env_var: env_var.into(),
            candidates,
        }
    }

    /// Returns the selected directory and its markdown files, or None when
    /// no candidate is usable. Callers must treat None as a renderable
    /// "no content" state, not as a failure.
    pub fn resolve(&self) -> Option<ResolvedDir> {
        for dir in self.candidate_paths() {
            match Self::markdown_files(&dir) {
                Ok(files) if !files.is_empty() => {
                    info!("Using {} posts from {}", files.len(), dir.display());
                    return Some(ResolvedDir { path: dir, files });
                }
                Ok(_) => {
                    debug!("Candidate {} has no markdown files", dir.display());
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    debug!("Candidate {} does not exist", dir.display());
                }
                Err(e) => {
                    warn!("Skipping candidate {}: {}", dir.display(), e);
                }
            }
        }

        warn!("No posts directory found among candidates");
        None
    }

    fn candidate_paths(&self) -> Vec<PathBuf> {
        let override_dir = env::var(&self.env_var)
            .ok()
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        override_dir
            .into_iter()
            .chain(self.candidates.iter().cloned())
            .collect()
    }

    fn markdown_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut files = vec![];
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if file_name.ends_with(".md") || file_name.ends_with(".markdown") {
                files.push(entry.path());
            }
        }
        // Deterministic enumeration order keeps date ties stable
        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::Write;

    use super::*;

    fn touch(dir: &Path, name: &str) {
        let mut file = File::create(dir.join(name)).unwrap();
        file.write_all(b"# hi\n").unwrap();
    }

    #[test]
    fn test_picks_first_candidate_with_markdown() {
        let empty = tempfile::tempdir().unwrap();
        let full = tempfile::tempdir().unwrap();
        touch(full.path(), "a.md");
        touch(full.path(), "b.markdown");
        touch(full.path(), "notes.txt");

        let resolver = DirectoryResolver::new(
            "POSTMILL_TEST_UNSET",
            vec![
                PathBuf::from("/does/not/exist"),
                empty.path().to_path_buf(),
                full.path().to_path_buf(),
            ],
        );

        let resolved = resolver.resolve().unwrap();
        assert_eq!(resolved.path, full.path());
        let names: Vec<String> = resolved
            .files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["a.md", "b.markdown"]);
    }

    #[test]
    fn test_no_usable_candidate() {
        let empty = tempfile::tempdir().unwrap();
        let resolver = DirectoryResolver::new(
            "POSTMILL_TEST_UNSET",
            vec![PathBuf::from("/does/not/exist"), empty.path().to_path_buf()],
        );
        assert!(resolver.resolve().is_none());
    }

    #[test]
    fn test_env_override_wins() {
        let fallback = tempfile::tempdir().unwrap();
        touch(fallback.path(), "fallback.md");
        let preferred = tempfile::tempdir().unwrap();
        touch(preferred.path(), "preferred.md");

        // Var name unique to this test to avoid cross-test interference
        env::set_var("POSTMILL_TEST_OVERRIDE_DIR", preferred.path());
        let resolver = DirectoryResolver::new(
            "POSTMILL_TEST_OVERRIDE_DIR",
            vec![fallback.path().to_path_buf()],
        );
        let resolved = resolver.resolve().unwrap();
        env::remove_var("POSTMILL_TEST_OVERRIDE_DIR");

        assert_eq!(resolved.path, preferred.path());
    }
}
