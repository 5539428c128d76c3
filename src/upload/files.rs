use crate::upload::types::{FileSource, UploadFile};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Expands picked or dropped paths into upload files, keeping the given order.
/// Directories contribute every regular file beneath them, sorted by path.
pub fn collect_upload_files(paths: &[PathBuf]) -> Vec<UploadFile> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            let mut nested: Vec<PathBuf> = WalkBuilder::new(path)
                .standard_filters(false)
                .build()
                .filter_map(|entry| match entry {
                    Ok(entry) => Some(entry.into_path()),
                    Err(e) => {
                        warn!(dir = %path.display(), "skipping unreadable entry: {e}");
                        None
                    }
                })
                .filter(|p| p.is_file())
                .collect();
            nested.sort();
            files.extend(nested.into_iter().map(from_path));
        } else if path.is_file() {
            files.push(from_path(path.clone()));
        } else {
            warn!(path = %path.display(), "ignoring path that is neither a file nor a directory");
        }
    }

    files
}

fn from_path(path: PathBuf) -> UploadFile {
    UploadFile {
        name: base_name(&path),
        source: FileSource::Path(path),
    }
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

impl UploadFile {
    pub async fn read_contents(&self) -> std::io::Result<Vec<u8>> {
        match &self.source {
            FileSource::Path(path) => tokio::fs::read(path).await,
            FileSource::Bytes(bytes) => Ok(bytes.to_vec()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn keeps_selection_order_for_plain_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let b = dir.path().join("b.xlsx");
        let a = dir.path().join("a.xlsx");
        fs::write(&b, b"b").expect("write");
        fs::write(&a, b"a").expect("write");

        let files = collect_upload_files(&[b.clone(), a.clone()]);
        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["b.xlsx", "a.xlsx"]);
    }

    #[test]
    fn expands_directories_without_filtering() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("reports");
        fs::create_dir_all(nested.join("sub")).expect("mkdir");
        fs::write(nested.join(".gitignore"), "*.zip\n").expect("write");
        fs::write(nested.join("Lewin Accounts.xlsx"), b"x").expect("write");
        fs::write(nested.join("bundle.zip"), b"z").expect("write");
        fs::write(nested.join("sub").join("notes.txt"), b"n").expect("write");

        let files = collect_upload_files(&[nested]);
        let mut names: Vec<_> = files.iter().map(|f| f.name.clone()).collect();
        names.sort();
        assert_eq!(
            names,
            [".gitignore", "Lewin Accounts.xlsx", "bundle.zip", "notes.txt"]
        );
    }

    #[test]
    fn skips_missing_paths() {
        let dir = tempfile::tempdir().expect("tempdir");
        let files = collect_upload_files(&[dir.path().join("gone.xlsx")]);
        assert!(files.is_empty());
    }

    #[tokio::test]
    async fn reads_path_and_in_memory_sources() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("Rgn01 HSES Accounts.xlsx");
        fs::write(&path, b"sheet").expect("write");

        let on_disk = from_path(path);
        assert_eq!(on_disk.read_contents().await.expect("read"), b"sheet");

        let in_memory = UploadFile {
            name: "dropped.xlsx".into(),
            source: FileSource::Bytes(b"bytes".to_vec().into()),
        };
        assert_eq!(in_memory.read_contents().await.expect("read"), b"bytes");
    }
}
