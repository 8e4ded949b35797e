//! Folder listing implementation using walkdir.

use super::{filter::ImageFilter, ImageFile, ScanResult};
use crate::error::ScanError;
use crate::events::{null_sender, Event, EventSender, ScanEvent};
use std::path::Path;
use walkdir::WalkDir;

/// Configuration for the folder scanner
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Whether symlinks to image files are treated as images.
    ///
    /// Off by default: a link and its target would otherwise fingerprint
    /// as one group.
    pub follow_symlinks: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
        }
    }
}

/// Lists the images that are direct children of one folder
pub struct FolderScanner {
    config: ScanConfig,
    filter: ImageFilter,
}

impl FolderScanner {
    /// Create a new scanner with the given configuration
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config,
            filter: ImageFilter::new(),
        }
    }

    /// Scan `folder` without progress reporting
    pub fn scan(&self, folder: &Path) -> Result<ScanResult, ScanError> {
        self.scan_with_events(folder, &null_sender())
    }

    /// Scan `folder`, emitting an event for every image found.
    ///
    /// Fails only when `folder` is not an existing directory; unreadable
    /// entries are collected in [`ScanResult::errors`].
    pub fn scan_with_events(
        &self,
        folder: &Path,
        events: &EventSender,
    ) -> Result<ScanResult, ScanError> {
        if !folder.is_dir() {
            return Err(ScanError::InvalidFolder {
                path: folder.to_path_buf(),
            });
        }

        events.send(Event::Scan(ScanEvent::Started {
            folder: folder.to_path_buf(),
        }));

        let mut images = Vec::new();
        let mut errors = Vec::new();

        let walker = WalkDir::new(folder)
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name();

        for entry_result in walker {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                    let source = e
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
                    tracing::warn!(path = %path.display(), error = %source, "Unreadable entry");
                    errors.push(ScanError::ReadDirectory { path, source });
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let Some(suffix) = self.filter.accepted_suffix(path) else {
                continue;
            };
            let Some(format) = self.filter.get_format(path) else {
                continue;
            };
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                tracing::warn!(path = %path.display(), "Skipping file with a non UTF-8 name");
                continue;
            };

            match entry.metadata() {
                Ok(metadata) => {
                    let image = ImageFile {
                        name: name.to_string(),
                        path: path.to_path_buf(),
                        suffix: suffix.to_string(),
                        format,
                        size: metadata.len(),
                        modified: metadata
                            .modified()
                            .unwrap_or(std::time::SystemTime::UNIX_EPOCH),
                    };

                    events.send(Event::Scan(ScanEvent::ImageFound {
                        path: image.path.clone(),
                    }));

                    images.push(image);
                }
                Err(e) => {
                    let source = e
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("metadata unavailable"));
                    tracing::warn!(path = %path.display(), error = %source, "Unreadable metadata");
                    errors.push(ScanError::ReadDirectory {
                        path: path.to_path_buf(),
                        source,
                    });
                }
            }
        }

        tracing::debug!(
            folder = %folder.display(),
            images = images.len(),
            "Folder scanned"
        );

        events.send(Event::Scan(ScanEvent::Completed {
            total_images: images.len(),
        }));

        Ok(ScanResult { images, errors })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scanner::ImageFormat;
    use std::fs::{self, File};
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn create_file(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(&[0x89, 0x50, 0x4E, 0x47]).unwrap();
        path
    }

    #[test]
    fn scan_empty_directory_returns_empty_vec() {
        let temp_dir = TempDir::new().unwrap();
        let scanner = FolderScanner::new(ScanConfig::default());

        let result = scanner.scan(temp_dir.path()).unwrap();

        assert!(result.images.is_empty());
        assert!(result.errors.is_empty());
    }

    #[test]
    fn scan_finds_recognized_images_in_name_order() {
        let temp_dir = TempDir::new().unwrap();
        create_file(&temp_dir, "c.png");
        create_file(&temp_dir, "a.JPG");
        create_file(&temp_dir, "b.jpeg");

        let scanner = FolderScanner::new(ScanConfig::default());
        let result = scanner.scan(temp_dir.path()).unwrap();

        let names: Vec<_> = result.images.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["a.JPG", "b.jpeg", "c.png"]);
        assert_eq!(result.images[0].suffix, "JPG");
        assert_eq!(result.images[0].format, ImageFormat::Jpeg);
        assert_eq!(result.images[2].format, ImageFormat::Png);
    }

    #[test]
    fn scan_ignores_label_sidecars_and_unrecognized_files() {
        let temp_dir = TempDir::new().unwrap();
        create_file(&temp_dir, "image.png");
        create_file(&temp_dir, "image.txt");
        create_file(&temp_dir, "image.Png");
        create_file(&temp_dir, "class.txt");

        let scanner = FolderScanner::new(ScanConfig::default());
        let result = scanner.scan(temp_dir.path()).unwrap();

        assert_eq!(result.images.len(), 1);
        assert_eq!(result.images[0].name, "image.png");
    }

    #[test]
    fn scan_does_not_descend_into_subdirectories() {
        let temp_dir = TempDir::new().unwrap();
        create_file(&temp_dir, "root.png");
        let subdir = temp_dir.path().join("nested.png");
        fs::create_dir(&subdir).unwrap();
        File::create(subdir.join("inner.png")).unwrap();

        let scanner = FolderScanner::new(ScanConfig::default());
        let result = scanner.scan(temp_dir.path()).unwrap();

        assert_eq!(result.images.len(), 1);
        assert_eq!(result.images[0].name, "root.png");
    }

    #[test]
    fn scan_includes_hidden_files() {
        let temp_dir = TempDir::new().unwrap();
        create_file(&temp_dir, ".hidden.png");

        let scanner = FolderScanner::new(ScanConfig::default());
        let result = scanner.scan(temp_dir.path()).unwrap();

        assert_eq!(result.images.len(), 1);
    }

    #[test]
    fn scan_nonexistent_directory_is_invalid_folder() {
        let scanner = FolderScanner::new(ScanConfig::default());
        let result = scanner.scan(Path::new("/nonexistent/path/12345"));

        assert!(matches!(result, Err(ScanError::InvalidFolder { .. })));
    }

    #[test]
    fn scan_of_a_file_is_invalid_folder() {
        let temp_dir = TempDir::new().unwrap();
        let file = create_file(&temp_dir, "a.png");

        let scanner = FolderScanner::new(ScanConfig::default());
        let result = scanner.scan(&file);

        assert!(matches!(result, Err(ScanError::InvalidFolder { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_skipped_by_default() {
        let temp_dir = TempDir::new().unwrap();
        let target = create_file(&temp_dir, "b.png");
        std::os::unix::fs::symlink(&target, temp_dir.path().join("a.png")).unwrap();

        let scanner = FolderScanner::new(ScanConfig::default());
        let result = scanner.scan(temp_dir.path()).unwrap();

        let names: Vec<_> = result.images.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["b.png"]);
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_is_collected_as_error_when_following() {
        let temp_dir = TempDir::new().unwrap();
        create_file(&temp_dir, "a.png");
        std::os::unix::fs::symlink(temp_dir.path().join("gone.png"), temp_dir.path().join("b.png"))
            .unwrap();

        let scanner = FolderScanner::new(ScanConfig {
            follow_symlinks: true,
        });
        let result = scanner.scan(temp_dir.path()).unwrap();

        assert_eq!(result.images.len(), 1);
        assert_eq!(result.errors.len(), 1);
        assert!(matches!(result.errors[0], ScanError::ReadDirectory { .. }));
    }
}
