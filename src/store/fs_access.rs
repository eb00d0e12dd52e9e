// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dashvault-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dashvault and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::io;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use super::{ContentAccess, StorageError};

/// Repository rooted at a directory; `/public/a.wcdf` maps to `<root>/public/a.wcdf`.
#[derive(Debug, Clone)]
pub struct FsContentAccess {
    root: PathBuf,
    durability: WriteDurability,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Fast, best-effort persistence.
    ///
    /// - Writes a temp file and renames atomically into place.
    /// - Does not perform per-file fsync/sync.
    #[default]
    BestEffort,

    /// Slower, best-effort durability.
    ///
    /// Attempts to flush written file contents and rename operations to stable storage where
    /// possible. Exact guarantees are platform/filesystem-dependent.
    Durable,
}

impl FsContentAccess {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            durability: WriteDurability::default(),
        }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a repository path to a location under the root.
    pub fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let relative = repository_relative_path(path)?;
        Ok(self.root.join(relative))
    }
}

impl ContentAccess for FsContentAccess {
    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_ok_and(|resolved| resolved.is_file())
    }

    fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let resolved = self.resolve(path)?;
        fs::read(&resolved).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                StorageError::NotFound {
                    path: path.to_owned(),
                }
            } else {
                StorageError::Io {
                    path: resolved,
                    source,
                }
            }
        })
    }

    fn write(&self, path: &str, contents: &[u8]) -> Result<(), StorageError> {
        let relative = repository_relative_path(path)?;
        write_atomic(&self.root, &relative, contents, self.durability)
    }

    fn delete(&self, path: &str) -> Result<bool, StorageError> {
        let resolved = self.resolve(path)?;
        match fs::symlink_metadata(&resolved) {
            Ok(md) if md.file_type().is_symlink() => {
                return Err(StorageError::SymlinkRefused { path: resolved });
            }
            Ok(_) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(source) => {
                return Err(StorageError::Io {
                    path: resolved,
                    source,
                })
            }
        }

        match fs::remove_file(&resolved) {
            Ok(()) => Ok(true),
            Err(source) if source.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StorageError::Io {
                path: resolved,
                source,
            }),
        }
    }
}

fn repository_relative_path(path: &str) -> Result<PathBuf, StorageError> {
    let invalid = || StorageError::InvalidPath {
        path: path.to_owned(),
    };

    let trimmed = path.trim_start_matches('/');
    if trimmed.is_empty() || trimmed.contains('\\') {
        return Err(invalid());
    }

    let relative = PathBuf::from(trimmed);
    validate_relative_path(&relative).map_err(|()| invalid())?;
    Ok(relative)
}

fn validate_relative_path(path: &Path) -> Result<(), ()> {
    if path.as_os_str().is_empty() || path.is_absolute() {
        return Err(());
    }

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::ParentDir => return Err(()),
            Component::CurDir | Component::Normal(_) => {}
        }
    }

    Ok(())
}

fn create_dir_all_safe(root: &Path, relative: &Path) -> Result<(), StorageError> {
    let mut current = root.to_path_buf();
    for component in relative.components() {
        let Component::Normal(part) = component else {
            continue;
        };

        current.push(part);

        match fs::symlink_metadata(&current) {
            Ok(md) => {
                if md.file_type().is_symlink() {
                    return Err(StorageError::SymlinkRefused { path: current });
                }
                if !md.is_dir() {
                    return Err(StorageError::Io {
                        path: current,
                        source: io::Error::new(io::ErrorKind::AlreadyExists, "expected directory"),
                    });
                }
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                fs::create_dir(&current).map_err(|source| StorageError::Io {
                    path: current.clone(),
                    source,
                })?;
            }
            Err(source) => {
                return Err(StorageError::Io {
                    path: current,
                    source,
                })
            }
        }
    }

    Ok(())
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
                ) =>
            {
                let _ = fs::remove_file(to);
                fs::rename(from, to)
            }
            Err(err) => Err(err),
        }
    }

    #[cfg(not(windows))]
    {
        fs::rename(from, to)
    }
}

fn write_atomic(
    root: &Path,
    relative: &Path,
    contents: &[u8],
    durability: WriteDurability,
) -> Result<(), StorageError> {
    fs::create_dir_all(root).map_err(|source| StorageError::Io {
        path: root.to_path_buf(),
        source,
    })?;

    let parent_rel = relative.parent().unwrap_or_else(|| Path::new(""));
    create_dir_all_safe(root, parent_rel)?;

    let path = root.join(relative);
    match fs::symlink_metadata(&path) {
        Ok(md) if md.file_type().is_symlink() => {
            return Err(StorageError::SymlinkRefused { path });
        }
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => return Err(StorageError::Io { path, source }),
    }

    let Some(parent) = path.parent() else {
        return Err(StorageError::Io {
            path: path.clone(),
            source: io::Error::other("path has no parent"),
        });
    };

    let Some(file_name) = path.file_name() else {
        return Err(StorageError::Io {
            path: path.clone(),
            source: io::Error::other("path has no file name"),
        });
    };

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let tmp_path = parent.join(format!(
        ".dashvault.tmp.{}.{}",
        file_name.to_string_lossy(),
        nanos
    ));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(|source| StorageError::Io {
            path: tmp_path.clone(),
            source,
        })?;

    file.write_all(contents).map_err(|source| StorageError::Io {
        path: tmp_path.clone(),
        source,
    })?;

    if durability == WriteDurability::Durable {
        file.sync_all().map_err(|source| StorageError::Io {
            path: tmp_path.clone(),
            source,
        })?;
    }
    drop(file);

    if let Err(source) = rename_overwrite(&tmp_path, &path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(StorageError::Io { path, source });
    }

    if durability == WriteDurability::Durable {
        #[cfg(unix)]
        {
            let dir = fs::File::open(parent).map_err(|source| StorageError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
            dir.sync_all().map_err(|source| StorageError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    Ok(())
}
