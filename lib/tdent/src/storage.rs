// Copyright 2024 - developers of the `tdent` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Persistence of entities outside of memory: as base64 text, or as the
//! whole content of a file.
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::PathBuf;

use base64::DecodeError;
use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use log::debug;
use snafu::{Snafu, prelude::*};
use tdent_codec::{Deserializable, Serializable};

#[derive(Snafu, Debug)]
#[snafu(visibility(pub(crate)))]
#[snafu(module(error))]
pub enum StorageError {
    #[snafu(display("Specified path \"{path}\" not found"))]
    NotFound { path: String },

    #[snafu(display("Specified path \"{path}\" already exists"))]
    AlreadyExists { path: String },

    #[snafu(display("Error while converting bytes into an entity occurred"))]
    InvalidFormat {
        source: tdent_codec::deserialize::Error,
    },

    #[snafu(display("Unexpected IO error occurred"))]
    UnexpectedIo { source: io::Error },

    #[snafu(display("Error while converting base64 string {string} into bytes"))]
    DecodeString { source: DecodeError, string: String },
}

type Result<T, E = StorageError> = std::result::Result<T, E>;

use error::*;

/// Encodes an entity as standard base64 text.
pub fn to_base64<T: Serializable>(value: &T) -> String {
    BASE64_STANDARD.encode(value.to_bytes())
}

/// Decodes an entity out of the text produced by [`to_base64`].
pub fn from_base64<T: Deserializable>(string: &str) -> Result<T> {
    let bytes = BASE64_STANDARD
        .decode(string.trim())
        .context(DecodeStringSnafu { string })?;
    T::from_bytes(&bytes).context(InvalidFormatSnafu)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenMode {
    /// Creates a new file. If the file already exists, an error will occur.
    Create,

    /// Opens an existing file. If the file does not exist, an error will occur.
    Open,

    /// Creates the file if it doesn't exist, or opens it if it does.
    CreateOpen,
}

/// Used in [`FileStorage::new`] to configure storage.
#[derive(Clone, Debug)]
pub struct FileStorageOptions {
    /// Path to the file holding the entity.
    pub path: PathBuf,

    pub mode: OpenMode,
}

/// A file holding a single persisted entity.
#[derive(Debug)]
pub struct FileStorage {
    file: File,
}

impl FileStorage {
    pub fn new(options: FileStorageOptions) -> Result<Self> {
        let path = options.path.display().to_string();
        let exists = std::fs::exists(&options.path).context(UnexpectedIoSnafu)?;

        let mut open = OpenOptions::new();
        open.read(true).write(true);
        match options.mode {
            OpenMode::Create => {
                ensure!(!exists, AlreadyExistsSnafu { path });
                open.create_new(true);
            }
            OpenMode::Open => {
                ensure!(exists, NotFoundSnafu { path });
            }
            OpenMode::CreateOpen => {
                open.create(true);
            }
        }

        let file = open.open(&options.path).context(UnexpectedIoSnafu)?;
        debug!("opened entity storage at {}", options.path.display());
        Ok(Self { file })
    }

    /// Replaces the content of the file with `value`.
    pub fn save<T: Serializable>(&mut self, value: &T) -> Result<()> {
        self.file
            .seek(SeekFrom::Start(0))
            .context(UnexpectedIoSnafu)?;
        self.file.set_len(0).context(UnexpectedIoSnafu)?;
        self.file
            .write_all(&value.to_bytes())
            .context(UnexpectedIoSnafu)?;
        self.file.sync_data().context(UnexpectedIoSnafu)
    }

    /// Reads back the entity last saved.
    pub fn load<T: Deserializable>(&mut self) -> Result<T> {
        self.file
            .seek(SeekFrom::Start(0))
            .context(UnexpectedIoSnafu)?;
        let mut content = Vec::new();
        self.file
            .read_to_end(&mut content)
            .context(UnexpectedIoSnafu)?;
        T::from_bytes(&content).context(InvalidFormatSnafu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimensions::Dimensions;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("tdent-{}-{}", std::process::id(), name))
    }

    #[test]
    fn base64_round_trip() {
        let dimensions = Dimensions::new(320, 240);
        let text = to_base64(&dimensions);
        assert_eq!(from_base64::<Dimensions>(&text).unwrap(), dimensions);
    }

    #[test]
    fn bad_base64_is_reported() {
        assert!(matches!(
            from_base64::<Dimensions>("not base64!"),
            Err(StorageError::DecodeString { .. })
        ));
        assert!(matches!(
            from_base64::<Dimensions>("AAA="),
            Err(StorageError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn file_round_trip() {
        let path = temp_path("round-trip");
        let _ = std::fs::remove_file(&path);

        let mut storage = FileStorage::new(FileStorageOptions {
            path: path.clone(),
            mode: OpenMode::Create,
        })
        .unwrap();
        storage.save(&Dimensions::new(1, 2)).unwrap();
        storage.save(&Dimensions::new(3, 4)).unwrap();
        assert_eq!(
            storage.load::<Dimensions>().unwrap(),
            Dimensions::new(3, 4)
        );

        assert!(matches!(
            FileStorage::new(FileStorageOptions {
                path: path.clone(),
                mode: OpenMode::Create,
            }),
            Err(StorageError::AlreadyExists { .. })
        ));

        std::fs::remove_file(&path).unwrap();
        assert!(matches!(
            FileStorage::new(FileStorageOptions {
                path,
                mode: OpenMode::Open,
            }),
            Err(StorageError::NotFound { .. })
        ));
    }
}
