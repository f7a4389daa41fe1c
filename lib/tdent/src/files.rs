// Copyright 2024 - developers of the `tdent` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! File handles and the collaborator that owns the content behind them.
//!
//! Entities only ever store a [`FileId`]. Whoever needs to download, upload
//! or cache the bytes asks the [`FileManager`] that allocated the handle.
use std::collections::HashMap;
use std::fmt;

use log::{trace, warn};
use tdent_codec::deserialize::{Buffer, Error, Result};
use tdent_codec::{Deserializable, Serializable};

use crate::ids::DialogId;
use crate::photo_size_source::PhotoSizeSource;

/// Opaque handle to file content owned by a [`FileManager`].
///
/// The default handle is invalid and stands for "no file".
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "impl-serde",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub struct FileId(i32);

impl FileId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    pub fn get(self) -> i32 {
        self.0
    }

    pub fn is_valid(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileId({})", self.0)
    }
}

impl Serializable for FileId {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        self.0.serialize(buf)
    }
}

impl Deserializable for FileId {
    fn deserialize(buf: Buffer) -> Result<Self> {
        Ok(Self(i32::deserialize(buf)?))
    }
}

/// Kind of content a file holds. The numeric codes are persisted and must
/// never change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "impl-serde",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
#[repr(i32)]
pub enum FileType {
    Thumbnail = 0,
    ProfilePhoto = 1,
    Photo = 2,
    VoiceNote = 3,
    Video = 4,
    Document = 5,
    Encrypted = 6,
    Temp = 7,
    Sticker = 8,
    Audio = 9,
    Animation = 10,
    EncryptedThumbnail = 11,
    Wallpaper = 12,
    VideoNote = 13,
}

impl FileType {
    const ALL: [FileType; 14] = [
        Self::Thumbnail,
        Self::ProfilePhoto,
        Self::Photo,
        Self::VoiceNote,
        Self::Video,
        Self::Document,
        Self::Encrypted,
        Self::Temp,
        Self::Sticker,
        Self::Audio,
        Self::Animation,
        Self::EncryptedThumbnail,
        Self::Wallpaper,
        Self::VideoNote,
    ];

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.code() == code)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Thumbnail => "Thumbnail",
            Self::ProfilePhoto => "ChatPhoto",
            Self::Photo => "Photo",
            Self::VoiceNote => "VoiceNote",
            Self::Video => "Video",
            Self::Document => "Document",
            Self::Encrypted => "Secret",
            Self::Temp => "Temp",
            Self::Sticker => "Sticker",
            Self::Audio => "Audio",
            Self::Animation => "Animation",
            Self::EncryptedThumbnail => "SecretThumbnail",
            Self::Wallpaper => "Wallpaper",
            Self::VideoNote => "VideoNote",
        };
        f.write_str(name)
    }
}

impl Serializable for FileType {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        self.code().serialize(buf)
    }
}

impl Deserializable for FileType {
    fn deserialize(buf: Buffer) -> Result<Self> {
        let id = i32::deserialize(buf)?;
        Self::from_code(id).ok_or(Error::UnknownVariant { id })
    }
}

/// Identifier of the datacenter a remote file is stored in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DcId(i32);

impl DcId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    pub fn get(self) -> i32 {
        self.0
    }

    /// Whether this refers to a concrete datacenter.
    pub fn is_exact(self) -> bool {
        self.0 > 0
    }
}

/// Everything a [`FileManager`] needs to locate some content.
///
/// Two registrations with equal descriptors refer to the same content.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FileDescriptor {
    /// One size of a photo, thumbnail or avatar stored on a datacenter.
    Photo {
        source: PhotoSizeSource,
        id: i64,
        access_hash: i64,
        file_reference: Vec<u8>,
        volume_id: i64,
        local_id: i32,
        dc_id: DcId,
    },
    /// A document, such as a sticker attached to a photo.
    Document {
        file_type: FileType,
        id: i64,
        access_hash: i64,
        file_reference: Vec<u8>,
        dc_id: DcId,
    },
    /// Content only reachable through a web URL.
    Web {
        file_type: FileType,
        url: String,
        access_hash: i64,
    },
    /// A file uploaded to a secret chat, along with the key that decrypts it.
    Encrypted {
        id: i64,
        access_hash: i64,
        dc_id: DcId,
        key: Vec<u8>,
        iv: Vec<u8>,
    },
    /// Content that only exists locally, with no remote location.
    Local {
        file_type: FileType,
        volume_id: i64,
        local_id: i32,
    },
}

impl FileDescriptor {
    pub fn file_type(&self) -> FileType {
        match self {
            Self::Photo { source, .. } => source.file_type().unwrap_or(FileType::Photo),
            Self::Encrypted { .. } => FileType::Encrypted,
            Self::Document { file_type, .. }
            | Self::Web { file_type, .. }
            | Self::Local { file_type, .. } => *file_type,
        }
    }
}

/// A request to track some content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileRegistration {
    pub descriptor: FileDescriptor,
    /// Conversation the content was seen in, used to refresh stale references.
    pub owner: DialogId,
    /// Size in bytes, if known, or 0.
    pub expected_size: i32,
    pub suggested_name: String,
}

/// The collaborator that allocates and tracks file handles.
pub trait FileManager {
    /// Returns the handle already tracking the described content, or
    /// allocates a new one.
    fn resolve_or_allocate(&mut self, registration: FileRegistration) -> FileId;

    /// Provides the full content of a file that was received inline.
    fn set_content(&mut self, file_id: FileId, content: Vec<u8>);
}

impl<T: FileManager + ?Sized> FileManager for &mut T {
    fn resolve_or_allocate(&mut self, registration: FileRegistration) -> FileId {
        (**self).resolve_or_allocate(registration)
    }

    fn set_content(&mut self, file_id: FileId, content: Vec<u8>) {
        (**self).set_content(file_id, content)
    }
}

/// A [`FileManager`] that keeps everything in memory.
///
/// Handles are allocated sequentially starting at 1.
#[derive(Debug, Default)]
pub struct MemoryFileManager {
    files: Vec<FileRegistration>,
    by_descriptor: HashMap<FileDescriptor, FileId>,
    contents: HashMap<FileId, Vec<u8>>,
}

impl MemoryFileManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registration(&self, file_id: FileId) -> Option<&FileRegistration> {
        let index = usize::try_from(file_id.get()).ok()?.checked_sub(1)?;
        self.files.get(index)
    }

    pub fn content(&self, file_id: FileId) -> Option<&[u8]> {
        self.contents.get(&file_id).map(Vec::as_slice)
    }

    /// Amount of distinct files tracked.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FileManager for MemoryFileManager {
    fn resolve_or_allocate(&mut self, registration: FileRegistration) -> FileId {
        if let Some(&file_id) = self.by_descriptor.get(&registration.descriptor) {
            return file_id;
        }

        let file_id = FileId(self.files.len() as i32 + 1);
        trace!(
            "allocated {} for {} file {:?}",
            file_id,
            registration.descriptor.file_type(),
            registration.suggested_name
        );
        self.by_descriptor
            .insert(registration.descriptor.clone(), file_id);
        self.files.push(registration);
        file_id
    }

    fn set_content(&mut self, file_id: FileId, content: Vec<u8>) {
        if self.registration(file_id).is_none() {
            warn!("ignoring content for untracked {}", file_id);
            return;
        }
        self.contents.insert(file_id, content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local(local_id: i32) -> FileRegistration {
        FileRegistration {
            descriptor: FileDescriptor::Local {
                file_type: FileType::EncryptedThumbnail,
                volume_id: 1,
                local_id,
            },
            owner: DialogId::default(),
            expected_size: 0,
            suggested_name: String::new(),
        }
    }

    #[test]
    fn file_type_codes_are_stable() {
        assert_eq!(FileType::Thumbnail.code(), 0);
        assert_eq!(FileType::ProfilePhoto.code(), 1);
        assert_eq!(FileType::Photo.code(), 2);
        assert_eq!(FileType::VideoNote.code(), 13);
        for ty in FileType::ALL {
            assert_eq!(FileType::from_code(ty.code()), Some(ty));
        }
    }

    #[test]
    fn unknown_file_type_is_rejected() {
        assert_eq!(
            FileType::from_bytes(&99i32.to_bytes()),
            Err(Error::UnknownVariant { id: 99 })
        );
    }

    #[test]
    fn same_descriptor_resolves_to_same_handle() {
        let mut manager = MemoryFileManager::new();
        let a = manager.resolve_or_allocate(local(1));
        let b = manager.resolve_or_allocate(local(2));
        let c = manager.resolve_or_allocate(local(1));

        assert!(a.is_valid());
        assert_ne!(a, b);
        assert_eq!(a, c);
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn content_is_only_kept_for_tracked_files() {
        let mut manager = MemoryFileManager::new();
        let file_id = manager.resolve_or_allocate(local(1));
        manager.set_content(file_id, vec![1, 2, 3]);
        manager.set_content(FileId::new(40), vec![4]);

        assert_eq!(manager.content(file_id), Some(&[1, 2, 3][..]));
        assert_eq!(manager.content(FileId::new(40)), None);
        assert_eq!(manager.registration(FileId::default()), None);
    }
}
