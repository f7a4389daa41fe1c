// Copyright 2024 - developers of the `tdent` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Already-parsed records, as received from the network.
//!
//! These mirror the shape of the [Telegram API] objects that carry photos
//! and invite links. Nothing in here is ever persisted; see [`crate::resolve`]
//! for the conversion into entities.
//!
//! [Telegram API]: https://core.telegram.org/schema

/// Location of a file in a datacenter volume.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FileLocation {
    pub volume_id: i64,
    pub local_id: i32,
}

/// A single size of a photo.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PhotoSize {
    /// Size that is not available.
    Empty { r#type: String },
    /// Size that must be downloaded separately.
    Size {
        r#type: String,
        location: FileLocation,
        w: i32,
        h: i32,
        size: i32,
    },
    /// Size whose content is included inline.
    Cached {
        r#type: String,
        location: FileLocation,
        w: i32,
        h: i32,
        bytes: Vec<u8>,
    },
    /// A very low resolution preview, packed without its JPEG header.
    Stripped { r#type: String, bytes: Vec<u8> },
}

impl PhotoSize {
    pub fn r#type(&self) -> &str {
        match self {
            Self::Empty { r#type }
            | Self::Size { r#type, .. }
            | Self::Cached { r#type, .. }
            | Self::Stripped { r#type, .. } => r#type,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Photo {
    pub has_stickers: bool,
    pub id: i64,
    pub access_hash: i64,
    pub file_reference: Vec<u8>,
    pub date: i32,
    pub sizes: Vec<PhotoSize>,
    pub dc_id: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MaybePhoto {
    Empty { id: i64 },
    Photo(Photo),
}

impl From<Photo> for MaybePhoto {
    fn from(photo: Photo) -> Self {
        Self::Photo(photo)
    }
}

/// Current avatar of a group or channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatPhoto {
    Empty,
    Photo {
        photo_small: FileLocation,
        photo_big: FileLocation,
        dc_id: i32,
    },
}

/// Current avatar of a user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserProfilePhoto {
    Empty,
    Photo {
        photo_id: i64,
        photo_small: FileLocation,
        photo_big: FileLocation,
        dc_id: i32,
    },
}

/// A document whose content can be fetched, such as a sticker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    pub id: i64,
    pub access_hash: i64,
    pub file_reference: Vec<u8>,
    pub size: i32,
    pub dc_id: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DocumentAttribute {
    ImageSize { w: i32, h: i32 },
    Filename { file_name: String },
}

/// A file hosted outside of Telegram.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WebDocument {
    pub url: String,
    pub access_hash: i64,
    pub size: i32,
    pub mime_type: String,
    pub attributes: Vec<DocumentAttribute>,
}

/// A file sent in a secret chat. Its content is encrypted with a key that
/// only travels inside the decrypted message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncryptedFile {
    pub id: i64,
    pub access_hash: i64,
    pub size: i64,
    pub dc_id: i32,
    pub key_fingerprint: i32,
}

/// Photo media of a decrypted secret chat message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecryptedMediaPhoto {
    /// Inline JPEG thumbnail, or empty.
    pub thumb: Vec<u8>,
    pub thumb_w: i32,
    pub thumb_h: i32,
    pub w: i32,
    pub h: i32,
    pub size: i32,
    pub key: Vec<u8>,
    pub iv: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatInviteExported {
    pub revoked: bool,
    pub permanent: bool,
    pub link: String,
    pub admin_id: i64,
    pub date: i32,
    pub expire_date: Option<i32>,
    pub usage_limit: Option<i32>,
    pub usage: Option<i32>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputPeer {
    Empty,
    User { user_id: i64, access_hash: i64 },
    Chat { chat_id: i64 },
    Channel { channel_id: i64, access_hash: i64 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputStickerSet {
    Id { id: i64, access_hash: i64 },
}
