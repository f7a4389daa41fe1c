// Copyright 2024 - developers of the `tdent` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Provenance of cached images.
//!
//! A [`PhotoSizeSource`] remembers how an image was obtained, so that it can
//! be requested again once the cached copy or its file reference expires.
use std::fmt;

use tdent_codec::deserialize::{Buffer, Error, Result};
use tdent_codec::{Deserializable, InvalidVariantAccess, Serializable, Variant, variant};

use crate::files::FileType;
use crate::ids::{DialogId, DialogKind};
use crate::raw;

/// A thumbnail embedded in a larger photo, document or message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "impl-serde",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub struct Thumbnail {
    pub file_type: FileType,
    /// Size-class tag of the thumbnail, or 0 if it's not known yet.
    pub thumbnail_type: i32,
}

/// The avatar of a conversation, in one of its two fixed resolutions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "impl-serde",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub struct DialogPhotoSource {
    pub dialog_id: DialogId,
    pub dialog_access_hash: i64,
    pub is_big: bool,
}

/// The preview image of a sticker set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "impl-serde",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub struct StickerSetThumbnail {
    pub sticker_set_id: i64,
    pub sticker_set_access_hash: i64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "impl-serde",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub enum PhotoSizeSource {
    #[default]
    Empty,
    Thumbnail(Thumbnail),
    DialogPhoto(DialogPhotoSource),
    StickerSetThumbnail(StickerSetThumbnail),
}

impl PhotoSizeSource {
    pub const EMPTY: i32 = 0;
    pub const THUMBNAIL: i32 = 1;
    pub const DIALOG_PHOTO: i32 = 2;
    pub const STICKER_SET_THUMBNAIL: i32 = 3;

    pub fn thumbnail(file_type: FileType, thumbnail_type: i32) -> Self {
        Self::Thumbnail(Thumbnail {
            file_type,
            thumbnail_type,
        })
    }

    pub fn dialog_photo(dialog_id: DialogId, dialog_access_hash: i64, is_big: bool) -> Self {
        Self::DialogPhoto(DialogPhotoSource {
            dialog_id,
            dialog_access_hash,
            is_big,
        })
    }

    pub fn sticker_set_thumbnail(sticker_set_id: i64, sticker_set_access_hash: i64) -> Self {
        Self::StickerSetThumbnail(StickerSetThumbnail {
            sticker_set_id,
            sticker_set_access_hash,
        })
    }

    /// Kind of file the image is stored as, if there is any.
    pub fn file_type(&self) -> Option<FileType> {
        match self {
            Self::Empty => None,
            Self::Thumbnail(thumbnail) => Some(thumbnail.file_type),
            Self::DialogPhoto(_) => Some(FileType::ProfilePhoto),
            Self::StickerSetThumbnail(_) => Some(FileType::Thumbnail),
        }
    }

    fn access_error(&self, expected: i32) -> InvalidVariantAccess {
        InvalidVariantAccess {
            expected,
            found: self.discriminant(),
        }
    }

    pub fn try_thumbnail(&self) -> std::result::Result<&Thumbnail, InvalidVariantAccess> {
        match self {
            Self::Thumbnail(thumbnail) => Ok(thumbnail),
            _ => Err(self.access_error(Self::THUMBNAIL)),
        }
    }

    /// Mutable access to the thumbnail payload, used to fill in its type
    /// once it is known.
    pub fn try_thumbnail_mut(&mut self) -> std::result::Result<&mut Thumbnail, InvalidVariantAccess> {
        match self {
            Self::Thumbnail(thumbnail) => Ok(thumbnail),
            _ => Err(self.access_error(Self::THUMBNAIL)),
        }
    }

    pub fn try_dialog_photo(&self) -> std::result::Result<&DialogPhotoSource, InvalidVariantAccess> {
        match self {
            Self::DialogPhoto(dialog_photo) => Ok(dialog_photo),
            _ => Err(self.access_error(Self::DIALOG_PHOTO)),
        }
    }

    pub fn try_sticker_set_thumbnail(
        &self,
    ) -> std::result::Result<&StickerSetThumbnail, InvalidVariantAccess> {
        match self {
            Self::StickerSetThumbnail(thumbnail) => Ok(thumbnail),
            _ => Err(self.access_error(Self::STICKER_SET_THUMBNAIL)),
        }
    }
}

impl Variant for PhotoSizeSource {
    const DISCRIMINANTS: &'static [i32] = &[
        Self::EMPTY,
        Self::THUMBNAIL,
        Self::DIALOG_PHOTO,
        Self::STICKER_SET_THUMBNAIL,
    ];

    fn discriminant(&self) -> i32 {
        match self {
            Self::Empty => Self::EMPTY,
            Self::Thumbnail(_) => Self::THUMBNAIL,
            Self::DialogPhoto(_) => Self::DIALOG_PHOTO,
            Self::StickerSetThumbnail(_) => Self::STICKER_SET_THUMBNAIL,
        }
    }

    fn serialize_payload(&self, buf: &mut impl Extend<u8>) {
        match self {
            Self::Empty => {}
            Self::Thumbnail(x) => x.serialize(buf),
            Self::DialogPhoto(x) => x.serialize(buf),
            Self::StickerSetThumbnail(x) => x.serialize(buf),
        }
    }

    fn deserialize_payload(discriminant: i32, buf: Buffer) -> Result<Self> {
        Ok(match discriminant {
            Self::EMPTY => Self::Empty,
            Self::THUMBNAIL => Self::Thumbnail(Thumbnail::deserialize(buf)?),
            Self::DIALOG_PHOTO => Self::DialogPhoto(DialogPhotoSource::deserialize(buf)?),
            Self::STICKER_SET_THUMBNAIL => {
                Self::StickerSetThumbnail(StickerSetThumbnail::deserialize(buf)?)
            }
            id => return Err(Error::UnknownVariant { id }),
        })
    }
}

impl Serializable for PhotoSizeSource {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        variant::serialize(self, buf)
    }
}

impl Deserializable for PhotoSizeSource {
    fn deserialize(buf: Buffer) -> Result<Self> {
        variant::deserialize(buf)
    }
}

impl Serializable for Thumbnail {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        self.file_type.serialize(buf);
        self.thumbnail_type.serialize(buf);
    }
}

impl Deserializable for Thumbnail {
    fn deserialize(buf: Buffer) -> Result<Self> {
        let file_type = FileType::deserialize(buf)?;
        let thumbnail_type = i32::deserialize(buf)?;
        Ok(Self {
            file_type,
            thumbnail_type,
        })
    }
}

impl Serializable for DialogPhotoSource {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        self.dialog_id.serialize(buf);
        self.dialog_access_hash.serialize(buf);
        self.is_big.serialize(buf);
    }
}

impl Deserializable for DialogPhotoSource {
    fn deserialize(buf: Buffer) -> Result<Self> {
        let dialog_id = DialogId::deserialize(buf)?;
        let dialog_access_hash = i64::deserialize(buf)?;
        let is_big = bool::deserialize(buf)?;
        Ok(Self {
            dialog_id,
            dialog_access_hash,
            is_big,
        })
    }
}

impl Serializable for StickerSetThumbnail {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        self.sticker_set_id.serialize(buf);
        self.sticker_set_access_hash.serialize(buf);
    }
}

impl Deserializable for StickerSetThumbnail {
    fn deserialize(buf: Buffer) -> Result<Self> {
        let sticker_set_id = i64::deserialize(buf)?;
        let sticker_set_access_hash = i64::deserialize(buf)?;
        Ok(Self {
            sticker_set_id,
            sticker_set_access_hash,
        })
    }
}

impl DialogPhotoSource {
    /// The peer to request the avatar from.
    pub fn input_peer(&self) -> raw::InputPeer {
        let Some(bare_id) = self.dialog_id.bare_id() else {
            return raw::InputPeer::Empty;
        };
        match self.dialog_id.kind() {
            Some(DialogKind::User) => raw::InputPeer::User {
                user_id: bare_id,
                access_hash: self.dialog_access_hash,
            },
            Some(DialogKind::Chat) => raw::InputPeer::Chat { chat_id: bare_id },
            Some(DialogKind::Channel) => raw::InputPeer::Channel {
                channel_id: bare_id,
                access_hash: self.dialog_access_hash,
            },
            None => raw::InputPeer::Empty,
        }
    }
}

impl StickerSetThumbnail {
    /// The sticker set to request the preview from.
    pub fn input_sticker_set(&self) -> raw::InputStickerSet {
        raw::InputStickerSet::Id {
            id: self.sticker_set_id,
            access_hash: self.sticker_set_access_hash,
        }
    }
}

macro_rules! impl_try_from_source {
    ($payload:ident, $variant:ident, $discriminant:ident) => {
        impl TryFrom<PhotoSizeSource> for $payload {
            type Error = InvalidVariantAccess;

            fn try_from(source: PhotoSizeSource) -> std::result::Result<Self, Self::Error> {
                match source {
                    PhotoSizeSource::$variant(payload) => Ok(payload),
                    _ => Err(source.access_error(PhotoSizeSource::$discriminant)),
                }
            }
        }

        impl From<$payload> for PhotoSizeSource {
            fn from(payload: $payload) -> Self {
                Self::$variant(payload)
            }
        }
    };
}

impl_try_from_source!(Thumbnail, Thumbnail, THUMBNAIL);
impl_try_from_source!(DialogPhotoSource, DialogPhoto, DIALOG_PHOTO);
impl_try_from_source!(StickerSetThumbnail, StickerSetThumbnail, STICKER_SET_THUMBNAIL);

impl fmt::Display for PhotoSizeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "PhotoSizeSource[]"),
            Self::Thumbnail(x) => write!(
                f,
                "PhotoSizeSource[{}, type {}]",
                x.file_type, x.thumbnail_type
            ),
            Self::DialogPhoto(x) => write!(
                f,
                "PhotoSizeSource[{}, {} photo]",
                x.dialog_id,
                if x.is_big { "big" } else { "small" }
            ),
            Self::StickerSetThumbnail(x) => {
                write!(f, "PhotoSizeSource[sticker set {}]", x.sticker_set_id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::UserId;

    #[test]
    fn discriminants_are_stable() {
        assert_eq!(PhotoSizeSource::Empty.to_bytes(), [0, 0, 0, 0]);
        assert_eq!(
            &PhotoSizeSource::thumbnail(FileType::Photo, 0).to_bytes()[..4],
            [1, 0, 0, 0]
        );
        assert_eq!(
            &PhotoSizeSource::dialog_photo(DialogId::chat(1), 0, false).to_bytes()[..4],
            [2, 0, 0, 0]
        );
        assert_eq!(
            &PhotoSizeSource::sticker_set_thumbnail(1, 2).to_bytes()[..4],
            [3, 0, 0, 0]
        );
    }

    #[test]
    fn payload_layout_follows_field_order() {
        let bytes = PhotoSizeSource::sticker_set_thumbnail(7, -1).to_bytes();
        assert_eq!(bytes.len(), 4 + 8 + 8);
        assert_eq!(bytes[4..12], 7i64.to_le_bytes());
        assert_eq!(bytes[12..20], (-1i64).to_le_bytes());
    }

    #[test]
    fn unknown_discriminant_is_rejected() {
        let mut bytes = 4i32.to_bytes();
        bytes.extend(0i64.to_bytes());
        assert_eq!(
            PhotoSizeSource::from_bytes(&bytes),
            Err(Error::UnknownVariant { id: 4 })
        );
    }

    #[test]
    fn wrong_variant_access_is_reported() {
        let source = PhotoSizeSource::thumbnail(FileType::Video, 'm' as i32);
        assert_eq!(
            source.try_dialog_photo(),
            Err(InvalidVariantAccess {
                expected: PhotoSizeSource::DIALOG_PHOTO,
                found: PhotoSizeSource::THUMBNAIL,
            })
        );
        assert_eq!(
            StickerSetThumbnail::try_from(source).map(|_| ()),
            Err(InvalidVariantAccess {
                expected: PhotoSizeSource::STICKER_SET_THUMBNAIL,
                found: PhotoSizeSource::THUMBNAIL,
            })
        );
    }

    #[test]
    fn file_type_follows_variant() {
        assert_eq!(PhotoSizeSource::Empty.file_type(), None);
        assert_eq!(
            PhotoSizeSource::thumbnail(FileType::Video, 0).file_type(),
            Some(FileType::Video)
        );
        assert_eq!(
            PhotoSizeSource::dialog_photo(DialogId::chat(1), 0, true).file_type(),
            Some(FileType::ProfilePhoto)
        );
        assert_eq!(
            PhotoSizeSource::sticker_set_thumbnail(1, 1).file_type(),
            Some(FileType::Thumbnail)
        );
    }

    #[test]
    fn input_peer_matches_dialog_kind() {
        let user = DialogPhotoSource {
            dialog_id: DialogId::user(UserId::new(5)),
            dialog_access_hash: 9,
            is_big: false,
        };
        assert_eq!(
            user.input_peer(),
            raw::InputPeer::User {
                user_id: 5,
                access_hash: 9
            }
        );

        let channel = DialogPhotoSource {
            dialog_id: DialogId::channel(5),
            ..user
        };
        assert_eq!(
            channel.input_peer(),
            raw::InputPeer::Channel {
                channel_id: 5,
                access_hash: 9
            }
        );

        let invalid = DialogPhotoSource {
            dialog_id: DialogId::default(),
            ..user
        };
        assert_eq!(invalid.input_peer(), raw::InputPeer::Empty);
    }
}
