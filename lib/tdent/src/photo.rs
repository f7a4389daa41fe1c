// Copyright 2024 - developers of the `tdent` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

use log::{debug, trace};
use tdent_codec::deserialize::{Buffer, Result};
use tdent_codec::{Deserializable, FlagReader, FlagWriter, Serializable};

use crate::files::FileId;
use crate::photo_size::{PhotoSize, PhotoSizes};

/// A photo, in every resolution the server offers it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "impl-serde",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub struct Photo {
    pub id: i64,
    pub date: i32,
    /// Stripped JPEG preview, or empty. See [`crate::minithumbnail`].
    #[cfg_attr(feature = "impl-serde", serde(with = "serde_bytes"))]
    pub minithumbnail: Vec<u8>,
    /// Sizes in the order the server sent them.
    pub sizes: Vec<PhotoSize>,
    /// Whether stickers were drawn on the photo.
    pub has_stickers: bool,
    /// Handles of the stickers drawn on the photo. Only meaningful, and only
    /// persisted, while `has_stickers` is set; a photo without the flag
    /// always reads back with no sticker handles.
    pub sticker_file_ids: Vec<FileId>,
}

impl Default for Photo {
    fn default() -> Self {
        Self {
            id: Self::EMPTY_ID,
            date: 0,
            minithumbnail: Vec::new(),
            sizes: Vec::new(),
            has_stickers: false,
            sticker_file_ids: Vec::new(),
        }
    }
}

impl Photo {
    /// Identifier marking a photo that doesn't exist.
    pub const EMPTY_ID: i64 = -2;

    pub fn new(id: i64, date: i32) -> Self {
        Self {
            id,
            date,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id == Self::EMPTY_ID
    }

    /// Removes the first thumbnail-sized (`'t'`) entry, if any.
    pub fn delete_thumbnail(&mut self) {
        if let Some(pos) = self.sizes.iter().position(|size| size.ty == b't') {
            self.sizes.remove(pos);
        }
    }

    /// Every file the photo refers to: its sizes, then its stickers.
    pub fn file_ids(&self) -> Vec<FileId> {
        self.sizes
            .iter()
            .map(|size| size.file_id)
            .chain(self.sticker_file_ids.iter().copied())
            .collect()
    }

    pub fn largest(&self) -> Option<&PhotoSize> {
        self.sizes.largest()
    }

    pub fn smallest(&self) -> Option<&PhotoSize> {
        self.sizes.smallest()
    }
}

impl fmt::Display for Photo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[id = {}, photos = [", self.id)?;
        for (i, size) in self.sizes.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", size)?;
        }
        write!(f, "]]")
    }
}

impl Serializable for Photo {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        trace!("storing photo {} with {} sizes", self.id, self.sizes.len());
        let has_minithumbnail = !self.minithumbnail.is_empty();
        FlagWriter::new()
            .flag(self.has_stickers)
            .flag(has_minithumbnail)
            .serialize(buf);
        self.id.serialize(buf);
        self.date.serialize(buf);
        self.sizes.serialize(buf);
        if self.has_stickers {
            self.sticker_file_ids.serialize(buf);
        }
        if has_minithumbnail {
            self.minithumbnail.serialize(buf);
        }
    }
}

impl Deserializable for Photo {
    fn deserialize(buf: Buffer) -> Result<Self> {
        let mut flags = FlagReader::deserialize(buf)?;
        let has_stickers = flags.flag();
        let has_minithumbnail = flags.flag();
        if flags.unknown() != 0 {
            debug!("ignoring unknown photo flags {:#x}", flags.unknown());
        }

        let id = i64::deserialize(buf)?;
        let date = i32::deserialize(buf)?;
        let sizes = Vec::<PhotoSize>::deserialize(buf)?;
        let sticker_file_ids = if has_stickers {
            Vec::<FileId>::deserialize(buf)?
        } else {
            Vec::new()
        };
        let minithumbnail = if has_minithumbnail {
            Vec::<u8>::deserialize(buf)?
        } else {
            Vec::new()
        };
        trace!("loaded photo {} with {} sizes", id, sizes.len());

        Ok(Self {
            id,
            date,
            minithumbnail,
            sizes,
            has_stickers,
            sticker_file_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimensions::Dimensions;

    fn size(ty: u8, side: i32, file_id: i32) -> PhotoSize {
        PhotoSize {
            ty,
            dimensions: Dimensions::new(side, side),
            size: side * 100,
            file_id: FileId::new(file_id),
        }
    }

    fn photo() -> Photo {
        Photo {
            sizes: vec![size(b's', 90, 1), size(b't', 10, 2), size(b'x', 800, 3)],
            ..Photo::new(5, 1600000000)
        }
    }

    #[test]
    fn default_photo_is_empty() {
        assert!(Photo::default().is_empty());
        assert!(!photo().is_empty());
    }

    #[test]
    fn layout_without_optional_fields() {
        let bytes = Photo::new(1, 2).to_bytes();
        // flags, id, date, boxed empty vector.
        assert_eq!(bytes.len(), 4 + 8 + 4 + 8);
        assert_eq!(bytes[..4], [0, 0, 0, 0]);
    }

    #[test]
    fn sticker_handles_are_stored_only_when_flagged() {
        let mut value = photo();
        value.sticker_file_ids = vec![FileId::new(9)];
        let decoded = Photo::from_bytes(&value.to_bytes()).unwrap();
        assert!(decoded.sticker_file_ids.is_empty());

        value.has_stickers = true;
        assert_eq!(Photo::from_bytes(&value.to_bytes()), Ok(value));
    }

    #[test]
    fn minithumbnail_round_trip() {
        let value = Photo {
            minithumbnail: vec![1, 2, 3, 4, 5],
            ..photo()
        };
        let bytes = value.to_bytes();
        assert_eq!(bytes[0], 0b10);
        assert_eq!(Photo::from_bytes(&bytes), Ok(value));
    }

    #[test]
    fn delete_thumbnail_removes_first_match() {
        let mut value = photo();
        value.sizes.push(size(b't', 11, 4));
        value.delete_thumbnail();
        assert_eq!(
            value.sizes.iter().map(|s| s.ty).collect::<Vec<_>>(),
            [b's', b'x', b't']
        );
    }

    #[test]
    fn file_ids_list_sizes_then_stickers() {
        let value = Photo {
            has_stickers: true,
            sticker_file_ids: vec![FileId::new(7)],
            ..photo()
        };
        assert_eq!(
            value.file_ids(),
            [1, 2, 3, 7].map(FileId::new).to_vec()
        );
        assert_eq!(value.largest().map(|s| s.file_id), Some(FileId::new(3)));
        assert_eq!(value.smallest().map(|s| s.file_id), Some(FileId::new(2)));
    }
}
