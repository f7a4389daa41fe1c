// Copyright 2024 - developers of the `tdent` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

use tdent_codec::deserialize::{Buffer, Result};
use tdent_codec::{Deserializable, Serializable};

use crate::files::FileId;

/// The avatar of a conversation, in its small and big resolutions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "impl-serde",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub struct DialogPhoto {
    pub small_file_id: FileId,
    pub big_file_id: FileId,
}

impl DialogPhoto {
    /// The valid handles, small first.
    pub fn file_ids(&self) -> Vec<FileId> {
        [self.small_file_id, self.big_file_id]
            .into_iter()
            .filter(|file_id| file_id.is_valid())
            .collect()
    }
}

impl fmt::Display for DialogPhoto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<small_file_id = {}, big_file_id = {}>", self.small_file_id, self.big_file_id)
    }
}

impl Serializable for DialogPhoto {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        self.small_file_id.serialize(buf);
        self.big_file_id.serialize(buf);
    }
}

impl Deserializable for DialogPhoto {
    fn deserialize(buf: Buffer) -> Result<Self> {
        let small_file_id = FileId::deserialize(buf)?;
        let big_file_id = FileId::deserialize(buf)?;
        Ok(Self {
            small_file_id,
            big_file_id,
        })
    }
}

/// The avatar of a user, which also carries the identifier of the photo it
/// was cropped from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "impl-serde",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub struct ProfilePhoto {
    pub id: i64,
    pub photo: DialogPhoto,
}

impl ProfilePhoto {
    pub fn file_ids(&self) -> Vec<FileId> {
        self.photo.file_ids()
    }
}

impl fmt::Display for ProfilePhoto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<id = {}, photo = {}>", self.id, self.photo)
    }
}

impl Serializable for ProfilePhoto {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        self.photo.serialize(buf);
        self.id.serialize(buf);
    }
}

impl Deserializable for ProfilePhoto {
    fn deserialize(buf: Buffer) -> Result<Self> {
        let photo = DialogPhoto::deserialize(buf)?;
        let id = i64::deserialize(buf)?;
        Ok(Self { id, photo })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_ids_skip_missing_handles() {
        let photo = DialogPhoto {
            small_file_id: FileId::new(3),
            big_file_id: FileId::default(),
        };
        assert_eq!(photo.file_ids(), [FileId::new(3)]);
        assert!(DialogPhoto::default().file_ids().is_empty());
    }

    #[test]
    fn profile_photo_appends_id() {
        let photo = ProfilePhoto {
            id: 99,
            photo: DialogPhoto {
                small_file_id: FileId::new(1),
                big_file_id: FileId::new(2),
            },
        };
        let bytes = photo.to_bytes();
        assert_eq!(bytes[..8], DialogPhoto::to_bytes(&photo.photo)[..]);
        assert_eq!(bytes[8..], 99i64.to_le_bytes());
        assert_eq!(ProfilePhoto::from_bytes(&bytes), Ok(photo));
    }
}
