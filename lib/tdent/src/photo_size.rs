// Copyright 2024 - developers of the `tdent` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::cmp::Ordering;
use std::fmt;

use log::warn;
use tdent_codec::deserialize::{Buffer, Result};
use tdent_codec::{Deserializable, Serializable};

use crate::dimensions::Dimensions;
use crate::files::FileId;

/// Size-class tags, from the lowest to the highest precedence.
///
/// Tags that are not listed rank above all of these, by byte value.
const TYPE_PRECEDENCE: &[u8] = b"\0itsambcxydw";

fn type_rank(ty: u8) -> u16 {
    match TYPE_PRECEDENCE.iter().position(|&t| t == ty) {
        Some(pos) => pos as u16,
        None => TYPE_PRECEDENCE.len() as u16 + u16::from(ty),
    }
}

/// One resolution of an image.
///
/// Sizes are ordered by pixel area first, so that the largest and smallest
/// can be picked deterministically. Sizes with equal areas are ordered by
/// their size-class tag, and then by every other field, so the order is
/// total.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "impl-serde",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub struct PhotoSize {
    /// Size-class tag, such as `b's'` or `b'x'`, or 0 if unknown.
    pub ty: u8,
    pub dimensions: Dimensions,
    /// Size of the content in bytes, if known.
    pub size: i32,
    pub file_id: FileId,
}

impl PhotoSize {
    /// The size-class tag as a character, if there is one.
    pub fn type_char(&self) -> Option<char> {
        (self.ty != 0).then_some(char::from(self.ty))
    }
}

impl Ord for PhotoSize {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dimensions
            .area()
            .cmp(&other.dimensions.area())
            .then_with(|| type_rank(self.ty).cmp(&type_rank(other.ty)))
            .then_with(|| self.dimensions.width.cmp(&other.dimensions.width))
            .then_with(|| self.dimensions.height.cmp(&other.dimensions.height))
            .then_with(|| self.size.cmp(&other.size))
            .then_with(|| self.file_id.cmp(&other.file_id))
    }
}

impl PartialOrd for PhotoSize {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PhotoSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{type = ")?;
        match self.type_char() {
            Some(ty) => write!(f, "{}", ty)?,
            None => write!(f, "0")?,
        }
        write!(
            f,
            ", dimensions = {}, size = {}, file_id = {}}}",
            self.dimensions, self.size, self.file_id
        )
    }
}

impl Serializable for PhotoSize {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        i32::from(self.ty).serialize(buf);
        self.dimensions.serialize(buf);
        self.size.serialize(buf);
        self.file_id.serialize(buf);
    }
}

impl Deserializable for PhotoSize {
    fn deserialize(buf: Buffer) -> Result<Self> {
        let ty = i32::deserialize(buf)?;
        let dimensions = Dimensions::deserialize(buf)?;
        let size = i32::deserialize(buf)?;
        let file_id = FileId::deserialize(buf)?;
        let ty = u8::try_from(ty).unwrap_or_else(|_| {
            warn!("dropping wrong photo size type {}", ty);
            0
        });
        Ok(Self {
            ty,
            dimensions,
            size,
            file_id,
        })
    }
}

/// Selection helpers over a sequence of sizes.
pub trait PhotoSizes {
    /// The greatest size by the total order of [`PhotoSize`].
    fn largest(&self) -> Option<&PhotoSize>;

    /// The least size by the total order of [`PhotoSize`].
    fn smallest(&self) -> Option<&PhotoSize>;

    /// The sizes in ascending order.
    fn sorted(&self) -> Vec<PhotoSize>;
}

impl PhotoSizes for [PhotoSize] {
    fn largest(&self) -> Option<&PhotoSize> {
        self.iter().max()
    }

    fn smallest(&self) -> Option<&PhotoSize> {
        self.iter().min()
    }

    fn sorted(&self) -> Vec<PhotoSize> {
        let mut sizes = self.to_vec();
        sizes.sort();
        sizes
    }
}
