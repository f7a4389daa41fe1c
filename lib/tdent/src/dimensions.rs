// Copyright 2024 - developers of the `tdent` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

use log::warn;
use tdent_codec::deserialize::{Buffer, Result};
use tdent_codec::{Deserializable, Serializable};

/// Width and height of an image, in pixels.
///
/// A pair with either side equal to zero means the dimensions are unknown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "impl-serde",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub struct Dimensions {
    pub width: u16,
    pub height: u16,
}

fn sanitize(value: i32, what: &str) -> u16 {
    match u16::try_from(value) {
        Ok(value) => value,
        Err(_) => {
            warn!("wrong image {}: {}", what, value);
            0
        }
    }
}

impl Dimensions {
    /// Builds dimensions from values received over the network.
    ///
    /// Sides that don't fit are dropped, and if any side ends up being zero,
    /// both are, so that unknown dimensions have a single representation.
    pub fn new(width: i32, height: i32) -> Self {
        let width = sanitize(width, "width");
        let height = sanitize(height, "height");
        if width == 0 || height == 0 {
            Self::default()
        } else {
            Self { width, height }
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Amount of pixels covered.
    pub fn area(&self) -> u32 {
        u32::from(self.width) * u32::from(self.height)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.width, self.height)
    }
}

impl Serializable for Dimensions {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        ((u32::from(self.width) << 16) | u32::from(self.height)).serialize(buf)
    }
}

impl Deserializable for Dimensions {
    fn deserialize(buf: Buffer) -> Result<Self> {
        let packed = u32::deserialize(buf)?;
        Ok(Self {
            width: (packed >> 16) as u16,
            height: (packed & 0xffff) as u16,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_sides_become_unknown() {
        assert_eq!(Dimensions::new(-1, 100), Dimensions::default());
        assert_eq!(Dimensions::new(100, 65536), Dimensions::default());
        assert_eq!(Dimensions::new(0, 100), Dimensions::default());
        assert_eq!(
            Dimensions::new(65535, 1),
            Dimensions {
                width: 65535,
                height: 1
            }
        );
    }

    #[test]
    fn packs_into_single_word() {
        let dimensions = Dimensions::new(320, 240);
        let bytes = dimensions.to_bytes();
        assert_eq!(bytes, ((320u32 << 16) | 240).to_le_bytes());
        assert_eq!(Dimensions::from_bytes(&bytes), Ok(dimensions));
    }

    #[test]
    fn area_does_not_overflow() {
        let dimensions = Dimensions::new(65535, 65535);
        assert_eq!(dimensions.area(), 65535 * 65535);
        assert_eq!(dimensions.to_string(), "(65535, 65535)");
    }
}
