// Copyright 2024 - developers of the `tdent` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Presence bitmasks for optional fields.
//!
//! A record registers its conditions in a fixed order; the `i`-th condition
//! becomes bit `i` of a single 32-bit word written before the fields it
//! guards. Reading walks the bits in the same order. A clear bit always means
//! the field is absent, never "present with a default".
//!
//! Bits beyond the ones a record registers are not an error: a newer version
//! may have appended optional fields this one doesn't know about. Readers
//! ignore them (see [`FlagReader::unknown`]), and since their fields are not
//! decoded, writers never set them again. A re-encoded record is always
//! self-consistent, at the cost of dropping the fields it didn't understand.
use crate::deserialize::{Buffer, Deserializable, Error, Result};
use crate::serializable::Serializable;

/// Maximum amount of conditions a single flags word can hold.
pub const MAX_FLAGS: u32 = u32::BITS;

fn known_mask(count: u32) -> u32 {
    if count >= MAX_FLAGS {
        u32::MAX
    } else {
        (1 << count) - 1
    }
}

/// Builds a flags word, one condition at a time.
///
/// # Examples
///
/// ```
/// use tdent_codec::FlagWriter;
///
/// let flags = FlagWriter::new().flag(false).flag(true).flag(true).finish();
/// assert_eq!(flags, 0b110);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlagWriter {
    flags: u32,
    count: u32,
}

impl FlagWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the next condition.
    ///
    /// Panics if more than [`MAX_FLAGS`] conditions are registered, which
    /// can only happen if a record declares too many optional fields.
    pub fn flag(mut self, value: bool) -> Self {
        assert!(
            self.count < MAX_FLAGS,
            "cannot register more than {} flags",
            MAX_FLAGS
        );
        if value {
            self.flags |= 1 << self.count;
        }
        self.count += 1;
        self
    }

    /// Amount of conditions registered so far.
    pub fn len(&self) -> u32 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn finish(self) -> u32 {
        self.flags
    }
}

impl Serializable for FlagWriter {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        self.finish().serialize(buf)
    }
}

/// Reads back a flags word, one condition at a time, in the order used
/// by the [`FlagWriter`] that produced it.
///
/// # Examples
///
/// ```
/// use tdent_codec::{Deserializable, FlagReader};
///
/// let mut flags = FlagReader::from_bytes(&[0b101, 0, 0, 0]).unwrap();
/// assert!(flags.flag());
/// assert!(!flags.flag());
/// assert!(flags.flag());
/// assert_eq!(flags.unknown(), 0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlagReader {
    flags: u32,
    count: u32,
}

impl FlagReader {
    pub fn new(flags: u32) -> Self {
        Self { flags, count: 0 }
    }

    /// Reads the next condition.
    ///
    /// Panics if more than [`MAX_FLAGS`] conditions are read.
    pub fn flag(&mut self) -> bool {
        assert!(
            self.count < MAX_FLAGS,
            "cannot read more than {} flags",
            MAX_FLAGS
        );
        let set = (self.flags & (1 << self.count)) != 0;
        self.count += 1;
        set
    }

    /// The bits set beyond the conditions read so far.
    pub fn unknown(&self) -> u32 {
        self.flags & !known_mask(self.count)
    }

    /// Strict alternative to ignoring unknown bits: fails if any bit beyond
    /// the conditions read so far is set.
    pub fn reject_unknown(&self) -> Result<()> {
        if self.unknown() != 0 {
            Err(Error::MalformedFlags { flags: self.flags })
        } else {
            Ok(())
        }
    }
}

impl Deserializable for FlagReader {
    fn deserialize(buf: Buffer) -> Result<Self> {
        Ok(Self::new(u32::deserialize(buf)?))
    }
}
