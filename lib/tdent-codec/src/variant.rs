// Copyright 2024 - developers of the `tdent` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tagged unions: a 32-bit discriminant followed by the payload of the
//! active variant only.
//!
//! Discriminants are identifiers, not positions. Persisted records outlive
//! the code that wrote them, so a discriminant must never be renumbered or
//! reused once it has been written.
use crate::deserialize::{Buffer, Deserializable, Error, Result};
use crate::serializable::Serializable;

/// A closed set of payload types selected by a stable discriminant.
pub trait Variant: Sized {
    /// Every discriminant this type is able to decode.
    const DISCRIMINANTS: &'static [i32];

    /// Discriminant of the variant currently held.
    fn discriminant(&self) -> i32;

    /// Appends the payload of the variant currently held, without the
    /// discriminant.
    fn serialize_payload(&self, buf: &mut impl Extend<u8>);

    /// Reads the payload selected by `discriminant`. Only called with a
    /// value from [`Variant::DISCRIMINANTS`].
    fn deserialize_payload(discriminant: i32, buf: Buffer) -> Result<Self>;
}

/// Whether `discriminant` selects a known variant of `V`.
pub fn is_known<V: Variant>(discriminant: i32) -> bool {
    V::DISCRIMINANTS.contains(&discriminant)
}

/// Writes the discriminant of `value` followed by its payload.
pub fn serialize<V: Variant>(value: &V, buf: &mut impl Extend<u8>) {
    value.discriminant().serialize(buf);
    value.serialize_payload(buf);
}

/// Reads a discriminant and the payload it selects.
///
/// Fails with [`Error::UnknownVariant`] without reading any payload if the
/// discriminant is not part of the closed set.
pub fn deserialize<V: Variant>(buf: Buffer) -> Result<V> {
    let id = i32::deserialize(buf)?;
    if !is_known::<V>(id) {
        return Err(Error::UnknownVariant { id });
    }
    V::deserialize_payload(id, buf)
}
