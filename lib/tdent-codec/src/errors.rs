// Copyright 2024 - developers of the `tdent` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors that are not tied to decoding bytes. Decoding failures live in
//! [`crate::deserialize::Error`].
use std::error::Error;
use std::fmt;

/// The error type indicating a tagged union holds a different variant than
/// the one whose payload was requested.
///
/// This is a violation of the calling code's contract, not a property of the
/// data: correct code checks the discriminant (or matches) before reaching
/// for a payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidVariantAccess {
    /// Discriminant of the variant that was requested.
    pub expected: i32,
    /// Discriminant of the variant actually held.
    pub found: i32,
}

impl Error for InvalidVariantAccess {}

impl fmt::Display for InvalidVariantAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "requested variant {} but variant {} is active",
            self.expected, self.found
        )
    }
}
