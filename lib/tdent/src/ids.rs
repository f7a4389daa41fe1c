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

/// Identifier of a user or bot account.
///
/// Any 64-bit value can be held, so that persisted data is never rejected,
/// but only identifiers in Telegram's user range are [`UserId::is_valid`].
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "impl-serde",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub struct UserId(i64);

impl UserId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(self) -> i64 {
        self.0
    }

    pub fn is_valid(self) -> bool {
        // https://core.telegram.org/api/bots/ids#user-ids
        1 <= self.0 && self.0 <= 0xffffffffff
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user {}", self.0)
    }
}

impl Serializable for UserId {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        self.0.serialize(buf)
    }
}

impl Deserializable for UserId {
    fn deserialize(buf: Buffer) -> Result<Self> {
        Ok(Self(i64::deserialize(buf)?))
    }
}

/// [`DialogId`]'s kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DialogKind {
    /// A private conversation with a user or bot.
    User,
    /// A small group chat.
    Chat,
    /// A broadcast channel, megagroup or gigagroup.
    Channel,
}

/// Identifier of any conversation.
///
/// The internal representation uses the Bot API Dialog ID format, which
/// bit-packs both the bare identifier and the [`DialogKind`] in a single
/// integer. Values outside every range are kept as-is and reported as
/// invalid.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "impl-serde",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub struct DialogId(i64);

const CHANNEL_OFFSET: i64 = 1000000000000;

impl DialogId {
    /// Creates a dialog identity for a private conversation.
    pub fn user(user_id: UserId) -> Self {
        if !user_id.is_valid() {
            panic!("user ID out of range");
        }
        Self(user_id.get())
    }

    /// Creates a dialog identity for a small group chat.
    pub fn chat(id: i64) -> Self {
        // https://core.telegram.org/api/bots/ids#chat-ids
        if !(1..=999999999999).contains(&id) {
            panic!("chat ID out of range");
        }
        Self(-id)
    }

    /// Creates a dialog identity for a channel of any flavor.
    pub fn channel(id: i64) -> Self {
        // https://core.telegram.org/api/bots/ids#supergroup-channel-ids
        if !((1..=997852516352).contains(&id) || (1002147483649..=3000000000000).contains(&id)) {
            panic!("channel ID out of range");
        }
        Self(-(CHANNEL_OFFSET + id))
    }

    /// Reinterprets a value in the Bot API Dialog ID format without checks.
    pub fn from_bot_api(id: i64) -> Self {
        Self(id)
    }

    pub fn bot_api_dialog_id(self) -> i64 {
        self.0
    }

    /// Dialog kind, or `None` if the identifier is in no known range.
    pub fn kind(self) -> Option<DialogKind> {
        let id = self.0;
        if (1..=0xffffffffff).contains(&id) {
            Some(DialogKind::User)
        } else if (-999999999999..=-1).contains(&id) {
            Some(DialogKind::Chat)
        } else if (-1997852516352..=-1000000000001).contains(&id)
            || (-4000000000000..=-2002147483649).contains(&id)
        {
            Some(DialogKind::Channel)
        } else {
            None
        }
    }

    pub fn is_valid(self) -> bool {
        self.kind().is_some()
    }

    /// Unpacked identifier, or `None` if the identifier is invalid.
    pub fn bare_id(self) -> Option<i64> {
        self.kind().map(|kind| match kind {
            DialogKind::User => self.0,
            DialogKind::Chat => -self.0,
            DialogKind::Channel => -self.0 - CHANNEL_OFFSET,
        })
    }

    /// The user on the other side of a private conversation.
    pub fn user_id(self) -> Option<UserId> {
        match self.kind() {
            Some(DialogKind::User) => Some(UserId(self.0)),
            _ => None,
        }
    }
}

impl From<UserId> for DialogId {
    fn from(user_id: UserId) -> Self {
        Self::user(user_id)
    }
}

impl fmt::Display for DialogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            Some(DialogKind::User) => write!(f, "user {}", self.0),
            Some(DialogKind::Chat) => write!(f, "chat {}", self.0),
            Some(DialogKind::Channel) => write!(f, "channel {}", self.0),
            None => write!(f, "invalid dialog {}", self.0),
        }
    }
}

impl Serializable for DialogId {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        self.0.serialize(buf)
    }
}

impl Deserializable for DialogId {
    fn deserialize(buf: Buffer) -> Result<Self> {
        Ok(Self(i64::deserialize(buf)?))
    }
}
