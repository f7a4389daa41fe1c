// Copyright 2024 - developers of the `tdent` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

use chrono::{DateTime, Utc};
use log::{debug, warn};
use tdent_codec::deserialize::{Buffer, Result};
use tdent_codec::{Deserializable, FlagReader, FlagWriter, Serializable};

use crate::ids::UserId;
use crate::raw;

/// Dates below this are certainly wrong, and treated as missing.
const MIN_DATE: i32 = 1000000;

/// An invite link to a conversation.
///
/// Optional values are stored as 0 when absent, matching how they are
/// persisted: a zero expiration date, usage limit or usage count is never
/// written.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "impl-serde",
    derive(serde_derive::Serialize, serde_derive::Deserialize)
)]
pub struct DialogInviteLink {
    invite_link: String,
    administrator_user_id: UserId,
    date: i32,
    expire_date: i32,
    usage_limit: i32,
    usage_count: i32,
    is_revoked: bool,
    is_permanent: bool,
}

impl DialogInviteLink {
    pub fn new(invite_link: impl Into<String>, administrator_user_id: UserId, date: i32) -> Self {
        Self {
            invite_link: invite_link.into(),
            administrator_user_id,
            date,
            ..Self::default()
        }
    }

    /// Sets the expiration date, or removes it if `expire_date` is 0.
    pub fn with_expire_date(mut self, expire_date: i32) -> Self {
        self.expire_date = expire_date;
        self
    }

    /// Sets the usage limit, or removes it if `usage_limit` is 0.
    pub fn with_usage_limit(mut self, usage_limit: i32) -> Self {
        self.usage_limit = usage_limit;
        self
    }

    pub fn with_usage_count(mut self, usage_count: i32) -> Self {
        self.usage_count = usage_count;
        self
    }

    pub fn with_revoked(mut self, is_revoked: bool) -> Self {
        self.is_revoked = is_revoked;
        self
    }

    pub fn with_permanent(mut self, is_permanent: bool) -> Self {
        self.is_permanent = is_permanent;
        self
    }

    pub fn invite_link(&self) -> &str {
        &self.invite_link
    }

    pub fn administrator_user_id(&self) -> UserId {
        self.administrator_user_id
    }

    pub fn date(&self) -> i32 {
        self.date
    }

    /// Creation date, if it is a representable point in time.
    pub fn date_time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(i64::from(self.date), 0)
    }

    pub fn expire_date(&self) -> Option<i32> {
        (self.expire_date != 0).then_some(self.expire_date)
    }

    pub fn usage_limit(&self) -> Option<i32> {
        (self.usage_limit != 0).then_some(self.usage_limit)
    }

    pub fn usage_count(&self) -> i32 {
        self.usage_count
    }

    pub fn is_revoked(&self) -> bool {
        self.is_revoked
    }

    pub fn is_permanent(&self) -> bool {
        self.is_permanent
    }

    pub fn is_valid(&self) -> bool {
        !self.invite_link.is_empty() && self.administrator_user_id.is_valid() && self.date > 0
    }

    /// Whether the link can no longer be used, as of now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp())
    }

    /// Whether the link can no longer be used at the given Unix time.
    pub fn is_expired_at(&self, now: i64) -> bool {
        (self.expire_date != 0 && i64::from(self.expire_date) <= now)
            || (self.usage_limit != 0 && self.usage_count >= self.usage_limit)
    }

    /// Seconds left until the link expires by date, or `None` if it never
    /// will (either because it has no expiration date or because it has
    /// already run out of uses).
    pub fn expires_in(&self, now: i64) -> Option<i64> {
        if self.expire_date == 0 {
            return None;
        }
        if self.usage_limit != 0 && self.usage_count >= self.usage_limit {
            return None;
        }
        Some((i64::from(self.expire_date) - now).max(0))
    }
}

impl From<raw::ChatInviteExported> for DialogInviteLink {
    fn from(exported: raw::ChatInviteExported) -> Self {
        let mut administrator_user_id = UserId::new(exported.admin_id);
        if !administrator_user_id.is_valid() {
            warn!(
                "receive invalid {} as creator of link {}",
                administrator_user_id, exported.link
            );
            administrator_user_id = UserId::default();
        }

        let mut date = exported.date;
        if date != 0 && date < MIN_DATE {
            warn!("receive wrong date {} as creation date of {}", date, exported.link);
            date = 0;
        }

        let mut expire_date = exported.expire_date.unwrap_or(0);
        if expire_date != 0 && expire_date < MIN_DATE {
            warn!(
                "receive wrong date {} as expire date of {}",
                expire_date, exported.link
            );
            expire_date = 0;
        }

        let mut usage_limit = exported.usage_limit.unwrap_or(0);
        if usage_limit < 0 {
            warn!("receive wrong usage limit {} for {}", usage_limit, exported.link);
            usage_limit = 0;
        }

        let mut usage_count = exported.usage.unwrap_or(0);
        if usage_count < 0 {
            warn!("receive wrong usage count {} for {}", usage_count, exported.link);
            usage_count = 0;
        }

        Self {
            invite_link: exported.link,
            administrator_user_id,
            date,
            expire_date,
            usage_limit,
            usage_count,
            is_revoked: exported.revoked,
            is_permanent: exported.permanent,
        }
    }
}

impl fmt::Display for DialogInviteLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ChatInviteLink[{} by {} created at {}",
            self.invite_link, self.administrator_user_id, self.date
        )?;
        if self.expire_date != 0 {
            write!(f, " expiring at {}", self.expire_date)?;
        }
        if self.usage_limit != 0 {
            write!(f, " with usage limit {}", self.usage_limit)?;
        }
        write!(f, " used by {} users", self.usage_count)?;
        if self.is_permanent {
            write!(f, " permanent")?;
        }
        if self.is_revoked {
            write!(f, " revoked")?;
        }
        write!(f, "]")
    }
}

impl Serializable for DialogInviteLink {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        let has_expire_date = self.expire_date != 0;
        let has_usage_limit = self.usage_limit != 0;
        let has_usage_count = self.usage_count != 0;
        FlagWriter::new()
            .flag(self.is_revoked)
            .flag(self.is_permanent)
            .flag(has_expire_date)
            .flag(has_usage_limit)
            .flag(has_usage_count)
            .serialize(buf);
        self.invite_link.serialize(buf);
        self.administrator_user_id.serialize(buf);
        self.date.serialize(buf);
        if has_expire_date {
            self.expire_date.serialize(buf);
        }
        if has_usage_limit {
            self.usage_limit.serialize(buf);
        }
        if has_usage_count {
            self.usage_count.serialize(buf);
        }
    }
}

impl Deserializable for DialogInviteLink {
    fn deserialize(buf: Buffer) -> Result<Self> {
        let mut flags = FlagReader::deserialize(buf)?;
        let is_revoked = flags.flag();
        let is_permanent = flags.flag();
        let has_expire_date = flags.flag();
        let has_usage_limit = flags.flag();
        let has_usage_count = flags.flag();
        if flags.unknown() != 0 {
            debug!("ignoring unknown invite link flags {:#x}", flags.unknown());
        }

        let invite_link = String::deserialize(buf)?;
        let administrator_user_id = UserId::deserialize(buf)?;
        let date = i32::deserialize(buf)?;
        let expire_date = if has_expire_date {
            i32::deserialize(buf)?
        } else {
            0
        };
        let usage_limit = if has_usage_limit {
            i32::deserialize(buf)?
        } else {
            0
        };
        let usage_count = if has_usage_count {
            i32::deserialize(buf)?
        } else {
            0
        };

        Ok(Self {
            invite_link,
            administrator_user_id,
            date,
            expire_date,
            usage_limit,
            usage_count,
            is_revoked,
            is_permanent,
        })
    }
}
