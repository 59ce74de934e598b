//! Platform identifiers.
//!
//! Chat platforms identify users, channels, roles and communities by stable
//! 64-bit snowflakes. Each kind gets its own newtype so a role ID can never be
//! passed where a channel is expected.

use serde::{Deserialize, Serialize};

macro_rules! snowflake {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Serialize,
            Deserialize,
            derive_more::Display,
            derive_more::From,
        )]
        #[serde(transparent)]
        #[display("{}", _0)]
        pub struct $name(pub u64);

        impl $name {
            /// Raw snowflake value.
            pub fn get(self) -> u64 {
                self.0
            }
        }
    };
}

snowflake!(
    /// A user (administrator, target user, or joining member).
    UserId
);
snowflake!(
    /// A text channel.
    ChannelId
);
snowflake!(
    /// A role within a community.
    RoleId
);
snowflake!(
    /// A community (guild).
    GuildId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_raw_snowflake() {
        assert_eq!(UserId(1073863060843937812).to_string(), "1073863060843937812");
        assert_eq!(RoleId::from(7).get(), 7);
    }
}
