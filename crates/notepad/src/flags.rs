//! crates/notepad/src/flags.rs
//! Annotation flags controlling what precedes each rendered message.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

/// Bitset selecting the metadata written in front of every message.
///
/// The bit values follow the conventional set used by line-oriented loggers.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FormatFlags(u32);

impl FormatFlags {
    /// Local date: `2009/01/23`.
    ///
    /// The local offset comes from [`time::OffsetDateTime::now_local`], which
    /// refuses to answer once the process has more than one thread on some
    /// platforms. Lines are then stamped in UTC without further notice; set
    /// [`Self::UTC`] to make that choice explicit and stable.
    pub const DATE: Self = Self(1);
    /// Local time: `01:23:23`.
    ///
    /// Falls back to UTC under the same conditions as [`Self::DATE`].
    pub const TIME: Self = Self(1 << 1);
    /// Microsecond resolution: `01:23:23.123123`. Implies [`Self::TIME`].
    pub const MICROSECONDS: Self = Self(1 << 2);
    /// Full source path and line: `/a/b/c/main.rs:23`.
    pub const LONG_FILE: Self = Self(1 << 3);
    /// Final path component and line: `main.rs:23`. Overrides [`Self::LONG_FILE`].
    pub const SHORT_FILE: Self = Self(1 << 4);
    /// Render date and time in UTC instead of the local offset.
    pub const UTC: Self = Self(1 << 5);
    /// Move the notepad prefix from the start of the line to just before the message.
    pub const MSG_PREFIX: Self = Self(1 << 6);
    /// Date and time, the default for a fresh notepad.
    pub const STD: Self = Self(Self::DATE.0 | Self::TIME.0);

    const NAMES: [(&'static str, Self); 7] = [
        ("date", Self::DATE),
        ("time", Self::TIME),
        ("microseconds", Self::MICROSECONDS),
        ("longfile", Self::LONG_FILE),
        ("shortfile", Self::SHORT_FILE),
        ("utc", Self::UTC),
        ("msgprefix", Self::MSG_PREFIX),
    ];

    /// No annotations.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Builds flags from raw bits, dropping unknown ones.
    #[must_use]
    pub const fn from_bits_truncate(bits: u32) -> Self {
        Self(bits & 0x7f)
    }

    /// Returns the raw bit value.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Reports whether every bit of `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Reports whether no bit is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Reports whether a wall-clock timestamp is rendered.
    #[must_use]
    pub const fn wants_timestamp(self) -> bool {
        self.0 & (Self::DATE.0 | Self::TIME.0 | Self::MICROSECONDS.0) != 0
    }

    /// Reports whether the caller's source location is rendered.
    #[must_use]
    pub const fn wants_location(self) -> bool {
        self.0 & (Self::LONG_FILE.0 | Self::SHORT_FILE.0) != 0
    }
}

impl BitOr for FormatFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for FormatFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for FormatFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FormatFlags({self})")
    }
}

impl fmt::Display for FormatFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let mut first = true;
        for (name, flag) in Self::NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str(",")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Error returned when a flag list names an unknown annotation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown format flag '{0}'")]
pub struct ParseFlagsError(pub String);

impl FromStr for FormatFlags {
    type Err = ParseFlagsError;

    /// Parses a comma separated list such as `date,time,shortfile`.
    ///
    /// `std` expands to `date,time`; `none` or an empty string yields no flags.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut flags = Self::empty();
        for token in s.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let token = token.to_ascii_lowercase();
            match token.as_str() {
                "std" => flags |= Self::STD,
                "none" => {}
                name => {
                    let (_, flag) = Self::NAMES
                        .iter()
                        .find(|(candidate, _)| *candidate == name)
                        .ok_or_else(|| ParseFlagsError(token.clone()))?;
                    flags |= *flag;
                }
            }
        }
        Ok(flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn std_is_date_and_time() {
        assert!(FormatFlags::STD.contains(FormatFlags::DATE));
        assert!(FormatFlags::STD.contains(FormatFlags::TIME));
        assert_eq!(FormatFlags::STD.bits(), 3);
    }

    #[test]
    fn parse_list_combines_flags() {
        let flags: FormatFlags = "date, shortfile".parse().expect("valid list");
        assert_eq!(flags, FormatFlags::DATE | FormatFlags::SHORT_FILE);
        assert!(flags.wants_timestamp());
        assert!(flags.wants_location());
    }

    #[test]
    fn parse_none_and_empty_yield_no_flags() {
        assert_eq!("none".parse::<FormatFlags>(), Ok(FormatFlags::empty()));
        assert_eq!("".parse::<FormatFlags>(), Ok(FormatFlags::empty()));
    }

    #[test]
    fn parse_rejects_unknown_flag() {
        assert_eq!(
            "date,colour".parse::<FormatFlags>(),
            Err(ParseFlagsError("colour".to_owned()))
        );
    }

    #[test]
    fn display_lists_set_flags_in_bit_order() {
        let flags = FormatFlags::UTC | FormatFlags::DATE;
        assert_eq!(flags.to_string(), "date,utc");
        assert_eq!(FormatFlags::empty().to_string(), "none");
    }

    #[test]
    fn from_bits_truncate_drops_unknown_bits() {
        assert_eq!(FormatFlags::from_bits_truncate(0xff).bits(), 0x7f);
    }
}
