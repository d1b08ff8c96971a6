//! crates/notepad/src/line_mode.rs
//! Newline policy applied when a rendered message lacks a terminator.

/// Controls whether a rendered line is terminated when the message itself
/// does not end in a newline.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LineMode {
    /// Append `\n` to every line that does not already end with one.
    #[default]
    WithNewline,
    /// Emit the message exactly as formatted.
    ///
    /// Useful for progress output that a later write completes.
    WithoutNewline,
}

impl LineMode {
    /// Reports whether the mode terminates unterminated lines.
    ///
    /// # Examples
    ///
    /// ```
    /// use notepad::LineMode;
    ///
    /// assert!(LineMode::WithNewline.append_newline());
    /// assert!(!LineMode::WithoutNewline.append_newline());
    /// ```
    #[must_use]
    pub const fn append_newline(self) -> bool {
        matches!(self, Self::WithNewline)
    }
}

impl From<bool> for LineMode {
    /// `true` selects [`LineMode::WithNewline`], `false` [`LineMode::WithoutNewline`].
    fn from(append_newline: bool) -> Self {
        if append_newline {
            Self::WithNewline
        } else {
            Self::WithoutNewline
        }
    }
}

impl From<LineMode> for bool {
    fn from(mode: LineMode) -> Self {
        mode.append_newline()
    }
}

#[cfg(test)]
mod tests;
