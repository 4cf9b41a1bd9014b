//! Per-format codecs for retail records.
//!
//! Two line formats, one codec module each:
//! - [`new`] — delimited, human-readable export format (`.csv`)
//! - [`old`] — legacy fixed-width positional format (`.dat`)
//!
//! Both codecs go through the typed [`Record`](crate::record::Record)
//! model, so a conversion is always parse-then-render and the two
//! directions cannot drift apart.

pub mod new;
pub mod old;

/// Format enum for runtime format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Delimited new format.
    New,
    /// Fixed-width old format.
    Old,
}

impl Format {
    /// File extension conventionally used for this format.
    ///
    /// # Examples
    ///
    /// ```
    /// use parser::format::Format;
    ///
    /// assert_eq!(Format::New.extension(), "csv");
    /// assert_eq!(Format::Old.extension(), "dat");
    /// ```
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::New => "csv",
            Self::Old => "dat",
        }
    }

    /// Determines format from file extension.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "csv" => Some(Self::New),
            "dat" => Some(Self::Old),
            _ => None,
        }
    }
}
