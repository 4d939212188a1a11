//! Utilities related to displaying things.

use std::fmt;

use num_format::Locale;
use num_format::ToFormattedString;

/// Utility struct for displaying a length in base pairs with thousands
/// separators, falling back to megabases or gigabases for readability.
pub struct BasePairs(pub u64);

impl fmt::Display for BasePairs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bp = self.0;

        if bp >= 1_000_000_000 {
            write!(f, "{:.2} Gb", bp as f64 / 1e9)
        } else if bp >= 1_000_000 {
            write!(f, "{:.2} Mb", bp as f64 / 1e6)
        } else {
            write!(f, "{} bp", bp.to_formatted_string(&Locale::en))
        }
    }
}

/// Utility struct for displaying a score out of a maximum.
pub struct ScoreFormat(pub u32, pub u32);

impl fmt::Display for ScoreFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, self.1)
    }
}
