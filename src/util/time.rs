// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Playback time formatting.
//!
//! This module converts playback positions in seconds into the short
//! `m:ss` labels shown next to notes and on the timeline.

/// Format a playback position as `m:ss`.
///
/// Minutes are not padded and may exceed 59; seconds are truncated and
/// zero-padded to two digits. Negative or non-finite input formats as `0:00`.
pub fn format_timestamp(seconds: f64) -> String {
    let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
    let minutes = (seconds / 60.0).floor() as u64;
    let rest = (seconds % 60.0).floor() as u64;
    format!("{}:{:02}", minutes, rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pads_seconds() {
        assert_eq!(format_timestamp(125.0), "2:05");
        assert_eq!(format_timestamp(0.0), "0:00");
        assert_eq!(format_timestamp(59.999), "0:59");
    }

    #[test]
    fn test_format_long_positions() {
        // One hour stays in minutes
        assert_eq!(format_timestamp(3600.0), "60:00");
        assert_eq!(format_timestamp(3725.4), "62:05");
    }

    #[test]
    fn test_format_invalid_input() {
        assert_eq!(format_timestamp(-3.0), "0:00");
        assert_eq!(format_timestamp(f64::NAN), "0:00");
    }
}
