// SPDX-FileCopyrightText: 2026 Fixroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Few-shot answer format shared by the prompt and the model backends.

/// Marker that precedes the label in each worked example of the prompt.
pub const OUTPUT_MARKER: &str = "Output:";

/// Returns the text after the last [`OUTPUT_MARKER`], or the whole text.
///
/// Small models sometimes continue the few-shot pattern; backends use this
/// to keep only the final answer. An empty tail falls back to the whole text.
pub fn answer_after_marker(raw: &str) -> &str {
    match raw.rfind(OUTPUT_MARKER) {
        Some(pos) => {
            let tail = raw[pos + OUTPUT_MARKER.len()..].trim();
            if tail.is_empty() { raw.trim() } else { tail }
        }
        None => raw.trim(),
    }
}
