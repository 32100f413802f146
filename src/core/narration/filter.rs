//! Content filter applied before text is chunked for narration.

/// Characters the synthesizer would otherwise vocalize as punctuation noise:
/// markdown emphasis markers and parentheses.
const NARRATION_NOISE: [char; 3] = ['*', '(', ')'];

/// Remove emphasis markers and parentheses from `text`.
pub fn strip_narration_noise(text: &str) -> String {
    text.chars()
        .filter(|c| !NARRATION_NOISE.contains(c))
        .collect()
}
