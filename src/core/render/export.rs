use once_cell::sync::Lazy;
use regex::Regex;

static BLANK_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").expect("valid newline regex"));

/// Plain text for document export: no code fences, no bold markers, and
/// every run of blank lines reduced to exactly one.
pub fn clean_for_export(text: &str) -> String {
    let stripped = text.replace("```", "").replace("**", "");
    BLANK_RUNS.replace_all(&stripped, "\n\n").into_owned()
}
