use crate::model::TextGranularity;

/// Characters that form their own word-mode token.
///
/// Whitespace is also a separator; these keep URL structure (hosts, paths,
/// query pairs) as natural diff boundaries.
const WORD_SEPARATORS: [char; 9] = ['/', '?', '&', '=', '.', '-', '_', ':', '@'];

fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || WORD_SEPARATORS.contains(&ch)
}

/// Split on `\n`. The empty string yields a single empty token.
pub fn tokenize_lines(input: &str) -> Vec<&str> {
    input.split('\n').collect()
}

/// Split into maximal non-separator runs, with every separator character
/// emitted as its own token.
pub fn tokenize_words(input: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut run_start: Option<usize> = None;

    for (idx, ch) in input.char_indices() {
        if is_separator(ch) {
            if let Some(start) = run_start.take() {
                tokens.push(&input[start..idx]);
            }
            tokens.push(&input[idx..idx + ch.len_utf8()]);
        } else if run_start.is_none() {
            run_start = Some(idx);
        }
    }

    if let Some(start) = run_start {
        tokens.push(&input[start..]);
    }

    tokens
}

pub fn tokenize(input: &str, granularity: TextGranularity) -> Vec<&str> {
    match granularity {
        TextGranularity::Word => tokenize_words(input),
        TextGranularity::Line => tokenize_lines(input),
    }
}
