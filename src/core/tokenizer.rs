//! Command line tokenizing
//!
//! Splits an input line into words, honoring single and double quotes.

/// Split a command line into arguments.
///
/// Whitespace separates words outside quotes. A `'` or `"` opens a quote that
/// only the same character closes; the quote characters themselves are not
/// part of the word. An unterminated quote runs to the end of the line.
/// The result always holds at least one (possibly empty) word.
pub fn split_args(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut quote: Option<char> = None;

    for ch in line.trim().chars() {
        match quote {
            Some(open) if ch == open => quote = None,
            Some(_) => word.push(ch),
            None if ch == '\'' || ch == '"' => quote = Some(ch),
            None if ch.is_whitespace() => {
                if !word.is_empty() {
                    words.push(std::mem::take(&mut word));
                }
            }
            None => word.push(ch),
        }
    }

    if !word.is_empty() {
        words.push(word);
    }
    if words.is_empty() {
        words.push(String::new());
    }
    words
}
