//! Text layout helpers for usage and help output

/// Greedy word wrap on single spaces
///
/// `init_width` is the column the text starts at. A word that would push the
/// line past `width` moves to a new line indented by `indent` spaces. The
/// first word never wraps.
pub fn wrap(text: &str, indent: usize, init_width: usize, width: usize) -> String {
    let prefix = " ".repeat(indent);
    let mut out = String::with_capacity(text.len());
    let mut line = init_width;

    for (i, word) in text.split(' ').enumerate() {
        let len = word.chars().count();
        if i == 0 {
            out.push_str(word);
            line += len;
        } else if line + len + 1 > width {
            out.push('\n');
            out.push_str(&prefix);
            out.push_str(word);
            line = indent + len;
        } else {
            out.push(' ');
            out.push_str(word);
            line += len + 1;
        }
    }
    out
}

/// Pad `text` with spaces up to `width` characters
pub fn pad_right(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    format!("{}{}", text, " ".repeat(width - len))
}
