/// Replace `\r\n`, `\r` and `\n` with the two characters `\n`.
pub fn escape_newlines(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\r', "\n").replace('\n', "\\n")
}

/// Reverse of [`escape_newlines`]: literal `\n` back to a line feed.
pub fn unescape_newlines(s: &str) -> String {
    s.replace("\\n", "\n")
}
