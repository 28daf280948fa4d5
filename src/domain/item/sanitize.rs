/// Drops every character that is neither ASCII alphanumeric nor ASCII whitespace.
pub fn sanitize_text(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_ascii_whitespace())
        .collect()
}
