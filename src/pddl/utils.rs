use super::Error;

/// Renders `name(a, b, c)`, the textual form shared by literals and grounded actions.
pub fn build_call_string<S: AsRef<str>>(name: &str, args: &[S]) -> String {
    let first = args.iter().take(1).fold(String::new(), |acc, item| acc + item.as_ref());
    let joined = args.iter().skip(1).fold(first, |acc, item| acc + ", " + item.as_ref());
    format!("{}({})", name, joined)
}

#[inline]
pub fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

/// Object identifiers end up inside `At(x, y)`, so anything that collides with the
/// parenthesis/comma delimiters or whitespace would make literals ambiguous.
pub fn validate_identifier(identifier: &str) -> Result<(), Error> {
    if identifier.is_empty() {
        return Err(Error::malformed("Expected identifier, got empty string."));
    }
    match identifier.char_indices().find(|(_, c)| !is_identifier_char(*c)) {
        Some((col, c)) => Err(Error::format(col + 1, format!("Unexpected character {:?} in identifier {:?}.", c, identifier))),
        None => Ok(()),
    }
}
