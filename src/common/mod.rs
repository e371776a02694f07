pub fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    if s.len() >= prefix.len()
        && s.is_char_boundary(prefix.len())
        && s[..prefix.len()].eq_ignore_ascii_case(prefix)
    {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}

/// Strip a launcher keyword from the start of `query`.
///
/// The keyword must be followed by whitespace or the end of input, so `ha`
/// matches `"ha light"` and `"ha"` but not `"hallway"`.
pub fn strip_keyword<'a>(query: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = strip_prefix_ci(query.trim_start(), keyword)?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim_start())
    } else {
        None
    }
}

pub mod query;
