/// Lower-case `input` and split it into whitespace separated tokens.
pub fn tokenize_query(input: &str) -> Vec<String> {
    input
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_lowercases_and_collapses_whitespace() {
        let tokens = tokenize_query("  On\tKitchen   LIGHT ");
        assert_eq!(tokens, vec!["on", "kitchen", "light"]);
    }

    #[test]
    fn tokenize_blank_is_empty() {
        assert!(tokenize_query(" \t\n").is_empty());
    }
}
