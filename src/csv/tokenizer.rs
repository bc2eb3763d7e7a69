//! Splits one raw CSV line into field values.
//!
//! The algorithm is a deliberately naive quote toggle: a double quote flips
//! the "inside quoted field" flag and is consumed, the delimiter only
//! separates fields while the flag is off. Two consecutive quotes inside a
//! quoted field are not unescaped beyond the toggle. This matches the
//! behavior the rest of the pipeline was validated against, so it must not
//! be replaced with a strict RFC 4180 parser.

use std::mem::take;

/// Splits a single line into its field values.
///
/// Always succeeds. An empty line yields a one-element vector containing the
/// empty string, never zero elements; callers are expected to filter blank
/// lines before tokenizing. Field counts are not validated here.
///
/// ```
/// use stockpilot::csv::tokenizer::split_line;
///
/// let fields = split_line("\"Acme, Inc.\",5", ',');
/// assert_eq!(fields, vec!["Acme, Inc.", "5"]);
/// ```
pub fn split_line(line: &str, delimiter: char) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        if ch == '"' {
            in_quotes = !in_quotes;
        } else if ch == delimiter && !in_quotes {
            values.push(take(&mut current));
        } else {
            current.push(ch);
        }
    }

    values.push(current);

    values.into_iter().map(strip_surrounding_quotes).collect()
}

/// Removes a single layer of surrounding double quotes.
///
/// Only one strip pass is applied, so a nested quoting layer survives.
fn strip_surrounding_quotes(value: String) -> String {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        value[1..value.len() - 1].to_string()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::split_line;

    #[test]
    fn plain_fields_are_split_on_the_delimiter() {
        let fields = split_line("REF-001,Clavier,12", ',');

        assert_eq!(fields, vec!["REF-001", "Clavier", "12"]);
    }

    #[test]
    fn quoted_field_containing_the_delimiter_stays_unsplit() {
        let fields = split_line("\"Acme, Inc.\",5", ',');

        assert_eq!(fields, vec!["Acme, Inc.", "5"]);
    }

    #[test]
    fn empty_line_yields_one_empty_field() {
        let fields = split_line("", ',');

        assert_eq!(fields, vec![""]);
    }

    #[test]
    fn trailing_delimiter_yields_a_trailing_empty_field() {
        let fields = split_line("a,b,", ',');

        assert_eq!(fields, vec!["a", "b", ""]);
    }

    #[test]
    fn consecutive_quotes_toggle_without_unescaping() {
        // Naive toggle: the quotes are consumed, the comma stays protected
        // only while the flag is on.
        let fields = split_line("\"a\"\"b\",c", ',');

        assert_eq!(fields, vec!["ab", "c"]);
    }

    #[test]
    fn alternate_delimiter_is_honored() {
        let fields = split_line("a;b;\"c;d\"", ';');

        assert_eq!(fields, vec!["a", "b", "c;d"]);
    }

    #[test]
    fn unterminated_quote_swallows_the_rest_of_the_line() {
        let fields = split_line("\"a,b", ',');

        assert_eq!(fields, vec!["a,b"]);
    }
}
