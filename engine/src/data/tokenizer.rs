// Quote-aware splitting of one `;`-delimited line.

pub const DELIMITER: char = ';';
pub const QUOTE: char = '"';

/// Splits a line on `;`, treating every `"` as an on/off switch for quoting.
///
/// Quote characters are dropped, separators inside quotes are kept as text and
/// every field is trimmed. Unbalanced quotes never fail: the rest of the line
/// simply stays quoted.
pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            QUOTE => in_quotes = !in_quotes,
            DELIMITER if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

/// Makes repeated headers unique by suffixing later copies with `.1`, `.2`, ...
pub fn disambiguate_headers<I, S>(headers: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen: std::collections::HashMap<String, usize> = std::collections::HashMap::new();
    let mut out: Vec<String> = Vec::new();
    for header in headers {
        let header: String = header.into();
        let count = seen.entry(header.clone()).or_insert(0);
        let mut candidate = header.clone();
        if *count > 0 || out.contains(&candidate) {
            *count = (*count).max(1);
            candidate = format!("{}.{}", header, count);
            while out.contains(&candidate) {
                *count += 1;
                candidate = format!("{}.{}", header, count);
            }
        }
        out.push(candidate);
        *count += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_separators_stay_in_field() {
        assert_eq!(
            split_line(r#""Smith; Jones";100;"Reg;ion""#),
            vec!["Smith; Jones", "100", "Reg;ion"]
        );
    }

    #[test]
    fn test_fields_are_trimmed() {
        assert_eq!(split_line(" a ; b ;c\r"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_fields_are_kept() {
        assert_eq!(split_line("a;;c;"), vec!["a", "", "c", ""]);
    }

    #[test]
    fn test_quote_in_the_middle_toggles() {
        assert_eq!(split_line(r#"ab"c;d"e;f"#), vec!["abc;de", "f"]);
    }

    #[test]
    fn test_unbalanced_quote_swallows_rest_of_line() {
        assert_eq!(split_line(r#"a;"b;c;d"#), vec!["a", "b;c;d"]);
    }

    #[test]
    fn test_duplicate_headers_get_suffixes() {
        let headers = disambiguate_headers(vec!["Estado", "Comuna", "Estado", "Estado"]);
        assert_eq!(headers, vec!["Estado", "Comuna", "Estado.1", "Estado.2"]);
    }

    #[test]
    fn test_suffix_does_not_clash_with_existing_header() {
        let headers = disambiguate_headers(vec!["Estado", "Estado.1", "Estado"]);
        assert_eq!(headers, vec!["Estado", "Estado.1", "Estado.2"]);
    }
}
