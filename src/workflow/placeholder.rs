//! Placeholder Extraction and Substitution
//!
//! Commands embed named placeholders as `{{name}}` tokens, e.g.
//! `git commit -m "{{message}}"`. This module finds those tokens and
//! fills them in with concrete values.
//!
//! Both operations are lenient by design so they stay safe to call on
//! every keystroke while a user is mid-edit: malformed or empty input
//! yields an empty result or passes through unchanged, never an error.
//!
//! A token is a literal `{{`, one or more characters other than `}`, and
//! a literal `}}`. There is no escaping; a command cannot express literal
//! double braces.

use std::collections::{HashMap, HashSet};

/// One lexical piece of a command string.
enum Segment<'a> {
    /// Plain text, copied through untouched
    Text(&'a str),
    /// A placeholder token; `raw` is the full `{{name}}` source text
    Token { name: &'a str, raw: &'a str },
}

/// Splits a command into text and token segments, left to right.
///
/// A `{{` that is never closed by `}}` (or closes on an empty name) is
/// plain text; scanning resumes one character past it so tokens opening
/// inside the failed candidate are still found.
fn segments(command: &str) -> Vec<Segment<'_>> {
    let bytes = command.as_bytes();
    let mut segments = Vec::new();
    let mut text_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'{' && bytes.get(i + 1) == Some(&b'{') {
            // Candidate token: the name runs to the first '}'
            let name_start = i + 2;
            let mut j = name_start;
            while j < bytes.len() && bytes[j] != b'}' {
                j += 1;
            }

            if j > name_start && bytes.get(j + 1) == Some(&b'}') {
                if text_start < i {
                    segments.push(Segment::Text(&command[text_start..i]));
                }
                segments.push(Segment::Token {
                    name: &command[name_start..j],
                    raw: &command[i..j + 2],
                });
                i = j + 2;
                text_start = i;
                continue;
            }
        }
        i += 1;
    }

    if text_start < bytes.len() {
        segments.push(Segment::Text(&command[text_start..]));
    }

    segments
}

/// Extracts distinct placeholder names from a command.
///
/// Names are returned in order of first occurrence; repeated tokens
/// yield one entry. A command with no tokens yields an empty vec.
///
/// # Example
///
/// ```
/// use cmdflow::workflow::placeholder::extract_placeholders;
///
/// let names = extract_placeholders("docker stop {{container}} && docker rm {{container}}");
/// assert_eq!(names, vec!["container"]);
/// ```
pub fn extract_placeholders(command: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for segment in segments(command) {
        if let Segment::Token { name, .. } = segment {
            if seen.insert(name) {
                names.push(name.to_string());
            }
        }
    }

    names
}

/// Returns true if the command contains at least one placeholder token.
pub fn has_placeholders(command: &str) -> bool {
    segments(command)
        .iter()
        .any(|s| matches!(s, Segment::Token { .. }))
}

/// Replaces placeholder tokens with the supplied values.
///
/// The command is rewritten in a single left-to-right pass:
/// every `{{name}}` with an entry in `values` becomes that value,
/// inserted literally and never re-scanned, so replacement order across
/// names cannot matter. Tokens with no supplied value are left as
/// literal `{{name}}` text, and names in `values` that never occur in
/// the command are ignored. Partial input is therefore fine, which is
/// what an interactive form needs.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use cmdflow::workflow::placeholder::substitute;
///
/// let mut values = HashMap::new();
/// values.insert("files".to_string(), "src/".to_string());
///
/// let rendered = substitute("git add {{files}} && git commit -m \"{{message}}\"", &values);
/// assert_eq!(rendered, "git add src/ && git commit -m \"{{message}}\"");
/// ```
pub fn substitute(command: &str, values: &HashMap<String, String>) -> String {
    let mut result = String::with_capacity(command.len());

    for segment in segments(command) {
        match segment {
            Segment::Text(text) => result.push_str(text),
            Segment::Token { name, raw } => match values.get(name) {
                Some(value) => result.push_str(value),
                None => result.push_str(raw),
            },
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_extract_no_placeholders() {
        assert!(extract_placeholders("git status").is_empty());
        assert!(extract_placeholders("").is_empty());
    }

    #[test]
    fn test_extract_single_placeholder() {
        assert_eq!(extract_placeholders("echo {{msg}}"), vec!["msg"]);
    }

    #[test]
    fn test_extract_preserves_first_occurrence_order() {
        let names =
            extract_placeholders("git add {{files}} && git commit -m \"{{message}}\"");
        assert_eq!(names, vec!["files", "message"]);
    }

    #[test]
    fn test_extract_deduplicates_repeated_tokens() {
        let names = extract_placeholders("docker stop {{container}} && docker rm {{container}} && docker rmi {{image}}");
        assert_eq!(names, vec!["container", "image"]);
    }

    #[test]
    fn test_extract_single_braces_are_not_tokens() {
        assert!(extract_placeholders("awk '{print $1}'").is_empty());
    }

    #[test]
    fn test_extract_empty_name_is_not_a_token() {
        assert!(extract_placeholders("echo {{}}").is_empty());
    }

    #[test]
    fn test_extract_unterminated_token_is_text() {
        assert!(extract_placeholders("echo {{msg").is_empty());
        assert!(extract_placeholders("echo {{msg}").is_empty());
    }

    #[test]
    fn test_extract_resumes_after_failed_candidate() {
        // the first {{ never closes; the later token must still be found
        assert_eq!(extract_placeholders("{{a} {{b}}"), vec!["b"]);
        assert_eq!(extract_placeholders("{{}}{{a}}"), vec!["a"]);
    }

    #[test]
    fn test_extract_name_may_contain_open_braces() {
        // inner text excludes only '}', so a stray '{' is part of the name
        assert_eq!(extract_placeholders("{{{a}}"), vec!["{a"]);
    }

    #[test]
    fn test_extract_allows_spaces_in_names() {
        assert_eq!(extract_placeholders("echo {{my arg}}"), vec!["my arg"]);
    }

    #[test]
    fn test_extract_non_ascii_names() {
        assert_eq!(extract_placeholders("cat {{файл}}"), vec!["файл"]);
    }

    #[test]
    fn test_has_placeholders() {
        assert!(has_placeholders("echo {{a}}"));
        assert!(!has_placeholders("echo a"));
        assert!(!has_placeholders("echo {a}"));
    }

    #[test]
    fn test_substitute_replaces_all_occurrences() {
        let result = substitute("echo {{a}} {{a}}", &values(&[("a", "hi")]));
        assert_eq!(result, "echo hi hi");
    }

    #[test]
    fn test_substitute_empty_values_is_identity() {
        let command = "git add {{files}} && git push";
        assert_eq!(substitute(command, &HashMap::new()), command);
    }

    #[test]
    fn test_substitute_leaves_missing_names_literal() {
        let result = substitute(
            "git add {{files}} && git commit -m \"{{message}}\"",
            &values(&[("files", ".")]),
        );
        assert_eq!(result, "git add . && git commit -m \"{{message}}\"");
    }

    #[test]
    fn test_substitute_ignores_unused_names() {
        let result = substitute("echo {{a}}", &values(&[("a", "x"), ("ghost", "y")]));
        assert_eq!(result, "echo x");
    }

    #[test]
    fn test_substitute_is_order_independent_for_disjoint_names() {
        let command = "cp {{src}} {{dst}}";

        let combined = substitute(command, &values(&[("src", "a.txt"), ("dst", "b.txt")]));

        let one_then_other = substitute(
            &substitute(command, &values(&[("src", "a.txt")])),
            &values(&[("dst", "b.txt")]),
        );
        let other_then_one = substitute(
            &substitute(command, &values(&[("dst", "b.txt")])),
            &values(&[("src", "a.txt")]),
        );

        assert_eq!(combined, "cp a.txt b.txt");
        assert_eq!(combined, one_then_other);
        assert_eq!(combined, other_then_one);
    }

    #[test]
    fn test_substitute_inserts_values_literally() {
        // a value that looks like a token must not be substituted again
        let result = substitute("run {{a}}", &values(&[("a", "{{b}}"), ("b", "nope")]));
        assert_eq!(result, "run {{b}}");
    }

    #[test]
    fn test_substitute_empty_command() {
        assert_eq!(substitute("", &values(&[("a", "x")])), "");
    }

    #[test]
    fn test_substitute_with_empty_string_value() {
        // an explicitly supplied empty value is a real substitution
        let result = substitute("echo [{{a}}]", &values(&[("a", "")]));
        assert_eq!(result, "echo []");
    }
}
