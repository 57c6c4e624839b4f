//! Naming convention utilities for code generation.
//!
//! Schema names are camelCase properties, PascalCase types and
//! `/`-separated method names. This module maps them onto Rust items.
//!
//! # Supported Conversions
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `$/textDocument/hover` | [`upper_case_identifier`] | `TextDocument_Hover` |
//! | `word` | [`capitalize`] | `Word` |
//! | `workDoneProgress` | [`to_snake_case`] | `work_done_progress` |
//! | `type` | [`field_name`] | `r#type` |

/// Canonical identifier of a schema name.
///
/// Strips a leading `$`, splits on `/` (dropping empty segments),
/// capitalizes every segment and joins them with `_`. Characters that are
/// neither alphanumeric nor `_` become `_`.
///
/// # Examples
///
/// ```text
/// upper_case_identifier("textDocument/hover") == "TextDocument_Hover"
/// upper_case_identifier("$/setTrace")         == "SetTrace"
/// upper_case_identifier("LSPAny")             == "LSPAny"
/// ```
pub fn upper_case_identifier(name: &str) -> String {
    let name = name.strip_prefix('$').unwrap_or(name);

    name.split('/')
        .filter(|segment| !segment.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Capitalize the first letter of a string.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Convert camelCase or PascalCase to snake_case.
///
/// An underscore goes before an uppercase letter that follows a lowercase
/// letter or digit, and before the last capital of an acronym that starts a
/// new word (`URIScheme` becomes `uri_scheme`).
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());

            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                result.push('_');
            }
        }

        result.extend(c.to_lowercase());
    }

    result
}

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern", "false",
    "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref",
    "return", "static", "struct", "trait", "true", "type", "unsafe", "use", "where", "while",
    "abstract", "become", "box", "do", "final", "gen", "macro", "override", "priv", "try",
    "typeof", "unsized", "virtual", "yield",
];

/// Keywords that cannot be written as raw identifiers.
const RESERVED_PATH_KEYWORDS: &[&str] = &["crate", "self", "super", "Self"];

/// Rust field name for a schema property or base type name.
///
/// # Examples
///
/// ```text
/// field_name("textDocument") == "text_document"
/// field_name("type")         == "r#type"
/// field_name("self")         == "self_"
/// ```
pub fn field_name(name: &str) -> String {
    let mut snake: String = to_snake_case(name)
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if snake.is_empty() || snake.starts_with(|c: char| c.is_ascii_digit()) {
        snake.insert(0, '_');
    }

    if RESERVED_PATH_KEYWORDS.contains(&snake.as_str()) {
        snake.push('_');
        snake
    } else if RUST_KEYWORDS.contains(&snake.as_str()) {
        format!("r#{snake}")
    } else {
        snake
    }
}

/// Enum variant name for an enumeration value.
pub fn variant_name(name: &str) -> String {
    let variant: String = capitalize(name)
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    match variant.chars().next() {
        Some(first) if first.is_ascii_digit() => format!("_{variant}"),
        None => "_".to_string(),
        _ if variant == "Self" => "Self_".to_string(),
        _ => variant,
    }
}

/// Render documentation as `///` lines at the given indentation.
///
/// An optional `title` goes first, separated from the body by an empty
/// doc line. Returns an empty string when there is nothing to say.
pub fn doc_comment(title: &str, documentation: &str, indent: &str) -> String {
    let mut comment = String::new();

    if !title.is_empty() {
        comment.push_str(&format!("{indent}/// {title}\n"));
    }

    if !documentation.is_empty() {
        if !title.is_empty() {
            comment.push_str(&format!("{indent}///\n"));
        }

        for line in documentation.lines() {
            if line.is_empty() {
                comment.push_str(&format!("{indent}///\n"));
            } else {
                comment.push_str(&format!("{indent}/// {line}\n"));
            }
        }
    }

    comment
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use test_case::test_case;

    #[test_case("textDocument/hover", "TextDocument_Hover" ; "method")]
    #[test_case("$/setTrace", "SetTrace" ; "dollar prefix")]
    #[test_case("$/progress", "Progress" ; "dollar progress")]
    #[test_case("LSPAny", "LSPAny" ; "already capitalized")]
    #[test_case("workspace/didChangeWorkspaceFolders", "Workspace_DidChangeWorkspaceFolders" ; "two segments")]
    #[test_case("a//b", "A_B" ; "empty segment skipped")]
    #[test_case("textDocument/hoverResult", "TextDocument_HoverResult" ; "synthesized alias")]
    #[test_case("window/work-done", "Window_Work_done" ; "dash replaced")]
    fn upper_case_identifier___maps_schema_names(input: &str, expected: &str) {
        assert_eq!(upper_case_identifier(input), expected);
    }

    #[test]
    fn capitalize___capitalizes_first_letter() {
        assert_eq!(capitalize("hello"), "Hello");
        assert_eq!(capitalize("a"), "A");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn capitalize___preserves_rest_of_string() {
        assert_eq!(capitalize("helloWorld"), "HelloWorld");
        assert_eq!(capitalize("ALLCAPS"), "ALLCAPS");
    }

    #[test_case("workDoneProgress", "work_done_progress")]
    #[test_case("textDocument", "text_document")]
    #[test_case("ResourceOperation", "resource_operation")]
    #[test_case("URIScheme", "uri_scheme")]
    #[test_case("line", "line")]
    #[test_case("utf16", "utf16")]
    #[test_case("_InitializeParams", "_initialize_params")]
    #[test_case("version2Id", "version2_id")]
    fn to_snake_case___converts(input: &str, expected: &str) {
        assert_eq!(to_snake_case(input), expected);
    }

    #[test_case("type", "r#type" ; "strict keyword")]
    #[test_case("async", "r#async" ; "edition keyword")]
    #[test_case("self", "self_" ; "path keyword")]
    #[test_case("textDocument", "text_document" ; "plain")]
    #[test_case("3d", "_3d" ; "leading digit")]
    #[test_case("$ref", "_ref" ; "symbol")]
    fn field_name___escapes(input: &str, expected: &str) {
        assert_eq!(field_name(input), expected);
    }

    #[test_case("manual", "Manual")]
    #[test_case("Type", "Type")]
    #[test_case("self", "Self_")]
    #[test_case("1x", "_1x")]
    #[test_case("text-edit", "Text_edit")]
    fn variant_name___sanitizes(input: &str, expected: &str) {
        assert_eq!(variant_name(input), expected);
    }

    #[test]
    fn doc_comment___title_and_body___separated_by_empty_line() {
        let comment = doc_comment("textDocument/hover", "First.\n\nSecond.", "    ");

        assert_eq!(
            comment,
            "    /// textDocument/hover\n    ///\n    /// First.\n    ///\n    /// Second.\n"
        );
    }

    #[test]
    fn doc_comment___nothing___returns_empty() {
        assert_eq!(doc_comment("", "", ""), "");
    }

    #[test]
    fn doc_comment___body_only___has_no_title_line() {
        assert_eq!(doc_comment("", "Only line.", ""), "/// Only line.\n");
    }
}
