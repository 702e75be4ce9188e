//! Identifier helpers for the generated dialect.

/// Reserved keywords of the output language.
pub const KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

/// Check whether a name is a reserved keyword.
pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

/// Prefix reserved keywords with `@` so they can be used as identifiers.
pub fn escape_identifier(name: &str) -> String {
    if is_keyword(name) {
        format!("@{}", name)
    } else {
        name.to_string()
    }
}

/// Validate an identifier, returning the reason it is invalid.
///
/// A leading `@` is accepted since it is the dialect's verbatim prefix.
pub fn validate_identifier(name: &str) -> Option<String> {
    let bare = name.strip_prefix('@').unwrap_or(name);
    let mut chars = bare.chars();

    match chars.next() {
        None => return Some("identifier cannot be empty".to_string()),
        Some(c) if !(c.is_alphabetic() || c == '_') => {
            return Some(format!(
                "identifier must start with a letter or underscore, found '{}'",
                c
            ));
        }
        _ => {}
    }

    chars
        .find(|c| !(c.is_alphanumeric() || *c == '_'))
        .map(|c| format!("identifier contains invalid character '{}'", c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords() {
        assert!(is_keyword("class"));
        assert!(is_keyword("out"));
        assert!(!is_keyword("Circle"));
    }

    #[test]
    fn test_escape_identifier() {
        assert_eq!(escape_identifier("event"), "@event");
        assert_eq!(escape_identifier("value"), "value");
    }

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("Compute").is_none());
        assert!(validate_identifier("_cache2").is_none());
        assert!(validate_identifier("@class").is_none());
        assert!(validate_identifier("").is_some());
        assert!(validate_identifier("2d").is_some());
        assert!(validate_identifier("has-dash").is_some());
    }
}
