//! Identifier and literal quoting.

/// Wrap an identifier in double quotes.
pub fn quote(name: &str) -> String {
    format!("\"{}\"", name.trim().replace('"', "\"\""))
}

/// `"schema"."name"`, or just `"name"` when no schema applies.
pub fn qualified(name: &str, schema: Option<&str>) -> String {
    match schema.filter(|s| !s.trim().is_empty()) {
        Some(schema) => format!("{}.{}", quote(schema), quote(name)),
        None => quote(name),
    }
}

/// Single-quoted SQL string literal.
pub fn string_literal(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// Physical name of an entity: `code`, then `collectionName`, then `name`.
pub fn entity_name<'a>(
    code: Option<&'a str>,
    collection_name: Option<&'a str>,
    name: Option<&'a str>,
) -> Option<&'a str> {
    code.or(collection_name).or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote() {
        assert_eq!(quote("users"), "\"users\"");
        assert_eq!(quote(" padded "), "\"padded\"");
        assert_eq!(quote("a\"b"), "\"a\"\"b\"");
    }

    #[test]
    fn test_qualified() {
        assert_eq!(qualified("T", Some("HR")), "\"HR\".\"T\"");
        assert_eq!(qualified("T", None), "\"T\"");
        assert_eq!(qualified("T", Some("")), "\"T\"");
    }

    #[test]
    fn test_string_literal() {
        assert_eq!(string_literal("it's"), "'it''s'");
    }

    #[test]
    fn test_entity_name_precedence() {
        assert_eq!(entity_name(Some("c"), Some("cn"), Some("n")), Some("c"));
        assert_eq!(entity_name(None, Some("cn"), Some("n")), Some("cn"));
        assert_eq!(entity_name(None, None, Some("n")), Some("n"));
        assert_eq!(entity_name(None, None, None), None);
    }
}
