//! String-to-typed-value coercion
//!
//! Values are opaque strings until a caller converts them. Conversion is
//! default-driven: absence, emptiness, or a failed parse all yield the
//! caller's default, never an error.

use std::str::FromStr;

/// Parse `raw` as `T`, returning `default` when the value is absent, blank,
/// or does not parse.
pub fn parse_or<T: FromStr>(raw: Option<&str>, default: T) -> T {
    match raw {
        Some(s) if !s.trim().is_empty() => s.trim().parse().unwrap_or(default),
        _ => default,
    }
}

/// Boolean coercion with the lenient vocabulary used by hand-edited files:
/// case-insensitive `yes`/`true`/`1` and `no`/`false`/`0`. Anything else is
/// the default.
pub fn bool_or(raw: Option<&str>, default: bool) -> bool {
    match raw {
        Some(s) => match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "true" | "1" => true,
            "no" | "false" | "0" => false,
            _ => default,
        },
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_falls_back() {
        assert_eq!(parse_or::<i32>(None, 7), 7);
        assert_eq!(parse_or::<i32>(Some(""), 7), 7);
        assert_eq!(parse_or::<i32>(Some("not a number"), 7), 7);
        assert_eq!(parse_or::<i32>(Some("42"), 7), 42);
        assert_eq!(parse_or::<i32>(Some(" 42 "), 7), 42);
    }

    #[test]
    fn test_parse_or_respects_type_bounds() {
        assert_eq!(parse_or::<u8>(Some("300"), 5), 5);
        assert_eq!(parse_or::<f32>(Some("1.5"), 0.0), 1.5);
    }

    #[test]
    fn test_bool_or_vocabulary() {
        assert!(bool_or(Some("yes"), false));
        assert!(bool_or(Some("TRUE"), false));
        assert!(bool_or(Some("1"), false));
        assert!(!bool_or(Some("No"), true));
        assert!(!bool_or(Some("false"), true));
        assert!(!bool_or(Some("0"), true));
        assert!(bool_or(Some("maybe"), true));
        assert!(!bool_or(None, false));
    }
}
