//! Canonical text for types and field values.
//!
//! Values are rendered exactly as reading the field through reflection and converting it to a
//! string would render them, so that the two can be compared for equality.

use crate::SchemaViolation;

pub const STRING_TYPE: &str = "java.lang.String";

/// Collapses `", "` to `","`, nothing else.
///
/// Applies to field, parameter and return types only. Exception types and `extends` /
/// `implements` names keep their original spelling.
pub fn canonicalize_type(name: &str) -> String {
    name.replace(", ", ",")
}

/// Drops everything from the first `<` onward.
pub fn strip_type_arguments(name: &str) -> &str {
    name.find('<').map_or(name, |i| &name[..i])
}

/// Returns `None` for the `null` literal, which is not the same as an empty string.
pub fn canonicalize_value(
    field_type: &str,
    literal: &str,
) -> Result<Option<String>, SchemaViolation> {
    if literal == "null" {
        return Ok(None);
    }

    let value = match field_type {
        STRING_TYPE => {
            let s = literal.strip_prefix('"').unwrap_or(literal);
            unescape(s.strip_suffix('"').unwrap_or(s))?
        }
        "char" => char_literal(literal)?,
        "double" => match literal {
            "(-1.0/0.0)" => "-Infinity".to_owned(),
            "(0.0/0.0)" => "NaN".to_owned(),
            "(1.0/0.0)" => "Infinity".to_owned(),
            _ => literal.to_owned(),
        },
        "float" => match literal {
            "(-1.0f/0.0f)" => "-Infinity".to_owned(),
            "(0.0f/0.0f)" => "NaN".to_owned(),
            "(1.0f/0.0f)" => "Infinity".to_owned(),
            _ => literal.strip_suffix('f').unwrap_or(literal).to_owned(),
        },
        "long" => literal.strip_suffix('L').unwrap_or(literal).to_owned(),
        _ => literal.to_owned(),
    };

    Ok(Some(value))
}

// A numeric literal is tried first, so `'5'` only reaches the quoted form because the quotes
// make it fail to parse as a number.
fn char_literal(literal: &str) -> Result<String, SchemaViolation> {
    let invalid = || SchemaViolation::InvalidCharLiteral(literal.to_owned());

    if let Ok(code) = literal.parse::<i32>() {
        return char::from_u32(code as u16 as u32)
            .map(String::from)
            .ok_or_else(invalid);
    }

    let quoted = literal
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .ok_or_else(invalid)?;
    let decoded = unescape(quoted)?;

    let mut chars = decoded.chars();
    match (chars.next(), chars.next()) {
        (Some(_), None) => Ok(decoded),
        _ => Err(invalid()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EscapeState {
    Plain,
    AfterBackslash,
    Hex1,
    Hex2,
    Hex3,
    Hex4,
}

/// Decodes `\\ \t \b \r \n \f \' \"` and `\uXXXX`.
///
/// Decoding happens on UTF-16 code units, so a surrogate pair written as two `\u` escapes
/// yields a single character while an unpaired surrogate is rejected.
pub fn unescape(s: &str) -> Result<String, SchemaViolation> {
    if !s.contains('\\') {
        return Ok(s.to_owned());
    }

    let malformed = || SchemaViolation::MalformedEscape(s.to_owned());

    let mut units: Vec<u16> = Vec::with_capacity(s.len());
    let mut buf = [0u16; 2];
    let mut state = EscapeState::Plain;
    let mut code: u16 = 0;

    for c in s.chars() {
        state = match state {
            EscapeState::Plain if c == '\\' => EscapeState::AfterBackslash,
            EscapeState::Plain => {
                units.extend_from_slice(c.encode_utf16(&mut buf));
                EscapeState::Plain
            }
            EscapeState::AfterBackslash if c == 'u' => {
                code = 0;
                EscapeState::Hex1
            }
            EscapeState::AfterBackslash => {
                units.push(single_char_escape(c).ok_or_else(malformed)?);
                EscapeState::Plain
            }
            EscapeState::Hex1 | EscapeState::Hex2 | EscapeState::Hex3 | EscapeState::Hex4 => {
                let digit = c.to_digit(16).ok_or_else(malformed)?;
                code = code << 4 | digit as u16;

                match state {
                    EscapeState::Hex1 => EscapeState::Hex2,
                    EscapeState::Hex2 => EscapeState::Hex3,
                    EscapeState::Hex3 => EscapeState::Hex4,
                    _ => {
                        units.push(code);
                        EscapeState::Plain
                    }
                }
            }
        };
    }

    if state != EscapeState::Plain {
        return Err(malformed());
    }

    String::from_utf16(&units).map_err(|_| malformed())
}

fn single_char_escape(c: char) -> Option<u16> {
    let unescaped = match c {
        '\\' => '\\',
        't' => '\t',
        'b' => '\u{8}',
        'r' => '\r',
        'n' => '\n',
        'f' => '\u{c}',
        '\'' => '\'',
        '"' => '"',
        _ => return None,
    };
    Some(unescaped as u16)
}


#[cfg(test)]
mod canonicalize_value_tests {
    use super::*;

    fn value(field_type: &str, literal: &str) -> Option<String> {
        canonicalize_value(field_type, literal).unwrap()
    }

    #[test]
    fn it_should_treat_null_as_absent() {
        assert_eq!(None, value(STRING_TYPE, "null"));
        assert_eq!(None, value("int", "null"));
    }

    #[test]
    fn it_should_keep_an_empty_string_distinct_from_null() {
        assert_eq!(Some(String::new()), value(STRING_TYPE, r#""""#));
    }

    #[test]
    fn it_should_strip_quotes_and_decode_strings() {
        assert_eq!(Some("A".to_owned()), value(STRING_TYPE, r#""A""#));
        assert_eq!(Some("a\"b".to_owned()), value(STRING_TYPE, r#""a\"b""#));
        assert_eq!(Some("unquoted".to_owned()), value(STRING_TYPE, "unquoted"));
    }

    #[test]
    fn it_should_decode_quoted_chars() {
        assert_eq!(Some("\n".to_owned()), value("char", r"'\n'"));
        assert_eq!(Some("x".to_owned()), value("char", "'x'"));
        assert_eq!(Some("5".to_owned()), value("char", "'5'"));
        assert_eq!(Some("\u{ffff}".to_owned()), value("char", r"'\uFFFF'"));
    }

    #[test]
    fn it_should_decode_numeric_chars() {
        assert_eq!(Some("A".to_owned()), value("char", "65"));
        assert_eq!(Some("\u{0}".to_owned()), value("char", "0"));
        assert_eq!(Some("\u{ffff}".to_owned()), value("char", "-1"));
    }

    #[test]
    fn it_should_reject_invalid_chars() {
        for literal in ["x", "'", "'ab'", "''", "\"x\""] {
            assert_eq!(
                Err(SchemaViolation::InvalidCharLiteral(literal.to_owned())),
                canonicalize_value("char", literal),
                "{}",
                literal
            );
        }
        assert!(canonicalize_value("char", "55296").is_err());
    }

    #[test]
    fn it_should_report_malformed_escapes_in_chars() {
        assert_eq!(
            Err(SchemaViolation::MalformedEscape(r"\z".to_owned())),
            canonicalize_value("char", r"'\z'")
        );
    }

    #[test]
    fn it_should_map_double_sentinels() {
        assert_eq!(Some("NaN".to_owned()), value("double", "(0.0/0.0)"));
        assert_eq!(Some("Infinity".to_owned()), value("double", "(1.0/0.0)"));
        assert_eq!(Some("-Infinity".to_owned()), value("double", "(-1.0/0.0)"));
        assert_eq!(Some("2.5".to_owned()), value("double", "2.5"));
    }

    #[test]
    fn it_should_map_float_sentinels_and_suffixes() {
        assert_eq!(Some("Infinity".to_owned()), value("float", "(1.0f/0.0f)"));
        assert_eq!(Some("-Infinity".to_owned()), value("float", "(-1.0f/0.0f)"));
        assert_eq!(Some("NaN".to_owned()), value("float", "(0.0f/0.0f)"));
        assert_eq!(Some("123".to_owned()), value("float", "123f"));
        assert_eq!(Some("1.5".to_owned()), value("float", "1.5"));
    }

    #[test]
    fn it_should_only_apply_sentinels_to_their_own_type() {
        assert_eq!(Some("(0.0/0.0)".to_owned()), value("float", "(0.0/0.0)"));
        assert_eq!(Some("(1.0f/0.0f)".to_owned()), value("double", "(1.0f/0.0f)"));
    }

    #[test]
    fn it_should_strip_long_suffixes() {
        assert_eq!(Some("123".to_owned()), value("long", "123L"));
        assert_eq!(Some("-7".to_owned()), value("long", "-7"));
    }

    #[test]
    fn it_should_leave_other_types_alone() {
        assert_eq!(Some("123L".to_owned()), value("int", "123L"));
        assert_eq!(Some("true".to_owned()), value("boolean", "true"));
    }
}
