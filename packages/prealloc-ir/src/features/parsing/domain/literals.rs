//! Go literal decoding

/// Parse a Go integer literal (`42`, `1_000`, `0x2A`, `0o52`, `0b101010`, `052`)
pub fn parse_int_literal(text: &str) -> Option<i64> {
    let cleaned: String = text.chars().filter(|c| *c != '_').collect();
    let lower = cleaned.to_ascii_lowercase();

    let (digits, radix) = if let Some(rest) = lower.strip_prefix("0x") {
        (rest, 16)
    } else if let Some(rest) = lower.strip_prefix("0o") {
        (rest, 8)
    } else if let Some(rest) = lower.strip_prefix("0b") {
        (rest, 2)
    } else if lower.len() > 1 && lower.starts_with('0') {
        (&lower[1..], 8)
    } else {
        (lower.as_str(), 10)
    };

    if digits.is_empty() {
        return None;
    }
    i64::from_str_radix(digits, radix).ok()
}

/// Decode a Go string literal (interpreted `"..."` or raw `` `...` ``) into bytes
pub fn unquote_string(text: &str) -> Option<Vec<u8>> {
    if text.len() >= 2 && text.starts_with('`') && text.ends_with('`') {
        let inner = &text[1..text.len() - 1];
        return Some(inner.bytes().filter(|b| *b != b'\r').collect());
    }

    if text.len() < 2 || !text.starts_with('"') || !text.ends_with('"') {
        return None;
    }
    let inner = &text[1..text.len() - 1];

    let mut out = Vec::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            let mut buf = [0u8; 4];
            out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            continue;
        }

        let escape = chars.next()?;
        match escape {
            'a' => out.push(0x07),
            'b' => out.push(0x08),
            'f' => out.push(0x0c),
            'n' => out.push(b'\n'),
            'r' => out.push(b'\r'),
            't' => out.push(b'\t'),
            'v' => out.push(0x0b),
            '\\' => out.push(b'\\'),
            '"' => out.push(b'"'),
            'x' => {
                let hex: String = chars.by_ref().take(2).collect();
                out.push(u8::from_str_radix(&hex, 16).ok()?);
            }
            '0'..='7' => {
                let rest: String = chars.by_ref().take(2).collect();
                let octal = format!("{}{}", escape, rest);
                out.push(u8::from_str_radix(&octal, 8).ok()?);
            }
            'u' | 'U' => {
                let width = if escape == 'u' { 4 } else { 8 };
                let hex: String = chars.by_ref().take(width).collect();
                let code = u32::from_str_radix(&hex, 16).ok()?;
                let decoded = char::from_u32(code)?;
                let mut buf = [0u8; 4];
                out.extend_from_slice(decoded.encode_utf8(&mut buf).as_bytes());
            }
            _ => return None,
        }
    }
    Some(out)
}

/// Number of iterations of `for range s`: one per UTF-8 sequence,
/// one per byte of an invalid sequence
pub fn range_iterations(bytes: &[u8]) -> usize {
    let mut count = 0;
    let mut rest = bytes;
    loop {
        match std::str::from_utf8(rest) {
            Ok(valid) => return count + valid.chars().count(),
            Err(err) => {
                let valid_up_to = err.valid_up_to();
                // Valid prefix: one rune per non-continuation byte
                count += rest[..valid_up_to]
                    .iter()
                    .filter(|b| (**b & 0xC0) != 0x80)
                    .count();
                let invalid = err.error_len().unwrap_or(rest.len() - valid_up_to);
                count += invalid;
                rest = &rest[valid_up_to + invalid..];
            }
        }
    }
}

/// Iteration count of ranging over a string literal
pub fn string_literal_iterations(text: &str) -> Option<usize> {
    unquote_string(text).map(|bytes| range_iterations(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int_literal() {
        assert_eq!(parse_int_literal("0"), Some(0));
        assert_eq!(parse_int_literal("42"), Some(42));
        assert_eq!(parse_int_literal("1_000"), Some(1000));
        assert_eq!(parse_int_literal("0x2A"), Some(42));
        assert_eq!(parse_int_literal("0X_2a"), Some(42));
        assert_eq!(parse_int_literal("0o52"), Some(42));
        assert_eq!(parse_int_literal("052"), Some(42));
        assert_eq!(parse_int_literal("0b101010"), Some(42));
        assert_eq!(parse_int_literal("0x"), None);
        assert_eq!(parse_int_literal("99999999999999999999"), None);
    }

    #[test]
    fn test_unquote_interpreted() {
        assert_eq!(unquote_string(r#""Hello""#), Some(b"Hello".to_vec()));
        assert_eq!(unquote_string(r#""a\tb\n""#), Some(b"a\tb\n".to_vec()));
        assert_eq!(unquote_string(r#""\x41\101é""#), Some("AAé".as_bytes().to_vec()));
        assert_eq!(unquote_string(r#""""#), Some(Vec::new()));
        assert_eq!(unquote_string(r#""\q""#), None);
        assert_eq!(unquote_string("'a'"), None);
    }

    #[test]
    fn test_unquote_raw() {
        assert_eq!(unquote_string("`a\\n`"), Some(b"a\\n".to_vec()));
        assert_eq!(unquote_string("`a\r\nb`"), Some(b"a\nb".to_vec()));
    }

    #[test]
    fn test_range_iterations_counts_runes() {
        assert_eq!(string_literal_iterations(r#""Hello""#), Some(5));
        assert_eq!(string_literal_iterations(r#""""#), Some(0));
        assert_eq!(string_literal_iterations(r#""héllo""#), Some(5));
        assert_eq!(string_literal_iterations(r#""日本語""#), Some(3));
        // Each invalid byte is its own iteration
        assert_eq!(range_iterations(&[0xff, 0xfe, b'a']), 3);
        assert_eq!(range_iterations(&[0xe2, 0x82, b'a']), 3);
    }
}
