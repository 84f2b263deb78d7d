//! Character escaping for the N-Triples grammar.
//!
//! Two fixed substitution tables, one for IRI text and one for literal text.
//! Both functions are pure, total over their input, and apply a single
//! substitution pass: replacement text is never re-escaped, so escaping a
//! backslash cannot cascade.

/// Punctuation the IRIREF production forbids, in addition to the
/// `U+0000..=U+0020` control range.
const IRI_FORBIDDEN: [char; 9] = ['<', '>', '"', '{', '}', '|', '^', '`', '\\'];

fn iri_forbidden(c: char) -> bool {
    c <= '\u{20}' || IRI_FORBIDDEN.contains(&c)
}

/// Escape text for use inside an IRIREF.
///
/// Forbidden characters become fixed six-character `\uXXXX` escapes with
/// uppercase, zero-padded hex. Everything else passes through unchanged,
/// non-ASCII included; the text is treated as opaque and never re-encoded.
pub fn escape_iri(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if iri_forbidden(c) {
            out.push_str(&format!("\\u{:04X}", c as u32));
        } else {
            out.push(c);
        }
    }
    out
}

/// Escape text for use inside a STRING_LITERAL_QUOTE.
///
/// Only `\n`, `\r`, `"` and `\` are rewritten; other control characters pass
/// through. The literal escape set is deliberately narrower than the IRI
/// one, mirroring the grammar.
pub fn escape_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => out.push(c),
        }
    }
    out
}
