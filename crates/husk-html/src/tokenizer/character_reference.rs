//! Character reference decoding.
//!
//! References are resolved by direct lookahead from the `&` instead of the
//! dedicated character reference states: input is only consumed when a
//! reference actually matched, so a failed match needs no flushing.

use super::core::HTMLTokenizer;
use super::named_character_references::{MAX_ENTITY_NAME_LEN, lookup_entity};

/// Replacement for C1 control references (`&#128;` ... `&#159;`): browsers
/// read them as windows-1252 bytes. Unlisted values map to themselves.
const WINDOWS_1252_C1: [(u32, char); 27] = [
    (0x80, '\u{20AC}'),
    (0x82, '\u{201A}'),
    (0x83, '\u{0192}'),
    (0x84, '\u{201E}'),
    (0x85, '\u{2026}'),
    (0x86, '\u{2020}'),
    (0x87, '\u{2021}'),
    (0x88, '\u{02C6}'),
    (0x89, '\u{2030}'),
    (0x8A, '\u{0160}'),
    (0x8B, '\u{2039}'),
    (0x8C, '\u{0152}'),
    (0x8E, '\u{017D}'),
    (0x91, '\u{2018}'),
    (0x92, '\u{2019}'),
    (0x93, '\u{201C}'),
    (0x94, '\u{201D}'),
    (0x95, '\u{2022}'),
    (0x96, '\u{2013}'),
    (0x97, '\u{2014}'),
    (0x98, '\u{02DC}'),
    (0x99, '\u{2122}'),
    (0x9A, '\u{0161}'),
    (0x9B, '\u{203A}'),
    (0x9C, '\u{0153}'),
    (0x9E, '\u{017E}'),
    (0x9F, '\u{0178}'),
];

impl HTMLTokenizer {
    /// `&` in data or RCDATA: emit the decoded reference, or a literal `&`.
    pub(super) fn emit_character_reference(&mut self) {
        match self.consume_character_reference(false) {
            Some(decoded) => self.emit_str(&decoded),
            None => self.emit_char('&'),
        }
    }

    /// `&` inside an attribute value.
    pub(super) fn append_character_reference_to_attribute(&mut self) {
        let decoded = self.consume_character_reference(true);
        self.append_to_attribute_value(decoded.as_deref().unwrap_or("&"));
    }

    /// Try to decode the reference following an already consumed `&`.
    ///
    /// Returns the replacement text and advances past the reference, or
    /// returns `None` and leaves the input untouched.
    pub(super) fn consume_character_reference(&mut self, in_attribute: bool) -> Option<String> {
        let rest = self.remaining();

        if let Some(numeric) = rest.strip_prefix('#') {
            let Some((len, terminated, c)) = parse_numeric_reference(numeric) else {
                self.log_parse_error("absence-of-digits-in-numeric-character-reference");
                return None;
            };
            if !terminated {
                self.log_parse_error("missing-semicolon-after-character-reference");
            }
            self.current_pos += 1 + len;
            return Some(c.to_string());
        }

        let (len, replacement) = self.match_named_reference(in_attribute)?;
        self.current_pos += len;
        Some(replacement.to_string())
    }

    /// Longest named reference at the current position.
    fn match_named_reference(&self, in_attribute: bool) -> Option<(usize, &'static str)> {
        let rest = self.remaining();
        let name_len = rest
            .bytes()
            .take_while(u8::is_ascii_alphanumeric)
            .take(MAX_ENTITY_NAME_LEN - 1)
            .count();
        if name_len == 0 {
            return None;
        }

        if rest[name_len..].starts_with(';')
            && let Some(replacement) = lookup_entity(&rest[..=name_len])
        {
            return Some((name_len + 1, replacement));
        }

        // Legacy references without the semicolon, longest first.
        for len in (1..=name_len).rev() {
            let Some(replacement) = lookup_entity(&rest[..len]) else {
                continue;
            };
            // `href="?a=1&copy=2"` keeps `&copy` literal.
            if in_attribute
                && rest[len..]
                    .chars()
                    .next()
                    .is_some_and(|c| c == '=' || c.is_ascii_alphanumeric())
            {
                return None;
            }
            self.log_parse_error("missing-semicolon-after-character-reference");
            return Some((len, replacement));
        }

        if rest[name_len..].starts_with(';') {
            self.log_parse_error("unknown-named-character-reference");
        }
        None
    }
}

/// Parse the digits after `&#`. Returns the number of bytes consumed
/// (including an `x` prefix and a trailing `;`), whether a `;` was present,
/// and the decoded character.
fn parse_numeric_reference(s: &str) -> Option<(usize, bool, char)> {
    let (radix, prefix_len) = match s.as_bytes().first() {
        Some(b'x' | b'X') => (16, 1),
        _ => (10, 0),
    };

    let digits_len = s[prefix_len..]
        .bytes()
        .take_while(|b| {
            if radix == 16 {
                b.is_ascii_hexdigit()
            } else {
                b.is_ascii_digit()
            }
        })
        .count();
    if digits_len == 0 {
        return None;
    }

    let digits = &s[prefix_len..prefix_len + digits_len];
    // Overflow is just another out-of-range value.
    let code = u32::from_str_radix(digits, radix).unwrap_or(u32::MAX);

    let mut len = prefix_len + digits_len;
    let terminated = s[len..].starts_with(';');
    if terminated {
        len += 1;
    }

    Some((len, terminated, numeric_reference_char(code)))
}

fn numeric_reference_char(code: u32) -> char {
    match code {
        0 | 0xD800..=0xDFFF | 0x11_0000.. => char::REPLACEMENT_CHARACTER,
        0x80..=0x9F => WINDOWS_1252_C1
            .iter()
            .find(|(c1, _)| *c1 == code)
            .map_or_else(
                || char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER),
                |&(_, c)| c,
            ),
        _ => char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER),
    }
}
