//! Forgiving UTF-8 decoding over borrowed bytes.
//!
//! Malformed input never stops decoding: the offending byte is consumed and
//! reported as U+FFFD so callers always make forward progress.

/// Unicode replacement character.
pub const REPLACEMENT: u32 = 0xFFFD;

/// Read position over an immutable byte slice.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ByteCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Cursor starting at `pos` (clamped to the end of `bytes`).
    pub fn at(bytes: &'a [u8], pos: usize) -> Self {
        Self {
            bytes,
            pos: pos.min(bytes.len()),
        }
    }

    pub const fn position(&self) -> usize {
        self.pos
    }

    pub const fn is_at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    pub fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }

    /// Decodes one code point and advances past it.
    pub fn next_code_point(&mut self) -> Option<u32> {
        let rest = self.remaining();
        let lead = *rest.first()?;

        let (len, min, initial) = match lead {
            0x00..=0x7F => {
                self.pos += 1;
                return Some(lead as u32);
            }
            0xC2..=0xDF => (2, 0x80, (lead & 0x1F) as u32),
            0xE0..=0xEF => (3, 0x800, (lead & 0x0F) as u32),
            0xF0..=0xF4 => (4, 0x1_0000, (lead & 0x07) as u32),
            // Stray continuation, overlong-only leads (C0/C1) and F5..FF.
            _ => return Some(self.reject()),
        };

        if rest.len() < len {
            return Some(self.reject());
        }

        let mut cp = initial;
        for &byte in &rest[1..len] {
            if byte & 0xC0 != 0x80 {
                return Some(self.reject());
            }
            cp = (cp << 6) | (byte & 0x3F) as u32;
        }

        if cp < min || cp > 0x10_FFFF || (0xD800..=0xDFFF).contains(&cp) {
            return Some(self.reject());
        }

        self.pos += len;
        Some(cp)
    }

    fn reject(&mut self) -> u32 {
        self.pos += 1;
        REPLACEMENT
    }
}

impl Iterator for ByteCursor<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_code_point()
    }
}

/// Decodes one code point from `cursor`, `None` exactly at end of input.
pub fn next_code_point(cursor: &mut ByteCursor<'_>) -> Option<u32> {
    cursor.next_code_point()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8]) -> Vec<u32> {
        ByteCursor::new(bytes).collect()
    }

    fn encode(cps: &[u32]) -> Vec<u8> {
        let mut out = Vec::new();
        for &cp in cps {
            let ch = char::from_u32(cp).unwrap();
            let mut buf = [0u8; 4];
            out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
        }
        out
    }

    #[test]
    fn valid_text_round_trips() {
        for text in [
            "",
            "A",
            "Hello, world",
            "こんにちは「世界」",
            "mixed ｶﾀｶﾅ 한국어 😀 𠮷野家",
            "\u{0}\u{7F}\u{80}\u{7FF}\u{800}\u{FFFF}\u{10000}\u{10FFFF}",
        ] {
            let cps = decode(text.as_bytes());
            assert_eq!(cps.len(), text.chars().count());
            assert_eq!(encode(&cps), text.as_bytes(), "{text:?}");
        }
    }

    #[test]
    fn end_of_input_is_none_and_stays_none() {
        let mut cursor = ByteCursor::new(b"a");
        assert_eq!(next_code_point(&mut cursor), Some('a' as u32));
        assert_eq!(next_code_point(&mut cursor), None);
        assert_eq!(next_code_point(&mut cursor), None);
        assert!(cursor.is_at_end());
    }

    #[test]
    fn stray_continuation_byte_is_replaced() {
        assert_eq!(decode(&[0x80, b'a']), vec![REPLACEMENT, 'a' as u32]);
    }

    #[test]
    fn truncated_sequence_consumes_one_byte_at_a_time() {
        // First two bytes of U+3042.
        assert_eq!(decode(&[0xE3, 0x81]), vec![REPLACEMENT, REPLACEMENT]);
    }

    #[test]
    fn interrupted_sequence_resumes_at_next_byte() {
        assert_eq!(
            decode(&[0xE3, b'x', b'y']),
            vec![REPLACEMENT, 'x' as u32, 'y' as u32]
        );
    }

    #[test]
    fn overlong_and_surrogate_forms_are_rejected() {
        assert_eq!(decode(&[0xC0, 0xAF]), vec![REPLACEMENT, REPLACEMENT]);
        assert_eq!(
            decode(&[0xE0, 0x80, 0xAF]),
            vec![REPLACEMENT, REPLACEMENT, REPLACEMENT]
        );
        assert_eq!(
            decode(&[0xED, 0xA0, 0x80]),
            vec![REPLACEMENT, REPLACEMENT, REPLACEMENT]
        );
        assert_eq!(decode(&[0xF5, 0x80]), vec![REPLACEMENT, REPLACEMENT]);
    }

    #[test]
    fn every_call_advances_on_arbitrary_bytes() {
        use rand::{Rng, SeedableRng, rngs::StdRng};

        let mut rng = StdRng::seed_from_u64(0x5EED);
        for _ in 0..200 {
            let len = rng.gen_range(0..64);
            let bytes: Vec<u8> = (0..len).map(|_| rng.gen_range(0..=255u8)).collect();

            let mut cursor = ByteCursor::new(&bytes);
            let mut calls = 0;
            loop {
                let before = cursor.position();
                match cursor.next_code_point() {
                    Some(_) => {
                        let advanced = cursor.position() - before;
                        assert!((1..=4).contains(&advanced));
                        assert!(cursor.position() <= bytes.len());
                    }
                    None => {
                        assert_eq!(before, bytes.len());
                        break;
                    }
                }
                calls += 1;
                assert!(calls <= bytes.len());
            }
        }
    }

    #[test]
    fn cursor_can_start_mid_buffer() {
        let text = "aあb";
        let mut cursor = ByteCursor::at(text.as_bytes(), 1);
        assert_eq!(cursor.next_code_point(), Some('あ' as u32));
        assert_eq!(cursor.position(), 4);
        assert_eq!(ByteCursor::at(b"ab", 10).position(), 2);
    }
}
