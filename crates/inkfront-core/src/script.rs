//! Script classification and kinsoku (line breaking prohibition) tables.

use crate::font::{BreakFlags, GlyphMetrics};

/// Inclusive code point ranges drawn upright in vertical text.
const SCRIPT_RANGES: &[(u32, u32)] = &[
    (0x1100, 0x11FF),   // Hangul Jamo
    (0x2E80, 0x2EFF),   // CJK Radicals Supplement
    (0x2F00, 0x2FDF),   // Kangxi Radicals
    (0x3000, 0x303F),   // CJK Symbols and Punctuation
    (0x3040, 0x309F),   // Hiragana
    (0x30A0, 0x30FF),   // Katakana
    (0x3100, 0x312F),   // Bopomofo
    (0x3130, 0x318F),   // Hangul Compatibility Jamo
    (0x31F0, 0x31FF),   // Katakana Phonetic Extensions
    (0x3200, 0x32FF),   // Enclosed CJK Letters and Months
    (0x3300, 0x33FF),   // CJK Compatibility
    (0x3400, 0x4DBF),   // CJK Unified Ideographs Extension A
    (0x4E00, 0x9FFF),   // CJK Unified Ideographs
    (0xA960, 0xA97F),   // Hangul Jamo Extended-A
    (0xAC00, 0xD7AF),   // Hangul Syllables
    (0xD7B0, 0xD7FF),   // Hangul Jamo Extended-B
    (0xF900, 0xFAFF),   // CJK Compatibility Ideographs
    (0xFF01, 0xFF60),   // Fullwidth ASCII variants
    (0xFF61, 0xFF9F),   // Halfwidth CJK punctuation and Katakana
    (0xFFA0, 0xFFDC),   // Halfwidth Hangul
    (0xFFE0, 0xFFE6),   // Fullwidth signs
    (0x20000, 0x2A6DF), // Extension B
    (0x2A700, 0x2EBEF), // Extensions C..F and I
    (0x2F800, 0x2FA1F), // CJK Compatibility Ideographs Supplement
    (0x30000, 0x323AF), // Extensions G and H
];

/// Characters that must not start a line.
const NO_BREAK_BEFORE: &[char] = &[
    ',', '.', '!', '?', ')', ']', '}', ':', ';', //
    '、', '。', '，', '．', '・', '：', '；', '？', '！', '゛', '゜', //
    'ヽ', 'ヾ', 'ゝ', 'ゞ', '々', 'ー', '‐', '〟', '…', '‥', //
    '」', '』', '】', '〕', '〉', '》', '）', '］', '｝', '〙', '〗', //
    'ぁ', 'ぃ', 'ぅ', 'ぇ', 'ぉ', 'っ', 'ゃ', 'ゅ', 'ょ', 'ゎ', 'ゕ', 'ゖ', //
    'ァ', 'ィ', 'ゥ', 'ェ', 'ォ', 'ッ', 'ャ', 'ュ', 'ョ', 'ヮ', 'ヵ', 'ヶ', //
    '｡', '｣', '､', '･', 'ｧ', 'ｨ', 'ｩ', 'ｪ', //
    'ｫ', 'ｬ', 'ｭ', 'ｮ', 'ｯ', 'ｰ',
];

/// Characters that must not end a line.
const NO_BREAK_AFTER: &[char] = &[
    '(', '[', '{', //
    '「', '『', '【', '〔', '〈', '《', '（', '［', '｛', '〝', '〘', '〖', //
    '｢',
];

/// CJK ideograph, kana, hangul or fullwidth form.
pub fn is_script_glyph(code_point: u32) -> bool {
    SCRIPT_RANGES
        .binary_search_by(|&(start, end)| {
            if end < code_point {
                core::cmp::Ordering::Less
            } else if start > code_point {
                core::cmp::Ordering::Greater
            } else {
                core::cmp::Ordering::Equal
            }
        })
        .is_ok()
}

/// Closing punctuation and small kana that may never begin a line.
pub fn is_no_break_before(code_point: u32) -> bool {
    contains(NO_BREAK_BEFORE, code_point)
}

/// Opening brackets that may never end a line.
pub fn is_no_break_after(code_point: u32) -> bool {
    contains(NO_BREAK_AFTER, code_point)
}

fn contains(table: &[char], code_point: u32) -> bool {
    char::from_u32(code_point).is_some_and(|ch| table.contains(&ch))
}

/// Line breaking constraints of one placed glyph: static tables combined with
/// the flags baked into the font.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BreakClass {
    pub no_break_before: bool,
    pub no_break_after: bool,
}

impl BreakClass {
    pub fn of(code_point: u32, glyph: Option<&GlyphMetrics>) -> Self {
        let flags = glyph.map_or(BreakFlags::EMPTY, |g| g.break_flags);
        Self {
            no_break_before: is_no_break_before(code_point)
                || flags.contains(BreakFlags::NO_BREAK_BEFORE),
            no_break_after: is_no_break_after(code_point)
                || flags.contains(BreakFlags::NO_BREAK_AFTER),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_ranges_are_sorted_and_disjoint() {
        for pair in SCRIPT_RANGES.windows(2) {
            assert!(pair[0].0 <= pair[0].1);
            assert!(pair[0].1 < pair[1].0, "{:x?}", pair);
        }
    }

    #[test]
    fn classifies_cjk_and_latin() {
        for ch in ['あ', 'ア', 'ｱ', '漢', '한', 'ㄱ', '。', '「', 'Ａ', '　', '𠮷'] {
            assert!(is_script_glyph(ch as u32), "{ch}");
        }
        for ch in ['A', 'z', '0', ' ', 'é', 'Ω', '—', '😀'] {
            assert!(!is_script_glyph(ch as u32), "{ch}");
        }
    }

    #[test]
    fn range_edges_are_inclusive() {
        assert!(is_script_glyph(0x4E00));
        assert!(is_script_glyph(0x9FFF));
        assert!(!is_script_glyph(0x4DC0));
        assert!(!is_script_glyph(0xFF00));
        assert!(is_script_glyph(0xFF01));
    }

    #[test]
    fn kinsoku_tables() {
        for ch in ['、', '。', '」', '』', '】', '）', 'っ', 'ャ', '!', ')'] {
            assert!(is_no_break_before(ch as u32), "{ch}");
            assert!(!is_no_break_after(ch as u32), "{ch}");
        }
        for ch in ['「', '『', '【', '（', '〈', '《', '(', '['] {
            assert!(is_no_break_after(ch as u32), "{ch}");
            assert!(!is_no_break_before(ch as u32), "{ch}");
        }
        assert!(!is_no_break_before('あ' as u32));
        assert!(!is_no_break_after('あ' as u32));
        assert!(!is_no_break_before(0xD800));
    }

    #[test]
    fn font_flags_extend_static_tables() {
        let glyph = GlyphMetrics::new('x' as u32, 4, 0, 0, 0)
            .with_break_flags(BreakFlags::NO_BREAK_AFTER);
        let class = BreakClass::of('x' as u32, Some(&glyph));
        assert!(class.no_break_after);
        assert!(!class.no_break_before);

        assert_eq!(BreakClass::of('x' as u32, None), BreakClass::default());
        assert!(BreakClass::of('」' as u32, None).no_break_before);
    }
}
