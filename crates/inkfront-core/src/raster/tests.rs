use super::*;
use crate::{
    config::WritingDirection,
    font::{FontTable, IDEOGRAPHIC_SPACE, SPACE},
    testing::{Recorder, TestFont, frame, ink, pixels_with},
};

fn latin() -> TestFont {
    TestFont::new(16, 4)
        .solid('A', 8, 8, 2)
        .glyph(GlyphMetrics::new('B' as u32, 4, 0, 3, 1), &[0b1010_0000])
        // Only the top-left pixel of a 4x2 box.
        .glyph(GlyphMetrics::new('L' as u32, 5, 0, 4, 2), &[0x80, 0x00])
        .solid('あ', 16, 8, 8)
}

#[test]
fn quarter_turns_map_corners() {
    // Top-left pixel of a 3 wide, 2 tall bitmap.
    assert_eq!(Rotation::Deg0.transform(0, 0, 3, 2), (0, 0));
    assert_eq!(Rotation::Cw90.transform(0, 0, 3, 2), (1, 0));
    assert_eq!(Rotation::Deg180.transform(0, 0, 3, 2), (2, 1));
    assert_eq!(Rotation::Ccw270.transform(0, 0, 3, 2), (0, 2));

    assert_eq!(Rotation::Cw90.rotated_size(3, 2), (2, 3));
    assert_eq!(Rotation::Deg180.rotated_size(3, 2), (3, 2));
    assert_eq!(Rotation::from_quarter_turns(5), Rotation::Cw90);
}

#[test]
fn rotations_stay_inside_the_rotated_box() {
    for rotation in [
        Rotation::Deg0,
        Rotation::Cw90,
        Rotation::Deg180,
        Rotation::Ccw270,
    ] {
        let (rw, rh) = rotation.rotated_size(5, 3);
        let mut seen = Vec::new();
        for row in 0..3 {
            for col in 0..5 {
                let (dx, dy) = rotation.transform(col, row, 5, 3);
                assert!((0..rw).contains(&dx) && (0..rh).contains(&dy));
                seen.push((dx, dy));
            }
        }
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 15, "{rotation:?} is not a bijection");
    }
}

#[test]
fn missing_glyph_advances_without_writing() {
    let font = latin();
    let table = font.table();
    let mut config = TextRenderConfig::new(&table);
    let mut sink = Recorder::new(64, 32);

    assert_eq!(draw_char(&mut sink, 0, 0, 'Z' as u32, &config), 8);
    config.character_spacing = 2;
    assert_eq!(draw_char(&mut sink, 0, 0, 'Z' as u32, &config), 10);
    assert!(sink.writes.is_empty());
}

#[test]
fn spaces_only_advance() {
    let font = latin();
    let table = font.table();
    let mut config = TextRenderConfig::new(&table);
    config.background_transparent = false;
    let mut sink = Recorder::new(64, 32);

    assert_eq!(draw_char(&mut sink, 0, 0, SPACE, &config), 8);
    assert_eq!(draw_char(&mut sink, 0, 0, IDEOGRAPHIC_SPACE, &config), 16);
    assert!(sink.writes.is_empty());
}

#[test]
fn solid_glyph_fills_its_box() {
    let font = latin();
    let table = font.table();
    let config = TextRenderConfig::new(&table);
    let mut fb = frame(16, 8);

    assert_eq!(draw_char(&mut fb, 1, 1, 'A' as u32, &config), 8);

    let expected: Vec<_> = (1..3)
        .flat_map(|y| (1..9).map(move |x| (x, y)))
        .collect();
    assert_eq!(ink(&fb), expected);
}

#[test]
fn bits_are_read_msb_first() {
    let font = latin();
    let table = font.table();
    let config = TextRenderConfig::new(&table);
    let mut fb = frame(8, 2);

    draw_char(&mut fb, 0, 0, 'B' as u32, &config);
    assert_eq!(ink(&fb), vec![(0, 0), (2, 0)]);
}

#[test]
fn opaque_background_covers_the_bitmap_box() {
    let font = latin();
    let table = font.table();
    let mut config = TextRenderConfig::new(&table);
    config.background_transparent = false;
    config.background_color = 9;
    let mut fb = frame(8, 2);
    fb.clear(5);

    draw_char(&mut fb, 0, 0, 'B' as u32, &config);
    assert_eq!(fb.pixel(0, 0), Some(0));
    assert_eq!(fb.pixel(1, 0), Some(9));
    assert_eq!(fb.pixel(2, 0), Some(0));
    assert_eq!(fb.pixel(3, 0), Some(5));
    assert_eq!(fb.pixel(0, 1), Some(5));
}

#[test]
fn transparent_background_leaves_unset_bits_alone() {
    let font = latin();
    let table = font.table();
    let config = TextRenderConfig::new(&table);
    let mut fb = frame(8, 2);
    fb.clear(5);

    draw_char(&mut fb, 0, 0, 'B' as u32, &config);
    assert_eq!(fb.pixel(1, 0), Some(5));
}

#[test]
fn bold_restrikes_one_pixel_along_the_line() {
    let font = latin();
    let table = font.table();
    let mut config = TextRenderConfig::new(&table);
    config.bold = true;
    let mut fb = frame(16, 4);

    assert_eq!(draw_char(&mut fb, 0, 0, 'A' as u32, &config), 8);
    let painted = ink(&fb);
    assert_eq!(painted.len(), 18);
    assert!(painted.contains(&(8, 0)));
    assert!(!painted.contains(&(9, 0)));
}

#[test]
fn bold_restrike_over_opaque_background_paints_ink_only() {
    let font = latin();
    let table = font.table();
    let mut config = TextRenderConfig::new(&table);
    config.bold = true;
    config.background_transparent = false;
    config.background_color = 9;
    let mut fb = frame(8, 2);
    fb.clear(5);

    draw_char(&mut fb, 0, 0, 'L' as u32, &config);
    let top: Vec<_> = (0..6).map(|x| fb.pixel(x, 0)).collect();
    let bottom: Vec<_> = (0..6).map(|x| fb.pixel(x, 1)).collect();
    assert_eq!(top, [0, 0, 9, 9, 5, 5].map(Some));
    assert_eq!(bottom, [9, 9, 9, 9, 5, 5].map(Some));
}

#[test]
fn underline_sits_below_the_line_box() {
    let font = latin();
    let table = font.table();
    let mut config = TextRenderConfig::new(&table);
    config.underline = true;
    let mut fb = frame(32, 8);

    let advance = draw_char(&mut fb, 0, 0, 'A' as u32, &config);
    draw_char(&mut fb, advance, 0, SPACE, &config);

    // max_glyph_height 4, so the underline is on row 5.
    let underline: Vec<_> = ink(&fb).into_iter().filter(|&(_, y)| y == 5).collect();
    assert_eq!(underline, (0..16).map(|x| (x, 5)).collect::<Vec<_>>());
}

#[test]
fn glyph_offsets_shift_horizontal_placement() {
    let font = TestFont::new(16, 4).glyph(
        GlyphMetrics::new('o' as u32, 6, 0, 1, 1).with_offsets(2, 3),
        &[0x80],
    );
    let table = font.table();
    let config = TextRenderConfig::new(&table);
    let mut fb = frame(8, 8);

    assert_eq!(draw_char(&mut fb, 1, 1, 'o' as u32, &config), 6);
    assert_eq!(ink(&fb), vec![(3, 4)]);
}

#[test]
fn vertical_latin_is_rotated_and_centred() {
    let font = latin();
    let table = font.table();
    let mut config = TextRenderConfig::new(&table);
    config.writing_direction = WritingDirection::Vertical;
    let mut fb = frame(16, 8);

    // 4x2 turns into 2x4, centred in a 16px column.
    assert_eq!(draw_char(&mut fb, 0, 0, 'L' as u32, &config), 5);
    assert_eq!(ink(&fb), vec![(8, 0)]);
}

#[test]
fn vertical_upright_latin_stacks_by_height() {
    let font = latin();
    let table = font.table();
    let mut config = TextRenderConfig::new(&table);
    config.writing_direction = WritingDirection::Vertical;
    config.rotate_non_script_glyphs_in_vertical_mode = false;
    let mut fb = frame(16, 8);

    assert_eq!(draw_char(&mut fb, 0, 0, 'L' as u32, &config), 2);
    assert_eq!(ink(&fb), vec![(6, 0)]);
    assert_eq!(char_advance('L' as u32, &config), 2);
}

#[test]
fn vertical_script_glyphs_stay_upright() {
    let font = latin();
    let table = font.table();
    let mut config = TextRenderConfig::new(&table);
    config.writing_direction = WritingDirection::Vertical;
    let mut fb = frame(16, 16);

    assert_eq!(draw_char(&mut fb, 0, 0, 'あ' as u32, &config), 16);
    let painted = ink(&fb);
    assert_eq!(painted.len(), 64);
    assert_eq!(painted.first(), Some(&(4, 0)));
    assert_eq!(painted.last(), Some(&(11, 7)));
}

#[test]
fn rotation_hint_applies_to_script_glyphs() {
    let glyph = GlyphMetrics::new('ー' as u32, 16, 0, 8, 2).with_rotation(Rotation::Cw90);
    let font = TestFont::new(16, 16).glyph(glyph, &[0xFF; 2]);
    let table = font.table();
    let mut config = TextRenderConfig::new(&table);

    assert_eq!(glyph_rotation(&glyph, &config), Rotation::Deg0);
    config.writing_direction = WritingDirection::Vertical;
    assert_eq!(glyph_rotation(&glyph, &config), Rotation::Cw90);

    let mut fb = frame(16, 16);
    draw_char(&mut fb, 0, 0, 'ー' as u32, &config);
    let painted = ink(&fb);
    assert_eq!(painted.len(), 16);
    assert!(painted.iter().all(|&(x, _)| x == 7 || x == 8));
}

#[test]
fn writes_off_the_surface_are_dropped() {
    let font = latin();
    let table = font.table();
    let config = TextRenderConfig::new(&table);
    let mut fb = frame(6, 2);

    assert_eq!(draw_char(&mut fb, -4, 0, 'A' as u32, &config), 8);
    assert_eq!(ink(&fb).len(), 8);
    assert_eq!(pixels_with(&fb, 0).iter().map(|&(x, _)| x).max(), Some(3));
}

#[test]
fn undrawable_font_returns_zero() {
    let table = FontTable::new(0, 4, &[], &[]);
    let config = TextRenderConfig::new(&table);
    let mut sink = Recorder::new(8, 8);

    assert_eq!(draw_char(&mut sink, 0, 0, 'A' as u32, &config), 0);
    assert!(sink.writes.is_empty());
}
