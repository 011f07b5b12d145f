// Bitmap font rasterization and atlas packing.

use yantra_core::text::*;

#[test]
fn single_glyph_has_expected_coverage() {
    let bmp = rasterize("I", 1);
    assert_eq!(bmp.width, CELL_W + 2);
    assert_eq!(bmp.height, CELL_H + 2);
    // 'I' is 3 + 5*1 + 3 lit pixels
    let lit = bmp.pixels.iter().filter(|&&p| p == 255).count();
    assert_eq!(lit, 11);
}

#[test]
fn lowercase_folds_and_unknown_is_blank() {
    assert_eq!(rasterize("yantra", 2), rasterize("YANTRA", 2));
    let blank = rasterize("~", 1);
    assert!(blank.pixels.iter().all(|&p| p == 0));
}

#[test]
fn scale_multiplies_dimensions() {
    let one = rasterize("Jhapa, NP", 1);
    let four = rasterize("Jhapa, NP", 4);
    assert_eq!(four.width, one.width * 4);
    assert_eq!(four.height, one.height * 4);
}

#[test]
fn lines_are_centered() {
    // "I" on the second line sits under the middle of "III"
    let bmp = rasterize("III\nI", 1);
    let row = CELL_H + 1 + 1; // top row of the second line's glyph
    let lit: Vec<u32> = (0..bmp.width).filter(|&x| bmp.at(x, row) == 255).collect();
    let mid = bmp.width as f32 / 2.0;
    let center = (lit[0] + lit[lit.len() - 1]) as f32 / 2.0 + 0.5;
    assert!((center - mid).abs() <= 1.0, "{lit:?} mid {mid}");
}

#[test]
fn atlas_entries_cover_disjoint_rows() {
    let atlas = TextAtlas::build(&["Yantra Inc,\nSoftware Company of", "About", "Contact"], 2);
    assert_eq!(atlas.entries.len(), 3);
    assert_eq!(atlas.entries[0].lines, 2);
    for pair in atlas.entries.windows(2) {
        assert!(pair[0].uv_rect[3] <= pair[1].uv_rect[1] + 1e-6);
    }
    for e in &atlas.entries {
        assert!(e.uv_rect[0] >= 0.0 && e.uv_rect[2] <= 1.0);
        assert!(e.uv_rect[1] >= 0.0 && e.uv_rect[3] <= 1.0 + 1e-6);
        assert!(e.aspect > 0.0);
    }
    assert_eq!(
        atlas.bitmap.pixels.len(),
        (atlas.bitmap.width * atlas.bitmap.height) as usize
    );
}
