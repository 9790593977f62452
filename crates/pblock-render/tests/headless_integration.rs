//! Headless rendering: recorded commands replayed into pixels, and colors
//! arriving through serde.

use pblock_core::geometry::{Point, Rect};
use pblock_render::{DrawSurface, Paint, PackedRgba, PixelBuffer, RecordingSurface};
use proptest::prelude::*;

#[test]
fn replay_into_pixels_matches_direct_draw() {
    let fill = Paint::fill(PackedRgba::YELLOW);
    let line = Paint::stroke(PackedRgba::BLACK, 2.0);

    let mut recorder = RecordingSurface::new();
    recorder.fill_rect(Rect::new(0.0, 0.0, 6.0, 4.0), &fill);
    recorder.stroke_rect(Rect::new(0.0, 0.0, 12.0, 4.0), &line);
    recorder.line(Point::new(6.0, 0.0), Point::new(6.0, 4.0), &line);

    let mut replayed = PixelBuffer::new(12, 4);
    recorder.replay(&mut replayed);

    let mut direct = PixelBuffer::new(12, 4);
    direct.fill_rect(Rect::new(0.0, 0.0, 6.0, 4.0), &fill);
    direct.stroke_rect(Rect::new(0.0, 0.0, 12.0, 4.0), &line);
    direct.line(Point::new(6.0, 0.0), Point::new(6.0, 4.0), &line);

    assert_eq!(replayed, direct);
}

#[test]
fn color_deserializes_from_strings_and_integers() {
    let parsed: Vec<PackedRgba> =
        serde_json::from_str(r##"["#FFFF00", "white", 4278190080, -16777216]"##)
            .expect("valid colors");
    assert_eq!(
        parsed,
        vec![
            PackedRgba::YELLOW,
            PackedRgba::WHITE,
            PackedRgba::BLACK,
            PackedRgba::BLACK,
        ]
    );
}

#[test]
fn color_deserialize_reports_bad_input() {
    let err = serde_json::from_str::<PackedRgba>(r##""#12""##).unwrap_err();
    assert!(err.to_string().contains("invalid hex color"), "{err}");

    let err = serde_json::from_str::<PackedRgba>("true").unwrap_err();
    assert!(err.to_string().contains("color"), "{err}");
}

proptest! {
    #[test]
    fn fill_never_paints_outside_rect(
        left in -5.0f32..20.0,
        width in 0.0f32..20.0,
        top in -5.0f32..10.0,
        height in 0.0f32..10.0,
    ) {
        let rect = Rect::new(left, top, left + width, top + height);
        let mut buf = PixelBuffer::new(16, 8);
        buf.fill_rect(rect, &Paint::fill(PackedRgba::RED));
        for y in 0..8u16 {
            for x in 0..16u16 {
                let center = Point::new(f32::from(x) + 0.5, f32::from(y) + 0.5);
                let painted = buf.get(x, y) == Some(PackedRgba::RED);
                prop_assert_eq!(painted, rect.contains(center), "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn argb_round_trip(argb in any::<u32>()) {
        prop_assert_eq!(PackedRgba::from_argb(argb).to_argb(), argb);
        let c = PackedRgba::from_argb(argb);
        prop_assert_eq!(PackedRgba::parse(&c.to_string()), Ok(c));
    }
}
