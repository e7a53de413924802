use barscan_base::Size;
use barscan_camera::{CameraConstraints, DimensionRange, FacingMode};

#[test]
fn test_constraints_defaults() {
    let constraints = CameraConstraints::default();

    assert_eq!(constraints.facing(), FacingMode::Environment);
    assert_eq!(constraints.width(), DimensionRange::new(640, 1280, 1920));
    assert_eq!(constraints.height(), DimensionRange::new(480, 720, 1080));
    assert!((constraints.aspect_ratio() - 16.0 / 9.0).abs() < 1e-9);
    assert_eq!(constraints.frame_rate(), 30);
    assert_eq!(constraints.device(), "/dev/video0");
    assert_eq!(constraints.buffer_count(), 4);
}

#[test]
fn test_constraints_builder() {
    let constraints = CameraConstraints::default()
        .with_facing(FacingMode::User)
        .with_width(DimensionRange::new(320, 640, 800))
        .with_height(DimensionRange::new(240, 480, 600))
        .with_aspect_ratio(4.0 / 3.0)
        .with_frame_rate(15)
        .with_device("/dev/video2".to_string())
        .with_buffer_count(2);

    assert_eq!(constraints.facing(), FacingMode::User);
    assert_eq!(constraints.target_size(), Size::new(640, 480));
    assert!((constraints.aspect_ratio() - 4.0 / 3.0).abs() < 1e-9);
    assert_eq!(constraints.frame_rate(), 15);
    assert_eq!(constraints.device(), "/dev/video2");
    assert_eq!(constraints.buffer_count(), 2);
}

#[test]
fn test_range_target_is_clamped() {
    assert_eq!(DimensionRange::new(640, 4000, 1920).target(), 1920);
    assert_eq!(DimensionRange::new(640, 100, 1920).target(), 640);
    assert_eq!(DimensionRange::new(640, 1280, 1920).target(), 1280);
    // inverted bounds collapse onto min
    assert_eq!(DimensionRange::new(800, 1280, 600).target(), 800);
}

#[test]
fn test_accepts_checks_both_dimensions() {
    let constraints = CameraConstraints::default();

    assert!(constraints.accepts(Size::new(1280, 720)));
    assert!(constraints.accepts(Size::new(640, 480)));
    assert!(!constraints.accepts(Size::new(320, 240)));
    assert!(!constraints.accepts(Size::new(1280, 2000)));
}
