use barscan_base::Size;
use barscan_camera::{CameraError, Frame, PixelFormat};
use image::{GrayImage, ImageFormat, Luma};
use std::io::Cursor;

#[test]
fn test_luma_frame_passthrough() {
    let frame = Frame::new(Size::new(2, 2), PixelFormat::Luma8, vec![1, 2, 3, 4]);
    let (size, luma) = frame.to_luma().unwrap();
    assert_eq!(size, Size::new(2, 2));
    assert_eq!(luma, vec![1, 2, 3, 4]);
}

#[test]
fn test_luma_frame_too_short() {
    let frame = Frame::new(Size::new(2, 2), PixelFormat::Luma8, vec![1, 2, 3]);
    assert!(matches!(frame.to_luma(), Err(CameraError::Stream(_))));
}

#[test]
fn test_yuyv_frame_to_luma() {
    let frame = Frame::new(Size::new(2, 1), PixelFormat::Yuyv, vec![50, 128, 60, 128]);
    let (_, luma) = frame.to_luma().unwrap();
    assert_eq!(luma, vec![50, 60]);
}

#[test]
fn test_yuyv_frame_too_short() {
    let frame = Frame::new(Size::new(4, 4), PixelFormat::Yuyv, vec![0; 8]);
    assert!(matches!(frame.to_luma(), Err(CameraError::Stream(_))));
}

#[test]
fn test_mjpeg_frame_to_luma() {
    let img = GrayImage::from_pixel(16, 8, Luma([200u8]));
    let mut jpeg = Vec::new();
    img.write_to(&mut Cursor::new(&mut jpeg), ImageFormat::Jpeg).unwrap();

    let frame = Frame::new(Size::ZERO, PixelFormat::Mjpeg, jpeg);
    let (size, luma) = frame.to_luma().unwrap();

    assert_eq!(size, Size::new(16, 8));
    assert_eq!(luma.len(), 16 * 8);
    // lossy, but a flat image stays close to its value
    assert!(luma.iter().all(|&v| v.abs_diff(200) < 8));
}

#[test]
fn test_mjpeg_garbage_is_decode_error() {
    let frame = Frame::new(Size::new(1, 1), PixelFormat::Mjpeg, vec![0, 1, 2, 3]);
    assert!(matches!(frame.to_luma(), Err(CameraError::Decode(_))));
}
