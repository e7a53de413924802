use barscan_base::Size;

/// Extracts the luma plane from YUYV (YUV 4:2:2) pixel data.
///
/// YUYV packs as `[Y0, U, Y1, V, ...]`; every even byte is a luma sample,
/// which is exactly the grayscale image a barcode decoder needs.
///
/// Returns `None` if the input is shorter than `width * height * 2` bytes.
pub fn yuyv_to_luma(data: &[u8], width: u32, height: u32) -> Option<Vec<u8>> {
    let pixel_count = (width as usize) * (height as usize);
    let expected_len = pixel_count * 2;
    if data.len() < expected_len {
        return None;
    }

    Some(data[..expected_len].iter().step_by(2).copied().collect())
}

/// Decodes one MJPEG frame to 8-bit luma.
pub fn mjpeg_to_luma(data: &[u8]) -> Result<(Size, Vec<u8>), image::ImageError> {
    let decoded = image::load_from_memory_with_format(data, image::ImageFormat::Jpeg)?;
    let luma = decoded.into_luma8();
    let size = Size::new(luma.width(), luma.height());
    Ok((size, luma.into_raw()))
}
