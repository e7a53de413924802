use crate::{CameraError, convert};
use barscan_base::Size;

/// Pixel layout of a captured frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    /// Motion JPEG, one JPEG image per frame.
    Mjpeg,
    /// Packed YUV 4:2:2.
    Yuyv,
    /// 8-bit grayscale.
    Luma8,
}

/// A frame as delivered by a capture backend.
#[derive(Clone, Debug)]
pub struct Frame {
    pub size: Size,
    pub format: PixelFormat,
    pub data: Vec<u8>,
}

impl Frame {
    pub fn new(size: Size, format: PixelFormat, data: Vec<u8>) -> Self {
        Self { size, format, data }
    }

    /// Convert to 8-bit luma, the input barcode decoders work on.
    ///
    /// For MJPEG the returned size is the decoded JPEG size, which is the
    /// authoritative one.
    pub fn to_luma(&self) -> Result<(Size, Vec<u8>), CameraError> {
        match self.format {
            PixelFormat::Luma8 => {
                if self.data.len() < self.size.pixel_count() {
                    return Err(CameraError::Stream(format!(
                        "luma frame too short: got {} bytes, expected {} for {}",
                        self.data.len(),
                        self.size.pixel_count(),
                        self.size
                    )));
                }
                Ok((self.size, self.data[..self.size.pixel_count()].to_vec()))
            }
            PixelFormat::Yuyv => {
                let luma = convert::yuyv_to_luma(&self.data, self.size.width, self.size.height)
                    .ok_or_else(|| {
                        CameraError::Stream(format!(
                            "YUYV frame too short: got {} bytes, expected {} for {}",
                            self.data.len(),
                            self.size.pixel_count() * 2,
                            self.size
                        ))
                    })?;
                Ok((self.size, luma))
            }
            PixelFormat::Mjpeg => Ok(convert::mjpeg_to_luma(&self.data)?),
        }
    }
}
