use crate::{ScanError, ScannerConfig};

// user agent tokens of phones and tablets, lowercase
const HANDHELD_TOKENS: [&str; 9] = [
    "android",
    "iphone",
    "ipad",
    "ipod",
    "mobile",
    "webos",
    "blackberry",
    "iemobile",
    "opera mini",
];

/// Whether a platform identification string describes a handheld device.
pub fn is_handheld(platform: &str) -> bool {
    let platform = platform.to_ascii_lowercase();
    HANDHELD_TOKENS.iter().any(|token| platform.contains(token))
}

/// The capability check run on mount. Pure and synchronous.
pub fn check_device(config: &ScannerConfig) -> Result<(), ScanError> {
    if !config.require_handheld() || is_handheld(config.platform()) {
        return Ok(());
    }
    Err(ScanError::DeviceUnsupported(
        "barcode scanning is only available on handheld devices".to_string(),
    ))
}
