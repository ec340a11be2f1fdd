//! Canonical fingerprint field schema.
//!
//! The fixed, ordered list of signal names the probed page is expected to
//! report. Reports always carry exactly these keys, in this order; fields the
//! page did not render are backfilled with empty strings.

/// Every fingerprinting field the report schema covers, in output order.
pub const EXPECTED_FIELDS: [&str; 32] = [
    "Canvas Fingerprint",
    "WebGL Vendor",
    "WebGL Renderer",
    "WebGL Shader Precision",
    "Detected Fonts",
    "User-Agent",
    "Screen Resolution",
    "Device Pixel Ratio",
    "Color Depth",
    "Time Zone",
    "Locale",
    "Platform",
    "CPU Cores",
    "Device Memory (GB)",
    "Multi-Monitor Position",
    "Media Devices",
    "WebRTC Candidate",
    "Cookies Enabled",
    "Accept-Language",
    "Do Not Track",
    "Plugins",
    "Audio Fingerprint",
    "WASM Compile Time (ms)",
    "TLS / JA3",
    "SNI / DNS / Cert Info",
    "Device Motion",
    "Device Orientation",
    "Mouse Sample",
    "Key Press Sample",
    "Scroll Sample",
    "Touch Gestures Sample",
    "Comprehensive Fingerprint Hash",
];
