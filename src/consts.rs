//! Shared defaults for the signature pad crate.

// ── Geometry ────────────────────────────────────────────────────

/// Default logical surface width in device-independent pixels.
pub const DEFAULT_WIDTH: f64 = 600.0;

/// Default logical surface height in device-independent pixels.
pub const DEFAULT_HEIGHT: f64 = 200.0;

// ── Pen style ───────────────────────────────────────────────────

/// Default pen width in logical pixels.
pub const DEFAULT_LINE_WIDTH: f64 = 3.0;

/// Default pen color as a CSS color string.
pub const DEFAULT_LINE_COLOR: &str = "#000000";

/// Default surface background color as a CSS color string.
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";

// ── Wire format ─────────────────────────────────────────────────

/// Version tag written into every encoded document.
pub const WIRE_VERSION: &str = "1.0";

/// Major version line the decoder accepts.
pub const WIRE_VERSION_MAJOR: &str = "1.";
