//! Label fonts.
//!
//! The bitmap backend rasterizes text itself, so DejaVu Sans is compiled into
//! the binary and registered with plotters under the sans-serif family before
//! any figure is drawn. No system font lookup takes place.

use once_cell::sync::Lazy;
use plotters::style::{register_font, FontFamily, FontStyle};
use tracing::debug;

use crate::error::{PstreeError, Result};

static REGULAR: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
static BOLD: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

static REGISTERED: Lazy<std::result::Result<(), String>> = Lazy::new(|| {
    let family = FontFamily::SansSerif.as_str().to_string();
    // italic and oblique fall back to the normal face
    let faces = [(FontStyle::Normal, REGULAR), (FontStyle::Bold, BOLD)];
    for (style, bytes) in faces {
        register_font(&family, style, bytes)
            .map_err(|_| format!("embedded {} font is not a valid font file", style.as_str()))?;
    }
    debug!("Registered embedded fonts for '{}'", family);
    Ok(())
});

/// Registers the embedded fonts once per process.
pub(crate) fn ensure_registered() -> Result<()> {
    (*REGISTERED).clone().map_err(PstreeError::Render)
}
