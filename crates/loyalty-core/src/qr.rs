use std::io::Cursor;

use anyhow::Context as _;
use base64::{Engine as _, engine::general_purpose};
use image::{ImageFormat, Luma};
use qrcode::QrCode;

/// Renders QR codes as grayscale PNGs of at least `size` pixels per side.
#[derive(Debug, Clone, Copy)]
pub struct PngQrRenderer {
    pub size: u32,
}

impl PngQrRenderer {
    pub fn render_png(&self, payload: &str) -> anyhow::Result<Vec<u8>> {
        let code = QrCode::new(payload.as_bytes()).context("encode QR payload")?;
        let image = code
            .render::<Luma<u8>>()
            .min_dimensions(self.size, self.size)
            .build();

        let mut buffer = Cursor::new(Vec::new());
        image
            .write_to(&mut buffer, ImageFormat::Png)
            .context("write QR PNG")?;
        Ok(buffer.into_inner())
    }

    /// PNG as standard base64, ready for a JSON body or a `data:` URI.
    pub fn render_base64(&self, payload: &str) -> anyhow::Result<String> {
        let png = self.render_png(payload)?;
        Ok(general_purpose::STANDARD.encode(png))
    }
}
