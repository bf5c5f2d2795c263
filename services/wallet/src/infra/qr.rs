pub use loyalty_core::qr::PngQrRenderer;

use crate::domain::repository::QrRenderer;
use crate::error::WalletServiceError;

impl QrRenderer for PngQrRenderer {
    fn render_png_base64(&self, payload: &str) -> Result<String, WalletServiceError> {
        Ok(self.render_base64(payload)?)
    }
}
