//! QR code images for attendee check-in payloads.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use qrcode::render::svg;
use qrcode::QrCode;
use thiserror::Error;

use crate::error::ApiError;

const MIN_DIMENSION: u32 = 240;

#[derive(Debug, Error)]
pub enum QrError {
    #[error("Failed to encode QR code: {0}")]
    Encode(#[from] qrcode::types::QrError),
}

impl From<QrError> for ApiError {
    fn from(err: QrError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

/// Renders `data` as an SVG QR code.
pub fn render_svg(data: &str) -> Result<String, QrError> {
    let code = QrCode::new(data.as_bytes())?;
    Ok(code
        .render::<svg::Color>()
        .min_dimensions(MIN_DIMENSION, MIN_DIMENSION)
        .quiet_zone(true)
        .build())
}

/// Renders `data` as an SVG QR code wrapped in a `data:` URL, ready for an
/// `<img src>`.
pub fn render_data_url(data: &str) -> Result<String, QrError> {
    let svg = render_svg(data)?;
    Ok(format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::QrPayload;
    use uuid::Uuid;

    #[test]
    fn test_render_svg() {
        let svg = render_svg("hello").unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
    }

    #[test]
    fn test_render_data_url_decodes_to_svg() {
        let payload = QrPayload::new(Uuid::new_v4(), "guest@example.com").encode();
        let url = render_data_url(&payload).unwrap();

        let encoded = url
            .strip_prefix("data:image/svg+xml;base64,")
            .expect("data url prefix");
        let decoded = String::from_utf8(STANDARD.decode(encoded).unwrap()).unwrap();
        assert!(decoded.starts_with("<?xml") || decoded.starts_with("<svg"));
    }

    #[test]
    fn test_oversized_payload_fails() {
        let data = "x".repeat(8000);
        assert!(matches!(render_svg(&data), Err(QrError::Encode(_))));
    }
}
