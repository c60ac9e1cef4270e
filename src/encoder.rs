// Deep-link construction and QR rasterization

use crate::error::{AppError, Result};
use image::{GrayImage, Luma};
use qrcode::QrCode;

/// Prefix consumed by the Home Assistant companion app. Must stay byte-exact.
pub const DEEP_LINK_PREFIX: &str = "homeassistant://navigate/shopping-tags?category=";

/// Text printed under every QR code, before the tag name
pub const LABEL_PREFIX: &str = "Shopping Tag ";

/// A rendered QR symbol together with the URL it encodes
#[derive(Debug, Clone)]
pub struct QrTile {
    pub url: String,
    pub image: GrayImage,
}

/// Build the deep link for a tag. The name is not escaped.
pub fn deep_link(name: &str) -> String {
    format!("{}{}", DEEP_LINK_PREFIX, name)
}

pub fn label_for(name: &str) -> String {
    format!("{}{}", LABEL_PREFIX, name)
}

/// Encode a tag's deep link as a square luma raster.
pub fn encode_tag(name: &str) -> Result<QrTile> {
    let url = deep_link(name);

    let code = QrCode::new(url.as_bytes())
        .map_err(|e| AppError::EncodeError(format!("{}: {}", name, e)))?;

    let image = code.render::<Luma<u8>>().build();
    Ok(QrTile { url, image })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deep_link_format() {
        assert_eq!(
            deep_link("produce"),
            "homeassistant://navigate/shopping-tags?category=produce"
        );
    }

    #[test]
    fn test_deep_link_does_not_escape() {
        assert_eq!(
            deep_link("baby food&more"),
            "homeassistant://navigate/shopping-tags?category=baby food&more"
        );
    }

    #[test]
    fn test_label_format() {
        assert_eq!(label_for("dairy"), "Shopping Tag dairy");
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let first = encode_tag("bakery").unwrap();
        let second = encode_tag("bakery").unwrap();
        assert_eq!(first.url, second.url);
        assert_eq!(first.image.dimensions(), second.image.dimensions());
        assert_eq!(first.image.as_raw(), second.image.as_raw());
    }

    #[test]
    fn test_image_is_square_and_distinct_per_name() {
        let produce = encode_tag("produce").unwrap();
        let (w, h) = produce.image.dimensions();
        assert_eq!(w, h);
        assert!(w > 0);

        let dairy = encode_tag("dairy").unwrap();
        assert_ne!(produce.image.as_raw(), dairy.image.as_raw());
    }

    #[test]
    fn test_oversized_name_is_encode_error() {
        let name = "a".repeat(3000);
        let err = encode_tag(&name).unwrap_err();
        assert!(matches!(err, AppError::EncodeError(_)));
    }
}
