//! Inline image assets.

use std::collections::BTreeMap;

use base64::prelude::*;
use dh_gdocs::types::{Alignment, InlineObject};

/// Multiplier applied to declared image dimensions.
///
/// Declared sizes are in points; unscaled images render too small.
pub const SCALE_FACTOR: f64 = 1.5;

/// Resolved images of one locale, keyed by inline object ID.
pub type ImageAssets = BTreeMap<String, ImageAsset>;

/// An image ready to be inlined.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageAsset {
    /// `data:image/<ext>;base64,...` URI.
    pub data_uri: String,
    /// Scaled width.
    pub width: f64,
    /// Scaled height.
    pub height: f64,
}

impl ImageAsset {
    /// Build an asset from downloaded bytes.
    ///
    /// Missing declared dimensions count as zero.
    #[must_use]
    pub fn new(content_uri: &str, bytes: &[u8], declared: (Option<f64>, Option<f64>)) -> Self {
        let (width, height) = declared;
        Self {
            data_uri: format!(
                "data:image/{};base64,{}",
                image_extension(content_uri),
                BASE64_STANDARD.encode(bytes)
            ),
            width: width.unwrap_or(0.0) * SCALE_FACTOR,
            height: height.unwrap_or(0.0) * SCALE_FACTOR,
        }
    }

    /// Build an asset for an inline object.
    ///
    /// Returns `None` if the object is not an image.
    #[must_use]
    pub fn for_object(object: &InlineObject, bytes: &[u8]) -> Option<Self> {
        let uri = object.content_uri()?;
        Some(Self::new(uri, bytes, object.declared_size()))
    }

    /// Render the `<img>` tag.
    ///
    /// Only centered paragraphs get a style.
    #[must_use]
    pub fn to_html(&self, alignment: Option<Alignment>) -> String {
        let style = match alignment {
            Some(Alignment::Center) => "display: block; margin: auto; text-align: center;",
            _ => "",
        };
        format!(
            "<img src='{}' width='{}' height='{}' referrerpolicy='no-referrer' style='{style}' />",
            self.data_uri, self.width, self.height
        )
    }
}

/// File extension of the last path segment of a URI, or empty.
///
/// Query string and fragment are ignored.
#[must_use]
pub fn image_extension(uri: &str) -> &str {
    let path = uri.split(['?', '#']).next().unwrap_or_default();
    let path = path.split_once("://").map_or(path, |(_, rest)| {
        rest.split_once('/').map_or("", |(_, path)| path)
    });
    let name = path.rsplit('/').next().unwrap_or_default();
    name.rsplit_once('.').map_or("", |(_, ext)| ext)
}
