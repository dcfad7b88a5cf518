//! Embedded object types.

use serde::Deserialize;

/// An embedded object referenced from the document body.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineObject {
    #[serde(default)]
    pub inline_object_properties: Option<InlineObjectProperties>,
}

impl InlineObject {
    fn embedded(&self) -> Option<&EmbeddedObject> {
        self.inline_object_properties
            .as_ref()
            .and_then(|p| p.embedded_object.as_ref())
    }

    /// Download URI of the image, if the object is an image.
    #[must_use]
    pub fn content_uri(&self) -> Option<&str> {
        self.embedded()
            .and_then(|e| e.image_properties.as_ref())
            .and_then(|i| i.content_uri.as_deref())
    }

    /// Declared `(width, height)` magnitudes, each absent when not declared.
    #[must_use]
    pub fn declared_size(&self) -> (Option<f64>, Option<f64>) {
        let size = self.embedded().and_then(|e| e.size.as_ref());
        let magnitude = |d: Option<&Dimension>| d.and_then(|d| d.magnitude);
        (
            magnitude(size.and_then(|s| s.width.as_ref())),
            magnitude(size.and_then(|s| s.height.as_ref())),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineObjectProperties {
    #[serde(default)]
    pub embedded_object: Option<EmbeddedObject>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedObject {
    #[serde(default)]
    pub image_properties: Option<ImageProperties>,
    #[serde(default)]
    pub size: Option<Size>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageProperties {
    /// Short-lived download URI.
    #[serde(default)]
    pub content_uri: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Size {
    #[serde(default)]
    pub width: Option<Dimension>,
    #[serde(default)]
    pub height: Option<Dimension>,
}

/// A length in `unit` (usually `PT`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Dimension {
    #[serde(default)]
    pub magnitude: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
}
