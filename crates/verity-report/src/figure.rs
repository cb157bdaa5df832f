//! Figures attached to the report
//!
//! Rendering happens elsewhere; the report only stores already rendered
//! bytes next to their metadata and writes them beside `report.json`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Encoding of rendered figure bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FigureFormat {
    /// PNG image
    Png,
    /// SVG document
    Svg,
}

impl FigureFormat {
    /// File extension (without dot)
    #[inline]
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            FigureFormat::Png => "png",
            FigureFormat::Svg => "svg",
        }
    }
}

/// Rendered figure
#[derive(Clone, PartialEq, Eq)]
pub struct Figure {
    format: FigureFormat,
    bytes: Arc<[u8]>,
}

impl Figure {
    /// PNG bytes
    pub fn png(bytes: impl Into<Vec<u8>>) -> Self {
        let bytes: Vec<u8> = bytes.into();
        Self {
            format: FigureFormat::Png,
            bytes: bytes.into(),
        }
    }

    /// SVG text
    pub fn svg(document: impl Into<String>) -> Self {
        let document: String = document.into();
        Self {
            format: FigureFormat::Svg,
            bytes: document.into_bytes().into(),
        }
    }

    /// Encoding
    #[inline]
    #[must_use]
    pub fn format(&self) -> FigureFormat {
        self.format
    }

    /// Raw bytes
    #[inline]
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Figure")
            .field("format", &self.format)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Descriptive data for a figure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FigureMetadata {
    /// Figure title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Caption
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// File name inside the report directory, assigned on flush
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl FigureMetadata {
    /// Metadata with a title
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// With caption
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A captured `(metadata, figure)` pair
#[derive(Debug, Clone, PartialEq)]
pub struct FigureEntry {
    /// Descriptive data
    pub metadata: FigureMetadata,
    /// Rendered figure
    pub figure: Figure,
}

impl FigureEntry {
    /// File name for the figure at `index` in the report
    #[must_use]
    pub fn file_name(&self, index: usize) -> String {
        let stem = self
            .metadata
            .title
            .as_deref()
            .map(|t| t.replace([' ', '/', '\\'], "_"))
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "figure".to_string());
        format!("{index}_{stem}.{}", self.figure.format().extension())
    }
}
