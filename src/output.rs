//! Rendered Output - One Avatar, Many Representations
//!
//! [`RenderedImage`] is immutable. Conversions that change the content
//! return a new value.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use base64::{engine::general_purpose, Engine as _};

use crate::convert::{ConvertError, RasterConverter, RasterFormat};
use crate::svg::escape;

/// Plain response parts for whatever HTTP stack the host uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    content: Vec<u8>,
    content_type: String,
    display_name: Option<String>,
    size: u32,
    alt: Option<String>,
}

impl RenderedImage {
    pub fn new(content: impl Into<Vec<u8>>, content_type: impl Into<String>, size: u32) -> Self {
        Self {
            content: content.into(),
            content_type: content_type.into(),
            display_name: None,
            size,
            alt: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Copy carrying a custom alt text.
    pub fn with_alt(&self, alt: impl Into<String>) -> Self {
        Self {
            alt: Some(alt.into()),
            ..self.clone()
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.content
    }

    /// The content as text, or `None` for binary (raster) content.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.content).ok()
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn is_data_uri(&self) -> bool {
        self.content.starts_with(b"data:")
    }

    pub fn is_url(&self) -> bool {
        self.content.starts_with(b"http://") || self.content.starts_with(b"https://")
    }

    /// `data:{type};base64,..`. Data URIs pass through.
    pub fn to_base64(&self) -> String {
        if self.is_data_uri() {
            return String::from_utf8_lossy(&self.content).into_owned();
        }
        format!(
            "data:{};base64,{}",
            self.content_type,
            general_purpose::STANDARD.encode(&self.content)
        )
    }

    /// The URL itself for remote content, otherwise a data URI.
    pub fn to_url(&self) -> String {
        if self.is_url() {
            return String::from_utf8_lossy(&self.content).into_owned();
        }
        self.to_base64()
    }

    /// Custom alt, then `Avatar for {name}`, then `Avatar`.
    pub fn alt_text(&self) -> String {
        match (&self.alt, &self.display_name) {
            (Some(alt), _) => alt.clone(),
            (None, Some(name)) => format!("Avatar for {name}"),
            (None, None) => "Avatar".to_string(),
        }
    }

    pub fn to_html(&self) -> String {
        format!(
            r#"<img src="{}" alt="{}" />"#,
            escape(&self.to_url()),
            escape(&self.alt_text())
        )
    }

    /// [`to_html`](Self::to_html) with `role="img"` and an `aria-label`.
    pub fn accessible_html(&self) -> String {
        let alt = self.alt_text();
        format!(
            r#"<img src="{}" alt="{}" role="img" aria-label="{}" />"#,
            escape(&self.to_url()),
            escape(&alt),
            escape(&alt)
        )
    }

    /// Write the content to `path`, creating parent directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, &self.content)
    }

    /// Write the content in chunks of `chunk_size` bytes. Zero writes one chunk.
    pub fn stream<W: Write>(&self, writer: &mut W, chunk_size: usize) -> io::Result<usize> {
        let chunk_size = if chunk_size == 0 {
            self.content.len().max(1)
        } else {
            chunk_size
        };
        for chunk in self.content.chunks(chunk_size) {
            writer.write_all(chunk)?;
        }
        writer.flush()?;
        Ok(self.content.len())
    }

    pub fn to_response(&self) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: vec![
                ("Content-Type".to_string(), self.content_type.clone()),
                ("Content-Length".to_string(), self.content.len().to_string()),
            ],
            body: self.content.clone(),
        }
    }

    /// [`to_response`](Self::to_response) plus an attachment disposition.
    pub fn download(&self, filename: &str) -> HttpResponse {
        let escaped = filename.replace('\\', "\\\\").replace('"', "\\\"");
        let mut response = self.to_response();
        response.headers.push((
            "Content-Disposition".to_string(),
            format!(r#"attachment; filename="{escaped}""#),
        ));
        response
    }

    /// SVG markup behind this image, decoding a base64 data URI if needed.
    fn svg_source(&self) -> Result<String, ConvertError> {
        if self.is_url() {
            return Err(ConvertError::NotSvg);
        }
        let bytes = if self.is_data_uri() {
            let text = String::from_utf8_lossy(&self.content);
            let (_, payload) = text
                .split_once(";base64,")
                .ok_or_else(|| ConvertError::Decode("data URI is not base64 encoded".into()))?;
            general_purpose::STANDARD
                .decode(payload.trim())
                .map_err(|e| ConvertError::Decode(e.to_string()))?
        } else {
            self.content.clone()
        };
        let svg = String::from_utf8(bytes).map_err(|_| ConvertError::NotSvg)?;
        if !svg.contains("<svg") {
            return Err(ConvertError::NotSvg);
        }
        Ok(svg)
    }

    pub fn to_raster(
        &self,
        converter: &dyn RasterConverter,
        format: RasterFormat,
        width: u32,
        height: u32,
        quality: u8,
    ) -> Result<Self, ConvertError> {
        let svg = self.svg_source()?;
        let bytes = converter.convert(&svg, format, width, height, quality)?;
        Ok(Self {
            content: bytes,
            content_type: format.mime_type().to_string(),
            display_name: self.display_name.clone(),
            size: width,
            alt: self.alt.clone(),
        })
    }

    pub fn to_png(&self, converter: &dyn RasterConverter) -> Result<Self, ConvertError> {
        self.to_square(converter, RasterFormat::Png)
    }

    pub fn to_jpg(&self, converter: &dyn RasterConverter) -> Result<Self, ConvertError> {
        self.to_square(converter, RasterFormat::Jpeg)
    }

    pub fn to_webp(&self, converter: &dyn RasterConverter) -> Result<Self, ConvertError> {
        self.to_square(converter, RasterFormat::Webp)
    }

    fn to_square(
        &self,
        converter: &dyn RasterConverter,
        format: RasterFormat,
    ) -> Result<Self, ConvertError> {
        self.to_raster(converter, format, self.size, self.size, format.default_quality())
    }
}

impl fmt::Display for RenderedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.content))
    }
}
