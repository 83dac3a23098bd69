//! SVG markup helpers
//!
//! Engines assemble markup from [`Element`]s and wrap it in an
//! [`SvgDocument`]. Output is plain strings so that identical inputs give
//! identical bytes.

use std::borrow::Cow;
use std::f64::consts::PI;
use std::fmt::Write;

use crate::options::Silhouette;

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";
pub const XML_PROLOG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

const ESCAPE_CHARS: [char; 5] = ['<', '>', '&', '"', '\''];

/// Escape XML special characters in text and attribute values.
pub fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(&ESCAPE_CHARS[..]) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Format a coordinate. Whole numbers print without a fraction and `-0` prints as `0`.
pub fn num(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}

/// A single SVG element with attributes, inline style and optional children.
#[derive(Debug, Clone)]
pub struct Element {
    name: &'static str,
    attrs: Vec<(&'static str, String)>,
    style: Vec<(&'static str, String)>,
    body: Option<String>,
}

impl Element {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attrs: Vec::new(),
            style: Vec::new(),
            body: None,
        }
    }

    pub fn attr(mut self, key: &'static str, value: impl ToString) -> Self {
        self.attrs.push((key, value.to_string()));
        self
    }

    pub fn style(mut self, key: &'static str, value: impl ToString) -> Self {
        self.style.push((key, value.to_string()));
        self
    }

    /// Escaped text content.
    pub fn text(mut self, text: &str) -> Self {
        self.body = Some(escape(text).into_owned());
        self
    }

    /// Pre-rendered child markup.
    pub fn children(mut self, markup: String) -> Self {
        self.body = Some(markup);
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    pub fn render_into(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.name);
        for (key, value) in &self.attrs {
            let _ = write!(out, r#" {}="{}""#, key, escape(value));
        }
        if !self.style.is_empty() {
            let style = self
                .style
                .iter()
                .map(|(key, value)| format!("{key}: {value}"))
                .collect::<Vec<_>>()
                .join("; ");
            let _ = write!(out, r#" style="{}""#, escape(&style));
        }
        match &self.body {
            Some(body) => {
                let _ = write!(out, ">{}</{}>", body, self.name);
            }
            None => out.push_str("/>"),
        }
    }
}

/// Root `<svg>` wrapper.
#[derive(Debug, Clone)]
pub struct SvgDocument {
    size: u32,
    view_box: String,
    prolog: bool,
    attrs: Vec<(&'static str, String)>,
    body: String,
}

impl SvgDocument {
    pub fn new(size: u32) -> Self {
        Self {
            size,
            view_box: format!("0 0 {size} {size}"),
            prolog: false,
            attrs: Vec::new(),
            body: String::new(),
        }
    }

    pub fn view_box(mut self, view_box: impl Into<String>) -> Self {
        self.view_box = view_box.into();
        self
    }

    pub fn with_prolog(mut self) -> Self {
        self.prolog = true;
        self
    }

    pub fn attr(mut self, key: &'static str, value: impl ToString) -> Self {
        self.attrs.push((key, value.to_string()));
        self
    }

    pub fn push(&mut self, element: &Element) {
        element.render_into(&mut self.body);
    }

    pub fn finish(self) -> String {
        let mut out = String::with_capacity(self.body.len() + 160);
        if self.prolog {
            out.push_str(XML_PROLOG);
        }
        let _ = write!(
            out,
            r#"<svg xmlns="{SVG_NS}" width="{size}" height="{size}" viewBox="{view_box}""#,
            size = self.size,
            view_box = escape(&self.view_box),
        );
        for (key, value) in &self.attrs {
            let _ = write!(out, r#" {}="{}""#, key, escape(value));
        }
        out.push('>');
        out.push_str(&self.body);
        out.push_str("</svg>");
        out
    }
}

/// Vertices of a hexagon inscribed in a `size` square, rotated by `rotation` degrees.
pub fn hexagon_points(size: u32, rotation: i32) -> String {
    let half = f64::from(size) / 2.0;
    let rotation = f64::from(rotation).to_radians();
    (0..6)
        .map(|i| {
            let angle = PI / 3.0 * f64::from(i) + rotation;
            format!("{},{}", num(half * angle.cos() + half), num(half * angle.sin() + half))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Unfilled outline element for a silhouette covering the whole canvas.
pub fn silhouette(shape: Silhouette, size: u32, rotation: i32) -> Element {
    let half = num(f64::from(size) / 2.0);
    match shape {
        Silhouette::Circle => Element::new("circle")
            .attr("cx", &half)
            .attr("cy", &half)
            .attr("r", &half),
        Silhouette::Square => Element::new("rect")
            .attr("x", 0)
            .attr("y", 0)
            .attr("width", size)
            .attr("height", size),
        Silhouette::Hexagon => Element::new("polygon").attr("points", hexagon_points(size, rotation)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("plain"), "plain");
        assert!(matches!(escape("plain"), Cow::Borrowed(_)));
        assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn test_num_formatting() {
        assert_eq!(num(40.0), "40");
        assert_eq!(num(-0.0), "0");
        assert_eq!(num(2.5), "2.5");
    }

    #[test]
    fn test_element_render() {
        let rect = Element::new("rect")
            .attr("x", 0)
            .attr("width", 10)
            .style("fill", "#ff0000")
            .style("fill-opacity", 0.5);
        assert_eq!(
            rect.render(),
            r##"<rect x="0" width="10" style="fill: #ff0000; fill-opacity: 0.5"/>"##
        );

        let text = Element::new("text").text("A&B");
        assert_eq!(text.render(), "<text>A&amp;B</text>");
    }

    #[test]
    fn test_document_root() {
        let mut doc = SvgDocument::new(64).attr("role", "img");
        doc.push(&Element::new("g"));
        let svg = doc.finish();
        assert_eq!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="64" viewBox="0 0 64 64" role="img"><g/></svg>"#
        );
    }

    #[test]
    fn test_hexagon_has_six_vertices() {
        let points = hexagon_points(200, 0);
        assert_eq!(points.split(' ').count(), 6);
        assert!(points.starts_with("200,100"));
        assert_ne!(points, hexagon_points(200, 30));
    }
}
