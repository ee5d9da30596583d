//! Preview output: SVG markup and PNG rendering of a finished layout.

use std::sync::Arc;

use tiny_skia::{Pixmap, Transform};

use crate::cloud::WordCloud;
use crate::color::parse_hex_color;
use crate::error::{Error, Result};

/// First family name declared by a font file.
pub fn font_family_name(font_data: &[u8]) -> Option<String> {
    let mut db = usvg::fontdb::Database::new();
    db.load_font_source(usvg::fontdb::Source::Binary(Arc::new(font_data.to_vec())));
    for face in db.faces() {
        if let Some((name, _)) = face.families.first() {
            return Some(name.clone());
        }
    }
    None
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

impl WordCloud {
    /// SVG sized to the viewport, with the fit transform applied to a group
    /// holding one `<text>` per word.
    pub fn to_svg(&self, font_family: &str) -> String {
        let mut svg = String::with_capacity(8192);
        let (vw, vh) = (self.viewport.width, self.viewport.height);

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{vw}" height="{vh}" viewBox="0 0 {vw} {vh}">"#
        ));
        svg.push_str(&format!(
            r#"<rect width="100%" height="100%" fill="{}"/>"#,
            escape_xml(&self.background)
        ));
        svg.push_str(&format!(
            r#"<g font-family="{}" text-anchor="middle" dominant-baseline="central" transform="translate({:.2} {:.2}) scale({:.4})">"#,
            escape_xml(font_family),
            self.fit.translate_x,
            self.fit.translate_y,
            self.fit.scale
        ));

        for word in &self.words {
            svg.push_str(&format!(
                r#"<text x="{:.1}" y="{:.1}" fill="{}" font-size="{:.1}""#,
                word.x,
                word.y,
                escape_xml(&word.color),
                word.font_size
            ));
            if word.rotation != 0.0 {
                svg.push_str(&format!(
                    r#" transform="rotate({:.1} {:.1} {:.1})""#,
                    word.rotation, word.x, word.y
                ));
            }
            svg.push_str(&format!(">{}</text>", escape_xml(&word.text)));
        }

        svg.push_str("</g></svg>");
        svg
    }

    /// Renders the SVG preview to PNG bytes with the given font.
    pub fn to_png(&self, font_data: &[u8], scale: f32) -> Result<Vec<u8>> {
        let family = font_family_name(font_data)
            .ok_or_else(|| Error::Font("Font declares no family name".into()))?;

        let mut fontdb = usvg::fontdb::Database::new();
        fontdb.load_font_source(usvg::fontdb::Source::Binary(Arc::new(font_data.to_vec())));
        log::debug!("Rendering PNG preview with {} font faces", fontdb.len());

        let options = usvg::Options {
            font_family: family.clone(),
            fontdb: Arc::new(fontdb),
            ..Default::default()
        };

        let svg = self.to_svg(&family);
        let tree = usvg::Tree::from_str(&svg, &options).map_err(|e| Error::Svg(e.to_string()))?;
        let size = tree.size().to_int_size();
        let out_width = (size.width() as f32 * scale).max(1.0) as u32;
        let out_height = (size.height() as f32 * scale).max(1.0) as u32;

        let mut pixmap = Pixmap::new(out_width, out_height)
            .ok_or_else(|| Error::Render("Failed to create pixel buffer".into()))?;

        if let Some(color) = parse_hex_color(&self.background) {
            pixmap.fill(color);
        }

        resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

        pixmap.encode_png().map_err(|e| Error::Render(e.to_string()))
    }
}
