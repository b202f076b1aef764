//! SVG export of a rendered scene.

use std::fmt::Write as _;
use std::path::Path;

use crate::geometry::ViewportGeometry;
use crate::scene::{Node, NodeId, Scene, Shape, Style, TextContent};

/// Serialise `scene` as a standalone SVG document.
pub fn to_svg(scene: &Scene, geometry: &ViewportGeometry) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = fmt_num(geometry.width),
        h = fmt_num(geometry.height),
    );
    for child in scene.children(scene.root()) {
        write_node(scene, *child, 1, &mut out);
    }
    out.push_str("</svg>\n");
    out
}

/// Write the SVG for `scene` to `path`.
pub fn write_svg(path: &Path, scene: &Scene, geometry: &ViewportGeometry) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, to_svg(scene, geometry))?;
    tracing::debug!(path = %path.display(), nodes = scene.len(), "svg written");
    Ok(())
}

fn write_node(scene: &Scene, id: NodeId, depth: usize, out: &mut String) {
    let Some(node) = scene.node(id) else {
        return;
    };
    let indent = "  ".repeat(depth);
    let attrs = common_attrs(node);

    match &node.shape {
        Shape::Group => {
            let _ = writeln!(out, "{indent}<g{attrs}>");
            for child in &node.children {
                write_node(scene, *child, depth + 1, out);
            }
            let _ = writeln!(out, "{indent}</g>");
        }
        Shape::Rect {
            x,
            y,
            width,
            height,
            rx,
            ry,
        } => {
            let mut corner = String::new();
            if *rx > 0.0 || *ry > 0.0 {
                let _ = write!(corner, r#" rx="{}" ry="{}""#, fmt_num(*rx), fmt_num(*ry));
            }
            let _ = writeln!(
                out,
                r#"{indent}<rect x="{}" y="{}" width="{}" height="{}"{corner}{attrs}/>"#,
                fmt_num(*x),
                fmt_num(*y),
                fmt_num(*width),
                fmt_num(*height),
            );
        }
        Shape::Line { x1, y1, x2, y2 } => {
            let _ = writeln!(
                out,
                r#"{indent}<line x1="{}" y1="{}" x2="{}" y2="{}"{attrs}/>"#,
                fmt_num(*x1),
                fmt_num(*y1),
                fmt_num(*x2),
                fmt_num(*y2),
            );
        }
        Shape::Text {
            x,
            y,
            dy,
            anchor,
            content,
        } => {
            let _ = write!(
                out,
                r#"{indent}<text x="{}" y="{}" dy="{dy}" text-anchor="{}"{attrs}>"#,
                fmt_num(*x),
                fmt_num(*y),
                anchor.as_str(),
            );
            match content {
                TextContent::Plain(text) => out.push_str(&xml_escape(text)),
                TextContent::Spans(spans) => {
                    for span in spans {
                        let _ = write!(
                            out,
                            r#"<tspan x="{}" dy="{}">{}</tspan>"#,
                            fmt_num(span.x),
                            span.dy,
                            xml_escape(&span.text)
                        );
                    }
                }
            }
            out.push_str("</text>\n");
        }
    }
}

fn common_attrs(node: &Node) -> String {
    let mut attrs = String::new();
    if !node.classes.is_empty() {
        let _ = write!(attrs, r#" class="{}""#, xml_escape(&node.classes.join(" ")));
    }
    if node.translate != (0.0, 0.0) {
        let _ = write!(
            attrs,
            r#" transform="translate({},{})""#,
            fmt_num(node.translate.0),
            fmt_num(node.translate.1)
        );
    }
    attrs.push_str(&style_attrs(&node.style));
    attrs
}

fn style_attrs(style: &Style) -> String {
    let mut attrs = String::new();
    if let Some(fill) = &style.fill {
        let _ = write!(attrs, r#" fill="{}""#, xml_escape(fill));
    }
    if let Some(stroke) = &style.stroke {
        let _ = write!(attrs, r#" stroke="{}""#, xml_escape(stroke));
    }
    if let Some(width) = style.stroke_width {
        let _ = write!(attrs, r#" stroke-width="{}""#, fmt_num(width));
    }
    if let Some(dash) = &style.dash {
        let pattern: Vec<String> = dash.iter().map(|d| fmt_num(*d)).collect();
        let _ = write!(attrs, r#" stroke-dasharray="{}""#, pattern.join(" "));
    }
    if (style.opacity - 1.0).abs() > f64::EPSILON {
        let _ = write!(attrs, r#" opacity="{}""#, fmt_num(style.opacity));
    }
    if let Some(size) = style.font_size {
        let _ = write!(attrs, r#" font-size="{}px""#, fmt_num(size));
    }
    if style.bold {
        attrs.push_str(r#" font-weight="bold""#);
    }
    attrs
}

/// Format a coordinate with at most three decimals and no trailing zeros.
fn fmt_num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let text = format!("{rounded:.3}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// XML-escape a string.
fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Errors raised when writing an export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::TimelineChartRenderer;
    use crate::scene::{Shape, Style, TextAnchor};
    use crate::surface::{DrawingSurface, SceneSurface};
    use crate::zone::{default_zones, INTERVAL_HOURS};
    use insta::assert_snapshot;

    fn rendered_svg() -> String {
        let mut surface = SceneSurface::new();
        let geometry = ViewportGeometry::new(1000.0, 400.0);
        TimelineChartRenderer::default().render(
            &default_zones(),
            &INTERVAL_HOURS,
            &geometry,
            &mut surface,
        );
        to_svg(surface.scene(), &geometry)
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(416.666_666_7), "416.667");
        assert_eq!(fmt_num(500.0), "500");
        assert_eq!(fmt_num(-0.0001), "0");
        assert_eq!(fmt_num(0.25), "0.25");
    }

    #[test]
    fn test_xml_escape() {
        assert_eq!(xml_escape("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
    }

    #[test]
    fn test_small_scene() {
        let mut scene = Scene::new();
        let root = scene.root();
        let group = scene.append(root, Shape::Group, Style::default().opacity(0.0));
        scene.set_translate(group, 10.0, 20.0);
        scene.append(
            group,
            Shape::text(1.0, 2.0, TextAnchor::Start, "Tea & toast"),
            Style::default().fill("#000"),
        );

        let svg = to_svg(&scene, &ViewportGeometry::new(100.0, 50.0));
        assert_snapshot!(svg, @r###"
        <svg xmlns="http://www.w3.org/2000/svg" width="100" height="50" viewBox="0 0 100 50">
          <g transform="translate(10,20)" opacity="0">
            <text x="1" y="2" dy="0" text-anchor="start" fill="#000">Tea &amp; toast</text>
          </g>
        </svg>
        "###);
    }

    #[test]
    fn test_chart_svg_contains_every_part() {
        let svg = rendered_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(r#"class="x-axis""#));
        assert!(svg.contains(">0:00</text>"));
        assert!(svg.contains(">24:00</text>"));
        assert!(svg.contains(r##"<rect x="416.667" y="60" width="164.667" height="280" class="zone" fill="#FFD700"/>"##));
        assert_eq!(svg.matches(r#"class="interval-line""#).count(), 8);
        assert!(svg.contains(r#"stroke-dasharray="4 4""#));
        assert!(svg.contains(">Consistent Failure Zone</text>"));
        assert!(svg.contains(r#"<tspan x="375" dy="0">Danger</tspan><tspan x="375" dy="1.2em">Zone</tspan>"#));
        assert!(svg.contains(r#"class="legend" transform="translate(1000,100)" opacity="0""#));
        assert!(svg.contains(">3.125</text>"));
    }

    #[test]
    fn test_write_svg_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("chart.svg");
        let mut surface = SceneSurface::new();
        let geometry = ViewportGeometry::new(600.0, 400.0);
        TimelineChartRenderer::default().render(&default_zones(), &INTERVAL_HOURS, &geometry, &mut surface);

        write_svg(&path, surface.scene(), &geometry).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, to_svg(surface.scene(), &geometry));
    }
}
