//! Inline SVG markup for makeup overlays and region clip paths.
//!
//! Every builder returns a complete `<svg>` document sized to the target box
//! in pixels. Coordinates are emitted as absolute numbers so any SVG
//! rasterizer renders them identically.

use crate::color::Rgb;
use crate::makeup::{AreaKind, MakeupType};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

fn document(width: u32, height: u32, body: &str) -> String {
    format!(
        r#"<svg width="{width}" height="{height}" viewBox="0 0 {width} {height}" xmlns="{SVG_NS}">{body}</svg>"#
    )
}

/// `alpha / 255 * factor`, clamped to `0.0..=1.0`.
fn opacity(alpha: u8, factor: f32) -> f32 {
    (f32::from(alpha) / 255.0 * factor).clamp(0.0, 1.0)
}

fn stop(offset: f32, color: Rgb, opacity: f32) -> String {
    format!(
        r#"<stop offset="{offset}" stop-color="{}" stop-opacity="{opacity:.4}"/>"#,
        color.to_svg()
    )
}

/* --------------------------------------------------------------------------
Product overlays
-------------------------------------------------------------------------- */

/// Radial gradient centred slightly above the middle, lighter at the centre
/// and darker at the rim.
pub fn lipstick(width: u32, height: u32, color: Rgb, alpha: u8) -> String {
    let (w, h) = (width as f32, height as f32);
    let radius = w.max(h) / 2.0;
    let body = format!(
        r#"<defs><radialGradient id="lip" gradientUnits="userSpaceOnUse" cx="{cx}" cy="{cy}" r="{radius}">{s0}{s1}{s2}</radialGradient></defs><rect width="{width}" height="{height}" fill="url(#lip)"/>"#,
        cx = w * 0.5,
        cy = h * 0.4,
        s0 = stop(0.0, color.shifted(20, 10, 10), opacity(alpha, 1.0)),
        s1 = stop(0.7, color, opacity(alpha, 1.0)),
        s2 = stop(1.0, color.shifted(-30, -20, -20), opacity(alpha, 0.8)),
    );
    document(width, height, &body)
}

/// Vertical linear gradient fading out towards the bottom.
pub fn eyeshadow(width: u32, height: u32, color: Rgb, alpha: u8) -> String {
    let body = format!(
        r#"<defs><linearGradient id="eye" x1="0" y1="0" x2="0" y2="1">{s0}{s1}{s2}</linearGradient></defs><rect width="{width}" height="{height}" fill="url(#eye)"/>"#,
        s0 = stop(0.0, color, opacity(alpha, 0.9)),
        s1 = stop(0.5, color, opacity(alpha, 1.0)),
        s2 = stop(1.0, color, opacity(alpha, 0.3)),
    );
    document(width, height, &body)
}

/// Ellipse with a radial falloff to fully transparent at the edge.
pub fn blush(width: u32, height: u32, color: Rgb, alpha: u8) -> String {
    let (w, h) = (width as f32, height as f32);
    let body = format!(
        r#"<defs><radialGradient id="blush">{s0}{s1}{s2}</radialGradient></defs><ellipse cx="{cx}" cy="{cy}" rx="{rx}" ry="{ry}" fill="url(#blush)"/>"#,
        cx = w * 0.5,
        cy = h * 0.5,
        rx = w * 0.5,
        ry = h * 0.4,
        s0 = stop(0.0, color, opacity(alpha, 1.0)),
        s1 = stop(0.6, color, opacity(alpha, 0.6)),
        s2 = stop(1.0, color, 0.0),
    );
    document(width, height, &body)
}

/// Uniform fill over the whole box. Also used for unknown product types.
pub fn flat_fill(width: u32, height: u32, color: Rgb, alpha: u8) -> String {
    let body = format!(
        r#"<rect width="{width}" height="{height}" fill="{}" fill-opacity="{:.4}"/>"#,
        color.to_svg(),
        opacity(alpha, 1.0)
    );
    document(width, height, &body)
}

/// A single quadratic stroke across the middle of the box.
pub fn eyeliner(width: u32, height: u32, color: Rgb, alpha: u8) -> String {
    let (w, h) = (width as f32, height as f32);
    let body = format!(
        r#"<path d="M 0 {y} Q {cx} {cy} {w} {y}" stroke="{}" stroke-opacity="{:.4}" stroke-width="3" fill="none" stroke-linecap="round"/>"#,
        color.to_svg(),
        opacity(alpha, 1.0),
        y = h / 2.0,
        cx = w / 2.0,
        cy = h / 3.0,
    );
    document(width, height, &body)
}

/// Thin vertical stripes on a 4x8 tile.
pub fn mascara(width: u32, height: u32, color: Rgb, alpha: u8) -> String {
    let body = format!(
        r#"<defs><pattern id="lash" x="0" y="0" width="4" height="8" patternUnits="userSpaceOnUse"><rect width="2" height="8" fill="{}" fill-opacity="{:.4}"/></pattern></defs><rect width="{width}" height="{height}" fill="url(#lash)"/>"#,
        color.to_svg(),
        opacity(alpha, 1.0)
    );
    document(width, height, &body)
}

/// Dispatch to the overlay shape for a product type.
pub fn makeup_overlay(kind: MakeupType, width: u32, height: u32, color: Rgb, alpha: u8) -> String {
    match kind {
        MakeupType::Lipstick => lipstick(width, height, color, alpha),
        MakeupType::Eyeshadow => eyeshadow(width, height, color, alpha),
        MakeupType::Blush => blush(width, height, color, alpha),
        MakeupType::Eyeliner => eyeliner(width, height, color, alpha),
        MakeupType::Mascara => mascara(width, height, color, alpha),
        MakeupType::Foundation | MakeupType::Basic => flat_fill(width, height, color, alpha),
    }
}

/* --------------------------------------------------------------------------
Area overlays
-------------------------------------------------------------------------- */

/// Shape for an area-makeup entry, filled at `opacity` (`0.0..=1.0`).
///
/// Returns `None` for [`AreaKind::Unknown`].
pub fn area_shape(kind: AreaKind, width: u32, height: u32, color: Rgb, opacity: f32) -> Option<String> {
    let (w, h) = (width as f32, height as f32);
    let fill = format!(
        r#"fill="{}" fill-opacity="{:.4}""#,
        color.to_svg(),
        opacity.clamp(0.0, 1.0)
    );
    let body = match kind {
        AreaKind::Lips => format!(
            r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}" {fill}/>"#,
            w * 0.5,
            h * 0.5,
            w * 0.45,
            h * 0.4
        ),
        AreaKind::Eyes => {
            format!(r#"<rect width="{width}" height="{height}" rx="10" ry="5" {fill}/>"#)
        }
        AreaKind::Cheeks => {
            // Percentage radii resolve against the normalized diagonal.
            let r = ((w * w + h * h) / 2.0).sqrt() * 0.4;
            format!(r#"<circle cx="{}" cy="{}" r="{r}" {fill}/>"#, w * 0.5, h * 0.5)
        }
        AreaKind::Eyebrows => {
            format!(r#"<rect width="{width}" height="{height}" rx="5" ry="2" {fill}/>"#)
        }
        AreaKind::Unknown => return None,
    };
    Some(document(width, height, &body))
}

/* --------------------------------------------------------------------------
Clip paths
-------------------------------------------------------------------------- */

/// SVG `points` attribute for a polygon through pixel coordinates.
pub fn polygon_points(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{x:.1},{y:.1}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `<clipPath>` element with the given id wrapping a polygon.
pub fn clip_path(id: &str, points: &[(f64, f64)]) -> String {
    format!(
        r#"<clipPath id="{id}"><polygon points="{}"/></clipPath>"#,
        polygon_points(points)
    )
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(200, 40, 40);

    #[test]
    fn every_overlay_is_a_sized_svg_document() {
        for kind in MakeupType::ALL.into_iter().chain([MakeupType::Basic]) {
            let svg = makeup_overlay(kind, 120, 60, RED, 200);
            assert!(svg.starts_with("<svg"), "{kind:?}");
            assert!(svg.contains(r#"width="120""#), "{kind:?}");
            assert!(svg.contains(r#"height="60""#), "{kind:?}");
            assert!(svg.ends_with("</svg>"), "{kind:?}");
        }
    }

    #[test]
    fn lipstick_highlight_and_rim_are_shifted() {
        let svg = lipstick(100, 50, RED, 255);
        assert!(svg.contains("rgb(220, 50, 50)"));
        assert!(svg.contains("rgb(170, 20, 20)"));
        assert!(svg.contains(r#"stop-opacity="0.8000""#));
    }

    #[test]
    fn blush_fades_to_transparent() {
        let svg = blush(80, 80, RED, 255);
        assert!(svg.contains(r#"stop-opacity="0.0000""#));
        assert!(svg.contains(r#"stop-opacity="0.6000""#));
    }

    #[test]
    fn eyeliner_stroke_is_three_pixels() {
        let svg = eyeliner(90, 30, RED, 128);
        assert!(svg.contains(r#"stroke-width="3""#));
        assert!(svg.contains("M 0 15 Q 45 10 90 15"));
    }

    #[test]
    fn unknown_area_has_no_shape() {
        assert!(area_shape(AreaKind::Unknown, 10, 10, RED, 0.5).is_none());
        let lips = area_shape(AreaKind::Lips, 100, 50, RED, 0.7).unwrap();
        assert!(lips.contains("<ellipse"));
        assert!(lips.contains(r#"fill-opacity="0.7000""#));
    }

    #[test]
    fn clip_path_lists_points() {
        let clip = clip_path("lips", &[(1.0, 2.0), (3.0, 4.5)]);
        assert_eq!(
            clip,
            r#"<clipPath id="lips"><polygon points="1.0,2.0 3.0,4.5"/></clipPath>"#
        );
    }
}
