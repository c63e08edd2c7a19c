use schema::{ImageDimensions, Prediction};

pub const DEFAULT_DEFECT_MARKER: &str = "bad";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    DefectsDetected,
    NoDefects,
}

impl Verdict {
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::DefectsDetected => "Defects Detected",
            Verdict::NoDefects => "No Defects Detected",
        }
    }
}

/// Row and overlay styling: defects in red, passing welds in green.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStyle {
    Defect,
    Pass,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub class: String,
    pub confidence: String,
    pub style: RowStyle,
}

/// A prediction box positioned in displayed-image coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub label: String,
    pub style: RowStyle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

pub fn is_defect(class: &str, marker: &str) -> bool {
    class.to_lowercase().contains(&marker.to_lowercase())
}

pub fn verdict(predictions: &[Prediction], marker: &str) -> Verdict {
    if predictions.iter().any(|p| is_defect(&p.class, marker)) {
        Verdict::DefectsDetected
    } else {
        Verdict::NoDefects
    }
}

pub fn format_confidence(confidence: f64) -> String {
    format!("{:.1}%", confidence * 100.0)
}

fn style_for(class: &str, marker: &str) -> RowStyle {
    if is_defect(class, marker) {
        RowStyle::Defect
    } else {
        RowStyle::Pass
    }
}

pub fn result_rows(predictions: &[Prediction], marker: &str) -> Vec<ResultRow> {
    predictions
        .iter()
        .map(|p| ResultRow {
            class: p.class.clone(),
            confidence: format_confidence(p.confidence),
            style: style_for(&p.class, marker),
        })
        .collect()
}

/// Scale each box from natural image pixels to the displayed size.
pub fn overlay_boxes(
    predictions: &[Prediction],
    dimensions: &ImageDimensions,
    marker: &str,
) -> Vec<OverlayBox> {
    let Some((scale_x, scale_y)) = dimensions.scale() else {
        return Vec::new();
    };

    predictions
        .iter()
        .map(|p| {
            let [x1, y1, _, _] = p.bbox;
            OverlayBox {
                left: x1 * scale_x,
                top: y1 * scale_y,
                width: p.width() * scale_x,
                height: p.height() * scale_y,
                label: format!("{} {}", p.class, format_confidence(p.confidence)),
                style: style_for(&p.class, marker),
            }
        })
        .collect()
}

/// Displayed size of an image contained in `viewport`, never upscaled.
pub fn fit_to_viewport(natural_width: u32, natural_height: u32, viewport: Viewport) -> ImageDimensions {
    let scale = if natural_width == 0 || natural_height == 0 {
        0.0
    } else {
        (viewport.width / natural_width as f64)
            .min(viewport.height / natural_height as f64)
            .min(1.0)
    };

    ImageDimensions {
        width: natural_width as f64 * scale,
        height: natural_height as f64 * scale,
        natural_width,
        natural_height,
    }
}
