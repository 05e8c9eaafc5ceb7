use std::path::{Path, PathBuf};

use svg::node::element::{Line, Polygon, Rectangle, Text};
use svg::Document;
use thiserror::Error;
use tracing::info;

use crate::pileup::{AlignedRow, ReconstructedPileup};
use crate::render::style::{style_for, BaseClass, BaseStyle, Glyph};

/// Plot units above the reference row, where the focus arrow sits.
const TOP_ROW: f32 = -4.0;
const REFERENCE_ROW: f32 = -2.0;
const CONSENSUS_ROW: f32 = -1.0;
/// Spacing of the depth labels on the read axis.
const DEPTH_TICK: usize = 10;

/// Errors raised while drawing a pileup.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Nothing to draw.
    #[error("pileup has no columns to render")]
    Empty,

    /// Writing the image failed.
    #[error("failed to write image {}: {source}", .path.display())]
    Io {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// Image options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Title drawn above the plot.
    pub title: String,
    /// Resolution; one plot unit is `dpi / 16` pixels.
    pub dpi: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: String::new(),
            dpi: 200,
        }
    }
}

impl RenderOptions {
    /// Options with a title and the default resolution.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the resolution.
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }
}

/// Maps plot coordinates (column, row) to pixels. Rows grow downwards.
#[derive(Debug, Clone, Copy)]
struct Frame {
    unit: f32,
    left: f32,
    top: f32,
}

impl Frame {
    fn x(&self, column: f32) -> f32 {
        self.left + column * self.unit
    }

    fn y(&self, row: f32) -> f32 {
        self.top + (row - TOP_ROW) * self.unit
    }
}

/// Draw `pileup` as a scatter of base glyphs.
pub fn render_svg(
    pileup: &ReconstructedPileup,
    options: &RenderOptions,
) -> Result<Document, RenderError> {
    let width = pileup.width();
    if width == 0 {
        return Err(RenderError::Empty);
    }
    let depth = pileup.depth();
    let unit = options.dpi.max(16) as f32 / 16.0;
    let frame = Frame {
        unit,
        left: 8.0 * unit,
        top: 3.0 * unit,
    };
    let canvas_width = frame.x(width as f32 + 2.0);
    let canvas_height = frame.y(depth as f32 + 2.0);
    let font_size = 0.8 * unit;

    let mut doc = Document::new()
        .set("viewBox", (0.0, 0.0, canvas_width, canvas_height))
        .set("width", canvas_width)
        .set("height", canvas_height)
        .add(
            Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", canvas_width)
                .set("height", canvas_height)
                .set("fill", "#ffffff"),
        )
        .add(
            Text::new(options.title.clone())
                .set("x", frame.x((width as f32 + 1.0) / 2.0))
                .set("y", 1.8 * unit)
                .set("text-anchor", "middle")
                .set("font-family", "sans-serif")
                .set("font-size", unit)
                .set("fill", "#111111"),
        );

    let mut labels = vec![
        (REFERENCE_ROW, "Reference".to_string()),
        (CONSENSUS_ROW, "Consensus".to_string()),
    ];
    labels.extend(
        (DEPTH_TICK..=depth)
            .step_by(DEPTH_TICK)
            .map(|tick| (tick as f32, format!("{tick}X"))),
    );
    for (row, label) in labels {
        doc = doc.add(
            Text::new(label)
                .set("x", frame.left - 0.5 * unit)
                .set("y", frame.y(row))
                .set("text-anchor", "end")
                .set("dominant-baseline", "central")
                .set("font-family", "sans-serif")
                .set("font-size", font_size)
                .set("fill", "#333333"),
        );
    }

    doc = doc.add(
        Line::new()
            .set("x1", frame.x(0.0))
            .set("y1", frame.y(0.0))
            .set("x2", frame.x(width as f32))
            .set("y2", frame.y(0.0))
            .set("stroke", "#000000")
            .set("stroke-width", 1),
    );

    doc = draw_row(doc, &frame, pileup.reference(), REFERENCE_ROW, font_size);
    doc = draw_row(doc, &frame, pileup.consensus(), CONSENSUS_ROW, font_size);
    for (idx, read) in pileup.reads().iter().enumerate() {
        doc = draw_row(doc, &frame, read, (idx + 1) as f32, font_size);
    }

    if let Some(column) = pileup.focus_column() {
        doc = draw_focus_arrow(doc, &frame, column as f32 + 1.0);
    }
    Ok(doc)
}

/// Draw `pileup` and save it as an SVG file.
pub fn write_svg<P: AsRef<Path>>(
    pileup: &ReconstructedPileup,
    options: &RenderOptions,
    path: P,
) -> Result<(), RenderError> {
    let path = path.as_ref();
    let doc = render_svg(pileup, options)?;
    svg::save(path, &doc).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), columns = pileup.width(), reads = pileup.depth(), "wrote pileup image");
    Ok(())
}

fn draw_row(mut doc: Document, frame: &Frame, row: &AlignedRow, y: f32, font_size: f32) -> Document {
    for (idx, cell) in row.iter().enumerate() {
        let x = idx as f32 + 1.0;
        if !cell.is_blank() {
            let style = style_for(BaseClass::of_cell(cell));
            doc = draw_glyph(doc, frame, style, cell.symbol(), x, y, font_size);
        }
        if cell.has_insertion() {
            let style = style_for(BaseClass::Insertion);
            doc = draw_glyph(doc, frame, style, cell.symbol(), x + 0.5, y, font_size);
        }
    }
    doc
}

fn draw_glyph(
    doc: Document,
    frame: &Frame,
    style: &BaseStyle,
    symbol: u8,
    x: f32,
    y: f32,
    font_size: f32,
) -> Document {
    match style.glyph {
        Glyph::Letter => doc.add(
            Text::new((symbol as char).to_string())
                .set("x", frame.x(x))
                .set("y", frame.y(y))
                .set("text-anchor", "middle")
                .set("dominant-baseline", "central")
                .set("font-family", "monospace")
                .set("font-size", font_size)
                .set("fill", style.color),
        ),
        Glyph::CaretDown => doc.add(caret(frame, x, y, style.color)),
    }
}

fn caret(frame: &Frame, x: f32, y: f32, color: &str) -> Polygon {
    let half = 0.25 * frame.unit;
    let (cx, cy) = (frame.x(x), frame.y(y));
    Polygon::new()
        .set(
            "points",
            format!(
                "{},{} {},{} {},{}",
                cx - half,
                cy - half,
                cx + half,
                cy - half,
                cx,
                cy + half
            ),
        )
        .set("fill", color)
}

fn draw_focus_arrow(doc: Document, frame: &Frame, x: f32) -> Document {
    let head = 0.2 * frame.unit;
    let (cx, tip) = (frame.x(x), frame.y(TOP_ROW + 1.0));
    doc.add(
        Line::new()
            .set("x1", cx)
            .set("y1", frame.y(TOP_ROW))
            .set("x2", cx)
            .set("y2", tip - head)
            .set("stroke", "#ff0000")
            .set("stroke-width", 2),
    )
    .add(
        Polygon::new()
            .set(
                "points",
                format!("{},{} {},{} {},{}", cx - head, tip - head, cx + head, tip - head, cx, tip),
            )
            .set("fill", "#ff0000"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemoryReference;
    use crate::pileup::{PileupAssembler, PileupBlock, PileupConfig, Window};

    fn pileup(reads: usize) -> ReconstructedPileup {
        let mut rows = vec!["t    ".to_string(), "AC*GT".to_string(), "AC*GT".to_string()];
        rows.extend((0..reads).map(|_| "ACGGT".to_string()));
        let window = Window::new("chr1", 3, 2).unwrap();
        let reference = MemoryReference::new().with_contig("chr1", "ACGTACGT");
        PileupAssembler::new(PileupConfig::default().with_extend(2))
            .assemble(&window, &PileupBlock::new(rows), &reference)
            .unwrap()
    }

    #[test]
    fn draws_glyphs_labels_and_arrow() {
        let svg = render_svg(&pileup(12), &RenderOptions::new("sample chr1:3")).unwrap().to_string();
        assert!(svg.contains("sample chr1:3"));
        assert!(svg.contains("Reference"));
        assert!(svg.contains("Consensus"));
        assert!(svg.contains("10X"));
        assert!(!svg.contains("20X"));
        assert!(svg.contains("#ff0000"));
        // One caret per read for the collapsed insertion.
        assert_eq!(svg.matches(style_for(BaseClass::Insertion).color).count(), 12);
    }

    #[test]
    fn dpi_scales_the_canvas() {
        let small = render_svg(&pileup(1), &RenderOptions::default().with_dpi(100)).unwrap();
        let large = render_svg(&pileup(1), &RenderOptions::default().with_dpi(200)).unwrap();
        // Four columns plus margins: 14 units at dpi/16 pixels each.
        assert!(small.to_string().contains("width=\"87.5\""));
        assert!(large.to_string().contains("width=\"175\""));
    }

    #[test]
    fn glyph_shape_follows_the_style_table() {
        let frame = Frame { unit: 10.0, left: 0.0, top: 0.0 };
        let letter = BaseStyle { color: "#000001", glyph: Glyph::Letter };
        let caret = BaseStyle { color: "#000002", glyph: Glyph::CaretDown };

        let doc = draw_glyph(Document::new(), &frame, &letter, b'A', 1.0, 1.0, 8.0).to_string();
        assert!(doc.contains("<text"));
        assert!(!doc.contains("<polygon"));

        let doc = draw_glyph(Document::new(), &frame, &caret, b'A', 1.0, 1.0, 8.0).to_string();
        assert!(doc.contains("<polygon"));
        assert!(!doc.contains("<text"));
    }

    #[test]
    fn insertion_flags_draw_carets_not_letters() {
        let svg = render_svg(&pileup(3), &RenderOptions::default()).unwrap().to_string();
        assert_eq!(svg.matches("<polygon").count(), 3 + 1);
    }
}
