//! Immutable base-to-style lookup.

use crate::pileup::AlignedCell;

/// Closed set of glyph classes the renderer distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum BaseClass {
    /// Adenine.
    A = 0,
    /// Thymine.
    T = 1,
    /// Guanine.
    G = 2,
    /// Cytosine.
    C = 3,
    /// Inserted-bases marker.
    Insertion = 4,
    /// Anything else: gaps, ambiguity codes, viewer match dots.
    Other = 5,
}

impl BaseClass {
    /// Class of a cell character.
    pub fn of(symbol: u8) -> Self {
        match symbol.to_ascii_uppercase() {
            b'A' => BaseClass::A,
            b'T' => BaseClass::T,
            b'G' => BaseClass::G,
            b'C' => BaseClass::C,
            _ => BaseClass::Other,
        }
    }

    /// Class of the character shown in `cell`.
    pub fn of_cell(cell: &AlignedCell) -> Self {
        Self::of(cell.symbol())
    }
}

/// How a glyph is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    /// The cell's own character.
    Letter,
    /// Downward caret.
    CaretDown,
}

/// Drawing attributes for one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseStyle {
    /// Fill colour.
    pub color: &'static str,
    /// Glyph shape.
    pub glyph: Glyph,
}

const STYLE_TABLE: [BaseStyle; 6] = [
    BaseStyle { color: "#2ca02c", glyph: Glyph::Letter },
    BaseStyle { color: "#d62728", glyph: Glyph::Letter },
    BaseStyle { color: "#9467bd", glyph: Glyph::Letter },
    BaseStyle { color: "#1f77b4", glyph: Glyph::Letter },
    BaseStyle { color: "#8c564b", glyph: Glyph::CaretDown },
    BaseStyle { color: "#7f7f7f", glyph: Glyph::Letter },
];

/// Style for a class.
pub fn style_for(class: BaseClass) -> &'static BaseStyle {
    &STYLE_TABLE[class as usize]
}
