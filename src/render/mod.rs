//! Drawing reconstructed pileups.
//!
//! Reference, consensus and reads are laid out as rows of base glyphs on a
//! shared column axis, coloured through the lookup table in [`style`].

pub mod style;
mod plot;

pub use plot::{render_svg, write_svg, RenderError, RenderOptions};
pub use style::{style_for, BaseClass, BaseStyle, Glyph};
