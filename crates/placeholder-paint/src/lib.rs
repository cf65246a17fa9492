//! placeholder-paint: geometry, brushes and the recorded display list the
//! placeholder draw engine paints into, plus a CPU rasterizer for capturing
//! frames as pixels.

mod color;
mod display_list;
mod error;
mod painter;
mod raster;
mod scene;

pub use display_list::*;
pub use error::{CaptureError, Result};
pub use painter::*;
pub use raster::{Capture, rasterize};
pub use scene::*;
