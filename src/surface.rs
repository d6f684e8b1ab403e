pub mod svg;

use crate::frame::Frame;

/// Replays a finished frame against a concrete drawing target.
///
/// The renderer never sees a surface; it only fills frames. Adapters decide
/// what "presenting" means — a markup string, a raster, a terminal.
pub trait Surface {
    type Output;

    fn present(&mut self, frame: &Frame) -> Self::Output;
}
