pub mod frame;
pub mod hit;
pub mod raster;
pub mod surface;

pub use frame::{FrameRenderer, FrameView, Palette};
pub use hit::{HitTolerance, hit_test};
pub use raster::Rasterizer;
pub use surface::{FrameBuffer, PixelBuffer, Surface, SurfaceError};
