//! Pixel surfaces.
//!
//! A [`Surface`] is the framebuffer the host presents. Drawing happens
//! through the guard returned by [`Surface::lock`]; the surface is unlocked
//! when the guard drops, and only then can it be presented. The borrow
//! checker enforces that ordering, so a half-drawn frame is never shown.

use gk_core::Color;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("cannot create a {width}x{height} surface: {reason}")]
    Create {
        width: u32,
        height: u32,
        reason: String,
    },

    #[error("surface lock failed: {0}")]
    Lock(String),

    #[error("surface present failed: {0}")]
    Present(String),
}

/// Locked pixel access for one frame.
pub trait FrameBuffer {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Write one pixel.
    ///
    /// # Panics
    ///
    /// If `(x, y)` lies outside the frame. Callers clip before writing.
    fn put_pixel(&mut self, x: u32, y: u32, color: Color);

    fn fill(&mut self, color: Color);
}

/// A presentable framebuffer.
pub trait Surface {
    type Frame<'a>: FrameBuffer
    where
        Self: 'a;

    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Acquire exclusive pixel access until the returned guard drops.
    fn lock(&mut self) -> Result<Self::Frame<'_>, SurfaceError>;

    /// Publish the current contents.
    fn present(&mut self) -> Result<(), SurfaceError>;
}

// ─── In-memory surface ───────────────────────────────────────────────────

/// XRGB8888 surface kept entirely in memory.
///
/// `present` copies the back buffer into a front buffer, so the last
/// presented frame can be inspected while the next one is drawn.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    back: Vec<u32>,
    front: Vec<u32>,
    frames_presented: u64,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        let create_err = |reason: String| SurfaceError::Create {
            width,
            height,
            reason,
        };
        if width == 0 || height == 0 {
            return Err(create_err("zero-sized surface".to_string()));
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| create_err("size overflows".to_string()))?;

        let mut back = Vec::new();
        back.try_reserve_exact(len)
            .map_err(|e| create_err(e.to_string()))?;
        back.resize(len, 0);
        let mut front = Vec::new();
        front
            .try_reserve_exact(len)
            .map_err(|e| create_err(e.to_string()))?;
        front.resize(len, 0);

        Ok(Self {
            width,
            height,
            back,
            front,
            frames_presented: 0,
        })
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Pixel of the last presented frame, `None` when out of range.
    pub fn presented_pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(Color::from_xrgb(
            self.front[y as usize * self.width as usize + x as usize],
        ))
    }

    /// Packed pixels of the last presented frame, row-major.
    pub fn presented(&self) -> &[u32] {
        &self.front
    }
}

impl Surface for PixelBuffer {
    type Frame<'a> = PixelFrame<'a>;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn lock(&mut self) -> Result<Self::Frame<'_>, SurfaceError> {
        log::trace!("lock {}x{} surface", self.width, self.height);
        Ok(PixelFrame {
            width: self.width,
            height: self.height,
            pixels: &mut self.back,
        })
    }

    fn present(&mut self) -> Result<(), SurfaceError> {
        self.front.copy_from_slice(&self.back);
        self.frames_presented += 1;
        log::trace!("present frame {}", self.frames_presented);
        Ok(())
    }
}

/// Lock guard over a [`PixelBuffer`]'s back buffer.
pub struct PixelFrame<'a> {
    width: u32,
    height: u32,
    pixels: &'a mut [u32],
}

impl FrameBuffer for PixelFrame<'_> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn put_pixel(&mut self, x: u32, y: u32, color: Color) {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} frame",
            self.width,
            self.height
        );
        self.pixels[y as usize * self.width as usize + x as usize] = color.to_xrgb();
    }

    fn fill(&mut self, color: Color) {
        self.pixels.fill(color.to_xrgb());
    }
}

impl Drop for PixelFrame<'_> {
    fn drop(&mut self) {
        log::trace!("unlock surface");
    }
}
