use winit::dpi::PhysicalSize;

/// Drawable size in physical pixels.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Validates a host-supplied size.
    ///
    /// Returns `None` unless both dimensions are strictly positive.
    pub fn from_signed(width: i32, height: i32) -> Option<Self> {
        if width <= 0 || height <= 0 {
            return None;
        }
        Some(Self::new(width as u32, height as u32))
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width over height. An empty size reports 1.0 so projections stay finite.
    pub fn aspect_ratio(self) -> f32 {
        if self.is_empty() {
            return 1.0;
        }
        self.width as f32 / self.height as f32
    }
}

impl From<PhysicalSize<u32>> for PixelSize {
    fn from(size: PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_dimensions_accepted() {
        assert_eq!(PixelSize::from_signed(1080, 1920), Some(PixelSize::new(1080, 1920)));
    }

    #[test]
    fn zero_or_negative_rejected() {
        assert_eq!(PixelSize::from_signed(0, 100), None);
        assert_eq!(PixelSize::from_signed(100, 0), None);
        assert_eq!(PixelSize::from_signed(-1, 100), None);
        assert_eq!(PixelSize::from_signed(100, i32::MIN), None);
    }

    #[test]
    fn aspect_ratio_of_landscape() {
        assert_eq!(PixelSize::new(2000, 1000).aspect_ratio(), 2.0);
    }

    #[test]
    fn aspect_ratio_of_empty_is_finite() {
        assert_eq!(PixelSize::new(0, 0).aspect_ratio(), 1.0);
        assert_eq!(PixelSize::new(640, 0).aspect_ratio(), 1.0);
    }

    #[test]
    fn converts_from_winit_size() {
        let s: PixelSize = PhysicalSize::new(3u32, 4u32).into();
        assert_eq!(s, PixelSize::new(3, 4));
    }
}
