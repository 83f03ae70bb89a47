use core::convert::Infallible;

use embedded_graphics_core::{
    Pixel,
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
    pixelcolor::BinaryColor,
};

use crate::{FrameBuffer, protocol};

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            let _ = self.set_pixel(point.x as usize, point.y as usize, color.is_on());
        }

        Ok(())
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(protocol::WIDTH as u32, protocol::HEIGHT as u32)
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics_core::geometry::Point;

    use super::*;

    #[test]
    fn draw_iter_skips_negative_and_out_of_range_points() {
        let mut fb = FrameBuffer::new();
        fb.draw_iter([
            Pixel(Point::new(-1, 0), BinaryColor::On),
            Pixel(Point::new(5, 9), BinaryColor::On),
            Pixel(Point::new(200, 9), BinaryColor::On),
        ])
        .unwrap();

        assert_eq!(fb.pixel(5, 9), Some(true));
        assert_eq!(fb.bytes().iter().filter(|byte| **byte != 0).count(), 1);
        assert_eq!(fb.size(), Size::new(128, 64));
    }
}
