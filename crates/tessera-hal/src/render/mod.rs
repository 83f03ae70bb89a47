pub mod dialog;

use oled128::FrameBuffer;
use tessera_core::render::Screen;

pub trait FrameRenderer {
    fn render(&mut self, screen: Screen<'_>, frame: &mut FrameBuffer);
}
