use oled128::{
    FrameBuffer,
    protocol::{HEIGHT, WIDTH},
};

/// Renders the panel as text, two pixel rows per line using half blocks.
pub(super) fn frame_to_text(frame: &FrameBuffer) -> String {
    let border: String = "-".repeat(WIDTH);
    let mut out = String::with_capacity((WIDTH + 3) * (HEIGHT / 2 + 2) * 3);

    out.push('+');
    out.push_str(&border);
    out.push_str("+\n");
    for y in (0..HEIGHT).step_by(2) {
        out.push('|');
        for x in 0..WIDTH {
            let top = frame.pixel(x, y).unwrap_or(false);
            let bottom = frame.pixel(x, y + 1).unwrap_or(false);
            out.push(match (top, bottom) {
                (true, true) => '█',
                (true, false) => '▀',
                (false, true) => '▄',
                (false, false) => ' ',
            });
        }
        out.push_str("|\n");
    }
    out.push('+');
    out.push_str(&border);
    out.push('+');
    out
}

pub(super) fn print_frame(frame: &FrameBuffer) {
    println!("{}", frame_to_text(frame));
}
