//! Frame vectorization: module grid to a resolution-independent SVG
//! document.

use crate::rendering::Frame;

/// Build an SVG document for `frame`.
///
/// The declared `width`/`height` equal the configured pixel size; the
/// `viewBox` spans the module grid (quiet border included) so the drawing
/// scales without rasterization. Dark modules are emitted as one path of
/// unit cells. Output always uses Unix newlines.
pub fn to_svg(frame: &Frame) -> String {
    let size = frame.config.size;
    let dim = frame.grid_dimension();
    let mut out = String::new();
    out += "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
    out += &format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" width=\"{0}\" height=\"{0}\" viewBox=\"0 0 {1} {1}\" stroke=\"none\">\n",
        size, dim
    );
    out += &format!(
        "\t<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>\n",
        frame.config.background.to_hex()
    );
    out += "\t<path d=\"";
    let mut first = true;
    for y in 0..dim {
        for x in 0..dim {
            if frame.module_at(x, y) {
                if !first {
                    out += " ";
                }
                first = false;
                out += &format!("M{},{}h1v1h-1z", x, y);
            }
        }
    }
    out += &format!("\" fill=\"{}\"/>\n", frame.config.foreground.to_hex());
    out += "</svg>\n";
    out
}
