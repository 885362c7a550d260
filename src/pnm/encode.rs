//! PPM encoder: binary P6, maxval 255.

use std::io::Write;

use enough::Stop;
use rgb::ComponentBytes as _;

use crate::error::BitmapError;
use crate::pixel::PixelBuffer;

/// Encode pixels as P6.
pub(crate) fn encode_ppm<W: Write>(
    out: &mut W,
    image: &PixelBuffer,
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    write!(out, "P6\n{} {}\n255\n", image.width(), image.height())?;
    for (y, row) in image.rows().enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        // RGB8 is three packed bytes, already in PPM sample order
        out.write_all(row.as_bytes())?;
    }
    Ok(())
}
