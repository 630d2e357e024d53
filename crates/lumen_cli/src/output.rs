//! Image file output.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use lumen_renderer::ImageBuffer;

/// Write the image as a binary P6 portable pixmap.
pub fn write_ppm<W: Write>(writer: &mut W, image: &ImageBuffer) -> io::Result<()> {
    write!(writer, "P6\n{} {}\n255\n", image.width, image.height)?;
    writer.write_all(&image.to_rgb_bytes())
}

/// Save the image, choosing the format from the file extension.
///
/// `.png` is written with the `image` crate; anything else is written as P6.
pub fn save_image(path: &Path, image: &ImageBuffer) -> Result<()> {
    let is_png = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));

    if is_png {
        let rgb = image::RgbImage::from_raw(image.width, image.height, image.to_rgb_bytes())
            .context("Pixel buffer does not match image size")?;
        rgb.save(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    } else {
        save_ppm(path, image)?;
    }
    Ok(())
}

/// Write the image to `path` as P6 through a buffered writer.
pub fn save_ppm(path: &Path, image: &ImageBuffer) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_ppm(&mut writer, image)
        .and_then(|()| writer.flush())
        .with_context(|| format!("Failed to write {}", path.display()))
}
