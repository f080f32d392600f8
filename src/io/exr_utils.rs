/* Copyright 2020 @TwoCookingMice */

use super::RenderError;
use crate::math::bitmap::Bitmap;

use exr::prelude::{ read_first_rgba_layer_from_file, write_rgb_file };

// Write EXR Image to file
pub fn write_exr_to_file(image: &Bitmap, file_path: &str) -> Result<(), RenderError> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidArgument(format!("cannot write an empty {}x{} image", width, height)));
    }
    log::info!("Starting writing openexr images: {}.", file_path);

    write_rgb_file(file_path, width, height, |x, y| {
        let p = image[(x, y)];
        (p.x, p.y, p.z)
    })?;

    log::info!("EXR written to: {}.", file_path);
    Ok(())
}

// Read the first RGB(A) layer of an EXR file
pub fn read_exr_from_file(file_path: &str) -> Result<Bitmap, RenderError> {
    log::info!("Starting reading OpenEXR image from: {}.", file_path);

    let image = read_first_rgba_layer_from_file(
        file_path,
        |resolution, _| Bitmap::new(resolution.width(), resolution.height()),
        |bitmap: &mut Bitmap, position, (r, g, b, _a): (f32, f32, f32, f32)| {
            bitmap[(position.x(), position.y())] = crate::math::constants::Vector3f::new(r, g, b);
        },
    )?;
    let bitmap = image.layer_data.channel_data.pixels;

    log::info!("OpenEXR loaded, width = {}, height = {}.", bitmap.width(), bitmap.height());
    Ok(bitmap)
}
