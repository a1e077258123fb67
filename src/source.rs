use crate::grid::PixelGrid;
pub use image::imageops::FilterType;
use image::{ImageError, ImageReader, RgbaImage};
use std::io;
use std::path::Path;

//===========================================================================//

/// Supplies pixel grids to an [`IcoConverter`](crate::IcoConverter).
pub trait PixelSource {
    /// Decodes the image file at `path` into a grid at its own dimensions.
    fn decode(&self, path: &Path) -> io::Result<PixelGrid>;

    /// Resamples `grid` to exactly `width` by `height` pixels.
    fn resample(
        &self,
        grid: &PixelGrid,
        width: u32,
        height: u32,
    ) -> io::Result<PixelGrid>;
}

//===========================================================================//

/// A [`PixelSource`] backed by the `image` crate.  Reads PNG, GIF and JPEG
/// files, detecting the format from the file contents.
#[derive(Clone, Copy, Debug)]
pub struct ImageSource {
    filter: FilterType,
}

impl ImageSource {
    /// Creates a source that resamples with a Catmull-Rom (bicubic) filter.
    pub fn new() -> ImageSource {
        ImageSource { filter: FilterType::CatmullRom }
    }

    /// Creates a source that resamples with the given filter.
    pub fn with_filter(filter: FilterType) -> ImageSource {
        ImageSource { filter }
    }

    /// Returns the filter used for resampling.
    pub fn filter(&self) -> FilterType {
        self.filter
    }
}

impl Default for ImageSource {
    fn default() -> ImageSource {
        ImageSource::new()
    }
}

impl PixelSource for ImageSource {
    fn decode(&self, path: &Path) -> io::Result<PixelGrid> {
        let reader = ImageReader::open(path)?.with_guessed_format()?;
        if reader.format().is_none() {
            invalid_data!("Unrecognized image format in {:?}", path);
        }
        let image = reader.decode().map_err(image_error)?.into_rgba8();
        if image.width() == 0 || image.height() == 0 {
            invalid_data!(
                "Decoded image {:?} is empty ({}x{})",
                path,
                image.width(),
                image.height()
            );
        }
        let (width, height) = image.dimensions();
        Ok(PixelGrid::from_rgba_data(width, height, image.into_raw()))
    }

    fn resample(
        &self,
        grid: &PixelGrid,
        width: u32,
        height: u32,
    ) -> io::Result<PixelGrid> {
        if width == 0 || height == 0 {
            invalid_input!("Can't resample to {}x{}", width, height);
        }
        if grid.width() == width && grid.height() == height {
            return Ok(grid.clone());
        }
        let buffer = match RgbaImage::from_raw(
            grid.width(),
            grid.height(),
            grid.rgba_data().to_vec(),
        ) {
            Some(buffer) => buffer,
            None => invalid_input!(
                "Pixel data doesn't match {}x{} grid",
                grid.width(),
                grid.height()
            ),
        };
        let resized =
            image::imageops::resize(&buffer, width, height, self.filter);
        Ok(PixelGrid::from_rgba_data(width, height, resized.into_raw()))
    }
}

fn image_error(error: ImageError) -> io::Error {
    match error {
        ImageError::IoError(error) => error,
        other => io::Error::new(io::ErrorKind::InvalidData, other),
    }
}

//===========================================================================//


//===========================================================================//
