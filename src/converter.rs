use crate::bitmap::EncodedImage;
use crate::error::{ConvertError, Result};
use crate::grid::PixelGrid;
use crate::icondir::{IconDir, MAX_DIMENSION};
use crate::size::{Size, Sizes};
use crate::source::{ImageSource, PixelSource};
use std::fs::File;
use std::io::Write;
use std::path::Path;

//===========================================================================//

/// Builds an ICO file from one or more source images, each rendered at one or
/// more sizes.
///
/// Images are stored in the order they were added, which is also the order of
/// the entries in the resulting file.
#[derive(Clone, Debug, Default)]
pub struct IcoConverter<S = ImageSource> {
    source: S,
    icon_dir: IconDir,
}

impl IcoConverter<ImageSource> {
    /// Creates a converter with no images that reads source files with the
    /// `image` crate.
    pub fn new() -> IcoConverter<ImageSource> {
        IcoConverter::with_source(ImageSource::new())
    }

    /// Creates a converter holding the image at `path` rendered at `sizes`.
    /// See [`IcoConverter::add_image`].
    pub fn from_file<P, Z>(path: P, sizes: Z) -> Result<IcoConverter>
    where
        P: AsRef<Path>,
        Z: Into<Sizes>,
    {
        let mut converter = IcoConverter::new();
        converter.add_image(path, sizes)?;
        Ok(converter)
    }
}

impl<S: PixelSource> IcoConverter<S> {
    /// Creates a converter with no images that reads source files with the
    /// given pixel source.
    pub fn with_source(source: S) -> IcoConverter<S> {
        IcoConverter { source, icon_dir: IconDir::new() }
    }

    /// Returns the pixel source used to read source files.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the images added so far, in insertion order.
    pub fn images(&self) -> &[EncodedImage] {
        self.icon_dir.entries()
    }

    /// Decodes the image at `path` and adds it once per requested size, in
    /// the order the sizes were given.  If `sizes` is empty, the image is
    /// added once at its own dimensions.
    ///
    /// On error, no images are added.
    pub fn add_image<P, Z>(&mut self, path: P, sizes: Z) -> Result<()>
    where
        P: AsRef<Path>,
        Z: Into<Sizes>,
    {
        let path = path.as_ref();
        let sizes = sizes.into();
        for size in sizes.as_slice() {
            check_size(*size)?;
        }
        let grid = match self.source.decode(path) {
            Ok(grid) => grid,
            Err(source) => {
                log::warn!("Failed to decode {:?}: {}", path, source);
                return Err(ConvertError::Decode {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        log::debug!(
            "Decoded {:?} ({}x{})",
            path,
            grid.width(),
            grid.height()
        );
        let sizes = if sizes.is_intrinsic() {
            let size = Size::new(grid.width(), grid.height());
            check_size(size)?;
            Sizes::from(size)
        } else {
            sizes
        };
        let mut encoded = Vec::with_capacity(sizes.as_slice().len());
        for size in sizes.as_slice() {
            let resampled = self
                .source
                .resample(&grid, size.width, size.height)
                .map_err(|source| ConvertError::Resample {
                    path: path.to_path_buf(),
                    source,
                })?;
            encoded.push(EncodedImage::encode(&resampled));
        }
        for image in encoded {
            self.icon_dir.add_entry(image);
        }
        Ok(())
    }

    /// Adds an already decoded grid at its own dimensions.
    pub fn add_grid(&mut self, grid: &PixelGrid) -> Result<()> {
        check_size(Size::new(grid.width(), grid.height()))?;
        self.icon_dir.add_entry(EncodedImage::encode(grid));
        Ok(())
    }

    /// Serializes all added images as an ICO file.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        if self.icon_dir.is_empty() {
            return Err(ConvertError::EmptyOutput);
        }
        self.icon_dir.to_bytes().map_err(ConvertError::Serialize)
    }

    /// Writes the ICO file to `writer`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        let data = self.to_bytes()?;
        writer.write_all(&data).map_err(ConvertError::Stream)
    }

    /// Writes the ICO file to `path`.  Nothing is created if there are no
    /// images.  The added images are kept whether or not this succeeds.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let data = self.to_bytes()?;
        let result = File::create(path).and_then(|mut file| {
            file.write_all(&data)?;
            file.flush()
        });
        match result {
            Ok(()) => {
                log::debug!(
                    "Wrote {} images ({} bytes) to {:?}",
                    self.icon_dir.len(),
                    data.len(),
                    path
                );
                Ok(())
            }
            Err(source) => {
                log::warn!("Failed to write {:?}: {}", path, source);
                Err(ConvertError::Write { path: path.to_path_buf(), source })
            }
        }
    }
}

fn check_size(size: Size) -> Result<()> {
    let valid = 1..=MAX_DIMENSION;
    if valid.contains(&size.width) && valid.contains(&size.height) {
        Ok(())
    } else {
        Err(ConvertError::InvalidSize { width: size.width, height: size.height })
    }
}

//===========================================================================//


//===========================================================================//
