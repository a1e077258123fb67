//! A library for converting raster images into multi-resolution ICO files.
//!
//! Each image is stored as an uncompressed 32 bpp BMP with a 1 bpp AND mask,
//! which every ICO consumer can read.
//!
//! # Example
//!
//! ```no_run
//! use icogen::{IcoConverter, Size};
//!
//! let mut converter = IcoConverter::new();
//! converter.add_image("logo-small.gif", Size::square(16))?;
//! converter.add_image("logo.png", vec![Size::square(32), Size::square(48)])?;
//! converter.save("favicon.ico")?;
//! # Ok::<(), icogen::ConvertError>(())
//! ```

#![warn(missing_docs)]

#[macro_use]
mod macros;

mod bitmap;
mod converter;
mod error;
mod grid;
mod icondir;
mod size;
mod source;

pub use crate::bitmap::{
    legacy_alpha, transparency, EncodedImage, BITS_PER_PIXEL, BMP_HEADER_LEN,
};
pub use crate::converter::IcoConverter;
pub use crate::error::{ConvertError, Result};
pub use crate::grid::PixelGrid;
pub use crate::icondir::{
    IconDir, ICONDIRENTRY_LEN, ICONDIR_HEADER_LEN, MAX_DIMENSION,
};
pub use crate::size::{ParseSizeError, Size, Sizes};
pub use crate::source::{FilterType, ImageSource, PixelSource};
