#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//===========================================================================//

/// The dimensions an image should be rendered at in the ICO file.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Creates a size from a width and a height.
    pub const fn new(width: u32, height: u32) -> Size {
        Size { width, height }
    }

    /// Creates a square size.
    pub const fn square(size: u32) -> Size {
        Size { width: size, height: size }
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Size {
        Size { width, height }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// The error returned when parsing a [`Size`] from a string fails.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("Invalid size {0:?} (expected WIDTHxHEIGHT or a single number)")]
pub struct ParseSizeError(String);

impl FromStr for Size {
    type Err = ParseSizeError;

    /// Parses `"WIDTHxHEIGHT"` (e.g. `"32x32"`), or a single number for a
    /// square size.
    fn from_str(s: &str) -> Result<Size, ParseSizeError> {
        let error = || ParseSizeError(s.to_string());
        let trimmed = s.trim();
        match trimmed.split_once(|c: char| c == 'x' || c == 'X') {
            Some((width, height)) => {
                let width = width.trim().parse().map_err(|_| error())?;
                let height = height.trim().parse().map_err(|_| error())?;
                Ok(Size::new(width, height))
            }
            None => trimmed.parse().map(Size::square).map_err(|_| error()),
        }
    }
}

//===========================================================================//

/// An ordered list of sizes to render a source image at.  An empty list
/// means the source image's own dimensions.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Sizes(Vec<Size>);

impl Sizes {
    /// Returns the empty list, which renders the source at its intrinsic
    /// size.
    pub fn intrinsic() -> Sizes {
        Sizes(Vec::new())
    }

    /// Returns true if no explicit sizes were given.
    pub fn is_intrinsic(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the sizes in the order they were given.
    pub fn as_slice(&self) -> &[Size] {
        &self.0
    }
}

impl From<Size> for Sizes {
    fn from(size: Size) -> Sizes {
        Sizes(vec![size])
    }
}

impl From<(u32, u32)> for Sizes {
    fn from(size: (u32, u32)) -> Sizes {
        Sizes(vec![size.into()])
    }
}

impl<T: Into<Size>> From<Vec<T>> for Sizes {
    fn from(sizes: Vec<T>) -> Sizes {
        Sizes(sizes.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Size> + Copy> From<&[T]> for Sizes {
    fn from(sizes: &[T]) -> Sizes {
        Sizes(sizes.iter().map(|&size| size.into()).collect())
    }
}

impl<T: Into<Size>, const N: usize> From<[T; N]> for Sizes {
    fn from(sizes: [T; N]) -> Sizes {
        Sizes(sizes.into_iter().map(Into::into).collect())
    }
}

impl FromIterator<Size> for Sizes {
    fn from_iter<I: IntoIterator<Item = Size>>(iter: I) -> Sizes {
        Sizes(iter.into_iter().collect())
    }
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::{Size, Sizes};

    #[test]
    fn parse_sizes() {
        assert_eq!("16x16".parse::<Size>(), Ok(Size::new(16, 16)));
        assert_eq!("48X32".parse::<Size>(), Ok(Size::new(48, 32)));
        assert_eq!(" 24 ".parse::<Size>(), Ok(Size::square(24)));
        assert!("16x".parse::<Size>().is_err());
        assert!("ax16".parse::<Size>().is_err());
        assert!("".parse::<Size>().is_err());
    }

    #[test]
    fn display_round_trip() {
        let size = Size::new(64, 32);
        assert_eq!(size.to_string().parse::<Size>(), Ok(size));
    }

    #[test]
    fn single_pair_is_one_element_list() {
        let sizes = Sizes::from((16, 16));
        assert_eq!(sizes.as_slice(), &[Size::new(16, 16)]);
    }

    #[test]
    fn list_keeps_order() {
        let sizes = Sizes::from([Size::square(32), Size::square(16)]);
        assert_eq!(sizes.as_slice(), &[Size::square(32), Size::square(16)]);
        let sizes = Sizes::from(vec![Size::square(48)]);
        assert_eq!(sizes.as_slice(), &[Size::square(48)]);
        let pairs: &[(u32, u32)] = &[(8, 8), (24, 24)];
        assert_eq!(Sizes::from(pairs).as_slice().len(), 2);
    }

    #[test]
    fn empty_list_is_intrinsic() {
        assert!(Sizes::default().is_intrinsic());
        assert!(Sizes::from(Vec::<Size>::new()).is_intrinsic());
        assert!(!Sizes::from((1, 1)).is_intrinsic());
    }
}

//===========================================================================//
