use crate::bitmap::EncodedImage;
use byteorder::{LittleEndian, WriteBytesExt};
use std::io::{self, Write};

//===========================================================================//

/// The size of the ICONDIR header at the start of an ICO file, in bytes.
pub const ICONDIR_HEADER_LEN: u32 = 6;

/// The size of each ICONDIRENTRY record, in bytes.
pub const ICONDIRENTRY_LEN: u32 = 16;

/// The largest width or height an ICO directory entry can describe.
pub const MAX_DIMENSION: u32 = 256;

// The resource type number for icons (cursors would be 2).
const ICON_RESOURCE_TYPE: u16 = 1;

//===========================================================================//

/// An ordered collection of encoded images; the contents of a single ICO
/// file.
#[derive(Clone, Debug, Default)]
pub struct IconDir {
    entries: Vec<EncodedImage>,
}

impl IconDir {
    /// Creates a new, empty collection of icons.
    pub fn new() -> IconDir {
        IconDir { entries: Vec::new() }
    }

    /// Returns the entries in this collection, in insertion order.
    pub fn entries(&self) -> &[EncodedImage] {
        &self.entries
    }

    /// Returns the number of entries in this collection.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entries have been added yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adds an entry to the end of the collection.
    pub fn add_entry(&mut self, entry: EncodedImage) {
        self.entries.push(entry);
    }

    /// Returns the offset of the first image's data, which immediately
    /// follows the header and the directory entries.
    pub fn data_offset(&self) -> u32 {
        ICONDIR_HEADER_LEN + ICONDIRENTRY_LEN * (self.entries.len() as u32)
    }

    /// Returns the total length of the ICO file that `write` produces.
    pub fn file_size(&self) -> usize {
        let data_size: usize =
            self.entries.iter().map(|entry| entry.size()).sum();
        self.data_offset() as usize + data_size
    }

    /// Writes an ICO file: the ICONDIR header, one ICONDIRENTRY per image,
    /// and then the image data in the same order.  Returns an error if the
    /// collection is empty or can't be represented in the ICO format.
    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        if self.entries.is_empty() {
            invalid_input!("Can't write an IconDir with no entries");
        }
        if self.entries.len() > (u16::MAX as usize) {
            invalid_input!(
                "Too many entries in IconDir (was {}, but max is {})",
                self.entries.len(),
                u16::MAX
            );
        }
        for (index, entry) in self.entries.iter().enumerate() {
            if entry.width() > MAX_DIMENSION || entry.height() > MAX_DIMENSION
            {
                invalid_input!(
                    "Entry {} is too large for an ICO file \
                     (was {}x{}, but max is {}x{})",
                    index,
                    entry.width(),
                    entry.height(),
                    MAX_DIMENSION,
                    MAX_DIMENSION
                );
            }
        }
        // Lay out every entry before writing anything, so that a directory
        // that can't be represented fails without partial output.
        let mut spans = Vec::<(u32, u32)>::with_capacity(self.entries.len());
        let mut data_offset = self.data_offset();
        for (index, entry) in self.entries.iter().enumerate() {
            let data_size = match u32::try_from(entry.size()) {
                Ok(data_size) => data_size,
                Err(_) => invalid_input!(
                    "Entry {} is too large for an ICO file ({} bytes)",
                    index,
                    entry.size()
                ),
            };
            spans.push((data_size, data_offset));
            data_offset = next_offset(data_offset, data_size)?;
        }
        writer.write_u16::<LittleEndian>(0)?; // reserved
        writer.write_u16::<LittleEndian>(ICON_RESOURCE_TYPE)?;
        writer.write_u16::<LittleEndian>(self.entries.len() as u16)?;
        for (entry, &(data_size, data_offset)) in self.entries.iter().zip(&spans)
        {
            // A width/height byte of zero indicates a size of 256.
            writer.write_u8(dimension_byte(entry.width()))?;
            writer.write_u8(dimension_byte(entry.height()))?;
            writer.write_u8(entry.color_palette_colors())?;
            writer.write_u8(0)?; // reserved
            writer.write_u16::<LittleEndian>(1)?; // color planes
            writer.write_u16::<LittleEndian>(entry.bits_per_pixel())?;
            writer.write_u32::<LittleEndian>(data_size)?;
            writer.write_u32::<LittleEndian>(data_offset)?;
        }
        for entry in self.entries.iter() {
            writer.write_all(entry.data())?;
        }
        Ok(())
    }

    /// Serializes the ICO file into a new buffer.
    pub fn to_bytes(&self) -> io::Result<Vec<u8>> {
        let mut data = Vec::with_capacity(self.file_size());
        self.write(&mut data)?;
        debug_assert_eq!(data.len(), self.file_size());
        Ok(data)
    }
}

// Returns the offset of the data following `size` bytes at `offset`, or an
// error if it doesn't fit in the 32-bit offset field.
fn next_offset(offset: u32, size: u32) -> io::Result<u32> {
    match offset.checked_add(size) {
        Some(next) => Ok(next),
        None => invalid_input!(
            "ICO data is too large (offset {} plus {} bytes exceeds {})",
            offset,
            size,
            u32::MAX
        ),
    }
}

fn dimension_byte(size: u32) -> u8 {
    if size >= MAX_DIMENSION {
        0
    } else {
        size as u8
    }
}

//===========================================================================//


//===========================================================================//
