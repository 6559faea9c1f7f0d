//! Perceptual image hashing for similarity detection.
//!
//! This module computes a 64-bit difference hash (dHash) from a single-channel
//! luma grid. The grid is sampled down to 9x8 with nearest-pixel sampling and
//! each row contributes 8 bits, one per horizontal neighbour comparison.
//!
//! Decoding is behind the [`LumaDecoder`] trait so the hashing can be driven
//! by synthetic grids in tests. A file that cannot be decoded hashes to
//! [`PerceptualHash::SENTINEL`], which never matches anything.

use std::path::Path;
use thiserror::Error;

/// Columns of the downsampled grid.
pub const HASH_WIDTH: u64 = 9;

/// Rows of the downsampled grid.
pub const HASH_HEIGHT: u64 = 8;

/// Maximum Hamming distance for two images to be considered similar.
pub const MATCH_THRESHOLD: u32 = 10;

/// Errors that can occur while decoding an image into a luma grid.
#[derive(Debug, Error)]
pub enum PerceptualError {
    /// Failed to open the image file.
    #[error("Failed to open image {0}: {1}")]
    Io(String, #[source] std::io::Error),

    /// Failed to decode the image.
    #[error("Failed to load image {0}: {1}")]
    LoadError(String, #[source] image::ImageError),

    /// The decoded image has no pixels or an inconsistent buffer.
    #[error("Empty or malformed image: {0}")]
    Malformed(String),
}

/// A width x height grid of single-channel (luma) samples in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LumaGrid {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl LumaGrid {
    /// Build a grid, or `None` if the buffer does not match the dimensions
    /// or the grid is empty.
    #[must_use]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        let expected = u64::from(width) * u64::from(height);
        if expected == 0 || pixels.len() as u64 != expected {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Grid width in samples.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in samples.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    fn sample(&self, x: u64, y: u64) -> u8 {
        let index = y * u64::from(self.width) + x;
        self.pixels[index as usize]
    }
}

/// Source of luma grids for image files.
pub trait LumaDecoder {
    /// Decode the image at `path` into a luma grid.
    ///
    /// # Errors
    ///
    /// Returns [`PerceptualError`] if the file is unreadable, corrupt, or in
    /// an unsupported format.
    fn decode_luma(&self, path: &Path) -> Result<LumaGrid, PerceptualError>;
}

/// Decoder backed by the `image` crate.
///
/// The format is sniffed from the file content, falling back to the extension.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageCrateDecoder;

impl LumaDecoder for ImageCrateDecoder {
    fn decode_luma(&self, path: &Path) -> Result<LumaGrid, PerceptualError> {
        let display = path.display().to_string();
        let img = image::ImageReader::open(path)
            .map_err(|e| PerceptualError::Io(display.clone(), e))?
            .with_guessed_format()
            .map_err(|e| PerceptualError::Io(display.clone(), e))?
            .decode()
            .map_err(|e| PerceptualError::LoadError(display.clone(), e))?;

        let luma = img.to_luma8();
        let (width, height) = luma.dimensions();
        LumaGrid::new(width, height, luma.into_raw()).ok_or(PerceptualError::Malformed(display))
    }
}

/// A 64-bit difference hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PerceptualHash(u64);

impl PerceptualHash {
    /// Value produced when an image cannot be decoded.
    pub const SENTINEL: Self = Self(0);

    /// Wrap raw hash bits.
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Raw hash bits.
    #[must_use]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Whether this is the decode-failure sentinel.
    #[must_use]
    pub const fn is_sentinel(self) -> bool {
        self.0 == Self::SENTINEL.0
    }

    /// Number of differing bits (0..=64).
    #[must_use]
    pub const fn distance(self, other: Self) -> u32 {
        (self.0 ^ other.0).count_ones()
    }

    /// Similarity in [0, 1]: `1 - distance / 64`.
    #[must_use]
    pub fn similarity(self, other: Self) -> f64 {
        1.0 - f64::from(self.distance(other)) / 64.0
    }
}

impl std::fmt::Display for PerceptualHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Compute the difference hash of a luma grid.
///
/// Bit `y * 8 + x` is set when sample `x` of row `y` is darker than sample
/// `x + 1` in the 9x8 nearest-pixel downsample.
#[must_use]
pub fn difference_hash(grid: &LumaGrid) -> PerceptualHash {
    let width = u64::from(grid.width);
    let height = u64::from(grid.height);

    let mut hash = 0u64;
    let mut bit_index = 0u32;
    for y in 0..HASH_HEIGHT {
        let src_y = y * height / HASH_HEIGHT;
        let row: Vec<u8> = (0..HASH_WIDTH)
            .map(|x| grid.sample(x * width / HASH_WIDTH, src_y))
            .collect();

        for pair in row.windows(2) {
            if pair[0] < pair[1] {
                hash |= 1u64 << bit_index;
            }
            bit_index += 1;
        }
    }

    PerceptualHash(hash)
}

/// Computes perceptual hashes for image files.
pub struct PerceptualHasher {
    decoder: Box<dyn LumaDecoder>,
}

impl PerceptualHasher {
    /// Create a hasher with a custom decoder.
    pub fn new(decoder: Box<dyn LumaDecoder>) -> Self {
        Self { decoder }
    }

    /// Hash the image at `path`.
    ///
    /// Decode failures are logged and yield [`PerceptualHash::SENTINEL`].
    /// The decoded grid is dropped before this returns.
    pub fn hash_path(&self, path: &Path) -> PerceptualHash {
        match self.decoder.decode_luma(path) {
            Ok(grid) => difference_hash(&grid),
            Err(e) => {
                log::debug!("Perceptual hash unavailable: {}", e);
                PerceptualHash::SENTINEL
            }
        }
    }
}

impl Default for PerceptualHasher {
    fn default() -> Self {
        Self::new(Box::new(ImageCrateDecoder))
    }
}

impl std::fmt::Debug for PerceptualHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PerceptualHasher")
            .field("decoder", &"<decoder>")
            .finish()
    }
}
