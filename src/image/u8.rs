//! Read-only view over an external 8-bit grayscale buffer.
#[derive(Clone, Debug)]
pub struct ImageU8<'a> {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Bytes between consecutive rows
    pub stride: usize,
    /// Borrowed pixel data
    pub data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.stride + x]
    }
}
