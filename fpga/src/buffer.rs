use core::{fmt, ops, slice};

use crate::{Error, Page, Result};

/// Owned, zero-initialised, page-aligned byte buffer for DMA transfers.
///
/// The backing storage always carries one spare page past the rounded-up
/// length; the XDMA driver reads past the requested size otherwise.
pub struct PageBuffer {
    pages: Vec<Page>,
    len: usize,
}

impl PageBuffer {
    pub fn new(len: usize) -> Result<Self> {
        let count = Page::count(len) + 1;
        let mut pages = Vec::new();
        pages
            .try_reserve_exact(count)
            .map_err(|_| Error::AllocationFailed { size: len })?;
        pages.resize(count, Page::ZERO);
        Ok(Self { pages, len })
    }

    /// Copies `bytes` into a freshly allocated buffer.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let mut buffer = Self::new(bytes.len())?;
        buffer.copy_from_slice(bytes);
        Ok(buffer)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl ops::Deref for PageBuffer {
    type Target = [u8];
    fn deref(&self) -> &[u8] {
        // `Page` is `repr(C)` around a byte array, so the pages are one contiguous run of bytes
        unsafe { slice::from_raw_parts(self.pages.as_ptr() as *const u8, self.len) }
    }
}

impl ops::DerefMut for PageBuffer {
    fn deref_mut(&mut self) -> &mut [u8] {
        unsafe { slice::from_raw_parts_mut(self.pages.as_mut_ptr() as *mut u8, self.len) }
    }
}

impl fmt::Debug for PageBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageBuffer")
            .field("len", &self.len)
            .field("pages", &self.pages.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PAGE_SIZE;

    #[test]
    fn buffer_is_page_aligned_and_zeroed() {
        let buffer = PageBuffer::new(100).unwrap();
        assert_eq!(buffer.as_ptr() as usize % PAGE_SIZE, 0);
        assert_eq!(buffer.len(), 100);
        assert!(buffer.iter().all(|&byte| byte == 0));
    }

    #[test]
    fn buffer_keeps_a_spare_page() {
        let buffer = PageBuffer::new(PAGE_SIZE).unwrap();
        assert_eq!(buffer.pages.len(), 2);

        let empty = PageBuffer::new(0).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.pages.len(), 1);
    }

    #[test]
    fn from_slice_spans_pages() {
        let bytes: Vec<u8> = (0..(PAGE_SIZE + 10)).map(|i| i as u8).collect();
        let buffer = PageBuffer::from_slice(&bytes).unwrap();
        assert_eq!(&buffer[..], &bytes[..]);
    }

    #[test]
    fn absurd_allocation_fails() {
        match PageBuffer::new(usize::MAX / 2) {
            Err(Error::AllocationFailed { .. }) => {}
            other => panic!("expected AllocationFailed, got {:?}", other),
        }
    }
}
