/// Page size the XDMA driver expects DMA buffers to be aligned to.
pub const PAGE_SIZE: usize = 4096;

#[repr(align(4096))]
#[derive(Copy, Clone, Debug)]
struct Align4096;

/// One page of memory, aligned to a 4096 byte boundary.
#[repr(C)]
#[derive(Copy, Clone)]
pub struct Page {
    // this 0-sized, page-aligned entry aligns the entire struct
    __: [Align4096; 0],
    pub bytes: [u8; PAGE_SIZE],
}

impl Page {
    pub const ZERO: Page = Page {
        __: [],
        bytes: [0u8; PAGE_SIZE],
    };

    /// Number of pages needed to hold `len` bytes.
    pub const fn count(len: usize) -> usize {
        len / PAGE_SIZE + (len % PAGE_SIZE != 0) as usize
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_is_exactly_one_aligned_page() {
        assert_eq!(core::mem::size_of::<Page>(), PAGE_SIZE);
        assert_eq!(core::mem::align_of::<Page>(), PAGE_SIZE);
    }

    #[test]
    fn count_rounds_up() {
        assert_eq!(Page::count(0), 0);
        assert_eq!(Page::count(1), 1);
        assert_eq!(Page::count(PAGE_SIZE), 1);
        assert_eq!(Page::count(PAGE_SIZE + 1), 2);
    }
}
