/// Splits search results into fixed-size, 1-based pages.
pub struct Paginator<'a, T> {
    items: &'a [T],
    page_size: usize,
    page_count: u32,
}

impl<'a, T> Paginator<'a, T> {
    pub fn from(items: &'a [T], page_size: u32) -> Self {
        let page_size = page_size.max(1) as usize;
        let page_count = items.len().div_ceil(page_size) as u32;

        Paginator {
            items,
            page_size,
            page_count,
        }
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn get_page(&self, page: u32) -> Result<&'a [T], String> {
        match page {
            0 => return Err("Page has to be greater than 0".to_string()),
            x if x > self.page_count => return Err(format!("Page has to be less than page_count ({})", self.page_count)),
            _ => {}
        };

        let start = (page as usize - 1) * self.page_size;
        let end = (start + self.page_size).min(self.items.len());
        Ok(&self.items[start..end])
    }

    /// Out-of-range pages fall back to the first one. Empty input yields an
    /// empty page.
    pub fn get_page_or_first(&self, page: u32) -> (u32, &'a [T]) {
        let page = match page {
            0 => 1,
            x if x > self.page_count => 1,
            x => x,
        };
        match self.get_page(page) {
            Ok(items) => (page, items),
            Err(_) => (1, &self.items[..0]),
        }
    }
}
