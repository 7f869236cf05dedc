use serde::{Deserialize, Serialize};

/// Pagination summary sent beside the payload, never inside it
///
/// Serialized as camelCase JSON into the [`PaginationHeader::NAME`] response
/// header so clients can read it without parsing the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationHeader {
    pub current_page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl PaginationHeader {
    pub const NAME: &'static str = "Pagination";

    pub fn to_header_value(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// One page of an ordered collection plus its position in the whole
///
/// Deliberately not `Serialize`: callers split it with
/// [`PagedList::into_parts`] and send each half on its own channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedList<T> {
    items: Vec<T>,
    current_page: usize,
    page_size: usize,
    total_count: usize,
    total_pages: usize,
}

impl<T> PagedList<T> {
    /// Slice page `page_number` (1-based) out of `source`
    ///
    /// A page past the end yields no items while still reporting the true
    /// totals. A zero page size yields no pages.
    pub fn create(source: Vec<T>, page_number: usize, page_size: usize) -> Self {
        let total_count = source.len();
        let total_pages = if page_size == 0 {
            0
        } else {
            total_count.div_ceil(page_size)
        };

        let start = page_number.saturating_sub(1).saturating_mul(page_size);
        let items: Vec<T> = source.into_iter().skip(start).take(page_size).collect();

        Self {
            items,
            current_page: page_number,
            page_size,
            total_count,
            total_pages,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn header(&self) -> PaginationHeader {
        PaginationHeader {
            current_page: self.current_page,
            page_size: self.page_size,
            total_items: self.total_count,
            total_pages: self.total_pages,
        }
    }

    /// Convert the page items, keeping the metadata
    pub fn map<U, F>(self, f: F) -> PagedList<U>
    where
        F: FnMut(T) -> U,
    {
        PagedList {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            page_size: self.page_size,
            total_count: self.total_count,
            total_pages: self.total_pages,
        }
    }

    /// Split into the body payload and the side-channel metadata
    pub fn into_parts(self) -> (Vec<T>, PaginationHeader) {
        let header = self.header();
        (self.items, header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twelve_items_three_pages() {
        let source: Vec<u32> = (1..=12).collect();

        let first = PagedList::create(source.clone(), 1, 5);
        assert_eq!(first.items(), &[1, 2, 3, 4, 5]);
        assert_eq!(first.total_pages(), 3);

        let last = PagedList::create(source, 3, 5);
        assert_eq!(last.items(), &[11, 12]);
        assert_eq!(last.total_count(), 12);
        assert_eq!(last.total_pages(), 3);
    }

    #[test]
    fn test_past_last_page_is_empty() {
        let page = PagedList::create((1..=12).collect::<Vec<u32>>(), 4, 5);

        assert!(page.items().is_empty());
        assert_eq!(page.current_page(), 4);
        assert_eq!(page.total_count(), 12);
        assert_eq!(page.total_pages(), 3);
    }

    #[test]
    fn test_empty_source() {
        let page = PagedList::create(Vec::<u32>::new(), 1, 10);

        assert!(page.items().is_empty());
        assert_eq!(page.total_count(), 0);
        assert_eq!(page.total_pages(), 0);
    }

    #[test]
    fn test_zero_page_size() {
        let page = PagedList::create(vec![1, 2, 3], 1, 0);

        assert!(page.items().is_empty());
        assert_eq!(page.total_pages(), 0);
        assert_eq!(page.total_count(), 3);
    }

    #[test]
    fn test_header_is_camel_case() {
        let page = PagedList::create((1..=12).collect::<Vec<u32>>(), 2, 5);
        let json = page.header().to_header_value().unwrap();

        assert_eq!(
            json,
            r#"{"currentPage":2,"pageSize":5,"totalItems":12,"totalPages":3}"#
        );
    }

    #[test]
    fn test_into_parts_separates_metadata() {
        let page = PagedList::create(vec!["a", "b", "c"], 1, 2).map(str::to_uppercase);
        let (items, header) = page.into_parts();

        assert_eq!(items, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(header.total_items, 3);
        assert_eq!(header.total_pages, 2);
    }
}
