use serde::Serialize;
use utoipa::ToSchema;

/// Listing contexts with their fixed page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingKind {
    Home,
    Search,
    Category,
    Author,
    Admin,
}

impl ListingKind {
    pub const fn page_size(self) -> u32 {
        match self {
            Self::Home | Self::Author => 9,
            Self::Search | Self::Category => 6,
            Self::Admin => 20,
        }
    }
}

/// One-based page number taken from a query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PageNumber(u32);

impl PageNumber {
    pub const FIRST: Self = Self(1);

    pub fn new(value: u32) -> Self {
        Self(value.max(1))
    }

    /// Absent, non-numeric and non-positive values all mean the first page.
    /// Numbers too large for a page index saturate instead.
    pub fn from_query(raw: Option<&str>) -> Self {
        let Some(digits) = raw
            .map(str::trim)
            .filter(|value| !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()))
        else {
            return Self::FIRST;
        };
        digits.parse::<u32>().map_or(Self(u32::MAX), Self::new)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Rows to skip before this page starts.
    pub fn offset(self, page_size: u32) -> u64 {
        u64::from(self.0 - 1) * u64::from(page_size)
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub skip: u64,
    pub take: u32,
    pub total_pages: u32,
}

/// Offset arithmetic for a page. Pages past the end are not an error; the
/// store simply returns nothing for them.
pub fn paginate(page: PageNumber, page_size: u32, total_count: u64) -> PageWindow {
    PageWindow {
        skip: page.offset(page_size),
        take: page_size,
        total_pages: total_pages(total_count, page_size),
    }
}

pub fn total_pages(total: u64, page_size: u32) -> u32 {
    if total == 0 || page_size == 0 {
        0
    } else {
        u32::try_from(total.div_ceil(u64::from(page_size))).unwrap_or(u32::MAX)
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", bound = "T: Serialize")]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

impl<T> PageResult<T> {
    pub fn new(items: Vec<T>, total: u64, page: PageNumber, window: PageWindow) -> Self {
        Self {
            items,
            total,
            page: page.get(),
            page_size: window.take,
            total_pages: window.total_pages,
        }
    }

    pub fn empty(page: PageNumber, page_size: u32) -> Self {
        Self::new(Vec::new(), 0, page, paginate(page, page_size, 0))
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
        }
    }
}
