use crate::errors::ConversionError;

/// 1-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> Result<Self, ConversionError> {
        if page == 0 || limit == 0 {
            return Err(ConversionError::Zero);
        }
        Ok(Self { page, limit })
    }

    pub fn first(limit: u32) -> Result<Self, ConversionError> {
        Self::new(1, limit)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Same page size at another page, clamped to `1..=last_page`
    pub fn with_page(&self, page: u32, last_page: u32) -> Self {
        Self {
            page: page.clamp(1, last_page.max(1)),
            limit: self.limit,
        }
    }

    /// Changing the page size restarts from the first page
    pub fn with_limit(&self, limit: u32) -> Result<Self, ConversionError> {
        Self::first(limit)
    }

    fn offset(&self) -> usize {
        (self.page as usize - 1).saturating_mul(self.limit as usize)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: crate::const_config::client::CLIENT_DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// One page of a server side collection
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(alias = "users", default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default = "default_total_pages")]
    pub total_pages: u32,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub current_page: Option<u32>,
}

fn default_total_pages() -> u32 {
    1
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            total_pages: default_total_pages(),
            total_count: 0,
            current_page: None,
        }
    }
}

impl<T> Page<T> {
    /// Never less than 1 so that page controls always have a valid range
    pub fn last_page(&self) -> u32 {
        self.total_pages.max(1)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Client side pagination of an already fetched collection
pub fn paginate<T>(items: &[T], req: PageRequest) -> Page<&T> {
    let total = items.len();
    let limit = req.limit as usize;
    let total_pages = total.div_ceil(limit);
    let start = req.offset().min(total);
    let end = start.saturating_add(limit).min(total);
    Page {
        data: items[start..end].iter().collect(),
        total_pages: u32::try_from(total_pages).unwrap_or(u32::MAX),
        total_count: total as u64,
        current_page: Some(req.page),
    }
}
