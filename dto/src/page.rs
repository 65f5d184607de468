use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One page of a paginated backend listing.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    content: Vec<T>,
    number: u32,
    size: u32,
    total_elements: u64,
    total_pages: u32,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, number: u32, size: u32, total_elements: u64) -> Self {
        let total_pages = if size == 0 {
            0
        } else {
            total_elements.div_ceil(size as u64) as u32
        };
        Self {
            content,
            number,
            size,
            total_elements,
            total_pages,
        }
    }

    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    pub fn is_truncated(&self) -> bool {
        self.total_elements > self.content.len() as u64
    }
}
