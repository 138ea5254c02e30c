//! Response envelopes shared across resource types.
//!
//! # Design
//! v2 collection endpoints wrap entries in a `metadata`/`entity` pair and
//! report pagination at the top level of the envelope; v3 endpoints return
//! flat resources with a nested `pagination` block. Both envelopes implement
//! [`PaginatedResponse`] so the traversal in [`crate::pagination`] works over
//! either surface. An absent `total_pages` deserializes to 0 and ends a
//! traversal after the first page.

use serde::{Deserialize, Serialize};

use crate::pagination::PaginatedResponse;

/// A v2 resource entry: opaque metadata plus the typed entity payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource<E> {
    pub metadata: Metadata,
    pub entity: E,
}

impl<E> Resource<E> {
    /// The resource's opaque id.
    pub fn id(&self) -> &str {
        &self.metadata.id
    }

    pub fn entity(&self) -> &E {
        &self.entity
    }

    pub fn into_entity(self) -> E {
        self.entity
    }
}

/// The metadata section of a v2 resource entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(rename = "guid")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// One page of a v2 collection response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<R> {
    pub total_results: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_url: Option<String>,
    pub resources: Vec<R>,
}

impl<R> PaginatedResponse for Page<R> {
    type Resource = R;

    fn total_pages(&self) -> u32 {
        self.total_pages
    }

    fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    fn into_resources(self) -> Vec<R> {
        self.resources
    }
}

/// One page of a v3 collection response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedResources<R> {
    pub pagination: Pagination,
    pub resources: Vec<R>,
}

/// The `pagination` block of a v3 collection response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
    pub total_results: u32,
    #[serde(default)]
    pub total_pages: u32,
}

impl<R> PaginatedResponse for PagedResources<R> {
    type Resource = R;

    fn total_pages(&self) -> u32 {
        self.pagination.total_pages
    }

    fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    fn into_resources(self) -> Vec<R> {
        self.resources
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Named {
        name: String,
    }

    #[test]
    fn v2_page_deserializes_metadata_and_entity() {
        let json = r#"{
            "total_results": 1,
            "total_pages": 1,
            "prev_url": null,
            "next_url": null,
            "resources": [
                {
                    "metadata": {"guid": "space-id", "url": "/v2/spaces/space-id"},
                    "entity": {"name": "dev"}
                }
            ]
        }"#;
        let page: Page<Resource<Named>> = serde_json::from_str(json).unwrap();
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.resources[0].id(), "space-id");
        assert_eq!(page.resources[0].entity().name, "dev");
    }

    #[test]
    fn absent_total_pages_reads_as_zero() {
        let json = r#"{"total_results": 0, "resources": []}"#;
        let page: Page<Resource<Named>> = serde_json::from_str(json).unwrap();
        assert_eq!(page.total_pages(), 0);
    }

    #[test]
    fn v3_envelope_reads_nested_pagination() {
        let json = r#"{
            "pagination": {"total_results": 3, "total_pages": 2},
            "resources": [{"name": "web"}]
        }"#;
        let page: PagedResources<Named> = serde_json::from_str(json).unwrap();
        assert_eq!(page.total_pages(), 2);
        assert_eq!(page.into_resources(), [Named { name: "web".into() }]);
    }
}
