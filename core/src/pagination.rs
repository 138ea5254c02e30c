//! Traversal of paginated collection endpoints.
//!
//! # Design
//! The Cloud Controller reports the page count inside the first page's
//! envelope, so pages must be fetched strictly one at a time: page N+1 is
//! only requested once page N's response has been observed. The traversal is
//! expressed as a lazy [`Stream`] built from a caller-supplied single-page
//! fetch function, so dropping the stream (or an early combinator such as
//! `take`) stops issuing further fetches. Filtering and selection are left to
//! the caller, composed on top with the usual stream combinators.

use futures::stream::{self, Stream, StreamExt, TryStreamExt};
use std::future::Future;

use crate::error::ApiError;

/// One page of a collection response: a total page count plus the page's
/// resource entries. Implemented by both the v2 and v3 envelopes.
pub trait PaginatedResponse {
    type Resource;

    fn total_pages(&self) -> u32;

    fn is_empty(&self) -> bool;

    fn into_resources(self) -> Vec<Self::Resource>;
}

/// Stream of page envelopes, fetched sequentially starting at page 1.
///
/// `fetch` maps a 1-based page index to a deferred page response. It is
/// invoked exactly once per page, in increasing order, and never again after
/// a fetch fails. A `total_pages` of 0 ends the traversal after page 1, and
/// so does a page with no entries, whatever page count it reports.
pub fn request_pages<P, F, Fut>(fetch: F) -> impl Stream<Item = Result<P, ApiError>>
where
    P: PaginatedResponse,
    F: Fn(u32) -> Fut,
    Fut: Future<Output = Result<P, ApiError>>,
{
    stream::try_unfold((1u32, None::<u32>), move |(page, total_pages)| {
        // The fetch is started here, on poll, so consumers that stop early
        // never issue the next request.
        let in_range = match total_pages {
            None => true,
            Some(total) => page <= total,
        };
        let pending = in_range.then(|| fetch(page));
        async move {
            match pending {
                None => Ok(None),
                Some(response) => {
                    let response = response.await?;
                    // An empty page caps the traversal at this page even if
                    // the envelope claims more pages exist.
                    let total = if response.is_empty() {
                        page
                    } else {
                        response.total_pages()
                    };
                    tracing::debug!(page, total_pages = total, "fetched page");
                    Ok(Some((response, (page + 1, Some(total)))))
                }
            }
        }
    })
}

/// Stream of resource entries across all pages of a collection endpoint.
///
/// Emitted order is page order crossed with within-page entry order; no
/// entry is reordered, transformed, or dropped. A failed page fetch ends the
/// stream with that error after the entries of the preceding pages.
pub fn request_resources<P, F, Fut>(fetch: F) -> impl Stream<Item = Result<P::Resource, ApiError>>
where
    P: PaginatedResponse,
    F: Fn(u32) -> Fut,
    Fut: Future<Output = Result<P, ApiError>>,
{
    request_pages(fetch)
        .map_ok(|page| stream::iter(page.into_resources()).map(Ok))
        .try_flatten()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct TestPage {
        total_pages: u32,
        resources: Vec<&'static str>,
    }

    impl PaginatedResponse for TestPage {
        type Resource = &'static str;

        fn total_pages(&self) -> u32 {
            self.total_pages
        }

        fn is_empty(&self) -> bool {
            self.resources.is_empty()
        }

        fn into_resources(self) -> Vec<&'static str> {
            self.resources
        }
    }

    #[tokio::test]
    async fn three_pages_in_order() {
        let calls = AtomicU32::new(0);
        let resources: Vec<&str> = request_resources(|page| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                let resources = match page {
                    1 => vec!["a", "b"],
                    2 => vec!["c", "d"],
                    3 => vec!["e"],
                    _ => panic!("unexpected page {page}"),
                };
                Ok(TestPage {
                    total_pages: 3,
                    resources,
                })
            }
        })
        .try_collect()
        .await
        .unwrap();

        assert_eq!(resources, ["a", "b", "c", "d", "e"]);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn single_page_fetches_once() {
        let calls = AtomicU32::new(0);
        let resources: Vec<&str> = request_resources(|_page| {
            calls.fetch_add(1, Ordering::SeqCst);
            async {
                Ok(TestPage {
                    total_pages: 1,
                    resources: vec!["x"],
                })
            }
        })
        .try_collect()
        .await
        .unwrap();

        assert_eq!(resources, ["x"]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn zero_total_pages_is_empty() {
        let calls = AtomicU32::new(0);
        let resources: Vec<&str> = request_resources(|_page| {
            calls.fetch_add(1, Ordering::SeqCst);
            async {
                Ok(TestPage {
                    total_pages: 0,
                    resources: Vec::new(),
                })
            }
        })
        .try_collect()
        .await
        .unwrap();

        assert!(resources.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_first_page_ends_traversal() {
        let calls = AtomicU32::new(0);
        let resources: Vec<&str> = request_resources(|page| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                assert_eq!(page, 1, "an empty page 1 must end the traversal");
                Ok(TestPage {
                    total_pages: 2,
                    resources: Vec::new(),
                })
            }
        })
        .try_collect()
        .await
        .unwrap();

        assert!(resources.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failure_ends_traversal_at_point_reached() {
        let calls = AtomicU32::new(0);
        let mut stream = std::pin::pin!(request_resources(|page| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                match page {
                    1 => Ok(TestPage {
                        total_pages: 3,
                        resources: vec!["a", "b"],
                    }),
                    2 => Err(ApiError::Transport("connection reset".into())),
                    _ => panic!("page 3 must never be fetched"),
                }
            }
        }));

        assert_eq!(stream.try_next().await.unwrap(), Some("a"));
        assert_eq!(stream.try_next().await.unwrap(), Some("b"));
        assert!(matches!(
            stream.try_next().await,
            Err(ApiError::Transport(_))
        ));
        assert!(stream.next().await.is_none(), "stream ends after the error");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn early_drop_stops_fetching() {
        let calls = AtomicU32::new(0);
        let first_two: Vec<&str> = request_resources(|page| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                assert_eq!(page, 1, "only page 1 is needed for two entries");
                Ok(TestPage {
                    total_pages: 3,
                    resources: vec!["a", "b"],
                })
            }
        })
        .take(2)
        .try_collect()
        .await
        .unwrap();

        assert_eq!(first_two, ["a", "b"]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn pages_stream_exposes_envelopes() {
        let pages: Vec<TestPage> = request_pages(|page| async move {
            Ok(TestPage {
                total_pages: 2,
                resources: if page == 1 { vec!["a"] } else { vec!["b"] },
            })
        })
        .try_collect()
        .await
        .unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].resources, ["a"]);
        assert_eq!(pages[1].resources, ["b"]);
    }
}
