//! The auto-link regeneration pipeline.
//!
//! Document write: scan the new content against the live corpus, then
//! regenerate the document's auto edges. Document read: scan again and
//! annotate the rendered markup. Matches are never cached as markup — the
//! graph edges are the only durable projection of a scan.
//!
//! The delete-then-recreate regeneration is deliberately not atomic with the
//! corpus read; a concurrent title edit between the two can leave a stale or
//! missing auto edge until the next content write. Best-effort by design.

use std::future::Future;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use wikigraph_core::{
    Document, DocumentStore, Error, LinkEdgeRepository, LinkerConfig, Result,
};
use wikigraph_engine::{annotate_html, annotate_title, find_matches};

/// Maximum attempts for transient database errors.
const MAX_RETRY_ATTEMPTS: u32 = 3;

/// Linear backoff step between attempts.
const RETRY_BACKOFF_MS: u64 = 100;

/// True for connection-class failures worth retrying.
///
/// Correctness-level conflicts (unique-constraint collisions, row-not-found)
/// are never retried; a collision means the edge already exists.
fn is_transient(e: &sqlx::Error) -> bool {
    matches!(
        e,
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed
    )
}

/// Run a database operation, retrying transient connection errors with
/// linear backoff.
pub async fn with_retry<T, F, Fut>(op: &str, mut f: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0u32;
    loop {
        match f().await {
            Ok(value) => return Ok(value),
            Err(Error::Database(e)) if attempt < MAX_RETRY_ATTEMPTS && is_transient(&e) => {
                attempt += 1;
                warn!(
                    subsystem = "db",
                    component = "autolink",
                    op = op,
                    attempt = attempt,
                    error = %e,
                    "Transient database error, retrying"
                );
                tokio::time::sleep(Duration::from_millis(RETRY_BACKOFF_MS * attempt as u64))
                    .await;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Wires the matcher, the document store, and the edge repository together.
pub struct AutoLinker<S, R> {
    store: S,
    edges: R,
    config: LinkerConfig,
}

impl<S, R> AutoLinker<S, R>
where
    S: DocumentStore,
    R: LinkEdgeRepository,
{
    pub fn new(store: S, edges: R, config: LinkerConfig) -> Self {
        Self {
            store,
            edges,
            config,
        }
    }

    /// Document store this linker reads from.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Edge repository this linker writes to.
    pub fn edges(&self) -> &R {
        &self.edges
    }

    /// Regenerate the auto edges for a document after a content write.
    ///
    /// A corpus-read failure fails the call; edge persistence is best effort
    /// and only the count of successfully created edges is reported.
    pub async fn refresh(&self, document: &Document) -> Result<usize> {
        let start = Instant::now();

        let corpus = self.store.list_titles().await?;
        let mut matches =
            find_matches(&document.content, &corpus, Some(document.id), &self.config)?;
        if matches.len() > self.config.max_auto_edges {
            warn!(
                subsystem = "db",
                component = "autolink",
                op = "refresh",
                document_id = %document.id,
                match_count = matches.len(),
                max_auto_edges = self.config.max_auto_edges,
                "Truncating match set to auto-edge cap"
            );
            matches.truncate(self.config.max_auto_edges);
        }

        let created = with_retry("upsert_auto_links", || {
            self.edges.upsert_auto_links(document.id, &matches)
        })
        .await?;

        info!(
            subsystem = "db",
            component = "autolink",
            op = "refresh",
            document_id = %document.id,
            corpus_size = corpus.len(),
            match_count = matches.len(),
            edge_count = created,
            duration_ms = start.elapsed().as_millis() as u64,
            "Regenerated auto links"
        );
        Ok(created)
    }

    /// Annotate a document's rendered HTML for display.
    ///
    /// `rendered_html` is the output of the (external) markdown renderer.
    /// The scan runs over the stored raw content's rendered form directly;
    /// a corpus-read failure fails the render.
    pub async fn render_content(&self, document: &Document, rendered_html: &str) -> Result<String> {
        let corpus = self.store.list_titles().await?;
        let matches = find_matches(rendered_html, &corpus, Some(document.id), &self.config)?;
        Ok(annotate_html(rendered_html, &matches, &self.config))
    }

    /// Annotate a document's title for list rendering.
    ///
    /// Always produces something: any failure, including a corpus read
    /// error, degrades to the unlinked original title.
    pub async fn render_title(&self, document: &Document) -> String {
        let corpus = match self.store.list_titles().await {
            Ok(corpus) => corpus,
            Err(e) => {
                warn!(
                    subsystem = "db",
                    component = "autolink",
                    op = "render_title",
                    document_id = %document.id,
                    error = %e,
                    "Corpus read failed, returning unlinked title"
                );
                return document.title.clone();
            }
        };
        annotate_title(&document.title, &corpus, Some(document.id), &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;
    use uuid::Uuid;

    use wikigraph_core::{
        CreateDocumentRequest, DocumentStatus, KeywordMatch, LinkEdge, RelationType, TitleEntry,
    };

    fn doc(seed: u128, title: &str, slug: &str, content: &str) -> Document {
        Document {
            id: Uuid::from_u128(seed),
            title: title.to_string(),
            slug: slug.to_string(),
            content: content.to_string(),
            status: DocumentStatus::Published,
            created_at_utc: Utc::now(),
            updated_at_utc: Utc::now(),
        }
    }

    struct MemStore {
        titles: Vec<TitleEntry>,
        fail_corpus: bool,
    }

    #[async_trait]
    impl DocumentStore for MemStore {
        async fn list_titles(&self) -> Result<Vec<TitleEntry>> {
            if self.fail_corpus {
                return Err(Error::Corpus("store unavailable".to_string()));
            }
            Ok(self.titles.clone())
        }

        async fn get(&self, id: Uuid) -> Result<Document> {
            Err(Error::DocumentNotFound(id))
        }

        async fn get_by_slug(&self, slug: &str) -> Result<Document> {
            Err(Error::NotFound(slug.to_string()))
        }

        async fn insert(&self, _req: CreateDocumentRequest) -> Result<Uuid> {
            unimplemented!("not used by these tests")
        }

        async fn update_content(&self, _id: Uuid, _content: &str) -> Result<()> {
            unimplemented!("not used by these tests")
        }

        async fn delete(&self, _id: Uuid) -> Result<()> {
            unimplemented!("not used by these tests")
        }
    }

    #[derive(Default)]
    struct MemEdges {
        upserts: Mutex<Vec<(Uuid, Vec<KeywordMatch>)>>,
        transient_failures: AtomicU32,
    }

    #[async_trait]
    impl LinkEdgeRepository for MemEdges {
        async fn upsert_auto_links(
            &self,
            from_document_id: Uuid,
            matches: &[KeywordMatch],
        ) -> Result<usize> {
            if self.transient_failures.load(Ordering::SeqCst) > 0 {
                self.transient_failures.fetch_sub(1, Ordering::SeqCst);
                return Err(Error::Database(sqlx::Error::PoolTimedOut));
            }
            self.upserts
                .lock()
                .unwrap()
                .push((from_document_id, matches.to_vec()));
            Ok(matches.len())
        }

        async fn set_relation(
            &self,
            _from: Uuid,
            _to: Uuid,
            _keyword: &str,
            _relation: RelationType,
        ) -> Result<Uuid> {
            unimplemented!("not used by these tests")
        }

        async fn delete_edge(&self, _edge_id: Uuid) -> Result<()> {
            Ok(())
        }

        async fn delete_auto_from(&self, _document_id: Uuid) -> Result<u64> {
            Ok(0)
        }

        async fn delete_all_for(&self, _document_id: Uuid) -> Result<u64> {
            Ok(0)
        }

        async fn get_outgoing(&self, _document_id: Uuid) -> Result<Vec<LinkEdge>> {
            Ok(Vec::new())
        }

        async fn get_incoming(&self, _document_id: Uuid) -> Result<Vec<LinkEdge>> {
            Ok(Vec::new())
        }

        async fn list_by_relation(
            &self,
            _relation: RelationType,
            _limit: i64,
            _offset: i64,
        ) -> Result<Vec<LinkEdge>> {
            Ok(Vec::new())
        }

        async fn count(&self) -> Result<i64> {
            Ok(0)
        }
    }

    fn linker(titles: Vec<TitleEntry>) -> AutoLinker<MemStore, MemEdges> {
        AutoLinker::new(
            MemStore {
                titles,
                fail_corpus: false,
            },
            MemEdges::default(),
            LinkerConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_refresh_upserts_matches_with_self_exclusion() {
        let linker = linker(vec![
            TitleEntry::new(Uuid::from_u128(1), "Docker", "docker"),
            TitleEntry::new(Uuid::from_u128(2), "Redis", "redis"),
        ]);
        let document = doc(1, "Docker", "docker", "Docker pairs well with Redis");

        let created = linker.refresh(&document).await.unwrap();
        assert_eq!(created, 1);

        let upserts = linker.edges().upserts.lock().unwrap();
        assert_eq!(upserts.len(), 1);
        let (from, matches) = &upserts[0];
        assert_eq!(*from, document.id);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].document_id, Uuid::from_u128(2));
    }

    #[tokio::test]
    async fn test_refresh_propagates_corpus_failure() {
        let linker = AutoLinker::new(
            MemStore {
                titles: vec![],
                fail_corpus: true,
            },
            MemEdges::default(),
            LinkerConfig::default(),
        );
        let document = doc(1, "Docker", "docker", "anything");

        let err = linker.refresh(&document).await.unwrap_err();
        assert!(matches!(err, Error::Corpus(_)));
    }

    #[tokio::test]
    async fn test_refresh_retries_transient_errors() {
        let linker = linker(vec![TitleEntry::new(Uuid::from_u128(2), "Redis", "redis")]);
        linker.edges().transient_failures.store(2, Ordering::SeqCst);

        let document = doc(1, "Docker", "docker", "All about Redis");
        let created = linker.refresh(&document).await.unwrap();
        assert_eq!(created, 1);
        assert_eq!(linker.edges().upserts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_refresh_respects_max_auto_edges() {
        let titles: Vec<TitleEntry> = (0..10)
            .map(|i| {
                TitleEntry::new(
                    Uuid::from_u128(i + 2),
                    format!("Topic{:02}", i),
                    format!("topic{:02}", i),
                )
            })
            .collect();
        let content = (0..10)
            .map(|i| format!("Topic{:02}", i))
            .collect::<Vec<_>>()
            .join(" and ");

        let config = LinkerConfig {
            max_auto_edges: 3,
            ..LinkerConfig::default()
        };
        let linker = AutoLinker::new(
            MemStore {
                titles,
                fail_corpus: false,
            },
            MemEdges::default(),
            config,
        );

        let document = doc(1, "Index", "index", &content);
        let created = linker.refresh(&document).await.unwrap();
        assert_eq!(created, 3);
    }

    #[tokio::test]
    async fn test_render_content_annotates() {
        let linker = linker(vec![TitleEntry::new(Uuid::from_u128(2), "Redis", "redis")]);
        let document = doc(1, "Caching", "caching", "raw content");

        let out = linker
            .render_content(&document, "<p>Redis is a cache</p>")
            .await
            .unwrap();
        assert_eq!(
            out,
            "<p><a href=\"/wiki/redis\" class=\"auto-link\">Redis</a> is a cache</p>"
        );
    }

    #[tokio::test]
    async fn test_render_title_falls_back_on_corpus_failure() {
        let linker = AutoLinker::new(
            MemStore {
                titles: vec![],
                fail_corpus: true,
            },
            MemEdges::default(),
            LinkerConfig::default(),
        );
        let document = doc(1, "Docker Basics", "docker-basics", "text");

        let out = linker.render_title(&document).await;
        assert_eq!(out, "Docker Basics");
    }

    #[tokio::test]
    async fn test_with_retry_gives_up_after_max_attempts() {
        let calls = AtomicU32::new(0);
        let result: Result<()> = with_retry("always_down", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(Error::Database(sqlx::Error::PoolTimedOut)) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), MAX_RETRY_ATTEMPTS + 1);
    }

    #[tokio::test]
    async fn test_with_retry_does_not_retry_correctness_errors() {
        let calls = AtomicU32::new(0);
        let result: Result<()> = with_retry("bad_input", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(Error::InvalidInput("nope".to_string())) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_is_transient_classification() {
        assert!(is_transient(&sqlx::Error::PoolTimedOut));
        assert!(is_transient(&sqlx::Error::PoolClosed));
        assert!(!is_transient(&sqlx::Error::RowNotFound));
    }
}
