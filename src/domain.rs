use crate::categories::CategoryFilter;
use crate::errors::RepoError;
use crate::models::{Fact, FactDraft, VoteKind};
use async_trait::async_trait;

/// Operations the `facts` table exposes to clients: a filtered/ordered read,
/// a row insert, and a single-field vote patch. Implementations are stateless
/// request/response wrappers; each call is one round trip with no retries,
/// no batching, and no caching.
#[async_trait]
pub trait FactRepository: Send + Sync + 'static {
    /// Returns all facts for [`CategoryFilter::All`], otherwise the facts
    /// whose category matches exactly. Ordered ascending by `text`.
    async fn list(&self, filter: &CategoryFilter) -> Result<Vec<Fact>, RepoError>;

    /// Persists a draft. The backend assigns the id, zeroes the vote counts,
    /// and stamps `created_in`; the persisted row is returned.
    async fn insert(&self, draft: &FactDraft) -> Result<Fact, RepoError>;

    /// Sets exactly one vote field to `count` and returns the updated row.
    /// An unknown id is [`RepoError::NotFound`].
    async fn set_vote(&self, id: i64, kind: VoteKind, count: u64) -> Result<Fact, RepoError>;
}
