use crate::{
    categories::CategoryFilter,
    domain::FactRepository,
    errors::RepoError,
    models::{Fact, FactDraft, VoteKind, VoteUpdate},
};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::StatusCode;
use url::Url;

/// `FactRepository` speaking to a hosted facts service over HTTP: GET for the
/// filtered read, POST for insert, PATCH for the vote patch. Stateless; each
/// call is a single request/response with no retry policy.
#[derive(Debug, Clone)]
pub struct HttpFactRepository {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpFactRepository {
    /// `base_url` is the service root, e.g. `http://localhost:3000/`.
    pub fn new(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    fn facts_url(&self) -> Result<Url, RepoError> {
        Ok(self.base_url.join("facts").context("Building facts URL")?)
    }

    fn fact_url(&self, id: i64) -> Result<Url, RepoError> {
        Ok(self
            .base_url
            .join(&format!("facts/{}", id))
            .context("Building fact URL")?)
    }
}

#[async_trait]
impl FactRepository for HttpFactRepository {
    async fn list(&self, filter: &CategoryFilter) -> Result<Vec<Fact>, RepoError> {
        let mut url = self.facts_url()?;
        if let CategoryFilter::Named(name) = filter {
            url.query_pairs_mut().append_pair("category", name);
        }

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .context("GET /facts failed")?
            .error_for_status()
            .context("GET /facts returned an error status")?;
        Ok(resp
            .json::<Vec<Fact>>()
            .await
            .context("Decoding facts list")?)
    }

    async fn insert(&self, draft: &FactDraft) -> Result<Fact, RepoError> {
        let resp = self
            .client
            .post(self.facts_url()?)
            .json(draft)
            .send()
            .await
            .context("POST /facts failed")?
            .error_for_status()
            .context("POST /facts returned an error status")?;
        Ok(resp.json::<Fact>().await.context("Decoding inserted fact")?)
    }

    async fn set_vote(&self, id: i64, kind: VoteKind, count: u64) -> Result<Fact, RepoError> {
        let update = VoteUpdate { field: kind, value: count };
        let resp = self
            .client
            .patch(self.fact_url(id)?)
            .json(&update)
            .send()
            .await
            .context("PATCH /facts/{id} failed")?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Err(RepoError::NotFound(id));
        }
        let resp = resp
            .error_for_status()
            .context("PATCH /facts/{id} returned an error status")?;
        Ok(resp.json::<Fact>().await.context("Decoding updated fact")?)
    }
}
