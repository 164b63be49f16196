use crate::{
    categories::CategoryFilter,
    domain::FactRepository,
    errors::RepoError,
    models::{Fact, FactDraft, VoteKind},
};
use anyhow::Context;
use async_trait::async_trait;
use aws_sdk_dynamodb::{
    Client as DynamoDbClient,
    error::SdkError,
    types::{AttributeValue, ReturnValue},
};
use chrono::{Datelike, Utc};
use std::collections::HashMap;
use tracing::info;

/// Reserved id of the item that holds the `nextId` allocation counter.
/// It carries no `category` attribute, so every scan filter excludes it.
const COUNTER_ID: i64 = 0;

#[derive(Debug, Clone)]
pub struct DynamoDbFactRepository {
    client: DynamoDbClient,
    table_name: String,
}

impl DynamoDbFactRepository {
    /// Creates a new repository instance configured for a specific table.
    pub fn new(client: DynamoDbClient, table_name: String) -> Self {
        info!(%table_name, "Initializing DynamoDbFactRepository");
        Self { client, table_name }
    }

    /// Allocates the next fact id by atomically bumping the counter item.
    async fn next_id(&self) -> Result<i64, RepoError> {
        let resp = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::N(COUNTER_ID.to_string()))
            .update_expression("ADD nextId :one")
            .expression_attribute_values(":one", AttributeValue::N("1".to_string()))
            .return_values(ReturnValue::UpdatedNew)
            .send()
            .await
            .context(format!(
                "DynamoDB (table: {}): Failed to bump the id counter",
                self.table_name
            ))?;

        resp.attributes()
            .and_then(|attrs| attrs.get("nextId"))
            .and_then(|v| v.as_n().ok())
            .and_then(|n| n.parse::<i64>().ok())
            .ok_or_else(|| {
                RepoError::DataCorruption(format!(
                    "Counter item in table '{}' returned no numeric nextId",
                    self.table_name
                ))
            })
    }
}

#[async_trait]
impl FactRepository for DynamoDbFactRepository {
    /// Scans the table, filtering server-side by category. DynamoDB scans are
    /// unordered, so the ascending-by-text ordering is applied here.
    async fn list(&self, filter: &CategoryFilter) -> Result<Vec<Fact>, RepoError> {
        tracing::debug!(table_name = %self.table_name, filter = %filter.label(), "DynamoDB: Scanning for facts");
        let mut facts: Vec<Fact> = Vec::new();
        let mut last_evaluated_key: Option<HashMap<String, AttributeValue>> = None;

        loop {
            let mut request_builder = self
                .client
                .scan()
                .table_name(&self.table_name)
                .expression_attribute_names("#cat", "category");

            request_builder = match filter {
                CategoryFilter::All => request_builder.filter_expression("attribute_exists(#cat)"),
                CategoryFilter::Named(name) => request_builder
                    .filter_expression("#cat = :c")
                    .expression_attribute_values(":c", AttributeValue::S(name.clone())),
            };

            if let Some(lek) = last_evaluated_key {
                request_builder = request_builder.set_exclusive_start_key(Some(lek));
            }

            let resp = request_builder
                .send()
                .await
                .context(format!("DynamoDB: Failed to scan table '{}'", self.table_name))?;

            if let Some(items) = resp.items {
                for item in items {
                    match item_to_fact(&item) {
                        Some(fact) => facts.push(fact),
                        None => {
                            let item_id = item.get("id").and_then(|v| v.as_n().ok());
                            tracing::error!(item.id = ?item_id, table_name = %self.table_name, "DynamoDB: Failed to parse item from scan into Fact");
                            // Fail fast if data in the table is corrupt
                            return Err(RepoError::DataCorruption(format!(
                                "DynamoDB: Failed to parse item {:?} during scan of table '{}'",
                                item_id, self.table_name
                            )));
                        }
                    }
                }
            }

            last_evaluated_key = resp.last_evaluated_key;
            if last_evaluated_key.is_none() {
                break;
            }
            tracing::debug!(table_name = %self.table_name, "DynamoDB Scan: Continuing with LastEvaluatedKey...");
        }

        facts.sort_by(|a, b| a.text.cmp(&b.text));
        tracing::debug!(table_name = %self.table_name, count = facts.len(), "DynamoDB: Listed facts");
        Ok(facts)
    }

    /// Allocates an id, stamps the creation year, and stores the row with
    /// zeroed vote counts using PutItem.
    async fn insert(&self, draft: &FactDraft) -> Result<Fact, RepoError> {
        let fact = Fact {
            id: self.next_id().await?,
            text: draft.text.clone(),
            source: draft.source.clone(),
            category: draft.category.clone(),
            votes_interesting: 0,
            votes_mindblowing: 0,
            votes_false: 0,
            created_in: Utc::now().year(),
        };

        self.client
            .put_item()
            .table_name(&self.table_name)
            .item("id", AttributeValue::N(fact.id.to_string()))
            .item("text", AttributeValue::S(fact.text.clone()))
            .item("source", AttributeValue::S(fact.source.clone()))
            .item("category", AttributeValue::S(fact.category.clone()))
            .item("votesInteresting", AttributeValue::N("0".to_string()))
            .item("votesMindblowing", AttributeValue::N("0".to_string()))
            .item("votesFalse", AttributeValue::N("0".to_string()))
            .item("createdIn", AttributeValue::N(fact.created_in.to_string()))
            .send()
            .await
            .context(format!(
                "DynamoDB (table: {}): Failed to put fact (id: {})",
                self.table_name, fact.id
            ))?;

        info!(fact_id = fact.id, table_name = %self.table_name, "DynamoDB: Fact stored");
        Ok(fact)
    }

    /// Sets one vote field via UpdateItem, conditioned on the row existing so
    /// a vote for a missing id surfaces as NotFound rather than creating a
    /// phantom row.
    async fn set_vote(&self, id: i64, kind: VoteKind, count: u64) -> Result<Fact, RepoError> {
        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::N(id.to_string()))
            .update_expression("SET #field = :count")
            .expression_attribute_names("#field", kind.field_name())
            .expression_attribute_values(":count", AttributeValue::N(count.to_string()))
            .condition_expression("attribute_exists(id)")
            .return_values(ReturnValue::AllNew)
            .send()
            .await;

        let resp = match result {
            Ok(resp) => resp,
            Err(e) => {
                if let SdkError::ServiceError(service_err) = &e {
                    if service_err.err().is_conditional_check_failed_exception() {
                        return Err(RepoError::NotFound(id));
                    }
                }
                return Err(anyhow::Error::new(e)
                    .context(format!(
                        "DynamoDB (table: {}): Failed to set vote on fact (id: {})",
                        self.table_name, id
                    ))
                    .into());
            }
        };

        match resp.attributes().and_then(item_to_fact) {
            Some(fact) => Ok(fact),
            None => {
                tracing::error!(fact_id = id, table_name = %self.table_name, "DynamoDB: Vote update returned an unparseable row");
                Err(RepoError::DataCorruption(format!(
                    "Failed to parse fact data returned from DynamoDB table '{}' for id {}",
                    self.table_name, id
                )))
            }
        }
    }
}

// Helper function to convert a DynamoDB item map to a Fact struct.
fn item_to_fact(item: &HashMap<String, AttributeValue>) -> Option<Fact> {
    fn num<T: std::str::FromStr>(item: &HashMap<String, AttributeValue>, name: &str) -> Option<T> {
        item.get(name)?.as_n().ok()?.parse::<T>().ok()
    }
    fn string(item: &HashMap<String, AttributeValue>, name: &str) -> Option<String> {
        Some(item.get(name)?.as_s().ok()?.to_string())
    }

    Some(Fact {
        id: num(item, "id")?,
        text: string(item, "text")?,
        source: string(item, "source")?,
        category: string(item, "category")?,
        votes_interesting: num(item, "votesInteresting")?,
        votes_mindblowing: num(item, "votesMindblowing")?,
        votes_false: num(item, "votesFalse")?,
        created_in: num(item, "createdIn")?,
    })
}

// --- In-memory backend ---

/// A `facts` table held in process memory. Backs tests and the
/// `FACTS_BACKEND=memory` mode for running the service without AWS; rows do
/// not survive a restart.
#[derive(Debug, Default)]
pub struct InMemoryFactRepository {
    inner: tokio::sync::Mutex<MemoryTable>,
}

#[derive(Debug, Default)]
struct MemoryTable {
    next_id: i64,
    rows: Vec<Fact>,
}

impl InMemoryFactRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the table contents, advancing the id counter past the
    /// largest seeded id.
    pub async fn seed(&self, facts: Vec<Fact>) {
        let mut table = self.inner.lock().await;
        table.next_id = facts.iter().map(|f| f.id).max().unwrap_or(0);
        table.rows = facts;
    }
}

#[async_trait]
impl FactRepository for InMemoryFactRepository {
    async fn list(&self, filter: &CategoryFilter) -> Result<Vec<Fact>, RepoError> {
        let table = self.inner.lock().await;
        let mut facts: Vec<Fact> = table
            .rows
            .iter()
            .filter(|fact| filter.matches(fact))
            .cloned()
            .collect();
        facts.sort_by(|a, b| a.text.cmp(&b.text));
        Ok(facts)
    }

    async fn insert(&self, draft: &FactDraft) -> Result<Fact, RepoError> {
        let mut table = self.inner.lock().await;
        table.next_id += 1;
        let fact = Fact {
            id: table.next_id,
            text: draft.text.clone(),
            source: draft.source.clone(),
            category: draft.category.clone(),
            votes_interesting: 0,
            votes_mindblowing: 0,
            votes_false: 0,
            created_in: Utc::now().year(),
        };
        table.rows.push(fact.clone());
        Ok(fact)
    }

    async fn set_vote(&self, id: i64, kind: VoteKind, count: u64) -> Result<Fact, RepoError> {
        let mut table = self.inner.lock().await;
        let fact = table
            .rows
            .iter_mut()
            .find(|fact| fact.id == id)
            .ok_or(RepoError::NotFound(id))?;
        kind.set_in(fact, count);
        Ok(fact.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(text: &str, category: &str) -> FactDraft {
        FactDraft {
            text: text.to_string(),
            source: format!("https://example.com/{}", text.to_lowercase()),
            category: category.to_string(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids_and_zero_votes() {
        let repo = InMemoryFactRepository::new();
        let first = repo.insert(&draft("Cappuccino", "Coffee")).await.unwrap();
        let second = repo.insert(&draft("Mac&cheese", "Pasta")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.votes_interesting, 0);
        assert_eq!(first.votes_mindblowing, 0);
        assert_eq!(first.votes_false, 0);
        assert_eq!(first.created_in, Utc::now().year());
    }

    #[tokio::test]
    async fn list_orders_ascending_by_text() {
        let repo = InMemoryFactRepository::new();
        repo.insert(&draft("Mac&cheese", "Pasta")).await.unwrap();
        repo.insert(&draft("Cappuccino", "Coffee")).await.unwrap();
        repo.insert(&draft("Espresso", "Coffee")).await.unwrap();

        let texts: Vec<String> = repo
            .list(&CategoryFilter::All)
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.text)
            .collect();
        assert_eq!(texts, vec!["Cappuccino", "Espresso", "Mac&cheese"]);
    }

    #[tokio::test]
    async fn list_filters_by_exact_category() {
        let repo = InMemoryFactRepository::new();
        repo.insert(&draft("Mac&cheese", "Pasta")).await.unwrap();
        repo.insert(&draft("Cappuccino", "Coffee")).await.unwrap();

        let coffee = repo
            .list(&CategoryFilter::Named("Coffee".to_string()))
            .await
            .unwrap();
        assert_eq!(coffee.len(), 1);
        assert_eq!(coffee[0].text, "Cappuccino");

        let wraps = repo
            .list(&CategoryFilter::Named("Wraps".to_string()))
            .await
            .unwrap();
        assert!(wraps.is_empty());
    }

    #[tokio::test]
    async fn set_vote_touches_exactly_one_field() {
        let repo = InMemoryFactRepository::new();
        let fact = repo.insert(&draft("Cappuccino", "Coffee")).await.unwrap();

        let updated = repo
            .set_vote(fact.id, VoteKind::Mindblowing, 1)
            .await
            .unwrap();
        assert_eq!(updated.votes_mindblowing, 1);
        assert_eq!(updated.votes_interesting, 0);
        assert_eq!(updated.votes_false, 0);
    }

    #[tokio::test]
    async fn set_vote_on_unknown_id_is_not_found() {
        let repo = InMemoryFactRepository::new();
        let result = repo.set_vote(999, VoteKind::Interesting, 1).await;
        assert!(matches!(result, Err(RepoError::NotFound(999))));
    }

    #[tokio::test]
    async fn seed_advances_the_id_counter() {
        let repo = InMemoryFactRepository::new();
        let mut fact = repo.insert(&draft("Cappuccino", "Coffee")).await.unwrap();
        fact.id = 41;
        repo.seed(vec![fact]).await;

        let next = repo.insert(&draft("Tacos", "Pizza")).await.unwrap();
        assert_eq!(next.id, 42);
    }
}
