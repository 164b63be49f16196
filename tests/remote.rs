//! Drives the reqwest-backed `FactRepository` against a served instance of
//! the API, in-memory backend underneath.

use cafe_lavender::{
    AppState,
    categories::CategoryFilter,
    domain::FactRepository,
    errors::RepoError,
    models::{FactDraft, VoteKind},
    remote::HttpFactRepository,
    repositories::InMemoryFactRepository,
    routes::create_router,
};
use std::sync::Arc;
use url::Url;

async fn spawn_server() -> Url {
    let repo = Arc::new(InMemoryFactRepository::new());
    let router = create_router(Arc::new(AppState { repo }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Url::parse(&format!("http://{}/", addr)).unwrap()
}

fn draft(text: &str, category: &str) -> FactDraft {
    FactDraft {
        text: text.to_string(),
        source: format!("https://example.com/{}", text.to_lowercase()),
        category: category.to_string(),
    }
}

#[tokio::test]
async fn the_http_client_round_trips_all_three_operations() {
    let base_url = spawn_server().await;
    let client = HttpFactRepository::new(base_url);

    let cappuccino = client.insert(&draft("Cappuccino", "Coffee")).await.unwrap();
    let tacos = client.insert(&draft("Tacos", "Pizza")).await.unwrap();
    assert_eq!(cappuccino.votes_interesting, 0);
    assert_ne!(cappuccino.id, tacos.id);

    let all = client.list(&CategoryFilter::All).await.unwrap();
    let texts: Vec<&str> = all.iter().map(|f| f.text.as_str()).collect();
    assert_eq!(texts, vec!["Cappuccino", "Tacos"]);

    let pizza = client
        .list(&CategoryFilter::Named("Pizza".to_string()))
        .await
        .unwrap();
    assert_eq!(pizza.len(), 1);
    assert_eq!(pizza[0].text, "Tacos");

    let updated = client
        .set_vote(tacos.id, VoteKind::Mindblowing, 1)
        .await
        .unwrap();
    assert_eq!(updated.votes_mindblowing, 1);
    assert_eq!(updated.votes_interesting, 0);
}

#[tokio::test]
async fn rejections_surface_as_errors() {
    let base_url = spawn_server().await;
    let client = HttpFactRepository::new(base_url);

    let result = client.set_vote(999, VoteKind::Interesting, 1).await;
    assert!(matches!(result, Err(RepoError::NotFound(999))));

    let result = client.insert(&draft("Tacos", "Sushi")).await;
    assert!(matches!(result, Err(RepoError::Backend(_))));
}
