/// Overlapping invocations sharing one store
use futures_util::future::join_all;

mod helpers;
use helpers::*;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_get_distinct_ids() {
    let store = MemoryStore::new();
    let body = item_body("same", "body");

    let responses = join_all(
        (0..50).map(|_| handle(&store, Request::new("POST", None, Some(body.as_str())))),
    )
    .await;

    let mut ids: Vec<String> = responses
        .iter()
        .map(|response| {
            assert_eq!(response.status_code, 201);
            response.json_body().unwrap()["id"].as_str().unwrap().to_string()
        })
        .collect();
    ids.sort();
    ids.dedup();

    assert_eq!(ids.len(), 50);
    assert_eq!(store.len().await, 50);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_deletes_of_same_id() {
    let store = MemoryStore::with_items([stored_item("a", "n", "d", None)]);

    let responses = join_all(
        (0..8).map(|_| handle(&store, Request::new("DELETE", Some("a"), None))),
    )
    .await;

    let deleted = responses.iter().filter(|r| r.status_code == 204).count();
    let rejected = responses.iter().filter(|r| r.status_code == 400).count();

    // Racing deletes may all pass the existence check; none may fail otherwise
    assert!(deleted >= 1);
    assert_eq!(deleted + rejected, responses.len());
    assert!(store.is_empty().await);
    assert_eq!(store.deleted_ids().await.len(), deleted);
}
