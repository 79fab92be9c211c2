//! Webhook delivery: lifecycle writes dispatch fire-and-forget POSTs to the
//! collection's configured hook URLs, and delivery failures never surface.

use std::time::Duration;

use quarry_config::QuarryConfig;
use quarry_content::collection::CreateCollection;
use quarry_content::entity::{CreateEntity, DeleteEntity};
use quarry_content::store::InitStore;
use quarry_content::{ContentContext, EntityId, Execute};
use quarry_fields::{Field, FieldType};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup() -> (TempDir, ContentContext, MockServer) {
    let temp = TempDir::new().unwrap();
    let ctx = ContentContext::new(temp.path().join("store"), QuarryConfig::default());
    InitStore::new().execute(&ctx).await.unwrap();
    let server = MockServer::start().await;
    (temp, ctx, server)
}

/// Delivery is spawned in the background; poll until the mock has seen the
/// expected number of requests.
async fn wait_for_requests(server: &MockServer, expected: usize) {
    for _ in 0..100 {
        let received = server.received_requests().await.unwrap_or_default();
        if received.len() >= expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("expected {expected} webhook request(s) before timeout");
}

#[tokio::test]
async fn entity_create_fires_collection_create_hook() {
    let (_temp, ctx, server) = setup().await;

    Mock::given(method("POST"))
        .and(path("/hooks/posts"))
        .and(body_partial_json(json!({
            "type": "entity",
            "action": "create",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    CreateCollection::new("Posts", "posts")
        .with_fields(vec![Field::new("title", FieldType::Plain, "Title")])
        .with_create_hook(format!("{}/hooks/posts", server.uri()))
        .execute(&ctx)
        .await
        .unwrap();

    // collection creation itself also posts to the create hook
    wait_for_requests(&server, 1).await;

    let created = CreateEntity::new("posts")
        .with_value("en", "title", json!("Hello"))
        .execute(&ctx)
        .await
        .unwrap();

    wait_for_requests(&server, 2).await;

    let received = server.received_requests().await.unwrap();
    let entity_hook: serde_json::Value = received.last().unwrap().body_json().unwrap();
    assert_eq!(entity_hook["type"], "entity");
    assert_eq!(entity_hook["action"], "create");
    assert_eq!(entity_hook["data"]["id"], created["id"]);
}

#[tokio::test]
async fn delete_hook_carries_the_removed_entity() {
    let (_temp, ctx, server) = setup().await;

    Mock::given(method("POST"))
        .and(path("/hooks/delete"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    CreateCollection::new("Posts", "posts")
        .with_fields(vec![Field::new("title", FieldType::Plain, "Title")])
        .with_delete_hook(format!("{}/hooks/delete", server.uri()))
        .execute(&ctx)
        .await
        .unwrap();

    let created = CreateEntity::new("posts")
        .with_value("en", "title", json!("Doomed"))
        .execute(&ctx)
        .await
        .unwrap();
    let id = EntityId::parse(created["id"].as_str().unwrap()).unwrap();

    DeleteEntity::new("posts", id).execute(&ctx).await.unwrap();

    wait_for_requests(&server, 1).await;
    let received = server.received_requests().await.unwrap();
    let hook: serde_json::Value = received[0].body_json().unwrap();
    assert_eq!(hook["type"], "entity");
    assert_eq!(hook["action"], "delete");
    assert_eq!(hook["data"]["data"]["en"]["title"], "Doomed");
}

#[tokio::test]
async fn failed_delivery_does_not_block_the_write() {
    let (_temp, ctx, server) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    CreateCollection::new("Posts", "posts")
        .with_fields(vec![Field::new("title", FieldType::Plain, "Title")])
        .with_create_hook(format!("{}/broken", server.uri()))
        .execute(&ctx)
        .await
        .unwrap();

    // the write succeeds even though every delivery 500s
    let created = CreateEntity::new("posts")
        .with_value("en", "title", json!("Still here"))
        .execute(&ctx)
        .await
        .unwrap();

    let id = EntityId::parse(created["id"].as_str().unwrap()).unwrap();
    assert!(ctx.read_entity(&id).await.is_ok());
}

#[tokio::test]
async fn no_hook_url_means_no_request() {
    let (_temp, ctx, server) = setup().await;

    CreateCollection::new("Posts", "posts")
        .with_fields(vec![Field::new("title", FieldType::Plain, "Title")])
        .execute(&ctx)
        .await
        .unwrap();

    CreateEntity::new("posts")
        .with_value("en", "title", json!("Quiet"))
        .execute(&ctx)
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(server.received_requests().await.unwrap().is_empty());
}
