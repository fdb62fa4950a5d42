//! Contract tests: each wrapper must hit the expected path with the
//! expected method and parameters.

use httpmock::prelude::*;
use serde_json::json;

use reef_client::{FilePart, ListQuery, NewFolder, NewTenant, NewUser, ReefClient, SearchScope, UserUpdate};

fn client_for(server: &MockServer) -> ReefClient {
    ReefClient::builder()
        .base_url(server.base_url())
        .build()
        .unwrap()
}

fn page_json(items: serde_json::Value) -> serde_json::Value {
    json!({ "items": items, "total": 1, "offset": 0, "limit": 25 })
}

#[tokio::test]
async fn users_get_by_username_encodes_the_segment() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path_contains("/api/users/by-username/jane");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "id": "u7", "username": "jane doe" }));
        })
        .await;

    let client = client_for(&server);
    let user = client.users().get_by_username("jane doe").await.unwrap();

    mock.assert_async().await;
    assert_eq!(user.id, "u7");
}

#[tokio::test]
async fn users_create_posts_a_form() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/users")
                .body_contains("username=jane")
                .body_contains("password=pw")
                .body_contains("email=jane%40example.com");
            then.status(201)
                .header("content-type", "application/json")
                .json_body(json!({ "id": "u7", "username": "jane" }));
        })
        .await;

    let client = client_for(&server);
    client
        .users()
        .create(NewUser {
            username: "jane".into(),
            password: "pw".into(),
            display_name: None,
            email: Some("jane@example.com".into()),
        })
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn users_update_skips_unset_fields() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/api/users/u7")
                .body("displayName=Jane+Doe");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "id": "u7", "username": "jane" }));
        })
        .await;

    let client = client_for(&server);
    client
        .users()
        .update(
            "u7",
            UserUpdate {
                display_name: Some("Jane Doe".into()),
                email: None,
            },
        )
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn users_set_enabled_puts_the_flag() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/api/users/u7/enabled")
                .body("enabled=false");
            then.status(204);
        })
        .await;

    let client = client_for(&server);
    client.users().set_enabled("u7", false).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn users_avatar_upload_is_multipart() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/users/u7/avatar")
                .body_contains("name=\"avatar\"; filename=\"me.png\"")
                .body_contains("image/png");
            then.status(204);
        })
        .await;

    let client = client_for(&server);
    client
        .users()
        .upload_avatar("u7", FilePart::new("me.png", vec![0x89, 0x50, 0x4e, 0x47]))
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn group_membership_round_trip() {
    let server = MockServer::start_async().await;
    let add = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/groups/g1/members")
                .body("user=u7");
            then.status(204);
        })
        .await;
    let members = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/groups/g1/members");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(page_json(json!([{ "id": "u7", "username": "jane" }])));
        })
        .await;
    let remove = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/groups/g1/members/u7");
            then.status(204);
        })
        .await;

    let client = client_for(&server);
    let groups = client.groups();
    groups.add_member("g1", "u7").await.unwrap();
    let page = groups.members("g1", ListQuery::default()).await.unwrap();
    assert_eq!(page.items.len(), 1);
    groups.remove_member("g1", "u7").await.unwrap();

    add.assert_async().await;
    members.assert_async().await;
    remove.assert_async().await;
}

#[tokio::test]
async fn folders_move_puts_the_new_parent() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/api/folders/f2/parent")
                .body("parent=f9");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "id": "f2", "name": "plans", "parent_id": "f9" }));
        })
        .await;

    let client = client_for(&server);
    let folder = client.folders().move_to("f2", "f9").await.unwrap();

    mock.assert_async().await;
    assert_eq!(folder.parent_id.as_deref(), Some("f9"));
}

#[tokio::test]
async fn folders_create_and_list_children() {
    let server = MockServer::start_async().await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/folders")
                .body_contains("name=plans")
                .body_contains("parent=f1");
            then.status(201)
                .header("content-type", "application/json")
                .json_body(json!({ "id": "f2", "name": "plans", "parent_id": "f1" }));
        })
        .await;
    let children = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/folders/f1/children")
                .query_param("limit", "10");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(page_json(json!([{ "id": "f2", "name": "plans" }])));
        })
        .await;

    let client = client_for(&server);
    client
        .folders()
        .create(NewFolder {
            name: "plans".into(),
            parent_id: "f1".into(),
        })
        .await
        .unwrap();
    let page = client
        .folders()
        .list_children(
            "f1",
            ListQuery {
                limit: Some(10),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    create.assert_async().await;
    children.assert_async().await;
    assert_eq!(page.items[0].name, "plans");
}

#[tokio::test]
async fn content_download_returns_the_raw_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/content/c1/download");
            then.status(200)
                .header("content-type", "application/pdf")
                .body(vec![0x25, 0x50, 0x44, 0x46]);
        })
        .await;

    let client = client_for(&server);
    let bytes = client.content().download("c1").await.unwrap();
    assert_eq!(bytes.as_ref(), &[0x25, 0x50, 0x44, 0x46]);
}

#[tokio::test]
async fn content_update_body_uploads_a_new_version() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/content/c1/body")
                .body_contains("name=\"file\"; filename=\"v2.txt\"");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "id": "c1", "name": "v2.txt", "version": 2 }));
        })
        .await;

    let client = client_for(&server);
    let item = client
        .content()
        .update_body("c1", FilePart::new("v2.txt", "second draft"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(item.version, Some(2));
}

#[tokio::test]
async fn tenants_set_quota_puts_the_value() {
    let server = MockServer::start_async().await;
    let set = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/api/admin/tenants/t1/quota")
                .body("quota=1073741824");
            then.status(204);
        })
        .await;
    let clear = server
        .mock_async(|when, then| {
            when.method(PUT).path("/api/admin/tenants/t2/quota").body("");
            then.status(204);
        })
        .await;

    let client = client_for(&server);
    client
        .tenants()
        .set_quota("t1", Some(1_073_741_824))
        .await
        .unwrap();
    client.tenants().set_quota("t2", None).await.unwrap();

    set.assert_async().await;
    clear.assert_async().await;
}

#[tokio::test]
async fn tenants_create_under_the_admin_prefix() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/admin/tenants")
                .body_contains("name=acme")
                .body_contains("domain=acme.example.com");
            then.status(201)
                .header("content-type", "application/json")
                .json_body(json!({ "id": "t3", "name": "acme", "enabled": true }));
        })
        .await;

    let client = client_for(&server);
    let tenant = client
        .tenants()
        .create(NewTenant {
            name: "acme".into(),
            domain: Some("acme.example.com".into()),
        })
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(tenant.enabled);
}

#[tokio::test]
async fn search_all_joins_scopes_with_commas() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/search")
                .query_param("q", "quarterly report")
                .query_param("types", "content,folders");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(page_json(json!([
                    { "kind": "content", "id": "c1", "title": "Quarterly report" }
                ])));
        })
        .await;

    let client = client_for(&server);
    let page = client
        .search()
        .all(
            "quarterly report",
            &[SearchScope::Content, SearchScope::Folders],
            ListQuery::default(),
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(page.items[0].kind, "content");
}

#[tokio::test]
async fn search_ignores_the_list_query_filter() {
    let server = MockServer::start_async().await;
    // Registered first: would swallow the request if a second `q` pair
    // leaked out of ListQuery.
    let decoy = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/search/users")
                .query_param("q", "ignored");
            then.status(500);
        })
        .await;
    let real = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/search/users")
                .query_param("q", "jane")
                .query_param("limit", "5");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(page_json(json!([{ "id": "u7", "username": "jane" }])));
        })
        .await;

    let client = client_for(&server);
    client
        .search()
        .users(
            "jane",
            ListQuery {
                q: Some("ignored".into()),
                offset: None,
                limit: Some(5),
            },
        )
        .await
        .unwrap();

    assert_eq!(decoy.hits_async().await, 0);
    real.assert_async().await;
}

#[tokio::test]
async fn search_content_carries_paging() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/search/content")
                .query_param("q", "report")
                .query_param("offset", "50")
                .query_param("limit", "25");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(page_json(json!([{ "id": "c1", "name": "report.pdf" }])));
        })
        .await;

    let client = client_for(&server);
    client
        .search()
        .content(
            "report",
            ListQuery {
                q: None,
                offset: Some(50),
                limit: Some(25),
            },
        )
        .await
        .unwrap();

    mock.assert_async().await;
}
