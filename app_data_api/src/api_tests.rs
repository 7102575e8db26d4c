use crate::configure;
use crate::middleware::DummyAuthenticator;
use actix_web::http::StatusCode;
use actix_web::{App, test};
use biz_service::store::MemoryStore;
use serde_json::{Value, json};
use std::sync::Arc;

macro_rules! init_app {
    () => {
        test::init_service(App::new().configure(|cfg| {
            configure(cfg, Arc::new(MemoryStore::new()), Arc::new(DummyAuthenticator::new(vec!["admin".to_string()])))
        }))
        .await
    };
}

fn bearer(id: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", json!({ "id": id, "email": format!("{}@example.com", id) })))
}

fn group_body(slug: &str) -> Value {
    json!({ "name": format!("Group {}", slug), "slug": slug, "description": "A group" })
}

fn header<B>(resp: &actix_web::dev::ServiceResponse<B>, name: &str) -> String {
    resp.headers().get(name).and_then(|v| v.to_str().ok()).unwrap_or_default().to_string()
}

#[actix_web::test]
async fn test_group_lifecycle() {
    let app = init_app!();

    let req = test::TestRequest::post().uri("/api/data/groups").insert_header(bearer("alice")).set_json(group_body("r-project")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["slug"], "r-project");
    assert_eq!(created["created_by"], "alice");
    assert_eq!(created["id"].as_str().map(str::len), Some(26));
    assert!(created["creation_date"].as_str().unwrap().ends_with('Z'));

    let req = test::TestRequest::get().uri("/api/data/groups/r-project").to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched, created);

    let req = test::TestRequest::patch()
        .uri("/api/data/groups/r-project")
        .insert_header(bearer("alice"))
        .set_json(json!({ "description": "Updated" }))
        .to_request();
    let patched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(patched["description"], "Updated");
    assert_eq!(patched["name"], created["name"]);

    for _ in 0..2 {
        let req = test::TestRequest::delete().uri("/api/data/groups/r-project").insert_header(bearer("alice")).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }

    let req = test::TestRequest::get().uri("/api/data/groups/r-project").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], 1404);
}

#[actix_web::test]
async fn test_both_base_paths_serve_the_same_data() {
    let app = init_app!();
    let req = test::TestRequest::post().uri("/ui-server/api/data/groups").insert_header(bearer("alice")).set_json(group_body("shared")).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::get().uri("/api/data/groups/shared").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/ui-server/api/data/version").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[actix_web::test]
async fn test_pagination_headers() {
    let app = init_app!();
    for i in 0..3 {
        let req = test::TestRequest::post().uri("/api/data/groups").insert_header(bearer("alice")).set_json(group_body(&format!("g{}", i))).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get().uri("/api/data/groups?page=2&per_page=2").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(header(&resp, "page"), "2");
    assert_eq!(header(&resp, "per-page"), "2");
    assert_eq!(header(&resp, "total"), "3");
    assert_eq!(header(&resp, "total-pages"), "2");
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));

    let req = test::TestRequest::get().uri("/api/data/groups?page=9&per_page=2").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(header(&resp, "total"), "3");
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!([]));

    let req = test::TestRequest::get().uri("/api/data/groups").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(header(&resp, "per-page"), "20");
    assert_eq!(header(&resp, "total-pages"), "1");

    for query in ["page=0", "per_page=0", "per_page=101", "page=abc"] {
        let req = test::TestRequest::get().uri(&format!("/api/data/groups?{}", query)).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY, "{}", query);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], 1422);
    }
}

#[actix_web::test]
async fn test_slug_conflict_keeps_first_group() {
    let app = init_app!();
    let req = test::TestRequest::post().uri("/api/data/groups").insert_header(bearer("alice")).set_json(group_body("taken")).to_request();
    let first: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/data/groups")
        .insert_header(bearer("bob"))
        .set_json(json!({ "name": "Other", "slug": "taken" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], 1409);

    let req = test::TestRequest::get().uri("/api/data/groups/taken").to_request();
    let current: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(current, first);
}

#[actix_web::test]
async fn test_create_validation_and_auth() {
    let app = init_app!();
    let cases = [
        json!({ "name": "x", "slug": "bad--slug" }),
        json!({ "name": "x", "slug": "repo.git" }),
        json!({ "name": "", "slug": "ok" }),
        json!({ "name": "x", "slug": "ok", "description": "d".repeat(501) }),
        json!({ "name": "x", "slug": "ok", "description": "a\u{0}b" }),
        json!({ "slug": "ok" }),
    ];
    for body in cases {
        let req = test::TestRequest::post().uri("/api/data/groups").insert_header(bearer("alice")).set_json(&body).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY, "{}", body);
    }

    let req = test::TestRequest::post().uri("/api/data/groups").set_json(group_body("anon")).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/data/groups")
        .insert_header(("Authorization", "Bearer {broken"))
        .set_json(group_body("anon"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], 1401);
}

#[actix_web::test]
async fn test_patch_rules() {
    let app = init_app!();
    for slug in ["one", "two"] {
        let req = test::TestRequest::post().uri("/api/data/groups").insert_header(bearer("alice")).set_json(group_body(slug)).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }

    let patch = |who: &str, body: Value| {
        test::TestRequest::patch().uri("/api/data/groups/one").insert_header(bearer(who)).set_json(body).to_request()
    };

    assert_eq!(test::call_service(&app, patch("alice", json!({}))).await.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(test::call_service(&app, patch("alice", json!({ "color": "red" }))).await.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(test::call_service(&app, patch("alice", json!({ "slug": "-bad" }))).await.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(test::call_service(&app, patch("alice", json!({ "slug": "two" }))).await.status(), StatusCode::CONFLICT);
    assert_eq!(test::call_service(&app, patch("mallory", json!({ "name": "Mine" }))).await.status(), StatusCode::FORBIDDEN);
    assert_eq!(test::call_service(&app, patch("admin", json!({ "name": "Admin edit" }))).await.status(), StatusCode::OK);

    let req = test::TestRequest::patch().uri("/api/data/groups/missing").insert_header(bearer("alice")).set_json(json!({ "name": "x" })).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let resp = test::call_service(&app, patch("alice", json!({ "slug": "uno", "description": "" }))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["slug"], "uno");
    assert!(body.get("description").is_none());

    let req = test::TestRequest::delete().uri("/api/data/groups/uno").insert_header(bearer("mallory")).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
    let req = test::TestRequest::delete().uri("/api/data/groups/uno").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_member_bulk_patch_and_remove() {
    let app = init_app!();
    let req = test::TestRequest::post().uri("/api/data/groups").insert_header(bearer("owner")).set_json(group_body("team")).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let members_patch = |body: Value| {
        test::TestRequest::patch().uri("/api/data/groups/team/members").insert_header(bearer("owner")).set_json(body).to_request()
    };
    let req = members_patch(json!([{ "id": "a", "role": "viewer" }, { "id": "c", "role": "viewer" }]));
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = members_patch(json!([{ "id": "a", "role": "editor" }, { "id": "b", "role": "viewer" }]));
    let applied: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(applied, json!([{ "id": "a", "role": "editor" }, { "id": "b", "role": "viewer" }]));

    let req = test::TestRequest::get().uri("/api/data/groups/team/members").to_request();
    let members: Value = test::call_and_read_body_json(&app, req).await;
    let mut roles: Vec<(String, String)> = members
        .as_array()
        .unwrap()
        .iter()
        .map(|m| (m["id"].as_str().unwrap().to_string(), m["role"].as_str().unwrap().to_string()))
        .collect();
    roles.sort();
    assert_eq!(
        roles,
        vec![
            ("a".to_string(), "editor".to_string()),
            ("b".to_string(), "viewer".to_string()),
            ("c".to_string(), "viewer".to_string()),
            ("owner".to_string(), "owner".to_string()),
        ]
    );

    let req = members_patch(json!([{ "id": "a", "role": "superuser" }]));
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let req = members_patch(json!([{ "id": " ", "role": "viewer" }]));
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let req = test::TestRequest::patch()
        .uri("/api/data/groups/team/members")
        .insert_header(bearer("a"))
        .set_json(json!([{ "id": "x", "role": "viewer" }]))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
    let req = test::TestRequest::patch()
        .uri("/api/data/groups/nope/members")
        .insert_header(bearer("owner"))
        .set_json(json!([]))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    for _ in 0..2 {
        let req = test::TestRequest::delete().uri("/api/data/groups/team/members/b").insert_header(bearer("owner")).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);
    }
    let req = test::TestRequest::delete().uri("/api/data/groups/nope/members/b").insert_header(bearer("owner")).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    let req = test::TestRequest::get().uri("/api/data/groups/nope/members").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_namespaces() {
    let app = init_app!();
    let req = test::TestRequest::post().uri("/api/data/groups").insert_header(bearer("jdoe")).set_json(group_body("jdoe-lab")).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::get().uri("/api/data/namespaces").insert_header(bearer("jdoe")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(header(&resp, "total"), "2");
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body[0]["namespace_kind"], "user");
    assert_eq!(body[0]["slug"], "jdoe");
    assert_eq!(body[1]["namespace_kind"], "group");
    assert_eq!(body[1]["slug"], "jdoe-lab");

    let req = test::TestRequest::get().uri("/api/data/namespaces?minimum_role=owner&per_page=1&page=2").insert_header(bearer("jdoe")).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["slug"], "jdoe-lab");

    let req = test::TestRequest::get().uri("/api/data/namespaces?minimum_role=boss").insert_header(bearer("jdoe")).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let req = test::TestRequest::get().uri("/api/data/namespaces").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get().uri("/api/data/namespaces/jdoe").to_request();
    let user_ns: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(user_ns["namespace_kind"], "user");
    assert_eq!(user_ns["created_by"], "jdoe");
    let req = test::TestRequest::get().uri("/api/data/namespaces/jdoe-lab").to_request();
    let group_ns: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(group_ns["namespace_kind"], "group");
    assert_eq!(group_ns["name"], "Group jdoe-lab");
    let req = test::TestRequest::get().uri("/api/data/namespaces/nobody").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_users() {
    let app = init_app!();
    let req = test::TestRequest::get().uri("/api/data/user").insert_header(bearer("ada")).to_request();
    let me: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(me["id"], "ada");
    assert_eq!(me["username"], "ada");
    assert_eq!(me["is_admin"], false);

    let req = test::TestRequest::get().uri("/api/data/users?exact_email=ada@example.com").insert_header(bearer("bob")).to_request();
    let users: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(users.as_array().map(Vec::len), Some(1));

    let req = test::TestRequest::get().uri("/api/data/users/ada").insert_header(bearer("bob")).to_request();
    let user: Value = test::call_and_read_body_json(&app, req).await;
    assert!(user.get("is_admin").is_none());
    let req = test::TestRequest::get().uri("/api/data/users/ghost").insert_header(bearer("bob")).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri("/api/data/user").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    let req = test::TestRequest::get().uri("/api/data/users").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_openapi_document() {
    let app = init_app!();
    let req = test::TestRequest::get().uri("/api/data/spec.json").to_request();
    let doc: Value = test::call_and_read_body_json(&app, req).await;
    assert!(doc["openapi"].as_str().is_some_and(|v| v.starts_with('3')));
    assert!(doc["paths"]["/groups/{slug}/members"].is_object());
}

#[actix_web::test]
async fn test_description_rules_match_on_create_and_patch() {
    let app = init_app!();
    let req = test::TestRequest::post().uri("/api/data/groups").insert_header(bearer("alice")).set_json(group_body("docs")).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    for description in ["a\u{0}b".to_string(), "d".repeat(501)] {
        let req = test::TestRequest::post()
            .uri("/api/data/groups")
            .insert_header(bearer("alice"))
            .set_json(json!({ "name": "x", "slug": "other", "description": description }))
            .to_request();
        let create = test::call_service(&app, req).await.status();
        let req = test::TestRequest::patch()
            .uri("/api/data/groups/docs")
            .insert_header(bearer("alice"))
            .set_json(json!({ "description": description }))
            .to_request();
        let patch = test::call_service(&app, req).await.status();
        assert_eq!(create, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(patch, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
