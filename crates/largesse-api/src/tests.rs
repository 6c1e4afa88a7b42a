//! HTTP-level tests: the full router over an in-memory store.

use super::*;

use axum::{
  body::Body,
  http::{Request, StatusCode, header},
};
use largesse_store_sqlite::SqliteStore;
use tower::ServiceExt as _;

async fn make_store() -> Arc<SqliteStore> {
  Arc::new(SqliteStore::open_in_memory().await.unwrap())
}

/// Fire one request at a fresh router over `store` and parse the JSON
/// reply. Every route in this API answers with a JSON body.
async fn send(
  store: &Arc<SqliteStore>,
  method: &str,
  uri: &str,
  body: Option<Value>,
) -> (StatusCode, Value) {
  let builder = Request::builder().method(method).uri(uri);
  let req = match body {
    Some(v) => builder
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(v.to_string()))
      .unwrap(),
    None => builder.body(Body::empty()).unwrap(),
  };

  let resp = api_router(store.clone()).oneshot(req).await.unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap();
  let parsed: Value = serde_json::from_slice(&bytes).unwrap();
  (status, parsed)
}

async fn seed_person(store: &Arc<SqliteStore>, f: &str, l: &str, rel: &str) {
  let (status, _) = send(
    store,
    "POST",
    "/v1/people",
    Some(json!({
      "f_name": f,
      "l_name": l,
      "relationship": rel,
      "phone": "555-0100",
      "email": "someone@example.com",
    })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
}

async fn seed_occasion(
  store: &Arc<SqliteStore>,
  person_id: i64,
  name: &str,
  date: &str,
) -> i64 {
  let (status, body) = send(
    store,
    "POST",
    "/v1/occasions",
    Some(json!({
      "person_id": person_id,
      "occasion_name": name,
      "occasion_date": date,
    })),
  )
  .await;
  assert_eq!(status, StatusCode::OK, "occasion seed failed: {body}");
  body["data"]["occasion_id"].as_i64().unwrap()
}

async fn seed_gift(
  store: &Arc<SqliteStore>,
  occasion_id: i64,
  name: &str,
) -> i64 {
  let (status, body) = send(
    store,
    "POST",
    "/v1/gifts",
    Some(json!({
      "occasion_id": occasion_id,
      "gift_name": name,
      "gift_description": "a small something",
      "approx_gift_price": 25.0,
      "status": "idea",
    })),
  )
  .await;
  assert_eq!(status, StatusCode::OK, "gift seed failed: {body}");
  body["data"]["gift_id"].as_i64().unwrap()
}

// ── Info ──────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn root_points_at_v1() {
  let store = make_store().await;
  let (status, body) = send(&store, "GET", "/", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["info"], "Try /v1/");
}

#[tokio::test]
async fn v1_serves_a_banner() {
  let store = make_store().await;
  let (status, body) = send(&store, "GET", "/v1/", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["info"], "largesse gift tracker API");
}

// ── People ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_people_list_is_a_success_envelope() {
  let store = make_store().await;
  let (status, body) = send(&store, "GET", "/v1/people", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["status"], "success");
  assert_eq!(body["data"], json!([]));
  assert_eq!(body["message"], Value::Null);
}

#[tokio::test]
async fn create_person_returns_201_and_the_record() {
  let store = make_store().await;
  let (status, body) = send(
    &store,
    "POST",
    "/v1/people",
    Some(json!({
      "f_name": "Maria",
      "l_name": "Keen",
      "relationship": "friend",
      "phone": "555-0101",
      "email": "maria@example.com",
    })),
  )
  .await;

  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(body["status"], "success");
  assert_eq!(body["message"], "Person added successfully");
  assert_eq!(body["data"]["person_id"], 1);
  assert_eq!(body["data"]["f_name"], "Maria");
  assert_eq!(body["data"]["email"], "maria@example.com");
}

#[tokio::test]
async fn create_person_lists_every_missing_field() {
  let store = make_store().await;
  let (status, body) =
    send(&store, "POST", "/v1/people", Some(json!({ "f_name": "A" }))).await;

  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["status"], "error");
  assert_eq!(
    body["message"],
    "Missing required field(s): l_name, relationship, phone, email"
  );

  // Nothing was inserted.
  let (_, body) = send(&store, "GET", "/v1/people", None).await;
  assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn create_person_treats_blank_fields_as_missing() {
  let store = make_store().await;
  let (status, body) = send(
    &store,
    "POST",
    "/v1/people",
    Some(json!({
      "f_name": "Maria",
      "l_name": "Keen",
      "relationship": "friend",
      "phone": "   ",
      "email": "maria@example.com",
    })),
  )
  .await;

  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["message"], "Missing required field(s): phone");
}

#[tokio::test]
async fn people_list_hides_the_eliminated() {
  let store = make_store().await;
  seed_person(&store, "Maria", "Keen", "friend").await;
  seed_person(&store, "Otto", "Marden", "cousin").await;

  let (status, _) = send(
    &store,
    "PUT",
    "/v1/people/eliminate-by-info",
    Some(json!({
      "f_name": "Otto",
      "l_name": "Marden",
      "relationship": "cousin",
    })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);

  let (_, body) = send(&store, "GET", "/v1/people", None).await;
  let people = body["data"].as_array().unwrap();
  assert_eq!(people.len(), 1);
  assert_eq!(people[0]["f_name"], "Maria");
}

#[tokio::test]
async fn search_requires_a_name() {
  let store = make_store().await;

  let (status, body) = send(&store, "GET", "/v1/people/search", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["message"], "Missing or empty 'name' query parameter");

  let (status, _) =
    send(&store, "GET", "/v1/people/search?name=%20", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_matches_prefixes_of_either_name() {
  let store = make_store().await;
  seed_person(&store, "Maria", "Keen", "friend").await;
  seed_person(&store, "Otto", "Marden", "cousin").await;
  seed_person(&store, "Peng", "Zhao", "colleague").await;

  let (status, body) =
    send(&store, "GET", "/v1/people/search?name=mar", None).await;
  assert_eq!(status, StatusCode::OK);
  let hits = body["data"].as_array().unwrap();
  assert_eq!(hits.len(), 2);
  assert_eq!(hits[0]["f_name"], "Maria");
  assert_eq!(hits[1]["f_name"], "Otto");
}

#[tokio::test]
async fn search_with_no_hits_is_a_404() {
  let store = make_store().await;
  seed_person(&store, "Maria", "Keen", "friend").await;

  let (status, body) =
    send(&store, "GET", "/v1/people/search?name=zz", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["message"], "No matching non-eliminated people found");
}

#[tokio::test]
async fn get_person_by_id() {
  let store = make_store().await;
  seed_person(&store, "Maria", "Keen", "friend").await;

  let (status, body) = send(&store, "GET", "/v1/people/1", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["data"]["f_name"], "Maria");
  assert_eq!(body["data"]["phone"], "555-0100");

  let (status, body) = send(&store, "GET", "/v1/people/77", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["message"], "Person not found");

  // A non-numeric id is indistinguishable from an absent row.
  let (status, _) = send(&store, "GET", "/v1/people/nope", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn relationship_route_matches_exactly() {
  let store = make_store().await;
  seed_person(&store, "Maria", "Keen", "friend").await;
  seed_person(&store, "Otto", "Marden", "best friend").await;

  let (status, body) =
    send(&store, "GET", "/v1/people/relationship/friend", None).await;
  assert_eq!(status, StatusCode::OK);
  let people = body["data"].as_array().unwrap();
  assert_eq!(people.len(), 1);
  assert_eq!(people[0]["f_name"], "Maria");

  let (_, body) =
    send(&store, "GET", "/v1/people/relationship/best%20friend", None).await;
  assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn update_rewrites_only_contact_fields() {
  let store = make_store().await;
  seed_person(&store, "Maria", "Keen", "friend").await;

  let (status, body) = send(
    &store,
    "PUT",
    "/v1/people/update",
    Some(json!({
      "f_name": "Maria",
      "l_name": "Keen",
      "relationship": "colleague",
      "phone": "555-0199",
      "email": "maria@work.example.com",
    })),
  )
  .await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["message"], "Person Maria Keen updated successfully");
  assert_eq!(body["data"]["person_id"], 1);
  assert_eq!(body["data"]["updated"]["relationship"], "colleague");

  let (_, body) = send(&store, "GET", "/v1/people/1", None).await;
  assert_eq!(body["data"]["f_name"], "Maria");
  assert_eq!(body["data"]["relationship"], "colleague");
  assert_eq!(body["data"]["phone"], "555-0199");
}

#[tokio::test]
async fn update_of_an_unknown_person_is_a_404() {
  let store = make_store().await;

  let (status, body) = send(
    &store,
    "PUT",
    "/v1/people/update",
    Some(json!({
      "f_name": "Nobody",
      "l_name": "Here",
      "relationship": "friend",
      "phone": "555-0100",
      "email": "x@example.com",
    })),
  )
  .await;

  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["message"], "No matching active person found");
}

#[tokio::test]
async fn ambiguous_update_lists_the_candidates() {
  let store = make_store().await;
  seed_person(&store, "Maria", "Keen", "friend").await;
  seed_person(&store, "Maria", "Keen", "cousin").await;

  let (status, body) = send(
    &store,
    "PUT",
    "/v1/people/update",
    Some(json!({
      "f_name": "maria",
      "l_name": "keen",
      "relationship": "neighbor",
      "phone": "555-0123",
      "email": "maria@example.com",
    })),
  )
  .await;

  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(
    body["message"],
    "Multiple people matched; please be more specific"
  );
  let matches = body["error"]["matches"].as_array().unwrap();
  assert_eq!(matches.len(), 2);
  assert_eq!(matches[0]["person_id"], 1);
  assert_eq!(matches[1]["person_id"], 2);

  // Nothing was written.
  let (_, body) = send(&store, "GET", "/v1/people/1", None).await;
  assert_eq!(body["data"]["relationship"], "friend");
}

#[tokio::test]
async fn update_by_info_disambiguates_on_relationship() {
  let store = make_store().await;
  seed_person(&store, "Maria", "Keen", "friend").await;
  seed_person(&store, "Maria", "Keen", "cousin").await;

  let (status, body) = send(
    &store,
    "PUT",
    "/v1/people/update-by-info",
    Some(json!({
      "f_name": "Maria",
      "l_name": "Keen",
      "relationship": "cousin",
      "phone": "555-0177",
      "email": "cousin@example.com",
    })),
  )
  .await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(
    body["message"],
    "Person Maria Keen (cousin) updated successfully"
  );
  assert_eq!(body["data"]["person_id"], 2);

  let (_, body) = send(&store, "GET", "/v1/people/2", None).await;
  assert_eq!(body["data"]["phone"], "555-0177");
}

#[tokio::test]
async fn eliminate_is_not_repeatable() {
  let store = make_store().await;
  seed_person(&store, "Maria", "Keen", "friend").await;

  let body = json!({
    "f_name": "Maria",
    "l_name": "Keen",
    "relationship": "friend",
  });

  let (status, reply) = send(
    &store,
    "PUT",
    "/v1/people/eliminate-by-info",
    Some(body.clone()),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(
    reply["message"],
    "Person Maria Keen (friend) marked as eliminated"
  );
  assert_eq!(reply["data"]["person_id"], 1);

  // The second attempt no longer finds an active match.
  let (status, reply) =
    send(&store, "PUT", "/v1/people/eliminate-by-info", Some(body)).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(reply["message"], "No matching active person found");

  // The row itself survives and stays addressable by id.
  let (status, reply) = send(&store, "GET", "/v1/people/1", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(reply["data"]["f_name"], "Maria");
}

// ── Gifts ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn gift_create_accepts_a_dangling_occasion() {
  let store = make_store().await;

  let (status, body) = send(
    &store,
    "POST",
    "/v1/gifts",
    Some(json!({
      "occasion_id": 42,
      "gift_name": "Wool socks",
      "status": "idea",
    })),
  )
  .await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["message"], "Gift added!");
  assert_eq!(body["data"]["gift_id"], 1);
}

#[tokio::test]
async fn gift_list_is_newest_first() {
  let store = make_store().await;
  seed_gift(&store, 42, "Wool socks").await;
  seed_gift(&store, 42, "Sketchbook").await;

  let (status, body) = send(&store, "GET", "/v1/gifts", None).await;
  assert_eq!(status, StatusCode::OK);
  let gifts = body["data"].as_array().unwrap();
  assert_eq!(gifts.len(), 2);
  assert_eq!(gifts[0]["gift_name"], "Sketchbook");
  assert_eq!(gifts[1]["gift_name"], "Wool socks");
}

#[tokio::test]
async fn gift_create_lists_every_missing_field() {
  let store = make_store().await;
  let (status, body) = send(&store, "POST", "/v1/gifts", Some(json!({}))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(
    body["message"],
    "Missing required field(s): occasion_id, gift_name, status"
  );
}

#[tokio::test]
async fn gift_detail_joins_occasion_and_recipient() {
  let store = make_store().await;
  seed_person(&store, "Maria", "Keen", "friend").await;
  let occasion_id = seed_occasion(&store, 1, "Birthday", "2026-03-15").await;
  let gift_id = seed_gift(&store, occasion_id, "Wool socks").await;

  let (status, body) =
    send(&store, "GET", &format!("/v1/gifts/{gift_id}"), None).await;
  assert_eq!(status, StatusCode::OK);

  let detail = &body["data"];
  assert_eq!(detail["gift_name"], "Wool socks");
  assert_eq!(detail["approx_gift_price"], 25.0);
  assert_eq!(detail["occasion"]["name"], "Birthday");
  assert_eq!(detail["occasion"]["date"], "2026-03-15");
  assert_eq!(detail["recipient"]["first_name"], "Maria");
  assert_eq!(detail["recipient"]["last_name"], "Keen");
  assert_eq!(detail["feedback"], Value::Null);
}

#[tokio::test]
async fn gift_detail_rejects_a_non_numeric_id() {
  let store = make_store().await;
  let (status, body) = send(&store, "GET", "/v1/gifts/socks", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["message"], "Invalid gift ID");
}

#[tokio::test]
async fn gift_detail_with_a_dangling_occasion_is_a_404() {
  let store = make_store().await;
  let gift_id = seed_gift(&store, 999, "Wool socks").await;

  let (status, body) =
    send(&store, "GET", &format!("/v1/gifts/{gift_id}"), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["message"], "Gift not found");
}

#[tokio::test]
async fn gift_update_overwrites_the_whole_row() {
  let store = make_store().await;
  seed_person(&store, "Maria", "Keen", "friend").await;
  let occasion_id = seed_occasion(&store, 1, "Birthday", "2026-03-15").await;
  let gift_id = seed_gift(&store, occasion_id, "Wool socks").await;

  let (status, body) = send(
    &store,
    "PUT",
    &format!("/v1/gifts/{gift_id}"),
    Some(json!({
      "gift_name": "Silk socks",
      "status": "purchased",
      "feedback": "loved them",
    })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["message"], "Gift updated successfully!");

  let (_, body) =
    send(&store, "GET", &format!("/v1/gifts/{gift_id}"), None).await;
  let detail = &body["data"];
  assert_eq!(detail["gift_name"], "Silk socks");
  assert_eq!(detail["status"], "purchased");
  assert_eq!(detail["feedback"], "loved them");
  // Fields omitted from the body were nulled out.
  assert_eq!(detail["gift_description"], Value::Null);
  assert_eq!(detail["approx_gift_price"], Value::Null);
}

#[tokio::test]
async fn gift_update_of_a_missing_gift_is_a_404() {
  let store = make_store().await;

  let (status, body) = send(
    &store,
    "PUT",
    "/v1/gifts/99",
    Some(json!({ "gift_name": "Socks", "status": "idea" })),
  )
  .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["message"], "Gift not found");
}

#[tokio::test]
async fn gift_update_requires_name_and_status() {
  let store = make_store().await;
  seed_gift(&store, 42, "Wool socks").await;

  let (status, body) =
    send(&store, "PUT", "/v1/gifts/1", Some(json!({}))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["message"], "Missing required field(s): gift_name, status");
}

// ── Occasions ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn occasion_create_echoes_the_stored_row() {
  let store = make_store().await;
  seed_person(&store, "Maria", "Keen", "friend").await;

  let (status, body) = send(
    &store,
    "POST",
    "/v1/occasions",
    Some(json!({
      "person_id": 1,
      "occasion_name": "Birthday",
      "occasion_date": "2026-03-15",
    })),
  )
  .await;

  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["message"], "New occasion added!");
  assert_eq!(
    body["data"],
    json!({
      "occasion_id": 1,
      "person_id": 1,
      "occasion_name": "Birthday",
      "occasion_date": "2026-03-15",
    })
  );
}

#[tokio::test]
async fn occasion_create_requires_an_active_person() {
  let store = make_store().await;

  let (status, body) = send(
    &store,
    "POST",
    "/v1/occasions",
    Some(json!({
      "person_id": 9,
      "occasion_name": "Birthday",
      "occasion_date": "2026-03-15",
    })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["message"], "Person not found or has been eliminated");

  seed_person(&store, "Otto", "Marden", "cousin").await;
  let (_, _) = send(
    &store,
    "PUT",
    "/v1/people/eliminate-by-info",
    Some(json!({
      "f_name": "Otto",
      "l_name": "Marden",
      "relationship": "cousin",
    })),
  )
  .await;

  let (status, _) = send(
    &store,
    "POST",
    "/v1/occasions",
    Some(json!({
      "person_id": 1,
      "occasion_name": "Birthday",
      "occasion_date": "2026-03-15",
    })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn occasion_create_rejects_a_malformed_date() {
  let store = make_store().await;
  seed_person(&store, "Maria", "Keen", "friend").await;

  let (status, body) = send(
    &store,
    "POST",
    "/v1/occasions",
    Some(json!({
      "person_id": 1,
      "occasion_name": "Birthday",
      "occasion_date": "March 15th",
    })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["message"], "Invalid 'occasion_date'; expected YYYY-MM-DD");
}

#[tokio::test]
async fn occasion_create_lists_every_missing_field() {
  let store = make_store().await;
  let (status, body) =
    send(&store, "POST", "/v1/occasions", Some(json!({}))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(
    body["message"],
    "Missing required field(s): person_id, occasion_name, occasion_date"
  );
}

#[tokio::test]
async fn occasion_names_are_distinct_and_sorted() {
  let store = make_store().await;
  seed_person(&store, "Maria", "Keen", "friend").await;
  seed_occasion(&store, 1, "Graduation", "2026-06-01").await;
  seed_occasion(&store, 1, "Birthday", "2026-03-15").await;
  seed_occasion(&store, 1, "Birthday", "2027-03-15").await;

  let (status, body) = send(&store, "GET", "/v1/occasions/names", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["data"], json!(["Birthday", "Graduation"]));
}

#[tokio::test]
async fn timeline_orders_by_date_and_skips_the_eliminated() {
  let store = make_store().await;
  seed_person(&store, "Maria", "Keen", "friend").await;
  seed_person(&store, "Otto", "Marden", "cousin").await;
  seed_occasion(&store, 1, "Graduation", "2026-06-01").await;
  seed_occasion(&store, 2, "Birthday", "2026-01-20").await;
  seed_occasion(&store, 1, "Birthday", "2026-03-15").await;

  let (_, body) = send(&store, "GET", "/v1/occasions/timeline", None).await;
  let entries = body["data"].as_array().unwrap();
  assert_eq!(entries.len(), 3);
  assert_eq!(entries[0]["occasion_date"], "2026-01-20");
  assert_eq!(entries[0]["person_name"], "Otto Marden");
  assert_eq!(entries[2]["occasion_name"], "Graduation");

  let (_, _) = send(
    &store,
    "PUT",
    "/v1/people/eliminate-by-info",
    Some(json!({
      "f_name": "Otto",
      "l_name": "Marden",
      "relationship": "cousin",
    })),
  )
  .await;

  let (_, body) = send(&store, "GET", "/v1/occasions/timeline", None).await;
  let entries = body["data"].as_array().unwrap();
  assert_eq!(entries.len(), 2);
  assert_eq!(entries[0]["person_name"], "Maria Keen");
}
