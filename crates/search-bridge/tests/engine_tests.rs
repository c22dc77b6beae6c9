//! Search engine facade integration tests.
//!
//! These tests drive [`SearchEngine`] end to end against a recording transport
//! and an in-memory record store.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};

use common::{InMemoryStore, RecordingTransport, Restaurant, hits_response};
use helios_search_bridge::error::{BridgeError, BridgeResult, RequestError, ResponseError};
use helios_search_bridge::query::CompiledQuery;
use helios_search_bridge::transport::{ResponseHandler, SearchTransport};
use helios_search_bridge::types::{GeoDistance, SearchRequest, SortOrder, StructuredQuery};
use helios_search_bridge::{SearchEngine, SearchOutcome};

fn create_engine(
    records: Vec<Restaurant>,
) -> (
    SearchEngine<Restaurant>,
    Arc<RecordingTransport>,
    Arc<InMemoryStore>,
) {
    let transport = RecordingTransport::new();
    let store = InMemoryStore::with_records(records);
    let engine = SearchEngine::new(transport.clone(), store.clone());
    (engine, transport, store)
}

fn restaurants() -> Vec<Restaurant> {
    vec![
        Restaurant::new(1, "Chez Marie"),
        Restaurant::new(2, "Le Petit Bistro"),
        Restaurant::new(3, "Pho 75"),
    ]
}

fn request() -> SearchRequest {
    SearchRequest::new("restaurants", "restaurant")
}

fn expect_hits(outcome: SearchOutcome) -> helios_search_bridge::results::SearchResult {
    outcome.into_hits().expect("expected mapped hits")
}

// ============================================================================
// Bulk Tests
// ============================================================================

#[tokio::test]
async fn test_index_batch_skips_empty_documents() {
    let (engine, transport, _) = create_engine(vec![]);
    let batch = vec![
        Restaurant::new(1, "Chez Marie"),
        Restaurant::unnamed(2),
        Restaurant::new(3, "Pho 75"),
    ];

    let response = engine.index_batch(&batch).await.unwrap();
    assert_eq!(response["errors"], false);

    let bulks = transport.bulk_requests();
    assert_eq!(bulks.len(), 1);
    let bulk = &bulks[0];
    assert!(bulk.refresh());
    assert_eq!(bulk.action_count(), 2);
    assert_eq!(
        bulk.entries(),
        &[
            json!({ "index": { "_index": "restaurants", "_type": "restaurant", "_id": "1" } }),
            json!({ "name": "Chez Marie", "city": "Paris" }),
            json!({ "index": { "_index": "restaurants", "_type": "restaurant", "_id": "3" } }),
            json!({ "name": "Pho 75", "city": "Paris" }),
        ]
    );
}

#[tokio::test]
async fn test_delete_batch_emits_header_per_record() {
    let (engine, transport, _) = create_engine(vec![]);
    let batch = vec![Restaurant::new(1, "Chez Marie"), Restaurant::unnamed(2)];

    engine.delete_batch(&batch).await.unwrap();

    let bulk = &transport.bulk_requests()[0];
    assert_eq!(
        bulk.to_request(),
        json!({
            "refresh": true,
            "body": [
                { "delete": { "_index": "restaurants", "_type": "restaurant", "_id": "1" } },
                { "delete": { "_index": "restaurants", "_type": "restaurant", "_id": "2" } }
            ]
        })
    );
}

#[tokio::test]
async fn test_upsert_batch() {
    let (engine, transport, _) = create_engine(vec![]);

    engine
        .upsert_batch(&[Restaurant::new(4, "Sushi Bar")])
        .await
        .unwrap();

    let bulk = &transport.bulk_requests()[0];
    assert_eq!(bulk.entries()[0]["update"]["_id"], "4");
    assert_eq!(bulk.entries()[1]["doc_as_upsert"], true);
    assert_eq!(bulk.entries()[1]["doc"]["name"], "Sushi Bar");
}

#[tokio::test]
async fn test_empty_bulk_is_not_sent() {
    let (engine, transport, _) = create_engine(vec![]);

    let response = engine.index_batch(&[Restaurant::unnamed(1)]).await.unwrap();
    assert_eq!(response, Value::Null);

    let response = engine.delete_batch(&[]).await.unwrap();
    assert_eq!(response, Value::Null);

    assert!(transport.bulk_requests().is_empty());
}

// ============================================================================
// Search Tests
// ============================================================================

#[tokio::test]
async fn test_search_without_text_matches_all() {
    let (engine, transport, _) = create_engine(vec![]);
    transport.respond_with(hits_response(&[], 0));

    let result = expect_hits(engine.search(&request()).await.unwrap());
    assert!(result.is_empty());
    assert_eq!(engine.total_count(&result), 0);

    let query = &transport.search_requests()[0];
    assert_eq!(query.must(), &[json!({ "match_all": {} })]);
    assert_eq!(query.size, Some(10000));
    assert_eq!(query.from, None);
    assert!(query.sort.is_none());
}

#[tokio::test]
async fn test_search_filters_dispatch_by_type() {
    let (engine, transport, _) = create_engine(vec![]);
    transport.respond_with(hits_response(&[1], 1));

    let request = request()
        .with_text("bistro")
        .with_filter("age", 30)
        .with_filter("city", "Paris")
        .with_order(SortOrder::parse("-rating"));
    engine.search(&request).await.unwrap();

    let query = &transport.search_requests()[0];
    assert_eq!(query.must().len(), 3);
    assert_eq!(query.must()[0]["match"]["_all"]["query"], "bistro");
    assert_eq!(query.must()[1], json!({ "term": { "age": 30 } }));
    assert_eq!(
        query.must()[2],
        json!({ "match": { "city": { "query": "Paris", "operator": "and" } } })
    );
    assert_eq!(query.body()["sort"], json!([{ "rating": { "order": "desc" } }]));
}

#[tokio::test]
async fn test_search_geo_distance_defaults() {
    let (engine, transport, _) = create_engine(vec![]);
    transport.respond_with(hits_response(&[], 0));

    let structured = StructuredQuery::new().with_geo_distance(GeoDistance::new(1.0, 2.0));
    engine
        .search(&request().with_free_text(structured))
        .await
        .unwrap();

    let query = &transport.search_requests()[0];
    assert!(query.must().is_empty());
    let envelope = query.to_request();
    let filter = &envelope["body"]["query"]["filtered"]["filter"];
    assert_eq!(
        filter,
        &json!([{
            "geo_distance": {
                "distance": "3km",
                "distance_type": "plane",
                "location": { "lat": 1.0, "lon": 2.0 }
            }
        }])
    );
}

#[tokio::test]
async fn test_ids_and_total_are_pure_projections() {
    let (engine, transport, store) = create_engine(vec![]);
    transport.respond_with(hits_response(&[3, 1, 2], 3));

    let result = expect_hits(engine.search(&request()).await.unwrap());

    assert_eq!(engine.ids_of(&result), vec!["3", "1", "2"]);
    assert_eq!(engine.total_count(&result), 3);
    assert_eq!(engine.total_count(&result), 3);
    assert_eq!(transport.search_requests().len(), 1);
    assert!(store.fetches().is_empty());
}

#[tokio::test]
async fn test_transport_failure_propagates() {
    let (engine, transport, _) = create_engine(vec![]);
    transport.fail_with(503);

    let err = engine.search(&request()).await.unwrap_err();
    assert!(matches!(err, BridgeError::Transport(_)));
    assert_eq!(transport.search_requests().len(), 1);
}

#[tokio::test]
async fn test_malformed_response_is_an_error() {
    let (engine, transport, _) = create_engine(vec![]);
    transport.respond_with(json!({ "took": 1 }));

    let err = engine.search(&request()).await.unwrap_err();
    assert!(matches!(
        err,
        BridgeError::Response(ResponseError::Malformed { .. })
    ));
}

// ============================================================================
// Pagination Tests
// ============================================================================

#[tokio::test]
async fn test_paginated_search_window_and_page_count() {
    let (engine, transport, _) = create_engine(vec![]);
    transport.respond_with(hits_response(&[11, 12], 95));

    let outcome = engine
        .paginated_search(&request().with_limit(500).with_offset(3), 10, 2)
        .await
        .unwrap();
    let result = expect_hits(outcome);

    let query = &transport.search_requests()[0];
    assert_eq!(query.from, Some(10));
    assert_eq!(query.size, Some(10));
    assert_eq!(result.total_hits(), 95);
    assert_eq!(result.page_count(), Some(10));
}

#[tokio::test]
async fn test_paginated_search_first_page() {
    let (engine, transport, _) = create_engine(vec![]);
    transport.respond_with(hits_response(&[], 0));

    let result = expect_hits(engine.paginated_search(&request(), 25, 1).await.unwrap());

    let query = &transport.search_requests()[0];
    assert_eq!(query.from, Some(0));
    assert_eq!(query.size, Some(25));
    assert_eq!(result.page_count(), Some(0));
}

#[tokio::test]
async fn test_zero_page_size_rejected_before_transport() {
    let (engine, transport, _) = create_engine(vec![]);

    let err = engine.paginated_search(&request(), 0, 1).await.unwrap_err();
    assert!(matches!(
        err,
        BridgeError::Request(RequestError::InvalidPageSize { page_size: 0 })
    ));
    assert!(transport.search_requests().is_empty());
}

#[tokio::test]
async fn test_zero_page_number_rejected_before_transport() {
    let (engine, transport, _) = create_engine(vec![]);

    let err = engine.paginated_search(&request(), 10, 0).await.unwrap_err();
    assert!(matches!(
        err,
        BridgeError::Request(RequestError::InvalidPageNumber { page: 0 })
    ));
    assert!(transport.search_requests().is_empty());
}

// ============================================================================
// Hydration Tests
// ============================================================================

#[tokio::test]
async fn test_hydrate_preserves_response_order() {
    let (engine, transport, store) = create_engine(restaurants());
    transport.respond_with(hits_response(&[3, 1, 2], 3));

    let result = expect_hits(engine.search(&request()).await.unwrap());
    let records = engine.hydrate(&result).await.unwrap();

    let ids: Vec<u64> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![3, 1, 2]);
    assert_eq!(store.fetches().len(), 1);
}

#[tokio::test]
async fn test_hydrate_drops_unresolved_ids() {
    let (engine, transport, _) = create_engine(vec![Restaurant::new(1, "Chez Marie")]);
    transport.respond_with(hits_response(&[1, 2], 2));

    let result = expect_hits(engine.search(&request()).await.unwrap());
    let records = engine.hydrate(&result).await.unwrap();

    assert_eq!(records, vec![Restaurant::new(1, "Chez Marie")]);
}

#[tokio::test]
async fn test_hydrate_empty_result_skips_store() {
    let (engine, transport, store) = create_engine(restaurants());
    transport.respond_with(hits_response(&[], 0));

    let result = expect_hits(engine.search(&request()).await.unwrap());
    let records = engine.hydrate(&result).await.unwrap();

    assert!(records.is_empty());
    assert!(store.fetches().is_empty());
}

#[tokio::test]
async fn test_trashed_records_hidden_by_default() {
    let mut records = restaurants();
    records.push(Restaurant::new(4, "Closed Diner").trashed());
    let (engine, transport, store) = create_engine(records);
    transport.respond_with(hits_response(&[4, 1], 2));

    let result = expect_hits(engine.search(&request()).await.unwrap());
    let hydrated = engine.hydrate(&result).await.unwrap();

    assert_eq!(hydrated.len(), 1);
    assert_eq!(hydrated[0].id, 1);
    assert_eq!(store.fetches()[0], (vec!["4".to_string(), "1".to_string()], false));
}

#[tokio::test]
async fn test_request_trashed_visibility() {
    let mut records = restaurants();
    records.push(Restaurant::new(4, "Closed Diner").trashed());
    let (engine, transport, store) = create_engine(records);
    transport.respond_with(hits_response(&[4, 1], 2));

    let result = expect_hits(
        engine
            .search(&request().with_trashed_visible(true))
            .await
            .unwrap(),
    );
    assert!(result.trashed_visible());

    let hydrated = engine.hydrate(&result).await.unwrap();
    let ids: Vec<u64> = hydrated.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![4, 1]);
    assert!(store.fetches()[0].1);
}

#[tokio::test]
async fn test_engine_visibility_default_and_request_override() {
    let (engine, transport, store) = create_engine(restaurants());
    let engine = engine.with_trashed_visible(true);
    transport.respond_with(hits_response(&[1], 1));
    transport.respond_with(hits_response(&[1], 1));

    let inherited = expect_hits(engine.search(&request()).await.unwrap());
    let overridden = expect_hits(
        engine
            .search(&request().with_trashed_visible(false))
            .await
            .unwrap(),
    );

    engine.hydrate(&inherited).await.unwrap();
    engine.hydrate(&overridden).await.unwrap();

    let flags: Vec<bool> = store.fetches().iter().map(|(_, trashed)| *trashed).collect();
    assert_eq!(flags, vec![true, false]);
}

// ============================================================================
// Response Handler Tests
// ============================================================================

/// Returns the compiled window and the raw response of its own search call.
struct RawResponseHandler;

#[async_trait]
impl ResponseHandler for RawResponseHandler {
    async fn handle(
        &self,
        transport: &dyn SearchTransport,
        query: &CompiledQuery,
    ) -> BridgeResult<Value> {
        let raw = transport.search(query).await?;
        Ok(json!({
            "from": query.from,
            "size": query.size,
            "took": raw["took"]
        }))
    }
}

/// Never touches the transport.
struct ConstantHandler;

#[async_trait]
impl ResponseHandler for ConstantHandler {
    async fn handle(
        &self,
        _transport: &dyn SearchTransport,
        query: &CompiledQuery,
    ) -> BridgeResult<Value> {
        Ok(json!({ "index": query.index }))
    }
}

#[tokio::test]
async fn test_response_handler_bypasses_default_path() {
    let (engine, transport, _) = create_engine(vec![]);

    let outcome = engine
        .search(&request().with_response_handler(Arc::new(ConstantHandler)))
        .await
        .unwrap();

    assert_eq!(outcome, SearchOutcome::Custom(json!({ "index": "restaurants" })));
    assert!(transport.search_requests().is_empty());
}

#[tokio::test]
async fn test_response_handler_receives_transport_and_paged_query() {
    let (engine, transport, _) = create_engine(vec![]);
    transport.respond_with(hits_response(&[1], 1));

    let outcome = engine
        .paginated_search(
            &request().with_response_handler(Arc::new(RawResponseHandler)),
            10,
            3,
        )
        .await
        .unwrap();

    assert_eq!(
        outcome.into_custom(),
        Some(json!({ "from": 20, "size": 10, "took": 3 }))
    );
    assert_eq!(transport.search_requests().len(), 1);
}
