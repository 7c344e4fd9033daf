//! Integration tests for the aggregated patient list
//!
//! Exercise the service and list cache together against an in-memory remote
//! source and in-memory storage.

mod common;

use caredesk::adapters::storage::MemoryBackend;
use caredesk::core::aggregate::{CacheStatus, LoadOutcome, PatientListCache, PatientService};
use caredesk::domain::{PageToken, PatientId, PatientPatch};
use common::{remote_record, valid_draft, InMemorySource};
use std::sync::Arc;
use tokio::sync::Notify;

fn setup(source: InMemorySource, page_size: usize) -> (PatientListCache, Arc<InMemorySource>) {
    let source = Arc::new(source);
    let service = PatientService::from_backend(Arc::new(MemoryBackend::new()), source.clone());
    (PatientListCache::new(service, page_size), source)
}

fn ids(cache: &PatientListCache) -> Vec<String> {
    cache
        .flattened_records()
        .into_iter()
        .map(|r| r.id.into_inner())
        .collect()
}

#[tokio::test]
async fn test_first_page_deduplicates_against_local_records() {
    let (cache, _) = setup(InMemorySource::numbered(5), 5);
    let service = cache.service();
    let id5 = PatientId::new("5").unwrap();
    service
        .update_patient(&id5, PatientPatch::default().name("Locally edited five"))
        .unwrap();

    let page = service
        .fetch_aggregated_page(PageToken::FIRST, 5)
        .await
        .unwrap();

    let page_ids: Vec<_> = page.records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(page_ids, vec!["5", "1", "2", "3", "4"]);
    assert_eq!(page.records[0].name, "Locally edited five");
    assert_eq!(page.next_page_token, PageToken::new(2).ok());
}

#[tokio::test]
async fn test_local_only_when_remote_is_empty() {
    let (cache, _) = setup(InMemorySource::new(Vec::new()), 100);
    let a = cache.service().create_patient(valid_draft());
    let b = cache.service().create_patient(valid_draft());

    assert!(matches!(
        cache.load_next().await,
        LoadOutcome::Appended { has_more: false, records: 2, .. }
    ));
    assert_eq!(ids(&cache), vec![b.id.into_inner(), a.id.into_inner()]);
    assert_eq!(cache.status(), CacheStatus::Loaded { has_more: false });
}

#[tokio::test]
async fn test_pagination_stops_after_short_page() {
    let (cache, source) = setup(InMemorySource::numbered(250), 100);

    while cache.has_more() {
        assert!(matches!(cache.load_next().await, LoadOutcome::Appended { .. }));
    }

    assert_eq!(cache.pages_loaded(), 3);
    assert_eq!(cache.flattened_records().len(), 250);
    assert_eq!(cache.load_next().await, LoadOutcome::Skipped);
    assert_eq!(source.calls(), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_exact_multiple_needs_one_empty_page() {
    let (cache, source) = setup(InMemorySource::numbered(4), 2);

    while cache.has_more() {
        cache.load_next().await;
    }

    assert_eq!(cache.flattened_records().len(), 4);
    assert_eq!(source.calls(), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_editing_remote_record_preserves_created_at() {
    let (cache, _) = setup(InMemorySource::numbered(3), 10);
    cache.load_next().await;

    let remote = cache.flattened_records()[1].clone();
    let mut draft = remote.to_draft();
    draft.name = "Renamed remote".to_string();

    let saved = cache.service().save_patient(draft, Some(&remote)).unwrap();
    assert_eq!(saved.id, remote.id);
    assert_eq!(saved.created_at, "2023-03-01T09:30:00.000Z");

    cache.inject_updated(saved.clone());
    assert_eq!(cache.flattened_records()[1].name, "Renamed remote");

    // A fresh session shows the override first and no remote duplicate
    cache.reset();
    cache.load_next().await;
    assert_eq!(ids(&cache), vec!["2", "1", "3"]);
    assert_eq!(cache.flattened_records()[0], saved);
}

#[tokio::test]
async fn test_updating_favorite_updates_favorites_copy() {
    let (cache, _) = setup(InMemorySource::numbered(3), 10);
    cache.load_next().await;

    let remote = cache.flattened_records()[2].clone();
    assert!(cache.service().toggle_favorite(remote.clone()));

    let updated = cache
        .service()
        .update_patient(
            &remote.id,
            PatientPatch::from(remote.to_draft()).website("https://new.example.com"),
        )
        .unwrap();
    cache.inject_updated(updated.clone());

    let favorites = cache.service().favorites().list();
    assert_eq!(favorites, vec![updated]);
    assert_eq!(favorites[0].website, "https://new.example.com");
}

#[tokio::test]
async fn test_created_record_is_injected_at_top() {
    let (cache, _) = setup(InMemorySource::numbered(4), 2);
    cache.load_next().await;
    cache.load_next().await;

    let created = cache.service().create_patient(valid_draft());
    cache.inject_created(created.clone());

    let records = cache.flattened_records();
    assert_eq!(records[0], created);
    assert_eq!(records.len(), 5);
}

#[tokio::test]
async fn test_created_before_first_load_comes_from_store() {
    let (cache, _) = setup(InMemorySource::numbered(2), 10);

    let created = cache.service().create_patient(valid_draft());
    cache.inject_created(created.clone());
    assert!(cache.flattened_records().is_empty());

    cache.load_next().await;
    let records = cache.flattened_records();
    assert_eq!(records[0], created);
    assert_eq!(records.len(), 3);
}

#[tokio::test]
async fn test_concurrent_loads_fetch_once() {
    let (cache, source) = setup(InMemorySource::numbered(10), 5);

    let (first, second) = futures::join!(cache.load_next(), cache.load_next());

    let outcomes = [first, second];
    assert_eq!(
        outcomes
            .iter()
            .filter(|o| matches!(o, LoadOutcome::Appended { .. }))
            .count(),
        1
    );
    assert!(outcomes.contains(&LoadOutcome::Skipped));
    assert_eq!(source.calls(), vec![1]);
    assert_eq!(cache.pages_loaded(), 1);
}

#[tokio::test]
async fn test_response_after_reset_is_discarded() {
    let gate = Arc::new(Notify::new());
    let (cache, source) = setup(InMemorySource::numbered(3).gated(gate.clone()), 10);

    let (outcome, ()) = futures::join!(cache.load_next(), async {
        assert!(cache.is_loading());
        cache.reset();
        gate.notify_one();
    });

    assert_eq!(outcome, LoadOutcome::Discarded);
    assert_eq!(cache.pages_loaded(), 0);
    assert_eq!(cache.status(), CacheStatus::Empty);

    gate.notify_one();
    assert!(matches!(cache.load_next().await, LoadOutcome::Appended { .. }));
    assert_eq!(source.calls(), vec![1, 1]);
    assert_eq!(cache.pages_loaded(), 1);
}

#[tokio::test]
async fn test_cross_page_duplicates_are_kept() {
    let records = vec![
        remote_record("1", "One"),
        remote_record("2", "Two"),
        remote_record("2", "Two again"),
    ];
    let (cache, _) = setup(InMemorySource::new(records), 2);

    while cache.has_more() {
        cache.load_next().await;
    }

    assert_eq!(ids(&cache), vec!["1", "2", "2"]);
}

#[tokio::test]
async fn test_search_over_loaded_records() {
    let (cache, _) = setup(
        InMemorySource::new(vec![
            remote_record("1", "Ada Lovelace"),
            remote_record("2", "Grace Hopper"),
        ]),
        10,
    );
    cache.load_next().await;
    cache
        .service()
        .toggle_favorite(cache.flattened_records()[1].clone());

    let favorites = cache.service().favorites();
    let filter = caredesk::domain::PatientFilter::search("HOPPER").favorites_only();
    let matched: Vec<_> = cache
        .flattened_records()
        .into_iter()
        .filter(|r| filter.matches(r, favorites.is_favorite(&r.id)))
        .collect();

    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].name, "Grace Hopper");
}
