// Both meter store implementations must honour the same contract.

use std::sync::Arc;

use rstest::rstest;
use smart_meters::modules::smart_meters::adapters::outbound::meter_store_in_memory::InMemoryMeterStore;
use smart_meters::modules::smart_meters::adapters::outbound::meter_store_sqlite::SqliteMeterStore;
use smart_meters::modules::smart_meters::core::ports::MeterStore;
use smart_meters::modules::smart_meters::core::status::MeterStatus;
use smart_meters::modules::smart_meters::use_cases::query_meter::handler::MeterQueryHandler;
use smart_meters::shared::infrastructure::sqlite::connect_pool;

#[derive(Debug, Clone, Copy)]
enum Backend {
    InMemory,
    Sqlite,
}

async fn store(backend: Backend) -> Arc<dyn MeterStore> {
    match backend {
        Backend::InMemory => Arc::new(InMemoryMeterStore::new()),
        Backend::Sqlite => {
            let pool = connect_pool("sqlite::memory:", 1).await.unwrap();
            Arc::new(SqliteMeterStore::new(pool))
        }
    }
}

async fn seeded_usage(store: &Arc<dyn MeterStore>) -> Vec<f64> {
    let mut usage = Vec::new();
    for id in [101, 102, 103] {
        usage.push(store.sum_usage(id).await.unwrap());
    }
    usage
}

#[rstest]
#[case(Backend::InMemory)]
#[case(Backend::Sqlite)]
#[tokio::test]
async fn initialize_seeds_once(#[case] backend: Backend) {
    let store = store(backend).await;
    store.initialize().await.unwrap();
    let usage = seeded_usage(&store).await;

    store.initialize().await.unwrap();

    let ids: Vec<i64> = store.list_meters().await.unwrap().iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![101, 102, 103]);
    assert_eq!(seeded_usage(&store).await, usage);
}

#[rstest]
#[case(Backend::InMemory)]
#[case(Backend::Sqlite)]
#[tokio::test]
async fn seeded_usage_covers_thirty_readings_per_meter(#[case] backend: Backend) {
    let store = store(backend).await;
    store.initialize().await.unwrap();

    for usage in seeded_usage(&store).await {
        assert!((150.0..=750.0).contains(&usage), "usage {usage} out of range");
    }
}

#[rstest]
#[case(Backend::InMemory)]
#[case(Backend::Sqlite)]
#[tokio::test]
async fn unknown_meter_degrades_to_sentinels(#[case] backend: Backend) {
    let store = store(backend).await;
    store.initialize().await.unwrap();
    let handler = MeterQueryHandler::new(store);

    assert_eq!(handler.get_usage(999).await.unwrap(), 0.0);
    assert_eq!(handler.get_bill(999).await.unwrap(), 0);
    assert_eq!(handler.get_status(999).await.unwrap(), MeterStatus::Unknown);
    assert_eq!(handler.get_customer_info(999).await.unwrap(), "Unknown Customer");
}
