//! Concurrent writers against one SQLite file


use std::sync::Arc;

use deviceconfig_core::{storage::DeviceStore, types::*, DeviceError, DeviceService};
use test_helpers::*;
use tokio::task::JoinSet;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_of_distinct_ids_all_succeed() {
    let test_db = TestDb::new().await;
    let service = DeviceService::new(Arc::new(test_db.store()));

    let mut tasks = JoinSet::new();
    for i in 0..64 {
        let service = service.clone();
        tasks.spawn(async move {
            service
                .create_device(Device::display(
                    format!("screen-{i:03}"),
                    "screen",
                    Resolution::Hd,
                ))
                .await
        });
    }

    while let Some(result) = tasks.join_next().await {
        result.unwrap().unwrap();
    }

    assert_eq!(service.find_all_devices().await.unwrap().len(), 64);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_of_one_id_yield_one_winner() {
    let test_db = TestDb::new().await;
    let service = DeviceService::new(Arc::new(test_db.store()));

    for round in 0..10 {
        let id = format!("contested-{round}");
        let mut tasks = JoinSet::new();
        for _ in 0..8 {
            let service = service.clone();
            let id = id.clone();
            tasks.spawn(async move {
                service
                    .create_device(Device::display(id, "screen", Resolution::Uhd))
                    .await
            });
        }

        let mut created = 0;
        while let Some(result) = tasks.join_next().await {
            match result.unwrap() {
                Ok(()) => created += 1,
                Err(err) => assert_eq!(err, DeviceError::AlreadyExists(DeviceId::new(id.as_str()))),
            }
        }
        assert_eq!(created, 1, "round {round}");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_merges_of_one_device_are_all_applied() {
    let test_db = TestDb::new().await;
    let service = DeviceService::new(Arc::new(test_db.store()));
    service.create_device(test_computer()).await.unwrap();

    let mut tasks = JoinSet::new();
    for i in 0..16 {
        let service = service.clone();
        tasks.spawn(async move {
            let update = ComputerUpdate {
                name: Some(format!("mac {i}")),
                ..ComputerUpdate::default()
            };
            service
                .update_device(&DeviceId::new(COMPUTER_ID), update.into())
                .await
        });
    }

    while let Some(result) = tasks.join_next().await {
        result.unwrap().unwrap();
    }

    let mut tx = test_db.store().begin_read().await.unwrap();
    let Device::Computer(stored) = tx.find_by_id(&DeviceId::new(COMPUTER_ID)).await.unwrap() else {
        panic!("expected a computer");
    };
    assert!(stored.name.starts_with("mac "));
    assert_eq!(stored.username, "timapple");
}
