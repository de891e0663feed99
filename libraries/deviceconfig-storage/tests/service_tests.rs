//! DeviceService running on the SQLite store


use std::sync::Arc;

use deviceconfig_core::{types::*, DeviceError, DeviceService};
use test_helpers::*;

fn service(test_db: &TestDb) -> DeviceService {
    DeviceService::new(Arc::new(test_db.store()))
}

#[tokio::test]
async fn test_created_devices_are_listed() {
    let test_db = TestDb::new().await;
    let service = service(&test_db);

    service.create_device(test_computer()).await.unwrap();
    service.create_device(test_display()).await.unwrap();

    let all = service.find_all_devices().await.unwrap();
    assert_eq!(all, vec![test_computer(), test_display()]);
}

#[tokio::test]
async fn test_replace_with_other_variant_keeps_stored_device() {
    let test_db = TestDb::new().await;
    let service = service(&test_db);
    service.create_device(test_display()).await.unwrap();

    let as_computer = Device::computer(DISPLAY_ID, "best mac", "timapple", "0n3m0r3th1ng", "192.168.178.1");
    let err = service.replace_device(as_computer).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "Type of resource with id samsung-screen-88276 doesn't match device type in document. \
         resourceType: display, invalidDeviceType: computer"
    );
    assert_eq!(
        service
            .find_device_by_id(&DeviceId::new(DISPLAY_ID))
            .await
            .unwrap(),
        test_display()
    );
}

#[tokio::test]
async fn test_update_is_durable() {
    let test_db = TestDb::new().await;
    let service = service(&test_db);
    service.create_device(test_display()).await.unwrap();

    let update = DisplayUpdate {
        name: Some("best screen".to_string()),
        resolution: None,
    };
    service
        .update_device(&DeviceId::new(DISPLAY_ID), update.into())
        .await
        .unwrap();

    // A fresh service on the same database sees the committed write
    let reopened = DeviceService::new(Arc::new(test_db.store()));
    assert_eq!(
        reopened
            .find_device_by_id(&DeviceId::new(DISPLAY_ID))
            .await
            .unwrap(),
        Device::display(DISPLAY_ID, "best screen", Resolution::Wqhd)
    );
}

#[tokio::test]
async fn test_failed_create_leaves_existing_device() {
    let test_db = TestDb::new().await;
    let service = service(&test_db);
    service.create_device(test_computer()).await.unwrap();

    let err = service
        .create_device(Device::display(COMPUTER_ID, "screen", Resolution::Uhd))
        .await
        .unwrap_err();

    assert_eq!(err, DeviceError::AlreadyExists(DeviceId::new(COMPUTER_ID)));
    assert_eq!(
        service
            .find_device_type_by_id(&DeviceId::new(COMPUTER_ID))
            .await
            .unwrap(),
        DeviceType::Computer
    );
    assert_eq!(service.find_all_devices().await.unwrap().len(), 1);
}
