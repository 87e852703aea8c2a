//! Integration tests for remote facility holds.

mod helpers;

use chrono::{NaiveDate, NaiveTime};

use facility_core::ErrorKind;
use facility_core::types::DateRange;
use facility_entity::UserRole;
use facility_service::{HoldRequest, RequestContext};

use helpers::TestApp;

fn hold(resource: &str, start: (u32, u32), end: (u32, u32)) -> HoldRequest {
    HoldRequest {
        resource: resource.to_string(),
        client_name: "dana".to_string(),
        // Tuesday
        date: NaiveDate::from_ymd_opt(2024, 3, 12).unwrap(),
        start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
    }
}

async fn remote(app: &TestApp) -> RequestContext {
    let user = app
        .create_user("chicago", UserRole::RemoteFacilityManager, 0.0)
        .await;
    RequestContext::for_user(&user)
}

#[tokio::test]
async fn test_hold_books_every_block() {
    let app = TestApp::new().await;
    let ctx = remote(&app).await;

    let receipt = app
        .holds
        .place_hold(&ctx, hold("workshop3", (13, 0), (14, 30)))
        .await
        .unwrap();

    assert_eq!(receipt.facility_name, "Team 1, Chicago, IL");
    assert_eq!(receipt.serial_numbers.len(), 3);

    let holds = app.holds.list_holds().await.unwrap();
    assert_eq!(holds.len(), 3);
    assert!(holds.iter().all(|r| r.customer == "dana" && r.reserver == "chicago"));
    assert!(holds.iter().all(|r| r.cost == 49.5));

    // Holds are not charged to anyone.
    let ledger = app.ledger.list_transactions(None, DateRange::all()).await.unwrap();
    assert!(ledger.is_empty());
}

#[tokio::test]
async fn test_first_rejection_stops_and_keeps_earlier_blocks() {
    let app = TestApp::new().await;
    let ctx = remote(&app).await;

    let err = app
        .holds
        .place_hold(&ctx, hold("irradiator2", (10, 0), (11, 30)))
        .await
        .unwrap_err();
    assert_eq!(err.payload().code, "irradiator-cooldown");

    let holds = app.holds.list_holds().await.unwrap();
    assert_eq!(holds.len(), 1);
    assert_eq!(holds[0].timestamp.time(), NaiveTime::from_hms_opt(10, 0, 0).unwrap());
}

#[tokio::test]
async fn test_hold_running_past_closing() {
    let app = TestApp::new().await;
    let ctx = remote(&app).await;

    let err = app
        .holds
        .place_hold(&ctx, hold("polymer extruder", (16, 0), (17, 30)))
        .await
        .unwrap_err();
    assert_eq!(err.payload().code, "outside-working-hours");
    assert_eq!(app.holds.list_holds().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_hold_time_validation() {
    let app = TestApp::new().await;
    let ctx = remote(&app).await;

    for (start, end) in [((10, 15), (11, 0)), ((10, 0), (11, 45)), ((11, 0), (10, 0))] {
        let err = app
            .holds
            .place_hold(&ctx, hold("workshop", start, end))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
    assert!(app.holds.list_holds().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_only_remote_facility_managers_place_holds() {
    let app = TestApp::new().await;
    app.create_user("alice", UserRole::Client, 0.0).await;

    let err = app
        .holds
        .place_hold(&app.client("alice"), hold("workshop", (10, 0), (11, 0)))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);

    let err = app
        .holds
        .place_hold(
            &RequestContext::new("nobody", UserRole::RemoteFacilityManager),
            hold("workshop", (10, 0), (11, 0)),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_manager_bookings_are_not_holds() {
    let app = TestApp::new().await;
    let ctx = remote(&app).await;
    app.create_user("alice", UserRole::Client, 100.0).await;

    app.booking
        .reserve(
            &app.manager(),
            facility_service::ReserveRequest {
                resource: "workshop".to_string(),
                customer: "alice".to_string(),
                timestamp: helpers::at(2024, 3, 12, 9, 0),
            },
        )
        .await
        .unwrap();
    app.holds
        .place_hold(&ctx, hold("workshop", (9, 0), (9, 30)))
        .await
        .unwrap();

    let holds = app.holds.list_holds().await.unwrap();
    assert_eq!(holds.len(), 1);
    assert_eq!(holds[0].customer, "dana");
}

#[tokio::test]
async fn test_abandoned_partial_hold_frees_its_blocks() {
    let app = TestApp::new().await;
    let ctx = remote(&app).await;

    app.holds
        .place_hold(&ctx, hold("irradiator2", (10, 0), (11, 30)))
        .await
        .unwrap_err();
    let booked = app.holds.list_holds().await.unwrap();
    assert_eq!(booked.len(), 1);

    for reservation in &booked {
        app.holds
            .cancel_hold(&ctx, &reservation.serial_num)
            .await
            .unwrap();
    }
    assert!(app.holds.list_holds().await.unwrap().is_empty());
    assert!(app.ledger.list_transactions(None, DateRange::all()).await.unwrap().is_empty());

    // The freed slot can be held again.
    let receipt = app
        .holds
        .place_hold(&ctx, hold("irradiator", (10, 0), (10, 30)))
        .await
        .unwrap();
    assert_eq!(receipt.serial_numbers.len(), 1);
}

#[tokio::test]
async fn test_cancel_hold_authorization() {
    let app = TestApp::new().await;
    let ctx = remote(&app).await;
    let other = RequestContext::for_user(
        &app.create_user("boston", UserRole::RemoteFacilityManager, 0.0)
            .await,
    );
    app.create_user("alice", UserRole::Client, 100.0).await;

    let receipt = app
        .holds
        .place_hold(&ctx, hold("workshop", (9, 0), (10, 0)))
        .await
        .unwrap();

    let err = app
        .holds
        .cancel_hold(&other, &receipt.serial_numbers[0])
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);

    let err = app
        .holds
        .cancel_hold(&app.client("alice"), &receipt.serial_numbers[0])
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);

    // Facility managers may remove any hold.
    app.holds
        .cancel_hold(&app.manager(), &receipt.serial_numbers[1])
        .await
        .unwrap();
    assert_eq!(app.holds.list_holds().await.unwrap().len(), 1);

    // A regular booking is not a hold.
    let booking = app
        .booking
        .reserve(
            &app.manager(),
            facility_service::ReserveRequest {
                resource: "workshop".to_string(),
                customer: "alice".to_string(),
                timestamp: helpers::at(2024, 3, 12, 11, 0),
            },
        )
        .await
        .unwrap();
    let err = app
        .holds
        .cancel_hold(&app.manager(), &booking.serial_num)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}
