#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for the lifecycle controller against an in-memory
//! remote service.
//!
//! These tests exercise the public lifecycle API end to end, verifying that:
//! - a configured model reads back unchanged, domains in caller order
//! - repeated updates write the same object and cause no drift
//! - reset clears sign-in and domains but keeps the subtype
//! - malformed input fails before any remote call
//! - incomplete remote responses and absence are reported distinctly

mod common;

use common::{Call, InMemoryService, full_desired};
use identity_platform_config::cancel::CancelToken;
use identity_platform_config::client::RemoteClient;
use identity_platform_config::error::{ErrorKind, Operation, RemoteError};
use identity_platform_config::lifecycle::ConfigLifecycle;
use identity_platform_config::mapping::{hydrate, project};
use identity_platform_config::model::{
    DeclarativeConfig, Email, NotificationConfig, PhoneNumber, RemoteConfig,
};

// ---------------------------------------------------------------------------
// Round trip
// ---------------------------------------------------------------------------

/// Projecting then hydrating reproduces every field except the identity.
#[test]
fn projection_round_trips_through_hydration() {
    let desired = full_desired("demo");
    let hydrated = hydrate("demo", &project(&desired).unwrap()).unwrap();
    assert_eq!(hydrated.without_name(), desired);
}

/// Configuring and reading back through the service yields the desired
/// model plus the remote identity.
#[test]
fn configure_then_read_returns_desired_configuration() {
    let service = InMemoryService::with_project("demo");
    let cancel = CancelToken::new();
    let lifecycle = ConfigLifecycle::new(&service, &cancel);

    let configured = lifecycle.configure(&full_desired("demo")).unwrap();
    assert_eq!(configured.identity, "projects/demo/config");
    assert_eq!(configured.observed.without_name(), full_desired("demo"));

    let read = lifecycle.read("demo").unwrap().expect("config exists");
    assert_eq!(read, configured.observed);
}

/// Domain order survives the full write and read cycle.
#[test]
fn authorized_domain_order_is_preserved() {
    let service = InMemoryService::with_project("demo");
    let cancel = CancelToken::new();
    let desired = DeclarativeConfig {
        authorized_domains: vec!["z.com".to_string(), "a.com".to_string()],
        ..full_desired("demo")
    };

    let observed = ConfigLifecycle::new(&service, &cancel)
        .update(&desired)
        .unwrap();

    assert_eq!(observed.authorized_domains, vec!["z.com", "a.com"]);
    assert_eq!(
        service.stored("demo").unwrap().authorized_domains,
        Some(vec!["z.com".to_string(), "a.com".to_string()])
    );
}

// ---------------------------------------------------------------------------
// Update idempotence
// ---------------------------------------------------------------------------

/// Two updates with the same input send the same body and leave the same
/// remote object.
#[test]
fn repeated_update_is_idempotent() {
    let service = InMemoryService::with_project("demo");
    let cancel = CancelToken::new();
    let lifecycle = ConfigLifecycle::new(&service, &cancel);

    let first = lifecycle.update(&full_desired("demo")).unwrap();
    let after_first = service.stored("demo").unwrap();
    let second = lifecycle.update(&full_desired("demo")).unwrap();
    let after_second = service.stored("demo").unwrap();

    assert_eq!(first, second);
    assert_eq!(after_first, after_second);
    let writes = service.writes();
    assert_eq!(writes.len(), 2);
    assert_eq!(writes[0], writes[1]);
}

/// Clearing the domain list is sent as an explicit empty list and takes
/// effect.
#[test]
fn update_to_empty_domains_clears_previous_domains() {
    let service = InMemoryService::with_project("demo");
    let cancel = CancelToken::new();
    let lifecycle = ConfigLifecycle::new(&service, &cancel);

    lifecycle.update(&full_desired("demo")).unwrap();
    let cleared = lifecycle
        .update(&DeclarativeConfig {
            authorized_domains: Vec::new(),
            ..full_desired("demo")
        })
        .unwrap();

    assert!(cleared.authorized_domains.is_empty());
    assert_eq!(service.writes()[1].authorized_domains, Some(Vec::new()));
}

// ---------------------------------------------------------------------------
// Reset
// ---------------------------------------------------------------------------

/// After a reset the service reports sign-in switched off, no domains, and
/// the subtype passed to the reset.
#[test]
fn reset_clears_sign_in_and_domains_but_keeps_subtype() {
    let service = InMemoryService::with_project("demo");
    let cancel = CancelToken::new();
    let lifecycle = ConfigLifecycle::new(&service, &cancel);

    lifecycle.configure(&full_desired("demo")).unwrap();
    lifecycle.reset("demo", "IDENTITY_PLATFORM").unwrap();

    let remote = service.get_config(&cancel, "demo").unwrap();
    let sign_in = remote.sign_in.unwrap();
    assert_eq!(sign_in.email, Some(Email::default()));
    assert_eq!(sign_in.phone_number, Some(PhoneNumber::default()));
    assert_eq!(remote.authorized_domains, Some(Vec::new()));
    assert_eq!(remote.subtype, "IDENTITY_PLATFORM");

    let observed = lifecycle.read("demo").unwrap().unwrap();
    assert!(observed.authorized_domains.is_empty());
    assert_eq!(observed.subtype.as_deref(), Some("IDENTITY_PLATFORM"));
}

/// The reset body carries only the subtype.
#[test]
fn reset_sends_minimal_body() {
    let service = InMemoryService::with_project("demo");
    let cancel = CancelToken::new();

    ConfigLifecycle::new(&service, &cancel)
        .reset("demo", "FIREBASE_AUTH")
        .unwrap();

    assert_eq!(
        service.writes(),
        vec![RemoteConfig {
            subtype: "FIREBASE_AUTH".to_string(),
            ..RemoteConfig::default()
        }]
    );
    assert_eq!(service.stored("demo").unwrap().subtype, "FIREBASE_AUTH");
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

/// An unconfigured group fails with InvalidShape and no call is made.
#[test]
fn unconfigured_group_fails_before_any_call() {
    let service = InMemoryService::with_project("demo");
    let cancel = CancelToken::new();

    let err = ConfigLifecycle::new(&service, &cancel)
        .configure(&DeclarativeConfig {
            email: None,
            ..full_desired("demo")
        })
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidShape);
    assert!(err.to_string().contains("email"), "got: {err}");
    assert!(service.calls().is_empty());
}

/// A response without `notification.sendEmail` is rejected, not zero-filled.
#[test]
fn incomplete_remote_response_is_rejected() {
    let service = InMemoryService::new();
    service.seed(
        "demo",
        RemoteConfig {
            notification: Some(NotificationConfig { send_email: None }),
            ..common::fresh_config("demo")
        },
    );
    let cancel = CancelToken::new();

    let err = ConfigLifecycle::new(&service, &cancel)
        .read("demo")
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::IncompleteRemoteState);
    assert_eq!(err.operation(), Operation::Read);
}

/// Absence is `None`, distinct from a failed read.
#[test]
fn absent_project_reads_as_none() {
    let service = InMemoryService::new();
    let cancel = CancelToken::new();
    assert_eq!(
        ConfigLifecycle::new(&service, &cancel).read("gone").unwrap(),
        None
    );
}

/// A failed write is reported as a write error and no read follows.
#[test]
fn failed_write_skips_read_back() {
    let service = InMemoryService::with_project("demo");
    service.fail_next_write(RemoteError::Status { status: 409 });
    let cancel = CancelToken::new();

    let err = ConfigLifecycle::new(&service, &cancel)
        .update(&full_desired("demo"))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RemoteWrite);
    assert_eq!(service.calls().len(), 1);
    assert!(matches!(service.calls()[0], Call::Update(..)));
}

/// A cancelled token stops the operation before any call.
#[test]
fn cancelled_token_stops_configure() {
    let service = InMemoryService::with_project("demo");
    let cancel = CancelToken::new();
    cancel.cancel();

    let err = ConfigLifecycle::new(&service, &cancel)
        .configure(&full_desired("demo"))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Cancelled);
    assert!(service.calls().is_empty());
}
