//! End-to-end migration flow contracts
//!
//! Drives the engine through the full four-phase pipeline against mock
//! adapters and pins down the terminal state, the provisioned records, the
//! nameserver cutover, and the halt behaviors.

mod common;

use common::*;
use dnsmigrate_core::domain::{MigrationStatus, TlsMode};
use dnsmigrate_core::traits::RecordType;
use dnsmigrate_core::{MigrateOptions, MigrationDisposition};
use std::net::IpAddr;

#[tokio::test]
async fn full_migration_with_target_ip_reaches_ssl_configured() {
    let registrar = MockRegistrar::new();
    let provider = MockProvider::new();
    let store = CountingStore::new();
    let engine = build_engine(
        registrar.clone(),
        provider.clone(),
        store,
        ScriptedGate::approving(),
        fast_engine_config(),
    );

    let ip: IpAddr = "203.0.113.9".parse().unwrap();
    let opts = MigrateOptions {
        target_ip: Some(ip),
        tls_mode: Some(TlsMode::Full),
        skip_confirm: true,
        update_nameservers: None,
    };

    let outcome = engine.migrate("example.com", &opts).await.unwrap();

    assert_eq!(outcome.disposition, MigrationDisposition::Completed);
    assert_eq!(outcome.status, MigrationStatus::SslConfigured);
    assert_eq!(outcome.completed_phases.len(), 4);
    assert!(outcome.error.is_none());

    // Baseline records: apex and www A records at the target IP
    let records = provider.records();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.record_type == RecordType::A));
    assert!(records.iter().all(|r| r.content == "203.0.113.9"));
    assert!(records.iter().any(|r| r.name == "example.com"));
    assert!(records.iter().any(|r| r.name == "www.example.com"));

    assert_eq!(provider.tls_mode(), Some(TlsMode::Full));

    // The registrar now points at the provider's nameservers
    assert_eq!(
        registrar.current_nameservers(),
        vec![
            "ada.ns.cloudflare-test.com".to_string(),
            "bob.ns.cloudflare-test.com".to_string(),
        ]
    );

    let record = engine.store().get("example.com").await.unwrap().unwrap();
    assert!(record.zone_id.is_some());
    assert_eq!(record.assigned_nameservers.len(), 2);
    assert_eq!(
        record.original_nameservers.as_deref(),
        Some(
            &[
                "ns1.registrar-parking.net".to_string(),
                "ns2.registrar-parking.net".to_string(),
            ][..]
        )
    );
    assert!(record.ns_updated_at.is_some());
    assert!(record.last_error.is_none());
}

#[tokio::test]
async fn migration_without_target_ip_provisions_apex_cnames() {
    let provider = MockProvider::new();
    let engine = build_engine(
        MockRegistrar::new(),
        provider.clone(),
        CountingStore::new(),
        ScriptedGate::approving(),
        fast_engine_config(),
    );

    let outcome = engine
        .migrate("example.com", &MigrateOptions::default())
        .await
        .unwrap();

    assert_eq!(outcome.status, MigrationStatus::SslConfigured);

    let records = provider.records();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.record_type == RecordType::Cname));
    assert!(records.iter().all(|r| r.content == "example.com"));

    // No explicit TLS mode falls back to the flexible default
    assert_eq!(provider.tls_mode(), Some(TlsMode::Flexible));
}

#[tokio::test]
async fn migration_halts_before_cutover_when_ns_updates_disabled() {
    let registrar = MockRegistrar::new();
    let mut config = fast_engine_config();
    config.auto_update_nameservers = false;

    let engine = build_engine(
        registrar.clone(),
        MockProvider::new(),
        CountingStore::new(),
        ScriptedGate::approving(),
        config,
    );

    let outcome = engine
        .migrate("example.com", &MigrateOptions::default())
        .await
        .unwrap();

    assert_eq!(outcome.disposition, MigrationDisposition::Halted);
    assert_eq!(outcome.status, MigrationStatus::AddedToProvider);
    assert_eq!(registrar.set_calls(), 0);

    // A per-invocation override runs the cutover anyway
    let opts = MigrateOptions {
        update_nameservers: Some(true),
        ..MigrateOptions::default()
    };
    let outcome = engine.migrate("example.com", &opts).await.unwrap();
    assert_eq!(outcome.status, MigrationStatus::SslConfigured);
    assert_eq!(registrar.set_calls(), 1);
}

#[tokio::test]
async fn declined_confirmation_halts_without_touching_the_registrar() {
    let registrar = MockRegistrar::new();
    let gate = ScriptedGate::denying();
    let mut config = fast_engine_config();
    config.confirm_ns_update = true;

    let engine = build_engine(
        registrar.clone(),
        MockProvider::new(),
        CountingStore::new(),
        gate.clone(),
        config,
    );

    let outcome = engine
        .migrate("example.com", &MigrateOptions::default())
        .await
        .unwrap();

    assert_eq!(outcome.disposition, MigrationDisposition::Halted);
    assert_eq!(outcome.status, MigrationStatus::AddedToProvider);
    assert!(outcome.error.is_none());
    assert_eq!(gate.calls(), 1);
    assert_eq!(registrar.set_calls(), 0);
    assert_eq!(
        registrar.current_nameservers(),
        vec![
            "ns1.registrar-parking.net".to_string(),
            "ns2.registrar-parking.net".to_string(),
        ]
    );
}

#[tokio::test]
async fn skip_confirm_bypasses_the_gate() {
    let gate = ScriptedGate::denying();
    let mut config = fast_engine_config();
    config.confirm_ns_update = true;

    let engine = build_engine(
        MockRegistrar::new(),
        MockProvider::new(),
        CountingStore::new(),
        gate.clone(),
        config,
    );

    let opts = MigrateOptions {
        skip_confirm: true,
        ..MigrateOptions::default()
    };
    let outcome = engine.migrate("example.com", &opts).await.unwrap();

    assert_eq!(outcome.status, MigrationStatus::SslConfigured);
    assert_eq!(gate.calls(), 0);
}

#[tokio::test]
async fn migrating_a_finished_domain_is_a_noop() {
    let provider = MockProvider::new();
    let engine = build_engine(
        MockRegistrar::new(),
        provider.clone(),
        CountingStore::new(),
        ScriptedGate::approving(),
        fast_engine_config(),
    );

    engine
        .migrate("example.com", &MigrateOptions::default())
        .await
        .unwrap();
    assert_eq!(provider.ensure_zone_calls(), 1);

    let outcome = engine
        .migrate("example.com", &MigrateOptions::default())
        .await
        .unwrap();

    assert_eq!(outcome.disposition, MigrationDisposition::Completed);
    assert!(outcome.completed_phases.is_empty());
    assert_eq!(provider.ensure_zone_calls(), 1);
}

#[tokio::test]
async fn migration_status_reports_per_phase_progress() {
    let mut config = fast_engine_config();
    config.auto_update_nameservers = false;
    let engine = build_engine(
        MockRegistrar::new(),
        MockProvider::new(),
        CountingStore::new(),
        ScriptedGate::approving(),
        config,
    );

    engine
        .migrate("example.com", &MigrateOptions::default())
        .await
        .unwrap();

    let report = engine.migration_status("example.com").await.unwrap();
    assert_eq!(report.record.status, MigrationStatus::AddedToProvider);

    let done: Vec<bool> = report.phases.iter().map(|(_, d)| *d).collect();
    assert_eq!(done, vec![true, false, false, false]);
}

#[tokio::test]
async fn zone_details_reflect_the_provisioned_zone() {
    let engine = build_engine(
        MockRegistrar::new(),
        MockProvider::new(),
        CountingStore::new(),
        ScriptedGate::approving(),
        fast_engine_config(),
    );

    // Before any zone exists there is nothing to inspect
    let err = engine.zone_details("example.com").await.unwrap_err();
    assert!(matches!(err, dnsmigrate_core::Error::NotFound(_)));

    let opts = MigrateOptions {
        tls_mode: Some(TlsMode::Strict),
        ..MigrateOptions::default()
    };
    engine.migrate("example.com", &opts).await.unwrap();

    let details = engine.zone_details("example.com").await.unwrap();
    assert!(!details.zone_id.is_empty());
    assert_eq!(details.tls_mode, TlsMode::Strict);
    assert_eq!(details.records.len(), 2);
    assert!(details.records.iter().all(|r| r.record_type == "CNAME"));
}

#[tokio::test]
async fn domain_names_are_normalized_before_tracking() {
    let engine = build_engine(
        MockRegistrar::new(),
        MockProvider::new(),
        CountingStore::new(),
        ScriptedGate::approving(),
        fast_engine_config(),
    );

    engine
        .migrate("HTTPS://Example.COM/", &MigrateOptions::default())
        .await
        .unwrap();

    assert!(engine.store().get("example.com").await.unwrap().is_some());

    // And garbage is rejected before anything is tracked
    let result = engine
        .migrate("not a domain", &MigrateOptions::default())
        .await;
    assert!(result.is_err());
    assert_eq!(engine.list_domains().await.unwrap().len(), 1);
}
