//! End-to-end workflows over a vault.

use clientvault_core::{
    AuthError, AuthService, Bucket, CoreError, CustomFieldValue, EntityType, FieldType,
    NewCustomField, OrderItem, TopClient, Vault,
};
use clientvault_storage::{FileStore, KeyValueStore, FILE_EXTENSION};
use clientvault_testkit::prelude::*;
use serde_json::json;

#[test]
fn dashboard_ranks_clients_by_revenue() {
    with_temp_vault(|vault| {
        scenarios::two_clients_three_orders(vault);

        let stats = vault.dashboard_stats().unwrap();
        assert_eq!(stats.total_clients, 2);
        assert_eq!(stats.total_orders, 3);
        assert_eq!(stats.total_revenue, 180.0);
        assert_eq!(stats.pending_orders, 3);
        assert_eq!(
            stats.top_clients,
            vec![
                TopClient {
                    name: "A".into(),
                    orders: 2,
                    revenue: 150.0
                },
                TopClient {
                    name: "B".into(),
                    orders: 1,
                    revenue: 30.0
                },
            ]
        );
    });
}

#[test]
fn deleted_client_drops_out_of_ranking() {
    with_temp_vault(|vault| {
        let (a, _, _) = scenarios::two_clients_three_orders(vault);
        vault.delete_client(&a.id).unwrap();

        let stats = vault.dashboard_stats().unwrap();
        assert_eq!(stats.total_revenue, 180.0);
        assert_eq!(stats.top_clients.len(), 1);
        assert_eq!(stats.top_clients[0].name, "B");
    });
}

#[test]
fn order_total_comes_from_items() {
    with_temp_vault(|vault| {
        let client = vault.create_client(sample_client("Acme")).unwrap();
        let mut input = sample_order(&client.id, 0.0);
        input.items = vec![OrderItem::new("Widget", 2, 10.0), OrderItem::new("Bolt", 1, 5.0)];
        let mut order = vault.create_order(input).unwrap();
        assert_eq!(order.total, 25.0);

        order.total = 1.0;
        vault.update_order(order.clone()).unwrap();
        assert_eq!(vault.orders().find(&order.id).unwrap().unwrap().total, 25.0);
    });
}

#[test]
fn export_import_round_trip() {
    let source = scenarios::populated_vault(4);
    scenarios::one_field_of_each_type(&source, EntityType::Client);
    let before = source.export_all().unwrap();

    source.import_all(&before).unwrap();
    assert_eq!(source.export_all().unwrap(), before);

    let target = TestVault::file();
    target.import_json(&source.export_json().unwrap()).unwrap();
    assert_eq!(target.reopen().export_all().unwrap(), before);
}

#[test]
fn import_missing_orders_leaves_data_untouched() {
    let vault = scenarios::populated_vault(2);
    let before = vault.export_all().unwrap();

    let text = json!({"clients": [], "customFields": []}).to_string();
    let err = vault.import_json(&text).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(vault.export_all().unwrap(), before);
}

#[test]
fn undecodable_bucket_reads_empty() {
    with_temp_vault(|vault| {
        vault.create_client(sample_client("Acme")).unwrap();
        vault.buckets().write_raw(Bucket::Clients, "not an envelope").unwrap();

        assert!(vault.clients().all().unwrap().is_empty());
        assert!(vault.search_clients("").unwrap().is_empty());
        assert_eq!(vault.dashboard_stats().unwrap().total_clients, 0);
    });
}

#[test]
fn tampered_file_reads_empty() {
    with_file_vault(|vault, dir| {
        vault.create_client(sample_client("Acme")).unwrap();

        let path = dir.join(format!("clients.{FILE_EXTENSION}"));
        let mut text = std::fs::read_to_string(&path).unwrap();
        text.insert(10, '!');
        std::fs::write(&path, text).unwrap();

        assert!(vault.clients().all().unwrap().is_empty());
    });
}

#[test]
fn stored_files_are_not_plaintext() {
    with_file_vault(|vault, dir| {
        vault.create_client(sample_client("Acme")).unwrap();

        let store = FileStore::open(dir).unwrap();
        let raw = store.read("clients").unwrap().unwrap();
        assert!(!raw.contains("Acme"));
        assert_eq!(store.keys().unwrap(), vec!["clients".to_string()]);
    });
}

#[test]
fn single_account_authentication() {
    let test_vault = TestVault::memory();
    let auth = AuthService::new(test_vault.vault.clone());

    auth.register("owner", "correct horse").unwrap();
    assert!(matches!(
        auth.register("owner", "again").unwrap_err(),
        CoreError::Auth(AuthError::AlreadyRegistered)
    ));

    auth.logout();
    assert!(matches!(
        auth.login("owner", "wrong").unwrap_err(),
        CoreError::Auth(AuthError::InvalidCredentials)
    ));
    auth.login("owner", "correct horse").unwrap();

    // Another process removes the account.
    test_vault.user().remove().unwrap();
    assert!(auth.refresh().unwrap().is_none());
    assert!(!auth.is_authenticated());
}

#[test]
fn reset_keeps_the_account() {
    let test_vault = scenarios::populated_vault(2);
    let auth = AuthService::new(test_vault.vault.clone());
    auth.register("owner", "pw").unwrap();

    test_vault.reset_all().unwrap();
    assert!(test_vault.export_all().unwrap().clients.is_empty());
    auth.logout();
    assert!(auth.login("owner", "pw").is_ok());
}

#[test]
fn legacy_bare_custom_values_are_read() {
    with_temp_vault(|vault| {
        let legacy = json!([{
            "id": "c1",
            "name": "Acme",
            "email": "ops@acme.test",
            "phone": "555",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z",
            "customFields": {"vip": true, "since": 2019, "tier": "gold", "gone": null}
        }]);
        vault.buckets().save(Bucket::Clients, &legacy).unwrap();

        let client = vault.clients().find(&"c1".into()).unwrap().unwrap();
        assert_eq!(client.custom_fields.len(), 3);
        assert_eq!(
            client.custom_fields.get("vip"),
            Some(&CustomFieldValue::Checkbox(true))
        );
        assert_eq!(
            client.custom_fields.get("since"),
            Some(&CustomFieldValue::Number(2019.0))
        );
        assert_eq!(
            client.custom_fields.get("tier"),
            Some(&CustomFieldValue::Text("gold".into()))
        );
    });
}

#[test]
fn legacy_record_can_be_saved_again() {
    let test_vault = TestVault::file();
    let since = test_vault
        .create_custom_field(NewCustomField::new("Since", FieldType::Number, EntityType::Client))
        .unwrap();
    let joined = test_vault
        .create_custom_field(NewCustomField::new("Joined", FieldType::Date, EntityType::Client))
        .unwrap();
    let budget = test_vault
        .create_custom_field(NewCustomField::new("Budget", FieldType::Number, EntityType::Client))
        .unwrap();
    let mut tier = NewCustomField::new("Tier", FieldType::Select, EntityType::Client);
    tier.required = true;
    tier.options = vec!["gold".into(), "silver".into()];
    let tier = test_vault.create_custom_field(tier).unwrap();

    // Older versions stored every form input as a bare string.
    let mut values = serde_json::Map::new();
    values.insert(since.id.to_string(), json!("2019"));
    values.insert(joined.id.to_string(), json!("2024-02-29"));
    values.insert(budget.id.to_string(), json!(""));
    values.insert(tier.id.to_string(), json!("gold"));
    let legacy = json!([{
        "id": "c1",
        "name": "Acme",
        "email": "ops@acme.test",
        "phone": "555",
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-01T00:00:00Z",
        "customFields": values
    }]);
    test_vault.buckets().save(Bucket::Clients, &legacy).unwrap();

    let mut client = test_vault.clients().find(&"c1".into()).unwrap().unwrap();
    client.notes = Some("renewed".into());
    assert!(test_vault.update_client(client).unwrap());

    let stored = test_vault
        .reopen()
        .clients()
        .find(&"c1".into())
        .unwrap()
        .unwrap();
    assert_eq!(stored.notes.as_deref(), Some("renewed"));
    assert_eq!(
        stored.custom_fields.get(&since.id),
        Some(&CustomFieldValue::Number(2019.0))
    );
    assert_eq!(
        stored.custom_fields.get(&joined.id),
        Some(&CustomFieldValue::Date(
            chrono::NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        ))
    );
    assert_eq!(
        stored.custom_fields.get(&tier.id),
        Some(&CustomFieldValue::Select("gold".into()))
    );
    assert!(stored.custom_fields.get(&budget.id).is_none());
}

#[test]
fn non_finite_numbers_never_reach_storage() {
    let test_vault = TestVault::file();
    let client = test_vault.create_client(sample_client("Existing")).unwrap();
    let order = test_vault.create_order(sample_order(&client.id, 10.0)).unwrap();

    let mut input = sample_client("Acme");
    input
        .custom_fields
        .insert("no-such-field".into(), CustomFieldValue::Number(f64::NAN));
    assert!(test_vault.create_client(input).unwrap_err().is_validation());

    let mut huge = sample_order(&client.id, 0.0);
    huge.items = vec![OrderItem::new("Huge", 2, 1e308)];
    assert!(test_vault.create_order(huge).unwrap_err().is_validation());

    let reopened = test_vault.reopen();
    assert_eq!(reopened.clients().all().unwrap(), vec![client]);
    assert_eq!(reopened.orders().all().unwrap(), vec![order]);
}

#[test]
fn custom_values_are_validated_against_definitions() {
    with_temp_vault(|vault| {
        let mut input = NewCustomField::new("Budget", FieldType::Number, EntityType::Order);
        input.required = true;
        let budget = vault.create_custom_field(input).unwrap();
        let client = vault.create_client(sample_client("Acme")).unwrap();

        let mut order = sample_order(&client.id, 5.0);
        order
            .custom_fields
            .insert(budget.id.clone(), CustomFieldValue::Text("lots".into()));
        assert!(vault.create_order(order.clone()).unwrap_err().is_validation());

        order
            .custom_fields
            .insert(budget.id, CustomFieldValue::Number(1200.0));
        assert!(vault.create_order(order).is_ok());
    });
}

#[test]
fn clones_see_each_others_writes() {
    let test_vault = TestVault::memory();
    let other: Vault = test_vault.vault.clone();

    other.create_client(sample_client("Acme")).unwrap();
    assert_eq!(test_vault.clients().count().unwrap(), 1);
}
