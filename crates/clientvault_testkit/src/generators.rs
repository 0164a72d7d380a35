//! Property-based test generators using proptest.
//!
//! Provides strategies for generating random records that survive a JSON
//! round trip exactly: money comes from integer cents and timestamps from
//! whole seconds plus nanoseconds.

use chrono::{DateTime, NaiveDate, Utc};
use clientvault_core::{
    Client, CustomField, CustomFieldValue, CustomValues, EntityType, FieldType, Order, OrderItem,
    OrderStatus, RecordId, User,
};
use proptest::prelude::*;

/// Strategy for generating record IDs.
pub fn record_id_strategy() -> impl Strategy<Value = RecordId> {
    "[a-z0-9]{1,8}(-[a-z0-9]{1,8}){0,2}".prop_map(RecordId::from)
}

/// Strategy for generating UTC timestamps between 2000 and 2100.
pub fn timestamp_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (946_684_800i64..4_102_444_800, 0u32..1_000_000_000).prop_map(|(secs, nanos)| {
        DateTime::from_timestamp(secs, nanos).expect("timestamp in range")
    })
}

/// Strategy for generating prices from whole cents.
pub fn price_strategy() -> impl Strategy<Value = f64> {
    (0u32..10_000_000).prop_map(|cents| f64::from(cents) / 100.0)
}

fn text_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 .,'-]{1,24}"
}

fn optional_text() -> impl Strategy<Value = Option<String>> {
    prop::option::of(text_strategy())
}

/// Strategy for generating field types.
pub fn field_type_strategy() -> impl Strategy<Value = FieldType> {
    prop::sample::select(FieldType::ALL.to_vec())
}

/// Strategy for generating order statuses.
pub fn order_status_strategy() -> impl Strategy<Value = OrderStatus> {
    prop::sample::select(OrderStatus::ALL.to_vec())
}

/// Strategy for generating entity types.
pub fn entity_type_strategy() -> impl Strategy<Value = EntityType> {
    prop_oneof![Just(EntityType::Client), Just(EntityType::Order)]
}

/// Strategy for generating custom values of every type.
pub fn custom_value_strategy() -> impl Strategy<Value = CustomFieldValue> {
    prop_oneof![
        text_strategy().prop_map(CustomFieldValue::Text),
        (-1_000_000i64..1_000_000).prop_map(|n| CustomFieldValue::Number(n as f64 / 4.0)),
        (2000i32..2100, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| {
            CustomFieldValue::Date(NaiveDate::from_ymd_opt(y, m, d).expect("valid date"))
        }),
        "[a-z]{1,8}@[a-z]{1,8}\\.test".prop_map(CustomFieldValue::Email),
        "[0-9]{3}-[0-9]{4}".prop_map(CustomFieldValue::Phone),
        "[a-z]{1,8}".prop_map(CustomFieldValue::Select),
        any::<bool>().prop_map(CustomFieldValue::Checkbox),
    ]
}

/// Strategy for generating custom value maps.
pub fn custom_values_strategy() -> impl Strategy<Value = CustomValues> {
    prop::collection::btree_map(record_id_strategy(), custom_value_strategy(), 0..4)
}

/// Strategy for generating clients.
pub fn client_strategy() -> impl Strategy<Value = Client> {
    (
        (record_id_strategy(), text_strategy(), "[a-z]{1,8}@[a-z]{1,8}\\.test", "[0-9]{3}-[0-9]{4}"),
        (optional_text(), optional_text(), optional_text(), optional_text(), optional_text()),
        (timestamp_strategy(), timestamp_strategy(), custom_values_strategy()),
    )
        .prop_map(
            |(
                (id, name, email, phone),
                (address, city, state, zip_code, notes),
                (created_at, updated_at, custom_fields),
            )| Client {
                id,
                name,
                email,
                phone,
                address,
                city,
                state,
                zip_code,
                notes,
                created_at,
                updated_at,
                custom_fields,
            },
        )
}

/// Strategy for generating order lines.
pub fn order_item_strategy() -> impl Strategy<Value = OrderItem> {
    (record_id_strategy(), text_strategy(), 1u32..100, price_strategy(), optional_text()).prop_map(
        |(id, name, quantity, price, description)| OrderItem {
            id,
            name,
            quantity,
            price,
            description,
        },
    )
}

/// Strategy for generating orders whose total matches their items.
pub fn order_strategy() -> impl Strategy<Value = Order> {
    (
        (record_id_strategy(), record_id_strategy(), "ORD-[0-9]{6}", order_status_strategy()),
        prop::collection::vec(order_item_strategy(), 1..5),
        (optional_text(), timestamp_strategy(), timestamp_strategy(), custom_values_strategy()),
    )
        .prop_map(
            |((id, client_id, order_number, status), items, (notes, created_at, updated_at, custom_fields))| {
                let mut order = Order {
                    id,
                    client_id,
                    order_number,
                    status,
                    items,
                    total: 0.0,
                    notes,
                    created_at,
                    updated_at,
                    custom_fields,
                };
                order.recompute_total();
                order
            },
        )
}

/// Strategy for generating custom field definitions.
///
/// Select fields always carry options; other types never do.
pub fn custom_field_strategy() -> impl Strategy<Value = CustomField> {
    (
        record_id_strategy(),
        text_strategy(),
        field_type_strategy(),
        entity_type_strategy(),
        any::<bool>(),
        prop::collection::vec("[a-z]{1,8}", 1..4),
        optional_text(),
        timestamp_strategy(),
    )
        .prop_map(
            |(id, name, field_type, entity_type, required, options, description, created_at)| {
                CustomField {
                    id,
                    name,
                    field_type,
                    entity_type,
                    required,
                    options: (field_type == FieldType::Select).then_some(options),
                    description,
                    created_at,
                }
            },
        )
}

/// Strategy for generating users.
pub fn user_strategy() -> impl Strategy<Value = User> {
    (record_id_strategy(), "[a-z][a-z0-9_]{0,15}", "[0-9a-f]{64}", timestamp_strategy()).prop_map(
        |(id, username, password_hash, created_at)| User {
            id,
            username,
            password_hash,
            created_at,
        },
    )
}
