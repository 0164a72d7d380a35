//! Input checks applied before anything is written.
//!
//! Every function here returns [`CoreError::Validation`] on the first problem
//! found, so a rejected save never touches storage.

use crate::error::{CoreError, CoreResult};
use crate::model::{
    Client, CustomField, CustomFieldValue, CustomValues, EntityType, FieldType, Order, OrderItem,
};

/// Rejects empty or whitespace-only text.
///
/// # Errors
///
/// Returns a validation error naming `field`.
pub fn require_text(field: &str, value: &str) -> CoreResult<()> {
    if value.trim().is_empty() {
        return Err(CoreError::validation(format!("{field} is required")));
    }
    Ok(())
}

fn check_email(field: &str, value: &str) -> CoreResult<()> {
    if !value.contains('@') {
        return Err(CoreError::validation(format!(
            "{field} is not a valid email address: {value}"
        )));
    }
    Ok(())
}

/// Checks a client's built-in fields and custom values.
///
/// # Errors
///
/// Returns a validation error if name, email or phone is blank, the email has
/// no `@`, or a custom value is missing or mistyped.
pub fn validate_client(client: &Client, fields: &[CustomField]) -> CoreResult<()> {
    require_text("name", &client.name)?;
    require_text("email", &client.email)?;
    check_email("email", &client.email)?;
    require_text("phone", &client.phone)?;
    validate_custom_values(EntityType::Client, fields, &client.custom_fields)
}

/// Checks order lines.
///
/// # Errors
///
/// Returns a validation error if there are no lines, a line has a blank name,
/// a zero quantity, or a negative or non-finite price.
pub fn validate_items(items: &[OrderItem]) -> CoreResult<()> {
    if items.is_empty() {
        return Err(CoreError::validation("an order needs at least one item"));
    }
    for (index, item) in items.iter().enumerate() {
        let line = index + 1;
        if item.name.trim().is_empty() {
            return Err(CoreError::validation(format!(
                "item {line}: name cannot be empty"
            )));
        }
        if item.quantity < 1 {
            return Err(CoreError::validation(format!(
                "item {line}: quantity must be at least 1"
            )));
        }
        if !item.price.is_finite() || item.price < 0.0 {
            return Err(CoreError::validation(format!(
                "item {line}: price must be a non-negative number"
            )));
        }
    }
    Ok(())
}

/// Checks an order's client reference, lines and custom values.
///
/// The total is not checked here; save paths recompute it.
///
/// # Errors
///
/// Returns a validation error if the client ID or order number is blank, the
/// lines are invalid, or a custom value is missing or mistyped.
pub fn validate_order(order: &Order, fields: &[CustomField]) -> CoreResult<()> {
    if order.client_id.is_blank() {
        return Err(CoreError::validation("please select a client"));
    }
    require_text("order number", &order.order_number)?;
    validate_items(&order.items)?;
    validate_custom_values(EntityType::Order, fields, &order.custom_fields)
}

/// Trims select options and drops blank ones; clears options on non-select
/// fields.
pub fn normalize_options(field: &mut CustomField) {
    if field.field_type != FieldType::Select {
        field.options = None;
        return;
    }
    let options: Vec<String> = field
        .options
        .take()
        .unwrap_or_default()
        .into_iter()
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect();
    field.options = Some(options);
}

/// Checks a custom field definition.
///
/// # Errors
///
/// Returns a validation error if the name is blank or a select field has no
/// options.
pub fn validate_custom_field(field: &CustomField) -> CoreResult<()> {
    require_text("field name", &field.name)?;
    if field.field_type == FieldType::Select && field.options().is_empty() {
        return Err(CoreError::validation(
            "select fields need at least one option",
        ));
    }
    Ok(())
}

/// Checks one value against its field definition.
///
/// # Errors
///
/// Returns a validation error if the value's type differs from the field's,
/// a select value is not an option, or an email value has no `@`.
pub fn validate_value(field: &CustomField, value: &CustomFieldValue) -> CoreResult<()> {
    if value.field_type() != field.field_type {
        return Err(CoreError::validation(format!(
            "{}: expected a {} value, got {}",
            field.name,
            field.field_type,
            value.field_type()
        )));
    }
    match value {
        CustomFieldValue::Select(choice) if !choice.trim().is_empty() => {
            if !field.options().iter().any(|o| o == choice) {
                return Err(CoreError::validation(format!(
                    "{}: {choice:?} is not one of the options",
                    field.name
                )));
            }
        }
        CustomFieldValue::Email(address) if !address.trim().is_empty() => {
            check_email(&field.name, address)?;
        }
        CustomFieldValue::Number(n) if !n.is_finite() => {
            return Err(CoreError::validation(format!(
                "{}: number must be finite",
                field.name
            )));
        }
        _ => {}
    }
    Ok(())
}

/// Brings legacy values in line with the current definitions for `entity`.
///
/// Text stored under a non-text field is converted with
/// [`CustomFieldValue::coerce_to`], and blank text there is dropped as if it
/// had never been entered. Values under unknown field IDs are not touched.
pub fn normalize_custom_values(
    entity: EntityType,
    fields: &[CustomField],
    values: &mut CustomValues,
) {
    for field in fields.iter().filter(|f| f.applies_to(entity)) {
        if field.field_type == FieldType::Text {
            continue;
        }
        let Some(value) = values.remove(&field.id) else {
            continue;
        };
        if matches!(&value, CustomFieldValue::Text(s) if s.trim().is_empty()) {
            continue;
        }
        values.insert(field.id.clone(), value.coerce_to(field.field_type));
    }
}

/// Checks a record's custom values against the definitions for `entity`.
///
/// Values keyed by unknown field IDs are left alone; they belong to fields
/// that have since been deleted. Every number must still be finite, whatever
/// its key, since a non-finite number cannot be stored.
///
/// # Errors
///
/// Returns a validation error if any number is non-finite, a required field
/// has no value (or a blank one) or a present value fails [`validate_value`].
pub fn validate_custom_values(
    entity: EntityType,
    fields: &[CustomField],
    values: &CustomValues,
) -> CoreResult<()> {
    for (id, value) in values {
        if let CustomFieldValue::Number(n) = value {
            if !n.is_finite() {
                return Err(CoreError::validation(format!(
                    "custom field {id}: number must be finite"
                )));
            }
        }
    }
    for field in fields.iter().filter(|f| f.applies_to(entity)) {
        match values.get(&field.id) {
            Some(value) => {
                if field.required && value.is_blank() {
                    return Err(CoreError::validation(format!("{} is required", field.name)));
                }
                validate_value(field, value)?;
            }
            None if field.required => {
                return Err(CoreError::validation(format!("{} is required", field.name)));
            }
            None => {}
        }
    }
    Ok(())
}
