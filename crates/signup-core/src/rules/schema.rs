use crate::domain::{FieldPath, OrderDraft, OrderInput, UserCreationInput, UserDraft};
use crate::error::{FieldError, RuleViolation, ValidationErrors};
use crate::rules::normalize::{coerce_number, is_valid_email, lowercase_email, title_case};

pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MIN_ORDER_COUNT: usize = 1;
pub const MIN_ORDER_TOTAL: f64 = 1.0;
pub const MAX_ORDER_TOTAL: f64 = 100.0;

/// Validates a draft and, only when every rule passes, returns the
/// normalized input. All violations across all fields are collected.
pub fn validate(draft: &UserDraft) -> Result<UserCreationInput, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = validate_name(&draft.name, &mut errors);
    let email = validate_email(&draft.email, &mut errors);
    validate_password(&draft.password, &mut errors);
    let orders = validate_orders(&draft.orders, &mut errors);

    if !errors.is_empty() {
        return Err(errors);
    }

    match (name, email) {
        (Some(name), Some(email)) => Ok(UserCreationInput {
            name,
            email,
            password: draft.password.clone(),
            orders,
        }),
        _ => Err(errors),
    }
}

fn validate_name(raw: &str, errors: &mut ValidationErrors) -> Option<String> {
    if raw.trim().is_empty() {
        errors.push(FieldError::new(
            FieldPath::new().key("name"),
            RuleViolation::Required,
            "Field name is required",
        ));
        return None;
    }
    Some(title_case(raw))
}

fn validate_email(raw: &str, errors: &mut ValidationErrors) -> Option<String> {
    let path = FieldPath::new().key("email");
    if raw.is_empty() {
        errors.push(FieldError::new(
            path,
            RuleViolation::Required,
            "Field e-mail is required",
        ));
        return None;
    }
    if !is_valid_email(raw) {
        errors.push(FieldError::new(
            path,
            RuleViolation::Format,
            "Invalid e-mail format",
        ));
        return None;
    }
    Some(lowercase_email(raw))
}

// Length is measured in UTF-16 code units, as browser form inputs count it.
fn validate_password(raw: &str, errors: &mut ValidationErrors) {
    if raw.encode_utf16().count() < MIN_PASSWORD_LENGTH {
        errors.push(FieldError::new(
            FieldPath::new().key("password"),
            RuleViolation::Length {
                min: MIN_PASSWORD_LENGTH,
            },
            format!(
                "Password should have at least {} characters",
                MIN_PASSWORD_LENGTH
            ),
        ));
    }
}

fn validate_orders(drafts: &[OrderDraft], errors: &mut ValidationErrors) -> Vec<OrderInput> {
    if drafts.len() < MIN_ORDER_COUNT {
        errors.push(FieldError::new(
            FieldPath::new().key("orders"),
            RuleViolation::MinCount {
                min: MIN_ORDER_COUNT,
            },
            "Add at least one order",
        ));
        return Vec::new();
    }

    let mut orders = Vec::with_capacity(drafts.len());
    for (index, draft) in drafts.iter().enumerate() {
        let row = FieldPath::new().key("orders").index(index);
        let title = validate_order_title(&draft.title, row.clone().key("title"), errors);
        let total = validate_order_total(&draft.total, row.key("total"), errors);
        if let (Some(title), Some(total)) = (title, total) {
            orders.push(OrderInput { title, total });
        }
    }
    orders
}

fn validate_order_title(
    raw: &str,
    path: FieldPath,
    errors: &mut ValidationErrors,
) -> Option<String> {
    if raw.is_empty() {
        errors.push(FieldError::new(path, RuleViolation::Required, "Field is required"));
        return None;
    }
    Some(raw.to_string())
}

fn validate_order_total(raw: &str, path: FieldPath, errors: &mut ValidationErrors) -> Option<f64> {
    let Some(total) = coerce_number(raw) else {
        errors.push(FieldError::new(
            path,
            RuleViolation::Type,
            "Expected number, received nan",
        ));
        return None;
    };
    let range = RuleViolation::Range {
        min: MIN_ORDER_TOTAL,
        max: MAX_ORDER_TOTAL,
    };
    if total < MIN_ORDER_TOTAL {
        errors.push(FieldError::new(
            path,
            range,
            format!("Number must be greater than or equal to {}", MIN_ORDER_TOTAL),
        ));
        return None;
    }
    if total > MAX_ORDER_TOTAL {
        errors.push(FieldError::new(
            path,
            range,
            format!("Number must be less than or equal to {}", MAX_ORDER_TOTAL),
        ));
        return None;
    }
    Some(total)
}
