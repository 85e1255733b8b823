use crate::domain::{FieldPath, OrderRowId, PathSegment, UserCreationInput, UserDraft};
use crate::error::{FieldError, RuleViolation, ValidationErrors};
use crate::form::rows::{OrderRow, OrderRows};
use crate::rules::validate;

/// Receives the normalized input after a successful submit.
pub trait SubmitHandler {
    fn submit(&mut self, input: UserCreationInput);
}

impl<F> SubmitHandler for F
where
    F: FnMut(UserCreationInput),
{
    fn submit(&mut self, input: UserCreationInput) {
        self(input)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Password,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Password];

    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Password => "password",
        }
    }

    pub fn path(self) -> FieldPath {
        FieldPath::new().key(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderField {
    Title,
    Total,
}

impl OrderField {
    pub fn key(self) -> &'static str {
        match self {
            OrderField::Title => "title",
            OrderField::Total => "total",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        match key {
            "title" => Some(OrderField::Title),
            "total" => Some(OrderField::Total),
            _ => None,
        }
    }
}

const ORDERS_KEY: &str = "orders";

// Row errors are keyed by row identity, never by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorSlot {
    Field(Field),
    Orders,
    Row(OrderRowId, OrderField),
}

#[derive(Debug, Clone)]
struct SlotError {
    slot: ErrorSlot,
    kind: RuleViolation,
    message: String,
}

/// Editable form state: the three text fields, the order rows, and the
/// errors from the latest validation.
#[derive(Debug, Clone)]
pub struct FormModel {
    pub name: String,
    pub email: String,
    pub password: String,
    orders: OrderRows,
    initial_rows: usize,
    submitted: bool,
    errors: Vec<SlotError>,
}

impl Default for FormModel {
    fn default() -> Self {
        Self::new()
    }
}

impl FormModel {
    pub fn new() -> Self {
        Self::with_rows(0)
    }

    /// A blank form that opens with `rows` default order rows.
    pub fn with_rows(rows: usize) -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            password: String::new(),
            orders: OrderRows::with_blank_rows(rows),
            initial_rows: rows,
            submitted: false,
            errors: Vec::new(),
        }
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Password => &self.password,
        }
    }

    pub fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
        }
    }

    pub fn orders(&self) -> &OrderRows {
        &self.orders
    }

    pub fn order_mut(&mut self, index: usize) -> Option<&mut OrderRow> {
        self.orders.get_mut(index)
    }

    pub fn order_field_mut(&mut self, index: usize, field: OrderField) -> Option<&mut String> {
        let row = self.orders.get_mut(index)?;
        Some(match field {
            OrderField::Title => &mut row.title,
            OrderField::Total => &mut row.total,
        })
    }

    pub fn add_order(&mut self) -> OrderRowId {
        let id = self.orders.add_row();
        self.refresh_orders_error();
        id
    }

    /// Removes the row at `index` together with its errors. Other rows keep
    /// their values and messages.
    pub fn remove_order(&mut self, index: usize) -> Option<OrderRow> {
        let removed = self.orders.remove_row(index)?;
        self.errors
            .retain(|error| !matches!(error.slot, ErrorSlot::Row(id, _) if id == removed.id));
        self.refresh_orders_error();
        Some(removed)
    }

    pub fn draft(&self) -> UserDraft {
        UserDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            orders: self.orders.to_drafts(),
        }
    }

    /// Validates the current draft. On success the handler is called once
    /// with the normalized input and stored errors are cleared; on failure
    /// the handler is not called and the errors are kept for display.
    pub fn submit<H>(&mut self, handler: &mut H) -> Result<(), ValidationErrors>
    where
        H: SubmitHandler + ?Sized,
    {
        self.submitted = true;
        match validate(&self.draft()) {
            Ok(input) => {
                self.errors.clear();
                handler.submit(input);
                Ok(())
            }
            Err(errors) => {
                self.store_errors(&errors);
                Err(errors)
            }
        }
    }

    /// Refreshes displayed errors after an edit, once a submit has been
    /// attempted. Never calls a handler.
    pub fn revalidate(&mut self) {
        if !self.submitted {
            return;
        }
        match validate(&self.draft()) {
            Ok(_) => self.errors.clear(),
            Err(errors) => self.store_errors(&errors),
        }
    }

    pub fn has_submitted(&self) -> bool {
        self.submitted
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn field_error(&self, field: Field) -> Option<&str> {
        self.slot_message(ErrorSlot::Field(field))
    }

    /// List-level error for the orders field, e.g. an empty list.
    pub fn orders_error(&self) -> Option<&str> {
        self.slot_message(ErrorSlot::Orders)
    }

    pub fn row_error(&self, id: OrderRowId, field: OrderField) -> Option<&str> {
        self.slot_message(ErrorSlot::Row(id, field))
    }

    pub fn error_at(&self, path: &FieldPath) -> Option<&str> {
        let slot = self.slot_for(path)?;
        self.slot_message(slot)
    }

    /// Current errors addressed by present row positions.
    pub fn errors(&self) -> ValidationErrors {
        let mut out = ValidationErrors::new();
        for error in &self.errors {
            if let Some(path) = self.path_for(error.slot) {
                out.push(FieldError::new(path, error.kind, error.message.clone()));
            }
        }
        out
    }

    /// Discards the draft and errors, reopening with the initial rows.
    pub fn reset(&mut self) {
        *self = Self::with_rows(self.initial_rows);
    }

    fn store_errors(&mut self, errors: &ValidationErrors) {
        self.errors = errors
            .iter()
            .filter_map(|error| {
                let slot = self.slot_for(&error.path)?;
                Some(SlotError {
                    slot,
                    kind: error.kind,
                    message: error.message.clone(),
                })
            })
            .collect();
    }

    // Only the list-level entry is recomputed; row messages stay as they were.
    fn refresh_orders_error(&mut self) {
        if !self.submitted {
            return;
        }
        self.errors.retain(|error| error.slot != ErrorSlot::Orders);
        let Err(errors) = validate(&self.draft()) else {
            return;
        };
        let Some(error) = errors.get(&FieldPath::new().key(ORDERS_KEY)) else {
            return;
        };
        let at = self
            .errors
            .iter()
            .position(|existing| matches!(existing.slot, ErrorSlot::Row(..)))
            .unwrap_or(self.errors.len());
        self.errors.insert(
            at,
            SlotError {
                slot: ErrorSlot::Orders,
                kind: error.kind,
                message: error.message.clone(),
            },
        );
    }

    fn slot_message(&self, slot: ErrorSlot) -> Option<&str> {
        self.errors
            .iter()
            .find(|error| error.slot == slot)
            .map(|error| error.message.as_str())
    }

    fn slot_for(&self, path: &FieldPath) -> Option<ErrorSlot> {
        match path.segments() {
            [PathSegment::Key(key)] if key == ORDERS_KEY => Some(ErrorSlot::Orders),
            [PathSegment::Key(key)] => Field::ALL
                .into_iter()
                .find(|field| field.key() == key)
                .map(ErrorSlot::Field),
            [PathSegment::Key(key), PathSegment::Index(index), PathSegment::Key(field)]
                if key == ORDERS_KEY =>
            {
                let row = self.orders.get(*index)?;
                let field = OrderField::from_key(field)?;
                Some(ErrorSlot::Row(row.id, field))
            }
            _ => None,
        }
    }

    fn path_for(&self, slot: ErrorSlot) -> Option<FieldPath> {
        match slot {
            ErrorSlot::Field(field) => Some(field.path()),
            ErrorSlot::Orders => Some(FieldPath::new().key(ORDERS_KEY)),
            ErrorSlot::Row(id, field) => {
                let index = self.orders.position(id)?;
                Some(
                    FieldPath::new()
                        .key(ORDERS_KEY)
                        .index(index)
                        .key(field.key()),
                )
            }
        }
    }
}
