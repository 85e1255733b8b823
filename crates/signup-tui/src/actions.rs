use signup_core::{Field, OrderField, OrderRowId};
use tracing::debug;

use crate::app::{App, Focus};
use crate::submissions::Submissions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Submit,
    AddOrder,
    RemoveOrder(OrderRowId),
}

pub fn execute_action(app: &mut App, submissions: &mut Submissions, action: Action) {
    match action {
        Action::Submit => match app.form.submit(submissions) {
            Ok(()) => {
                if let Some(input) = submissions.items().last() {
                    app.set_status(format!("Submitted {}", input.name));
                }
                app.form.reset();
                app.focus = Focus::Field(Field::Name);
                app.clear_error();
            }
            Err(errors) => {
                debug!(count = errors.len(), "submit blocked by validation errors");
                app.set_error(format!("{} field(s) need attention", errors.len()));
            }
        },
        Action::AddOrder => {
            let id = app.form.add_order();
            app.focus = Focus::Order(id, OrderField::Title);
            app.set_status(format!("Added order {}", app.form.orders().len()));
        }
        Action::RemoveOrder(id) => {
            let Some(index) = app.form.orders().position(id) else {
                return;
            };
            if app.form.remove_order(index).is_none() {
                return;
            }
            let rows = app.form.orders();
            app.focus = rows
                .get(index)
                .or_else(|| index.checked_sub(1).and_then(|prev| rows.get(prev)))
                .map(|row| Focus::Order(row.id, OrderField::Title))
                .unwrap_or(Focus::AddOrder);
            app.set_status(format!("Removed order {}", index + 1));
        }
    }
}
