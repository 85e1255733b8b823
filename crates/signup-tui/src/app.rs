use std::collections::VecDeque;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use signup_core::{Field, FormModel, OrderField, OrderRowId};

use crate::actions::Action;
use crate::util::apply_text_input;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(Field),
    AddOrder,
    Order(OrderRowId, OrderField),
    Save,
}

#[derive(Debug, Clone)]
pub struct App {
    pub form: FormModel,
    pub focus: Focus,
    pub mask_password: bool,
    pub show_help: bool,
    pub should_quit: bool,
    pub status: Option<String>,
    pub error: Option<String>,
    actions: VecDeque<Action>,
}

impl App {
    pub fn new(initial_order_rows: usize, mask_password: bool) -> Self {
        Self {
            form: FormModel::with_rows(initial_order_rows),
            focus: Focus::Field(Field::Name),
            mask_password,
            show_help: false,
            should_quit: false,
            status: None,
            error: None,
            actions: VecDeque::new(),
        }
    }

    pub fn enqueue(&mut self, action: Action) {
        self.actions.push_back(action);
    }

    pub fn next_action(&mut self) -> Option<Action> {
        self.actions.pop_front()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    /// Focus stops in render order: the three fields, the add button, each
    /// order row's title and total, then save.
    pub fn focus_targets(&self) -> Vec<Focus> {
        let mut targets: Vec<Focus> = Field::ALL.into_iter().map(Focus::Field).collect();
        targets.push(Focus::AddOrder);
        for row in self.form.orders() {
            targets.push(Focus::Order(row.id, OrderField::Title));
            targets.push(Focus::Order(row.id, OrderField::Total));
        }
        targets.push(Focus::Save);
        targets
    }

    pub fn focus_next(&mut self) {
        self.move_focus(1);
    }

    pub fn focus_prev(&mut self) {
        self.move_focus(-1);
    }

    fn move_focus(&mut self, delta: isize) {
        let targets = self.focus_targets();
        let len = targets.len() as isize;
        let current = targets
            .iter()
            .position(|target| *target == self.focus)
            .unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len);
        self.focus = targets[next as usize];
    }

    /// Row index of the focused order row, if an order input has focus.
    pub fn focused_order_index(&self) -> Option<usize> {
        match self.focus {
            Focus::Order(id, _) => self.form.orders().position(id),
            _ => None,
        }
    }

    fn active_input_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Focus::Field(field) => Some(self.form.field_mut(field)),
            Focus::Order(id, field) => {
                let index = self.form.orders().position(id)?;
                self.form.order_field_mut(index, field)
            }
            Focus::AddOrder | Focus::Save => None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press && key.kind != KeyEventKind::Repeat {
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::F(1) | KeyCode::Esc) {
                self.show_help = false;
            }
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Esc => self.should_quit = true,
            KeyCode::F(1) => self.show_help = true,
            KeyCode::Char('s') if ctrl => self.enqueue(Action::Submit),
            KeyCode::Char('a') if ctrl => self.enqueue(Action::AddOrder),
            KeyCode::Char('d') if ctrl => {
                if let Focus::Order(id, _) = self.focus {
                    self.enqueue(Action::RemoveOrder(id));
                }
            }
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_prev(),
            KeyCode::Enter => match self.focus {
                Focus::AddOrder => self.enqueue(Action::AddOrder),
                Focus::Save => self.enqueue(Action::Submit),
                _ => self.focus_next(),
            },
            _ => {
                let changed = self
                    .active_input_mut()
                    .map(|target| apply_text_input(target, key))
                    .unwrap_or(false);
                if changed {
                    self.form.revalidate();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{App, Focus};
    use crate::actions::execute_action;
    use crate::submissions::Submissions;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use signup_core::{Field, OrderField};

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ctrl(app: &mut App, ch: char) {
        app.handle_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL));
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    fn drain(app: &mut App, submissions: &mut Submissions) {
        while let Some(action) = app.next_action() {
            execute_action(app, submissions, action);
        }
    }

    #[test]
    fn tab_walks_fields_then_add_button_then_rows() {
        let mut app = App::new(1, true);
        let row = app.form.orders().get(0).expect("row").id;
        let expected = [
            Focus::Field(Field::Email),
            Focus::Field(Field::Password),
            Focus::AddOrder,
            Focus::Order(row, OrderField::Title),
            Focus::Order(row, OrderField::Total),
            Focus::Save,
            Focus::Field(Field::Name),
        ];
        for focus in expected {
            press(&mut app, KeyCode::Tab);
            assert_eq!(app.focus, focus);
        }
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focus, Focus::Save);
    }

    #[test]
    fn full_form_submission_through_keys() {
        let mut app = App::new(0, true);
        let mut submissions = Submissions::default();

        type_text(&mut app, "ada lovelace");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "ADA@X.COM");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "secret1");
        ctrl(&mut app, 'a');
        drain(&mut app, &mut submissions);

        let row = app.form.orders().get(0).expect("row").id;
        assert_eq!(app.focus, Focus::Order(row, OrderField::Title));
        type_text(&mut app, "Book");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Backspace);
        type_text(&mut app, "50");
        ctrl(&mut app, 's');
        drain(&mut app, &mut submissions);

        let submitted = submissions.items();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].name, "Ada Lovelace");
        assert_eq!(submitted[0].email, "ada@x.com");
        assert_eq!(submitted[0].orders[0].total, 50.0);
        assert!(app.form.name.is_empty());
        assert_eq!(app.focus, Focus::Field(Field::Name));
        assert!(app.error.is_none());
    }

    #[test]
    fn failed_submit_shows_errors_and_records_nothing() {
        let mut app = App::new(0, true);
        let mut submissions = Submissions::default();
        ctrl(&mut app, 's');
        drain(&mut app, &mut submissions);

        assert!(submissions.items().is_empty());
        assert!(app.error.is_some());
        assert_eq!(app.form.field_error(Field::Name), Some("Field name is required"));
        assert_eq!(app.form.orders_error(), Some("Add at least one order"));

        type_text(&mut app, "ada");
        assert!(app.form.field_error(Field::Name).is_none());
    }

    #[test]
    fn enter_on_add_button_adds_row() {
        let mut app = App::new(0, true);
        let mut submissions = Submissions::default();
        app.focus = Focus::AddOrder;
        press(&mut app, KeyCode::Enter);
        drain(&mut app, &mut submissions);
        assert_eq!(app.form.orders().len(), 1);
    }

    #[test]
    fn ctrl_d_removes_focused_row_and_moves_focus() {
        let mut app = App::new(3, true);
        let mut submissions = Submissions::default();
        let second = app.form.orders().get(1).expect("row").id;
        let third = app.form.orders().get(2).expect("row").id;
        app.focus = Focus::Order(second, OrderField::Total);

        ctrl(&mut app, 'd');
        drain(&mut app, &mut submissions);

        assert_eq!(app.form.orders().len(), 2);
        assert!(app.form.orders().position(second).is_none());
        assert_eq!(app.focus, Focus::Order(third, OrderField::Title));
    }

    #[test]
    fn row_changes_after_failed_submit_refresh_empty_orders_message() {
        let mut app = App::new(1, true);
        let mut submissions = Submissions::default();
        ctrl(&mut app, 's');
        drain(&mut app, &mut submissions);
        assert!(app.form.orders_error().is_none());

        let row = app.form.orders().get(0).expect("row").id;
        app.focus = Focus::Order(row, OrderField::Title);
        ctrl(&mut app, 'd');
        drain(&mut app, &mut submissions);
        assert_eq!(app.form.orders_error(), Some("Add at least one order"));

        ctrl(&mut app, 'a');
        drain(&mut app, &mut submissions);
        assert!(app.form.orders_error().is_none());
    }

    #[test]
    fn ctrl_d_outside_rows_does_nothing() {
        let mut app = App::new(1, true);
        ctrl(&mut app, 'd');
        assert!(app.next_action().is_none());
        assert_eq!(app.form.orders().len(), 1);
    }

    #[test]
    fn escape_quits() {
        let mut app = App::new(0, true);
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }
}
