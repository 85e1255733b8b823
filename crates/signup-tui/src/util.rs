use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Applies an editing key to a text input. Returns true when the value
/// changed.
pub fn apply_text_input(target: &mut String, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let changed = !target.is_empty();
            target.clear();
            changed
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let before = target.len();
            delete_last_word(target);
            before != target.len()
        }
        KeyCode::Char(ch) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return false;
            }
            target.push(ch);
            true
        }
        KeyCode::Backspace => target.pop().is_some(),
        _ => false,
    }
}

fn delete_last_word(value: &mut String) {
    while value.ends_with(|ch: char| ch.is_whitespace()) {
        value.pop();
    }
    while value.ends_with(|ch: char| !ch.is_whitespace()) {
        value.pop();
    }
}

pub fn mask_secret(value: &str) -> String {
    "*".repeat(value.chars().count())
}
