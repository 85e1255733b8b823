use signup_core::{SubmitHandler, UserCreationInput};
use tracing::info;

/// Collects every accepted submission for reporting after the UI exits.
#[derive(Debug, Default)]
pub struct Submissions {
    items: Vec<UserCreationInput>,
}

impl Submissions {
    pub fn items(&self) -> &[UserCreationInput] {
        &self.items
    }

    pub fn into_items(self) -> Vec<UserCreationInput> {
        self.items
    }
}

impl SubmitHandler for Submissions {
    fn submit(&mut self, input: UserCreationInput) {
        info!(
            name = %input.name,
            email = %input.email,
            orders = input.orders.len(),
            "form submitted"
        );
        self.items.push(input);
    }
}
