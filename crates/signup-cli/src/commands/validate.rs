use anyhow::{Context as _, Result};
use clap::Args;
use signup_core::{validate, OrderDraft, UserCreationInput, UserDraft, ValidationErrors};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::commands::{print_json, Context};
use crate::error::invalid_input;

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Read the draft as JSON from a file, or `-` for stdin
    #[arg(long, conflicts_with_all = ["name", "email", "password", "orders"])]
    pub input: Option<PathBuf>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub password: Option<String>,
    /// An order line; repeat for more orders
    #[arg(long = "order", value_name = "TITLE:TOTAL")]
    pub orders: Vec<String>,
}

pub fn validate_draft(ctx: &Context, args: ValidateArgs) -> Result<()> {
    let draft = match &args.input {
        Some(path) => read_draft(path)?,
        None => draft_from_args(args)?,
    };
    debug!(orders = draft.orders.len(), "validating draft");

    match validate(&draft) {
        Ok(input) => {
            if ctx.json {
                print_json(&input)?;
            } else {
                print_user(&input);
            }
            Ok(())
        }
        Err(errors) => {
            if ctx.json {
                print_json(&errors)?;
            } else {
                print_errors(&errors);
            }
            Err(errors.into())
        }
    }
}

fn read_draft(path: &Path) -> Result<UserDraft> {
    let contents = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .with_context(|| "read draft from stdin")?;
        buffer
    } else {
        fs::read_to_string(path).map_err(|err| {
            invalid_input(format!("cannot read draft {}: {}", path.display(), err))
        })?
    };
    let draft = serde_json::from_str(&contents).with_context(|| "parse draft json")?;
    Ok(draft)
}

fn draft_from_args(args: ValidateArgs) -> Result<UserDraft> {
    let orders = args
        .orders
        .iter()
        .map(|raw| parse_order(raw))
        .collect::<Result<Vec<_>>>()?;
    Ok(UserDraft {
        name: args.name.unwrap_or_default(),
        email: args.email.unwrap_or_default(),
        password: args.password.unwrap_or_default(),
        orders,
    })
}

/// Splits `TITLE:TOTAL` on the last colon so titles may contain colons.
pub fn parse_order(raw: &str) -> Result<OrderDraft> {
    match raw.rsplit_once(':') {
        Some((title, total)) => Ok(OrderDraft::new(title, total)),
        None => Err(invalid_input(format!(
            "invalid order {:?}: expected TITLE:TOTAL",
            raw
        ))),
    }
}

fn print_user(input: &UserCreationInput) {
    println!("name: {}", input.name);
    println!("email: {}", input.email);
    println!("password: {}", "*".repeat(input.password.chars().count()));
    println!("orders:");
    for (index, order) in input.orders.iter().enumerate() {
        println!("  {}. {} ({})", index + 1, order.title, order.total);
    }
}

fn print_errors(errors: &ValidationErrors) {
    for error in errors {
        println!("{}: {}", error.path, error.message);
    }
}
