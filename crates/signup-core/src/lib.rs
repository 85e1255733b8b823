pub mod domain;
pub mod error;
pub mod form;
pub mod rules;

pub use domain::*;
pub use error::{FieldError, FieldPathError, RuleViolation, ValidationErrors};
pub use form::{Field, FormModel, OrderField, OrderRow, OrderRows, SubmitHandler};
pub use rules::validate;
