pub mod normalize;
pub mod schema;

pub use normalize::{coerce_number, is_valid_email, lowercase_email, title_case};
pub use schema::{
    validate, MAX_ORDER_TOTAL, MIN_ORDER_COUNT, MIN_ORDER_TOTAL, MIN_PASSWORD_LENGTH,
};
