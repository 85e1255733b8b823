pub mod model;
pub mod rows;

pub use model::{Field, FormModel, OrderField, SubmitHandler};
pub use rows::{OrderRow, OrderRows};
