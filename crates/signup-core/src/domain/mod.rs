pub mod ids;
pub mod path;
pub mod user;

pub use ids::OrderRowId;
pub use path::{FieldPath, PathSegment};
pub use user::{OrderDraft, OrderInput, UserCreationInput, UserDraft};
