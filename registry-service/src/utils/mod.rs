pub mod object_id;
pub mod validation;

pub use object_id::{is_valid_object_id, parse_object_id, parse_object_ids, INVALID_ID_MESSAGE};
pub use validation::{JsonBody, QueryParams, ValidatedJson};
