pub mod error;
pub mod internal;
pub mod row_type;
pub mod value;
