pub mod field;
pub mod field_params;
pub mod modular;

pub use field::Field;
pub use field_params::FieldParams;
