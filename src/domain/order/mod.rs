// ============================================================================
// Order Domain
// ============================================================================
//
// - Value objects (TableNumber, DeliveryMethod, LineItem)
// - Order entity (pricing and receipt)
// - StoredOrder (persisted document shape)
// - ValidationError
//
// ============================================================================

pub mod entity;
pub mod errors;
pub mod stored;
pub mod value_objects;

pub use entity::*;
pub use errors::*;
pub use stored::*;
pub use value_objects::*;
