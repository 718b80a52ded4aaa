// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Pure order pricing and the persisted order shape. No I/O lives here.
//
// ============================================================================

pub mod order;
