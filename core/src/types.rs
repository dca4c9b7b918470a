//! Shared primitive types used across the engine.

/// Stable identifier of a customer in a snapshot.
pub type CustomerId = u64;

/// Identifier of an index case. `0` is reserved for the synthetic
/// "unknown/other" case.
pub type IndexCaseId = u64;

/// Identifier of a raw element. Unique only within its owning customer.
pub type ElementId = u64;

/// Globally unique update-case id: `"<customer_id>-<element_id>"`.
pub type UpdateCaseId = String;

/// The reserved id of the synthetic "unknown/other" index case.
pub const UNKNOWN_INDEX_CASE_ID: IndexCaseId = 0;
