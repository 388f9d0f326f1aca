//! Tests for the comparison engine entry points
//!
//! Covers end-to-end runs through `compare`, request validation, and the
//! invariants every algorithm must uphold.
