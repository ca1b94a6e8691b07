//! Test suites for the builder
//!
//! Tests are grouped by what they exercise: individual controls, modules and
//! their records, the full builder lifecycle, and invariants checked with
//! generated input.

#[cfg(test)]
mod module_tests;
#[cfg(test)]
mod integration;
