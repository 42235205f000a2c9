//! Tests for the maintenance sweeps

mod scheduler_tests;
