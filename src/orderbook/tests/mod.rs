//! Unit tests for the order book components.

mod batch_tests;
mod manager_tests;
