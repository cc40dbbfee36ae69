//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against mock adapters. All tests run on the host with no board.

mod hal_adapter_tests;
mod mock_hw;
mod simulation_tests;
