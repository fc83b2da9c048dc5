//! Comprehensive tests for the TVC landing environment.
//!
//! Module-level unit tests live next to their modules; everything here
//! exercises composed behavior through the public API.
//!
//! ## Organization
//!
//! - `physics_tests`: integrator and actuator working together
//! - `environment_tests`: episode contract (reset/step/terminate)
//! - `curriculum_tests`: spawn policies and toggles through resets
//! - `reward_tests`: reward accrual over whole episodes
//! - `edge_case_tests`: degenerate inputs and boundary conditions
//! - `integration_tests`: full landing scenarios and training patterns

pub mod environment_tests;
pub mod integration_tests;
