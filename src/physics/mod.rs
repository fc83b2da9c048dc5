//! Physics simulation modules for the landing problem.
//!
//! Contains:
//! - Thrust-vector-control actuator (rate-limited and bang-bang)
//! - Rigid-body rocket integrator (semi-implicit Euler)
//! - Actuation latency queue (optional command delay)

pub mod latency;
pub mod rocket;
pub mod tvc;

pub use latency::*;
pub use rocket::*;
pub use tvc::*;
