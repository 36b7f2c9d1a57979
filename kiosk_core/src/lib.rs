//! # kiosk_core - Parametric Kiosk Engineering Engine
//!
//! `kiosk_core` sizes a four-petal clover kiosk from a handful of primary
//! parameters: it derives the central ring, uprights, tubes and anchoring,
//! estimates material quantities and cost, and prices optional retrofit
//! modules. All inputs and outputs are JSON-serializable so a host UI or CLI
//! can drive it directly.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use kiosk_core::session::DesignSession;
//!
//! let session = DesignSession::new("Jane Designer", "Harbor front")
//!     .with_preset("Permanent (Acier)")?;
//!
//! let evaluation = session.evaluate()?;
//! println!("{}", evaluation.report);
//! # Ok::<(), kiosk_core::errors::KioskError>(())
//! ```
//!
//! ## Modules
//!
//! - [`presets`] - Named starting configurations
//! - [`calculations`] - Secondary parameters, cost estimate, safety checks, advice
//! - [`retrofits`] - Retrofit catalog, selection validation, cost multipliers
//! - [`report`] - Plain-text design report
//! - [`session`] - Immutable design session tying the steps together
//! - [`generator`] - Geometry generation strategies
//! - [`materials`] - Structural materials and anchoring modes
//! - [`settings`] - Safety limits, cost model and retrofit limits
//! - [`equations`] - Raw sizing formulas
//! - [`errors`] - Structured error types
//! - [`file_io`] - Session files with atomic saves and locking

pub mod calculations;
pub mod equations;
pub mod errors;
#[cfg(not(target_arch = "wasm32"))]
pub mod file_io;
pub mod generator;
pub mod materials;
pub mod presets;
pub mod report;
pub mod retrofits;
pub mod session;
pub mod settings;

// Re-export commonly used types at crate root for convenience
pub use calculations::{derive_secondary_parameters, estimate_costs, PrimaryParameters};
pub use errors::{KioskError, KioskResult};
#[cfg(not(target_arch = "wasm32"))]
pub use file_io::{load_session, save_session, FileLock};
pub use report::generate_report;
pub use retrofits::list_retrofits;
pub use session::{DesignEvaluation, DesignSession};
