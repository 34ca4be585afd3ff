//! Shared type definitions for the Sortviz animation engine.
//!
//! This crate is the single source of truth for the types that cross the
//! boundary between the animation core and whatever renderer front end is
//! attached. Types defined here flow downstream to `TypeScript` via `ts-rs`
//! so a web renderer can consume frames without hand-written bindings.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrapper for run identifiers
//! - [`enums`] -- Algorithm selection and run status enumerations
//! - [`structs`] -- Frame snapshots and run summaries

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{Algorithm, RunStatus};
pub use ids::RunId;
pub use structs::{Frame, RunSummary};

#[cfg(test)]
mod tests {
    //! Integration tests for type exports and `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // ts-rs generates TypeScript bindings when types with
        // #[ts(export)] are used. Importing them here triggers generation.
        // The actual files are written to the `bindings/` directory
        // relative to the crate root.
        use ts_rs::TS;

        let _ = crate::ids::RunId::export_all();
        let _ = crate::enums::Algorithm::export_all();
        let _ = crate::enums::RunStatus::export_all();
        let _ = crate::structs::Frame::export_all();
        let _ = crate::structs::RunSummary::export_all();
    }
}
