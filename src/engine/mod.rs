//! Engine modules: translation between user settings and engine settings.
//!
//! The engine layer sits between the user-facing proposal settings (what the
//! user wants) and the external storage-proposal engine (which computes the
//! actual partitioning plan). It produces and reads back `EngineSettings`.

pub mod from_engine;
pub mod settings;
pub mod to_engine;
