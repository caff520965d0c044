//! # bankpad-core
//!
//! Backend library for bankpad: load a sound bank into an external engine and
//! drive it from twelve note controls, independent of any UI framework.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use bankpad_core::bank::BankSelection;
//! use bankpad_core::config::Config;
//! use bankpad_core::engine::SynthEngine;
//! use bankpad_core::session::SessionController;
//!
//! let config = Config::load();
//! let engine = Arc::new(SynthEngine::new(config.engine_settings())?);
//! let mut session = SessionController::new(engine, config.engine_settings());
//!
//! // Start: NotLoaded -> Loading
//! let pending = session.begin_load(Some(BankSelection::Path(path)))?;
//! // Read + engine load, off the UI thread
//! let completed = pending.run().await;
//! // Loading -> Loaded (or back to NotLoaded)
//! session.finish_load(completed)?;
//!
//! session.controls()[0].press();   // note on 60
//! session.controls()[0].release(); // note off 60
//! ```
//!
//! ## Module Overview
//!
//! - [`engine`] - `SoundEngine` trait, `SynthEngine` (oxisynth + cpal), `TestEngine`, `NullEngine`
//! - [`control`] - control factory: label + press/release callbacks
//! - [`session`] - `SessionController` state machine and the async load flow
//! - [`bank`] - `BankSelection` and `SoundBank`
//! - [`config`] - TOML configuration (embedded defaults + user override)
//! - [`error`] - `SessionError`

pub mod bank;
pub mod config;
pub mod control;
pub mod engine;
pub mod error;
pub mod session;

pub use bankpad_types as types;
