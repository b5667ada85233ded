// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Hostlink

//! External routine engine.
//!
//! Bridges the host database's external-routine model to objects living in a
//! hosted managed runtime. Arguments and results cross the boundary as value
//! descriptors (fixed-layout records describing one SQL value in place) and
//! are marshaled to and from dynamic values by the [`convert`] module. The
//! [`ExternalEngine`] facade owns the runtime host and the one execution
//! domain of the process and hands out routine adapters on demand.
//!
//! Errors never cross the boundary structurally: every public entry point
//! reports failures as text through an [`ErrorSink`] and returns a null or
//! negative result, matching the contract the host program depends on.

pub mod abi;
pub mod convert;
pub mod descriptor;
pub mod engine;
pub mod plugin;
pub mod routine;
pub mod sink;

pub use convert::{ConvertError, copy, descriptor_to_value, value_to_descriptor};
pub use descriptor::{DescFlags, ParamDesc, TypeTag};
pub use engine::{EngineConfig, ExternalEngine};
pub use plugin::Plugin;
pub use routine::{ExternalFunction, ExternalProcedure, ExternalResultSet, RoutineName};
pub use sink::{CollectingSink, Encoding, ErrorSink};
