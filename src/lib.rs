#![forbid(unsafe_code)]

//! Transient-execution (Spectre-class) leak detection for an out-of-order
//! pipeline model.
//!
//! The crate API is centered around [`Analyzer`], an explicit per-run context
//! that consumes one pipeline instruction event per call. It tracks registers
//! tainted by loads executed inside an open misspeculation window (a run of
//! instructions that are never committed) and flags the first event where a
//! tainted value reaches a micro-architecturally observable instruction.
//!
//! The pipeline model supplies instruction classification and renamed-operand
//! introspection through the [`InstClass`] and [`DynOperands`] capability
//! traits; the detector itself performs no decoding. Analysis is gated to a
//! monitored code region configured via [`Analyzer::region_encountered`] —
//! with no region configured the detector is a deliberate no-op.
//!
//! [`trace`] provides a JSON-lines record/replay container so event streams
//! captured from a live pipeline run can be re-fed through the detector
//! offline.

pub mod analyzer;
pub mod event;
pub mod region;
pub mod taint;
pub mod trace;
pub mod window;

pub use analyzer::{Analyzer, State};
pub use event::{ClassFlags, DynOperands, InstClass, InstEvent, PhysRegId};
pub use region::RegionGate;
pub use taint::TaintSet;
pub use trace::{replay, TraceError, TraceEvent, TraceReader, TraceWriter};
pub use window::{WindowRegistry, WindowStats};
