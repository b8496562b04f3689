//! Freehand signature capture and replay engine.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns
//! the full lifecycle of a signature pad canvas: translating raw DOM input
//! events into a vector stroke model, coalescing high-frequency move input
//! onto paint frames, rendering strokes incrementally while drawing and in
//! bulk when a persisted document is reloaded, and serializing the stroke
//! model so a signature survives round-trips through storage independent of
//! device resolution. The host UI layer is responsible only for wiring DOM
//! events to the engine, driving the paint loop when the engine requests a
//! frame, and persisting the documents handed to its observers.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Stroke/document model, in-memory state, and validation |
//! | [`codec`] | JSON wire codec for [`doc::SignatureDocument`] |
//! | [`input`] | Stroke-builder state machine and move coalescing |
//! | [`render`] | Surface setup and all 2D-context drawing |
//! | [`consts`] | Shared defaults (geometry, pen style, wire version) |

pub mod codec;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod input;
pub mod render;
