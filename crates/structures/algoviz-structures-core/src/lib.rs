//! algoviz structures: animated sequence containers.
//!
//! [`Element`], [`Pointer`], [`Array`] and [`Stack`] keep a logical value list
//! and its on-screen nodes in lock-step. Each mutation updates state
//! synchronously and returns a [`Plan`] for a [`Playback`] engine; nothing here
//! renders or waits.

pub mod array;
pub mod config;
pub mod element;
pub mod error;
pub mod pointer;
pub mod stack;

// Re-exports for drivers
pub use array::Array;
pub use config::{
    ArrayConfig, BoxStyle, CompareStyle, ElementStyle, Highlight, PointerConfig, StackConfig,
    TextStyle, DEFAULT_BUFF, FRAME_HEIGHT, FRAME_WIDTH,
};
pub use element::{Element, Label};
pub use error::{Result, StructureError};
pub use pointer::{best_direction, Anchor, Direction, Pointer};
pub use stack::Stack;
pub use algoviz_api_core::{Color, Plan, Playback, Value, Vec2};
