//! algoviz-api-core: engine-facing vocabulary (geometry, nodes, values, plans).
//!
//! Everything here is engine-agnostic. Structures build [`Plan`]s out of
//! [`Action`]s on [`Node`]s; a host engine consumes them through [`Playback`].

pub mod color;
pub mod geometry;
pub mod node;
pub mod plan;
pub mod playback;
pub mod shape;
pub mod value;

pub use color::Color;
pub use geometry::{Bounds, Vec2};
pub use node::{Node, NodeKind, ObjectId, TextMetrics};
pub use plan::{Action, Plan, Step};
pub use playback::{Playback, PlaybackError, Recorder, SceneModel};
pub use shape::{ShapeId, Style};
pub use value::{Value, ValueKind};
