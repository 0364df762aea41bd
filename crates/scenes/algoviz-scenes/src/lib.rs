//! algoviz-scenes
//!
//! Drivers that own containers and hand their plans to a [`Playback`] engine.
//! Each walkthrough takes literal input data, plays the whole animation into a
//! [`Scene`], and returns the algorithm's answer so callers can check it.

pub mod scene;
pub mod walkthroughs;

pub use crate::scene::{caption, Scene};
pub use crate::walkthroughs::{
    array_tour, linear_search, max_sum_k_successive, selection_sort, two_sum, valid_parentheses,
    TourSnapshots,
};
pub use algoviz_api_core::Playback;
