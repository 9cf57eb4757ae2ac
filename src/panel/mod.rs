//! Panel domain: item renderers, page composition and the dashboard
//! controller that applies host commands to them.

pub mod color;
pub mod controller;
pub mod descriptor;
pub mod error;
pub mod grid;
pub mod icons;
pub mod items;
pub mod page;
pub mod theme;

pub use controller::{Applied, Dashboard};
