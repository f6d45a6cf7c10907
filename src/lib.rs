// Library exports for hoverbar

pub mod comment;
pub mod config;
pub mod formatting;
pub mod history;
pub mod memory_surface;
pub mod overlay;
pub mod selection;
pub mod surface;
pub mod toolbar;
