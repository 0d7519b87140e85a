pub mod code_highlight;
pub mod html;
pub mod renderer;

pub use html::{render, Rendered};
