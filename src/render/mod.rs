pub mod renderer;

pub use renderer::{AutoplayHud, Hud, Renderer};
