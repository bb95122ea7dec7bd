pub mod app;
pub mod input;
pub mod render;
pub mod session;
pub mod theme;

pub use app::run;
