pub mod render_controller;
pub mod use_cases;

pub use render_controller::*;
pub use use_cases::*;
