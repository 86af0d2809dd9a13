pub mod providers;
pub mod rendering;
pub mod services;

pub use providers::*;
pub use rendering::*;
pub use services::*;
