//! Market data aggregate: bars, trade levels, the indicator vocabulary and the
//! pure indicator math.

pub mod entities;
pub mod indicator;
pub mod indicator_engine;
pub mod repositories;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use indicator::*;
pub use value_objects::*;
