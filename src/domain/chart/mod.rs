//! Chart aggregate: panel layout, series composition, tooltip text and the
//! declarative option handed to the rendering sink.

pub mod composer;
pub mod config;
pub mod layout;
pub mod option;
pub mod tooltip;
pub mod value_objects;

pub use composer::build_chart_option;
pub use config::ChartConfig;
pub use layout::{LayoutConfig, LayoutPlan, PanelPlacement, plan_layout, plan_panels};
pub use option::*;
pub use tooltip::TooltipAggregator;
pub use value_objects::*;
