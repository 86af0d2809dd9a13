use crate::application::RenderSink;
use crate::domain::{
    chart::{ChartOption, TooltipAggregator},
    errors::{AppError, RenderingResult},
    logging::{LogComponent, get_logger},
};
use crate::log_debug;
use gloo::events::EventListener;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

#[wasm_bindgen]
extern "C" {
    /// Instance returned by `echarts.init`.
    #[wasm_bindgen(extends = js_sys::Object)]
    #[derive(Debug, Clone)]
    type EChartsInstance;

    #[wasm_bindgen(catch, js_namespace = echarts, js_name = init)]
    fn echarts_init(container: &HtmlElement) -> Result<EChartsInstance, JsValue>;

    #[wasm_bindgen(method, catch, js_name = setOption)]
    fn set_option(this: &EChartsInstance, option: &JsValue, not_merge: bool) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch)]
    fn resize(this: &EChartsInstance) -> Result<(), JsValue>;

    #[wasm_bindgen(method)]
    fn dispose(this: &EChartsInstance);
}

type TooltipFormatter = Closure<dyn FnMut(JsValue) -> JsValue>;

/// Rendering sink backed by the global `echarts` library.
///
/// Owns the chart instance, the window resize listener and the tooltip
/// formatter closure; all three are released in `dispose`.
pub struct EChartsSink {
    instance: EChartsInstance,
    resize_listener: Option<EventListener>,
    formatter: Option<TooltipFormatter>,
}

impl EChartsSink {
    fn install_formatter(option: &JsValue, tooltip: TooltipAggregator) -> RenderingResult<TooltipFormatter> {
        let formatter: TooltipFormatter = Closure::new(move |params: JsValue| {
            let first = if js_sys::Array::is_array(&params) {
                js_sys::Array::from(&params).get(0)
            } else {
                params
            };
            js_sys::Reflect::get(&first, &JsValue::from_str("axisValue"))
                .ok()
                .and_then(|value| value.as_string())
                .and_then(|date| tooltip.format_date(&date))
                .map(|text| JsValue::from_str(&text.replace('\n', "<br/>")))
                .unwrap_or_else(|| JsValue::from_str(""))
        });

        let tooltip_key = JsValue::from_str("tooltip");
        let tooltip_object = js_sys::Reflect::get(option, &tooltip_key).map_err(js_error)?;
        js_sys::Reflect::set(&tooltip_object, &JsValue::from_str("formatter"), formatter.as_ref())
            .map_err(js_error)?;
        Ok(formatter)
    }
}

impl RenderSink for EChartsSink {
    type Container = HtmlElement;

    fn init(container: &HtmlElement) -> RenderingResult<Self> {
        if !container.is_connected() {
            return Err(AppError::RenderingError("chart container is not attached to the document".into()));
        }

        let instance = echarts_init(container).map_err(js_error)?;
        let resize_target = instance.clone();
        let resize_listener = EventListener::new(&gloo::utils::window(), "resize", move |_| {
            if let Err(e) = resize_target.resize() {
                get_logger().warn(LogComponent::Infrastructure("ECharts"), &format!("resize failed: {:?}", e));
            }
        });

        log_debug!(LogComponent::Infrastructure("ECharts"), "Chart instance created");
        Ok(Self { instance, resize_listener: Some(resize_listener), formatter: None })
    }

    fn set_option(&mut self, option: &ChartOption) -> RenderingResult<()> {
        let json = option.to_json().map_err(|e| AppError::RenderingError(e.to_string()))?;
        let js_option = js_sys::JSON::parse(&json).map_err(js_error)?;
        let formatter = Self::install_formatter(&js_option, option.tooltip_data.clone())?;

        self.instance.set_option(&js_option, true).map_err(js_error)?;
        // The previous formatter is unreachable once the new option is in.
        self.formatter = Some(formatter);
        Ok(())
    }

    fn resize(&mut self) -> RenderingResult<()> {
        self.instance.resize().map_err(js_error)
    }

    fn dispose(mut self) {
        self.resize_listener.take();
        self.instance.dispose();
        self.formatter.take();
        log_debug!(LogComponent::Infrastructure("ECharts"), "Chart instance disposed");
    }
}

fn js_error(value: JsValue) -> AppError {
    AppError::RenderingError(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}
