use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::application::{ChartInput, RenderController};
use crate::domain::{
    chart::ChartConfig,
    errors::AppError,
    logging::{LogComponent, get_logger},
    market_data::{Bar, IndicatorKind, IndicatorSelection, TradeLevels},
};
use crate::infrastructure::rendering::EChartsSink;

/// JS bridge around one chart. Only parses input and forwards to the
/// controller; all chart logic lives below the presentation layer.
#[wasm_bindgen]
pub struct IndicatorChartApi {
    controller: RenderController<EChartsSink>,
}

#[wasm_bindgen]
impl IndicatorChartApi {
    /// `config_json` may be omitted or partial; missing fields use defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<IndicatorChartApi, JsValue> {
        let config = match config_json.as_deref() {
            Some(json) if !json.trim().is_empty() => ChartConfig::from_json(json)?,
            _ => ChartConfig::default(),
        };
        Ok(Self { controller: RenderController::new(config) })
    }

    pub fn attach(&mut self, container: HtmlElement) -> String {
        self.controller.attach(container).to_string()
    }

    #[wasm_bindgen(js_name = attachById)]
    pub fn attach_by_id(&mut self, element_id: &str) -> Result<String, JsValue> {
        let element = gloo::utils::document()
            .get_element_by_id(element_id)
            .ok_or_else(|| AppError::RenderingError(format!("no element with id '{}'", element_id)))?;
        let container = element
            .dyn_into::<HtmlElement>()
            .map_err(|_| AppError::RenderingError(format!("'{}' is not an HTML element", element_id)))?;
        Ok(self.attach(container))
    }

    /// `bars_json`: array of `{date, open, high, low, close, volume}`.
    #[wasm_bindgen(js_name = setBars)]
    pub fn set_bars(&mut self, bars_json: &str) -> Result<String, JsValue> {
        let bars: Vec<Bar> = serde_json::from_str(bars_json).map_err(AppError::from)?;
        Ok(self.controller.set_bars(bars).to_string())
    }

    /// `keys_json`: array of indicator keys, e.g. `["ma","volume","rsi"]`.
    #[wasm_bindgen(js_name = setIndicators)]
    pub fn set_indicators(&mut self, keys_json: &str) -> Result<String, JsValue> {
        let keys: Vec<String> = serde_json::from_str(keys_json).map_err(AppError::from)?;
        let selection = IndicatorSelection::parse_keys(&keys)?;
        Ok(self.controller.set_selection(selection).to_string())
    }

    /// Returns whether the indicator is selected afterwards.
    #[wasm_bindgen(js_name = toggleIndicator)]
    pub fn toggle_indicator(&mut self, key: &str) -> Result<bool, JsValue> {
        let kind: IndicatorKind = key
            .parse()
            .map_err(|_| AppError::ValidationError(format!("Unknown indicator key: {}", key)))?;
        let mut selection = self.controller.selection().clone();
        let selected = selection.toggle(kind);
        self.controller.set_selection(selection);
        Ok(selected)
    }

    /// `levels_json`: `{shortTerm, midTerm, longTerm}`; `null` or omitted clears the overlay.
    #[wasm_bindgen(js_name = setTradeLevels)]
    pub fn set_trade_levels(&mut self, levels_json: Option<String>) -> Result<String, JsValue> {
        let levels: Option<TradeLevels> = match levels_json.as_deref() {
            Some(json) => serde_json::from_str(json).map_err(AppError::from)?,
            None => None,
        };
        Ok(self.controller.set_trade_levels(levels).to_string())
    }

    /// Bars, indicators and trade levels in one recomputation. Any field may be
    /// left out of `update_json`.
    pub fn update(&mut self, update_json: &str) -> Result<String, JsValue> {
        let payload: UpdatePayload = serde_json::from_str(update_json).map_err(AppError::from)?;
        let mut input = ChartInput::new();
        if let Some(bars) = payload.bars {
            input = input.with_bars(bars);
        }
        if let Some(keys) = payload.indicators {
            input = input.with_selection(IndicatorSelection::parse_keys(&keys)?);
        }
        if let Some(levels) = payload.trade_levels {
            input = input.with_trade_levels(levels);
        }
        Ok(self.controller.update(input).to_string())
    }

    pub fn tooltip(&self, date: &str) -> Option<String> {
        self.controller.tooltip(date)
    }

    #[wasm_bindgen(js_name = optionJson)]
    pub fn option_json(&self) -> Result<Option<String>, JsValue> {
        self.controller
            .current_option()
            .map(|option| option.to_json().map_err(AppError::from))
            .transpose()
            .map_err(JsValue::from)
    }

    pub fn resize(&mut self) -> String {
        self.controller.resize().to_string()
    }

    pub fn dispose(&mut self) -> String {
        self.controller.teardown().to_string()
    }

    pub fn restart(&mut self) -> String {
        self.controller.restart().to_string()
    }

    pub fn state(&self) -> String {
        self.controller.state().to_string()
    }
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdatePayload {
    #[serde(default)]
    bars: Option<Vec<Bar>>,
    #[serde(default)]
    indicators: Option<Vec<String>>,
    /// Absent: unchanged. `null`: clear the overlay.
    #[serde(default, deserialize_with = "present_levels")]
    trade_levels: Option<Option<TradeLevels>>,
}

fn present_levels<'de, D>(deserializer: D) -> Result<Option<Option<TradeLevels>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;
    Option::<TradeLevels>::deserialize(deserializer).map(Some)
}

impl From<AppError> for JsValue {
    fn from(error: AppError) -> Self {
        get_logger().warn(LogComponent::Presentation("IndicatorChartApi"), &error.to_string());
        JsValue::from_str(&error.to_string())
    }
}
