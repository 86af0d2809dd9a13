use leptos::html::Div;
use leptos::*;

use crate::application::{ChartInput, RenderController};
use crate::domain::{
    chart::ChartConfig,
    logging::LogComponent,
    market_data::{Bar, IndicatorSelection, TradeLevels},
};
use crate::infrastructure::rendering::EChartsSink;
use crate::log_debug;

/// Multi-panel indicator chart bound to reactive inputs.
///
/// One controller per mounted component; it is torn down with the component.
#[component]
pub fn IndicatorChart(
    #[prop(into)] bars: Signal<Vec<Bar>>,
    #[prop(into)] selection: Signal<IndicatorSelection>,
    #[prop(optional, into)] trade_levels: MaybeSignal<Option<TradeLevels>>,
    #[prop(optional)] config: Option<ChartConfig>,
    #[prop(optional, into)] class: Option<String>,
) -> impl IntoView {
    let container = create_node_ref::<Div>();
    let controller = store_value(RenderController::<EChartsSink>::new(config.unwrap_or_default()));

    create_effect(move |_| {
        if let Some(div) = container.get() {
            let element: web_sys::HtmlElement = (*div).clone().into();
            controller.update_value(|c| {
                let state = c.attach(element);
                log_debug!(LogComponent::Presentation("IndicatorChart"), "Container mounted, chart {}", state);
            });
        }
    });

    create_effect(move |_| {
        let input = ChartInput::new()
            .with_bars(bars.get())
            .with_selection(selection.get())
            .with_trade_levels(trade_levels.get());
        controller.update_value(|c| {
            c.update(input);
        });
    });

    on_cleanup(move || {
        controller.update_value(|c| {
            c.teardown();
        });
    });

    view! {
        <div
            class=class.unwrap_or_else(|| "indicator-chart".to_string())
            node_ref=container
            style="width: 100%; height: 100%; min-height: 420px;"
        ></div>
    }
}
