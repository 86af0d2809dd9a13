use crate::domain::{
    chart::{ChartConfig, ChartOption, build_chart_option},
    errors::RenderingResult,
    logging::{LogComponent, get_logger},
    market_data::{Bar, BarSeries, IndicatorSelection, TradeLevels},
};
use crate::{log_debug, log_error, log_trace, log_warn};
use strum::{AsRefStr, Display};

/// Black-box drawing surface driven by the controller.
///
/// The controller is the only owner of a sink instance; nothing else holds a
/// reference to it.
pub trait RenderSink: Sized {
    type Container;

    /// Bind a new instance to `container`. Fails when the container cannot
    /// host a chart (detached, zero-sized).
    fn init(container: &Self::Container) -> RenderingResult<Self>;

    /// Replace the whole chart option.
    fn set_option(&mut self, option: &ChartOption) -> RenderingResult<()>;

    /// Re-layout the current option after a container size change.
    fn resize(&mut self) -> RenderingResult<()>;

    /// Release the instance and any listeners it installed.
    fn dispose(self);
}

/// Observable lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum RenderPhase {
    Uninitialized,
    Active,
    Disposed,
}

enum RenderState<S> {
    Uninitialized,
    Active { sink: S, option: ChartOption },
    Disposed,
}

/// Changes delivered in one turn of the caller's event loop, applied with a
/// single recomputation. `None` leaves that input untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartInput {
    pub bars: Option<Vec<Bar>>,
    pub selection: Option<IndicatorSelection>,
    pub trade_levels: Option<Option<TradeLevels>>,
}

impl ChartInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bars(mut self, bars: Vec<Bar>) -> Self {
        self.bars = Some(bars);
        self
    }

    pub fn with_selection(mut self, selection: IndicatorSelection) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn with_trade_levels(mut self, trade_levels: Option<TradeLevels>) -> Self {
        self.trade_levels = Some(trade_levels);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_none() && self.selection.is_none() && self.trade_levels.is_none()
    }
}

/// Owns the rendering sink and recomputes the chart whenever bars, selection
/// or trade levels change.
///
/// `Uninitialized -> Active` on the first non-empty bars with a container,
/// `Active -> Active` on every later change, `Active -> Disposed` on teardown,
/// empty bars or a sink failure. `Disposed` stays put until `restart`.
pub struct RenderController<S: RenderSink> {
    config: ChartConfig,
    container: Option<S::Container>,
    bars: BarSeries,
    selection: IndicatorSelection,
    trade_levels: Option<TradeLevels>,
    state: RenderState<S>,
}

impl<S: RenderSink> RenderController<S> {
    pub fn new(config: ChartConfig) -> Self {
        Self {
            config,
            container: None,
            bars: BarSeries::empty(),
            selection: IndicatorSelection::new(),
            trade_levels: None,
            state: RenderState::Uninitialized,
        }
    }

    pub fn state(&self) -> RenderPhase {
        match self.state {
            RenderState::Uninitialized => RenderPhase::Uninitialized,
            RenderState::Active { .. } => RenderPhase::Active,
            RenderState::Disposed => RenderPhase::Disposed,
        }
    }

    pub fn current_option(&self) -> Option<&ChartOption> {
        match &self.state {
            RenderState::Active { option, .. } => Some(option),
            _ => None,
        }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn bars(&self) -> &BarSeries {
        &self.bars
    }

    pub fn selection(&self) -> &IndicatorSelection {
        &self.selection
    }

    /// Bind (or rebind) the container. A live instance on the old container
    /// is released and recreated on the new one.
    pub fn attach(&mut self, container: S::Container) -> RenderPhase {
        self.container = Some(container);
        match std::mem::replace(&mut self.state, RenderState::Uninitialized) {
            RenderState::Active { sink, .. } => {
                log_debug!(LogComponent::Application("RenderController"), "Rebinding sink to a new container");
                sink.dispose();
            }
            RenderState::Disposed => {
                self.state = RenderState::Disposed;
                log_trace!(LogComponent::Application("RenderController"), "Ignoring attach while disposed");
                return self.state();
            }
            RenderState::Uninitialized => {}
        }
        self.refresh()
    }

    pub fn set_bars(&mut self, bars: Vec<Bar>) -> RenderPhase {
        let series = self.validated(bars);
        if series == self.bars {
            return self.state();
        }
        self.bars = series;
        self.refresh()
    }

    pub fn set_selection(&mut self, selection: IndicatorSelection) -> RenderPhase {
        if selection == self.selection {
            return self.state();
        }
        self.selection = selection;
        self.refresh()
    }

    pub fn set_trade_levels(&mut self, trade_levels: Option<TradeLevels>) -> RenderPhase {
        if trade_levels == self.trade_levels {
            return self.state();
        }
        self.trade_levels = trade_levels;
        self.refresh()
    }

    /// Apply every change in `input`, then recompute at most once.
    pub fn update(&mut self, input: ChartInput) -> RenderPhase {
        let mut changed = false;
        if let Some(bars) = input.bars {
            let series = self.validated(bars);
            changed |= series != self.bars;
            self.bars = series;
        }
        if let Some(selection) = input.selection {
            changed |= selection != self.selection;
            self.selection = selection;
        }
        if let Some(trade_levels) = input.trade_levels {
            changed |= trade_levels != self.trade_levels;
            self.trade_levels = trade_levels;
        }
        if changed { self.refresh() } else { self.state() }
    }

    /// Layout-only re-render of the current option.
    pub fn resize(&mut self) -> RenderPhase {
        let failure = match &mut self.state {
            RenderState::Active { sink, .. } => sink.resize().err(),
            _ => None,
        };
        if let Some(e) = failure {
            log_error!(LogComponent::Application("RenderController"), "Resize failed: {}", e);
            self.dispose_current();
        }
        self.state()
    }

    /// The container is going away: release the instance and forget the container.
    pub fn teardown(&mut self) -> RenderPhase {
        self.dispose_current();
        self.container = None;
        get_logger().info(LogComponent::Application("RenderController"), "Chart torn down");
        self.state()
    }

    /// Leave `Disposed` and try to activate again with the current inputs.
    pub fn restart(&mut self) -> RenderPhase {
        if matches!(self.state, RenderState::Disposed) {
            self.state = RenderState::Uninitialized;
            log_debug!(LogComponent::Application("RenderController"), "Restarting from disposed state");
        }
        self.refresh()
    }

    /// Tooltip text for the bar at (or nearest before) `date`.
    pub fn tooltip(&self, date: &str) -> Option<String> {
        self.current_option().and_then(|option| option.tooltip_data.format_date(date))
    }

    fn validated(&self, bars: Vec<Bar>) -> BarSeries {
        match BarSeries::new(bars, self.config.max_bars) {
            Ok(series) => series,
            Err(e) => {
                log_warn!(LogComponent::Application("RenderController"), "Rejected bar data, showing no chart: {}", e);
                BarSeries::empty()
            }
        }
    }

    fn refresh(&mut self) -> RenderPhase {
        let next = build_chart_option(&self.bars, &self.selection, self.trade_levels.as_ref(), &self.config);

        self.state = match (std::mem::replace(&mut self.state, RenderState::Disposed), next) {
            (RenderState::Disposed, _) => RenderState::Disposed,
            (RenderState::Uninitialized, None) => RenderState::Uninitialized,
            (RenderState::Uninitialized, Some(option)) => match &self.container {
                Some(container) => Self::activate(container, option),
                None => {
                    log_trace!(LogComponent::Application("RenderController"), "Waiting for a container");
                    RenderState::Uninitialized
                }
            },
            (RenderState::Active { sink, .. }, None) => {
                log_debug!(LogComponent::Application("RenderController"), "No bars left, disposing chart");
                sink.dispose();
                RenderState::Disposed
            }
            (RenderState::Active { mut sink, option: current }, Some(option)) => {
                if option == current {
                    RenderState::Active { sink, option: current }
                } else {
                    match sink.set_option(&option) {
                        Ok(()) => RenderState::Active { sink, option },
                        Err(e) => {
                            log_error!(LogComponent::Application("RenderController"), "Failed to apply chart option: {}", e);
                            sink.dispose();
                            RenderState::Disposed
                        }
                    }
                }
            }
        };
        self.state()
    }

    fn activate(container: &S::Container, option: ChartOption) -> RenderState<S> {
        let mut sink = match S::init(container) {
            Ok(sink) => sink,
            Err(e) => {
                log_error!(LogComponent::Application("RenderController"), "Sink init failed: {}", e);
                return RenderState::Disposed;
            }
        };
        match sink.set_option(&option) {
            Ok(()) => {
                get_logger().info(
                    LogComponent::Application("RenderController"),
                    &format!("Chart active with {} panels", option.layout.len()),
                );
                RenderState::Active { sink, option }
            }
            Err(e) => {
                log_error!(LogComponent::Application("RenderController"), "Initial chart option rejected: {}", e);
                sink.dispose();
                RenderState::Disposed
            }
        }
    }

    fn dispose_current(&mut self) {
        if let RenderState::Active { sink, .. } = std::mem::replace(&mut self.state, RenderState::Disposed) {
            sink.dispose();
        }
    }
}

impl<S: RenderSink> Drop for RenderController<S> {
    fn drop(&mut self) {
        self.dispose_current();
    }
}
