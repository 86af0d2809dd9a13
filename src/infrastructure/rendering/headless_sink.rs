use crate::application::RenderSink;
use crate::domain::{
    chart::ChartOption,
    errors::{AppError, RenderingResult},
    logging::LogComponent,
};
use crate::log_trace;
use std::cell::RefCell;
use std::rc::Rc;

/// Lifecycle call observed by a headless sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkEvent {
    Init { width: u32, height: u32 },
    SetOption,
    Resize,
    Dispose,
}

/// Everything the headless sinks of one surface have been asked to do.
#[derive(Debug, Default)]
pub struct SinkJournal {
    pub events: Vec<SinkEvent>,
    pub options: Vec<ChartOption>,
    /// Makes the next `set_option` call fail once.
    pub fail_next_set_option: bool,
}

impl SinkJournal {
    pub fn count(&self, event: SinkEvent) -> usize {
        self.events.iter().filter(|e| **e == event).count()
    }

    pub fn inits(&self) -> usize {
        self.events.iter().filter(|e| matches!(e, SinkEvent::Init { .. })).count()
    }

    /// Instances created and not yet disposed.
    pub fn live_instances(&self) -> usize {
        self.inits().saturating_sub(self.count(SinkEvent::Dispose))
    }

    pub fn last_option(&self) -> Option<&ChartOption> {
        self.options.last()
    }
}

/// Off-screen container; a zero dimension stands for a detached element.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    pub width: u32,
    pub height: u32,
    journal: Rc<RefCell<SinkJournal>>,
}

impl HeadlessSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, journal: Rc::default() }
    }

    pub fn detached() -> Self {
        Self::new(0, 0)
    }

    pub fn journal(&self) -> Rc<RefCell<SinkJournal>> {
        Rc::clone(&self.journal)
    }
}

/// In-memory sink for native tests and option export.
#[derive(Debug)]
pub struct HeadlessSink {
    journal: Rc<RefCell<SinkJournal>>,
}

impl RenderSink for HeadlessSink {
    type Container = HeadlessSurface;

    fn init(surface: &HeadlessSurface) -> RenderingResult<Self> {
        if surface.width == 0 || surface.height == 0 {
            return Err(AppError::RenderingError(format!(
                "surface {}x{} cannot host a chart",
                surface.width, surface.height
            )));
        }
        surface.journal.borrow_mut().events.push(SinkEvent::Init { width: surface.width, height: surface.height });
        log_trace!(LogComponent::Infrastructure("HeadlessSink"), "init {}x{}", surface.width, surface.height);
        Ok(Self { journal: surface.journal() })
    }

    fn set_option(&mut self, option: &ChartOption) -> RenderingResult<()> {
        let mut journal = self.journal.borrow_mut();
        if journal.fail_next_set_option {
            journal.fail_next_set_option = false;
            return Err(AppError::RenderingError("option rejected".into()));
        }
        journal.events.push(SinkEvent::SetOption);
        journal.options.push(option.clone());
        Ok(())
    }

    fn resize(&mut self) -> RenderingResult<()> {
        self.journal.borrow_mut().events.push(SinkEvent::Resize);
        Ok(())
    }

    fn dispose(self) {
        self.journal.borrow_mut().events.push(SinkEvent::Dispose);
    }
}
