use std::collections::VecDeque;

/// Trailing window of optional samples.
///
/// The sum is taken over the window in arrival order each time it is read, so
/// a window of zeros sums to exactly `0.0` and a mean equals the plain slice
/// mean. Null samples are counted; the window only reports a sum once it is
/// full and holds no nulls.
#[derive(Debug, Clone)]
pub struct RollingSum {
    period: usize,
    window: VecDeque<Option<f64>>,
    nulls: usize,
}

impl RollingSum {
    pub fn new(period: usize) -> Self {
        Self { period, window: VecDeque::with_capacity(period + 1), nulls: 0 }
    }

    pub fn push(&mut self, value: Option<f64>) {
        self.window.push_back(value);
        if value.is_none() {
            self.nulls += 1;
        }
        if self.window.len() > self.period
            && let Some(None) = self.window.pop_front()
        {
            self.nulls -= 1;
        }
    }

    pub fn is_full(&self) -> bool {
        self.period > 0 && self.window.len() == self.period
    }

    pub fn sum(&self) -> Option<f64> {
        (self.is_full() && self.nulls == 0).then(|| self.window.iter().flatten().sum())
    }

    pub fn mean(&self) -> Option<f64> {
        self.sum().map(|sum| sum / self.period as f64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extreme {
    Max,
    Min,
}

/// Sliding maximum or minimum over the last `period` indices.
///
/// Monotonic deque: every index enters and leaves once. Before the window
/// fills, the extreme covers all history seen so far.
#[derive(Debug, Clone)]
pub struct RollingExtreme {
    period: usize,
    kind: Extreme,
    deque: VecDeque<(usize, f64)>,
}

impl RollingExtreme {
    pub fn new(period: usize, kind: Extreme) -> Self {
        Self { period: period.max(1), kind, deque: VecDeque::with_capacity(period) }
    }

    pub fn max(period: usize) -> Self {
        Self::new(period, Extreme::Max)
    }

    pub fn min(period: usize) -> Self {
        Self::new(period, Extreme::Min)
    }

    pub fn push(&mut self, index: usize, value: f64) {
        while let Some(&(_, back)) = self.deque.back() {
            let dominated = match self.kind {
                Extreme::Max => value >= back,
                Extreme::Min => value <= back,
            };
            if !dominated {
                break;
            }
            self.deque.pop_back();
        }
        self.deque.push_back((index, value));
        while let Some(&(front, _)) = self.deque.front() {
            if front + self.period > index {
                break;
            }
            self.deque.pop_front();
        }
    }

    pub fn value(&self) -> Option<f64> {
        self.deque.front().map(|&(_, value)| value)
    }
}
