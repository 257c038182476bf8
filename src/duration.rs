use serde::Serialize;

/// Three-point (optimistic / most likely / pessimistic) duration estimate, in working days.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Duration {
    low: f64,
    likely: f64,
    high: f64,
}

impl Duration {
    /// Build an estimate from partially specified inputs.
    ///
    /// Only positive, finite values count as provided:
    /// - none: all zero (a milestone)
    /// - one: all three take that value
    /// - two: the missing one is the average of the two given
    /// - three: used as-is
    pub fn new(low: Option<f64>, likely: Option<f64>, high: Option<f64>) -> Self {
        let provided = |v: Option<f64>| v.filter(|x| x.is_finite() && *x > 0.0);
        let (low, likely, high) = (provided(low), provided(likely), provided(high));

        match (low, likely, high) {
            (None, None, None) => Self::milestone(),
            (Some(v), None, None) | (None, Some(v), None) | (None, None, Some(v)) => Self {
                low: v,
                likely: v,
                high: v,
            },
            (None, Some(m), Some(h)) => Self {
                low: (m + h) / 2.0,
                likely: m,
                high: h,
            },
            (Some(l), None, Some(h)) => Self {
                low: l,
                likely: (l + h) / 2.0,
                high: h,
            },
            (Some(l), Some(m), None) => Self {
                low: l,
                likely: m,
                high: (l + m) / 2.0,
            },
            (Some(l), Some(m), Some(h)) => Self {
                low: l,
                likely: m,
                high: h,
            },
        }
    }

    /// Raw inputs as they arrive from the graph layer, where zero means "not given".
    pub fn from_estimates(low: f64, likely: f64, high: f64) -> Self {
        Self::new(Some(low), Some(likely), Some(high))
    }

    pub fn milestone() -> Self {
        Self {
            low: 0.0,
            likely: 0.0,
            high: 0.0,
        }
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn likely(&self) -> f64 {
        self.likely
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    /// PERT mean: (low + 4·likely + high) / 6.
    pub fn expected(&self) -> f64 {
        (self.low + 4.0 * self.likely + self.high) / 6.0
    }

    /// PERT variance: ((high − low) / 6)².
    pub fn variance(&self) -> f64 {
        let spread = (self.high - self.low) / 6.0;
        spread * spread
    }

    pub fn is_milestone(&self) -> bool {
        self.expected() == 0.0
    }
}

impl Default for Duration {
    fn default() -> Self {
        Self::milestone()
    }
}
