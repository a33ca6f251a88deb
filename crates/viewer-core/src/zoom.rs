use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomLimits {
    pub default: f32,
    pub min: f32,
    pub max: f32,
    pub in_step: f32,
    pub out_step: f32,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self { default: 1.0, min: 0.5, max: 3.0, in_step: 1.1, out_step: 0.9 }
    }
}

impl ZoomLimits {
    /// Falls back to the stock limits when any value is unusable.
    pub fn sanitized(self) -> Self {
        let finite = [self.default, self.min, self.max, self.in_step, self.out_step]
            .iter()
            .all(|value| value.is_finite());

        let ordered = self.min > 0.0
            && self.min < self.max
            && (self.min..=self.max).contains(&self.default)
            && self.in_step > 1.0
            && self.out_step > 0.0
            && self.out_step < 1.0;

        if finite && ordered {
            self
        } else {
            Self::default()
        }
    }
}

/// Multiplicative zoom with a soft clamp.
///
/// The bound is checked before stepping, so a single step may carry the
/// factor past `max` (or below `min`); the next step in that direction is refused.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zoom {
    factor: f32,
    limits: ZoomLimits,
}

impl Default for Zoom {
    fn default() -> Self {
        Self::new(ZoomLimits::default())
    }
}

impl Zoom {
    pub fn new(limits: ZoomLimits) -> Self {
        let limits = limits.sanitized();
        Self { factor: limits.default, limits }
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }

    pub fn limits(&self) -> ZoomLimits {
        self.limits
    }

    pub fn can_zoom_in(&self) -> bool {
        self.factor < self.limits.max
    }

    pub fn can_zoom_out(&self) -> bool {
        self.factor > self.limits.min
    }

    pub fn zoom_in(&mut self) -> bool {
        if !self.can_zoom_in() {
            return false;
        }
        self.factor *= self.limits.in_step;
        true
    }

    pub fn zoom_out(&mut self) -> bool {
        if !self.can_zoom_out() {
            return false;
        }
        self.factor *= self.limits.out_step;
        true
    }
}
