//! Linear domain -> range scale.

/// Maps a numeric domain onto a pixel range by linear interpolation.
///
/// Values outside the domain extrapolate; nothing is clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    /// Create a scale from `domain` to `range`.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// The 0..24 hour scale spread across `width` pixels.
    pub fn hours(width: f64) -> Self {
        Self::new((crate::zone::DAY_START, crate::zone::DAY_END), (0.0, width))
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Map a domain value to the range.
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            // Degenerate domain maps everything to the middle of the range.
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Map a range value back to the domain.
    pub fn invert(&self, px: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return (d0 + d1) / 2.0;
        }
        d0 + (px - r0) / (r1 - r0) * (d1 - d0)
    }

    /// Roughly `count` evenly spaced, human-friendly tick values inside the
    /// domain. Steps are 1, 2 or 5 times a power of ten.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        if count == 0 || !lo.is_finite() || !hi.is_finite() {
            return Vec::new();
        }
        if lo == hi {
            return vec![lo];
        }

        let step = (hi - lo) / count as f64;
        let power = step.log10().floor();
        let error = step / 10f64.powf(power);
        let factor = if error >= 50f64.sqrt() {
            10.0
        } else if error >= 10f64.sqrt() {
            5.0
        } else if error >= 2f64.sqrt() {
            2.0
        } else {
            1.0
        };

        let mut values = Vec::new();
        if power < 0.0 {
            // Divide by an integer increment to keep decimal ticks exact.
            let inc = 10f64.powf(-power) / factor;
            let mut i1 = (lo * inc).round();
            let mut i2 = (hi * inc).round();
            if i1 / inc < lo {
                i1 += 1.0;
            }
            if i2 / inc > hi {
                i2 -= 1.0;
            }
            let mut i = i1;
            while i <= i2 {
                values.push(i / inc);
                i += 1.0;
            }
        } else {
            let inc = 10f64.powf(power) * factor;
            let mut i1 = (lo / inc).round();
            let mut i2 = (hi / inc).round();
            if i1 * inc < lo {
                i1 += 1.0;
            }
            if i2 * inc > hi {
                i2 -= 1.0;
            }
            let mut i = i1;
            while i <= i2 {
                values.push(i * inc);
                i += 1.0;
            }
        }

        if self.domain.0 > self.domain.1 {
            values.reverse();
        }
        values
    }
}

/// Format an hour tick as `"{hour}:00"`.
pub fn hour_label(hour: f64) -> String {
    format!("{hour}:00")
}
