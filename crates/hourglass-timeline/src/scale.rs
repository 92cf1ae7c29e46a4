//! Linear time-to-pixel mapping and axis ticks.
//!
//! The mapping ratio (`ms_per_pixel`) is fixed by configuration; the pixel
//! range is the wider of the viewport and the drawn content, so the axis
//! always spans at least the visible window.

use serde::Serialize;

/// Linear map from `[0, max_time]` milliseconds to `[0, pixel_width]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeScale {
    ms_per_pixel: f64,
    pixel_width: f64,
}

impl TimeScale {
    pub fn new(ms_per_pixel: f64, pixel_width: f64) -> Self {
        Self {
            ms_per_pixel: ms_per_pixel.max(f64::MIN_POSITIVE),
            pixel_width: pixel_width.max(0.0),
        }
    }

    /// Size the range to the wider of `viewport_width` and `content_width`.
    pub fn fit(ms_per_pixel: f64, viewport_width: f64, content_width: f64) -> Self {
        Self::new(ms_per_pixel, viewport_width.max(content_width))
    }

    pub fn ms_per_pixel(&self) -> f64 {
        self.ms_per_pixel
    }

    pub fn pixel_width(&self) -> f64 {
        self.pixel_width
    }

    /// Upper end of the time domain.
    pub fn max_time(&self) -> f64 {
        self.pixel_width * self.ms_per_pixel
    }

    pub fn to_pixel(&self, time_ms: u64) -> f64 {
        time_ms as f64 / self.ms_per_pixel
    }

    pub fn to_time(&self, pixel: f64) -> f64 {
        pixel * self.ms_per_pixel
    }

    /// Drawn width of a span; never thinner than one pixel.
    pub fn span_width(&self, start_ms: u64, end_ms: u64) -> f64 {
        (self.to_pixel(end_ms) - self.to_pixel(start_ms)).max(1.0)
    }

    /// How many ticks fit with roughly `spacing` pixels between them.
    pub fn tick_count(&self, spacing: f64) -> usize {
        if spacing <= 0.0 {
            return 0;
        }
        (self.pixel_width / spacing) as usize
    }

    /// Round tick values (multiples of 1, 2 or 5 × 10ⁿ ms) covering the
    /// domain, aiming for about `count` intervals.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let max_time = self.max_time();
        if count == 0 {
            return Vec::new();
        }
        if max_time <= 0.0 {
            return vec![0.0];
        }
        let step = nice_step(max_time / count as f64);
        let last = (max_time / step + 1e-9).floor() as usize;
        (0..=last).map(|i| i as f64 * step).collect()
    }
}

/// Snap a raw interval to the nearest 1/2/5 × 10ⁿ, using the geometric
/// midpoints √2, √10 and √50 as cut-offs.
fn nice_step(raw: f64) -> f64 {
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let nice = if residual < std::f64::consts::SQRT_2 {
        1.0
    } else if residual < 10f64.sqrt() {
        2.0
    } else if residual < 50f64.sqrt() {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}
