//! Tooltip collaborator: content, debounce timers and placement.
//!
//! Timers are modeled as deadlines checked against caller-supplied
//! [`Instant`]s, so the host's event loop decides when to `poll`. Only one
//! request is ever pending: a new show cancels a pending hide and vice
//! versa.

use std::time::{Duration, Instant};

use hourglass_types::{Record, format_millis};
use serde::Serialize;

use crate::config::TooltipConfig;

/// Offset between the pointer and a right-opening tip.
const POINTER_GAP: f64 = 10.0;

/// Text lines describing one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TipContent {
    pub lines: Vec<String>,
}

impl TipContent {
    pub fn for_record(record: &Record) -> Self {
        Self {
            lines: vec![
                record.label.clone(),
                format!("Start: {}", format_millis(record.start)),
                format!("End: {}", format_millis(record.end)),
                format!("Duration: {}", format_millis(record.duration())),
            ],
        }
    }
}

/// A timer that came due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TipEvent {
    Show(TipContent),
    Hide,
}

#[derive(Debug, Clone)]
enum Pending {
    Show { due: Instant, content: TipContent },
    Hide { due: Instant },
}

/// Show/hide debouncer. Most recent request wins.
#[derive(Debug, Clone)]
pub struct TooltipDebouncer {
    show_delay: Duration,
    hide_delay: Duration,
    pending: Option<Pending>,
    shown: bool,
}

impl TooltipDebouncer {
    pub fn new(show_delay: Duration, hide_delay: Duration) -> Self {
        Self {
            show_delay,
            hide_delay,
            pending: None,
            shown: false,
        }
    }

    pub fn from_config(config: &TooltipConfig) -> Self {
        Self::new(config.show_delay(), config.hide_delay())
    }

    /// Pointer entered a block: show `content` after the show delay.
    pub fn show(&mut self, content: TipContent, now: Instant) {
        self.pending = Some(Pending::Show {
            due: now + self.show_delay,
            content,
        });
    }

    /// Pointer left: hide after the hide delay.
    pub fn hide(&mut self, now: Instant) {
        self.pending = Some(Pending::Hide {
            due: now + self.hide_delay,
        });
    }

    /// Pointer is over the tip itself: keep it as it is.
    pub fn hold(&mut self) {
        self.pending = None;
    }

    /// Fire the pending timer if it is due.
    ///
    /// A due hide while nothing is shown just clears the timer.
    pub fn poll(&mut self, now: Instant) -> Option<TipEvent> {
        let due = match &self.pending {
            Some(Pending::Show { due, .. }) | Some(Pending::Hide { due }) => *due,
            None => return None,
        };
        if now < due {
            return None;
        }

        match self.pending.take() {
            Some(Pending::Show { content, .. }) => {
                self.shown = true;
                Some(TipEvent::Show(content))
            }
            Some(Pending::Hide { .. }) if self.shown => {
                self.shown = false;
                Some(TipEvent::Hide)
            }
            _ => None,
        }
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Last known pointer position, owned by one view.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerTracker {
    position: Option<(f64, f64)>,
}

impl PointerTracker {
    pub fn moved(&mut self, x: f64, y: f64) {
        self.position = Some((x, y));
    }

    pub fn position(&self) -> Option<(f64, f64)> {
        self.position
    }
}

/// Where to put a tip relative to the page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TipPlacement {
    pub left: f64,
    pub top: f64,
    pub opens_left: bool,
}

impl TipPlacement {
    /// Place a `width`×`height` tip next to the pointer, flipping left when
    /// it would overflow `viewport_width`.
    pub fn near(pointer: (f64, f64), width: f64, height: f64, viewport_width: f64) -> Self {
        let (x, y) = pointer;
        let opens_left = x + width > viewport_width;
        Self {
            left: x - if opens_left { width } else { POINTER_GAP },
            top: y - height,
            opens_left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn debouncer() -> TooltipDebouncer {
        TooltipDebouncer::from_config(&TooltipConfig::default())
    }

    fn content() -> TipContent {
        TipContent::for_record(&Record::root(1u64, 10, 250, "fetch"))
    }

    #[test]
    fn content_lines() {
        assert_eq!(
            content().lines,
            ["fetch", "Start: 10ms", "End: 250ms", "Duration: 240ms"]
        );
    }

    #[test]
    fn show_fires_after_delay() {
        let t0 = Instant::now();
        let mut tip = debouncer();
        tip.show(content(), t0);

        assert_eq!(tip.poll(t0 + ms(499)), None);
        assert_eq!(tip.poll(t0 + ms(500)), Some(TipEvent::Show(content())));
        assert!(tip.is_shown());
        assert_eq!(tip.poll(t0 + ms(900)), None);
    }

    #[test]
    fn leave_before_show_cancels_show() {
        let t0 = Instant::now();
        let mut tip = debouncer();
        tip.show(content(), t0);
        tip.hide(t0 + ms(200));

        // Hide is due at 300 but nothing is shown, so nothing fires
        assert_eq!(tip.poll(t0 + ms(600)), None);
        assert!(!tip.is_pending());
        assert!(!tip.is_shown());
    }

    #[test]
    fn reenter_before_hide_cancels_hide() {
        let t0 = Instant::now();
        let mut tip = debouncer();
        tip.show(content(), t0);
        tip.poll(t0 + ms(500));

        tip.hide(t0 + ms(600));
        tip.show(content(), t0 + ms(650));
        assert_eq!(tip.poll(t0 + ms(800)), None);
        assert!(tip.is_shown());
        assert_eq!(tip.poll(t0 + ms(1150)), Some(TipEvent::Show(content())));
    }

    #[test]
    fn hide_after_shown() {
        let t0 = Instant::now();
        let mut tip = debouncer();
        tip.show(content(), t0);
        tip.poll(t0 + ms(500));
        tip.hide(t0 + ms(1000));
        assert_eq!(tip.poll(t0 + ms(1100)), Some(TipEvent::Hide));
        assert!(!tip.is_shown());
    }

    #[test]
    fn hold_keeps_tip_open() {
        let t0 = Instant::now();
        let mut tip = debouncer();
        tip.show(content(), t0);
        tip.poll(t0 + ms(500));
        tip.hide(t0 + ms(600));
        tip.hold();
        assert_eq!(tip.poll(t0 + ms(2000)), None);
        assert!(tip.is_shown());
    }

    #[test]
    fn placement_flips_near_right_edge() {
        let right = TipPlacement::near((100.0, 300.0), 200.0, 60.0, 1000.0);
        assert_eq!(right, TipPlacement { left: 90.0, top: 240.0, opens_left: false });

        let left = TipPlacement::near((900.0, 300.0), 200.0, 60.0, 1000.0);
        assert_eq!(left, TipPlacement { left: 700.0, top: 240.0, opens_left: true });
    }
}
