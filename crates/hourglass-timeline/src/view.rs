//! The host-facing timeline view.
//!
//! `TimelineView` owns the arena, the current scale and frame, and the
//! per-view interaction state (pointer position, tooltip timers). Every
//! state change that affects geometry ends in [`TimelineView::redraw`],
//! which recomputes layout from scratch and hands the new frame to the
//! [`Surface`].

use std::time::Instant;

use hourglass_types::{Record, RecordId};

use crate::config::TimelineConfig;
use crate::frame::Frame;
use crate::layout::LayoutEngine;
use crate::scale::TimeScale;
use crate::toggle::ToggleOutcome;
use crate::tooltip::{PointerTracker, TipContent, TipEvent, TipPlacement, TooltipDebouncer};
use crate::tree::Timeline;
use crate::{Result, TimelineError};

/// Drawing surface supplied by the host.
pub trait Surface {
    /// Width of the visible window onto the canvas, in pixels.
    fn viewport_width(&self) -> f64;

    /// Draw (or re-draw) a complete frame.
    fn draw(&mut self, frame: &Frame);
}

/// Result of clicking a record's caption.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CaptionAction {
    /// Block is off screen: scroll the canvas to this left offset.
    ScrollTo(f64),
    /// Block is on screen: its branch was toggled.
    Toggled(ToggleOutcome),
}

/// Tooltip change the host should apply.
#[derive(Debug, Clone, PartialEq)]
pub enum TipUpdate {
    /// `placement` is `None` until the pointer has moved over the view.
    Show {
        content: TipContent,
        placement: Option<TipPlacement>,
    },
    Hide,
}

/// Interactive timeline bound to one surface.
pub struct TimelineView<S> {
    surface: S,
    timeline: Timeline,
    config: TimelineConfig,
    engine: LayoutEngine,
    scale: TimeScale,
    frame: Frame,
    tooltip: TooltipDebouncer,
    pointer: PointerTracker,
}

impl<S: Surface> TimelineView<S> {
    /// Build a view with default configuration and draw it once.
    pub fn create(surface: S, records: Vec<Record>) -> Result<Self> {
        Self::with_config(surface, records, TimelineConfig::default())
    }

    /// Build a view and draw it once.
    pub fn with_config(surface: S, records: Vec<Record>, config: TimelineConfig) -> Result<Self> {
        let timeline = Timeline::build(records, &config)?;
        let scale = TimeScale::fit(config.ms_per_pixel, surface.viewport_width(), 0.0);

        let mut view = Self {
            surface,
            timeline,
            engine: LayoutEngine::from_config(&config),
            tooltip: TooltipDebouncer::from_config(&config.tooltip),
            config,
            scale,
            frame: Frame::default(),
            pointer: PointerTracker::default(),
        };
        view.redraw();
        Ok(view)
    }

    /// Full relayout, rescale and draw.
    ///
    /// The scale is sized from the extent of all records rather than the
    /// visible content width, so the axis and tick positions stay put when
    /// branches open and close.
    pub fn redraw(&mut self) {
        let layout = self.engine.layout(&self.timeline, &self.scale);
        self.scale = TimeScale::fit(
            self.config.ms_per_pixel,
            self.surface.viewport_width(),
            layout.extent_width,
        );
        self.frame = Frame::compose(&self.timeline, &layout, &self.scale, &self.config);
        self.surface.draw(&self.frame);
    }

    /// Expand or collapse the branch at `id`, redrawing if anything changed.
    pub fn toggle_branch(&mut self, id: &RecordId) -> Result<ToggleOutcome> {
        let outcome = self.timeline.toggle(id)?;
        if outcome.changed() {
            self.redraw();
        }
        Ok(outcome)
    }

    /// Expand every branch and redraw.
    pub fn expand_all(&mut self) {
        if self.timeline.expand_all() > 0 {
            self.redraw();
        }
    }

    /// Collapse every branch and redraw.
    pub fn collapse_all(&mut self) {
        self.timeline.collapse_all();
        self.redraw();
    }

    /// Caption click: scroll to the block if it is more than a viewport
    /// away from `scroll_left`, otherwise toggle it.
    pub fn activate_caption(&mut self, id: &RecordId, scroll_left: f64) -> Result<CaptionAction> {
        let x = self
            .frame
            .block(id)
            .map(|b| b.x)
            .ok_or_else(|| TimelineError::NotFound(id.clone()))?;
        let viewport = self.surface.viewport_width();

        if (x - scroll_left).abs() > viewport {
            return Ok(CaptionAction::ScrollTo(x - viewport / 2.0));
        }
        self.toggle_branch(id).map(CaptionAction::Toggled)
    }

    pub fn is_visible(&self, id: &RecordId) -> Result<bool> {
        self.timeline.is_visible(id)
    }

    /// Pointer entered the block for `id`.
    pub fn show_tip(&mut self, id: &RecordId, now: Instant) -> Result<()> {
        let record = self
            .timeline
            .get(id)
            .map(|n| n.record())
            .ok_or_else(|| TimelineError::NotFound(id.clone()))?;
        self.tooltip.show(TipContent::for_record(record), now);
        Ok(())
    }

    /// Pointer left a block (or the tip).
    pub fn hide_tip(&mut self, now: Instant) {
        self.tooltip.hide(now);
    }

    /// Pointer is over the tip itself.
    pub fn hold_tip(&mut self) {
        self.tooltip.hold();
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.pointer.moved(x, y);
    }

    /// Fire any due tooltip timer.
    pub fn poll_tip(&mut self, now: Instant) -> Option<TipUpdate> {
        match self.tooltip.poll(now)? {
            TipEvent::Show(content) => {
                let tip = &self.config.tooltip;
                let placement = self.pointer.position().map(|pointer| {
                    TipPlacement::near(pointer, tip.width, tip.height, self.surface.viewport_width())
                });
                Some(TipUpdate::Show { content, placement })
            }
            TipEvent::Hide => Some(TipUpdate::Hide),
        }
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn scale(&self) -> &TimeScale {
        &self.scale
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Tear down the view, returning the surface.
    pub fn into_surface(self) -> S {
        self.surface
    }
}
