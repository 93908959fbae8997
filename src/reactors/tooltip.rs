// SPDX-License-Identifier: MPL-2.0
//! Hover tooltips for elements carrying a `data-tooltip` attribute.
//!
//! Each hovered element owns at most one tooltip. Entering attaches a
//! transparent tooltip above the element and fades it in; leaving fades it
//! out and detaches it once the fade completes. Re-entering before that
//! replaces the old tooltip immediately, so rapid hovering never leaves
//! stray elements behind.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use super::ElementId;
use crate::config::{UiConfig, TOOLTIP_GAP_PX};
use crate::timer::{TimerQueue, TimerToken};

/// Viewport rectangle of the hovered element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

/// Measured size of an attached tooltip.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub top: f32,
    pub left: f32,
}

impl Position {
    /// Centered horizontally above `anchor`, separated by a small gap.
    #[must_use]
    pub fn above(anchor: Rect, tooltip: Size) -> Self {
        Self {
            top: anchor.top - tooltip.height - TOOLTIP_GAP_PX,
            left: anchor.left + anchor.width / 2.0 - tooltip.width / 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TooltipHandle(pub u64);

/// Where tooltip elements live.
pub trait TooltipSurface {
    /// Attaches a fully transparent tooltip and returns it with its size.
    fn attach(&mut self, text: &str) -> (TooltipHandle, Size);
    fn place(&mut self, tooltip: TooltipHandle, position: Position);
    fn set_opacity(&mut self, tooltip: TooltipHandle, opacity: f32);
    fn detach(&mut self, tooltip: TooltipHandle);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fade {
    In,
    Out,
}

#[derive(Debug)]
struct Tip {
    handle: TooltipHandle,
    timer: Option<TimerToken>,
    leaving: bool,
}

pub struct TooltipReactor {
    surface: Box<dyn TooltipSurface>,
    tips: HashMap<ElementId, Tip>,
    timers: TimerQueue<(ElementId, TooltipHandle, Fade)>,
    fade_in: Duration,
    fade_out: Duration,
}

impl std::fmt::Debug for TooltipReactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TooltipReactor")
            .field("tips", &self.tips)
            .finish_non_exhaustive()
    }
}

impl TooltipReactor {
    pub fn new(surface: Box<dyn TooltipSurface>, config: &UiConfig) -> Self {
        Self {
            surface,
            tips: HashMap::new(),
            timers: TimerQueue::new(),
            fade_in: Duration::from_millis(config.tooltip_fade_in_ms),
            fade_out: Duration::from_millis(config.tooltip_fade_out_ms),
        }
    }

    /// Shows `text` above `anchor`, replacing any tooltip the element
    /// still has.
    pub fn enter(&mut self, element: ElementId, text: &str, anchor: Rect, now: Instant) {
        self.discard(element);

        let (handle, size) = self.surface.attach(text);
        self.surface.place(handle, Position::above(anchor, size));
        let timer = self
            .timers
            .schedule(now + self.fade_in, (element, handle, Fade::In));
        self.tips.insert(
            element,
            Tip {
                handle,
                timer: Some(timer),
                leaving: false,
            },
        );
    }

    /// Starts fading the element's tooltip out. Repeated calls are no-ops.
    pub fn leave(&mut self, element: ElementId, now: Instant) {
        let Some(tip) = self.tips.get_mut(&element) else {
            return;
        };
        if tip.leaving {
            return;
        }
        if let Some(token) = tip.timer.take() {
            self.timers.cancel(token);
        }
        tip.leaving = true;
        self.surface.set_opacity(tip.handle, 0.0);
        tip.timer = Some(
            self.timers
                .schedule(now + self.fade_out, (element, tip.handle, Fade::Out)),
        );
    }

    pub fn tick(&mut self, now: Instant) {
        while let Some(fired) = self.timers.pop_due(now) {
            let (element, handle, fade) = fired.event;
            let Some(tip) = self.tips.get_mut(&element) else {
                continue;
            };
            if tip.handle != handle || tip.timer != Some(fired.token) {
                continue;
            }
            tip.timer = None;
            match fade {
                Fade::In => self.surface.set_opacity(handle, 1.0),
                Fade::Out => {
                    self.tips.remove(&element);
                    self.surface.detach(handle);
                }
            }
        }
    }

    #[must_use]
    pub fn attached_count(&self) -> usize {
        self.tips.len()
    }

    #[must_use]
    pub fn has_tooltip(&self, element: ElementId) -> bool {
        self.tips.contains_key(&element)
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Detaches every tooltip immediately.
    pub fn clear(&mut self) {
        self.timers.clear();
        for (_, tip) in self.tips.drain() {
            self.surface.detach(tip.handle);
        }
    }

    fn discard(&mut self, element: ElementId) {
        if let Some(old) = self.tips.remove(&element) {
            if let Some(token) = old.timer {
                self.timers.cancel(token);
            }
            self.surface.detach(old.handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    struct Dom {
        next: u64,
        attached: HashMap<TooltipHandle, (String, f32, Option<Position>)>,
    }

    #[derive(Clone, Default)]
    struct FakeSurface(Rc<RefCell<Dom>>);

    impl TooltipSurface for FakeSurface {
        fn attach(&mut self, text: &str) -> (TooltipHandle, Size) {
            let mut dom = self.0.borrow_mut();
            let handle = TooltipHandle(dom.next);
            dom.next += 1;
            dom.attached.insert(handle, (text.to_string(), 0.0, None));
            (
                handle,
                Size {
                    width: 80.0,
                    height: 30.0,
                },
            )
        }

        fn place(&mut self, tooltip: TooltipHandle, position: Position) {
            if let Some(entry) = self.0.borrow_mut().attached.get_mut(&tooltip) {
                entry.2 = Some(position);
            }
        }

        fn set_opacity(&mut self, tooltip: TooltipHandle, opacity: f32) {
            if let Some(entry) = self.0.borrow_mut().attached.get_mut(&tooltip) {
                entry.1 = opacity;
            }
        }

        fn detach(&mut self, tooltip: TooltipHandle) {
            self.0.borrow_mut().attached.remove(&tooltip);
        }
    }

    const ANCHOR: Rect = Rect {
        top: 200.0,
        left: 100.0,
        width: 40.0,
        height: 20.0,
    };

    fn reactor() -> (TooltipReactor, Rc<RefCell<Dom>>) {
        let surface = FakeSurface::default();
        let dom = surface.0.clone();
        (
            TooltipReactor::new(Box::new(surface), &UiConfig::default()),
            dom,
        )
    }

    #[test]
    fn enter_places_tooltip_above_anchor_and_fades_in() {
        let (mut tips, dom) = reactor();
        let t0 = Instant::now();
        let element = ElementId(1);

        tips.enter(element, "Download the archive", ANCHOR, t0);
        {
            let dom = dom.borrow();
            let (text, opacity, position) = dom.attached.values().next().expect("attached");
            assert_eq!(text, "Download the archive");
            assert_eq!(*opacity, 0.0);
            assert_eq!(
                *position,
                Some(Position {
                    top: 200.0 - 30.0 - 10.0,
                    left: 100.0 + 20.0 - 40.0,
                })
            );
        }

        tips.tick(t0 + Duration::from_millis(10));
        assert_eq!(dom.borrow().attached.values().next().map(|e| e.1), Some(1.0));
    }

    #[test]
    fn leave_detaches_after_fade_out() {
        let (mut tips, dom) = reactor();
        let t0 = Instant::now();
        let element = ElementId(1);
        tips.enter(element, "tip", ANCHOR, t0);
        tips.tick(t0 + Duration::from_millis(10));

        let t1 = t0 + Duration::from_millis(500);
        tips.leave(element, t1);
        tips.leave(element, t1);
        assert_eq!(dom.borrow().attached.values().next().map(|e| e.1), Some(0.0));

        tips.tick(t1 + Duration::from_millis(299));
        assert_eq!(dom.borrow().attached.len(), 1);
        tips.tick(t1 + Duration::from_millis(300));
        assert!(dom.borrow().attached.is_empty());
        assert!(!tips.has_tooltip(element));
    }

    #[test]
    fn leave_before_fade_in_never_turns_opaque() {
        let (mut tips, dom) = reactor();
        let t0 = Instant::now();
        let element = ElementId(3);
        tips.enter(element, "tip", ANCHOR, t0);
        tips.leave(element, t0 + Duration::from_millis(2));

        tips.tick(t0 + Duration::from_millis(10));
        assert_eq!(dom.borrow().attached.values().next().map(|e| e.1), Some(0.0));
    }

    #[test]
    fn rapid_hover_cycles_do_not_accumulate() {
        let (mut tips, dom) = reactor();
        let mut now = Instant::now();
        let element = ElementId(7);

        for _ in 0..100 {
            tips.enter(element, "tip", ANCHOR, now);
            now += Duration::from_millis(1);
            tips.leave(element, now);
            now += Duration::from_millis(1);
            tips.tick(now);
        }

        assert!(dom.borrow().attached.len() <= 1);
        assert!(tips.attached_count() <= 1);

        tips.tick(now + Duration::from_secs(1));
        assert!(dom.borrow().attached.is_empty());
    }

    #[test]
    fn elements_have_independent_tooltips() {
        let (mut tips, dom) = reactor();
        let t0 = Instant::now();
        tips.enter(ElementId(1), "a", ANCHOR, t0);
        tips.enter(ElementId(2), "b", ANCHOR, t0);
        tips.leave(ElementId(1), t0);
        tips.tick(t0 + Duration::from_millis(300));

        assert_eq!(dom.borrow().attached.len(), 1);
        assert!(tips.has_tooltip(ElementId(2)));
    }

    #[test]
    fn clear_detaches_all() {
        let (mut tips, dom) = reactor();
        let t0 = Instant::now();
        tips.enter(ElementId(1), "a", ANCHOR, t0);
        tips.enter(ElementId(2), "b", ANCHOR, t0);

        tips.clear();

        assert!(dom.borrow().attached.is_empty());
        assert_eq!(tips.next_deadline(), None);
    }
}
