//! Selectors: edge-triggered select/unselect sources
//!
//! An interactor subscribes to its selector's two signals and turns each
//! edge into a one-shot flag consumed on its next selection pass.

use std::cell::RefCell;
use std::rc::Rc;

use crate::events::Signal;

/// Edge-triggered gesture or button
pub trait Selector {
    /// Fired on the select edge
    fn when_selected(&mut self) -> &mut Signal<()>;

    /// Fired on the unselect edge
    fn when_unselected(&mut self) -> &mut Signal<()>;
}

/// Selector shared between its host and the interactors listening to it
pub type SharedSelector = Rc<RefCell<dyn Selector>>;

/// Press/release selector driven directly by the host
#[derive(Debug, Default)]
pub struct ButtonSelector {
    pressed: bool,
    when_selected: Signal<()>,
    when_unselected: Signal<()>,
}

impl ButtonSelector {
    /// Create a released button
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a released button already wrapped for sharing
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Press; fires the select edge unless already pressed
    pub fn press(&mut self) {
        if !self.pressed {
            self.pressed = true;
            self.when_selected.emit(&());
        }
    }

    /// Release; fires the unselect edge unless already released
    pub fn release(&mut self) {
        if self.pressed {
            self.pressed = false;
            self.when_unselected.emit(&());
        }
    }

    /// Whether the button is held
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}

impl Selector for ButtonSelector {
    fn when_selected(&mut self) -> &mut Signal<()> {
        &mut self.when_selected
    }

    fn when_unselected(&mut self) -> &mut Signal<()> {
        &mut self.when_unselected
    }
}

/// Edge detector over a boolean gesture state, such as "is pinching"
pub struct GestureSelector {
    active: bool,
    gesture: Box<dyn Fn() -> bool>,
    when_selected: Signal<()>,
    when_unselected: Signal<()>,
}

impl GestureSelector {
    /// Watch `gesture`, polled on every [`update`](Self::update)
    pub fn new(gesture: impl Fn() -> bool + 'static) -> Self {
        Self {
            active: false,
            gesture: Box::new(gesture),
            when_selected: Signal::new(),
            when_unselected: Signal::new(),
        }
    }

    /// Poll the gesture and fire on a rising or falling edge
    pub fn update(&mut self) {
        let active = (self.gesture)();
        if active == self.active {
            return;
        }
        self.active = active;
        if active {
            self.when_selected.emit(&());
        } else {
            self.when_unselected.emit(&());
        }
    }

    /// Gesture state seen by the last update
    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl std::fmt::Debug for GestureSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureSelector")
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

impl Selector for GestureSelector {
    fn when_selected(&mut self) -> &mut Signal<()> {
        &mut self.when_selected
    }

    fn when_unselected(&mut self) -> &mut Signal<()> {
        &mut self.when_unselected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{ActiveState, SharedFlag};
    use std::cell::Cell;

    fn counter(signal: &mut Signal<()>) -> Rc<Cell<u32>> {
        let hits = Rc::new(Cell::new(0));
        let sink = Rc::clone(&hits);
        signal.connect(move |()| sink.set(sink.get() + 1));
        hits
    }

    #[test]
    fn test_button_fires_edges_once() {
        let mut button = ButtonSelector::new();
        let selected = counter(button.when_selected());
        let unselected = counter(button.when_unselected());

        button.press();
        button.press();
        button.release();
        button.release();

        assert_eq!(selected.get(), 1);
        assert_eq!(unselected.get(), 1);
    }

    #[test]
    fn test_gesture_edges() {
        let flag = SharedFlag::new(false);
        let source = flag.clone();
        let mut gesture = GestureSelector::new(move || source.is_active());
        let selected = counter(gesture.when_selected());
        let unselected = counter(gesture.when_unselected());

        gesture.update();
        flag.set(true);
        gesture.update();
        gesture.update();
        flag.set(false);
        gesture.update();

        assert_eq!(selected.get(), 1);
        assert_eq!(unselected.get(), 1);
        assert!(!gesture.is_active());
    }
}
