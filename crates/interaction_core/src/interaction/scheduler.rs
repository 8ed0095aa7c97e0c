//! Frame scheduler for drivers
//!
//! Replaces implicit per-object update registration: the host registers
//! drivers (or groups) once and calls [`InteractionScheduler::tick`] once
//! per frame. Lower priority values run first; equal priorities run in
//! registration order.

use super::driver::InteractorDriver;
use super::world::InteractionWorld;

/// Handle to a scheduled driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduleId(u64);

struct Scheduled {
    id: ScheduleId,
    priority: i32,
    driver: Box<dyn InteractorDriver>,
}

/// Ticks every registered driver each frame
#[derive(Default)]
pub struct InteractionScheduler {
    entries: Vec<Scheduled>,
    next_id: u64,
    frame: u64,
}

impl InteractionScheduler {
    /// Empty scheduler
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a driver at `priority`
    pub fn add(&mut self, priority: i32, driver: impl InteractorDriver + 'static) -> ScheduleId {
        let id = ScheduleId(self.next_id);
        self.next_id += 1;
        // Insert after every entry of equal priority
        let at = self.entries.partition_point(|entry| entry.priority <= priority);
        self.entries.insert(
            at,
            Scheduled {
                id,
                priority,
                driver: Box::new(driver),
            },
        );
        id
    }

    /// Unregister a driver, disabling it first
    pub fn remove(&mut self, world: &mut InteractionWorld, id: ScheduleId) -> bool {
        let Some(index) = self.entries.iter().position(|entry| entry.id == id) else {
            return false;
        };
        let mut entry = self.entries.remove(index);
        entry.driver.disable(world);
        true
    }

    /// Look up a driver
    pub fn driver(&self, id: ScheduleId) -> Option<&dyn InteractorDriver> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &*entry.driver)
    }

    /// Look up a driver mutably
    pub fn driver_mut(&mut self, id: ScheduleId) -> Option<&mut (dyn InteractorDriver + 'static)> {
        self.entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .map(|entry| &mut *entry.driver)
    }

    /// Number of scheduled drivers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is scheduled
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Frames ticked so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Run one frame: every driver's full tick, in priority order
    pub fn tick(&mut self, world: &mut InteractionWorld, dt: f32) {
        self.frame += 1;
        log::trace!("interaction frame {} ({} drivers)", self.frame, self.entries.len());
        for entry in &mut self.entries {
            entry.driver.tick(world, dt);
        }
    }
}

impl std::fmt::Debug for InteractionScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InteractionScheduler")
            .field("drivers", &self.entries.len())
            .field("frame", &self.frame)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::state::InteractorState;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Probe {
        name: &'static str,
        log: Rc<RefCell<Vec<&'static str>>>,
        enabled: bool,
    }

    impl InteractorDriver for Probe {
        fn state(&self) -> InteractorState {
            if self.enabled {
                InteractorState::Normal
            } else {
                InteractorState::Disabled
            }
        }
        fn has_candidate(&self) -> bool {
            false
        }
        fn has_interactable(&self) -> bool {
            false
        }
        fn should_select(&self) -> bool {
            false
        }
        fn update_interaction(&mut self, _world: &mut InteractionWorld, _dt: f32) {
            self.log.borrow_mut().push(self.name);
        }
        fn update_hover(&mut self, _world: &mut InteractionWorld) {}
        fn update_selection(&mut self, _world: &mut InteractionWorld, _can_be_empty: bool) {}
        fn enable(&mut self) {
            self.enabled = true;
        }
        fn disable(&mut self, _world: &mut InteractionWorld) {
            self.enabled = false;
        }
    }

    fn probe(name: &'static str, log: &Rc<RefCell<Vec<&'static str>>>) -> Probe {
        Probe {
            name,
            log: Rc::clone(log),
            enabled: true,
        }
    }

    #[test]
    fn test_ticks_in_priority_then_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scheduler = InteractionScheduler::new();
        scheduler.add(10, probe("late", &log));
        scheduler.add(0, probe("first", &log));
        scheduler.add(0, probe("second", &log));

        let mut world = InteractionWorld::new();
        scheduler.tick(&mut world, 0.016);

        assert_eq!(*log.borrow(), vec!["first", "second", "late"]);
        assert_eq!(scheduler.frame(), 1);
    }

    #[test]
    fn test_remove_disables() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scheduler = InteractionScheduler::new();
        let mut world = InteractionWorld::new();
        let id = scheduler.add(0, probe("only", &log));
        assert_eq!(scheduler.driver(id).map(|driver| driver.state()), Some(InteractorState::Normal));

        assert!(scheduler.remove(&mut world, id));
        assert!(!scheduler.remove(&mut world, id));
        assert!(scheduler.is_empty());
        scheduler.tick(&mut world, 0.016);
        assert!(log.borrow().is_empty());
    }
}
