//! Arbitration between competing drivers
//!
//! A group runs its drivers phase by phase and guarantees that at most
//! one of them is selecting. While one is, it is the only driver updated
//! and every other driver is disabled. Otherwise the [`GroupStrategy`]
//! decides who may hover:
//!
//! - `Priority`: every driver searches each tick; all but the best are
//!   disabled for the hover phase
//! - `First`: the first driver to find a candidate keeps the group until
//!   it loses its candidate
//! - `Multiple`: every driver hovers freely; the first to select wins
//!
//! When no driver has a candidate, drivers may empty-select in list order.
//! After the selecting driver releases, the next tick starts from scratch.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::driver::InteractorDriver;
use super::state::InteractorState;
use super::world::InteractionWorld;
use crate::config::DriverGroupConfig;

/// Hover policy of a driver group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GroupStrategy {
    /// Best candidate in list order, re-evaluated every tick
    #[default]
    Priority,
    /// Stick with the first driver that found a candidate
    First,
    /// Everyone hovers, one selects
    Multiple,
}

/// Tie-breaker between drivers that both have a candidate
pub trait InteractorComparer {
    /// `Greater` when `a` should win over `b`
    fn compare(&self, a: &dyn InteractorDriver, b: &dyn InteractorDriver) -> Ordering;
}

impl<F> InteractorComparer for F
where
    F: Fn(&dyn InteractorDriver, &dyn InteractorDriver) -> Ordering,
{
    fn compare(&self, a: &dyn InteractorDriver, b: &dyn InteractorDriver) -> Ordering {
        self(a, b)
    }
}

/// Prefers a driver that is about to select
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectIntentComparer;

impl InteractorComparer for SelectIntentComparer {
    fn compare(&self, a: &dyn InteractorDriver, b: &dyn InteractorDriver) -> Ordering {
        a.should_select().cmp(&b.should_select())
    }
}

/// Drivers arbitrated as one
pub struct InteractorDriverGroup {
    drivers: Vec<Box<dyn InteractorDriver>>,
    strategy: GroupStrategy,
    comparer: Option<Box<dyn InteractorComparer>>,
    current: Option<usize>,
    selecting: Option<usize>,
    enabled: bool,
}

impl InteractorDriverGroup {
    /// Empty group
    pub fn new(strategy: GroupStrategy) -> Self {
        Self {
            drivers: Vec::new(),
            strategy,
            comparer: None,
            current: None,
            selecting: None,
            enabled: true,
        }
    }

    /// Empty group using configured settings
    pub fn from_config(config: &DriverGroupConfig) -> Self {
        Self::new(config.strategy)
    }

    /// Append a driver; list order is priority order
    pub fn add_driver(&mut self, driver: impl InteractorDriver + 'static) -> usize {
        self.drivers.push(Box::new(driver));
        self.drivers.len() - 1
    }

    /// Append a driver (builder style)
    #[must_use]
    pub fn with_driver(mut self, driver: impl InteractorDriver + 'static) -> Self {
        self.add_driver(driver);
        self
    }

    /// Use `comparer` to rank drivers with candidates
    #[must_use]
    pub fn with_comparer(mut self, comparer: impl InteractorComparer + 'static) -> Self {
        self.comparer = Some(Box::new(comparer));
        self
    }

    /// Hover policy
    pub fn strategy(&self) -> GroupStrategy {
        self.strategy
    }

    /// Number of drivers
    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    /// Whether the group has no drivers
    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }

    /// Driver at `index`
    pub fn driver(&self, index: usize) -> Option<&dyn InteractorDriver> {
        self.drivers.get(index).map(|driver| &**driver)
    }

    /// Index of the driver currently chosen for hover
    pub fn current_driver(&self) -> Option<usize> {
        self.current
    }

    /// Index of the driver currently selecting
    pub fn selecting_driver(&self) -> Option<usize> {
        self.selecting
    }

    /// Best driver with a candidate; ties keep the earlier one
    fn best_candidate(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (index, driver) in self.drivers.iter().enumerate() {
            if !driver.has_candidate() {
                continue;
            }
            let better = match (best, &self.comparer) {
                (None, _) => true,
                (Some(current), Some(comparer)) => {
                    comparer.compare(&**driver, &*self.drivers[current]) == Ordering::Greater
                }
                (Some(_), None) => false,
            };
            if better {
                best = Some(index);
            }
        }
        best
    }

    fn enable_and_update(&mut self, world: &mut InteractionWorld, dt: f32, skip: Option<usize>) {
        for (index, driver) in self.drivers.iter_mut().enumerate() {
            if Some(index) == skip {
                continue;
            }
            driver.enable();
            driver.update_interaction(world, dt);
        }
    }

    fn disable_all_except(&mut self, world: &mut InteractionWorld, keep: usize) {
        for (index, driver) in self.drivers.iter_mut().enumerate() {
            if index != keep {
                driver.disable(world);
            }
        }
    }

    fn pin_selecting(&mut self, world: &mut InteractionWorld, index: usize) {
        log::debug!("driver group: driver {index} selecting");
        self.selecting = Some(index);
        self.current = Some(index);
        self.disable_all_except(world, index);
    }

    /// Run the selection phase over `order`, pinning the first to select
    fn select_first(&mut self, world: &mut InteractionWorld, order: &[usize], can_be_empty: bool) {
        for &index in order {
            self.drivers[index].update_selection(world, can_be_empty);
            if self.drivers[index].is_selecting() {
                self.pin_selecting(world, index);
                return;
            }
        }
    }
}

impl InteractorDriver for InteractorDriverGroup {
    fn state(&self) -> InteractorState {
        if !self.enabled {
            InteractorState::Disabled
        } else if self.selecting.is_some() {
            InteractorState::Select
        } else if self.drivers.iter().any(|driver| driver.is_hovering()) {
            InteractorState::Hover
        } else {
            InteractorState::Normal
        }
    }

    fn has_candidate(&self) -> bool {
        self.drivers.iter().any(|driver| driver.has_candidate())
    }

    fn has_interactable(&self) -> bool {
        self.drivers.iter().any(|driver| driver.has_interactable())
    }

    fn should_select(&self) -> bool {
        self.drivers.iter().any(|driver| driver.should_select())
    }

    fn update_interaction(&mut self, world: &mut InteractionWorld, dt: f32) {
        if !self.enabled {
            return;
        }
        if let Some(selecting) = self.selecting {
            self.drivers[selecting].update_interaction(world, dt);
            return;
        }

        match (self.strategy, self.current) {
            (GroupStrategy::First, Some(locked)) => {
                self.drivers[locked].update_interaction(world, dt);
                if self.drivers[locked].has_candidate() {
                    return;
                }
                log::debug!("driver group: driver {locked} lost its candidate");
                self.current = None;
                self.enable_and_update(world, dt, Some(locked));
            }
            _ => self.enable_and_update(world, dt, None),
        }

        let best = self.best_candidate();
        if best != self.current {
            log::debug!("driver group: current driver {:?} -> {:?}", self.current, best);
        }
        self.current = best;
    }

    fn update_hover(&mut self, world: &mut InteractionWorld) {
        if !self.enabled {
            return;
        }
        if let Some(selecting) = self.selecting {
            self.drivers[selecting].update_hover(world);
            return;
        }
        match (self.strategy, self.current) {
            (GroupStrategy::Priority | GroupStrategy::First, Some(current)) => {
                self.disable_all_except(world, current);
                self.drivers[current].update_hover(world);
            }
            _ => {
                for driver in &mut self.drivers {
                    driver.update_hover(world);
                }
            }
        }
    }

    fn update_selection(&mut self, world: &mut InteractionWorld, can_be_empty: bool) {
        if !self.enabled {
            return;
        }
        if let Some(selecting) = self.selecting {
            self.drivers[selecting].update_selection(world, can_be_empty);
            if !self.drivers[selecting].is_selecting() {
                log::debug!("driver group: driver {selecting} released");
                self.selecting = None;
                self.current = None;
                for driver in &mut self.drivers {
                    driver.enable();
                }
            }
            return;
        }

        let all: Vec<usize> = (0..self.drivers.len()).collect();
        match (self.strategy, self.current) {
            (_, None) => self.select_first(world, &all, can_be_empty),
            (GroupStrategy::Multiple, Some(_)) => self.select_first(world, &all, false),
            (_, Some(current)) => self.select_first(world, &[current], false),
        }
    }

    fn enable(&mut self) {
        self.enabled = true;
        for (index, driver) in self.drivers.iter_mut().enumerate() {
            // Siblings of a pinned selector stay off
            if self.selecting.map_or(true, |selecting| selecting == index) {
                driver.enable();
            }
        }
    }

    fn disable(&mut self, world: &mut InteractionWorld) {
        self.enabled = false;
        self.current = None;
        self.selecting = None;
        for driver in &mut self.drivers {
            driver.disable(world);
        }
    }
}

impl fmt::Debug for InteractorDriverGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractorDriverGroup")
            .field("drivers", &self.drivers.len())
            .field("strategy", &self.strategy)
            .field("current", &self.current)
            .field("selecting", &self.selecting)
            .finish()
    }
}
