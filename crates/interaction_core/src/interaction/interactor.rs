//! The interactor state machine
//!
//! One [`Interactor`] per input (a hand, a controller, a fingertip). The
//! generic state machine lives here; everything modality-specific is a
//! [`Modality`] hook. Each tick runs in three phases so that a driver
//! group can interleave several interactors:
//!
//! 1. [`update_interaction`](Interactor::update_interaction): reconcile
//!    external membership changes, run the update hooks, compute the
//!    candidate (kept as-is while selecting)
//! 2. [`update_hover`](Interactor::update_hover): move hover to the candidate
//! 3. [`update_selection`](Interactor::update_selection): consume selector
//!    edges, decide select/unselect, apply them
//!
//! State transitions:
//!
//! ```text
//!            enable            hover              select
//! Disabled ─────────▶ Normal ─────────▶ Hover ─────────────▶ Select
//!     ▲                  ▲ ◀─────────── │ ◀─────────────────  │
//!     │                  │   unhover        unselect          │
//!     └──────────────────┴──── disable (from any state) ──────┘
//! ```
//!
//! An empty select goes `Normal -> Select` with no interactable attached
//! and unselects straight back to `Normal`.

use std::cell::Cell;
use std::rc::Rc;

use super::filter::{FilterChain, InteractableFilter};
use super::interactable::{Interactable, InteractableData, InteractableKey};
use super::registry::InteractableRegistry;
use super::selector::SharedSelector;
use super::state::{InteractorState, StateChange};
use super::world::InteractionWorld;
use crate::events::{Signal, SubscriptionId};
use crate::foundation::collections::UniqueId;

/// Interactors draw ids from the same pool as interactables
pub type InteractorId = UniqueId;

/// Read-only view handed to modality hooks
pub struct InteractorContext<'a, D> {
    /// The interactor's id
    pub id: InteractorId,
    /// State at the time of the call
    pub state: InteractorState,
    /// Candidate from the latest candidate search
    pub candidate: Option<InteractableKey>,
    /// Hovered (or selected) interactable
    pub interactable: Option<InteractableKey>,
    /// Selected interactable, only while selecting
    pub selected: Option<InteractableKey>,
    /// Seconds since the previous tick
    pub dt: f32,
    /// Interactables of this modality
    pub registry: &'a InteractableRegistry<D>,
    filters: &'a FilterChain<D>,
}

impl<'a, D> InteractorContext<'a, D> {
    /// Whether `interactable` passes the interactor's filter chain
    pub fn is_filter_passed_by(&self, interactable: &Interactable<D>) -> bool {
        self.filters.is_passed_by(interactable)
    }

    /// Whether `interactable` may be a candidate: enabled, has room for
    /// this interactor, and passes the filter chain
    pub fn accepts(&self, interactable: &Interactable<D>) -> bool {
        interactable.is_potential_candidate_for(self.id) && self.is_filter_passed_by(interactable)
    }

    /// Look up an interactable of this modality
    pub fn get(&self, key: InteractableKey) -> Option<&'a Interactable<D>> {
        self.registry.get(key)
    }

    /// The hovered or selected interactable, if it still exists
    pub fn current(&self) -> Option<&'a Interactable<D>> {
        self.interactable.and_then(|key| self.registry.get(key))
    }
}

/// Modality-specific behavior plugged into an [`Interactor`]
pub trait Modality: 'static {
    /// Interactable payload this modality targets
    type Data: InteractableData;

    /// Runs first on every live tick, whatever the state
    fn do_every_update(&mut self, _ctx: &InteractorContext<'_, Self::Data>) {}

    /// Runs on live ticks while in `Normal`
    fn do_normal_update(&mut self, _ctx: &InteractorContext<'_, Self::Data>) {}

    /// Runs on live ticks while in `Hover`
    fn do_hover_update(&mut self, _ctx: &InteractorContext<'_, Self::Data>) {}

    /// Runs on live ticks while in `Select`
    fn do_select_update(&mut self, _ctx: &InteractorContext<'_, Self::Data>) {}

    /// Best interactable this tick
    ///
    /// Implementations must skip interactables rejected by
    /// [`InteractorContext::accepts`].
    fn compute_candidate(&mut self, ctx: &InteractorContext<'_, Self::Data>) -> Option<InteractableKey>;

    /// Whether to select; `requested` is a pending selector edge
    fn compute_should_select(&self, _ctx: &InteractorContext<'_, Self::Data>, requested: bool) -> bool {
        requested
    }

    /// Whether to unselect; `requested` is a pending selector edge
    fn compute_should_unselect(&self, _ctx: &InteractorContext<'_, Self::Data>, requested: bool) -> bool {
        requested
    }

    /// Called after entering `Select`; `ctx.selected` is `None` for an empty select
    fn on_select(&mut self, _ctx: &InteractorContext<'_, Self::Data>) {}

    /// Called while leaving `Select`
    fn on_unselect(&mut self, _ctx: &InteractorContext<'_, Self::Data>) {}

    /// Called when the interactor is disabled
    fn on_disable(&mut self) {}
}

/// One-shot flags written by selector handlers, read once per tick
#[derive(Debug, Default)]
struct SelectorFlags {
    select: Cell<bool>,
    unselect: Cell<bool>,
}

struct SelectorLink {
    selector: SharedSelector,
    subscriptions: Option<(SubscriptionId, SubscriptionId)>,
}

/// A per-input state machine over one modality
pub struct Interactor<M: Modality> {
    id: InteractorId,
    state: InteractorState,
    candidate: Option<InteractableKey>,
    interactable: Option<InteractableKey>,
    selected: Option<InteractableKey>,
    should_select: bool,
    should_unselect: bool,
    dt: f32,
    filters: FilterChain<M::Data>,
    selector: Option<SelectorLink>,
    flags: Rc<SelectorFlags>,
    modality: M,
    when_state_changed: Signal<StateChange<InteractorState>>,
    when_updated: Signal<()>,
    when_interactable_set: Signal<InteractableKey>,
    when_interactable_unset: Signal<InteractableKey>,
    when_interactable_selected: Signal<InteractableKey>,
    when_interactable_unselected: Signal<InteractableKey>,
}

impl<M: Modality> Interactor<M> {
    /// Create an interactor in `Normal`, drawing its id from `world`
    pub fn new(world: &mut InteractionWorld, modality: M) -> Self {
        Self {
            id: world.allocate_id(),
            state: InteractorState::Normal,
            candidate: None,
            interactable: None,
            selected: None,
            should_select: false,
            should_unselect: false,
            dt: 0.0,
            filters: FilterChain::new(),
            selector: None,
            flags: Rc::new(SelectorFlags::default()),
            modality,
            when_state_changed: Signal::new(),
            when_updated: Signal::new(),
            when_interactable_set: Signal::new(),
            when_interactable_unset: Signal::new(),
            when_interactable_selected: Signal::new(),
            when_interactable_unselected: Signal::new(),
        }
    }

    /// Create an interactor listening to `selector`
    pub fn with_selector(world: &mut InteractionWorld, modality: M, selector: SharedSelector) -> Self {
        let mut interactor = Self::new(world, modality);
        interactor.set_selector(Some(selector));
        interactor
    }

    /// Destroy the interactor, releasing its interactable and its id
    pub fn despawn(mut self, world: &mut InteractionWorld) {
        self.disable(world);
        world.release_id(self.id);
    }

    /// Replace the selector; subscribes immediately unless disabled
    pub fn set_selector(&mut self, selector: Option<SharedSelector>) {
        self.unsubscribe();
        self.selector = selector.map(|selector| SelectorLink {
            selector,
            subscriptions: None,
        });
        if self.state != InteractorState::Disabled {
            self.subscribe();
        }
    }

    /// Add a candidate filter
    pub fn add_filter(&mut self, filter: impl InteractableFilter<M::Data> + 'static) {
        self.filters.push(filter);
    }

    /// Candidate filter chain
    pub fn filters_mut(&mut self) -> &mut FilterChain<M::Data> {
        &mut self.filters
    }

    /// Whether `interactable` passes the filter chain
    pub fn is_filter_passed_by(&self, interactable: &Interactable<M::Data>) -> bool {
        self.filters.is_passed_by(interactable)
    }

    // ── Queries ────────────────────────────────────────────

    /// Id from the world's pool
    pub fn id(&self) -> InteractorId {
        self.id
    }

    /// Current state
    pub fn state(&self) -> InteractorState {
        self.state
    }

    /// Candidate from the latest candidate search
    pub fn candidate(&self) -> Option<InteractableKey> {
        self.candidate
    }

    /// Hovered or selected interactable
    pub fn interactable(&self) -> Option<InteractableKey> {
        self.interactable
    }

    /// Selected interactable; only ever `Some` in `Select`
    pub fn selected_interactable(&self) -> Option<InteractableKey> {
        self.selected
    }

    /// Whether a candidate was found
    pub fn has_candidate(&self) -> bool {
        self.candidate.is_some()
    }

    /// Whether an interactable is hovered or selected
    pub fn has_interactable(&self) -> bool {
        self.interactable.is_some()
    }

    /// Whether an interactable is selected
    pub fn has_selected_interactable(&self) -> bool {
        self.selected.is_some()
    }

    /// Whether the state is `Hover`
    pub fn is_hovering(&self) -> bool {
        self.state == InteractorState::Hover
    }

    /// Whether the state is `Select`
    pub fn is_selecting(&self) -> bool {
        self.state == InteractorState::Select
    }

    /// Latest select intent
    ///
    /// After [`update_interaction`](Self::update_interaction) this is a
    /// preview against the fresh candidate; after
    /// [`update_selection`](Self::update_selection) it is the decision
    /// that was applied.
    pub fn should_select(&self) -> bool {
        self.should_select
    }

    /// Latest unselect intent
    pub fn should_unselect(&self) -> bool {
        self.should_unselect
    }

    /// Modality state
    pub fn modality(&self) -> &M {
        &self.modality
    }

    /// Mutable modality state
    pub fn modality_mut(&mut self) -> &mut M {
        &mut self.modality
    }

    // ── Notifications ──────────────────────────────────────

    /// Fired on every state transition
    pub fn when_state_changed(&mut self) -> &mut Signal<StateChange<InteractorState>> {
        &mut self.when_state_changed
    }

    /// Fired at the end of every live interaction phase
    pub fn when_updated(&mut self) -> &mut Signal<()> {
        &mut self.when_updated
    }

    /// Fired when an interactable becomes hovered
    pub fn when_interactable_set(&mut self) -> &mut Signal<InteractableKey> {
        &mut self.when_interactable_set
    }

    /// Fired when the hovered interactable is let go
    pub fn when_interactable_unset(&mut self) -> &mut Signal<InteractableKey> {
        &mut self.when_interactable_unset
    }

    /// Fired when an interactable becomes selected
    pub fn when_interactable_selected(&mut self) -> &mut Signal<InteractableKey> {
        &mut self.when_interactable_selected
    }

    /// Fired when the selected interactable is released
    pub fn when_interactable_unselected(&mut self) -> &mut Signal<InteractableKey> {
        &mut self.when_interactable_unselected
    }

    // ── Tick ───────────────────────────────────────────────

    /// Run a whole tick; an empty select is allowed
    pub fn update_interactor(&mut self, world: &mut InteractionWorld, dt: f32) {
        self.update_interaction(world, dt);
        self.update_hover(world);
        self.update_selection(world, true);
    }

    /// Reconcile, run the update hooks and search for a candidate
    pub fn update_interaction(&mut self, world: &mut InteractionWorld, dt: f32) {
        if self.state == InteractorState::Disabled {
            return;
        }
        self.dt = dt;
        self.reconcile(world);

        let registry = M::Data::registry(world);
        let candidate = {
            let (modality, ctx) = self.split(registry);
            modality.do_every_update(&ctx);
            match ctx.state {
                InteractorState::Normal => modality.do_normal_update(&ctx),
                InteractorState::Hover => modality.do_hover_update(&ctx),
                InteractorState::Select => modality.do_select_update(&ctx),
                InteractorState::Disabled => {}
            }
            if ctx.state == InteractorState::Select {
                ctx.candidate
            } else {
                modality.compute_candidate(&ctx)
            }
        };
        self.candidate = candidate;

        let requested = self.flags.select.get();
        let preview = {
            let (modality, ctx) = self.split(registry);
            modality.compute_should_select(&ctx, requested)
        };
        self.should_select = preview;
        self.when_updated.emit(&());
    }

    /// Move hover onto the current candidate
    pub fn update_hover(&mut self, world: &mut InteractionWorld) {
        if !matches!(self.state, InteractorState::Normal | InteractorState::Hover) {
            return;
        }
        if self.candidate == self.interactable {
            return;
        }
        self.unhover(world);
        self.hover(world);
    }

    /// Consume selector edges and apply select/unselect
    ///
    /// `can_be_empty` allows selecting with nothing hovered. A select and
    /// an unselect decided in the same tick are both applied, in that
    /// order, so a quick tap is not lost.
    pub fn update_selection(&mut self, world: &mut InteractionWorld, can_be_empty: bool) {
        if self.state == InteractorState::Disabled {
            return;
        }
        let requested_select = self.flags.select.take();
        let requested_unselect = self.flags.unselect.take();

        let registry = M::Data::registry(world);
        let (should_select, should_unselect) = {
            let (modality, ctx) = self.split(registry);
            (
                modality.compute_should_select(&ctx, requested_select),
                modality.compute_should_unselect(&ctx, requested_unselect),
            )
        };
        self.should_select = should_select;
        self.should_unselect = should_unselect;

        if should_select {
            self.select(world, can_be_empty);
        }
        if should_unselect {
            self.unselect(world);
        }
    }

    // ── Transitions ────────────────────────────────────────

    /// `Normal -> Hover` onto the candidate; `false` if refused
    pub fn hover(&mut self, world: &mut InteractionWorld) -> bool {
        if self.state != InteractorState::Normal {
            return false;
        }
        let Some(key) = self.candidate else {
            return false;
        };
        let id = self.id;
        let added = M::Data::registry_mut(world)
            .get_mut(key)
            .is_some_and(|entry| entry.add_interactor(id));
        if !added {
            return false;
        }
        self.interactable = Some(key);
        self.when_interactable_set.emit(&key);
        self.set_state(InteractorState::Hover);
        true
    }

    /// `Hover -> Normal`, letting go of the interactable
    pub fn unhover(&mut self, world: &mut InteractionWorld) {
        if self.state != InteractorState::Hover {
            return;
        }
        self.unset_interactable(world);
        self.set_state(InteractorState::Normal);
    }

    /// Enter `Select`
    ///
    /// From `Hover`, the interactable must accept through
    /// `can_be_selected_by`. From `Normal` with nothing hovered, only an
    /// empty select is possible and only if `can_be_empty`.
    pub fn select(&mut self, world: &mut InteractionWorld, can_be_empty: bool) -> bool {
        match (self.state, self.interactable) {
            (InteractorState::Hover, Some(key)) => {
                let id = self.id;
                let accepted = M::Data::registry_mut(world).get_mut(key).is_some_and(|entry| {
                    entry.can_be_selected_by(id) && entry.add_selecting_interactor(id)
                });
                if !accepted {
                    log::trace!("interactor {id}: selection refused");
                    return false;
                }
                self.selected = Some(key);
                self.set_state(InteractorState::Select);
                self.when_interactable_selected.emit(&key);
            }
            (InteractorState::Normal, None) if can_be_empty => {
                self.set_state(InteractorState::Select);
            }
            _ => return false,
        }

        let registry = M::Data::registry(world);
        let (modality, ctx) = self.split(registry);
        modality.on_select(&ctx);
        true
    }

    /// Leave `Select`, back to `Hover` if still hovering, else `Normal`
    pub fn unselect(&mut self, world: &mut InteractionWorld) {
        if self.state != InteractorState::Select {
            return;
        }
        if let Some(key) = self.selected.take() {
            if let Some(entry) = M::Data::registry_mut(world).get_mut(key) {
                entry.remove_selecting_interactor(self.id);
            }
            self.when_interactable_unselected.emit(&key);
        }
        {
            let registry = M::Data::registry(world);
            let (modality, ctx) = self.split(registry);
            modality.on_unselect(&ctx);
        }
        let next = if self.interactable.is_some() {
            InteractorState::Hover
        } else {
            InteractorState::Normal
        };
        self.set_state(next);
    }

    /// Switch on; no-op unless disabled
    pub fn enable(&mut self) {
        if self.state != InteractorState::Disabled {
            return;
        }
        self.set_state(InteractorState::Normal);
        self.subscribe();
    }

    /// Unselect, unhover, and stop listening to the selector
    pub fn disable(&mut self, world: &mut InteractionWorld) {
        if self.state == InteractorState::Disabled {
            return;
        }
        self.unselect(world);
        self.unhover(world);
        self.candidate = None;
        self.should_select = false;
        self.should_unselect = false;
        self.flags.select.set(false);
        self.flags.unselect.set(false);
        self.modality.on_disable();
        self.set_state(InteractorState::Disabled);
        self.unsubscribe();
    }

    // ── Internals ──────────────────────────────────────────

    fn split<'a>(
        &'a mut self,
        registry: &'a InteractableRegistry<M::Data>,
    ) -> (&'a mut M, InteractorContext<'a, M::Data>) {
        let ctx = InteractorContext {
            id: self.id,
            state: self.state,
            candidate: self.candidate,
            interactable: self.interactable,
            selected: self.selected,
            dt: self.dt,
            registry,
            filters: &self.filters,
        };
        (&mut self.modality, ctx)
    }

    fn set_state(&mut self, new: InteractorState) {
        if let Some(change) = StateChange::between(self.state, new) {
            self.state = new;
            log::trace!("interactor {}: {} -> {}", self.id, change.previous, change.new);
            self.when_state_changed.emit(&change);
        }
    }

    fn unset_interactable(&mut self, world: &mut InteractionWorld) {
        let Some(key) = self.interactable.take() else {
            return;
        };
        if let Some(entry) = M::Data::registry_mut(world).get_mut(key) {
            entry.remove_interactor(self.id);
        }
        self.when_interactable_unset.emit(&key);
    }

    /// Drop an interactable that no longer lists this interactor, because
    /// it was destroyed, disabled, or handed the selection to someone else
    fn reconcile(&mut self, world: &mut InteractionWorld) {
        let Some(key) = self.interactable else {
            return;
        };
        let id = self.id;
        let selecting = self.state == InteractorState::Select;
        let held = M::Data::registry(world).get(key).is_some_and(|entry| {
            if selecting {
                entry.has_selecting_interactor(id)
            } else {
                entry.has_interactor(id)
            }
        });
        if held {
            return;
        }
        log::trace!("interactor {id}: interactable no longer holds it");
        self.unselect(world);
        self.unhover(world);
    }

    fn subscribe(&mut self) {
        let Some(link) = self.selector.as_mut() else {
            return;
        };
        if link.subscriptions.is_some() {
            return;
        }
        let Ok(mut selector) = link.selector.try_borrow_mut() else {
            log::warn!("interactor {}: selector busy, not subscribed", self.id);
            return;
        };
        let flags = Rc::clone(&self.flags);
        let on_selected = selector
            .when_selected()
            .connect(move |()| flags.select.set(true));
        let flags = Rc::clone(&self.flags);
        let on_unselected = selector
            .when_unselected()
            .connect(move |()| flags.unselect.set(true));
        drop(selector);
        link.subscriptions = Some((on_selected, on_unselected));
    }

    fn unsubscribe(&mut self) {
        let Some(link) = self.selector.as_mut() else {
            return;
        };
        let Some((on_selected, on_unselected)) = link.subscriptions else {
            return;
        };
        let Ok(mut selector) = link.selector.try_borrow_mut() else {
            log::warn!("interactor {}: selector busy, not unsubscribed", self.id);
            return;
        };
        selector.when_selected().disconnect(on_selected);
        selector.when_unselected().disconnect(on_unselected);
        drop(selector);
        link.subscriptions = None;
    }
}

impl<M: Modality> Drop for Interactor<M> {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::selector::ButtonSelector;
    use crate::interaction::state::InteractableState;
    use crate::interaction::tests::support::{ball, Scripted};
    use crate::grab::GrabInteractable;
    use std::cell::RefCell;

    #[test]
    fn test_hover_then_select_then_release() {
        let mut world = InteractionWorld::new();
        let key = ball(&mut world, 0.0);
        let button = ButtonSelector::shared();
        let (modality, target) = Scripted::new();
        let mut interactor = Interactor::with_selector(&mut world, modality, button.clone());

        target.set(Some(key));
        interactor.update_interactor(&mut world, 0.016);
        assert_eq!(interactor.state(), InteractorState::Hover);
        assert_eq!(interactor.interactable(), Some(key));

        button.borrow_mut().press();
        interactor.update_interactor(&mut world, 0.016);
        assert_eq!(interactor.state(), InteractorState::Select);
        assert_eq!(interactor.selected_interactable(), Some(key));
        let entry = world.interactable::<GrabInteractable>(key).unwrap();
        assert_eq!(entry.state(), InteractableState::Select);

        button.borrow_mut().release();
        interactor.update_interactor(&mut world, 0.016);
        assert_eq!(interactor.state(), InteractorState::Hover);
        assert_eq!(interactor.selected_interactable(), None);
    }

    #[test]
    fn test_selector_edge_consumed_once() {
        let mut world = InteractionWorld::new();
        let key = ball(&mut world, 0.0);
        let button = ButtonSelector::shared();
        let (modality, target) = Scripted::new();
        let mut interactor = Interactor::with_selector(&mut world, modality, button.clone());
        target.set(Some(key));

        button.borrow_mut().press();
        interactor.update_interactor(&mut world, 0.016);
        assert!(interactor.is_selecting());
        assert!(interactor.should_select());

        interactor.update_interactor(&mut world, 0.016);
        assert!(!interactor.should_select());
        assert!(interactor.is_selecting());
    }

    #[test]
    fn test_tap_within_one_tick_selects_and_releases() {
        let mut world = InteractionWorld::new();
        let key = ball(&mut world, 0.0);
        let button = ButtonSelector::shared();
        let (modality, target) = Scripted::new();
        let mut interactor = Interactor::with_selector(&mut world, modality, button.clone());
        target.set(Some(key));
        interactor.update_interactor(&mut world, 0.016);

        let selected = Rc::new(Cell::new(0));
        let sink = Rc::clone(&selected);
        interactor
            .when_interactable_selected()
            .connect(move |_| sink.set(sink.get() + 1));

        button.borrow_mut().press();
        button.borrow_mut().release();
        interactor.update_interactor(&mut world, 0.016);

        assert_eq!(selected.get(), 1);
        assert_eq!(interactor.state(), InteractorState::Hover);
    }

    #[test]
    fn test_empty_select_from_normal() {
        let mut world = InteractionWorld::new();
        let button = ButtonSelector::shared();
        let (modality, _target) = Scripted::new();
        let mut interactor = Interactor::with_selector(&mut world, modality, button.clone());

        button.borrow_mut().press();
        interactor.update_interaction(&mut world, 0.016);
        interactor.update_hover(&mut world);
        interactor.update_selection(&mut world, false);
        assert_eq!(interactor.state(), InteractorState::Normal);

        button.borrow_mut().release();
        interactor.update_interactor(&mut world, 0.016);
        assert_eq!(interactor.state(), InteractorState::Normal);

        button.borrow_mut().press();
        interactor.update_interactor(&mut world, 0.016);
        assert_eq!(interactor.state(), InteractorState::Select);
        assert!(interactor.selected_interactable().is_none());

        button.borrow_mut().release();
        interactor.update_interactor(&mut world, 0.016);
        assert_eq!(interactor.state(), InteractorState::Normal);
    }

    #[test]
    fn test_disable_releases_everything_and_ignores_selector() {
        let mut world = InteractionWorld::new();
        let key = ball(&mut world, 0.0);
        let button = ButtonSelector::shared();
        let (modality, target) = Scripted::new();
        let mut interactor = Interactor::with_selector(&mut world, modality, button.clone());
        target.set(Some(key));
        button.borrow_mut().press();
        interactor.update_interactor(&mut world, 0.016);
        assert!(interactor.is_selecting());

        interactor.disable(&mut world);
        assert_eq!(interactor.state(), InteractorState::Disabled);
        assert!(interactor.interactable().is_none());
        let entry = world.interactable::<GrabInteractable>(key).unwrap();
        assert_eq!(entry.interactors_count(), 0);
        assert_eq!(entry.selecting_interactors_count(), 0);

        button.borrow_mut().release();
        button.borrow_mut().press();
        interactor.update_interactor(&mut world, 0.016);
        assert_eq!(interactor.state(), InteractorState::Disabled);

        interactor.enable();
        interactor.update_interactor(&mut world, 0.016);
        assert_eq!(interactor.state(), InteractorState::Hover);
    }

    #[test]
    fn test_despawned_interactable_is_unset_next_tick() {
        let mut world = InteractionWorld::new();
        let key = ball(&mut world, 0.0);
        let (modality, target) = Scripted::new();
        let mut interactor = Interactor::new(&mut world, modality);
        target.set(Some(key));
        interactor.update_interactor(&mut world, 0.016);

        let unset = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&unset);
        interactor
            .when_interactable_unset()
            .connect(move |key| sink.borrow_mut().push(*key));

        world.despawn::<GrabInteractable>(key);
        interactor.update_interactor(&mut world, 0.016);

        assert_eq!(*unset.borrow(), vec![key]);
        assert_eq!(interactor.state(), InteractorState::Normal);
        assert!(!interactor.has_candidate());
    }

    #[test]
    fn test_filter_rejects_candidate() {
        let mut world = InteractionWorld::new();
        let key = ball(&mut world, 0.0);
        let (modality, target) = Scripted::new();
        let mut interactor = Interactor::new(&mut world, modality);
        interactor.add_filter(|_: &Interactable<GrabInteractable>| false);
        target.set(Some(key));

        interactor.update_interactor(&mut world, 0.016);
        assert_eq!(interactor.state(), InteractorState::Normal);
    }

    #[test]
    fn test_despawn_releases_id() {
        let mut world = InteractionWorld::new();
        let (modality, _target) = Scripted::new();
        let interactor = Interactor::new(&mut world, modality);
        assert_eq!(world.live_ids(), 1);
        interactor.despawn(&mut world);
        assert_eq!(world.live_ids(), 0);
    }
}
