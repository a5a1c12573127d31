//! Click routing: per-inventory slot registrations and the handler the
//! host's container-click event feeds.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use prism_host::{Actor, InventoryId};

use crate::button_action::ButtonAction;
use crate::context::GuiContext;
use crate::item_config::ItemConfig;
use crate::slots::parse_slots;

/// Minimum interval between handled clicks; faster clicks are swallowed.
const CLICK_DELAY: Duration = Duration::from_millis(200);

/// What the listener decided about a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Not one of our inventories; the host should process it normally.
    Passthrough,
    /// One of ours: the click is cancelled, nothing was bound there.
    Cancelled,
    /// One of ours: the click is cancelled and the bound action ran.
    Executed,
}

/// Owns the slot-to-action map for every tracked menu inventory.
///
/// A slot holds at most one action. Renderers deregister a window's
/// slots before repopulating them, so a click can never fire an action
/// left over from a previous render of the same inventory.
pub struct GuiListener {
    buttons: Mutex<HashMap<InventoryId, HashMap<usize, ButtonAction>>>,
    tracked: Mutex<HashSet<InventoryId>>,
    last_click: Mutex<Option<Instant>>,
    click_delay: Duration,
}

impl GuiListener {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Self::with_click_delay(CLICK_DELAY)
    }

    /// Listener with a custom debounce interval (zero disables it).
    #[must_use]
    pub fn with_click_delay(click_delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            buttons: Mutex::new(HashMap::new()),
            tracked: Mutex::new(HashSet::new()),
            last_click: Mutex::new(None),
            click_delay,
        })
    }

    /// Track `inventory` as a menu so its clicks are cancelled and
    /// routed here.
    pub fn add_gui_inventory(&self, inventory: InventoryId) {
        self.tracked
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(inventory);
    }

    #[must_use]
    pub fn is_tracked(&self, inventory: InventoryId) -> bool {
        self.tracked
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(&inventory)
    }

    /// Register `config`'s action for every slot in its range. Configs
    /// without an action are ignored.
    pub fn register_button(&self, inventory: InventoryId, config: &ItemConfig) {
        let Some(action) = config.action() else {
            return;
        };
        let slots = match parse_slots(config.slot_range()) {
            Ok(slots) => slots,
            Err(e) => {
                log::warn!(
                    "prism_gui: not registering button '{}': {e}",
                    config.name()
                );
                return;
            }
        };
        log::debug!(
            "prism_gui: registering {:?} on {:?} for '{}'",
            action.action_type(),
            slots,
            config.name()
        );
        let mut buttons = self.buttons.lock().unwrap_or_else(|e| e.into_inner());
        let entry = buttons.entry(inventory).or_default();
        for slot in slots {
            entry.insert(slot, action.clone());
        }
    }

    /// Deregister the actions on `slots` ahead of a re-render.
    pub fn remove_buttons(&self, inventory: InventoryId, slots: &[usize]) {
        let mut buttons = self.buttons.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(entry) = buttons.get_mut(&inventory) {
            for slot in slots {
                entry.remove(slot);
            }
        }
    }

    /// Forget an inventory entirely (player closed it).
    pub fn handle_close(&self, inventory: InventoryId) {
        self.buttons
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&inventory);
        self.tracked
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&inventory);
    }

    /// The action currently bound to a slot, if any.
    #[must_use]
    pub fn action_at(&self, inventory: InventoryId, slot: usize) -> Option<ButtonAction> {
        self.buttons
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&inventory)
            .and_then(|entry| entry.get(&slot))
            .cloned()
    }

    /// Route a container click. Clicks on tracked inventories are always
    /// cancelled; if the slot carries an action it is executed with the
    /// clicking player.
    pub async fn handle_click(
        &self,
        actor: &Actor,
        inventory: InventoryId,
        slot: usize,
        ctx: &Arc<GuiContext>,
    ) -> ClickOutcome {
        if !self.is_tracked(inventory) {
            return ClickOutcome::Passthrough;
        }

        if !self.click_delay.is_zero() {
            let now = Instant::now();
            let mut last_click = self.last_click.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(last) = *last_click {
                if now.duration_since(last) < self.click_delay {
                    return ClickOutcome::Cancelled;
                }
            }
            *last_click = Some(now);
        }

        let action = self.action_at(inventory, slot);
        match action {
            Some(action) => {
                action.execute(actor, ctx).await;
                ClickOutcome::Executed
            }
            None => ClickOutcome::Cancelled,
        }
    }
}
