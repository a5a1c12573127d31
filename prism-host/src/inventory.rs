//! Menu inventory capabilities: fixed-capacity slot grids the host
//! creates and shows to players, plus the optional texture and custom
//! item sources a resource-pack integration provides.

use std::sync::Arc;

use uuid::Uuid;

use crate::item::ItemStack;
use crate::player::Actor;
use crate::BoxFuture;

/// Stable identity of a menu inventory. Slot registrations and scroll
/// offsets are keyed by this, never by pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InventoryId(Uuid);

impl InventoryId {
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for InventoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fixed-capacity slot grid. `None` is an empty slot.
pub trait MenuInventory: Send + Sync {
    fn id(&self) -> InventoryId;
    fn size(&self) -> usize;
    fn title(&self) -> String;
    fn get_stack(&self, slot: usize) -> BoxFuture<'_, Option<ItemStack>>;
    fn set_stack(&self, slot: usize, stack: Option<ItemStack>) -> BoxFuture<'_, ()>;
    fn clear(&self) -> BoxFuture<'_, ()>;
}

/// Creates menu inventories. The host owns presentation; menus only fill
/// slots and ask for the inventory to be shown.
pub trait InventoryHost: Send + Sync {
    fn create_menu(&self, size: usize, title: &str) -> Arc<dyn MenuInventory>;
}

/// Optional background-texture integration (resource-pack font images).
/// Absence of the whole source, or of a single key, must degrade to an
/// untextured menu.
pub trait TextureSource: Send + Sync {
    fn exists(&self, key: &str) -> bool;
    fn apply<'a>(
        &'a self,
        player: &'a Actor,
        key: &'a str,
        title: &'a str,
        offset: i32,
    ) -> BoxFuture<'a, ()>;
}

/// Optional named-item integration: resolves pack-defined item names
/// (e.g. themed arrow icons) to concrete stacks.
pub trait CustomItemSource: Send + Sync {
    fn resolve(&self, name: &str) -> Option<ItemStack>;
}
