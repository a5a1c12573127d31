//! In-memory reference host: plain-vector inventories, a scripted player
//! handle, and no real server anywhere. This is what the render pipeline
//! is tested against, and what headless tools embed.

use std::sync::Arc;

use prism_util::text::TextComponent;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::inventory::{InventoryHost, InventoryId, MenuInventory};
use crate::item::ItemStack;
use crate::player::PlayerHandle;
use crate::BoxFuture;

/// A menu inventory backed by a vector of slots.
pub struct MemoryInventory {
    id: InventoryId,
    title: String,
    size: usize,
    slots: Mutex<Vec<Option<ItemStack>>>,
}

impl MemoryInventory {
    #[must_use]
    pub fn new(size: usize, title: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            id: InventoryId::random(),
            title: title.into(),
            size,
            slots: Mutex::new(vec![None; size]),
        })
    }

    /// Snapshot of every slot, for assertions.
    pub async fn contents(&self) -> Vec<Option<ItemStack>> {
        self.slots.lock().await.clone()
    }
}

impl MenuInventory for MemoryInventory {
    fn id(&self) -> InventoryId {
        self.id
    }

    fn size(&self) -> usize {
        self.size
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn get_stack(&self, slot: usize) -> BoxFuture<'_, Option<ItemStack>> {
        Box::pin(async move { self.slots.lock().await.get(slot).cloned().flatten() })
    }

    fn set_stack(&self, slot: usize, stack: Option<ItemStack>) -> BoxFuture<'_, ()> {
        Box::pin(async move {
            let mut slots = self.slots.lock().await;
            if let Some(entry) = slots.get_mut(slot) {
                *entry = stack;
            }
        })
    }

    fn clear(&self) -> BoxFuture<'_, ()> {
        Box::pin(async move {
            for entry in self.slots.lock().await.iter_mut() {
                *entry = None;
            }
        })
    }
}

/// Creates [`MemoryInventory`] instances.
#[derive(Default)]
pub struct MemoryHost;

impl MemoryHost {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self)
    }
}

impl InventoryHost for MemoryHost {
    fn create_menu(&self, size: usize, title: &str) -> Arc<dyn MenuInventory> {
        MemoryInventory::new(size, title)
    }
}

/// A scripted player for headless runs: records messages and given
/// items, tracks the currently open menu.
pub struct MemoryPlayer {
    uuid: Uuid,
    name: String,
    op: bool,
    messages: Mutex<Vec<TextComponent>>,
    received: Mutex<Vec<ItemStack>>,
    open: Mutex<Option<Arc<dyn MenuInventory>>>,
}

impl MemoryPlayer {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Arc<Self> {
        Self::with_op(name, false)
    }

    #[must_use]
    pub fn with_op(name: impl Into<String>, op: bool) -> Arc<Self> {
        Arc::new(Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            op,
            messages: Mutex::new(Vec::new()),
            received: Mutex::new(Vec::new()),
            open: Mutex::new(None),
        })
    }

    pub async fn messages(&self) -> Vec<TextComponent> {
        self.messages.lock().await.clone()
    }

    pub async fn received_items(&self) -> Vec<ItemStack> {
        self.received.lock().await.clone()
    }
}

impl PlayerHandle for MemoryPlayer {
    fn uuid(&self) -> Uuid {
        self.uuid
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn is_op(&self) -> bool {
        self.op
    }

    fn send_message<'a>(&'a self, message: &'a TextComponent) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            self.messages.lock().await.push(message.clone());
        })
    }

    fn give_item(&self, item: ItemStack) -> BoxFuture<'_, ()> {
        Box::pin(async move {
            self.received.lock().await.push(item);
        })
    }

    fn open_menu(&self, inventory: Arc<dyn MenuInventory>) -> BoxFuture<'_, ()> {
        Box::pin(async move {
            *self.open.lock().await = Some(inventory);
        })
    }

    fn close_menu(&self) -> BoxFuture<'_, ()> {
        Box::pin(async move {
            *self.open.lock().await = None;
        })
    }

    fn current_menu(&self) -> BoxFuture<'_, Option<Arc<dyn MenuInventory>>> {
        Box::pin(async move { self.open.lock().await.clone() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemKind;

    #[tokio::test]
    async fn inventory_set_get_round_trip() {
        let inventory = MemoryInventory::new(27, "Test");
        inventory
            .set_stack(10, Some(ItemStack::new(ItemKind::STONE)))
            .await;
        assert_eq!(
            inventory.get_stack(10).await.map(|s| s.kind),
            Some(ItemKind::STONE)
        );
        assert!(inventory.get_stack(11).await.is_none());
        // Out-of-range writes are ignored, not panics.
        inventory
            .set_stack(99, Some(ItemStack::new(ItemKind::STONE)))
            .await;
        assert!(inventory.get_stack(99).await.is_none());
    }

    #[tokio::test]
    async fn player_tracks_open_menu() {
        let player = MemoryPlayer::new("Steve");
        let inventory = MemoryInventory::new(27, "Test");
        player.open_menu(inventory.clone()).await;
        let open = player.current_menu().await.expect("menu open");
        assert_eq!(open.id(), inventory.id());
        player.close_menu().await;
        assert!(player.current_menu().await.is_none());
    }
}
