//! The player capability menus render against.

use std::sync::Arc;

use prism_util::text::TextComponent;
use uuid::Uuid;

use crate::inventory::MenuInventory;
use crate::item::ItemStack;
use crate::BoxFuture;

/// A connected player as menus see them. Implementations wrap the
/// server's own player object.
pub trait PlayerHandle: Send + Sync {
    fn uuid(&self) -> Uuid;
    fn name(&self) -> String;
    fn is_op(&self) -> bool;

    fn send_message<'a>(&'a self, message: &'a TextComponent) -> BoxFuture<'a, ()>;
    fn give_item(&self, item: ItemStack) -> BoxFuture<'_, ()>;

    /// Show a menu inventory to this player, replacing whatever is open.
    fn open_menu(&self, inventory: Arc<dyn MenuInventory>) -> BoxFuture<'_, ()>;
    fn close_menu(&self) -> BoxFuture<'_, ()>;
    /// The menu currently open for this player, if any.
    fn current_menu(&self) -> BoxFuture<'_, Option<Arc<dyn MenuInventory>>>;
}

/// Shared player reference threaded through actions and render calls.
pub type Actor = Arc<dyn PlayerHandle>;
