//! Host capability layer for the Prism plugin suite.
//!
//! Menus never talk to a game server directly; they talk to the narrow
//! traits in this crate. A real server backend implements them against
//! its inventory, player, and scheduler surfaces, and the in-memory
//! reference host in [`memory`] implements them against plain vectors so
//! the render pipeline can be driven headless.

pub mod directory;
pub mod dispatch;
pub mod inventory;
pub mod item;
pub mod memory;
pub mod player;
pub mod scheduler;

use std::future::Future;
use std::pin::Pin;

/// Boxed future type shared by all object-safe host traits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub use directory::{PlayerDirectory, PlayerRecord};
pub use dispatch::CommandDispatcher;
pub use inventory::{CustomItemSource, InventoryHost, InventoryId, MenuInventory, TextureSource};
pub use item::{ItemKind, ItemStack, NbtValue};
pub use player::{Actor, PlayerHandle};
pub use scheduler::Scheduler;
