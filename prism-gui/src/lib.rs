//! Inventory menu toolkit for the Prism plugin suite.
//!
//! A menu is described declaratively as a set of [`ItemConfig`]s — what an
//! item looks like, which slots it covers, and what happens when it is
//! clicked — and rendered by [`GuiCreator`] into a host inventory in one
//! of three shapes: a static grid, a paginated list, or a scrollable
//! window. Click behavior is a [`ButtonAction`]: one of the built-in
//! effects or a lazily composed [`ActionChain`] that threads the clicking
//! player and an accumulated value through a pipeline of steps.
//!
//! Nothing here talks to a server directly; all host access goes through
//! the capability traits in `prism-host`, which is also what makes the
//! whole pipeline drivable headless in tests.

pub mod button_action;
pub mod context;
pub mod error;
pub mod gui_creator;
pub mod item_config;
pub mod listener;
pub mod paged;
pub mod slots;

pub use button_action::{ActionChain, ActionType, ButtonAction};
pub use context::GuiContext;
pub use error::{GuiError, SlotRangeError};
pub use gui_creator::{
    ArrowBarMode, ArrowGap, GuiCreator, MenuTexture, PageLayout, ScrollLayout, ScrollOrientation,
};
pub use item_config::{
    ClassElement, ItemConfig, ItemConfigBuilder, ItemConfigClass, ItemConfigGroup, Orientation,
    Rarity,
};
pub use listener::{ClickOutcome, GuiListener};
pub use paged::{Gui, GuiFactory, GuiId, GuiRegistry, PageItemProvider, PagedGui};
pub use slots::{derive_content_slots, parse_slots};
