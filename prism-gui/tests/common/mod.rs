//! Shared harness: a full menu context wired to the in-memory host.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use prism_gui::{ButtonAction, GuiContext, GuiCreator, GuiListener, ItemConfig, ItemConfigBuilder};
use prism_host::directory::{PlayerRecord, StaticDirectory};
use prism_host::dispatch::RecordingDispatcher;
use prism_host::memory::{MemoryHost, MemoryPlayer};
use prism_host::scheduler::ImmediateScheduler;
use prism_host::{Actor, ItemKind, MenuInventory, PlayerHandle};

pub struct Harness {
    pub ctx: Arc<GuiContext>,
    pub creator: Arc<GuiCreator>,
    pub listener: Arc<GuiListener>,
    pub dispatcher: Arc<RecordingDispatcher>,
    pub player: Arc<MemoryPlayer>,
    pub actor: Actor,
}

pub fn harness() -> Harness {
    build(true)
}

/// Harness whose player has no backing directory record.
pub fn harness_without_record() -> Harness {
    build(false)
}

fn build(with_record: bool) -> Harness {
    let player = MemoryPlayer::with_op("Steve", true);
    let directory = StaticDirectory::new();
    if with_record {
        directory.insert(PlayerRecord {
            uuid: player.uuid(),
            theme_id: "dark".to_string(),
        });
    }
    let dispatcher = RecordingDispatcher::new();
    let dispatcher_dyn: Arc<dyn prism_host::CommandDispatcher> = dispatcher.clone();
    let ctx = GuiContext::new(
        MemoryHost::new(),
        ImmediateScheduler::new(),
        dispatcher_dyn,
        Arc::new(directory),
    );
    let listener = GuiListener::with_click_delay(Duration::ZERO);
    let creator = GuiCreator::new(Arc::clone(&ctx), Arc::clone(&listener));
    let actor: Actor = player.clone();
    Harness {
        ctx,
        creator,
        listener,
        dispatcher,
        player,
        actor,
    }
}

/// A paper item named `name`, optionally clickable with `action`.
pub fn item(name: &str, action: Option<ButtonAction>) -> ItemConfig {
    ItemConfigBuilder::from(ItemKind::PAPER)
        .set_name(name)
        .set_clickable(action.is_some())
        .set_action(action)
        .build()
}

/// Display name of the stack at `slot` in the player's open menu.
pub async fn name_at(player: &MemoryPlayer, slot: usize) -> Option<String> {
    let menu = player.current_menu().await?;
    menu.get_stack(slot).await.and_then(|stack| stack.display_name)
}
