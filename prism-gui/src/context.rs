//! The bundle of host capabilities menus render against.

use std::sync::Arc;

use prism_host::{
    Actor, CommandDispatcher, CustomItemSource, InventoryHost, PlayerDirectory, PlayerHandle,
    Scheduler, TextureSource,
};

use crate::paged::{Gui, GuiId, GuiRegistry};

/// Everything a menu needs from the outside world, injected once at
/// plugin load. Actions and renderers only ever hold an `Arc<GuiContext>`.
pub struct GuiContext {
    pub host: Arc<dyn InventoryHost>,
    pub scheduler: Arc<dyn Scheduler>,
    pub dispatcher: Arc<dyn CommandDispatcher>,
    pub directory: Arc<dyn PlayerDirectory>,
    pub custom_items: Option<Arc<dyn CustomItemSource>>,
    pub textures: Option<Arc<dyn TextureSource>>,
    registry: GuiRegistry,
}

impl GuiContext {
    #[must_use]
    pub fn new(
        host: Arc<dyn InventoryHost>,
        scheduler: Arc<dyn Scheduler>,
        dispatcher: Arc<dyn CommandDispatcher>,
        directory: Arc<dyn PlayerDirectory>,
    ) -> Arc<Self> {
        Arc::new(Self {
            host,
            scheduler,
            dispatcher,
            directory,
            custom_items: None,
            textures: None,
            registry: GuiRegistry::new(),
        })
    }

    /// As [`GuiContext::new`], with resource-pack integrations attached.
    #[must_use]
    pub fn with_sources(
        host: Arc<dyn InventoryHost>,
        scheduler: Arc<dyn Scheduler>,
        dispatcher: Arc<dyn CommandDispatcher>,
        directory: Arc<dyn PlayerDirectory>,
        custom_items: Option<Arc<dyn CustomItemSource>>,
        textures: Option<Arc<dyn TextureSource>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            host,
            scheduler,
            dispatcher,
            directory,
            custom_items,
            textures,
            registry: GuiRegistry::new(),
        })
    }

    #[must_use]
    pub fn registry(&self) -> &GuiRegistry {
        &self.registry
    }

    /// Open a registered menu for `actor`. Failures (unknown id, factory
    /// or render errors) are logged and swallowed: a broken button must
    /// not take the session down with it.
    pub async fn open_gui(self: &Arc<Self>, id: &GuiId, actor: &Actor, close_current: bool) {
        if close_current {
            let player = Arc::clone(actor);
            self.scheduler
                .run_main(Box::pin(async move {
                    player.close_menu().await;
                }))
                .await;
        }
        match self.registry.create(id, self).await {
            Ok(gui) => {
                if let Err(e) = gui.show(actor).await {
                    log::error!("prism_gui: failed to show gui '{id}': {e}");
                }
            }
            Err(e) => log::error!("prism_gui: failed to open gui '{id}': {e}"),
        }
    }

    /// Re-render a registered menu's dynamic content for `actor` without
    /// reopening it. Same degrade-to-no-op failure contract as
    /// [`GuiContext::open_gui`].
    pub async fn update_gui(self: &Arc<Self>, id: &GuiId, actor: &Actor) {
        match self.registry.create(id, self).await {
            Ok(gui) => {
                if let Err(e) = gui.refresh(actor).await {
                    log::error!("prism_gui: failed to refresh gui '{id}': {e}");
                }
            }
            Err(e) => log::error!("prism_gui: failed to refresh gui '{id}': {e}"),
        }
    }
}
