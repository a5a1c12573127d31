//! Typed GUI factories and the page-aware menu scaffolding.
//!
//! Menus that buttons can open are registered in a [`GuiRegistry`] under a
//! [`GuiId`]. An unknown id degrades to a logged no-op at the call site
//! that tried to open it; there is no reflective construction and no
//! constructor-shape failure class.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use prism_host::{Actor, BoxFuture};

use crate::context::GuiContext;
use crate::error::GuiError;
use crate::gui_creator::{GuiCreator, PageLayout};
use crate::item_config::ItemConfig;

/// Identifier a menu is registered under, e.g. `"shop/main"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GuiId(String);

impl GuiId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GuiId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GuiId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for GuiId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A menu that can be shown to a player, and optionally refreshed in
/// place while it is open.
pub trait Gui: Send + Sync + std::fmt::Debug {
    fn show<'a>(&'a self, actor: &'a Actor) -> BoxFuture<'a, Result<(), GuiError>>;

    /// Re-render dynamic content of the already-open menu. Defaults to a
    /// full `show`.
    fn refresh<'a>(&'a self, actor: &'a Actor) -> BoxFuture<'a, Result<(), GuiError>> {
        self.show(actor)
    }
}

/// Builds a [`Gui`] instance on demand.
pub trait GuiFactory: Send + Sync {
    fn create<'a>(
        &'a self,
        ctx: &'a Arc<GuiContext>,
    ) -> BoxFuture<'a, Result<Arc<dyn Gui>, GuiError>>;
}

type FactoryFn = dyn Fn(Arc<GuiContext>) -> BoxFuture<'static, Result<Arc<dyn Gui>, GuiError>>
    + Send
    + Sync;

struct FnFactory(Box<FactoryFn>);

impl GuiFactory for FnFactory {
    fn create<'a>(
        &'a self,
        ctx: &'a Arc<GuiContext>,
    ) -> BoxFuture<'a, Result<Arc<dyn Gui>, GuiError>> {
        (self.0)(Arc::clone(ctx))
    }
}

/// Keyed GUI factories. Constructed once, handed to the [`GuiContext`];
/// no global instance.
#[derive(Default)]
pub struct GuiRegistry {
    factories: RwLock<HashMap<GuiId, Arc<dyn GuiFactory>>>,
}

impl GuiRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, id: impl Into<GuiId>, factory: Arc<dyn GuiFactory>) {
        let id = id.into();
        let mut factories = self.factories.write().unwrap_or_else(|e| e.into_inner());
        if factories.insert(id.clone(), factory).is_some() {
            log::warn!("prism_gui: gui '{id}' was re-registered");
        }
    }

    /// Register a closure-backed factory.
    pub fn register_fn<F>(&self, id: impl Into<GuiId>, factory: F)
    where
        F: Fn(Arc<GuiContext>) -> BoxFuture<'static, Result<Arc<dyn Gui>, GuiError>>
            + Send
            + Sync
            + 'static,
    {
        self.register(id, Arc::new(FnFactory(Box::new(factory))));
    }

    pub async fn create(
        &self,
        id: &GuiId,
        ctx: &Arc<GuiContext>,
    ) -> Result<Arc<dyn Gui>, GuiError> {
        let factory = {
            self.factories
                .read()
                .unwrap_or_else(|e| e.into_inner())
                .get(id)
                .cloned()
        };
        match factory {
            Some(factory) => factory.create(ctx).await,
            None => Err(GuiError::UnknownGui(id.to_string())),
        }
    }

    #[must_use]
    pub fn contains(&self, id: &GuiId) -> bool {
        self.factories
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(id)
    }
}

/// Items shown by a paged menu, produced per viewer.
pub type PageItemProvider =
    Arc<dyn Fn(Actor) -> BoxFuture<'static, Vec<ItemConfig>> + Send + Sync>;

/// A paginated menu: persistent buttons plus a per-viewer item list,
/// rendered through [`GuiCreator::paginated`].
pub struct PagedGui {
    creator: Arc<GuiCreator>,
    layout: PageLayout,
    main_items: Vec<ItemConfig>,
    provider: PageItemProvider,
    page: usize,
}

impl std::fmt::Debug for PagedGui {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagedGui")
            .field("layout", &self.layout)
            .field("page", &self.page)
            .finish_non_exhaustive()
    }
}

impl PagedGui {
    #[must_use]
    pub fn new(
        creator: Arc<GuiCreator>,
        layout: PageLayout,
        main_items: Vec<ItemConfig>,
        provider: PageItemProvider,
        page: usize,
    ) -> Self {
        Self {
            creator,
            layout,
            main_items,
            provider,
            page: page.max(1),
        }
    }

    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }
}

impl Gui for PagedGui {
    fn show<'a>(&'a self, actor: &'a Actor) -> BoxFuture<'a, Result<(), GuiError>> {
        Box::pin(async move {
            let items = (self.provider)(Arc::clone(actor)).await;
            self.creator
                .paginated(actor, &self.layout, &self.main_items, &items, self.page)
                .await
        })
    }

    fn refresh<'a>(&'a self, actor: &'a Actor) -> BoxFuture<'a, Result<(), GuiError>> {
        Box::pin(async move {
            let items = (self.provider)(Arc::clone(actor)).await;
            let mut layout = self.layout.clone();
            layout.fluent = true;
            self.creator
                .paginated(actor, &layout, &self.main_items, &items, self.page)
                .await
        })
    }
}
