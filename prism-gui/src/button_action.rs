//! Click behaviors: the built-in button effects and the composable
//! action chain.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use prism_host::{Actor, BoxFuture, CommandDispatcher, ItemStack, PlayerHandle, Scheduler};
use serde_json::Value;

use crate::context::GuiContext;
use crate::error::GuiError;
use crate::paged::GuiId;

/// Closure stored by `RunCode` actions.
pub type ActionFn = Arc<dyn Fn(Actor) -> BoxFuture<'static, ()> + Send + Sync>;

/// Type-erased chain invoked when a chained action fires.
type ErasedChain = Arc<dyn Fn(Actor) -> BoxFuture<'static, ()> + Send + Sync>;

/// Discriminant of a [`ButtonAction`], mostly for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionType {
    OpenGui,
    CloseGui,
    GiveItem,
    RunCommand,
    RunCode,
    RunClass,
    Chain,
}

/// What happens when a registered slot is clicked: exactly one built-in
/// effect, or a composed [`ActionChain`].
#[derive(Clone)]
pub enum ButtonAction {
    OpenGui {
        gui: GuiId,
        close_current: bool,
    },
    CloseGui,
    GiveItem {
        item: ItemStack,
        close_gui: bool,
    },
    RunCommand {
        command: String,
        close_gui: bool,
    },
    RunCode {
        action: ActionFn,
        close_gui: bool,
    },
    RunClass {
        action: Arc<dyn Fn() + Send + Sync>,
        close_gui: bool,
    },
    Chain {
        chain: ErasedChain,
    },
}

impl ButtonAction {
    #[must_use]
    pub fn of_open_gui(gui: impl Into<GuiId>, close_current: bool) -> Self {
        Self::OpenGui {
            gui: gui.into(),
            close_current,
        }
    }

    #[must_use]
    pub fn of_close_gui() -> Self {
        Self::CloseGui
    }

    #[must_use]
    pub fn of_give_item(item: ItemStack, close_gui: bool) -> Self {
        Self::GiveItem { item, close_gui }
    }

    #[must_use]
    pub fn of_run_command(command: impl Into<String>, close_gui: bool) -> Self {
        Self::RunCommand {
            command: command.into(),
            close_gui,
        }
    }

    /// Custom code run with the clicking player.
    #[must_use]
    pub fn of_run_code<F>(close_gui: bool, action: F) -> Self
    where
        F: Fn(Actor) -> BoxFuture<'static, ()> + Send + Sync + 'static,
    {
        Self::RunCode {
            action: Arc::new(action),
            close_gui,
        }
    }

    /// A nullary action with no player context.
    #[must_use]
    pub fn of_run_action<F>(action: F, close_gui: bool) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self::RunClass {
            action: Arc::new(action),
            close_gui,
        }
    }

    /// Parse an action from a JSON menu definition. `run_code` cannot be
    /// expressed in data and is rejected.
    pub fn from_json(json: &Value) -> Result<Self, GuiError> {
        let object = json
            .as_object()
            .ok_or_else(|| GuiError::BadDefinition("action definition must be an object".into()))?;
        let kind = object
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| GuiError::BadDefinition("action definition is missing 'type'".into()))?;
        let close_gui = object
            .get("close_gui")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        match kind.to_ascii_lowercase().as_str() {
            "open_gui" => {
                let data = object.get("data").and_then(Value::as_str).ok_or_else(|| {
                    GuiError::BadDefinition("open_gui action needs a gui id in 'data'".into())
                })?;
                Ok(Self::of_open_gui(data, close_gui))
            }
            "close_gui" => Ok(Self::of_close_gui()),
            "run_command" => {
                let data = object.get("data").and_then(Value::as_str).ok_or_else(|| {
                    GuiError::BadDefinition("run_command action needs a command in 'data'".into())
                })?;
                Ok(Self::of_run_command(data, close_gui))
            }
            "give_item" => {
                let data = object.get("data").ok_or_else(|| {
                    GuiError::BadDefinition("give_item action needs an item in 'data'".into())
                })?;
                Ok(Self::of_give_item(item_from_json(data)?, close_gui))
            }
            "run_code" | "run_class" => Err(GuiError::BadDefinition(format!(
                "'{kind}' actions cannot be loaded from data"
            ))),
            other => Err(GuiError::BadDefinition(format!(
                "unsupported action type '{other}'"
            ))),
        }
    }

    #[must_use]
    pub fn action_type(&self) -> ActionType {
        match self {
            Self::OpenGui { .. } => ActionType::OpenGui,
            Self::CloseGui => ActionType::CloseGui,
            Self::GiveItem { .. } => ActionType::GiveItem,
            Self::RunCommand { .. } => ActionType::RunCommand,
            Self::RunCode { .. } => ActionType::RunCode,
            Self::RunClass { .. } => ActionType::RunClass,
            Self::Chain { .. } => ActionType::Chain,
        }
    }

    /// Perform this action for `actor`. Exactly one built-in behavior
    /// runs per invocation; chains drive their composed pipeline once.
    pub async fn execute(&self, actor: &Actor, ctx: &Arc<GuiContext>) {
        match self {
            Self::OpenGui { gui, close_current } => {
                ctx.open_gui(gui, actor, *close_current).await;
            }
            Self::CloseGui => {
                close_on_main(actor, ctx).await;
            }
            Self::GiveItem { item, close_gui } => {
                actor.give_item(item.clone()).await;
                if *close_gui {
                    close_on_main(actor, ctx).await;
                }
            }
            Self::RunCommand { command, close_gui } => {
                let command = command.replace("%player%", &actor.name());
                ctx.dispatcher.dispatch_console(&command).await;
                if *close_gui {
                    close_on_main(actor, ctx).await;
                }
            }
            Self::RunCode { action, close_gui } => {
                if *close_gui {
                    close_on_main(actor, ctx).await;
                }
                action(Arc::clone(actor)).await;
            }
            Self::RunClass { action, close_gui } => {
                if *close_gui {
                    close_on_main(actor, ctx).await;
                }
                action();
            }
            Self::Chain { chain } => {
                chain(Arc::clone(actor)).await;
            }
        }
    }
}

impl std::fmt::Debug for ButtonAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ButtonAction::{:?}", self.action_type())
    }
}

async fn close_on_main(actor: &Actor, ctx: &Arc<GuiContext>) {
    let player = Arc::clone(actor);
    ctx.scheduler
        .run_main(Box::pin(async move {
            player.close_menu().await;
        }))
        .await;
}

type ChainStep<T> = Arc<dyn Fn(Actor) -> BoxFuture<'static, T> + Send + Sync>;

/// A lazily composed pipeline of steps threading the clicking player and
/// an accumulated value. Nothing runs until a terminal call
/// ([`ActionChain::chain_execute`], [`ActionChain::finally_run`]) or the
/// chain fires as a registered [`ButtonAction`].
///
/// `then_wait` and the `_async` variants keep the composed function
/// synchronous-looking: background work is submitted explicitly and
/// joined before the wrapping step returns. A `then_wait` in a chain
/// executed from the coordinating loop delays that loop; keep waits off
/// the tick-critical path.
pub struct ActionChain<T> {
    ctx: Arc<GuiContext>,
    step: ChainStep<T>,
}

impl<T> Clone for ActionChain<T> {
    fn clone(&self) -> Self {
        Self {
            ctx: Arc::clone(&self.ctx),
            step: Arc::clone(&self.step),
        }
    }
}

impl<T: Send + 'static> ActionChain<T> {
    /// Start a chain with an initial step.
    pub fn chain<F, Fut>(ctx: Arc<GuiContext>, f: F) -> Self
    where
        F: Fn(Actor) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        Self {
            ctx,
            step: Arc::new(move |actor| Box::pin(f(actor))),
        }
    }

    /// Append a step that transforms the accumulated value.
    pub fn then_bi<R, G>(self, g: G) -> ActionChain<R>
    where
        R: Send + 'static,
        G: Fn(Actor, T) -> R + Send + Sync + 'static,
    {
        let prev = self.step;
        let g = Arc::new(g);
        ActionChain {
            ctx: self.ctx,
            step: Arc::new(move |actor: Actor| {
                let prev = Arc::clone(&prev);
                let g = Arc::clone(&g);
                Box::pin(async move {
                    let value = prev(Arc::clone(&actor)).await;
                    g(actor, value)
                })
            }),
        }
    }

    /// Append a side effect; the accumulated value passes through.
    pub fn then_run<G>(self, g: G) -> Self
    where
        G: Fn(Actor, &T) + Send + Sync + 'static,
    {
        let prev = self.step;
        let g = Arc::new(g);
        Self {
            ctx: self.ctx,
            step: Arc::new(move |actor: Actor| {
                let prev = Arc::clone(&prev);
                let g = Arc::clone(&g);
                Box::pin(async move {
                    let value = prev(Arc::clone(&actor)).await;
                    g(actor, &value);
                    value
                })
            }),
        }
    }

    /// Delay the chain by `milliseconds`; the value passes through.
    #[must_use]
    pub fn then_wait(self, milliseconds: u64) -> Self {
        let prev = self.step;
        Self {
            ctx: self.ctx,
            step: Arc::new(move |actor: Actor| {
                let prev = Arc::clone(&prev);
                Box::pin(async move {
                    let value = prev(actor).await;
                    tokio::time::sleep(Duration::from_millis(milliseconds)).await;
                    value
                })
            }),
        }
    }

    /// As [`ActionChain::then_bi`], but the transform runs on the
    /// blocking worker pool and is joined before the step returns.
    pub fn then_bi_async<R, G>(self, g: G) -> ActionChain<R>
    where
        R: Send + 'static,
        G: Fn(Actor, T) -> R + Send + Sync + 'static,
    {
        let prev = self.step;
        let g = Arc::new(g);
        ActionChain {
            ctx: self.ctx,
            step: Arc::new(move |actor: Actor| {
                let prev = Arc::clone(&prev);
                let g = Arc::clone(&g);
                Box::pin(async move {
                    let value = prev(Arc::clone(&actor)).await;
                    tokio::task::spawn_blocking(move || g(actor, value))
                        .await
                        .unwrap_or_else(|e| std::panic::resume_unwind(e.into_panic()))
                })
            }),
        }
    }

    /// As [`ActionChain::then_run`], but the side effect runs on the
    /// blocking worker pool and is joined before the step returns.
    pub fn then_run_async<G>(self, g: G) -> Self
    where
        T: Clone,
        G: Fn(Actor, T) + Send + Sync + 'static,
    {
        let prev = self.step;
        let g = Arc::new(g);
        Self {
            ctx: self.ctx,
            step: Arc::new(move |actor: Actor| {
                let prev = Arc::clone(&prev);
                let g = Arc::clone(&g);
                Box::pin(async move {
                    let value = prev(Arc::clone(&actor)).await;
                    let side_value = value.clone();
                    tokio::task::spawn_blocking(move || g(actor, side_value))
                        .await
                        .unwrap_or_else(|e| std::panic::resume_unwind(e.into_panic()));
                    value
                })
            }),
        }
    }

    /// Open a registered menu, keeping the accumulated value.
    #[must_use]
    pub fn then_open_gui(self, gui: impl Into<GuiId>, close_current: bool) -> Self {
        let prev = self.step;
        let ctx = Arc::clone(&self.ctx);
        let gui = gui.into();
        Self {
            ctx: self.ctx,
            step: Arc::new(move |actor: Actor| {
                let prev = Arc::clone(&prev);
                let ctx = Arc::clone(&ctx);
                let gui = gui.clone();
                Box::pin(async move {
                    let value = prev(Arc::clone(&actor)).await;
                    ctx.open_gui(&gui, &actor, close_current).await;
                    value
                })
            }),
        }
    }

    /// Give the player an item, keeping the accumulated value.
    #[must_use]
    pub fn then_give_item(self, item: ItemStack, close_gui: bool) -> Self {
        let prev = self.step;
        let ctx = Arc::clone(&self.ctx);
        Self {
            ctx: self.ctx,
            step: Arc::new(move |actor: Actor| {
                let prev = Arc::clone(&prev);
                let ctx = Arc::clone(&ctx);
                let item = item.clone();
                Box::pin(async move {
                    let value = prev(Arc::clone(&actor)).await;
                    actor.give_item(item).await;
                    if close_gui {
                        close_on_main(&actor, &ctx).await;
                    }
                    value
                })
            }),
        }
    }

    /// Close the player's menu on the coordinating loop, keeping the
    /// accumulated value.
    #[must_use]
    pub fn then_close_gui(self) -> Self {
        let prev = self.step;
        let ctx = Arc::clone(&self.ctx);
        Self {
            ctx: self.ctx,
            step: Arc::new(move |actor: Actor| {
                let prev = Arc::clone(&prev);
                let ctx = Arc::clone(&ctx);
                Box::pin(async move {
                    let value = prev(Arc::clone(&actor)).await;
                    close_on_main(&actor, &ctx).await;
                    value
                })
            }),
        }
    }

    /// Dispatch a console command with `%player%` substituted, keeping
    /// the accumulated value.
    #[must_use]
    pub fn then_run_command(self, command: impl Into<String>, close_gui: bool) -> Self {
        let prev = self.step;
        let ctx = Arc::clone(&self.ctx);
        let command = command.into();
        Self {
            ctx: self.ctx,
            step: Arc::new(move |actor: Actor| {
                let prev = Arc::clone(&prev);
                let ctx = Arc::clone(&ctx);
                let command = command.clone();
                Box::pin(async move {
                    let value = prev(Arc::clone(&actor)).await;
                    let command = command.replace("%player%", &actor.name());
                    ctx.dispatcher.dispatch_console(&command).await;
                    if close_gui {
                        close_on_main(&actor, &ctx).await;
                    }
                    value
                })
            }),
        }
    }

    /// Re-render a registered menu's dynamic content in place, keeping
    /// the accumulated value.
    #[must_use]
    pub fn then_update_gui(self, gui: impl Into<GuiId>) -> Self {
        let prev = self.step;
        let ctx = Arc::clone(&self.ctx);
        let gui = gui.into();
        Self {
            ctx: self.ctx,
            step: Arc::new(move |actor: Actor| {
                let prev = Arc::clone(&prev);
                let ctx = Arc::clone(&ctx);
                let gui = gui.clone();
                Box::pin(async move {
                    let value = prev(Arc::clone(&actor)).await;
                    ctx.update_gui(&gui, &actor).await;
                    value
                })
            }),
        }
    }

    /// Run the composed pipeline now and return its final value.
    pub async fn chain_execute(&self, actor: &Actor) -> T {
        (self.step)(Arc::clone(actor)).await
    }

    /// Terminal step: submit the chain to a background worker and hand
    /// the final value to `f` when it completes. The returned handle
    /// resolves once `f` ran; dropping it detaches the work on
    /// production schedulers.
    pub fn finally_run<G>(self, actor: &Actor, f: G) -> BoxFuture<'static, ()>
    where
        G: Fn(Actor, T) + Send + Sync + 'static,
    {
        let step = self.step;
        let actor = Arc::clone(actor);
        self.ctx.scheduler.run_background(Box::pin(async move {
            let value = step(Arc::clone(&actor)).await;
            f(actor, value);
        }))
    }

    /// Erase the value type so the chain can be bound to a slot.
    #[must_use]
    pub fn into_action(self) -> ButtonAction {
        let step = self.step;
        ButtonAction::Chain {
            chain: Arc::new(move |actor: Actor| {
                let step = Arc::clone(&step);
                Box::pin(async move {
                    let _ = step(actor).await;
                })
            }),
        }
    }
}

impl<T: Send + 'static> From<ActionChain<T>> for ButtonAction {
    fn from(chain: ActionChain<T>) -> Self {
        chain.into_action()
    }
}

fn item_from_json(json: &Value) -> Result<ItemStack, GuiError> {
    let object = json
        .as_object()
        .ok_or_else(|| GuiError::BadDefinition("item payload must be an object".into()))?;
    let kind_name = object
        .get("kind")
        .and_then(Value::as_str)
        .ok_or_else(|| GuiError::BadDefinition("item payload is missing 'kind'".into()))?;
    let kind = prism_host::ItemKind::by_name(kind_name)
        .ok_or_else(|| GuiError::BadDefinition(format!("unknown item kind '{kind_name}'")))?;
    let mut stack = ItemStack::new(kind);
    if let Some(count) = object.get("count").and_then(Value::as_u64) {
        stack.count = count.min(64) as u8;
    }
    if let Some(name) = object.get("name").and_then(Value::as_str) {
        stack.display_name = Some(name.to_string());
    }
    Ok(stack)
}
