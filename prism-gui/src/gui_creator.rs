//! Menu renderers: static grids, paginated lists, class-grouped pages,
//! and scrollable windows over a fixed slot grid.
//!
//! Every entry point follows the same shape: validate dimensions, get an
//! inventory (new or reused), place items per their slot ranges, register
//! click handlers for actionable slots, then marshal the "show to
//! player" step onto the coordinating loop. Population itself may run on
//! any thread; only presentation belongs to the loop.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use dashmap::DashMap;
use prism_host::{
    Actor, CustomItemSource, InventoryHost, InventoryId, ItemKind, ItemStack, MenuInventory,
    PlayerDirectory, PlayerHandle, Scheduler, TextureSource,
};
use prism_util::strings::to_small_caps;
use prism_util::text::{NamedColor, TextComponent};
use uuid::Uuid;

use crate::button_action::ButtonAction;
use crate::context::GuiContext;
use crate::error::GuiError;
use crate::item_config::{ClassElement, ItemConfig, ItemConfigBuilder, ItemConfigClass};
use crate::listener::GuiListener;
use crate::slots::{derive_content_slots, parse_slots};

/// Distance of the navigation arrows from the bottom-row center slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowGap {
    Small,
    Medium,
    Wide,
}

impl ArrowGap {
    #[must_use]
    pub const fn gap(self) -> usize {
        match self {
            Self::Small => 1,
            Self::Medium => 2,
            Self::Wide => 3,
        }
    }
}

/// Which axis a scrollable window moves along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollOrientation {
    Horizontal,
    Vertical,
}

/// Where scroll arrows sit relative to the content window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowBarMode {
    Up,
    Down,
    UpDown,
    Left,
    Right,
    LeftRight,
}

/// Background texture request for a menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuTexture {
    pub key: String,
    pub offset: i32,
}

/// Layout of a paginated menu.
#[derive(Debug, Clone)]
pub struct PageLayout {
    /// Rows in the menu grid.
    pub height: u8,
    pub spacing: ArrowGap,
    /// Allowed slots for page content, as a slot-range string.
    pub slot_range: String,
    pub items_per_page: usize,
    pub title: String,
    /// Re-place the persistent main buttons on every page.
    pub keep_persistent: bool,
    pub texture: Option<MenuTexture>,
    /// Reuse the already-open inventory in place instead of reopening.
    pub fluent: bool,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            height: 6,
            spacing: ArrowGap::Small,
            slot_range: String::new(),
            items_per_page: 28,
            title: String::new(),
            keep_persistent: true,
            texture: None,
            fluent: false,
        }
    }
}

/// Layout of a scrollable menu.
#[derive(Debug, Clone)]
pub struct ScrollLayout {
    pub height: u8,
    pub spacing: ArrowGap,
    /// Explicit content slots; when `None` they are derived from the
    /// grid height and arrow layout.
    pub slot_range: Option<String>,
    pub orientation: ScrollOrientation,
    pub arrows: ArrowBarMode,
    pub title: String,
    pub keep_persistent: bool,
    pub texture: Option<MenuTexture>,
}

/// Stateful menu factory. One instance per plugin is plenty; it tracks
/// which inventory each player currently has open and the scroll offset
/// of every scrollable inventory.
pub struct GuiCreator {
    ctx: Arc<GuiContext>,
    listener: Arc<GuiListener>,
    open_menus: Mutex<HashMap<Uuid, Arc<dyn MenuInventory>>>,
    scroll_offsets: DashMap<InventoryId, usize>,
}

impl GuiCreator {
    #[must_use]
    pub fn new(ctx: Arc<GuiContext>, listener: Arc<GuiListener>) -> Arc<Self> {
        Arc::new(Self {
            ctx,
            listener,
            open_menus: Mutex::new(HashMap::new()),
            scroll_offsets: DashMap::new(),
        })
    }

    #[must_use]
    pub fn ctx(&self) -> &Arc<GuiContext> {
        &self.ctx
    }

    #[must_use]
    pub fn listener(&self) -> &Arc<GuiListener> {
        &self.listener
    }

    /// The inventory this player currently has open through the creator.
    #[must_use]
    pub fn current_inventory(&self, player: Uuid) -> Option<Arc<dyn MenuInventory>> {
        self.open_menus
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&player)
            .cloned()
    }

    /// Forget per-inventory state after the host reports it closed.
    pub fn handle_close(&self, player: Uuid, inventory: InventoryId) {
        self.listener.handle_close(inventory);
        self.scroll_offsets.remove(&inventory);
        let mut menus = self.open_menus.lock().unwrap_or_else(|e| e.into_inner());
        if menus.get(&player).is_some_and(|open| open.id() == inventory) {
            menus.remove(&player);
        }
    }

    /// Open a static menu grid.
    ///
    /// Invalid dimensions degrade to a no-op with a log line (and an
    /// in-game note for ops); they never abort the caller. Population
    /// runs on a background worker, presentation on the coordinating
    /// loop.
    pub async fn simple(
        self: &Arc<Self>,
        actor: &Actor,
        height: u8,
        width: u8,
        title: &str,
        texture: Option<MenuTexture>,
        items: Vec<ItemConfig>,
    ) -> Result<(), GuiError> {
        if height < 1 || width < 1 || width > 9 {
            log::warn!("prism_gui: invalid menu dimensions {height}x{width}, not rendering");
            if actor.is_op() {
                actor
                    .send_message(
                        &TextComponent::text("Invalid dimensions for the GUI. Report this to a dev.")
                            .color_named(NamedColor::Red),
                    )
                    .await;
            }
            return Ok(());
        }

        let capacity = usize::from(height) * usize::from(width);
        let inventory = self.ctx.host.create_menu(capacity, title);

        let (result_tx, result_rx) = tokio::sync::oneshot::channel();
        {
            let creator = Arc::clone(self);
            let inventory = Arc::clone(&inventory);
            let viewer = Arc::clone(actor);
            self.ctx
                .scheduler
                .run_background(Box::pin(async move {
                    let mut outcome = Ok(());
                    'population: for config in &items {
                        let slot_set = match parse_slots(config.slot_range()) {
                            Ok(slot_set) => slot_set,
                            Err(e) => {
                                outcome = Err(GuiError::from(e));
                                break 'population;
                            }
                        };
                        for slot in slot_set {
                            if slot >= capacity {
                                continue;
                            }
                            match creator.create_item(config, Some(&viewer)) {
                                Ok(stack) => {
                                    inventory.set_stack(slot, Some(stack)).await;
                                    if config.action().is_some() {
                                        creator.listener.register_button(inventory.id(), config);
                                    }
                                }
                                Err(e) => {
                                    outcome = Err(e);
                                    break 'population;
                                }
                            }
                        }
                    }
                    let _ = result_tx.send(outcome);
                }))
                .await;
        }
        result_rx.await.unwrap_or(Ok(()))?;

        self.listener.add_gui_inventory(inventory.id());
        self.show(actor, &inventory, texture.as_ref(), title, false).await;
        Ok(())
    }

    /// Open one page of a paginated menu over a flat item list.
    ///
    /// The requested page is clamped into `[1, total_pages]`. Page items
    /// fill the allowed slots in ascending order; anything beyond
    /// `min(slot_count, items_per_page)` is silently dropped. Navigation
    /// buttons rebuild the same call with `page ± 1`.
    pub async fn paginated(
        self: &Arc<Self>,
        actor: &Actor,
        layout: &PageLayout,
        main_items: &[ItemConfig],
        page_items: &[ItemConfig],
        page: usize,
    ) -> Result<(), GuiError> {
        if layout.height < 1 {
            return Err(GuiError::InvalidDimensions {
                height: layout.height,
                width: 9,
            });
        }
        let record = self
            .ctx
            .directory
            .find(actor.uuid())
            .ok_or(GuiError::MissingPlayerRecord(actor.uuid()))?;
        let theme = record.theme_id;

        let per_page = layout.items_per_page.max(1);
        let total_items = page_items.len();
        let total_pages = total_items.div_ceil(per_page);
        let page = page.clamp(1, total_pages.max(1));

        let capacity = 9 * usize::from(layout.height);

        let reused = if layout.fluent {
            self.reusable_inventory(actor).await
        } else {
            None
        };
        let reuse = reused.is_some();
        let inventory = match reused {
            Some(inventory) => {
                // Clear only the dynamic window; persistent and
                // navigation slots stay as rendered.
                let to_clear: Vec<usize> =
                    parse_slots(&layout.slot_range)?.into_iter().collect();
                self.listener.remove_buttons(inventory.id(), &to_clear);
                for slot in &to_clear {
                    inventory.set_stack(*slot, None).await;
                }
                inventory
            }
            None => self.ctx.host.create_menu(capacity, &layout.title),
        };

        if layout.keep_persistent {
            self.place_persistent(actor, &inventory, main_items, capacity)
                .await?;
        }

        let allowed: Vec<usize> = parse_slots(&layout.slot_range)?.into_iter().collect();
        let start = (page - 1) * per_page;
        let end = (start + per_page).min(total_items);
        for (i, config) in page_items[start..end].iter().enumerate() {
            if i >= allowed.len() {
                // Excess page items are dropped without a trace; the
                // class-grouped path errors instead.
                break;
            }
            let target = allowed[i];
            if target >= capacity {
                continue;
            }
            let mut placed = config.clone();
            placed.set_slot_range((target + 1).to_string());
            let stack = self.create_item(&placed, Some(actor))?;
            inventory.set_stack(target, Some(stack)).await;
            if placed.action().is_some() {
                self.listener.register_button(inventory.id(), &placed);
            }
        }

        let center = (usize::from(layout.height) - 1) * 9 + 4;
        let gap = layout.spacing.gap();
        let prev_slot = center.saturating_sub(gap);
        let next_slot = (center + gap).min(capacity - 1);
        if reuse {
            // The previous page's arrows may have live actions here.
            self.listener
                .remove_buttons(inventory.id(), &[prev_slot, next_slot]);
        }

        let prev_config = if page > 1 {
            self.nav_button(
                &theme,
                NavDirection::Previous,
                prev_slot,
                &format!("Previous Page ({})", page - 1),
                "Click to go to previous page",
                Some(self.page_turn_action(layout, main_items, page_items, page - 1)),
            )
        } else {
            self.nav_button(
                &theme,
                NavDirection::Previous,
                prev_slot,
                "No Previous Page",
                "This is the first page",
                None,
            )
        };
        let stack = self.create_item(&prev_config, Some(actor))?;
        inventory.set_stack(prev_slot, Some(stack)).await;
        if prev_config.action().is_some() {
            self.listener.register_button(inventory.id(), &prev_config);
        }

        let next_config = if page < total_pages {
            self.nav_button(
                &theme,
                NavDirection::Next,
                next_slot,
                &format!("Next Page ({})", page + 1),
                "Click to go to next page",
                Some(self.page_turn_action(layout, main_items, page_items, page + 1)),
            )
        } else {
            self.nav_button(
                &theme,
                NavDirection::Next,
                next_slot,
                "Next Page (0)",
                "This is the last page",
                None,
            )
        };
        let stack = self.create_item(&next_config, Some(actor))?;
        inventory.set_stack(next_slot, Some(stack)).await;
        if next_config.action().is_some() {
            self.listener.register_button(inventory.id(), &next_config);
        }

        self.listener.add_gui_inventory(inventory.id());
        self.show(actor, &inventory, layout.texture.as_ref(), &layout.title, reuse)
            .await;
        Ok(())
    }

    /// Open one page of a class-grouped paginated menu.
    ///
    /// Each class occupies a row band (vertical offset = class index x 9)
    /// and its elements scan forward for the next free slot. Running out
    /// of inventory space is a hard [`GuiError::SpaceExceeded`], unlike
    /// the flat list path which silently drops.
    pub async fn paginated_classes(
        self: &Arc<Self>,
        actor: &Actor,
        layout: &PageLayout,
        main_items: &[ItemConfig],
        classes: &[ItemConfigClass],
        page: usize,
    ) -> Result<(), GuiError> {
        if layout.height < 1 {
            return Err(GuiError::InvalidDimensions {
                height: layout.height,
                width: 9,
            });
        }
        let record = self
            .ctx
            .directory
            .find(actor.uuid())
            .ok_or(GuiError::MissingPlayerRecord(actor.uuid()))?;
        let theme = record.theme_id;

        let per_page = layout.items_per_page.max(1);
        let total_classes = classes.len();
        let total_pages = total_classes.div_ceil(per_page);
        let page = page.clamp(1, total_pages.max(1));

        let mut ordered: Vec<ItemConfigClass> = classes.to_vec();
        ordered.sort_by_key(|class| class.order_index);

        let start = ((page - 1) * per_page).min(total_classes);
        let end = (start + per_page).min(total_classes);
        let page_classes = &ordered[start..end];

        let capacity = 9 * usize::from(layout.height);
        let inventory = self.ctx.host.create_menu(capacity, &layout.title);

        if layout.keep_persistent {
            self.place_persistent(actor, &inventory, main_items, capacity)
                .await?;
        }

        for (class_index, class) in page_classes.iter().enumerate() {
            for (&base_slot, element) in &class.elements {
                let initial = base_slot + class_index * 9;
                match element {
                    ClassElement::Item(config) => {
                        let target = self
                            .find_next_available_slot(&inventory, initial, capacity)
                            .await
                            .ok_or(GuiError::SpaceExceeded { start: initial })?;
                        self.place_class_item(actor, &inventory, config, None, target)
                            .await?;
                    }
                    ClassElement::Group(group) => {
                        let anchor = self
                            .find_next_available_slot(&inventory, initial, capacity)
                            .await
                            .ok_or(GuiError::SpaceExceeded { start: initial })?;
                        let stride = match group.orientation {
                            crate::item_config::Orientation::Horizontal => 1,
                            crate::item_config::Orientation::Vertical => 9,
                        };
                        for (i, member) in group.items.iter().enumerate() {
                            let base = anchor + i * stride;
                            let target = self
                                .find_next_available_slot(&inventory, base, capacity)
                                .await
                                .ok_or(GuiError::SpaceExceeded { start: base })?;
                            self.place_class_item(
                                actor,
                                &inventory,
                                member,
                                group.common_action.as_ref(),
                                target,
                            )
                            .await?;
                        }
                    }
                }
            }
        }

        let center = (usize::from(layout.height) - 1) * 9 + 4;
        let gap = layout.spacing.gap();
        let prev_slot = center.saturating_sub(gap);
        let next_slot = (center + gap).min(capacity - 1);

        if page > 1 {
            let config = self.nav_button(
                &theme,
                NavDirection::Previous,
                prev_slot,
                &format!("Previous Page ({})", page - 1),
                "Click to go to previous page",
                Some(self.class_turn_action(layout, main_items, classes, page - 1)),
            );
            let stack = self.create_item(&config, Some(actor))?;
            inventory.set_stack(prev_slot, Some(stack)).await;
            self.listener.register_button(inventory.id(), &config);
        } else {
            let stack = self.create_item(&ItemConfig::of_air(), Some(actor))?;
            inventory.set_stack(prev_slot, Some(stack)).await;
        }

        if page < total_pages {
            let config = self.nav_button(
                &theme,
                NavDirection::Next,
                next_slot,
                &format!("Next Page ({})", page + 1),
                "Click to go to next page",
                Some(self.class_turn_action(layout, main_items, classes, page + 1)),
            );
            let stack = self.create_item(&config, Some(actor))?;
            inventory.set_stack(next_slot, Some(stack)).await;
            self.listener.register_button(inventory.id(), &config);
        } else {
            let stack = self.create_item(&ItemConfig::of_air(), Some(actor))?;
            inventory.set_stack(next_slot, Some(stack)).await;
        }

        self.listener.add_gui_inventory(inventory.id());
        self.show(actor, &inventory, layout.texture.as_ref(), &layout.title, false)
            .await;
        Ok(())
    }

    /// Open a scrollable menu whose arrow buttons shift a content window
    /// over `items` and re-render it in place.
    pub async fn scrollable(
        self: &Arc<Self>,
        actor: &Actor,
        layout: &ScrollLayout,
        main_items: &[ItemConfig],
        items: Vec<ItemConfig>,
        initial_offset: usize,
    ) -> Result<(), GuiError> {
        if layout.height < 1 {
            return Err(GuiError::InvalidDimensions {
                height: layout.height,
                width: 9,
            });
        }
        let allowed: Vec<usize> = match layout.slot_range.as_deref() {
            Some(range) if !range.trim().is_empty() => {
                parse_slots(range)?.into_iter().collect()
            }
            _ => derive_content_slots(layout.height, layout.spacing, layout.arrows),
        };
        if allowed.is_empty() {
            return Err(GuiError::NoContentSlots);
        }

        let capacity = 9 * usize::from(layout.height);
        let inventory = self.ctx.host.create_menu(capacity, &layout.title);

        if layout.keep_persistent {
            self.place_persistent(actor, &inventory, main_items, capacity)
                .await?;
        }

        let min_row = allowed[0] / 9;
        let max_row = allowed[allowed.len() - 1] / 9;
        let (mut min_col, mut max_col) = (usize::MAX, 0usize);
        for slot in &allowed {
            min_col = min_col.min(slot % 9);
            max_col = max_col.max(slot % 9);
        }
        let grid_width = max_col - min_col + 1;
        let middle_row = (min_row + max_row) / 2;
        let top_center = min_row * 9 + 4;
        let bottom_center = max_row * 9 + 4;
        let left_center = middle_row * 9 + min_col;
        let right_center = middle_row * 9 + max_col;

        let items = Arc::new(items);
        let allowed = Arc::new(allowed);

        let mut arrows: Vec<(i64, usize)> = Vec::new();
        match layout.arrows {
            ArrowBarMode::Left => arrows.push((-1, left_center)),
            ArrowBarMode::Right => arrows.push((1, right_center)),
            ArrowBarMode::LeftRight => {
                arrows.push((-1, left_center));
                arrows.push((1, right_center));
            }
            ArrowBarMode::Up => arrows.push((-1, top_center)),
            ArrowBarMode::Down => arrows.push((1, bottom_center)),
            ArrowBarMode::UpDown => {
                arrows.push((-1, top_center));
                arrows.push((1, bottom_center));
            }
        }

        for (delta, slot) in arrows {
            let config = self.scroll_arrow(
                &inventory,
                &items,
                &allowed,
                layout.orientation,
                grid_width,
                initial_offset,
                delta,
                slot,
            );
            let stack = self.create_item(&config, Some(actor))?;
            inventory.set_stack(slot, Some(stack)).await;
            self.listener.register_button(inventory.id(), &config);
        }

        self.scroll_offsets.insert(inventory.id(), initial_offset);
        self.render_scrollable_window(&inventory, &items, &allowed)
            .await;

        self.listener.add_gui_inventory(inventory.id());
        self.show(actor, &inventory, layout.texture.as_ref(), &layout.title, false)
            .await;
        Ok(())
    }

    /// Re-render the content window of an already-open scrollable
    /// inventory. Only the window slots are touched: their actions are
    /// deregistered, the slots cleared, and the visible slice placed and
    /// re-registered. Runs on the coordinating loop.
    pub async fn render_scrollable_window(
        self: &Arc<Self>,
        inventory: &Arc<dyn MenuInventory>,
        items: &Arc<Vec<ItemConfig>>,
        allowed: &Arc<Vec<usize>>,
    ) {
        let creator = Arc::clone(self);
        let inventory = Arc::clone(inventory);
        let items = Arc::clone(items);
        let allowed = Arc::clone(allowed);
        self.ctx
            .scheduler
            .run_main(Box::pin(async move {
                let window = allowed.len();
                let total = items.len();

                let mut offset = creator
                    .scroll_offsets
                    .get(&inventory.id())
                    .map(|entry| *entry)
                    .unwrap_or(0);
                offset = if total <= window {
                    0
                } else {
                    offset.min(total - window)
                };
                creator.scroll_offsets.insert(inventory.id(), offset);

                creator.listener.remove_buttons(inventory.id(), allowed.as_slice());
                for slot in allowed.iter() {
                    inventory.set_stack(*slot, None).await;
                }

                for i in 0..window {
                    let index = offset + i;
                    if index >= total {
                        continue;
                    }
                    let target = allowed[i];
                    let mut placed = items[index].clone();
                    placed.set_slot_range((target + 1).to_string());
                    match creator.create_item(&placed, None) {
                        Ok(stack) => {
                            inventory.set_stack(target, Some(stack)).await;
                            if placed.action().is_some() {
                                creator.listener.register_button(inventory.id(), &placed);
                            }
                        }
                        Err(e) => {
                            log::error!(
                                "prism_gui: skipping scroll content at slot {target}: {e}"
                            );
                        }
                    }
                }
            }))
            .await;
    }

    /// Build a stack from an item config. Custom-item references resolve
    /// through the host's source when one is installed; an unresolvable
    /// reference is an error, while a missing source falls back to the
    /// plain kind.
    pub fn create_item(
        &self,
        config: &ItemConfig,
        viewer: Option<&Actor>,
    ) -> Result<ItemStack, GuiError> {
        if let Some(name) = config.custom_item() {
            if let Some(source) = &self.ctx.custom_items {
                let Some(mut stack) = source.resolve(name) else {
                    log::error!("prism_gui: custom item '{name}' could not be found");
                    return Err(GuiError::UnknownCustomItem(name.to_string()));
                };
                for (key, value) in config.nbt_data() {
                    stack.nbt.insert(key.clone(), value.clone());
                }
                stack.display_name = Some(config.name().to_string());
                stack.lore = config.lore().to_vec();
                if stack.kind == ItemKind::PLAYER_HEAD {
                    stack.head_owner =
                        config.head_owner().or_else(|| viewer.map(|a| a.uuid()));
                }
                return Ok(stack);
            }
            // No source installed; render the plain kind instead.
        }

        let mut stack = ItemStack::new(config.kind());
        for (key, value) in config.nbt_data() {
            stack.nbt.insert(key.clone(), value.clone());
        }
        stack.display_name = Some(config.name().to_string());
        stack.lore = config.lore().to_vec();
        stack.enchant_glow = config.is_enchanted();
        stack.custom_model_data = config.custom_model_data();
        if stack.kind == ItemKind::PLAYER_HEAD {
            stack.head_owner = config.head_owner().or_else(|| viewer.map(|a| a.uuid()));
        }
        Ok(stack)
    }

    /// First empty slot at or after `start`, or `None` when the scan
    /// runs past `capacity`.
    pub async fn find_next_available_slot(
        &self,
        inventory: &Arc<dyn MenuInventory>,
        start: usize,
        capacity: usize,
    ) -> Option<usize> {
        let mut slot = start;
        while slot < capacity && inventory.get_stack(slot).await.is_some() {
            slot += 1;
        }
        (slot < capacity).then_some(slot)
    }

    async fn place_persistent(
        self: &Arc<Self>,
        actor: &Actor,
        inventory: &Arc<dyn MenuInventory>,
        main_items: &[ItemConfig],
        capacity: usize,
    ) -> Result<(), GuiError> {
        for config in main_items {
            for slot in parse_slots(config.slot_range())? {
                if slot >= capacity {
                    continue;
                }
                let stack = self.create_item(config, Some(actor))?;
                inventory.set_stack(slot, Some(stack)).await;
                if config.action().is_some() {
                    self.listener.register_button(inventory.id(), config);
                }
            }
        }
        Ok(())
    }

    async fn place_class_item(
        self: &Arc<Self>,
        actor: &Actor,
        inventory: &Arc<dyn MenuInventory>,
        config: &ItemConfig,
        fallback_action: Option<&ButtonAction>,
        target: usize,
    ) -> Result<(), GuiError> {
        let mut placed = config.clone();
        placed.set_slot_range((target + 1).to_string());
        if placed.action().is_none() {
            placed.set_action(fallback_action.cloned());
        }
        let stack = self.create_item(&placed, Some(actor))?;
        inventory.set_stack(target, Some(stack)).await;
        if placed.action().is_some() {
            self.listener.register_button(inventory.id(), &placed);
        }
        Ok(())
    }

    fn nav_button(
        &self,
        theme: &str,
        direction: NavDirection,
        slot: usize,
        label: &str,
        hint: &str,
        action: Option<ButtonAction>,
    ) -> ItemConfig {
        let icon = match direction {
            NavDirection::Previous => format!("prism_themes:left_arrow_{theme}"),
            NavDirection::Next => format!("prism_themes:right_arrow_{theme}"),
        };
        ItemConfigBuilder::from(ItemKind::ARROW)
            .set_name(to_small_caps(label))
            .set_slot_range((slot + 1).to_string())
            .set_clickable(true)
            .set_custom_item(Some(icon))
            .add_lore_line(to_small_caps(hint))
            .set_action(action)
            .build()
    }

    fn page_turn_action(
        self: &Arc<Self>,
        layout: &PageLayout,
        main_items: &[ItemConfig],
        page_items: &[ItemConfig],
        target_page: usize,
    ) -> ButtonAction {
        let creator = Arc::clone(self);
        let layout = layout.clone();
        let main_items = main_items.to_vec();
        let page_items = page_items.to_vec();
        ButtonAction::of_run_code(true, move |player: Actor| {
            let creator = Arc::clone(&creator);
            let layout = layout.clone();
            let main_items = main_items.clone();
            let page_items = page_items.clone();
            Box::pin(async move {
                if let Err(e) = creator
                    .paginated(&player, &layout, &main_items, &page_items, target_page)
                    .await
                {
                    log::error!("prism_gui: page navigation failed: {e}");
                }
            })
        })
    }

    fn class_turn_action(
        self: &Arc<Self>,
        layout: &PageLayout,
        main_items: &[ItemConfig],
        classes: &[ItemConfigClass],
        target_page: usize,
    ) -> ButtonAction {
        let creator = Arc::clone(self);
        let layout = layout.clone();
        let main_items = main_items.to_vec();
        let classes = classes.to_vec();
        ButtonAction::of_run_code(true, move |player: Actor| {
            let creator = Arc::clone(&creator);
            let layout = layout.clone();
            let main_items = main_items.clone();
            let classes = classes.clone();
            Box::pin(async move {
                if let Err(e) = creator
                    .paginated_classes(&player, &layout, &main_items, &classes, target_page)
                    .await
                {
                    log::error!("prism_gui: page navigation failed: {e}");
                }
            })
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn scroll_arrow(
        self: &Arc<Self>,
        inventory: &Arc<dyn MenuInventory>,
        items: &Arc<Vec<ItemConfig>>,
        allowed: &Arc<Vec<usize>>,
        orientation: ScrollOrientation,
        grid_width: usize,
        initial_offset: usize,
        delta: i64,
        slot: usize,
    ) -> ItemConfig {
        let creator = Arc::clone(self);
        let inventory = Arc::clone(inventory);
        let items = Arc::clone(items);
        let allowed = Arc::clone(allowed);
        let action = ButtonAction::of_run_code(false, move |player: Actor| {
            let creator = Arc::clone(&creator);
            let inventory = Arc::clone(&inventory);
            let items = Arc::clone(&items);
            let allowed = Arc::clone(&allowed);
            Box::pin(async move {
                // Only scroll the inventory the player is actually in.
                let Some(open) = player.current_menu().await else {
                    return;
                };
                if open.id() != inventory.id() {
                    return;
                }

                let window = allowed.len();
                let total = items.len();
                let current = creator
                    .scroll_offsets
                    .get(&inventory.id())
                    .map(|entry| *entry)
                    .unwrap_or(initial_offset);

                let shift = match orientation {
                    ScrollOrientation::Vertical => delta * grid_width as i64,
                    ScrollOrientation::Horizontal => delta,
                };
                let new_offset = if total <= window {
                    0
                } else {
                    (current as i64 + shift).clamp(0, (total - window) as i64) as usize
                };
                creator.scroll_offsets.insert(inventory.id(), new_offset);
                creator
                    .render_scrollable_window(&inventory, &items, &allowed)
                    .await;
            })
        });

        let display = if delta < 0 { "\u{25c4}/\u{25b2}" } else { "\u{25ba}/\u{25bc}" };
        ItemConfigBuilder::from(ItemKind::ARROW)
            .set_name(display)
            .set_slot_range((slot + 1).to_string())
            .set_clickable(true)
            .set_custom_item(Some("prism_themes:arrow".to_string()))
            .add_lore_line(to_small_caps("Click to scroll"))
            .set_action(Some(action))
            .build()
    }

    async fn reusable_inventory(&self, actor: &Actor) -> Option<Arc<dyn MenuInventory>> {
        let stored = self.current_inventory(actor.uuid())?;
        let open = actor.current_menu().await?;
        (open.id() == stored.id()).then_some(stored)
    }

    async fn show(
        self: &Arc<Self>,
        actor: &Actor,
        inventory: &Arc<dyn MenuInventory>,
        texture: Option<&MenuTexture>,
        title: &str,
        reuse: bool,
    ) {
        let creator = Arc::clone(self);
        let actor = Arc::clone(actor);
        let inventory = Arc::clone(inventory);
        let texture = texture.cloned();
        let title = title.to_string();
        self.ctx
            .scheduler
            .run_main(Box::pin(async move {
                if !reuse {
                    actor.open_menu(Arc::clone(&inventory)).await;
                    creator
                        .open_menus
                        .lock()
                        .unwrap_or_else(|e| e.into_inner())
                        .insert(actor.uuid(), Arc::clone(&inventory));
                }
                if let Some(texture) = texture {
                    creator.apply_texture(&actor, &texture, &title).await;
                }
            }))
            .await;
    }

    async fn apply_texture(&self, actor: &Actor, texture: &MenuTexture, title: &str) {
        let Some(source) = &self.ctx.textures else {
            return;
        };
        if source.exists(&texture.key) {
            source.apply(actor, &texture.key, title, texture.offset).await;
        } else {
            log::warn!("prism_gui: menu texture '{}' does not exist", texture.key);
        }
    }
}

#[derive(Clone, Copy)]
enum NavDirection {
    Previous,
    Next,
}
