//! Declarative descriptors for renderable menu items.

use std::collections::BTreeMap;

use prism_util::text::NamedColor;
use prism_host::{ItemKind, NbtValue};
use serde_json::Value;
use uuid::Uuid;

use crate::button_action::ButtonAction;
use crate::error::GuiError;

/// Color rarity bands for item names and lore accents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythical,
    GodLike,
}

impl Rarity {
    /// Primary and accent colors for this band.
    #[must_use]
    pub const fn colors(self) -> (NamedColor, NamedColor) {
        match self {
            Self::Common => (NamedColor::White, NamedColor::Gray),
            Self::Uncommon => (NamedColor::Green, NamedColor::DarkGreen),
            Self::Rare => (NamedColor::Blue, NamedColor::DarkBlue),
            Self::Epic => (NamedColor::DarkPurple, NamedColor::LightPurple),
            Self::Legendary => (NamedColor::Gold, NamedColor::Yellow),
            Self::Mythical => (NamedColor::DarkRed, NamedColor::Red),
            Self::GodLike => (NamedColor::Aqua, NamedColor::LightPurple),
        }
    }

    #[must_use]
    pub const fn primary_color(self) -> NamedColor {
        self.colors().0
    }
}

/// Configuration for one renderable item: looks, slots, and click
/// behavior. Built through [`ItemConfigBuilder`]; immutable afterwards
/// except for the name/slot-range setters pagination uses when it
/// re-lays an item out.
#[derive(Clone)]
pub struct ItemConfig {
    kind: ItemKind,
    name: String,
    slot_range: String,
    clickable: bool,
    custom_model_data: Option<i32>,
    custom_item: Option<String>,
    lore: Vec<String>,
    head_owner: Option<Uuid>,
    nbt: BTreeMap<String, NbtValue>,
    action: Option<ButtonAction>,
    enchant_glow: bool,
    rarity: Option<Rarity>,
}

impl ItemConfig {
    /// A blank placeholder that renders as an empty slot.
    #[must_use]
    pub fn of_air() -> Self {
        ItemConfigBuilder::from(ItemKind::AIR).build()
    }

    /// Build an item from a JSON menu definition.
    ///
    /// Expected shape:
    /// `{"kind": "arrow", "name": "...", "slot": "10-12", "lore": [...],
    ///   "custom_model_data": 3, "custom_item": "...", "action": {...}}`
    pub fn from_json(json: &Value) -> Result<Self, GuiError> {
        let object = json
            .as_object()
            .ok_or_else(|| GuiError::BadDefinition("item definition must be an object".into()))?;

        let kind_name = object
            .get("kind")
            .and_then(Value::as_str)
            .ok_or_else(|| GuiError::BadDefinition("item definition is missing 'kind'".into()))?;
        let kind = ItemKind::by_name(kind_name)
            .ok_or_else(|| GuiError::BadDefinition(format!("unknown item kind '{kind_name}'")))?;

        let mut builder = ItemConfigBuilder::from(kind);
        if let Some(name) = object.get("name").and_then(Value::as_str) {
            builder = builder.set_name(name);
        }
        if let Some(slot) = object.get("slot").and_then(Value::as_str) {
            builder = builder.set_slot_range(slot);
        }
        if let Some(model) = object.get("custom_model_data").and_then(Value::as_i64) {
            builder = builder.set_custom_model_data(Some(model as i32));
        }
        if let Some(custom) = object.get("custom_item").and_then(Value::as_str) {
            builder = builder.set_custom_item(Some(custom.to_string()));
        }
        if let Some(lore) = object.get("lore").and_then(Value::as_array) {
            for line in lore {
                if let Some(line) = line.as_str() {
                    builder = builder.add_lore_line(line);
                }
            }
        }
        if let Some(action) = object.get("action") {
            let action = ButtonAction::from_json(action)?;
            builder = builder.set_clickable(true).set_action(Some(action));
        }
        Ok(builder.build())
    }

    #[must_use]
    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[must_use]
    pub fn slot_range(&self) -> &str {
        &self.slot_range
    }

    pub fn set_slot_range(&mut self, slot_range: impl Into<String>) {
        self.slot_range = slot_range.into();
    }

    #[must_use]
    pub fn is_clickable(&self) -> bool {
        self.clickable
    }

    #[must_use]
    pub fn custom_model_data(&self) -> Option<i32> {
        self.custom_model_data
    }

    /// The pack-defined item name this config resolves through the
    /// host's custom item source, if any.
    #[must_use]
    pub fn custom_item(&self) -> Option<&str> {
        self.custom_item.as_deref()
    }

    #[must_use]
    pub fn lore(&self) -> &[String] {
        &self.lore
    }

    #[must_use]
    pub fn head_owner(&self) -> Option<Uuid> {
        self.head_owner
    }

    #[must_use]
    pub fn action(&self) -> Option<&ButtonAction> {
        self.action.as_ref()
    }

    pub fn set_action(&mut self, action: Option<ButtonAction>) {
        self.action = action;
    }

    #[must_use]
    pub fn rarity(&self) -> Option<Rarity> {
        self.rarity
    }

    /// Mark the item to render with an enchantment glow.
    #[must_use]
    pub fn enchant(mut self) -> Self {
        self.enchant_glow = true;
        self
    }

    #[must_use]
    pub fn is_enchanted(&self) -> bool {
        self.enchant_glow
    }

    #[must_use]
    pub fn nbt_data(&self) -> &BTreeMap<String, NbtValue> {
        &self.nbt
    }

    /// Attach a side-data value. The value type set is closed by
    /// construction; see [`NbtValue`].
    pub fn add_nbt_data(&mut self, key: impl Into<String>, value: NbtValue) {
        self.nbt.insert(key.into(), value);
    }

    /// Attach a side-data value from dynamic JSON. Only the closed
    /// scalar set is accepted; anything else fails here, at insertion
    /// time, never later during a render pass.
    pub fn add_nbt_json(&mut self, key: impl Into<String>, value: &Value) -> Result<(), GuiError> {
        let key = key.into();
        let converted = match value {
            Value::String(s) => {
                // UUIDs arrive as strings in configs.
                match Uuid::parse_str(s) {
                    Ok(uuid) => NbtValue::Uuid(uuid),
                    Err(_) => NbtValue::Str(s.clone()),
                }
            }
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    NbtValue::Int(i as i32)
                } else if let Some(f) = n.as_f64() {
                    NbtValue::Double(f)
                } else {
                    return Err(GuiError::UnsupportedSideData {
                        key,
                        found: n.to_string(),
                    });
                }
            }
            other => {
                return Err(GuiError::UnsupportedSideData {
                    key,
                    found: type_name(other).to_string(),
                })
            }
        };
        self.nbt.insert(key, converted);
        Ok(())
    }
}

impl std::fmt::Debug for ItemConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemConfig")
            .field("kind", &self.kind.name)
            .field("name", &self.name)
            .field("slot_range", &self.slot_range)
            .field("clickable", &self.clickable)
            .field("custom_item", &self.custom_item)
            .field("has_action", &self.action.is_some())
            .finish_non_exhaustive()
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Fluent builder for [`ItemConfig`].
///
/// ```
/// use prism_gui::ItemConfigBuilder;
/// use prism_host::ItemKind;
///
/// let config = ItemConfigBuilder::from(ItemKind::DIAMOND)
///     .set_name("Cool Sword")
///     .add_lore_line("Sharp!")
///     .build();
/// assert_eq!(config.name(), "Cool Sword");
/// ```
#[derive(Clone)]
pub struct ItemConfigBuilder {
    kind: ItemKind,
    name: String,
    slot_range: String,
    clickable: bool,
    custom_model_data: Option<i32>,
    custom_item: Option<String>,
    lore: Vec<String>,
    head_owner: Option<Uuid>,
    nbt: BTreeMap<String, NbtValue>,
    action: Option<ButtonAction>,
    enchant_glow: bool,
    rarity: Option<Rarity>,
}

impl ItemConfigBuilder {
    #[must_use]
    pub fn from(kind: ItemKind) -> Self {
        Self {
            kind,
            name: String::new(),
            slot_range: String::new(),
            clickable: false,
            custom_model_data: None,
            custom_item: None,
            lore: Vec::new(),
            head_owner: None,
            nbt: BTreeMap::new(),
            action: None,
            enchant_glow: false,
            rarity: None,
        }
    }

    #[must_use]
    pub fn set_kind(mut self, kind: ItemKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn set_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn set_slot_range(mut self, slot_range: impl Into<String>) -> Self {
        self.slot_range = slot_range.into();
        self
    }

    #[must_use]
    pub fn set_clickable(mut self, clickable: bool) -> Self {
        self.clickable = clickable;
        self
    }

    #[must_use]
    pub fn set_custom_model_data(mut self, custom_model_data: Option<i32>) -> Self {
        self.custom_model_data = custom_model_data;
        self
    }

    #[must_use]
    pub fn set_custom_item(mut self, custom_item: Option<String>) -> Self {
        self.custom_item = custom_item;
        self
    }

    #[must_use]
    pub fn set_lore(mut self, lore: Vec<String>) -> Self {
        self.lore = lore;
        self
    }

    #[must_use]
    pub fn add_lore_line(mut self, line: impl Into<String>) -> Self {
        self.lore.push(line.into());
        self
    }

    #[must_use]
    pub fn set_head_owner(mut self, head_owner: Option<Uuid>) -> Self {
        self.head_owner = head_owner;
        self
    }

    #[must_use]
    pub fn add_nbt_data(mut self, key: impl Into<String>, value: NbtValue) -> Self {
        self.nbt.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn set_action(mut self, action: Option<ButtonAction>) -> Self {
        self.action = action;
        self
    }

    #[must_use]
    pub fn set_enchanted(mut self, enchanted: bool) -> Self {
        self.enchant_glow = enchanted;
        self
    }

    #[must_use]
    pub fn set_rarity(mut self, rarity: Option<Rarity>) -> Self {
        self.rarity = rarity;
        self
    }

    #[must_use]
    pub fn build(self) -> ItemConfig {
        ItemConfig {
            kind: self.kind,
            name: self.name,
            slot_range: self.slot_range,
            clickable: self.clickable,
            custom_model_data: self.custom_model_data,
            custom_item: self.custom_item,
            lore: self.lore,
            head_owner: self.head_owner,
            nbt: self.nbt,
            action: self.action,
            enchant_glow: self.enchant_glow,
            rarity: self.rarity,
        }
    }
}

/// Layout direction of an [`ItemConfigGroup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A cluster of items laid out together from one anchor slot, sharing an
/// optional fallback action.
#[derive(Clone)]
pub struct ItemConfigGroup {
    pub orientation: Orientation,
    pub items: Vec<ItemConfig>,
    /// Applied to any member that has no action of its own.
    pub common_action: Option<ButtonAction>,
}

impl ItemConfigGroup {
    #[must_use]
    pub fn new(
        orientation: Orientation,
        items: Vec<ItemConfig>,
        common_action: Option<ButtonAction>,
    ) -> Self {
        Self {
            orientation,
            items,
            common_action,
        }
    }
}

/// One element of an [`ItemConfigClass`]: a single item or a group.
#[derive(Clone)]
pub enum ClassElement {
    Item(ItemConfig),
    Group(ItemConfigGroup),
}

/// A page-level unit for class-grouped pagination: anchor slot to
/// element, ordered by an explicit index (lower first).
#[derive(Clone)]
pub struct ItemConfigClass {
    pub order_index: i32,
    pub elements: BTreeMap<usize, ClassElement>,
}

impl ItemConfigClass {
    #[must_use]
    pub fn new(order_index: i32, elements: BTreeMap<usize, ClassElement>) -> Self {
        Self {
            order_index,
            elements,
        }
    }
}
