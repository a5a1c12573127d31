//! Item kinds and stacks as menus see them: display-oriented, with a
//! small closed set of side-data scalars.

use std::collections::BTreeMap;

use uuid::Uuid;

/// A static item type, identified by numeric id and registry name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemKind {
    pub id: u16,
    pub name: &'static str,
}

impl ItemKind {
    pub const AIR: Self = Self { id: 0, name: "air" };
    pub const STONE: Self = Self { id: 1, name: "stone" };
    pub const ARROW: Self = Self {
        id: 682,
        name: "arrow",
    };
    pub const COMPASS: Self = Self {
        id: 1034,
        name: "compass",
    };
    pub const CLOCK: Self = Self {
        id: 1036,
        name: "clock",
    };
    pub const BOOK: Self = Self {
        id: 1046,
        name: "book",
    };
    pub const PAPER: Self = Self {
        id: 1045,
        name: "paper",
    };
    pub const MAP: Self = Self { id: 1042, name: "map" };
    pub const CHEST: Self = Self {
        id: 298,
        name: "chest",
    };
    pub const BARRIER: Self = Self {
        id: 442,
        name: "barrier",
    };
    pub const EMERALD: Self = Self {
        id: 847,
        name: "emerald",
    };
    pub const DIAMOND: Self = Self {
        id: 830,
        name: "diamond",
    };
    pub const PLAYER_HEAD: Self = Self {
        id: 1127,
        name: "player_head",
    };
    pub const GLASS_PANE: Self = Self {
        id: 506,
        name: "glass_pane",
    };

    const ALL: &'static [Self] = &[
        Self::AIR,
        Self::STONE,
        Self::ARROW,
        Self::COMPASS,
        Self::CLOCK,
        Self::BOOK,
        Self::PAPER,
        Self::MAP,
        Self::CHEST,
        Self::BARRIER,
        Self::EMERALD,
        Self::DIAMOND,
        Self::PLAYER_HEAD,
        Self::GLASS_PANE,
    ];

    /// Look up a kind by registry name, e.g. for JSON menu definitions.
    #[must_use]
    pub fn by_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        Self::ALL.iter().copied().find(|kind| kind.name == lower)
    }
}

/// Side data attached to a stack. This is the closed scalar set menus may
/// carry; anything else is rejected where the data enters the system.
#[derive(Debug, Clone, PartialEq)]
pub enum NbtValue {
    Uuid(Uuid),
    Int(i32),
    Double(f64),
    Float(f32),
    Str(String),
    /// An enum constant carried by name.
    EnumName(String),
    /// An opaque nested stack.
    Item(Box<ItemStack>),
}

/// A renderable stack: kind plus the display metadata menus set on it.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStack {
    pub kind: ItemKind,
    pub count: u8,
    pub display_name: Option<String>,
    pub lore: Vec<String>,
    pub custom_model_data: Option<i32>,
    pub enchant_glow: bool,
    pub head_owner: Option<Uuid>,
    pub nbt: BTreeMap<String, NbtValue>,
}

impl ItemStack {
    #[must_use]
    pub fn new(kind: ItemKind) -> Self {
        Self {
            kind,
            count: 1,
            display_name: None,
            lore: Vec::new(),
            custom_model_data: None,
            enchant_glow: false,
            head_owner: None,
            nbt: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kind == ItemKind::AIR || self.count == 0
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn nbt_value(&self, key: &str) -> Option<&NbtValue> {
        self.nbt.get(key)
    }

    #[must_use]
    pub fn has_nbt(&self, key: &str) -> bool {
        self.nbt.contains_key(key)
    }
}
