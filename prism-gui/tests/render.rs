//! End-to-end render flows against the in-memory host.

mod common;

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use common::{harness, harness_without_record, item, name_at};
use prism_gui::{
    ArrowBarMode, ArrowGap, ButtonAction, ClassElement, ClickOutcome, GuiError, GuiListener,
    ItemConfigBuilder, ItemConfigClass, ItemConfigGroup, Orientation, PageLayout, ScrollLayout,
    ScrollOrientation,
};
use prism_host::{ItemKind, MenuInventory, PlayerHandle};
use prism_util::strings::to_small_caps;

fn page_layout(height: u8, slot_range: &str, items_per_page: usize) -> PageLayout {
    PageLayout {
        height,
        spacing: ArrowGap::Small,
        slot_range: slot_range.to_string(),
        items_per_page,
        title: "Test Menu".to_string(),
        keep_persistent: true,
        texture: None,
        fluent: false,
    }
}

/// An action that records `tag` into `log` when clicked.
fn recording_action(log: &Arc<Mutex<Vec<usize>>>, tag: usize) -> ButtonAction {
    let log = Arc::clone(log);
    ButtonAction::of_run_code(false, move |_player| {
        let log = Arc::clone(&log);
        Box::pin(async move {
            log.lock().unwrap().push(tag);
        })
    })
}

#[tokio::test]
async fn single_page_renders_all_items_with_inert_navigation() {
    let h = harness();
    let layout = page_layout(2, "1-10", 10);
    let items: Vec<_> = (0..5).map(|i| item(&format!("i-{i}"), None)).collect();

    h.creator
        .paginated(&h.actor, &layout, &[], &items, 1)
        .await
        .unwrap();

    for i in 0..5 {
        assert_eq!(name_at(&h.player, i).await.as_deref(), Some(format!("i-{i}").as_str()));
    }
    assert!(name_at(&h.player, 5).await.is_none());

    // Navigation buttons are placed in their "no more pages" state and
    // carry no action.
    let menu = h.player.current_menu().await.unwrap();
    let prev_slot = 12;
    let next_slot = 14;
    assert_eq!(
        name_at(&h.player, prev_slot).await,
        Some(to_small_caps("No Previous Page"))
    );
    assert_eq!(
        name_at(&h.player, next_slot).await,
        Some(to_small_caps("Next Page (0)"))
    );
    assert!(h.listener.action_at(menu.id(), prev_slot).is_none());
    assert!(h.listener.action_at(menu.id(), next_slot).is_none());
}

#[tokio::test]
async fn out_of_range_page_clamps_to_last() {
    let h = harness();
    let layout = page_layout(2, "1-10", 10);
    let items: Vec<_> = (0..25).map(|i| item(&format!("i-{i}"), None)).collect();

    // 25 items at 10 per page is 3 pages; page 5 clamps to 3.
    h.creator
        .paginated(&h.actor, &layout, &[], &items, 5)
        .await
        .unwrap();

    for (slot, index) in (0..5).zip(20..25) {
        assert_eq!(
            name_at(&h.player, slot).await.as_deref(),
            Some(format!("i-{index}").as_str())
        );
    }
    assert!(name_at(&h.player, 5).await.is_none());

    // Page 3 of 3: previous is live, next is inert.
    let menu = h.player.current_menu().await.unwrap();
    assert!(h.listener.action_at(menu.id(), 12).is_some());
    assert!(h.listener.action_at(menu.id(), 14).is_none());
}

#[tokio::test]
async fn next_button_renders_the_following_page() {
    let h = harness();
    let layout = page_layout(2, "1-10", 10);
    let items: Vec<_> = (0..25).map(|i| item(&format!("i-{i}"), None)).collect();

    h.creator
        .paginated(&h.actor, &layout, &[], &items, 1)
        .await
        .unwrap();
    let first_menu = h.player.current_menu().await.unwrap();
    let next_slot = 14;
    assert!(h.listener.action_at(first_menu.id(), next_slot).is_some());

    let outcome = h
        .listener
        .handle_click(&h.actor, first_menu.id(), next_slot, &h.ctx)
        .await;
    assert_eq!(outcome, ClickOutcome::Executed);

    // A fresh inventory holds items 10..20 now.
    let second_menu = h.player.current_menu().await.unwrap();
    assert_ne!(second_menu.id(), first_menu.id());
    assert_eq!(name_at(&h.player, 0).await.as_deref(), Some("i-10"));
    assert_eq!(name_at(&h.player, 9).await.as_deref(), Some("i-19"));
    // Page 2 of 3: both arrows live.
    assert!(h.listener.action_at(second_menu.id(), 12).is_some());
    assert!(h.listener.action_at(second_menu.id(), 14).is_some());
}

#[tokio::test]
async fn excess_list_items_are_dropped_silently() {
    let h = harness();
    // Three content slots but ten requested per page.
    let layout = page_layout(1, "1-3", 10);
    let items: Vec<_> = (0..6).map(|i| item(&format!("i-{i}"), None)).collect();

    h.creator
        .paginated(&h.actor, &layout, &[], &items, 1)
        .await
        .unwrap();

    assert_eq!(name_at(&h.player, 0).await.as_deref(), Some("i-0"));
    assert_eq!(name_at(&h.player, 2).await.as_deref(), Some("i-2"));
    // Items 3..6 fell off the end without an error.
    let menu = h.player.current_menu().await.unwrap();
    for slot in [6usize, 7, 8] {
        assert!(menu.get_stack(slot).await.is_none());
    }
}

#[tokio::test]
async fn class_overflow_is_a_hard_error() {
    let h = harness();
    let layout = page_layout(1, "", 5);

    let mut elements = BTreeMap::new();
    elements.insert(
        7usize,
        ClassElement::Group(ItemConfigGroup::new(
            Orientation::Horizontal,
            vec![item("a", None), item("b", None), item("c", None)],
            None,
        )),
    );
    let classes = vec![ItemConfigClass::new(0, elements)];

    let err = h
        .creator
        .paginated_classes(&h.actor, &layout, &[], &classes, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, GuiError::SpaceExceeded { .. }));
}

#[tokio::test]
async fn classes_place_from_anchor_scanning_forward() {
    let h = harness();
    let layout = page_layout(2, "", 5);
    let log = Arc::new(Mutex::new(Vec::new()));

    let mut elements = BTreeMap::new();
    elements.insert(0usize, ClassElement::Item(item("solo", None)));
    elements.insert(
        1usize,
        ClassElement::Group(ItemConfigGroup::new(
            Orientation::Horizontal,
            vec![item("g-0", None), item("g-1", None)],
            Some(recording_action(&log, 42)),
        )),
    );
    let classes = vec![ItemConfigClass::new(0, elements)];

    h.creator
        .paginated_classes(&h.actor, &layout, &[], &classes, 1)
        .await
        .unwrap();

    assert_eq!(name_at(&h.player, 0).await.as_deref(), Some("solo"));
    assert_eq!(name_at(&h.player, 1).await.as_deref(), Some("g-0"));
    assert_eq!(name_at(&h.player, 2).await.as_deref(), Some("g-1"));

    // Group members without their own action inherit the group action.
    let menu = h.player.current_menu().await.unwrap();
    let outcome = h.listener.handle_click(&h.actor, menu.id(), 2, &h.ctx).await;
    assert_eq!(outcome, ClickOutcome::Executed);
    assert_eq!(*log.lock().unwrap(), vec![42]);
}

#[tokio::test]
async fn scroll_rerender_replaces_stale_actions() {
    let h = harness();
    let layout = ScrollLayout {
        height: 3,
        spacing: ArrowGap::Small,
        slot_range: Some("11-13,20-22".to_string()),
        orientation: ScrollOrientation::Vertical,
        arrows: ArrowBarMode::UpDown,
        title: "Scroll".to_string(),
        keep_persistent: false,
        texture: None,
    };

    let log = Arc::new(Mutex::new(Vec::new()));
    let items: Vec<_> = (0..8)
        .map(|i| item(&format!("s-{i}"), Some(recording_action(&log, i))))
        .collect();

    h.creator
        .scrollable(&h.actor, &layout, &[], items, 0)
        .await
        .unwrap();
    let menu = h.player.current_menu().await.unwrap();

    // Window covers slots {10,11,12,19,20,21}; slot 10 starts as item 0.
    assert_eq!(name_at(&h.player, 10).await.as_deref(), Some("s-0"));
    let outcome = h.listener.handle_click(&h.actor, menu.id(), 10, &h.ctx).await;
    assert_eq!(outcome, ClickOutcome::Executed);

    // The bottom arrow sits at slot 22 and shifts by one row (3 columns).
    // 8 items in a 6-slot window clamps the offset to 2.
    let outcome = h.listener.handle_click(&h.actor, menu.id(), 22, &h.ctx).await;
    assert_eq!(outcome, ClickOutcome::Executed);
    assert_eq!(name_at(&h.player, 10).await.as_deref(), Some("s-2"));

    // The same slot now fires the item shown after the scroll, never the
    // action that was registered before it.
    let outcome = h.listener.handle_click(&h.actor, menu.id(), 10, &h.ctx).await;
    assert_eq!(outcome, ClickOutcome::Executed);
    assert_eq!(*log.lock().unwrap(), vec![0, 2]);
}

#[tokio::test]
async fn fluent_rerender_reuses_the_open_inventory() {
    let h = harness();
    let mut layout = page_layout(3, "1-9", 5);
    let persistent = ItemConfigBuilder::from(ItemKind::CHEST)
        .set_name("menu-root")
        .set_slot_range("27")
        .build();
    let items: Vec<_> = (0..8).map(|i| item(&format!("p-{i}"), None)).collect();

    h.creator
        .paginated(&h.actor, &layout, &[persistent.clone()], &items, 1)
        .await
        .unwrap();
    let first_menu = h.player.current_menu().await.unwrap();
    assert_eq!(name_at(&h.player, 0).await.as_deref(), Some("p-0"));
    assert_eq!(name_at(&h.player, 26).await.as_deref(), Some("menu-root"));

    layout.fluent = true;
    h.creator
        .paginated(&h.actor, &layout, &[persistent], &items, 2)
        .await
        .unwrap();

    // Same inventory object, new dynamic window, persistent intact.
    let second_menu = h.player.current_menu().await.unwrap();
    assert_eq!(second_menu.id(), first_menu.id());
    assert_eq!(name_at(&h.player, 0).await.as_deref(), Some("p-5"));
    assert_eq!(name_at(&h.player, 2).await.as_deref(), Some("p-7"));
    assert!(second_menu.get_stack(3).await.is_none());
    assert_eq!(name_at(&h.player, 26).await.as_deref(), Some("menu-root"));
}

#[tokio::test]
async fn missing_player_record_aborts_paginated_render() {
    let h = harness_without_record();
    let layout = page_layout(2, "1-10", 10);
    let items = vec![item("i-0", None)];

    let err = h
        .creator
        .paginated(&h.actor, &layout, &[], &items, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, GuiError::MissingPlayerRecord(_)));
    assert!(h.player.current_menu().await.is_none());
}

#[tokio::test]
async fn simple_renders_and_registers_clicks() {
    let h = harness();
    let log = Arc::new(Mutex::new(Vec::new()));
    let items = vec![
        ItemConfigBuilder::from(ItemKind::EMERALD)
            .set_name("buy")
            .set_slot_range("10-12,19")
            .set_clickable(true)
            .set_action(Some(recording_action(&log, 7)))
            .build(),
    ];

    h.creator
        .simple(&h.actor, 3, 9, "Shop", None, items)
        .await
        .unwrap();

    let menu = h.player.current_menu().await.unwrap();
    for slot in [9usize, 10, 11, 18] {
        assert_eq!(name_at(&h.player, slot).await.as_deref(), Some("buy"));
    }
    let outcome = h.listener.handle_click(&h.actor, menu.id(), 18, &h.ctx).await;
    assert_eq!(outcome, ClickOutcome::Executed);
    assert_eq!(*log.lock().unwrap(), vec![7]);
}

#[tokio::test]
async fn invalid_dimensions_degrade_to_a_noop() {
    let h = harness();
    h.creator
        .simple(&h.actor, 0, 9, "Broken", None, Vec::new())
        .await
        .unwrap();
    assert!(h.player.current_menu().await.is_none());
    // Ops get told in-game.
    let messages = h.player.messages().await;
    assert_eq!(messages.len(), 1);
    assert!(messages[0].get_text().contains("Invalid dimensions"));
}

#[tokio::test]
async fn rapid_double_clicks_are_debounced() {
    let h = harness();
    // Dedicated listener with the production debounce window.
    let listener = GuiListener::with_click_delay(Duration::from_millis(200));
    let creator = prism_gui::GuiCreator::new(Arc::clone(&h.ctx), Arc::clone(&listener));

    let log = Arc::new(Mutex::new(Vec::new()));
    let items = vec![ItemConfigBuilder::from(ItemKind::EMERALD)
        .set_name("once")
        .set_slot_range("1")
        .set_clickable(true)
        .set_action(Some(recording_action(&log, 1)))
        .build()];
    creator
        .simple(&h.actor, 1, 9, "Debounce", None, items)
        .await
        .unwrap();

    let menu = h.player.current_menu().await.unwrap();
    let first = listener.handle_click(&h.actor, menu.id(), 0, &h.ctx).await;
    let second = listener.handle_click(&h.actor, menu.id(), 0, &h.ctx).await;
    assert_eq!(first, ClickOutcome::Executed);
    assert_eq!(second, ClickOutcome::Cancelled);
    assert_eq!(*log.lock().unwrap(), vec![1]);
}

#[tokio::test]
async fn closing_forgets_registrations() {
    let h = harness();
    let log = Arc::new(Mutex::new(Vec::new()));
    let items = vec![ItemConfigBuilder::from(ItemKind::EMERALD)
        .set_name("gone")
        .set_slot_range("1")
        .set_clickable(true)
        .set_action(Some(recording_action(&log, 1)))
        .build()];
    h.creator
        .simple(&h.actor, 1, 9, "Close", None, items)
        .await
        .unwrap();

    let menu = h.player.current_menu().await.unwrap();
    h.player.close_menu().await;
    h.creator.handle_close(h.player.uuid(), menu.id());

    let outcome = h.listener.handle_click(&h.actor, menu.id(), 0, &h.ctx).await;
    assert_eq!(outcome, ClickOutcome::Passthrough);
    assert!(log.lock().unwrap().is_empty());
    assert!(h.creator.current_inventory(h.player.uuid()).is_none());
}
