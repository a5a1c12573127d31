//! Action chain composition and the built-in button effects.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use common::harness;
use prism_gui::{ActionChain, ButtonAction, GuiError, GuiId};
use prism_host::{ItemKind, ItemStack, PlayerHandle};

#[tokio::test]
async fn steps_run_in_order_and_thread_the_value() {
    let h = harness();
    let log: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

    let log_f = Arc::clone(&log);
    let log_g = Arc::clone(&log);
    let log_h = Arc::clone(&log);
    let chain = ActionChain::chain(Arc::clone(&h.ctx), move |_actor| {
        let log = Arc::clone(&log_f);
        async move {
            log.lock().unwrap().push("f".to_string());
            "seed".to_string()
        }
    })
    .then_run(move |_actor, value: &String| {
        // The side effect sees the initial step's value, untouched.
        log_g.lock().unwrap().push(format!("g:{value}"));
    })
    .then_bi(move |_actor, value: String| {
        log_h.lock().unwrap().push("h".to_string());
        value.len()
    });

    let result = chain.chain_execute(&h.actor).await;
    assert_eq!(result, 4);
    assert_eq!(
        *log.lock().unwrap(),
        vec!["f".to_string(), "g:seed".to_string(), "h".to_string()]
    );
}

#[tokio::test]
async fn nothing_runs_until_a_terminal_call() {
    let h = harness();
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&calls);
    let chain = ActionChain::chain(Arc::clone(&h.ctx), move |_actor| {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            1u32
        }
    })
    .then_bi(|_actor, value| value + 1);

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(chain.chain_execute(&h.actor).await, 2);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    // Each execution drives the whole pipeline again.
    assert_eq!(chain.chain_execute(&h.actor).await, 2);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn waits_pass_the_value_through() {
    let h = harness();
    let chain = ActionChain::chain(Arc::clone(&h.ctx), |_actor| async { 7u64 }).then_wait(10);
    assert_eq!(chain.chain_execute(&h.actor).await, 7);
}

#[tokio::test]
async fn background_steps_join_before_continuing() {
    let h = harness();
    let order: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));

    let order_bg = Arc::clone(&order);
    let order_after = Arc::clone(&order);
    let chain = ActionChain::chain(Arc::clone(&h.ctx), |_actor| async { 3u32 })
        .then_bi_async(move |_actor, value| {
            order_bg.lock().unwrap().push("background");
            value * 2
        })
        .then_run(move |_actor, _value| {
            order_after.lock().unwrap().push("after");
        });

    assert_eq!(chain.chain_execute(&h.actor).await, 6);
    assert_eq!(*order.lock().unwrap(), vec!["background", "after"]);
}

#[tokio::test]
async fn finally_run_delivers_the_final_value() {
    let h = harness();
    let seen = Arc::new(Mutex::new(None));

    let seen_sink = Arc::clone(&seen);
    let completion = ActionChain::chain(Arc::clone(&h.ctx), |_actor| async { 21u32 })
        .then_bi(|_actor, value| value * 2)
        .finally_run(&h.actor, move |_actor, value| {
            *seen_sink.lock().unwrap() = Some(value);
        });
    completion.await;
    assert_eq!(*seen.lock().unwrap(), Some(42));
}

#[tokio::test]
async fn chains_bind_to_slots_through_into_action() {
    let h = harness();
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&calls);
    let action: ButtonAction = ActionChain::chain(Arc::clone(&h.ctx), move |_actor| {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    })
    .into_action();

    action.execute(&h.actor, &h.ctx).await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn give_item_reaches_the_player() {
    let h = harness();
    let action = ButtonAction::of_give_item(ItemStack::new(ItemKind::DIAMOND), false);
    action.execute(&h.actor, &h.ctx).await;
    let received = h.player.received_items().await;
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].kind, ItemKind::DIAMOND);
}

#[tokio::test]
async fn run_command_substitutes_the_player_name() {
    let h = harness();
    let action = ButtonAction::of_run_command("give %player% diamond 1", false);
    action.execute(&h.actor, &h.ctx).await;
    assert_eq!(h.dispatcher.commands(), vec!["give Steve diamond 1".to_string()]);
}

#[tokio::test]
async fn opening_an_unknown_gui_is_a_logged_noop() {
    let h = harness();
    let action = ButtonAction::of_open_gui("does/not-exist", false);
    // Must not panic or error out of the click path.
    action.execute(&h.actor, &h.ctx).await;
    assert!(h.player.current_menu().await.is_none());
}

#[tokio::test]
async fn registry_rejects_unknown_ids() {
    let h = harness();
    let err = h
        .ctx
        .registry()
        .create(&GuiId::new("missing"), &h.ctx)
        .await
        .unwrap_err();
    assert!(matches!(err, GuiError::UnknownGui(_)));
}

#[tokio::test]
async fn close_gui_closes_on_the_main_loop() {
    let h = harness();
    // Put a menu up first.
    h.creator
        .simple(&h.actor, 1, 9, "Temp", None, Vec::new())
        .await
        .unwrap();
    assert!(h.player.current_menu().await.is_some());

    ButtonAction::of_close_gui().execute(&h.actor, &h.ctx).await;
    assert!(h.player.current_menu().await.is_none());
}

#[tokio::test]
async fn action_json_rejects_code_actions() {
    let json = serde_json::json!({"type": "run_code", "data": "whatever"});
    assert!(matches!(
        ButtonAction::from_json(&json),
        Err(GuiError::BadDefinition(_))
    ));

    let json = serde_json::json!({"type": "open_gui", "data": "shop/main", "close_gui": true});
    let action = ButtonAction::from_json(&json).unwrap();
    assert!(matches!(action, ButtonAction::OpenGui { .. }));
}
