use crate::shared::icons::icon;
use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;
use wasm_bindgen_futures::spawn_local;

/// Modal overlay with a titled surface.
///
/// The host decides whether closing is allowed: `on_close` is called for
/// the close button, Escape and an overlay click, and is skipped while
/// `busy` is true.
#[component]
pub fn ModalFrame(
    #[prop(into)] title: Signal<String>,
    on_close: Callback<()>,
    /// Blocks every close path (a request is in flight).
    #[prop(into, optional)]
    busy: Signal<bool>,
    /// Extra class for the modal surface (`div.modal`).
    #[prop(optional)]
    modal_class: Option<&'static str>,
    children: Children,
) -> impl IntoView {
    let overlay_mouse_down = RwSignal::new(false);

    let request_close = move || {
        if !busy.get_untracked() {
            on_close.run(());
        }
    };

    // Escape closes; the listener goes away with the modal.
    let keydown = StoredValue::new_local(Closure::<dyn FnMut(web_sys::Event)>::new(
        move |event: web_sys::Event| {
            if let Some(keyboard_event) = event.dyn_ref::<KeyboardEvent>() {
                if keyboard_event.key() == "Escape" {
                    request_close();
                }
            }
        },
    ));
    if let Some(window) = web_sys::window() {
        keydown.with_value(|closure| {
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        });
    }
    on_cleanup(move || {
        if let Some(window) = web_sys::window() {
            keydown.try_with_value(|closure| {
                let _ = window.remove_event_listener_with_callback(
                    "keydown",
                    closure.as_ref().unchecked_ref(),
                );
            });
        }
    });

    let is_direct_overlay_event = |ev: &ev::MouseEvent| -> bool {
        match (ev.target(), ev.current_target()) {
            (Some(t), Some(ct)) => t == ct,
            _ => false,
        }
    };

    // Close only if both press and release happened on the overlay itself,
    // so selecting text inside the modal never closes it.
    let handle_overlay_mouse_down = move |ev: ev::MouseEvent| {
        overlay_mouse_down.set(is_direct_overlay_event(&ev));
    };

    let handle_overlay_click = move |ev: ev::MouseEvent| {
        let should_close = overlay_mouse_down.get_untracked() && is_direct_overlay_event(&ev);
        overlay_mouse_down.set(false);
        if should_close {
            // Defer to the next tick: the overlay is removed during its own click dispatch.
            spawn_local(async move {
                TimeoutFuture::new(0).await;
                request_close();
            });
        }
    };

    let modal_class = match modal_class {
        Some(cls) => format!("modal {cls}"),
        None => "modal".to_string(),
    };

    view! {
        <div
            class="modal-overlay"
            on:mousedown=handle_overlay_mouse_down
            on:click=handle_overlay_click
        >
            <div class=modal_class on:click=|ev: ev::MouseEvent| ev.stop_propagation()>
                <div class="modal-header">
                    <h2 class="modal-title">{move || title.get()}</h2>
                    <button
                        class="button button--icon modal__close"
                        disabled=move || busy.get()
                        on:click=move |_| request_close()
                    >
                        {icon("x")}
                    </button>
                </div>
                <div class="modal-body">{children()}</div>
            </div>
        </div>
    }
}
