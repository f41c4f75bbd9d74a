//! Bridge component between the Leptos UI and the imperative tabletop engine.
//!
//! ARCHITECTURE
//! ============
//! The tabletop crate owns all camera/gesture/sync/render logic; this host
//! maps DOM events into engine calls, runs the per-frame render loop, and
//! shuttles protocol messages to the socket task. Input handlers never
//! paint: the continuous `requestAnimationFrame` loop reads the engine
//! fresh every frame, so any mutation (local or network-driven) is visible
//! within one frame.
//!
//! `pointerdown` and `wheel` attach to the canvas; `pointermove` and
//! `pointerup` attach to the window so a drag survives the pointer leaving
//! the canvas mid-gesture. The frame loop and every listener are detached
//! as a unit in `on_cleanup`.

use leptos::prelude::*;

#[cfg(feature = "csr")]
use std::cell::{Cell, RefCell};
#[cfg(feature = "csr")]
use std::rc::Rc;

#[cfg(feature = "csr")]
use wasm_bindgen::JsCast;
#[cfg(feature = "csr")]
use wasm_bindgen::closure::Closure;

#[cfg(feature = "csr")]
use tabletop::engine::Engine;

#[cfg(feature = "csr")]
use crate::net::socket::{self, EngineHandle, FrameSender};
use crate::state::session::{ConnectionStatus, SessionState};
#[cfg(feature = "csr")]
use crate::util::input::{map_button, pointer_point, wheel_delta, wheel_point, window_pointer_point};
#[cfg(feature = "csr")]
use crate::util::viewport::{apply_cursor, sync_viewport};

#[cfg(feature = "csr")]
type PointerClosure = Closure<dyn FnMut(web_sys::PointerEvent)>;

/// Drain the engine's outbound queue and hand each message to the socket
/// task exactly once.
#[cfg(feature = "csr")]
fn flush_outbound(engine: &EngineHandle, sender: &Rc<RefCell<Option<FrameSender>>>) {
    let messages = match engine.borrow_mut().as_mut() {
        Some(engine) => engine.take_outbound(),
        None => return,
    };
    if messages.is_empty() {
        return;
    }
    if let Some(tx) = sender.borrow().as_ref() {
        socket::send_outbound(tx, messages);
    }
}

/// Attach `pointermove` / `pointerup` at window scope.
///
/// The closures are stored alongside their event names so `on_cleanup` can
/// detach them; positions are recovered from client coordinates because
/// the events may fire over arbitrary elements.
#[cfg(feature = "csr")]
fn attach_window_listeners(
    engine: &EngineHandle,
    sender: &Rc<RefCell<Option<FrameSender>>>,
    canvas_ref: &NodeRef<leptos::html::Canvas>,
    listeners: &Rc<RefCell<Vec<(&'static str, PointerClosure)>>>,
) {
    let Some(window) = web_sys::window() else {
        return;
    };

    let move_cb: PointerClosure = {
        let engine = Rc::clone(engine);
        let sender = Rc::clone(sender);
        let canvas_ref = canvas_ref.clone();
        Closure::wrap(Box::new(move |ev: web_sys::PointerEvent| {
            let Some(canvas) = canvas_ref.get_untracked() else {
                return;
            };
            if let Some(engine) = engine.borrow_mut().as_mut() {
                engine.on_pointer_move(window_pointer_point(&ev, &canvas));
            }
            flush_outbound(&engine, &sender);
        }) as Box<dyn FnMut(web_sys::PointerEvent)>)
    };

    let up_cb: PointerClosure = {
        let engine = Rc::clone(engine);
        let sender = Rc::clone(sender);
        Closure::wrap(Box::new(move |_ev: web_sys::PointerEvent| {
            if let Some(engine) = engine.borrow_mut().as_mut() {
                engine.on_pointer_up();
            }
            flush_outbound(&engine, &sender);
        }) as Box<dyn FnMut(web_sys::PointerEvent)>)
    };

    for (name, cb) in [("pointermove", move_cb), ("pointerup", up_cb)] {
        let _ = window.add_event_listener_with_callback(name, cb.as_ref().unchecked_ref());
        listeners.borrow_mut().push((name, cb));
    }
}

/// Start the continuous render loop.
///
/// Each tick re-reads the container dimensions, paints the scene, and
/// reflects the gesture cursor, then schedules the next frame. Dropping
/// the stored closure (see `on_cleanup`) stops the rescheduling.
#[cfg(feature = "csr")]
fn start_render_loop(
    engine: &EngineHandle,
    canvas_ref: &NodeRef<leptos::html::Canvas>,
    raf_id: &Rc<Cell<Option<i32>>>,
    raf_closure: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
) {
    let Some(window) = web_sys::window() else {
        return;
    };

    let tick: Closure<dyn FnMut()> = {
        let engine = Rc::clone(engine);
        let canvas_ref = canvas_ref.clone();
        let raf_id = Rc::clone(raf_id);
        let raf_closure = Rc::clone(raf_closure);
        let window_for_tick = window.clone();
        Closure::wrap(Box::new(move || {
            if let Some(engine) = engine.borrow_mut().as_mut() {
                sync_viewport(engine, &canvas_ref);
                if let Err(e) = engine.render() {
                    leptos::logging::warn!("render failed: {e:?}");
                }
                apply_cursor(engine, &canvas_ref);
            }
            if let Some(cb) = raf_closure.borrow().as_ref() {
                if let Ok(id) = window_for_tick.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    raf_id.set(Some(id));
                }
            }
        }) as Box<dyn FnMut()>)
    };

    *raf_closure.borrow_mut() = Some(tick);
    if let Some(cb) = raf_closure.borrow().as_ref() {
        if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            raf_id.set(Some(id));
        }
    }
}

/// Viewport host component.
///
/// On mount this creates the engine on the canvas element, spawns the
/// socket client, wires input events, and runs the render loop until the
/// component is torn down.
#[component]
pub fn TableViewport() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

    #[cfg(feature = "csr")]
    let engine: EngineHandle = Rc::new(RefCell::new(None));
    #[cfg(feature = "csr")]
    let sender: Rc<RefCell<Option<FrameSender>>> = Rc::new(RefCell::new(None));
    #[cfg(feature = "csr")]
    let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    #[cfg(feature = "csr")]
    let raf_closure: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    #[cfg(feature = "csr")]
    let window_listeners: Rc<RefCell<Vec<(&'static str, PointerClosure)>>> = Rc::new(RefCell::new(Vec::new()));

    #[cfg(feature = "csr")]
    {
        let engine = Rc::clone(&engine);
        let sender = Rc::clone(&sender);
        let raf_id = Rc::clone(&raf_id);
        let raf_closure = Rc::clone(&raf_closure);
        let window_listeners = Rc::clone(&window_listeners);
        let canvas_ref_mount = canvas_ref.clone();
        Effect::new(move || {
            let Some(canvas) = canvas_ref_mount.get() else {
                return;
            };
            if engine.borrow().is_some() {
                return;
            }

            let mut instance = Engine::new(canvas);
            sync_viewport(&mut instance, &canvas_ref_mount);
            *engine.borrow_mut() = Some(instance);

            *sender.borrow_mut() = Some(socket::spawn_socket_client(Rc::clone(&engine), session));

            attach_window_listeners(&engine, &sender, &canvas_ref_mount, &window_listeners);
            start_render_loop(&engine, &canvas_ref_mount, &raf_id, &raf_closure);
        });
    }

    #[cfg(feature = "csr")]
    {
        let engine = Rc::clone(&engine);
        let sender = Rc::clone(&sender);
        let raf_id = Rc::clone(&raf_id);
        let raf_closure = Rc::clone(&raf_closure);
        let window_listeners = Rc::clone(&window_listeners);
        on_cleanup(move || {
            if let Some(window) = web_sys::window() {
                if let Some(id) = raf_id.take() {
                    let _ = window.cancel_animation_frame(id);
                }
                for (name, cb) in window_listeners.borrow_mut().drain(..) {
                    let _ = window.remove_event_listener_with_callback(name, cb.as_ref().unchecked_ref());
                }
            }
            raf_closure.borrow_mut().take();
            sender.borrow_mut().take();
            engine.borrow_mut().take();
        });
    }

    let on_pointer_down = {
        #[cfg(feature = "csr")]
        {
            let engine = Rc::clone(&engine);
            let sender = Rc::clone(&sender);
            move |ev: leptos::ev::PointerEvent| {
                ev.prevent_default();
                if let Some(engine) = engine.borrow_mut().as_mut() {
                    engine.on_pointer_down(pointer_point(&ev), map_button(ev.button()));
                }
                flush_outbound(&engine, &sender);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_wheel = {
        #[cfg(feature = "csr")]
        {
            let engine = Rc::clone(&engine);
            move |ev: leptos::ev::WheelEvent| {
                ev.prevent_default();
                if let Some(engine) = engine.borrow_mut().as_mut() {
                    engine.on_wheel(wheel_point(&ev), wheel_delta(&ev));
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::WheelEvent| {}
        }
    };

    view! {
        <div class="table-viewport">
            <canvas
                node_ref=canvas_ref
                class="table-canvas"
                on:pointerdown=on_pointer_down
                on:wheel=on_wheel
                // Right-button pans; the platform context menu stays closed
                // over the table.
                on:contextmenu=move |ev| {
                    ev.prevent_default();
                }
            >
                "Your browser does not support canvas."
            </canvas>
            <Show when=move || session.get().connection_status != ConnectionStatus::Connected>
                <div class="connection-status">
                    {move || session.get().connection_status.label()}
                </div>
            </Show>
        </div>
    }
}
