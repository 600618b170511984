//! Audio Manager - binds the browser `<audio>` element to the player core.
//! DOM listeners only forward notifications; every state change goes through
//! the controller, deferred so a handler never re-borrows the signal that
//! triggered it.

use dioxus::prelude::*;
use std::rc::Rc;

use crate::error::{PlayerError, PlayerResult};
use crate::player::{MediaElement, MediaEvent, PlayAttempt, PlayerController, ReadyToken};

#[cfg(target_arch = "wasm32")]
use crate::player::shortcut_from_key;
#[cfg(target_arch = "wasm32")]
use dioxus::core::{Runtime, RuntimeGuard};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};
#[cfg(target_arch = "wasm32")]
use web_sys::{window, AddEventListenerOptions, HtmlAudioElement, KeyboardEvent, Node};

/// Receives media notifications from the browser adapter.
pub type MediaEventSink = Rc<dyn Fn(MediaEvent)>;

/// The controller as shared through context.
pub type SharedController = Signal<PlayerController<WebMedia>>;

/// Id of the element wrapping the topic header and list.
pub const TOPIC_SELECTOR_ID: &str = "topic-selector";

/// Find the audio element by id, creating a hidden one if the page has none.
#[cfg(target_arch = "wasm32")]
pub fn get_or_create_audio_element(id: &str) -> Option<HtmlAudioElement> {
    let document = window()?.document()?;

    if let Some(existing) = document.get_element_by_id(id) {
        return existing.dyn_into::<HtmlAudioElement>().ok();
    }

    let audio: HtmlAudioElement = document.create_element("audio").ok()?.dyn_into().ok()?;
    audio.set_id(id);
    audio.set_attribute("preload", "metadata").ok()?;
    document.body()?.append_child(&audio).ok()?;

    Some(audio)
}

/// [`MediaElement`] backed by an `HtmlAudioElement`.
#[cfg(target_arch = "wasm32")]
#[derive(Default)]
pub struct WebMedia {
    audio: Option<HtmlAudioElement>,
    sink: Option<MediaEventSink>,
    ready_listener: Option<(ReadyToken, Closure<dyn FnMut()>)>,
}

/// Off the browser there is no element; commands are dropped.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Default)]
pub struct WebMedia;

#[cfg(target_arch = "wasm32")]
impl WebMedia {
    /// Bind to the page's audio element and forward its notifications to `sink`.
    pub fn attach(&mut self, element_id: &str, sink: MediaEventSink) -> PlayerResult<()> {
        self.sink = Some(sink.clone());
        let Some(audio) = get_or_create_audio_element(element_id) else {
            return Err(PlayerError::MissingElement(element_id.to_string()));
        };

        let time_sink = sink.clone();
        let time_audio = audio.clone();
        let time_closure = Closure::wrap(Box::new(move || {
            time_sink(MediaEvent::TimeUpdate(time_audio.current_time()));
        }) as Box<dyn FnMut()>);
        audio.set_ontimeupdate(Some(time_closure.as_ref().unchecked_ref()));
        time_closure.forget();

        let meta_sink = sink.clone();
        let meta_audio = audio.clone();
        let meta_closure = Closure::wrap(Box::new(move || {
            meta_sink(MediaEvent::MetadataLoaded(meta_audio.duration()));
        }) as Box<dyn FnMut()>);
        audio.set_onloadedmetadata(Some(meta_closure.as_ref().unchecked_ref()));
        meta_closure.forget();

        let end_sink = sink.clone();
        let end_closure = Closure::wrap(Box::new(move || {
            end_sink(MediaEvent::Ended);
        }) as Box<dyn FnMut()>);
        audio.set_onended(Some(end_closure.as_ref().unchecked_ref()));
        end_closure.forget();

        for (name, event) in [("pause", MediaEvent::Paused), ("playing", MediaEvent::Playing)] {
            let state_sink = sink.clone();
            let state_closure = Closure::wrap(Box::new(move || {
                state_sink(event.clone());
            }) as Box<dyn FnMut()>);
            if let Err(err) = audio
                .add_event_listener_with_callback(name, state_closure.as_ref().unchecked_ref())
            {
                tracing::warn!("failed to register media {name} listener: {err:?}");
            }
            state_closure.forget();
        }

        let error_sink = sink.clone();
        let error_audio = audio.clone();
        let error_closure = Closure::wrap(Box::new(move || {
            let code = error_audio.error().map(|e| e.code()).unwrap_or(0);
            error_sink(MediaEvent::Error(code));
        }) as Box<dyn FnMut()>);
        if let Err(err) = audio
            .add_event_listener_with_callback("error", error_closure.as_ref().unchecked_ref())
        {
            tracing::warn!("failed to register media error listener: {err:?}");
        }
        error_closure.forget();

        self.audio = Some(audio);
        Ok(())
    }

    fn emit(&self, event: MediaEvent) {
        if let Some(sink) = self.sink.as_ref() {
            sink(event);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl WebMedia {
    pub fn attach(&mut self, element_id: &str, _sink: MediaEventSink) -> PlayerResult<()> {
        Err(PlayerError::MissingElement(element_id.to_string()))
    }
}

#[cfg(target_arch = "wasm32")]
impl MediaElement for WebMedia {
    fn play(&mut self, attempt: PlayAttempt) {
        let Some(audio) = self.audio.as_ref() else {
            self.emit(MediaEvent::PlayRejected {
                attempt,
                reason: "no audio element".to_string(),
            });
            return;
        };
        match audio.play() {
            Ok(promise) => {
                let sink = self.sink.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(err) = wasm_bindgen_futures::JsFuture::from(promise).await {
                        if let Some(sink) = sink {
                            sink(MediaEvent::PlayRejected {
                                attempt,
                                reason: format!("{err:?}"),
                            });
                        }
                    }
                });
            }
            Err(err) => self.emit(MediaEvent::PlayRejected {
                attempt,
                reason: format!("{err:?}"),
            }),
        }
    }

    fn pause(&mut self) {
        if let Some(audio) = self.audio.as_ref() {
            let _ = audio.pause();
        }
    }

    fn load(&mut self) {
        if let Some(audio) = self.audio.as_ref() {
            audio.load();
        }
    }

    fn set_source(&mut self, url: &str) {
        if let Some(audio) = self.audio.as_ref() {
            audio.set_src(url);
        }
    }

    fn set_current_time(&mut self, seconds: f64) {
        if let Some(audio) = self.audio.as_ref() {
            audio.set_current_time(seconds);
        }
    }

    fn arm_ready(&mut self, token: ReadyToken) {
        // At most one listener is ever registered.
        if let Some(previous) = self.ready_listener.as_ref().map(|(armed, _)| *armed) {
            self.revoke_ready(previous);
        }
        let (Some(audio), Some(sink)) = (self.audio.as_ref(), self.sink.clone()) else {
            return;
        };

        let closure = Closure::wrap(Box::new(move || {
            sink(MediaEvent::Ready(token));
        }) as Box<dyn FnMut()>);
        let options = AddEventListenerOptions::new();
        options.set_once(true);
        if let Err(err) = audio.add_event_listener_with_callback_and_add_event_listener_options(
            "canplaythrough",
            closure.as_ref().unchecked_ref(),
            &options,
        ) {
            tracing::warn!("failed to register ready listener: {err:?}");
            return;
        }
        self.ready_listener = Some((token, closure));
    }

    fn revoke_ready(&mut self, token: ReadyToken) {
        let matches = self
            .ready_listener
            .as_ref()
            .map(|(armed, _)| *armed == token)
            .unwrap_or(false);
        if !matches {
            return;
        }
        if let Some((_, closure)) = self.ready_listener.take() {
            if let Some(audio) = self.audio.as_ref() {
                let _ = audio.remove_event_listener_with_callback(
                    "canplaythrough",
                    closure.as_ref().unchecked_ref(),
                );
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl MediaElement for WebMedia {
    fn play(&mut self, attempt: PlayAttempt) {
        tracing::debug!(?attempt, "play dropped, no browser audio element");
    }

    fn pause(&mut self) {}

    fn load(&mut self) {}

    fn set_source(&mut self, _url: &str) {}

    fn set_current_time(&mut self, _seconds: f64) {}

    fn arm_ready(&mut self, _token: ReadyToken) {}

    fn revoke_ready(&mut self, _token: ReadyToken) {}
}

/// Build the sink that feeds media notifications back into `controller`.
#[cfg(target_arch = "wasm32")]
pub fn controller_sink(controller: SharedController) -> MediaEventSink {
    let runtime = Runtime::current();
    Rc::new(move |event: MediaEvent| {
        let runtime = runtime.clone();
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(0).await;
            let _guard = RuntimeGuard::new(runtime);
            let mut controller = controller;
            controller.write().handle_media_event(event);
        });
    })
}

#[cfg(not(target_arch = "wasm32"))]
pub fn controller_sink(_controller: SharedController) -> MediaEventSink {
    Rc::new(move |event: MediaEvent| {
        tracing::debug!(?event, "media event without a browser");
    })
}

#[cfg(target_arch = "wasm32")]
fn is_editable_shortcut_target(event: &KeyboardEvent) -> bool {
    let Some(target) = event.target() else {
        return false;
    };

    let mut current = target.dyn_into::<web_sys::Element>().ok();
    while let Some(element) = current {
        let tag = element.tag_name().to_ascii_lowercase();
        if tag == "input" || tag == "textarea" || tag == "select" {
            return true;
        }
        if element.has_attribute("contenteditable")
            && element
                .get_attribute("contenteditable")
                .map(|v| v.to_ascii_lowercase() != "false")
                .unwrap_or(true)
        {
            return true;
        }
        current = element.parent_element();
    }

    false
}

/// Document-level listeners: outside clicks close the topic list, and
/// play/pause keys toggle playback.
#[cfg(target_arch = "wasm32")]
pub fn install_document_listeners(controller: SharedController, keyboard_shortcuts: bool) {
    let Some(doc) = window().and_then(|w| w.document()) else {
        return;
    };
    let runtime = Runtime::current();

    let click_runtime = runtime.clone();
    let mut click_controller = controller;
    let click_cb = Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
        let _guard = RuntimeGuard::new(click_runtime.clone());
        let inside = match (
            window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id(TOPIC_SELECTOR_ID)),
            e.target().and_then(|t| t.dyn_into::<Node>().ok()),
        ) {
            (Some(selector), Some(target)) => selector.contains(Some(&target)),
            _ => false,
        };
        if click_controller.peek().view().dropdown_open {
            click_controller.write().on_document_click(inside);
        }
    }) as Box<dyn FnMut(_)>);
    let _ = doc.add_event_listener_with_callback("click", click_cb.as_ref().unchecked_ref());
    click_cb.forget();

    if !keyboard_shortcuts {
        return;
    }

    let key_runtime = runtime;
    let mut key_controller = controller;
    let key_cb = Closure::wrap(Box::new(move |event: KeyboardEvent| {
        if event.default_prevented() || event.is_composing() || is_editable_shortcut_target(&event)
        {
            return;
        }
        let modified = event.meta_key() || event.ctrl_key() || event.alt_key();
        if let Some(shortcut) = shortcut_from_key(&event.key(), &event.code(), modified) {
            event.prevent_default();
            let _guard = RuntimeGuard::new(key_runtime.clone());
            key_controller.write().handle_shortcut(shortcut);
        }
    }) as Box<dyn FnMut(KeyboardEvent)>);
    let _ = doc.add_event_listener_with_callback("keydown", key_cb.as_ref().unchecked_ref());
    key_cb.forget();
}

#[cfg(not(target_arch = "wasm32"))]
pub fn install_document_listeners(_controller: SharedController, _keyboard_shortcuts: bool) {}
