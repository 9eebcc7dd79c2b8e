//! Browser entry point.
//!
//! Expects a `#canvas-container` element (a canvas is appended to it) or a
//! `#scene-canvas` canvas, plus optional `#music-toggle` and
//! `#sound-toggle` buttons. Buttons, social icons and project cards get
//! hover blips.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlCanvasElement, HtmlElement, KeyboardEvent, Window,
};

use crate::controls::{hover_selector, ToggleButton};
use crate::engine::RetrowaveEngine;
use crate::error::RetrowaveError;
use crate::input::InputEvent;
use crate::options::Options;

type SharedEngine = Rc<RefCell<RetrowaveEngine>>;

fn web_error(what: &str, e: impl std::fmt::Debug) -> RetrowaveError {
    RetrowaveError::Web(format!("{what}: {e:?}"))
}

/// Module start: install logging and the panic hook, then run the scene
/// with default options.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    wasm_bindgen_futures::spawn_local(async {
        if let Err(e) = run(Options::default()).await {
            log::error!("{e}");
        }
    });
    Ok(())
}

/// Physical canvas size for the window, with the pixel ratio capped.
fn physical_size(window: &Window, max_pixel_ratio: f64) -> (u32, u32) {
    let ratio = window.device_pixel_ratio().min(max_pixel_ratio).max(1.0);
    let css = |v: Result<JsValue, JsValue>| {
        v.ok().as_ref().and_then(JsValue::as_f64).unwrap_or(1.0)
    };
    let width = css(window.inner_width()) * ratio;
    let height = css(window.inner_height()) * ratio;
    ((width as u32).max(1), (height as u32).max(1))
}

fn find_canvas(
    document: &Document,
) -> Result<HtmlCanvasElement, RetrowaveError> {
    if let Some(canvas) = document.get_element_by_id("scene-canvas") {
        return canvas
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|e| web_error("#scene-canvas is not a canvas", e));
    }
    let container = document
        .get_element_by_id("canvas-container")
        .ok_or_else(|| {
            RetrowaveError::Web("missing #canvas-container".into())
        })?;
    let canvas = document
        .create_element("canvas")
        .map_err(|e| web_error("create canvas", e))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|e| web_error("create canvas", e))?;
    let _ = container
        .append_child(&canvas)
        .map_err(|e| web_error("append canvas", e))?;
    Ok(canvas)
}

fn listen<E: FromWasmAbi + 'static>(
    target: &web_sys::EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) -> Result<(), RetrowaveError> {
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    target
        .add_event_listener_with_callback(
            event,
            closure.as_ref().unchecked_ref(),
        )
        .map_err(|e| web_error(event, e))?;
    closure.forget();
    Ok(())
}

/// Reflect a toggle's state on its button.
fn sync_button(element: &Element, button: &ToggleButton) {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        html.set_inner_text(&button.text());
    }
    let classes = element.class_list();
    let result = if button.css_class().is_some() {
        classes.add_1("off")
    } else {
        classes.remove_1("off")
    };
    if let Err(e) = result {
        log::warn!("toggle class: {e:?}");
    }
}

/// The page's optional toggle buttons.
#[derive(Clone)]
struct ToggleElements {
    music: Option<Element>,
    sound: Option<Element>,
}

impl ToggleElements {
    fn find(document: &Document) -> Self {
        let find = |id: &str| {
            let element = document.get_element_by_id(id);
            if element.is_none() {
                log::debug!("no #{id}, toggle not wired");
            }
            element
        };
        Self {
            music: find("music-toggle"),
            sound: find("sound-toggle"),
        }
    }

    /// Reflect both toggle states, however they were changed.
    fn sync(&self, engine: &RetrowaveEngine) {
        let controls = engine.controls();
        if let Some(element) = &self.music {
            sync_button(element, &controls.music);
        }
        if let Some(element) = &self.sound {
            sync_button(element, &controls.sound);
        }
    }

    fn wire(&self, engine: &SharedEngine) -> Result<(), RetrowaveError> {
        self.sync(&engine.borrow());
        let flips: [(&Option<Element>, fn(&mut RetrowaveEngine) -> bool); 2] = [
            (&self.music, RetrowaveEngine::toggle_music),
            (&self.sound, RetrowaveEngine::toggle_sound),
        ];
        for (element, flip) in flips {
            let Some(element) = element else {
                continue;
            };
            let engine = engine.clone();
            let buttons = self.clone();
            listen(element, "click", move |_: web_sys::Event| {
                let mut engine = engine.borrow_mut();
                let _ = flip(&mut engine);
                buttons.sync(&engine);
            })?;
        }
        Ok(())
    }
}

fn wire_hover_sounds(
    document: &Document,
    engine: &SharedEngine,
) -> Result<(), RetrowaveError> {
    let selector = hover_selector();
    let targets = document
        .query_selector_all(&selector)
        .map_err(|e| web_error(&selector, e))?;
    for i in 0..targets.length() {
        let Some(node) = targets.item(i) else {
            continue;
        };
        let hover = engine.clone();
        listen(&node, "mouseenter", move |_: web_sys::Event| {
            hover.borrow_mut().play_hover(None);
        })?;
        let click = engine.clone();
        listen(&node, "click", move |_: web_sys::Event| {
            click.borrow_mut().play_hover(Some(0.5));
        })?;
    }
    Ok(())
}

fn start_frame_loop(
    window: &Window,
    engine: SharedEngine,
) -> Result<(), RetrowaveError> {
    let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> =
        Rc::new(RefCell::new(None));
    let next = frame.clone();
    let scheduler = window.clone();
    *frame.borrow_mut() = Some(Closure::new(move || {
        {
            let mut engine = engine.borrow_mut();
            if engine.update() {
                if let Err(e) = engine.render() {
                    log::error!("render error: {e:?}");
                }
            }
        }
        if let Some(callback) = next.borrow().as_ref() {
            let scheduled = scheduler
                .request_animation_frame(callback.as_ref().unchecked_ref());
            if let Err(e) = scheduled {
                log::error!("requestAnimationFrame: {e:?}");
            }
        }
    }));
    let borrowed = frame.borrow();
    let callback = borrowed
        .as_ref()
        .ok_or_else(|| RetrowaveError::Web("frame callback missing".into()))?;
    let _ = window
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .map_err(|e| web_error("requestAnimationFrame", e))?;
    Ok(())
}

/// Build the engine on the page's canvas and start the frame loop.
///
/// # Errors
///
/// Returns [`RetrowaveError`] if the page is missing the canvas host or
/// GPU initialization fails.
pub async fn run(options: Options) -> Result<(), RetrowaveError> {
    let window = web_sys::window()
        .ok_or_else(|| RetrowaveError::Web("no window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| RetrowaveError::Web("no document".into()))?;
    let canvas = find_canvas(&document)?;

    let max_ratio = options.camera.max_pixel_ratio;
    let (width, height) = physical_size(&window, max_ratio);
    canvas.set_width(width);
    canvas.set_height(height);

    let engine = RetrowaveEngine::new(
        wgpu::SurfaceTarget::Canvas(canvas.clone()),
        (width, height),
        window.device_pixel_ratio(),
        options,
    )
    .await?;
    let engine: SharedEngine = Rc::new(RefCell::new(engine));

    {
        let engine = engine.clone();
        let resize_window = window.clone();
        listen(&window, "resize", move |_: web_sys::Event| {
            let (width, height) = physical_size(&resize_window, max_ratio);
            canvas.set_width(width);
            canvas.set_height(height);
            engine.borrow_mut().resize(width, height);
        })?;
    }
    {
        let engine = engine.clone();
        listen(&window, "click", move |_: web_sys::Event| {
            let _ = engine
                .borrow_mut()
                .handle_input(&InputEvent::PointerPressed);
        })?;
    }
    let toggles = ToggleElements::find(&document);
    toggles.wire(&engine)?;
    {
        let engine = engine.clone();
        listen(&window, "keydown", move |event: KeyboardEvent| {
            let mut engine = engine.borrow_mut();
            let _ = engine.handle_input(&InputEvent::KeyPressed {
                code: event.code(),
            });
            toggles.sync(&engine);
        })?;
    }
    wire_hover_sounds(&document, &engine)?;

    start_frame_loop(&window, engine)?;
    log::info!("retrowave running");
    Ok(())
}
