//! Browser glue: canvas setup, pointer listeners and the
//! `requestAnimationFrame`-driven tick/draw loop.
//!
//! All gameplay decisions live in [`session`]; this module only feeds the
//! session timestamps and canvas-space pointer coordinates and paints the
//! result. The loop stops rescheduling itself as soon as the session leaves
//! `Playing`, and a generation token cancels any already-scheduled frame after
//! a restart so stale callbacks cannot touch discarded state.

pub mod config;
pub mod rng;
pub mod session;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, window};

use config::{GameConfig, TrashKind};
use rng::SpawnRng;
use session::{GameSession, Phase, TrashObject};

struct EngineState {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    session: GameSession,
}

thread_local! {
    static ENGINE: std::cell::RefCell<Option<EngineState>> = const { std::cell::RefCell::new(None) };
    // Bumped whenever the animation loop must stop; a pending frame callback
    // compares its captured token and bails out if it has been superseded.
    static LOOP_TOKEN: std::cell::Cell<u64> = const { std::cell::Cell::new(0) };
}

/// Create (or reuse) the game canvas, install pointer listeners and paint the
/// ready screen. The run itself starts on the first click or tap.
pub fn mount(cfg: GameConfig) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id("td-canvas") {
        el.dyn_into()?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id("td-canvas");
        doc.body()
            .ok_or_else(|| JsValue::from_str("no body"))?
            .append_child(&c)?;
        c
    };
    canvas.set_width(cfg.width as u32);
    canvas.set_height(cfg.height as u32);
    canvas
        .set_attribute(
            "style",
            "display:block; margin:0 auto; border:4px solid #1f2937; border-radius:8px; cursor:crosshair; image-rendering:pixelated; touch-action:none;",
        )
        .ok();

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;
    // Keep the pixel art crisp.
    ctx.set_image_smoothing_enabled(false);

    let session = GameSession::new(cfg, SpawnRng::new(seed()));
    ENGINE.with(|cell| {
        cell.replace(Some(EngineState {
            canvas: canvas.clone(),
            ctx,
            session,
        }))
    });

    // Mouse input
    {
        let canvas_click = canvas.clone();
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            let rect = canvas_click.get_bounding_client_rect();
            on_pointer(
                &canvas_click,
                f64::from(evt.client_x()) - rect.left(),
                f64::from(evt.client_y()) - rect.top(),
                rect.width(),
                rect.height(),
            );
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    // Touch input
    {
        let canvas_touch = canvas.clone();
        let closure = Closure::wrap(Box::new(move |evt: web_sys::TouchEvent| {
            evt.prevent_default();
            let touch = evt
                .touches()
                .get(0)
                .or_else(|| evt.changed_touches().get(0));
            if let Some(touch) = touch {
                let rect = canvas_touch.get_bounding_client_rect();
                on_pointer(
                    &canvas_touch,
                    f64::from(touch.client_x()) - rect.left(),
                    f64::from(touch.client_y()) - rect.top(),
                    rect.width(),
                    rect.height(),
                );
            }
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    ENGINE.with(|cell| {
        if let Some(state) = cell.borrow_mut().as_mut() {
            render(state);
        }
    });
    Ok(())
}

/// Dispatch a pointer event. Coordinates arrive relative to the CSS box of the
/// canvas; embeds may stretch the element, so map into backing-store pixel
/// space before hit-testing.
fn on_pointer(canvas: &HtmlCanvasElement, css_x: f64, css_y: f64, css_w: f64, css_h: f64) {
    let (x, y) = if css_w > 0.0 && css_h > 0.0 {
        (
            css_x * f64::from(canvas.width()) / css_w,
            css_y * f64::from(canvas.height()) / css_h,
        )
    } else {
        (css_x, css_y)
    };
    let mut begin_loop = false;
    ENGINE.with(|cell| {
        if let Some(state) = cell.borrow_mut().as_mut() {
            match state.session.phase() {
                Phase::Ready => {
                    state.session.start(performance_now());
                    begin_loop = true;
                }
                Phase::Playing => {
                    // Input is applied against the current snapshot; the loop
                    // repaints on the next frame.
                    state.session.handle_pointer(x, y);
                }
                Phase::GameOver => {
                    // The loop already stopped at game over; cancel any frame
                    // still in flight and show the ready screen again.
                    state.session.reset();
                    LOOP_TOKEN.with(|t| t.set(t.get() + 1));
                    render(state);
                }
            }
        }
    });
    if begin_loop {
        start_loop();
    }
}

type FrameCallback = std::rc::Rc<std::cell::RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_loop() {
    let token = LOOP_TOKEN.with(|t| {
        let next = t.get() + 1;
        t.set(next);
        next
    });
    let f: FrameCallback = std::rc::Rc::new(std::cell::RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        if LOOP_TOKEN.with(|t| t.get()) != token {
            return; // superseded by a reset or restart
        }
        let playing = ENGINE.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                state.session.tick(ts);
                render(state);
                state.session.phase() == Phase::Playing
            } else {
                false
            }
        });
        // Once the session leaves Playing the final frame has been drawn and
        // no further ticks are scheduled.
        if playing {
            if let Some(w) = window() {
                let _ = w
                    .request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref());
            }
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(w) = window() {
        let _ = w.request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}

fn performance_now() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

#[cfg(feature = "rng")]
fn seed() -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(_) => performance_now().to_bits(),
    }
}

#[cfg(not(feature = "rng"))]
fn seed() -> u64 {
    // Sub-millisecond resolution; enough to vary spawn sequences across runs.
    performance_now().to_bits()
}

// --- Rendering ---------------------------------------------------------------

fn render(state: &mut EngineState) {
    let w = f64::from(state.canvas.width());
    let h = f64::from(state.canvas.height());
    let ctx = &state.ctx;

    draw_background(ctx, w, h);
    for obj in state.session.objects() {
        draw_trash(ctx, obj);
    }
    draw_hud(ctx, &state.session, w);

    match state.session.phase() {
        Phase::Ready => draw_overlay(
            ctx,
            w,
            h,
            "TRASH DASH",
            "#ffffff",
            "Click the falling garbage!",
            "Click to start",
        ),
        Phase::GameOver => {
            let line = format!("Final Score: {}", state.session.score());
            draw_overlay(ctx, w, h, "GAME OVER", "#f87171", &line, "Click to play again");
        }
        Phase::Playing => {}
    }
}

fn draw_background(ctx: &CanvasRenderingContext2d, w: f64, h: f64) {
    // Sky gradient down into the grass.
    let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
    gradient.add_color_stop(0.0, "#87ceeb").ok();
    gradient.add_color_stop(1.0, "#98fb98").ok();
    ctx.set_fill_style_canvas_gradient(&gradient);
    ctx.fill_rect(0.0, 0.0, w, h);

    let compact = w < 400.0;

    // Pixelated clouds
    ctx.set_fill_style_str("#ffffff");
    if compact {
        for i in 0..2 {
            let x = f64::from(i) * 100.0 + 30.0;
            let y = f64::from(i) * 25.0 + 40.0;
            ctx.fill_rect(x, y, 24.0, 12.0);
            ctx.fill_rect(x + 6.0, y - 6.0, 12.0, 6.0);
            ctx.fill_rect(x + 12.0, y + 12.0, 12.0, 6.0);
        }
    } else {
        for i in 0..3 {
            let x = f64::from(i) * 120.0 + 40.0;
            let y = f64::from(i) * 30.0 + 50.0;
            ctx.fill_rect(x, y, 32.0, 16.0);
            ctx.fill_rect(x + 8.0, y - 8.0, 16.0, 8.0);
            ctx.fill_rect(x + 16.0, y + 16.0, 16.0, 8.0);
        }
    }

    // Ground, road and the dashed center line
    let (ground, road, dash_step, dash_w, dash_h, dash_rise) = if compact {
        (50.0, 30.0, 30.0, 15.0, 3.0, 18.0)
    } else {
        (60.0, 40.0, 40.0, 20.0, 4.0, 22.0)
    };
    ctx.set_fill_style_str("#22c55e");
    ctx.fill_rect(0.0, h - ground, w, ground);
    ctx.set_fill_style_str("#374151");
    ctx.fill_rect(0.0, h - road, w, road);
    ctx.set_fill_style_str("#fbbf24");
    let mut x = 0.0;
    while x < w {
        ctx.fill_rect(x, h - dash_rise, dash_w, dash_h);
        x += dash_step;
    }
}

fn draw_trash(ctx: &CanvasRenderingContext2d, obj: &TrashObject) {
    let (w, h) = obj.kind.size();
    ctx.set_fill_style_str(obj.kind.color());
    ctx.fill_rect(obj.x, obj.y, w, h);

    // Black pixel details on top of the body; paper stays plain.
    ctx.set_fill_style_str("#000000");
    match obj.kind {
        TrashKind::Bottle => {
            ctx.fill_rect(obj.x + 9.0, obj.y - 6.0, 6.0, 12.0); // neck
            ctx.fill_rect(obj.x + 6.0, obj.y + 12.0, 12.0, 3.0); // label
        }
        TrashKind::Can => {
            ctx.fill_rect(obj.x + 3.0, obj.y + 6.0, 24.0, 3.0);
            ctx.fill_rect(obj.x + 3.0, obj.y + 18.0, 24.0, 3.0);
        }
        TrashKind::Bag => {
            ctx.fill_rect(obj.x + 6.0, obj.y + 6.0, 6.0, 6.0);
            ctx.fill_rect(obj.x + 24.0, obj.y + 6.0, 6.0, 6.0);
        }
        TrashKind::Paper => {}
    }
}

fn draw_hud(ctx: &CanvasRenderingContext2d, session: &GameSession, w: f64) {
    let compact = w < 400.0;
    ctx.set_text_align("left");
    ctx.set_fill_style_str("#ffffff");
    let score = format!("Score: {}", session.score());
    if compact {
        ctx.set_font("12px monospace");
        ctx.fill_text(&score, 8.0, 20.0).ok();
    } else {
        ctx.set_font("16px monospace");
        ctx.fill_text(&score, 10.0, 30.0).ok();
    }

    // One red heart square per remaining life, right-aligned.
    let (heart, pitch, right, top) = if compact {
        (12.0, 16.0, 20.0, 8.0)
    } else {
        (20.0, 25.0, 30.0, 10.0)
    };
    ctx.set_fill_style_str("#ef4444");
    for i in 0..session.lives() {
        ctx.fill_rect(w - right - f64::from(i) * pitch, top, heart, heart);
    }
}

fn draw_overlay(
    ctx: &CanvasRenderingContext2d,
    w: f64,
    h: f64,
    title: &str,
    title_color: &str,
    line1: &str,
    line2: &str,
) {
    ctx.set_fill_style_str("rgba(0,0,0,0.75)");
    ctx.fill_rect(0.0, 0.0, w, h);
    ctx.set_text_align("center");
    ctx.set_fill_style_str(title_color);
    ctx.set_font("32px monospace");
    ctx.fill_text(title, w / 2.0, h / 2.0 - 40.0).ok();
    ctx.set_fill_style_str("#ffffff");
    ctx.set_font("16px monospace");
    ctx.fill_text(line1, w / 2.0, h / 2.0).ok();
    ctx.fill_text(line2, w / 2.0, h / 2.0 + 30.0).ok();
}
