//! Emoji Sentry entry point
//!
//! Handles platform-specific initialization: on wasm this wires the canvas,
//! DOM screens, input handlers, and the two clocks (rAF frames + 1 Hz
//! countdown) to the simulation core. The native build runs a headless demo
//! match.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, MouseEvent, TouchEvent};

    use emoji_sentry::render::{TargetDrawer, draw_frame};
    use emoji_sentry::sim::{self, Disposition, MatchEvent, MatchState, Outcome};

    /// Canvas-2d implementation of the drawer seam
    struct CanvasDrawer {
        ctx: CanvasRenderingContext2d,
    }

    impl TargetDrawer for CanvasDrawer {
        fn clear(&mut self, bounds: Vec2) {
            self.ctx
                .clear_rect(0.0, 0.0, bounds.x as f64, bounds.y as f64);
        }

        fn draw_symbol(&mut self, symbol: &str, pos: Vec2, size: f32, alpha: f32, sway: f32) {
            // Decorative idle sway, scaled by the template's rate
            let t = js_sys::Date::now() / 1000.0;
            let bob = (t * 2.0 * sway as f64).sin() * 2.0 * sway as f64;

            self.ctx.set_font(&format!("{}px Arial", size as u32));
            self.ctx.set_global_alpha(alpha as f64);
            let _ = self
                .ctx
                .fill_text(symbol, pos.x as f64, pos.y as f64 + bob);
            self.ctx.set_global_alpha(1.0);
        }
    }

    /// Game instance holding all state
    struct Game {
        state: MatchState,
        drawer: CanvasDrawer,
        canvas: HtmlCanvasElement,
        /// A frame chain is in flight; it stops itself when the match ends
        frame_scheduled: bool,
        /// Handle of the live 1 Hz countdown interval
        interval_id: Option<i32>,
    }

    impl Game {
        fn new(seed: u64, canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
            let bounds = Vec2::new(canvas.width() as f32, canvas.height() as f32);
            Self {
                state: MatchState::new(seed, bounds),
                drawer: CanvasDrawer { ctx },
                canvas,
                frame_scheduled: false,
                interval_id: None,
            }
        }

        /// Track the window size; spawns use these bounds
        fn resize(&mut self, w: u32, h: u32) {
            self.canvas.set_width(w);
            self.canvas.set_height(h);
            self.state.bounds = Vec2::new(w as f32, h as f32);
            // Canvas resets font state on resize
            self.drawer.ctx.set_text_align("center");
            self.drawer.ctx.set_text_baseline("middle");
        }

        /// Render the current frame
        fn draw(&mut self) {
            draw_frame(&self.state, &mut self.drawer);

            // Occasional interference scanline, visual static only
            if js_sys::Math::random() > 0.9 {
                let ctx = &self.drawer.ctx;
                ctx.set_fill_style_str("rgba(0, 255, 0, 0.1)");
                ctx.fill_rect(
                    0.0,
                    js_sys::Math::random() * self.state.bounds.y as f64,
                    self.state.bounds.x as f64,
                    2.0,
                );
            }
        }

        /// White flash at a hostile hit position
        fn hostile_flash(&self, pos: Vec2) {
            let ctx = &self.drawer.ctx;
            ctx.set_fill_style_str("rgba(255, 255, 255, 0.5)");
            ctx.begin_path();
            let _ = ctx.arc(
                pos.x as f64,
                pos.y as f64,
                50.0,
                0.0,
                std::f64::consts::TAU,
            );
            ctx.fill();
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Emoji Sentry starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        canvas.set_width(window.inner_width()?.as_f64().unwrap_or(800.0) as u32);
        canvas.set_height(window.inner_height()?.as_f64().unwrap_or(600.0) as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, canvas.clone(), ctx)));
        log::info!("Game initialized with seed: {}", seed);

        setup_resize_handler(game.clone());
        setup_input_handlers(&canvas, game.clone());
        setup_start_buttons(game.clone());

        log::info!("Emoji Sentry ready");
        Ok(())
    }

    fn setup_resize_handler(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let window = web_sys::window().unwrap();
            let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
            let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
            game.borrow_mut().resize(w as u32, h as u32);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse - offset coordinates are already canvas-local
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                pointer_down(&game, pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch - translate the first touch point via the bounding rect
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let pos = Vec2::new(
                        touch.client_x() as f32 - rect.left() as f32,
                        touch.client_y() as f32 - rect.top() as f32,
                    );
                    pointer_down(&game, pos);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn pointer_down(game: &Rc<RefCell<Game>>, pos: Vec2) {
        {
            let mut g = game.borrow_mut();
            sim::pointer_down(&mut g.state, pos);
        }
        flush_events(game);
    }

    fn setup_start_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        for id in ["start-btn", "restart-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    start_match(&game);
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    /// Full-reset start/restart: reset the core, swap the DOM screens, and
    /// (re)arm both clocks
    fn start_match(game: &Rc<RefCell<Game>>) {
        game.borrow_mut().state.start();
        flush_events(game);

        let document = web_sys::window().unwrap().document().unwrap();
        set_screen_active(&document, "start-screen", false);
        set_screen_active(&document, "game-over-screen", false);
        set_hidden(&document, "success-msg", true);
        set_hidden(&document, "game-ui", false);

        start_countdown(game.clone());
        let scheduled = game.borrow().frame_scheduled;
        if !scheduled {
            game.borrow_mut().frame_scheduled = true;
            schedule_frame(game.clone());
        }
    }

    fn schedule_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            frame_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            if !g.state.running() {
                // Stop rescheduling; start_match arms a fresh chain
                g.frame_scheduled = false;
                return;
            }
            sim::frame(&mut g.state, time);
            g.draw();
        }
        flush_events(&game);
        schedule_frame(game);
    }

    fn start_countdown(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // A restart while running replaces the previous interval
        if let Some(id) = game.borrow_mut().interval_id.take() {
            window.clear_interval_with_handle(id);
        }

        let game_tick = game.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            let still_running = {
                let mut g = game_tick.borrow_mut();
                sim::second(&mut g.state);
                g.state.running()
            };
            flush_events(&game_tick);
            if !still_running {
                if let Some(id) = game_tick.borrow_mut().interval_id.take() {
                    web_sys::window().unwrap().clear_interval_with_handle(id);
                }
            }
        });
        let id = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                1000,
            )
            .expect("setInterval failed");
        game.borrow_mut().interval_id = Some(id);
        closure.forget();
    }

    /// Drain core events and map them onto the DOM / canvas flourishes
    fn flush_events(game: &Rc<RefCell<Game>>) {
        let events: Vec<MatchEvent> = game.borrow_mut().state.drain_events().collect();
        if events.is_empty() {
            return;
        }
        let document = web_sys::window().unwrap().document().unwrap();
        for event in events {
            apply_event(game, &document, event);
        }
    }

    fn apply_event(game: &Rc<RefCell<Game>>, document: &Document, event: MatchEvent) {
        match event {
            MatchEvent::ScoreChanged(score) => {
                set_text(document, "score", &score.to_string());
            }
            MatchEvent::TimeChanged(secs) => {
                set_text(document, "timer", &secs.to_string());
            }
            MatchEvent::HitFeedback { pos, disposition } => match disposition {
                Disposition::Hostile => game.borrow().hostile_flash(pos),
                Disposition::Friendly => penalty_flash(document),
            },
            MatchEvent::MatchEnded {
                score,
                outcome,
                penalty_flash: flash,
            } => {
                if flash {
                    penalty_flash(document);
                }
                set_hidden(document, "game-ui", true);
                set_screen_active(document, "game-over-screen", true);
                set_text(document, "final-score-val", &score.to_string());
                match outcome {
                    Outcome::Success => {
                        set_title(document, "MISSION ACCOMPLISHED", "#0f0");
                        set_text(document, "end-reason", "PERIMETER CLEARED. AWAIT FURTHER ORDERS.");
                        set_hidden(document, "success-msg", false);
                    }
                    Outcome::Failure => {
                        set_title(document, "MISSION FAILED", "red");
                        set_text(document, "end-reason", "ACCURACY TOO LOW TO HOLD THE PERIMETER.");
                    }
                }
            }
        }
    }

    /// Fullscreen red flash on friendly fire, removed after 100 ms
    fn penalty_flash(document: &Document) {
        let Ok(flash) = document.create_element("div") else {
            return;
        };
        let _ = flash.set_attribute(
            "style",
            "position:absolute;top:0;left:0;width:100%;height:100%;\
             background-color:red;opacity:0.3;pointer-events:none;",
        );
        if let Some(body) = document.body() {
            let _ = body.append_child(&flash);
        }
        let remove = Closure::once(move || {
            flash.remove();
        });
        let _ = web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                remove.as_ref().unchecked_ref(),
                100,
            );
        remove.forget();
    }

    // --- small DOM helpers ---

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_screen_active(document: &Document, id: &str, active: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let list = el.class_list();
            let _ = if active {
                list.add_1("active")
            } else {
                list.remove_1("active")
            };
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let list = el.class_list();
            let _ = if hidden {
                list.add_1("hidden")
            } else {
                list.remove_1("hidden")
            };
        }
    }

    fn set_title(document: &Document, text: &str, color: &str) {
        if let Some(el) = document.get_element_by_id("end-title") {
            el.set_text_content(Some(text));
            let style = format!("color: {}", color);
            let _ = el.set_attribute("style", &style);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Emoji Sentry (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    // Drive one full match with synthetic clocks as a smoke test
    let final_score = demo_match(0xC0FFEE);
    println!("\nHeadless demo match complete (final score: {})", final_score);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn demo_match(seed: u64) -> i32 {
    use emoji_sentry::consts::FRAME_DT_MS;
    use emoji_sentry::sim::{self, MatchState};
    use glam::Vec2;

    let mut state = MatchState::new(seed, Vec2::new(800.0, 600.0));
    state.start();

    let mut now = 0.0;
    while state.running() {
        // ~60 frames per countdown second
        for _ in 0..60 {
            now += FRAME_DT_MS;
            sim::frame(&mut state, now);
        }
        sim::second(&mut state);
    }
    state.score
}
