//! Axolotl Arcade entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use axolotl_arcade::persistence::{
        BestScore, CAKE_RUN_BEST_KEY, DRIVE_BEST_KEY, KvStore, LocalStore, MemoryStore, load_json,
    };
    use axolotl_arcade::platform::{Bindings, LoopHandle};
    use axolotl_arcade::renderer::SpriteId;
    use axolotl_arcade::renderer::canvas::CanvasSurface;
    use axolotl_arcade::sim::{CakeRun, Drive, Game};
    use axolotl_arcade::{CakeRunTuning, DriveTuning, Session, Settings, StoreError};

    const CAKE_RUN_TUNING_KEY: &str = "ax_tuning";
    const DRIVE_TUNING_KEY: &str = "axodriver_tuning";

    /// localStorage when the browser allows it, memory otherwise
    #[derive(Clone)]
    enum HostStore {
        Local(LocalStore),
        Memory(MemoryStore),
    }

    impl HostStore {
        fn open() -> Self {
            match LocalStore::open() {
                Ok(store) => HostStore::Local(store),
                Err(e) => {
                    log::warn!("localStorage unavailable ({e}), scores will not persist");
                    HostStore::Memory(MemoryStore::new())
                }
            }
        }
    }

    impl KvStore for HostStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            match self {
                HostStore::Local(s) => s.get(key),
                HostStore::Memory(s) => s.get(key),
            }
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            match self {
                HostStore::Local(s) => s.set(key, value),
                HostStore::Memory(s) => s.set(key, value),
            }
        }

        fn remove(&mut self, key: &str) -> Result<(), StoreError> {
            match self {
                HostStore::Local(s) => s.remove(key),
                HostStore::Memory(s) => s.remove(key),
            }
        }
    }

    type Best = BestScore<HostStore>;

    /// The game picked by the page URL
    enum Arcade {
        CakeRun(Session<CakeRun, Best>),
        Drive(Session<Drive, Best>),
    }

    macro_rules! with_session {
        ($arcade:expr, $s:ident => $body:expr) => {
            match $arcade {
                Arcade::CakeRun($s) => $body,
                Arcade::Drive($s) => $body,
            }
        };
    }

    /// Everything the animation-frame callback touches
    struct Host {
        arcade: Arcade,
        surface: CanvasSurface,
        canvas: HtmlCanvasElement,
        handle: LoopHandle,
    }

    impl Host {
        fn frame(&mut self, time: f64) {
            let surface = &mut self.surface;
            with_session!(&mut self.arcade, s => s.frame(time, surface));
        }

        fn logical_width(&self) -> f32 {
            with_session!(&self.arcade, s => s.game().size().x)
        }

        fn bindings(&self) -> Bindings {
            with_session!(&self.arcade, s => s.bindings())
        }

        /// Client x to logical playfield x
        fn to_logical_x(&self, client_x: f64) -> f32 {
            let rect = self.canvas.get_bounding_client_rect();
            let width = rect.width().max(1.0);
            ((client_x - rect.left()) / width) as f32 * self.logical_width()
        }

        fn pointer_down(&mut self, client_x: f64) {
            let x = self.to_logical_x(client_x);
            let width = self.logical_width();
            with_session!(&mut self.arcade, s => s.pointer_down(x, width));
        }

        fn pointer_up(&mut self) {
            with_session!(&mut self.arcade, s => s.pointer_up());
        }

        /// Whether a dragged finger should keep steering
        fn drag_steers(&self) -> bool {
            self.bindings() == Bindings::Drive
                && with_session!(&self.arcade, s => s.phase().is_running())
        }
    }

    /// `?game=drive` selects Drive; anything else is Cake Run
    fn wants_drive(search: &str) -> bool {
        search
            .trim_start_matches('?')
            .split('&')
            .any(|pair| pair.eq_ignore_ascii_case("game=drive"))
    }

    fn load_tuning<T>(store: &HostStore, key: &str) -> T
    where
        T: serde::de::DeserializeOwned + Default,
    {
        match load_json(store, key) {
            Ok(Some(tuning)) => {
                log::info!("Using tuning overrides from {key}");
                tuning
            }
            Ok(None) => T::default(),
            Err(e) => {
                log::warn!("Ignoring tuning overrides: {e}");
                T::default()
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"logger already initialized".into());
        }

        log::info!("Axolotl Arcade starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let store = HostStore::open();
        let settings = Settings::load(&store);
        let seed = js_sys::Date::now() as u64;
        let search = window.location().search().unwrap_or_default();

        let arcade = if wants_drive(&search) {
            let tuning: DriveTuning = load_tuning(&store, DRIVE_TUNING_KEY);
            Arcade::Drive(Session::new(
                Drive::new(tuning, seed),
                BestScore::new(store.clone(), DRIVE_BEST_KEY),
                Bindings::Drive,
                settings,
                seed,
            ))
        } else {
            let tuning: CakeRunTuning = load_tuning(&store, CAKE_RUN_TUNING_KEY);
            Arcade::CakeRun(Session::new(
                CakeRun::new(tuning, seed),
                BestScore::new(store.clone(), CAKE_RUN_BEST_KEY),
                Bindings::CakeRun,
                settings,
                seed,
            ))
        };

        let size = with_session!(&arcade, s => s.game().size());
        let mut surface = CanvasSurface::new(canvas.clone(), size)?;
        surface.load_sprites(&SpriteId::ALL);

        log::info!("Game initialized with seed: {}", seed);

        let host = Rc::new(RefCell::new(Host {
            arcade,
            surface,
            canvas: canvas.clone(),
            handle: LoopHandle::new(),
        }));

        setup_input_handlers(&canvas, host.clone());
        setup_auto_pause(host.clone());
        setup_teardown(host.clone());

        request_animation_frame(host);

        log::info!("Axolotl Arcade running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, host: Rc<RefCell<Host>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Keyboard
        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                let mut h = host.borrow_mut();
                if event.repeat() {
                    if h.bindings().action_for_key(&key).is_some() {
                        event.prevent_default();
                    }
                    return;
                }
                let handled = with_session!(&mut h.arcade, s => s.key_down(&key));
                if handled {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                let mut h = host.borrow_mut();
                with_session!(&mut h.arcade, s => s.key_up(&key));
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse
        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                host.borrow_mut().pointer_down(event.client_x() as f64);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        for name in ["mouseup", "mouseleave"] {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                host.borrow_mut().pointer_up();
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        for name in ["touchstart", "touchmove"] {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut h = host.borrow_mut();
                    // A moving finger only steers; it never starts a run
                    if event.type_() == "touchmove" && !h.drag_steers() {
                        return;
                    }
                    h.pointer_down(touch.client_x() as f64);
                }
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
        for name in ["touchend", "touchcancel"] {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                host.borrow_mut().pointer_up();
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(host: Rc<RefCell<Host>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let host = host.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut h = host.borrow_mut();
                    with_session!(&mut h.arcade, s => s.on_hidden());
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut h = host.borrow_mut();
                with_session!(&mut h.arcade, s => s.on_blur());
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Stop the loop when the page goes away and restart it when the page
    /// comes back from the back/forward cache
    fn setup_teardown(host: Rc<RefCell<Host>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::PageTransitionEvent| {
                let pending = host.borrow_mut().handle.cancel();
                if let (Some(id), Some(window)) = (pending, web_sys::window()) {
                    let _ = window.cancel_animation_frame(id);
                    log::info!("Animation loop cancelled");
                }
            });
            let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::PageTransitionEvent| {
                if !event.persisted() {
                    return;
                }
                let resumed = host.borrow_mut().handle.resume();
                if resumed {
                    log::info!("Page restored, animation loop resumed");
                    request_animation_frame(host.clone());
                }
            });
            let _ = window.add_event_listener_with_callback("pageshow", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(host: Rc<RefCell<Host>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let callback_host = host.clone();
        let callback = Closure::once_into_js(move |time: f64| {
            game_loop(callback_host, time);
        });
        let scheduled = host.borrow_mut().handle.schedule(|| {
            window
                .request_animation_frame(callback.unchecked_ref())
                .ok()
        });
        if !scheduled {
            log::debug!("Animation frame not scheduled");
        }
    }

    fn game_loop(host: Rc<RefCell<Host>>, time: f64) {
        {
            let mut h = host.borrow_mut();
            h.handle.fired();
            if !h.handle.is_active() {
                return;
            }
            h.frame(time);
        }

        request_animation_frame(host);
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
    log::info!("Axolotl Arcade (native) starting...");
    log::info!("Native mode is headless - serve index.html with the wasm build to play");

    let seed: u64 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(rand::random);

    println!("\nAutopilot demo (seed {seed})");
    let cake = demo::cake_run(seed);
    println!("  Cake Run: {cake}");
    let drive = demo::drive(seed);
    println!("  Drive:    {drive}");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless autopilots that play each game through a real session
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::fmt;

    use axolotl_arcade::persistence::{BestScore, CAKE_RUN_BEST_KEY, DRIVE_BEST_KEY, MemoryStore};
    use axolotl_arcade::platform::{Action, Bindings};
    use axolotl_arcade::renderer::{RecordingSurface, SpriteMask};
    use axolotl_arcade::sim::{CakeRun, Drive, Phase};
    use axolotl_arcade::{CakeRunTuning, DriveTuning, Session, Settings};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Two simulated minutes
    const MAX_FRAMES: u32 = 60 * 120;

    pub struct Outcome {
        phase: Phase,
        score: u64,
        frames: u32,
        draw_cmds: usize,
    }

    impl fmt::Display for Outcome {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let ending = match self.phase {
                Phase::Crashed(cause) => format!("{cause}"),
                _ => "survived".to_string(),
            };
            write!(
                f,
                "score {} after {:.1}s, {} ({} draw commands in last frame)",
                self.score,
                self.frames as f64 / 60.0,
                ending,
                self.draw_cmds
            )
        }
    }

    pub fn cake_run(seed: u64) -> Outcome {
        let mut session = Session::new(
            CakeRun::new(CakeRunTuning::default(), seed),
            BestScore::new(MemoryStore::new(), CAKE_RUN_BEST_KEY),
            Bindings::CakeRun,
            Settings::default(),
            seed,
        );
        let mut surface = RecordingSurface::new(SpriteMask::none());
        session.start();

        let mut frames = 0;
        while frames < MAX_FRAMES && session.phase().is_running() {
            let game = session.game();
            let player = &game.store.player;
            // Flap whenever sinking below the platform band
            let band = game.tuning.height - game.tuning.platform_rise_min - player.size.y;
            if player.vel_y > 0.0 && player.pos.y > band {
                session.press(Action::Primary);
            }
            session.frame(frames as f64 * FRAME_MS, &mut surface);
            frames += 1;
        }

        Outcome {
            phase: session.phase(),
            score: session.score(),
            frames,
            draw_cmds: surface.last.map(|l| l.len()).unwrap_or(0),
        }
    }

    pub fn drive(seed: u64) -> Outcome {
        let mut session = Session::new(
            Drive::new(DriveTuning::default(), seed),
            BestScore::new(MemoryStore::new(), DRIVE_BEST_KEY),
            Bindings::Drive,
            Settings::default(),
            seed,
        );
        let mut surface = RecordingSurface::new(SpriteMask::none());
        session.start();

        let mut frames = 0;
        while frames < MAX_FRAMES && session.phase().is_running() {
            let target = pick_lane(session.game());
            let x = session.game().store.car.pos.x;
            session.release(Action::SteerLeft);
            session.release(Action::SteerRight);
            if target < x - 6.0 {
                session.press(Action::SteerLeft);
            } else if target > x + 6.0 {
                session.press(Action::SteerRight);
            }
            session.frame(frames as f64 * FRAME_MS, &mut surface);
            frames += 1;
        }

        Outcome {
            phase: session.phase(),
            score: session.score(),
            frames,
            draw_cmds: surface.last.map(|l| l.len()).unwrap_or(0),
        }
    }

    /// Center x of the lane to head for: a free lane with the nearest fuel
    /// can, else the free lane closest to the car
    fn pick_lane(game: &Drive) -> f32 {
        let t = &game.tuning;
        let car = &game.store.car;
        let lane_of = |x: f32| ((x - t.road_x()) / t.lane_width()).floor().max(0.0) as u32;

        let blocked = |lane: u32| {
            game.store.blocks.iter().any(|b| {
                lane_of(b.pos.x) == lane && b.pos.y < car.pos.y && car.pos.y - b.pos.y < 320.0
            })
        };

        let free: Vec<u32> = (0..t.lanes).filter(|l| !blocked(*l)).collect();
        if free.is_empty() {
            return car.pos.x;
        }

        let can_lane = game
            .store
            .fuel_cans
            .iter()
            .filter(|c| c.pos.y < car.pos.y)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|c| lane_of(c.pos.x))
            .filter(|l| free.contains(l));

        let lane = can_lane.unwrap_or_else(|| {
            let current = lane_of(car.pos.x);
            free.iter()
                .copied()
                .min_by_key(|l| l.abs_diff(current))
                .unwrap_or(current)
        });
        t.lane_center(lane)
    }
}
