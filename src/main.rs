//! Word Fall entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{HtmlCanvasElement, HtmlSelectElement, KeyboardEvent, Response};

    use word_fall::audio::{AudioManager, SoundEffect};
    use word_fall::platform::input::CLEAR_KEY;
    use word_fall::renderer::CanvasRenderer;
    use word_fall::{Engine, GameEvent, GamePhase, KeyLayout, Library, Tuning, WordList, translate_key};

    /// Directory word files are fetched from
    const WORDS_ROOT: &str = "data/words";

    /// Game instance holding all state
    struct Game {
        engine: Engine<Library>,
        renderer: CanvasRenderer,
        audio: AudioManager,
        keys: KeyLayout,
        /// Events collected by the engine subscription, drained once per frame
        events: Rc<RefCell<Vec<GameEvent>>>,
    }

    impl Game {
        fn new(canvas: HtmlCanvasElement, viewport_width: f32, seed: u64) -> Result<Self, JsValue> {
            let renderer = CanvasRenderer::new(canvas, viewport_width)?;
            let (width, height) = renderer.size();

            let mut engine = Engine::new(Library::new(seed), Tuning::default(), seed);
            engine.initialize(width, height);

            let events = Rc::new(RefCell::new(Vec::new()));
            {
                let events = events.clone();
                engine.subscribe(move |event| events.borrow_mut().push(event.clone()));
            }

            Ok(Self {
                engine,
                renderer,
                audio: AudioManager::new(),
                keys: KeyLayout::latin(),
                events,
            })
        }

        /// Advance the engine and react to what happened
        fn update(&mut self, time: f64) {
            self.engine.tick(time);
            self.drain_events();
        }

        fn render(&mut self) {
            self.renderer.render(self.engine.state());
        }

        fn drain_events(&mut self) {
            let events: Vec<GameEvent> = self.events.borrow_mut().drain(..).collect();
            for event in &events {
                if let Some(effect) = SoundEffect::for_event(event) {
                    self.audio.play(effect);
                }
                match event {
                    GameEvent::WordGuessed { text, points } => {
                        log::info!("Guessed {} for {} points", text, points)
                    }
                    GameEvent::WordMissed { text, .. } => log::info!("Missed {}", text),
                    GameEvent::LevelUp { level } => log::info!("Level {}", level),
                    GameEvent::Stopped => self.renderer.clear(),
                    _ => {}
                }
            }
        }

        fn resize(&mut self, width: u32, height: u32, viewport_width: f32) {
            self.renderer.resize(width, height, viewport_width);
            self.engine.resize(width as f32, height as f32);
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&self.engine.score().to_string()));
            }
            if let Some(el) = document.get_element_by_id("level") {
                el.set_text_content(Some(&self.engine.level().to_string()));
            }
            if let Some(el) = document.get_element_by_id("pauseButton") {
                let label = if self.engine.phase() == GamePhase::Paused {
                    "Resume"
                } else {
                    "Pause"
                };
                el.set_text_content(Some(label));
            }
            if let Some(el) = document.get_element_by_id("muteButton") {
                let label = if self.audio.is_muted() { "Sound on" } else { "Mute" };
                el.set_text_content(Some(label));
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Word Fall starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Backing store matches the CSS box so engine pixels are screen pixels
        canvas.set_width(canvas.client_width().max(1) as u32);
        canvas.set_height(canvas.client_height().max(1) as u32);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(canvas, viewport_width(), seed)?));
        log::info!("Game initialized with seed: {}", seed);

        setup_buttons(game.clone());
        setup_category_select(game.clone());
        setup_keyboard(game.clone());
        setup_resize(game.clone());
        setup_auto_pause(game.clone());

        // Load whatever category the selector shows initially
        if let Some(category) = selected_category() {
            load_category(game.clone(), category);
        }

        request_animation_frame(game);

        log::info!("Word Fall running!");
        Ok(())
    }

    fn viewport_width() -> f32 {
        web_sys::window()
            .and_then(|w| w.inner_width().ok())
            .and_then(|v| v.as_f64())
            .unwrap_or(1920.0) as f32
    }

    fn selected_category() -> Option<String> {
        let select: HtmlSelectElement = web_sys::window()?
            .document()?
            .get_element_by_id("categorySelect")?
            .dyn_into()
            .ok()?;
        let value = select.value();
        (!value.is_empty()).then_some(value)
    }

    /// Fetch and parse `data/words/{category}.txt`
    async fn fetch_word_list(category: &str) -> Result<WordList, JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let url = format!("{WORDS_ROOT}/{category}.txt");
        let response: Response = JsFuture::from(window.fetch_with_str(&url)).await?.dyn_into()?;
        if !response.ok() {
            return Err(JsValue::from_str(&format!(
                "{} returned HTTP {}",
                url,
                response.status()
            )));
        }
        let text = JsFuture::from(response.text()?)
            .await?
            .as_string()
            .ok_or("word file is not text")?;
        WordList::parse(category, &text).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    fn load_category(game: Rc<RefCell<Game>>, category: String) {
        wasm_bindgen_futures::spawn_local(async move {
            match fetch_word_list(&category).await {
                Ok(list) => game.borrow_mut().engine.source_mut().select(list),
                Err(e) => {
                    log::error!("Failed to load category {}: {:?}", category, e);
                    game.borrow_mut().engine.source_mut().clear();
                }
            }
        });
    }

    fn on_click<F>(id: &str, mut handler: F)
    where
        F: FnMut() + 'static,
    {
        let Some(btn) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
        else {
            log::warn!("Missing #{} button", id);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| handler());
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            on_click("startButton", move || {
                let mut g = game.borrow_mut();
                // Browsers only allow audio after a user gesture
                g.audio.resume();
                if !g.engine.source().is_ready() {
                    log::warn!("Category not ready; words will appear once it loads");
                }
                g.engine.start();
                g.drain_events();
                g.update_hud();
            });
        }
        {
            let game = game.clone();
            on_click("pauseButton", move || {
                let mut g = game.borrow_mut();
                g.engine.pause();
                g.drain_events();
                g.update_hud();
            });
        }
        {
            let game = game.clone();
            on_click("stopButton", move || {
                let mut g = game.borrow_mut();
                g.engine.stop();
                g.drain_events();
                g.update_hud();
            });
        }
        on_click("muteButton", move || {
            let mut g = game.borrow_mut();
            let muted = !g.audio.is_muted();
            g.audio.set_muted(muted);
            log::info!("Sound {}", if muted { "off" } else { "on" });
            g.update_hud();
        });
    }

    fn setup_category_select(game: Rc<RefCell<Game>>) {
        let Some(select) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("categorySelect"))
        else {
            log::warn!("Missing #categorySelect");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if let Some(category) = selected_category() {
                log::info!("Category selected: {}", category);
                load_category(game.clone(), category);
            }
        });
        let _ = select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if event.ctrl_key() || event.meta_key() || event.alt_key() {
                return;
            }
            let key = event.key();
            let mut g = game.borrow_mut();
            let Some(input) = translate_key(&key, &g.keys) else {
                return;
            };
            // Space would scroll the page, Backspace might navigate back
            if key == " " || key == CLEAR_KEY {
                event.prevent_default();
            }
            g.engine.handle_key(input);
            g.drain_events();
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(canvas) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id("gameCanvas"))
            else {
                return;
            };
            let width = canvas.client_width().max(1) as u32;
            let height = canvas.client_height().max(1) as u32;
            game.borrow_mut().resize(width, height, viewport_width());
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let Some(document) = window.document() else { return };

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    auto_pause(&game, "tab hidden");
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
                auto_pause(&game, "window blur");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn auto_pause(game: &Rc<RefCell<Game>>, reason: &str) {
        let mut g = game.borrow_mut();
        if g.engine.phase() == GamePhase::Active {
            g.engine.pause();
            g.drain_events();
            g.update_hud();
            log::info!("Auto-paused ({})", reason);
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    //! Headless autoplay: a scripted typist plays a built-in category so the
    //! engine can be exercised without a browser.

    use word_fall::consts::{DEFAULT_SURFACE_HEIGHT, DEFAULT_SURFACE_WIDTH, FRAME_MS};
    use word_fall::{Engine, GameEvent, KeyInput, Library, LoadError, Tuning, WordList};

    const CAPITALS: &str = "\
1 - MOSCOW - ru
2 - PARIS - fr
3 - LONDON - gb
4 - BERLIN - de
5 - MADRID - es
6 - ROME - it
7 - NEW YORK - us
8 - TOKYO - jp
9 - OTTAWA - ca
10 - LISBON - pt
";

    /// Frames between keystrokes of the scripted typist
    const FRAMES_PER_KEY: u32 = 8;
    /// One simulated minute
    const DEMO_FRAMES: u32 = 3600;

    pub fn run(tuning: Tuning, seed: u64) -> Result<(), LoadError> {
        let mut library = Library::new(seed);
        library.select(WordList::parse("capitals", CAPITALS)?);

        let mut engine = Engine::new(library, tuning, seed);
        engine.initialize(DEFAULT_SURFACE_WIDTH, DEFAULT_SURFACE_HEIGHT);
        engine.subscribe(|event| match event {
            GameEvent::WordGuessed { text, points } => log::info!("guessed {} (+{})", text, points),
            GameEvent::WordMissed { text, .. } => log::info!("missed {}", text),
            GameEvent::LevelUp { level } => log::info!("level {}", level),
            _ => log::debug!("{:?}", event),
        });

        engine.start();
        let mut now = 0.0;
        for frame in 0..DEMO_FRAMES {
            now += FRAME_MS;
            engine.tick(now);

            if frame % FRAMES_PER_KEY != 0 {
                continue;
            }
            let typed = engine.input().chars().count();
            let next = engine
                .active_word()
                .and_then(|word| word.text.chars().nth(typed));
            if let Some(ch) = next {
                engine.handle_key(KeyInput::Char(ch));
            }
        }
        log::info!(
            "Demo finished: score {} at level {}",
            engine.score(),
            engine.level()
        );
        engine.stop();

        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Word Fall (native) starting...");
    log::info!("Native mode is a headless autoplay demo - run with `trunk serve` for the web version");

    // Optional tuning file as the first argument
    let tuning = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading tuning from {}", path);
            word_fall::Tuning::from_json(&std::fs::read_to_string(path)?)?
        }
        None => word_fall::Tuning::default(),
    };

    let seed = 12345;
    demo::run(tuning, seed)?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
