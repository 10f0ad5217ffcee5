//! Character Browser entry point
//!
//! Handles platform-specific initialization and wires the page controls.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlInputElement, KeyboardEvent};

    use character_browser::render::{FavoritesView, NO_FAVORITES_MESSAGE, favorites_view};
    use character_browser::source::fetch_characters;
    use character_browser::ui::CardList;
    use character_browser::{Character, FavoritesStore, Settings, filter};

    /// Everything the control handlers need, passed explicitly
    struct Browser {
        /// Full list fetched at startup; never mutated
        characters: Vec<Character>,
        store: Rc<FavoritesStore>,
        cards: CardList,
        excluded: Vec<String>,
        search_input: Option<HtmlInputElement>,
    }

    impl Browser {
        fn show_all(&self) {
            self.cards.paint(&self.characters);
        }

        fn search(&self) {
            let query = self
                .search_input
                .as_ref()
                .map(HtmlInputElement::value)
                .unwrap_or_default();
            let hits = filter::search(&self.characters, &query);
            log::debug!("Search '{}' matched {} characters", query, hits.len());
            self.cards.paint(hits);
        }

        async fn show_favorites(&self) {
            match favorites_view(&self.store, &self.excluded).await {
                Ok(FavoritesView::Empty) => self.cards.paint_message(NO_FAVORITES_MESSAGE),
                Ok(FavoritesView::Cards(favorites)) => self.cards.paint(&favorites),
                Err(e) => log::error!("Error getting favorites: {}", e),
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Trace).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        let settings = Settings::load();
        log::set_max_level(settings.log_level().to_level_filter());
        log::info!("Character Browser starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document to render into");
            return;
        };
        let Some(container) = document.get_element_by_id("characterList") else {
            log::error!("Missing #characterList container");
            return;
        };

        let store = Rc::new(FavoritesStore::new(settings.store_config()));
        if let Err(e) = store.open().await {
            log::error!("Error opening favorites database: {}", e);
        }

        let characters = match fetch_characters(&settings.api_url).await {
            Ok(list) => list,
            Err(e) => {
                log::error!("Error fetching data: {}", e);
                Vec::new()
            }
        };

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let search_input = document
            .get_element_by_id("searchInput")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());

        let browser = Rc::new(Browser {
            characters,
            store: store.clone(),
            cards: CardList::new(
                document.clone(),
                container,
                store,
                settings.excluded_names.clone(),
            ),
            excluded: settings.excluded_names,
            search_input,
        });

        setup_controls(&document, browser.clone());
        setup_teardown(browser.clone());

        browser.show_all();
        log::info!("Character Browser running!");
    }

    fn on_click(document: &Document, id: &str, handler: impl FnMut(web_sys::MouseEvent) + 'static) {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("Missing #{} control", id);
            return;
        };
        let closure = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(handler);
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_controls(document: &Document, browser: Rc<Browser>) {
        {
            let browser = browser.clone();
            on_click(document, "searchButton", move |_event| browser.search());
        }

        {
            let browser = browser.clone();
            on_click(document, "showAllButton", move |_event| browser.show_all());
        }

        {
            let browser = browser.clone();
            on_click(document, "showFavoritesButton", move |_event| {
                let browser = browser.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    browser.show_favorites().await;
                });
            });
        }

        // Enter in the search box runs the search
        if let Some(input) = browser.search_input.clone() {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key() == "Enter" {
                    event.prevent_default();
                    browser.search();
                }
            });
            let _ = input
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Close the favorites database when the page goes away, reopen if it
    /// comes back from the back/forward cache
    fn setup_teardown(browser: Rc<Browser>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let browser = browser.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                browser.store.close();
            });
            let _ = window
                .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let store = browser.store.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(e) = store.open().await {
                        log::error!("Error reopening favorites database: {}", e);
                    }
                });
            });
            let _ = window
                .add_event_listener_with_callback("pageshow", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

/// Native mode: inspect a saved API response
///
/// `character-browser <page.json> [query]` logs the cards a search would show.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use character_browser::{Settings, filter, render, source};

    env_logger::init();
    log::info!("Character Browser (native) starting...");
    log::info!("The browser UI needs the web build - run with `trunk serve`");

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        log::info!("Usage: character-browser <page.json> [query]");
        return;
    };
    let query = args.next().unwrap_or_default();

    let body = match std::fs::read_to_string(&path) {
        Ok(body) => body,
        Err(e) => {
            log::error!("Error reading {}: {}", path, e);
            std::process::exit(1);
        }
    };
    let characters = match source::parse_page(&body) {
        Ok(list) => list,
        Err(e) => {
            log::error!("Error decoding {}: {}", path, e);
            std::process::exit(1);
        }
    };

    let settings = Settings::load();
    let hits = filter::search(&characters, &query);
    let cards = render::cards(hits, &settings.excluded_names);
    log::info!("{} of {} characters match '{}'", cards.len(), characters.len(), query);
    for card in &cards {
        println!("{:>6}  {}", card.character.id, card.character.name);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
