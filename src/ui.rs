//! DOM painting for the card list (WASM only)
//!
//! Cards are built element by element; character data only ever reaches the
//! page through text nodes and attributes.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement};

use crate::character::Character;
use crate::favorites::FavoritesStore;
use crate::render::{self, CardView, FavoriteState};

type Listener = Closure<dyn FnMut(web_sys::Event)>;

/// Styles applied to the list container while it shows a message
const MESSAGE_STYLES: &[(&str, &str)] = &[
    ("display", "flex"),
    ("align-items", "center"),
    ("justify-content", "center"),
];

/// The `#characterList` container and everything painted into it
pub struct CardList {
    document: Document,
    container: Element,
    store: Rc<FavoritesStore>,
    excluded: Vec<String>,
    /// Handlers of the cards currently on screen; replaced on every paint
    listeners: RefCell<Vec<Listener>>,
}

impl CardList {
    pub fn new(
        document: Document,
        container: Element,
        store: Rc<FavoritesStore>,
        excluded: Vec<String>,
    ) -> Self {
        Self {
            document,
            container,
            store,
            excluded,
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Replace the list with one card per (non-excluded) character
    pub fn paint<'a, I>(&self, characters: I)
    where
        I: IntoIterator<Item = &'a Character>,
    {
        self.clear();

        let cards = render::cards(characters, &self.excluded);
        let result = self.make_element("div", &["container", "row"]).and_then(|row| {
            for card in &cards {
                let el = self.make_card(card)?;
                row.append_child(&el)?;
            }
            self.container.append_child(&row)
        });

        match result {
            Ok(_) => log::debug!("Painted {} cards", cards.len()),
            Err(e) => log::error!("Error painting cards: {:?}", e),
        }
    }

    /// Replace the list with a centered, italic message
    pub fn paint_message(&self, text: &str) {
        self.clear();

        let result = self.make_element("p", &[]).and_then(|p| {
            p.set_text_content(Some(text));
            p.set_attribute("style", "font-style: italic; font-size: 20px;")?;
            self.container.append_child(&p)?;
            if let Some(style) = self.container_style() {
                for (name, value) in MESSAGE_STYLES {
                    style.set_property(name, value)?;
                }
            }
            Ok(())
        });

        if let Err(e) = result {
            log::error!("Error painting message: {:?}", e);
        }
    }

    fn clear(&self) {
        self.container.set_inner_html("");
        if let Some(style) = self.container_style() {
            for (name, _) in MESSAGE_STYLES {
                let _ = style.remove_property(name);
            }
        }
        // Old cards are detached, their handlers can no longer fire
        self.listeners.borrow_mut().clear();
    }

    fn container_style(&self) -> Option<web_sys::CssStyleDeclaration> {
        self.container
            .dyn_ref::<HtmlElement>()
            .map(HtmlElement::style)
    }

    fn make_element(&self, tag: &str, classes: &[&str]) -> Result<Element, JsValue> {
        let el = self.document.create_element(tag)?;
        for class in classes {
            el.class_list().add_1(class)?;
        }
        Ok(el)
    }

    fn make_card(&self, card: &CardView<'_>) -> Result<Element, JsValue> {
        let character = card.character;
        let root = self.make_element(
            "div",
            &["card", "col-lg-3", "col-md-6", "col-sm-12", "mb-3", "mr-3", "ml-3"],
        )?;

        let img = self.make_element("img", &["card-img-top"])?;
        if let Some(src) = &character.image_url {
            img.set_attribute("src", src)?;
        }
        img.set_attribute("alt", &card.image_alt)?;
        root.append_child(&img)?;

        let body = self.make_element("div", &["card-body"])?;

        let title = self.make_element("h5", &["card-title"])?;
        title.set_text_content(Some(&character.name));
        body.append_child(&title)?;

        for (label, value) in card.media_lines() {
            let line = self.labelled_line(label)?;
            line.append_child(&self.document.create_text_node(&format!(" {}", value)))?;
            body.append_child(&line)?;
        }

        if let Some(url) = &character.source_url {
            let line = self.labelled_line("Learn more:")?;
            let link = self.make_element("a", &[])?;
            link.set_attribute("href", url)?;
            link.set_attribute("target", "_blank")?;
            link.set_attribute("rel", "noopener")?;
            link.set_attribute("style", "color: #385B6B; text-decoration: none;")?;
            link.set_text_content(Some(url));
            line.append_child(&self.document.create_text_node(" "))?;
            line.append_child(&link)?;
            body.append_child(&line)?;
        }

        let button = self.make_element("button", &["favoriteToggle", "btn", "btn-secondary"])?;
        body.append_child(&button)?;
        self.wire_toggle(button, character.clone())?;

        root.append_child(&body)?;
        Ok(root)
    }

    fn labelled_line(&self, label: &str) -> Result<Element, JsValue> {
        let p = self.make_element("p", &["card-text"])?;
        let strong = self.make_element("strong", &[])?;
        strong.set_text_content(Some(label));
        p.append_child(&strong)?;
        Ok(p)
    }

    fn wire_toggle(&self, button: Element, character: Character) -> Result<(), JsValue> {
        let toggle = Rc::new(Toggle {
            button,
            state: Cell::new(FavoriteState::NotFavorite),
            hovered: Cell::new(false),
            // Ignore clicks until the stored state is known
            busy: Cell::new(true),
        });
        toggle.paint();

        // Initial state from the store
        {
            let toggle = toggle.clone();
            let store = self.store.clone();
            let character = character.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match render::stored_state(&store, &character).await {
                    Ok(state) => toggle.state.set(state),
                    Err(e) => log::error!("Error reading favorite {}: {}", character.id, e),
                }
                toggle.busy.set(false);
                toggle.paint();
            });
        }

        // Hover preview
        for (event, hovered) in [("mouseenter", true), ("mouseleave", false)] {
            let target = toggle.clone();
            let closure = Listener::new(move |_event: web_sys::Event| {
                target.hovered.set(hovered);
                target.paint();
            });
            self.listen(&toggle.button, event, closure)?;
        }

        // Click: flip only after the store acknowledges
        {
            let target = toggle.clone();
            let store = self.store.clone();
            let closure = Listener::new(move |_event: web_sys::Event| {
                if target.busy.replace(true) {
                    return;
                }
                let target = target.clone();
                let store = store.clone();
                let character = character.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    match render::toggle_favorite(&store, &character, target.state.get()).await {
                        Ok(next) => target.state.set(next),
                        Err(e) => log::error!("Error updating favorite {}: {}", character.id, e),
                    }
                    target.busy.set(false);
                    target.paint();
                });
            });
            self.listen(&toggle.button, "click", closure)?;
        }

        Ok(())
    }

    fn listen(&self, target: &Element, event: &str, closure: Listener) -> Result<(), JsValue> {
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        self.listeners.borrow_mut().push(closure);
        Ok(())
    }
}

/// Per-card favorite button and its state
struct Toggle {
    button: Element,
    state: Cell<FavoriteState>,
    hovered: Cell<bool>,
    busy: Cell<bool>,
}

impl Toggle {
    fn paint(&self) {
        let state = self.state.get();
        self.button.set_inner_html(state.icon(self.hovered.get()));
        let _ = self.button.set_attribute("title", state.title());
        let _ = self.button.set_attribute(
            "aria-pressed",
            if state == FavoriteState::Favorite { "true" } else { "false" },
        );
    }
}
