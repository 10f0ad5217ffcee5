//! Card view models and favorite toggle state
//!
//! Everything here is DOM-free; `ui` turns it into elements.

use crate::character::Character;
use crate::error::StoreError;
use crate::favorites::FavoritesStore;

/// Shown instead of cards when the favorites view is empty
pub const NO_FAVORITES_MESSAGE: &str = "You have no favorites saved.";

/// Bootstrap "star-fill" icon
pub const STAR_FILLED_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="16" height="16" fill="currentColor" class="bi bi-star-fill" viewBox="0 0 16 16"><path d="M3.612 15.443c-.386.198-.824-.149-.746-.592l.83-4.73L.173 6.765c-.329-.314-.158-.888.283-.95l4.898-.696L7.538.792c.197-.39.73-.39.927 0l2.184 4.327 4.898.696c.441.062.612.636.282.95l-3.522 3.356.83 4.73c.078.443-.36.79-.746.592L8 13.187l-4.389 2.256z"></path></svg>"#;

/// Bootstrap "star" (outline) icon
pub const STAR_OUTLINE_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="16" height="16" fill="currentColor" class="bi bi-star" viewBox="0 0 16 16"><path d="M2.866 14.85c-.078.444.36.791.746.593l4.39-2.256 4.389 2.256c.386.198.824-.149.746-.592l-.83-4.73 3.522-3.356c.33-.314.16-.888-.282-.95l-4.898-.696L8.465.792a.513.513 0 0 0-.927 0L5.354 5.12l-4.898.696c-.441.062-.612.636-.283.95l3.523 3.356-.83 4.73zm4.905-2.767-3.686 1.894.694-3.957a.56.56 0 0 0-.163-.505L1.71 6.745l4.052-.576a.53.53 0 0 0 .393-.288L8 2.223l1.847 3.658a.53.53 0 0 0 .393.288l4.052.575-2.906 2.77a.56.56 0 0 0-.163.506l.694 3.957-3.686-1.894a.5.5 0 0 0-.461 0z"></path></svg>"#;

/// Whether a name is on the exclusion list (case-insensitive, whole name)
pub fn is_excluded(name: &str, excluded: &[String]) -> bool {
    let name = name.to_lowercase();
    excluded.iter().any(|e| e.to_lowercase() == name)
}

/// Display-ready contents of one card
#[derive(Debug, Clone, PartialEq)]
pub struct CardView<'a> {
    pub character: &'a Character,
    pub image_alt: String,
    pub films: String,
    pub tv_shows: String,
    pub video_games: String,
}

impl<'a> CardView<'a> {
    pub fn new(character: &'a Character) -> Self {
        Self {
            character,
            image_alt: format!("{} character image", character.name),
            films: character.films.join(", "),
            tv_shows: character.tv_shows.join(", "),
            video_games: character.video_games.join(", "),
        }
    }

    /// Labelled media lines in display order
    pub fn media_lines(&self) -> [(&'static str, &str); 3] {
        [
            ("Films:", self.films.as_str()),
            ("TV Shows:", self.tv_shows.as_str()),
            ("Video Games:", self.video_games.as_str()),
        ]
    }
}

/// One card per character, skipping excluded names
pub fn cards<'a, I>(characters: I, excluded: &[String]) -> Vec<CardView<'a>>
where
    I: IntoIterator<Item = &'a Character>,
{
    characters
        .into_iter()
        .filter(|c| !is_excluded(&c.name, excluded))
        .map(CardView::new)
        .collect()
}

/// Visual state of a card's favorite toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FavoriteState {
    #[default]
    NotFavorite,
    Favorite,
}

impl FavoriteState {
    pub fn from_stored(stored: bool) -> Self {
        if stored {
            FavoriteState::Favorite
        } else {
            FavoriteState::NotFavorite
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            FavoriteState::NotFavorite => FavoriteState::Favorite,
            FavoriteState::Favorite => FavoriteState::NotFavorite,
        }
    }

    /// Icon to draw; hovering previews the state a click would switch to
    pub fn icon(self, hovered: bool) -> &'static str {
        let shown = if hovered { self.flipped() } else { self };
        match shown {
            FavoriteState::NotFavorite => STAR_OUTLINE_ICON,
            FavoriteState::Favorite => STAR_FILLED_ICON,
        }
    }

    /// Button tooltip
    pub fn title(self) -> &'static str {
        match self {
            FavoriteState::NotFavorite => "Add to favorites",
            FavoriteState::Favorite => "Remove from favorites",
        }
    }
}

/// Favorite state of `character` as currently stored
pub async fn stored_state(
    store: &FavoritesStore,
    character: &Character,
) -> Result<FavoriteState, StoreError> {
    Ok(FavoriteState::from_stored(store.contains(character.id).await?))
}

/// Apply one click to a toggle showing `current`
///
/// Returns the state to display once the store has acknowledged the change.
/// A duplicate add means the record is already stored, so the toggle settles
/// on `Favorite`. On any other error the caller keeps `current`.
pub async fn toggle_favorite(
    store: &FavoritesStore,
    character: &Character,
    current: FavoriteState,
) -> Result<FavoriteState, StoreError> {
    match current {
        FavoriteState::NotFavorite => match store.add(character).await {
            Ok(()) => Ok(FavoriteState::Favorite),
            Err(StoreError::DuplicateKey(id)) => {
                log::warn!("Character {} was already a favorite", id);
                Ok(FavoriteState::Favorite)
            }
            Err(e) => Err(e),
        },
        FavoriteState::Favorite => {
            store.remove(character.id).await?;
            Ok(FavoriteState::NotFavorite)
        }
    }
}

/// What the favorites view shows
#[derive(Debug, Clone, PartialEq)]
pub enum FavoritesView {
    /// Nothing to show; paint [`NO_FAVORITES_MESSAGE`]
    Empty,
    /// Stored favorites that get a card
    Cards(Vec<Character>),
}

/// Build the favorites view from the store
///
/// Favorites whose names are excluded never get a card, so a store holding
/// only those is shown as empty.
pub async fn favorites_view(
    store: &FavoritesStore,
    excluded: &[String],
) -> Result<FavoritesView, StoreError> {
    let visible: Vec<Character> = store
        .get_all()
        .await?
        .into_iter()
        .filter(|c| !is_excluded(&c.name, excluded))
        .collect();

    if visible.is_empty() {
        Ok(FavoritesView::Empty)
    } else {
        Ok(FavoritesView::Cards(visible))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::EXCLUDED_NAMES;
    use crate::favorites::StoreConfig;
    use futures::executor::block_on;

    fn default_exclusions() -> Vec<String> {
        EXCLUDED_NAMES.iter().map(|s| s.to_string()).collect()
    }

    fn opened(name: &str) -> FavoritesStore {
        let store = FavoritesStore::new(StoreConfig {
            db_name: name.to_string(),
            ..StoreConfig::default()
        });
        block_on(store.open()).unwrap();
        store
    }

    #[test]
    fn test_excluded_names_get_no_card() {
        let list = vec![
            Character::new(1, "Arabella"),
            Character::new(2, "Ariel"),
            Character::new(3, "AMELIA DUCKWORTH"),
            Character::new(4, "Arabella's Sister"),
        ];
        let names: Vec<_> = cards(&list, &default_exclusions())
            .iter()
            .map(|c| c.character.name.as_str())
            .collect();
        assert_eq!(names, vec!["Ariel", "Arabella's Sister"]);
    }

    #[test]
    fn test_empty_exclusion_list_keeps_everything() {
        let list = vec![Character::new(1, "Arabella")];
        assert_eq!(cards(&list, &[]).len(), 1);
    }

    #[test]
    fn test_card_text() {
        let mut c = Character::new(308, "Queen Arianna");
        c.films = vec!["Tangled".into(), "Tangled: Before Ever After".into()];
        c.tv_shows = vec!["Tangled: The Series".into()];

        let card = CardView::new(&c);
        assert_eq!(card.image_alt, "Queen Arianna character image");
        assert_eq!(
            card.media_lines(),
            [
                ("Films:", "Tangled, Tangled: Before Ever After"),
                ("TV Shows:", "Tangled: The Series"),
                ("Video Games:", ""),
            ]
        );
    }

    #[test]
    fn test_hover_previews_next_state() {
        assert_eq!(FavoriteState::NotFavorite.icon(false), STAR_OUTLINE_ICON);
        assert_eq!(FavoriteState::NotFavorite.icon(true), STAR_FILLED_ICON);
        assert_eq!(FavoriteState::Favorite.icon(false), STAR_FILLED_ICON);
        assert_eq!(FavoriteState::Favorite.icon(true), STAR_OUTLINE_ICON);
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let store = opened("toggle_twice");
        let moana = Character::new(9, "Moana");

        let initial = block_on(stored_state(&store, &moana)).unwrap();
        assert_eq!(initial, FavoriteState::NotFavorite);

        let once = block_on(toggle_favorite(&store, &moana, initial)).unwrap();
        assert_eq!(once, FavoriteState::Favorite);
        assert!(block_on(store.contains(9)).unwrap());

        let twice = block_on(toggle_favorite(&store, &moana, once)).unwrap();
        assert_eq!(twice, initial);
        assert!(!block_on(store.contains(9)).unwrap());
    }

    #[test]
    fn test_toggle_on_stale_card_settles_on_favorite() {
        let store = opened("toggle_stale");
        let moana = Character::new(9, "Moana");
        block_on(store.add(&moana)).unwrap();

        let next = block_on(toggle_favorite(&store, &moana, FavoriteState::NotFavorite)).unwrap();
        assert_eq!(next, FavoriteState::Favorite);
    }

    #[test]
    fn test_toggle_without_open_store_fails() {
        let store = FavoritesStore::new(StoreConfig::default());
        let moana = Character::new(9, "Moana");

        let err = block_on(toggle_favorite(&store, &moana, FavoriteState::NotFavorite)).unwrap_err();
        assert!(matches!(err, StoreError::NotOpen));
    }

    #[test]
    fn test_favorites_view_empty_store() {
        let store = opened("view_empty");
        let view = block_on(favorites_view(&store, &default_exclusions())).unwrap();
        assert_eq!(view, FavoritesView::Empty);
    }

    #[test]
    fn test_favorites_view_lists_stored() {
        let store = opened("view_stored");
        let moana = Character::new(9, "Moana");
        block_on(store.add(&moana)).unwrap();

        let view = block_on(favorites_view(&store, &default_exclusions())).unwrap();
        assert_eq!(view, FavoritesView::Cards(vec![moana]));
    }

    #[test]
    fn test_favorites_view_only_excluded_is_empty() {
        let store = opened("view_excluded");
        block_on(store.add(&Character::new(18, "Arabella"))).unwrap();
        block_on(store.add(&Character::new(19, "Amelia Duckworth"))).unwrap();

        let view = block_on(favorites_view(&store, &default_exclusions())).unwrap();
        assert_eq!(view, FavoritesView::Empty);
    }

    #[test]
    fn test_favorites_view_without_open_store_fails() {
        let store = FavoritesStore::new(StoreConfig::default());
        let err = block_on(favorites_view(&store, &[])).unwrap_err();
        assert!(matches!(err, StoreError::NotOpen));
    }
}
