//! Collection view state machine
//!
//! One view per catalog. Entering the view fetches exactly once; the result
//! replaces the collection wholesale. Fetch failures and empty responses both
//! land in `ViewState::ReadyEmpty`. Selections and detail open/close are
//! synchronous and never re-fetch.

use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::CatalogEntity;
use super::facets::FacetCache;
use super::filter::{self, Facet};
use super::normalize::normalize_records;
use super::source::CatalogSource;
use crate::config::AssetDefaults;
use crate::models::{Attraction, Difficulty, Route};
use crate::{CatalogError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    Ready,
    /// Zero records, or the fetch failed
    ReadyEmpty,
}

pub struct CollectionView<E: CatalogEntity> {
    state: ViewState,
    collection: Arc<[E]>,
    selection: E::Selection,
    facet_cache: FacetCache<E, E::Facets>,
    open_id: Option<u64>,
    fetch_started: bool,
    load_failure: Option<String>,
    assets: AssetDefaults,
}

impl<E: CatalogEntity> CollectionView<E> {
    #[must_use]
    pub fn new(assets: AssetDefaults) -> Self {
        Self {
            state: ViewState::Loading,
            collection: Arc::from(Vec::new()),
            selection: E::Selection::default(),
            facet_cache: FacetCache::default(),
            open_id: None,
            fetch_started: false,
            load_failure: None,
            assets,
        }
    }

    #[must_use]
    pub fn state(&self) -> ViewState {
        self.state
    }

    /// Enter the view: performs the single fetch attempt and settles the state.
    /// Calling it again is a no-op.
    pub async fn mount(&mut self, source: &dyn CatalogSource) {
        if !self.begin_fetch() {
            return;
        }
        let outcome = source.fetch(E::KIND).await;
        self.complete_fetch(outcome);
    }

    /// Claims the one fetch this view is allowed. `false` if already claimed.
    pub fn begin_fetch(&mut self) -> bool {
        if self.fetch_started {
            warn!(kind = %E::KIND, "Fetch already attempted for this view, not re-fetching");
            return false;
        }
        self.fetch_started = true;
        true
    }

    /// Applies a fetch outcome. Errors are logged and degrade to an empty collection.
    pub fn complete_fetch(&mut self, outcome: Result<Vec<Value>>) {
        if self.state != ViewState::Loading {
            warn!(kind = %E::KIND, "Ignoring fetch result for a view that already settled");
            return;
        }

        match outcome {
            Ok(records) => {
                let assets = &self.assets;
                let entities = normalize_records(records, |raw: E::Raw| E::normalize(raw, assets));
                info!("Loaded {} {}", entities.len(), E::KIND);
                self.replace_collection(entities);
            }
            Err(e) => {
                error!(kind = %E::KIND, "Failed to load collection: {}", e);
                self.load_failure = Some(e.to_string());
                self.replace_collection(Vec::new());
            }
        }
    }

    /// Swaps in a new collection; facets are invalidated by the identity change
    pub fn replace_collection(&mut self, entities: Vec<E>) {
        self.collection = Arc::from(entities);
        self.state = if self.collection.is_empty() {
            ViewState::ReadyEmpty
        } else {
            ViewState::Ready
        };

        if let Some(id) = self.open_id {
            if !self.collection.iter().any(|e| e.id() == id) {
                debug!(id, "Open entity vanished with the new collection, closing detail");
                self.open_id = None;
            }
        }
    }

    #[must_use]
    pub fn collection(&self) -> &[E] {
        &self.collection
    }

    /// Diagnostic message of the fetch failure, if the view is empty because of one
    #[must_use]
    pub fn load_failure(&self) -> Option<&str> {
        self.load_failure.as_deref()
    }

    /// Facets of the current collection, recomputed only when it was replaced
    pub fn facets(&mut self) -> Arc<E::Facets> {
        self.facet_cache.get_or_compute(&self.collection, E::extract_facets)
    }

    #[must_use]
    pub fn facet_computations(&self) -> usize {
        self.facet_cache.computations()
    }

    #[must_use]
    pub fn selection(&self) -> &E::Selection {
        &self.selection
    }

    /// Whether any entity in the collection belongs to the named park
    #[must_use]
    pub fn offers_park(&self, name: &str) -> bool {
        self.collection.iter().any(|e| e.park_name() == Some(name))
    }

    pub fn select_park(&mut self, park: Facet<String>) {
        if let Facet::Only(name) = &park {
            if !self.offers_park(name) {
                debug!(park = %name, "Selected park is not in the current collection");
            }
        }
        *E::park_selection(&mut self.selection) = park;
    }

    pub fn reset_selection(&mut self) {
        self.selection = E::Selection::default();
    }

    /// Entities passing every selected facet, in collection order
    #[must_use]
    pub fn visible(&self) -> Vec<&E> {
        filter::apply(&self.collection, &self.selection, E::matches)
    }

    /// Records the entity as open in detail view, replacing any other.
    /// Unknown ids leave the view untouched.
    pub fn open_detail(&mut self, id: u64) -> Option<&E> {
        let position = self.collection.iter().position(|e| e.id() == id);
        match position {
            Some(index) => {
                self.open_id = Some(id);
                self.collection.get(index)
            }
            None => {
                debug!(id, kind = %E::KIND, "No entity with this id to open");
                None
            }
        }
    }

    pub fn close_detail(&mut self) {
        self.open_id = None;
    }

    #[must_use]
    pub fn open_entity(&self) -> Option<&E> {
        let id = self.open_id?;
        self.collection.iter().find(|e| e.id() == id)
    }
}

impl CollectionView<Attraction> {
    /// Whether any attraction carries the tag, compared case-insensitively
    #[must_use]
    pub fn offers_category(&self, tag: &str) -> bool {
        self.collection.iter().any(|a| a.has_tag(tag))
    }

    pub fn select_category(&mut self, category: Facet<String>) {
        if let Facet::Only(tag) = &category {
            if !self.offers_category(tag) {
                debug!(
                    category = %tag,
                    "Selected category is not in the current collection"
                );
            }
        }
        self.selection.category = category;
    }
}

impl CollectionView<Route> {
    pub fn select_difficulty(&mut self, difficulty: Facet<Difficulty>) {
        self.selection.difficulty = difficulty;
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A view whose fetch runs in the background.
///
/// Dropping the handle unmounts the view; a fetch still in flight then
/// finishes on its own and its result is discarded.
pub struct MountedView<E: CatalogEntity> {
    view: Arc<Mutex<CollectionView<E>>>,
    fetch: Option<JoinHandle<()>>,
}

impl<E: CatalogEntity> MountedView<E> {
    /// Mounts the view and starts its fetch. Must be called inside a Tokio runtime.
    pub fn mount<S>(source: Arc<S>, assets: AssetDefaults) -> Self
    where
        S: CatalogSource + ?Sized + 'static,
    {
        let mut view = CollectionView::new(assets);
        view.begin_fetch();
        let view = Arc::new(Mutex::new(view));
        let weak = Arc::downgrade(&view);

        let fetch = tokio::spawn(async move {
            let outcome = source.fetch(E::KIND).await;
            match weak.upgrade() {
                Some(view) => {
                    lock(&view).complete_fetch(outcome);
                }
                None => debug!(
                    kind = %E::KIND,
                    "View unmounted before fetch completed, discarding result"
                ),
            }
        });

        Self {
            view,
            fetch: Some(fetch),
        }
    }

    /// Waits for the fetch to settle the view
    pub async fn settled(&mut self) -> ViewState {
        if let Some(fetch) = self.fetch.take() {
            if let Err(e) = fetch.await {
                error!(kind = %E::KIND, "Fetch task aborted: {}", e);
                lock(&self.view).complete_fetch(Err(CatalogError::general(format!(
                    "fetch task aborted: {e}"
                ))));
            }
        }
        self.with(|view| view.state())
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut CollectionView<E>) -> R) -> R {
        f(&mut lock(&self.view))
    }

    /// Drops the view. The returned handle, if any, belongs to the fetch that
    /// was still running; awaiting it is optional.
    pub fn unmount(mut self) -> Option<JoinHandle<()>> {
        self.fetch.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AttractionFacets, EntityKind};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    enum Reply {
        Records(Vec<Value>),
        Status(u16),
    }

    struct ScriptedSource {
        reply: Reply,
        calls: AtomicUsize,
        gate: Option<Arc<Notify>>,
    }

    impl ScriptedSource {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
                gate: None,
            }
        }
    }

    #[async_trait]
    impl CatalogSource for ScriptedSource {
        async fn fetch(&self, kind: EntityKind) -> Result<Vec<Value>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            match &self.reply {
                Reply::Records(records) => Ok(records.clone()),
                Reply::Status(code) => Err(CatalogError::status(*code, format!("/{kind}"))),
            }
        }
    }

    fn attractions_json() -> Vec<Value> {
        vec![
            json!({
                "id": 1, "titulo": "Trilha guiada", "tags": ["Natureza"],
                "parque": {"id": 1, "nome": "Serra"}
            }),
            json!({
                "id": 2, "titulo": "Rapel", "tags": ["Aventura"],
                "parque": {"id": 1, "nome": "Serra"}
            }),
            json!({
                "id": 3, "titulo": "Praia", "tags": ["Natureza"],
                "parque": {"id": 2, "nome": "Mar"}
            }),
        ]
    }

    fn routes_json() -> Vec<Value> {
        vec![
            json!({
                "id": 10, "nome": "Cartão Postal", "dificuldade": 1,
                "parque": {"id": 1, "nome": "Serra"}
            }),
            json!({
                "id": 11, "nome": "Pedra do Sino", "dificuldade": 2, "dificuldade_nome": "Moderado",
                "parque": {"id": 1, "nome": "Serra"}
            }),
            json!({
                "id": 12, "nome": "Travessia", "dificuldade": 3,
                "parque": {"id": 2, "nome": "Mar"}
            }),
        ]
    }

    fn ids<E: CatalogEntity>(view: &CollectionView<E>) -> Vec<u64> {
        view.visible().iter().map(|e| e.id()).collect()
    }

    #[tokio::test]
    async fn test_mount_fetches_once_and_becomes_ready() {
        let source = ScriptedSource::new(Reply::Records(attractions_json()));
        let mut view = CollectionView::<Attraction>::new(AssetDefaults::default());
        assert_eq!(view.state(), ViewState::Loading);

        view.mount(&source).await;
        view.mount(&source).await;

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(view.state(), ViewState::Ready);
        assert_eq!(ids(&view), vec![1, 2, 3]);
        assert!(view.load_failure().is_none());
    }

    #[tokio::test]
    async fn test_failed_fetch_is_ready_empty() {
        let source = ScriptedSource::new(Reply::Status(500));
        let mut view = CollectionView::<Route>::new(AssetDefaults::default());
        view.mount(&source).await;

        assert_eq!(view.state(), ViewState::ReadyEmpty);
        assert!(view.visible().is_empty());
        assert!(view.load_failure().unwrap().contains("500"));
    }

    #[tokio::test]
    async fn test_empty_response_is_ready_empty_without_failure() {
        let source = ScriptedSource::new(Reply::Records(Vec::new()));
        let mut view = CollectionView::<Route>::new(AssetDefaults::default());
        view.mount(&source).await;

        assert_eq!(view.state(), ViewState::ReadyEmpty);
        assert!(view.load_failure().is_none());
    }

    #[tokio::test]
    async fn test_malformed_records_are_dropped() {
        let mut records = attractions_json();
        records.insert(1, json!({"id": 99}));
        let source = ScriptedSource::new(Reply::Records(records));
        let mut view = CollectionView::<Attraction>::new(AssetDefaults::default());
        view.mount(&source).await;

        assert_eq!(ids(&view), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_selection_filters_without_refetch() {
        let source = ScriptedSource::new(Reply::Records(attractions_json()));
        let mut view = CollectionView::<Attraction>::new(AssetDefaults::default());
        view.mount(&source).await;

        view.select_category(Facet::Only("Natureza".into()));
        assert_eq!(ids(&view), vec![1, 3]);

        view.select_park(Facet::Only("Serra".into()));
        assert_eq!(ids(&view), vec![1]);

        view.select_park(Facet::Only("Itatiaia".into()));
        assert!(view.visible().is_empty());

        view.reset_selection();
        assert_eq!(ids(&view), vec![1, 2, 3]);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_absent_facet_values_are_selectable() {
        let source = ScriptedSource::new(Reply::Records(attractions_json()));
        let mut view = CollectionView::<Attraction>::new(AssetDefaults::default());
        view.mount(&source).await;

        assert!(view.offers_category("natureza"));
        assert!(view.offers_park("Mar"));
        assert!(!view.offers_category("Gastronomia"));
        assert!(!view.offers_park("Itatiaia"));

        view.select_category(Facet::Only("Gastronomia".into()));
        assert!(view.visible().is_empty());
        assert_eq!(view.selection().category, Facet::Only("Gastronomia".to_string()));
    }

    #[tokio::test]
    async fn test_route_difficulty_selection() {
        let source = ScriptedSource::new(Reply::Records(routes_json()));
        let mut view = CollectionView::<Route>::new(AssetDefaults::default());
        view.mount(&source).await;

        view.select_difficulty(Facet::Only(Difficulty::Moderate));
        assert_eq!(ids(&view), vec![11]);

        view.select_difficulty(Facet::Only(Difficulty::Easy));
        assert_eq!(ids(&view), vec![10]);

        view.select_difficulty(Facet::All);
        view.select_park(Facet::Only("Mar".into()));
        assert_eq!(ids(&view), vec![12]);
    }

    #[tokio::test]
    async fn test_facets_not_recomputed_on_selection_change() {
        let source = ScriptedSource::new(Reply::Records(attractions_json()));
        let mut view = CollectionView::<Attraction>::new(AssetDefaults::default());
        view.mount(&source).await;

        let first: Arc<AttractionFacets> = view.facets();
        view.select_category(Facet::Only("Aventura".into()));
        view.select_park(Facet::Only("Mar".into()));
        let second = view.facets();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(view.facet_computations(), 1);
        assert_eq!(first.parks, vec!["Mar", "Serra"]);

        view.replace_collection(view.collection().to_vec());
        let third = view.facets();
        assert_eq!(view.facet_computations(), 2);
        assert_eq!(*first, *third);
    }

    #[tokio::test]
    async fn test_single_open_detail() {
        let source = ScriptedSource::new(Reply::Records(routes_json()));
        let mut view = CollectionView::<Route>::new(AssetDefaults::default());
        view.mount(&source).await;

        assert_eq!(view.open_detail(10).map(|r| r.id), Some(10));
        assert_eq!(view.open_detail(12).map(|r| r.id), Some(12));
        assert_eq!(view.open_entity().map(|r| r.id), Some(12));

        assert!(view.open_detail(404).is_none());
        assert_eq!(view.open_entity().map(|r| r.id), Some(12));

        view.close_detail();
        assert!(view.open_entity().is_none());
    }

    #[tokio::test]
    async fn test_replacing_collection_closes_vanished_detail() {
        let source = ScriptedSource::new(Reply::Records(routes_json()));
        let mut view = CollectionView::<Route>::new(AssetDefaults::default());
        view.mount(&source).await;
        view.open_detail(11);

        let kept: Vec<Route> = view.collection().iter().filter(|r| r.id != 11).cloned().collect();
        view.replace_collection(kept);
        assert!(view.open_entity().is_none());
    }

    #[tokio::test]
    async fn test_mounted_view_settles() {
        let source = Arc::new(ScriptedSource::new(Reply::Records(routes_json())));
        let mut mounted = MountedView::<Route>::mount(source.clone(), AssetDefaults::default());

        assert_eq!(mounted.settled().await, ViewState::Ready);
        assert_eq!(mounted.with(|view| view.collection().len()), 3);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unmount_before_fetch_completes_discards_result() {
        let gate = Arc::new(Notify::new());
        let mut source = ScriptedSource::new(Reply::Records(attractions_json()));
        source.gate = Some(gate.clone());
        let source = Arc::new(source);

        let mounted = MountedView::<Attraction>::mount(source.clone(), AssetDefaults::default());
        let in_flight = mounted.unmount().expect("fetch should still be running");

        gate.notify_one();
        in_flight.await.expect("late fetch result must not panic");
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }
}
