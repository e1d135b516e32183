//! View/state controller
//!
//! Owns everything the page would keep in globals (session tag, current
//! view, loaded collections) and changes it only through [`Controller::dispatch`].
//!
//! # Views
//! - `Login`: identifier entry; Submit (or Enter) runs the access gate
//! - `Catalog`: document list; Open moves to the viewer, Logout returns
//! - `Viewer`: one document; Back returns to the list, Logout returns
//!
//! The help overlay is independent of the three views.
//!
//! Dispatch takes `&mut self`, so an action (including its awaited fetch)
//! finishes before the next one starts.

use crate::catalog::CatalogView;
use crate::config::ViewerConfig;
use crate::error::{ControllerError, StateMachineError};
use crate::gate::AccessGate;
use crate::loader::{ResourceFetcher, Resources};
use crate::notice::Notice;
use crate::state_machine::validate_transition;
use crate::types::{CatalogEntry, SessionTag, View};
use crate::viewer::{DocumentViewer, ViewerContent, ViewerPane};

/// Keys the identifier input reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Submits the identifier
    Enter,
    /// Anything else
    Other,
}

/// Everything a user can do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Replace the identifier input contents
    Input(String),
    /// Access button
    Submit,
    /// Key released in the identifier input
    KeyUp(Key),
    /// Open control of the catalog row at this index
    Open(usize),
    /// Back from the viewer
    Back,
    /// Logout from the catalog or viewer
    Logout,
    /// Help button
    ShowHelp,
    /// Help overlay close button
    CloseHelp,
}

/// Receives the UI state at every render point
pub trait StateObserver: Send {
    /// Called after a change becomes visible
    fn on_state(&mut self, state: &UiState);
}

/// Everything visible on screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    view: View,
    help_visible: bool,
    input: String,
    session: Option<SessionTag>,
    notice: Option<Notice>,
    catalog: Option<CatalogView>,
    viewer: ViewerPane,
}

impl UiState {
    /// Visible view
    #[inline]
    #[must_use]
    pub fn view(&self) -> View {
        self.view
    }

    /// Help overlay shown
    #[inline]
    #[must_use]
    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    /// `aria-hidden` value of the help overlay
    #[inline]
    #[must_use]
    pub fn help_aria_hidden(&self) -> bool {
        !self.help_visible
    }

    /// Identifier input contents
    #[inline]
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Active session tag
    #[inline]
    #[must_use]
    pub fn session(&self) -> Option<&SessionTag> {
        self.session.as_ref()
    }

    /// Gate notice, while it is still visible
    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref().filter(|notice| notice.is_visible())
    }

    /// Catalog listing; built when access is granted
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> Option<&CatalogView> {
        self.catalog.as_ref()
    }

    /// Viewer pane
    #[inline]
    #[must_use]
    pub fn viewer(&self) -> &ViewerPane {
        &self.viewer
    }
}

/// The single owner of UI state
pub struct Controller<F> {
    fetcher: F,
    config: ViewerConfig,
    gate: AccessGate,
    documents: Vec<CatalogEntry>,
    state: UiState,
    observers: Vec<Box<dyn StateObserver>>,
}

impl<F: ResourceFetcher> Controller<F> {
    /// Create controller over already loaded resources
    #[must_use]
    pub fn new(fetcher: F, config: ViewerConfig, resources: Resources) -> Self {
        Self {
            fetcher,
            config,
            gate: AccessGate::new(resources.allow_list),
            documents: resources.catalog,
            state: UiState::default(),
            observers: Vec::new(),
        }
    }

    /// Load startup resources, then create the controller
    ///
    /// Load failures leave empty collections behind; see [`Resources::load`].
    pub async fn bootstrap(fetcher: F, config: ViewerConfig) -> Self {
        let resources = Resources::load(&fetcher, &config).await;
        Self::new(fetcher, config, resources)
    }

    /// Register an observer
    #[must_use]
    pub fn with_observer(mut self, observer: impl StateObserver + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Current UI state
    #[inline]
    #[must_use]
    pub fn state(&self) -> &UiState {
        &self.state
    }

    /// Loaded catalog
    #[inline]
    #[must_use]
    pub fn documents(&self) -> &[CatalogEntry] {
        &self.documents
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Show the current state to every observer
    pub fn render(&mut self) {
        self.notify();
    }

    /// Apply one action
    ///
    /// An action that is not available in the current view returns an error
    /// and leaves the state untouched.
    pub async fn dispatch(&mut self, action: Action) -> Result<(), ControllerError> {
        tracing::debug!("Dispatching {:?} in {:?}", action, self.state.view);

        match action {
            Action::Input(text) => self.state.input = text,
            Action::Submit => self.submit()?,
            Action::KeyUp(Key::Enter) if self.state.view == View::Login => self.submit()?,
            Action::KeyUp(_) => {}
            Action::Open(index) => self.open(index).await?,
            Action::Back => self.back()?,
            Action::Logout => self.logout()?,
            Action::ShowHelp => self.state.help_visible = true,
            Action::CloseHelp => self.state.help_visible = false,
        }

        self.notify();
        Ok(())
    }

    fn submit(&mut self) -> Result<(), ControllerError> {
        self.require(&[View::Login], View::Catalog)?;

        match self.gate.check(&self.state.input) {
            Ok(tag) => {
                tracing::info!("Access granted");
                self.state.session = Some(tag);
                self.state.catalog = Some(CatalogView::build(&self.documents));
                self.state.view = View::Catalog;
            }
            Err(rejection) => {
                tracing::info!("Access refused: {:?}", rejection);
                self.state.notice = Some(Notice::show(rejection.message(), self.config.notice_ttl()));
            }
        }
        Ok(())
    }

    async fn open(&mut self, index: usize) -> Result<(), ControllerError> {
        self.require(&[View::Catalog], View::Viewer)?;
        let entry = self
            .documents
            .get(index)
            .cloned()
            .ok_or(ControllerError::UnknownDocument(index))?;

        tracing::info!("Opening {}", entry.filename);
        self.state.view = View::Viewer;
        self.state.viewer = ViewerPane::loading(&entry);
        self.notify();

        let content = DocumentViewer::new(&self.fetcher, &self.config)
            .load(&entry, self.state.session.as_ref())
            .await;

        self.state.viewer.content_focused = matches!(content, ViewerContent::Rendered(_));
        self.state.viewer.content = content;
        Ok(())
    }

    fn back(&mut self) -> Result<(), ControllerError> {
        self.require(&[View::Viewer], View::Catalog)?;
        self.state.viewer = ViewerPane::default();
        self.state.view = View::Catalog;
        Ok(())
    }

    fn logout(&mut self) -> Result<(), ControllerError> {
        self.require(&[View::Catalog, View::Viewer], View::Login)?;
        tracing::info!("Logged out");
        self.state.session = None;
        self.state.input.clear();
        self.state.viewer = ViewerPane::default();
        self.state.view = View::Login;
        Ok(())
    }

    /// The action is only offered in `legal_from`, and must be a valid move
    fn require(&self, legal_from: &[View], to: View) -> Result<(), StateMachineError> {
        let from = self.state.view;
        if legal_from.contains(&from) {
            validate_transition(from, to)
        } else {
            Err(StateMachineError::IllegalTransition { from, to })
        }
    }

    fn notify(&mut self) {
        for observer in &mut self.observers {
            observer.on_state(&self.state);
        }
    }
}

impl<F> std::fmt::Debug for Controller<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("config", &self.config)
            .field("gate", &self.gate)
            .field("documents", &self.documents.len())
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::loader::FetchResponse;
    use crate::types::AllowList;
    use async_trait::async_trait;

    struct NotFound;

    #[async_trait]
    impl ResourceFetcher for NotFound {
        async fn fetch(&self, _path: &str) -> Result<FetchResponse, FetchError> {
            Ok(FetchResponse::status(404))
        }
    }

    fn controller() -> Controller<NotFound> {
        let resources = Resources {
            allow_list: AllowList::new(["SN-100"]),
            catalog: vec![CatalogEntry::new("Doc A", "a.html")],
        };
        Controller::new(NotFound, ViewerConfig::new(), resources)
    }

    async fn signed_in() -> Controller<NotFound> {
        let mut c = controller();
        c.dispatch(Action::Input("SN-100".into())).await.unwrap();
        c.dispatch(Action::Submit).await.unwrap();
        c
    }

    #[test]
    fn starts_at_login_with_help_hidden() {
        let c = controller();
        assert_eq!(c.state().view(), View::Login);
        assert!(!c.state().help_visible());
        assert!(c.state().help_aria_hidden());
        assert!(c.state().session().is_none());
    }

    #[tokio::test]
    async fn enter_key_submits_only_at_login() {
        let mut c = controller();
        c.dispatch(Action::Input("SN-100".into())).await.unwrap();
        c.dispatch(Action::KeyUp(Key::Other)).await.unwrap();
        assert_eq!(c.state().view(), View::Login);

        c.dispatch(Action::KeyUp(Key::Enter)).await.unwrap();
        assert_eq!(c.state().view(), View::Catalog);

        c.dispatch(Action::KeyUp(Key::Enter)).await.unwrap();
        assert_eq!(c.state().view(), View::Catalog);
    }

    #[tokio::test]
    async fn actions_outside_their_view_are_rejected() {
        let mut c = controller();
        assert!(c.dispatch(Action::Back).await.is_err());
        assert!(c.dispatch(Action::Logout).await.is_err());
        assert!(c.dispatch(Action::Open(0)).await.is_err());
        assert_eq!(c.state().view(), View::Login);

        let mut c = signed_in().await;
        assert!(c.dispatch(Action::Submit).await.is_err());
        assert!(c.dispatch(Action::Back).await.is_err());
        assert_eq!(c.state().view(), View::Catalog);
    }

    #[tokio::test]
    async fn unknown_index_keeps_catalog() {
        let mut c = signed_in().await;
        assert_eq!(
            c.dispatch(Action::Open(7)).await,
            Err(ControllerError::UnknownDocument(7))
        );
        assert_eq!(c.state().view(), View::Catalog);
    }

    #[tokio::test]
    async fn help_toggles_without_changing_view() {
        let mut c = signed_in().await;
        c.dispatch(Action::ShowHelp).await.unwrap();
        assert!(c.state().help_visible());
        assert_eq!(c.state().view(), View::Catalog);

        c.dispatch(Action::CloseHelp).await.unwrap();
        assert!(!c.state().help_visible());
        assert_eq!(c.state().view(), View::Catalog);
    }

    #[tokio::test]
    async fn failed_fetch_does_not_focus_content() {
        let mut c = signed_in().await;
        c.dispatch(Action::Open(0)).await.unwrap();
        assert_eq!(c.state().viewer().content, ViewerContent::Failed { status: 404 });
        assert!(!c.state().viewer().content_focused);
        assert_eq!(c.state().viewer().title, "Doc A");
    }
}
