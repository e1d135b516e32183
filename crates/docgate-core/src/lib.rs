//! docgate Core - service-number gated document viewer
//!
//! The DOM-free heart of the viewer:
//! - Loads the allow-list and document catalog at startup
//! - Gates access on exact allow-list membership
//! - Builds the catalog listing
//! - Fetches, unwraps and script-strips documents for inline display
//! - Drives the login/catalog/viewer state machine through a single dispatch
//!
//! # Example
//!
//! ```rust,ignore
//! use docgate_core::prelude::*;
//!
//! # async fn example(fetcher: impl ResourceFetcher) -> Result<(), Box<dyn std::error::Error>> {
//! let mut controller = Controller::bootstrap(fetcher, ViewerConfig::new()).await;
//!
//! controller.dispatch(Action::Input(" SN-100 ".into())).await?;
//! controller.dispatch(Action::KeyUp(Key::Enter)).await?;
//! controller.dispatch(Action::Open(0)).await?;
//!
//! println!("{}", controller.state().viewer().to_html());
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

// Core modules
pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod gate;
pub mod loader;
pub mod notice;
pub mod sanitize;
pub mod state_machine;
pub mod types;
pub mod viewer;

// Re-exports for convenience
pub use catalog::{CatalogRow, CatalogView, NO_DOCUMENTS};
pub use config::ViewerConfig;
pub use controller::{Action, Controller, Key, StateObserver, UiState};
pub use error::{ConfigError, ControllerError, FetchError, LoadError, StateMachineError};
pub use gate::{AccessGate, GateRejection};
pub use loader::{load_json, FetchResponse, ResourceFetcher, Resources};
pub use notice::Notice;
pub use types::{AllowList, CatalogEntry, SessionTag, View};
pub use viewer::{DocumentViewer, RenderedDocument, ViewerContent, ViewerPane, Watermark};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving a docgate controller
    pub use crate::{
        Action, CatalogEntry, Controller, Key, ResourceFetcher, SessionTag, StateObserver,
        UiState, View, ViewerConfig, ViewerContent,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
