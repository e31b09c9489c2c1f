#![forbid(unsafe_code)]

//! Page controllers and event dispatch for the Luxe marketing site.

pub mod action;
pub mod app;
pub mod buttons;
pub mod directory;
pub mod form;
pub mod modal;
pub mod nav;
pub mod theme;

pub use action::TimerAction;
pub use app::PageApp;
pub use buttons::ButtonController;
pub use directory::{ProjectDirectory, ProjectRecord};
pub use form::FormController;
pub use modal::{ModalController, ModalState};
pub use nav::NavController;
pub use theme::{MemoryStore, StoreError, ThemeController, ThemePreference, ThemeStore};
