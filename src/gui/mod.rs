//! GUI module for the DocDesk egui frontend
//!
//! This module contains all UI components for the native desktop application.

pub mod app;
pub mod controller;
pub mod state;
pub mod views;
pub mod widgets;

pub use app::DocDeskApp;
pub use controller::UploadSearch;
pub use state::{Banner, BannerKind, PanelState, Slot, View};
