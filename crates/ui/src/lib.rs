#![forbid(unsafe_code)]

pub mod app;
pub mod context;
pub mod routes;
pub mod views;
pub mod vm;

pub use app::App;
pub use context::{build_app_context, AppContext, UiApp};
