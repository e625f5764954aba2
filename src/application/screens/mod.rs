pub mod controller;
pub mod stock;

pub use controller::{FormState, ScreenController, ScreenState};
pub use stock::StockScreen;
