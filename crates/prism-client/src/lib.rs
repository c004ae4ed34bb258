pub mod client;
pub mod controller;
pub mod error;
pub mod flow;
pub mod render;

pub use client::ProxyClient;
pub use controller::SearchController;
pub use error::ClientError;
pub use flow::{SearchFlow, SearchState, SearchTicket};
pub use render::{savings_badge, RenderModel};
