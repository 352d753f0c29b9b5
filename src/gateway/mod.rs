pub mod page;
pub mod server;

pub use server::{AppState, build_router, handle_chat, run, serve};
