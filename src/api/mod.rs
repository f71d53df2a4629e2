mod handlers;
#[cfg(test)]
mod tests;

pub use handlers::{create_router, AppState};
