mod pagination;
mod state;

pub use pagination::{PageQuery, Paginated};
pub use state::AppState;
