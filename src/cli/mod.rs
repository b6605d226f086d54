mod commands;
mod context;
mod handlers;

pub use commands::{Cli, Commands};
pub use context::{find_project_root, AppContext, Store, PINNOTES_DIR};
pub use handlers::{
    handle_add, handle_compact, handle_edit, handle_get, handle_init, handle_list, handle_move,
    handle_pin, handle_remove,
};
