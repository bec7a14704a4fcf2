use std::sync::Arc;

use nd_store::FileStore;

pub struct AppState {
    pub store: Arc<FileStore>,
}
