use crate::config::Settings;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) settings: Settings,
}
