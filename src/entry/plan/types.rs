use std::path::PathBuf;

use landslide_rest::http::ClientConfig;

pub(in crate::entry) enum Action {
    List,
    Run(String),
    /// Convenience login with the default credentials.
    Login { username: String, password: String },
    Idle,
}

pub(in crate::entry) struct RunPlan {
    pub(super) collection: PathBuf,
    pub(super) client: ClientConfig,
    pub(super) vars: Vec<(String, String)>,
    pub(super) action: Action,
}
