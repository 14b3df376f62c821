pub mod args;
pub mod error;
pub mod etcd;
pub mod routes;
pub mod settings;
pub mod sync;
pub mod topology;

pub use error::{SidecarError, SidecarResult};
pub use etcd::EtcdClient;
pub use routes::{setup_routes, AppState};
pub use settings::Settings;
