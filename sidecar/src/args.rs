use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct SidecarArgs {
    /// Optional settings file, layered under the environment
    #[arg(short, long)]
    pub config_file: Option<String>,

    #[arg(short, long, default_value_t = false)]
    pub pretty: bool,

    /// Address to serve the dashboard on
    #[arg(short, long)]
    pub listen: Option<SocketAddr>,

    /// Directory with the wasm bundle and other static assets
    #[arg(long)]
    pub static_dir: Option<PathBuf>,

    /// Periodically delete node keys whose subnet lease is gone
    #[arg(long, default_value_t = false)]
    pub sync_orphans: bool,
}
