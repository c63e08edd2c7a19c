use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Weld defect inspection client", long_about = None)]
pub struct Args {
    /// Proxy route to submit images to (overrides INSPECT_PROXY_URL)
    #[arg(long, global = true)]
    pub proxy_url: Option<String>,

    /// Draw bounding boxes scaled to the display size
    #[arg(long, global = true)]
    pub overlay: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyse image files; each one replaces the previous result
    Upload {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Capture a still from a file-backed camera and analyse it
    Camera {
        /// Frame served by the front (user-facing) camera
        #[arg(long)]
        front: Option<PathBuf>,

        /// Frame served by the rear (environment-facing) camera
        #[arg(long)]
        rear: Option<PathBuf>,

        /// Behave like a phone: prefer the rear camera
        #[arg(long)]
        mobile: bool,

        /// Switch facing mode once before capturing
        #[arg(long)]
        switch: bool,
    },
}
