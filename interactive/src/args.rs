use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
pub struct Args {
    /// Path to scene json5 file, the built-in scene is used when omitted
    #[arg()]
    pub scene: Option<PathBuf>,
    /// Directory with `<Name>.vertex` / `<Name>.fragment` shader sources
    #[arg(long)]
    pub shaders: Option<PathBuf>,
    /// Width of the window
    #[arg(long, default_value_t = 1280)]
    pub width: u32,
    /// Height of the window
    #[arg(long, default_value_t = 720)]
    pub height: u32,
    /// Checkerboard cells along X, overrides the scene
    #[arg(long)]
    pub grid_x: Option<u32>,
    /// Checkerboard cells along Z, overrides the scene
    #[arg(long)]
    pub grid_y: Option<u32>,
    /// Checkerboard cell size, overrides the scene
    #[arg(long)]
    pub cell_size: Option<f32>,
    /// Log filter in `RUST_LOG` syntax
    #[arg(long)]
    pub log: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["deepimage-viewer"]).unwrap();

        assert!(args.scene.is_none());
        assert_eq!((args.width, args.height), (1280, 720));
        assert!(args.grid_x.is_none());
    }

    #[test]
    fn overrides() {
        let args = Args::try_parse_from([
            "deepimage-viewer",
            "scene.json5",
            "--shaders",
            "res/shaders",
            "--grid-x",
            "32",
            "--cell-size",
            "0.5",
        ])
        .unwrap();

        assert_eq!(args.scene, Some(PathBuf::from("scene.json5")));
        assert_eq!(args.shaders, Some(PathBuf::from("res/shaders")));
        assert_eq!(args.grid_x, Some(32));
        assert_eq!(args.cell_size, Some(0.5));
    }
}
