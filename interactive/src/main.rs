use clap::Parser;

use gl_wrapper::shaders::ShaderSource;

mod app;
mod args;
mod logging;
mod scene;
mod scene_loader;

use app::App;
use args::Args;
use logging::init_logging;
use scene::GridOverrides;
use scene_loader::{SceneLoader, DEFAULT_SCENE};

fn main() {
    // clion needs help in trait annotation
    let args = <Args as Parser>::parse();

    init_logging(args.log.as_deref());

    let scene = match &args.scene {
        Some(path) => SceneLoader::load_from_path(path),
        None => SceneLoader::load_from_str(DEFAULT_SCENE),
    };

    let mut scene = match scene {
        Ok(v) => v,
        Err(e) => {
            log::error!("Could not read scene description: {e}");
            std::process::exit(-1);
        }
    };

    let overrides = GridOverrides::from_args(&args);
    overrides.apply(&mut scene);

    let shader_source = match args.shaders {
        Some(dir) => ShaderSource::Directory(dir),
        None => ShaderSource::Embedded,
    };

    let app = match App::new(args.width, args.height, scene, shader_source, overrides) {
        Ok(app) => app,
        Err(e) => {
            log::error!("Could not start viewer: {e}");
            std::process::exit(-1);
        }
    };

    app.run();
}
