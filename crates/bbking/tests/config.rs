use std::fs;

use bbking::{CompilationError, Config, ConfigError, Engine, Error};
use tempfile::TempDir;

fn project(config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("overrides/tags")).unwrap();
    fs::write(
        temp.path().join("overrides/tags/quote.html"),
        "<q>{{ contents }}</q>",
    )
    .unwrap();
    fs::write(temp.path().join("bbking.yaml"), config).unwrap();
    temp
}

#[test]
fn engine_from_config_file() {
    let temp = project("tag_libraries: [text, quote]\ntemplate_dirs: [overrides]\n");
    let config = Config::from_file(temp.path().join("bbking.yaml")).unwrap();
    let engine = Engine::from_config(&config).unwrap();

    assert_eq!(
        engine.render("[quote][b]hi[/b][/quote]").unwrap(),
        "<q><strong>hi</strong></q>"
    );
    assert!(matches!(
        engine.render("[url]x[/url]"),
        Err(Error::Compilation(CompilationError::TagNotFound { .. }))
    ));
}

#[test]
fn unknown_library_surfaces_on_first_compile() {
    let config = Config::from_yaml("tag_libraries: [text, emoji]").unwrap();
    let engine = Engine::from_config(&config).unwrap();

    assert_eq!(
        engine.compile("[b]x[/b]").unwrap_err(),
        CompilationError::LibraryNotFound {
            name: "emoji".to_string()
        }
    );
}

#[test]
fn missing_template_dir_in_config() {
    let temp = project("template_dirs: [nowhere]\n");
    let config = Config::from_file(temp.path().join("bbking.yaml")).unwrap();
    assert!(matches!(
        Engine::from_config(&config),
        Err(ConfigError::TemplateDir(path)) if path.ends_with("nowhere")
    ));
}
