use talksheet::{Renderer, RendererConfig};

fn main() {
    env_logger::init();

    let mut config = RendererConfig::default();
    config.output_dir = std::env::current_dir().expect("can read cwd");
    let renderer = Renderer::with_config(config);

    let body = format!(
        "HAZARDS\n{}\n\nSTAY ALERT\n{}\n\nREPORTING\n{}",
        lipsum::lipsum(60),
        lipsum::lipsum(120),
        lipsum::lipsum(200),
    );

    let artifact = renderer
        .render("Working at Heights", Some(&body))
        .expect("render succeeds");
    println!("wrote {}", artifact.path.display());
}
