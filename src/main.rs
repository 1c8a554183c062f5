mod api;
mod app;
mod util;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Base URL of the entity backend
    #[arg(long, default_value = "http://localhost:8000")]
    api_base: String,

    /// Entity to look up immediately on startup
    #[arg(long)]
    query: Option<String>,
}

fn main() -> eframe::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "dbpedia-explorá",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::ExplorerApp::new(
                cc,
                args.api_base.clone(),
                args.query.clone(),
            )))
        }),
    )
}
