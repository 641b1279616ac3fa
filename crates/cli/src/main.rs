mod app;
mod args;
mod constants;
mod logger;
mod prompt;
mod render;
mod utils;

use app::App;

#[tokio::main]
async fn main() {
    let app = App::new();

    if !app.run().await {
        std::process::exit(1);
    }
}
