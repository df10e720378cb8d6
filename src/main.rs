use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = renamer::cli::parse();
    app::run(args)
}
