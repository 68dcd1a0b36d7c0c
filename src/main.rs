use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = photo_by_date::cli::parse();
    app::run(args)
}
