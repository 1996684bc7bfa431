mod command;
mod ingest;
mod logging;
mod report;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
