mod chart;
mod command;
mod report;
mod source;

fn main() -> anyhow::Result<()> {
    command::run()
}
