fn main() -> anyhow::Result<()> {
    hiropac::cli::run_cli()
}
