fn main() -> anyhow::Result<()> {
    getjson::cli::run_cli()
}
