fn main() -> anyhow::Result<()> {
    env_logger::init();
    serialist::repl::start()
}
