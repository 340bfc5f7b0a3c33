fn main() -> anyhow::Result<()> {
    anki_to_pleco::run()
}
