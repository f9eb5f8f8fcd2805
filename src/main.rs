fn main() {
    #[cfg(feature = "cli")]
    varpack::cli::run();

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("varpack: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(1);
    }
}
