use clap::Args;

#[derive(Debug, Args)]
pub struct SlugArg {
    pub slug: String,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub slug: String,
    /// Print rendered HTML instead of the JSON document.
    #[arg(long, default_value_t = false)]
    pub html: bool,
}

#[derive(Debug, Args)]
pub struct TagArg {
    pub tag: String,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    #[arg(allow_hyphen_values = true)]
    pub query: String,
    #[arg(long, default_value_t = 20)]
    pub limit: usize,
}

#[derive(Debug, Args)]
pub struct WebArgs {
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,
    #[arg(long, default_value_t = 4321)]
    pub port: u16,
}
