use carteira::cli::{Cli, Commands};
use clap::Parser;
use miette::Result;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    match cli.command {
        Commands::Register(args) => carteira::cli::commands::register::run(args, &global),
        Commands::Login(args) => carteira::cli::commands::login::run(args, &global),
        Commands::Logout => carteira::cli::commands::logout::run(&global),
        Commands::Status(args) => carteira::cli::commands::status::run(args, &global),
        Commands::Countries(args) => carteira::cli::commands::countries::run(args, &global),
        Commands::Check(args) => carteira::cli::commands::check::run(args, &global),
        Commands::Completions(args) => carteira::cli::commands::completions::run(args),
    }
}
