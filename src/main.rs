use clap::Parser;
use pinnotes::cli::{
    handle_add, handle_compact, handle_edit, handle_get, handle_init, handle_list, handle_move,
    handle_pin, handle_remove, AppContext, Cli, Commands,
};
use pinnotes::{logging, Result};

fn with_context(run: impl FnOnce(&mut AppContext) -> Result<()>) -> Result<()> {
    let mut ctx = AppContext::discover()?;
    run(&mut ctx)
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Init { sqlite } => handle_init(sqlite),
        Commands::Add {
            title,
            content,
            stdin,
            remind,
            json,
        } => with_context(|ctx| handle_add(ctx, title, content, stdin, remind, json)),
        Commands::List { json } => with_context(|ctx| handle_list(ctx, json)),
        Commands::Get { id, json } => with_context(|ctx| handle_get(ctx, id, json)),
        Commands::Edit {
            id,
            title,
            content,
            stdin,
            remind,
            clear_reminder,
            json,
        } => with_context(|ctx| {
            handle_edit(ctx, id, title, content, stdin, remind, clear_reminder, json)
        }),
        Commands::Remove { id, force } => with_context(|ctx| handle_remove(ctx, id, force)),
        Commands::Move { id, position } => with_context(|ctx| handle_move(ctx, id, position)),
        Commands::Pin { id } => with_context(|ctx| handle_pin(ctx, id)),
        Commands::Compact => with_context(handle_compact),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
