//! Commands shipped with the console bot.

use slirc_cmd::{ArgType, CommandEntry, Context, HandlerError, HandlerResult, HandlerTable};

fn ping(ctx: &Context<'_>, _args: &[String]) -> HandlerResult {
    ctx.reply(&format!("{}: pong", ctx.nick()));
    Ok(())
}

fn echo(ctx: &Context<'_>, args: &[String]) -> HandlerResult {
    let text = args.first().map(String::as_str).unwrap_or_default();
    if text.is_empty() {
        return Err(HandlerError::NeedMoreParams);
    }
    ctx.reply(text);
    Ok(())
}

fn help(ctx: &Context<'_>, _args: &[String]) -> HandlerResult {
    for line in ctx.dispatcher.help_lines() {
        ctx.reply_notice(&line);
    }
    Ok(())
}

fn stats(ctx: &Context<'_>, _args: &[String]) -> HandlerResult {
    let stats = ctx.dispatcher.command_stats();
    if stats.is_empty() {
        ctx.reply("No commands run yet");
        return Ok(());
    }
    let summary = stats
        .iter()
        .map(|(id, count)| format!("{id}={count}"))
        .collect::<Vec<_>>()
        .join(" ");
    ctx.reply(&summary);
    Ok(())
}

/// Handler keys for manifests.
pub fn handler_table() -> HandlerTable {
    let mut table = HandlerTable::new();
    table.insert("ping", ping);
    table.insert("echo", echo);
    table.insert("help", help);
    table.insert("stats", stats);
    table
}

/// Entries registered when no manifest directory is configured.
pub fn default_commands() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("ping", ping).description("Answer with pong"),
        CommandEntry::new("echo", echo)
            .arg_type(ArgType::One)
            .description("Repeat the rest of the line"),
        CommandEntry::new("help", help).description("List commands"),
        CommandEntry::new("stats", stats).description("Show command usage counts"),
    ]
}
