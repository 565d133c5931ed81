//! Interactive chat session.
//!
//! A rustyline REPL over the conversation store. Plain input sends a
//! message; slash commands manage the conversation list.

use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use regdash_core::services::{ConversationError, ConversationStore};

use crate::bootstrap::CliContext;
use crate::presentation::format_relative_time;

/// Run the chat REPL.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    let Some(user) = ctx.users.current_user() else {
        println!("No user is signed in. Try `regdash user switch <username>`.");
        return Ok(());
    };

    println!("AI chat - {}", ctx.users.display_info());
    if !ctx.users.can_use_ai() {
        println!(
            "Note: {} does not have AI access; sending will be rejected.",
            user.display_name
        );
    }
    println!("Commands: /new /list /select <n> /delete <n> /user <username> /quit");
    print_thread_list(ctx).await;

    let mut editor = DefaultEditor::new()?;
    loop {
        match editor.readline("you> ") {
            Ok(line) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(&line);

                if let Some(command) = line.strip_prefix('/') {
                    if !run_command(ctx, &mut editor, command).await? {
                        break;
                    }
                } else {
                    send(ctx, &line).await;
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

/// Handle a slash command. Returns false when the session should end.
async fn run_command(ctx: &CliContext, editor: &mut DefaultEditor, command: &str) -> Result<bool> {
    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("quit" | "q"), _) => return Ok(false),
        (Some("new"), _) => match ctx.conversations.new_conversation().await {
            Ok(_) => println!("Started a new conversation."),
            Err(err) => println!("{err}"),
        },
        (Some("list"), _) => print_thread_list(ctx).await,
        (Some("select"), Some(index)) => match resolve_index(ctx, index).await {
            Some(id) => match ctx.conversations.select_conversation(&id).await {
                Ok(()) => print_active_thread(ctx).await,
                Err(err) => println!("{err}"),
            },
            None => println!("No conversation #{index}."),
        },
        (Some("delete"), Some(index)) => match resolve_index(ctx, index).await {
            Some(id) => delete_with_confirmation(ctx, editor, &id).await,
            None => println!("No conversation #{index}."),
        },
        (Some("user"), Some(username)) => {
            match ctx.users.switch_user_by_username(username).await {
                Ok(user) => {
                    ctx.conversations.refresh().await;
                    println!("Signed in as {} ({})", user.display_name, user.role);
                    print_thread_list(ctx).await;
                }
                Err(err) => println!("{err}"),
            }
        }
        _ => println!("Commands: /new /list /select <n> /delete <n> /user <username> /quit"),
    }
    Ok(true)
}

async fn send(ctx: &CliContext, text: &str) {
    println!("...");
    match ctx.conversations.send_message(text).await {
        Ok(Some(exchange)) => {
            let tag = exchange
                .reply
                .model
                .as_deref()
                .map_or_else(String::new, |m| format!(" [{m}]"));
            println!(
                "{}{tag}> {}",
                exchange.reply.role, exchange.reply.content
            );
        }
        Ok(None) => println!("(no reply)"),
        Err(err @ ConversationError::AiAccessDenied) => println!("{err}"),
        Err(err) => println!("Could not send the message: {err}"),
    }
}

async fn delete_with_confirmation(ctx: &CliContext, editor: &mut DefaultEditor, id: &str) {
    let title = ctx
        .conversations
        .conversations()
        .await
        .iter()
        .find(|c| c.id == id)
        .map_or_else(|| id.to_string(), |c| c.title.clone());

    let prompt = format!("Delete conversation \"{title}\"? [y/N] ");
    let confirmed = editor
        .readline(&prompt)
        .map(|answer| matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
        .unwrap_or(false);
    if !confirmed {
        println!("Kept \"{title}\".");
        return;
    }

    match ctx.conversations.delete_conversation(id).await {
        Ok(()) => println!("Deleted \"{title}\"."),
        Err(err) => println!("{err}"),
    }
}

/// Resolve a 1-based list index to a conversation id.
async fn resolve_index(ctx: &CliContext, index: &str) -> Option<String> {
    let position: usize = index.parse().ok()?;
    let list = ctx.conversations.conversations().await;
    list.get(position.checked_sub(1)?).map(|c| c.id.clone())
}

async fn print_thread_list(ctx: &CliContext) {
    let list = ctx.conversations.conversations().await;
    if list.is_empty() {
        println!("No conversations yet. Type a message to start one.");
        return;
    }

    let active_id = ctx.conversations.active_conversation().await.map(|c| c.id);
    for (position, conversation) in list.iter().enumerate() {
        let marker = if active_id.as_deref() == Some(conversation.id.as_str()) {
            "*"
        } else {
            " "
        };
        println!(
            " {marker} {:>2}. {:<53} {:<12} {}",
            position + 1,
            conversation.title,
            format_relative_time(conversation.updated_at),
            ConversationStore::preview(conversation)
        );
    }
}

async fn print_active_thread(ctx: &CliContext) {
    let Some(conversation) = ctx.conversations.active_conversation().await else {
        return;
    };
    println!("-- {} --", conversation.title);
    for message in &conversation.messages {
        println!(
            "[{}] {}> {}",
            format_relative_time(message.timestamp),
            message.role,
            message.content
        );
    }
}
