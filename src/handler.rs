//! Routing layer between the Telegram connector and command code: a typed
//! `Command` over the slash-command word, the callback family router, and
//! the single place replies are actually sent.

use std::str::FromStr;
use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::{ChatId, InputFile, MessageId, ParseMode};

use crate::commands;
use crate::gateway::QueryKind;
use crate::interactions::{self, ids};
use crate::model::AppState;
use crate::ui::format::Reply;

enum Command {
    Start,
    Register,
    SetUid,
    SetCookies,
    Daily,
    Abyss,
    Diary,
    Characters,
    Profile,
    DailyRewards,
    Card,
    Unknown,
}

impl FromStr for Command {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" | "help" => Ok(Command::Start),
            "register" => Ok(Command::Register),
            "setuid" => Ok(Command::SetUid),
            "setcookies" => Ok(Command::SetCookies),
            "daily" | "resin" => Ok(Command::Daily),
            "abyss" => Ok(Command::Abyss),
            "diary" | "resources_diary" => Ok(Command::Diary),
            "characters" | "chars" => Ok(Command::Characters),
            "profile" | "p" => Ok(Command::Profile),
            "daily_rewards" | "rewards" => Ok(Command::DailyRewards),
            "card" => Ok(Command::Card),
            _ => Ok(Command::Unknown),
        }
    }
}

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    if user.is_bot {
        return Ok(());
    }
    let Some(body) = msg.text() else {
        return Ok(());
    };
    let user_id = user.id.0;

    let reply = if let Some(command_body) = body.strip_prefix('/') {
        let mut parts = command_body.split_whitespace();
        let Some(word) = parts.next() else {
            return Ok(());
        };
        // Group chats suffix the bot name onto the command word.
        let word = word.split('@').next().unwrap_or(word);
        let args: Vec<&str> = parts.collect();
        let command = Command::from_str(word).unwrap_or(Command::Unknown);
        match command {
            Command::Start => commands::start::run(),
            Command::Register => commands::register::start(&state, user_id).await,
            Command::SetUid => commands::setuid::run(&state, user_id, &args).await,
            Command::SetCookies => commands::setcookies::run(&state, user_id, &args).await,
            Command::Daily => {
                commands::data::run(&state, user_id, QueryKind::Notes, "/daily").await
            }
            Command::Abyss => {
                let previous = args.first().is_some_and(|a| a.eq_ignore_ascii_case("prev"));
                commands::data::run(&state, user_id, QueryKind::Abyss { previous }, "/abyss").await
            }
            Command::Diary => {
                commands::data::run(&state, user_id, QueryKind::DiarySummary, "/diary").await
            }
            Command::Characters => {
                commands::data::run(&state, user_id, QueryKind::Characters, "/characters").await
            }
            Command::Profile => {
                commands::data::run(&state, user_id, QueryKind::Profile, "/profile").await
            }
            Command::DailyRewards => {
                commands::data::run(&state, user_id, QueryKind::RewardStatus, "/daily_rewards")
                    .await
            }
            Command::Card => commands::card::run(&state, user_id, &args).await,
            Command::Unknown => return Ok(()),
        }
    } else {
        // Plain text only matters to a registration conversation in flight.
        match commands::register::handle_input(&state, user_id, body).await {
            Some(reply) => reply,
            None => return Ok(()),
        }
    };

    send_reply(&bot, msg.chat.id, reply).await
}

pub async fn callback_handler(
    bot: Bot,
    query: CallbackQuery,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    bot.answer_callback_query(&query.id).await?;
    let Some(data) = query.data.as_deref() else {
        return Ok(());
    };
    let user_id = query.from.id.0;

    let reply = match data {
        ids::CLAIM_DAILY | ids::VIEW_CLAIMED => {
            interactions::rewards_handler::handle(&state, user_id, data).await
        }
        ids::ABYSS_PREVIOUS | ids::ABYSS_CURRENT => {
            interactions::abyss_handler::handle(&state, user_id, data).await
        }
        other if ids::is_resource(other) => {
            match interactions::resources_handler::handle(&state, user_id, other).await {
                Some(reply) => reply,
                None => return Ok(()),
            }
        }
        _ => return Ok(()),
    };

    // Button flows edit the originating message in place.
    if let Some(message) = query.message.as_ref() {
        edit_reply(&bot, message.chat().id, message.id(), reply).await?;
    }
    Ok(())
}

async fn send_reply(bot: &Bot, chat_id: ChatId, reply: Reply) -> ResponseResult<()> {
    if let Some(photo) = reply.photo {
        let mut request = bot
            .send_photo(chat_id, InputFile::memory(photo.png).file_name("card.png"))
            .caption(reply.text);
        if reply.markdown {
            request = request.parse_mode(ParseMode::MarkdownV2);
        }
        request.await?;
        return Ok(());
    }
    let mut request = bot.send_message(chat_id, reply.text);
    if reply.markdown {
        request = request.parse_mode(ParseMode::MarkdownV2);
    }
    if let Some(keyboard) = reply.keyboard {
        request = request.reply_markup(keyboard);
    }
    request.await?;
    Ok(())
}

async fn edit_reply(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    reply: Reply,
) -> ResponseResult<()> {
    let mut request = bot.edit_message_text(chat_id, message_id, reply.text);
    if reply.markdown {
        request = request.parse_mode(ParseMode::MarkdownV2);
    }
    if let Some(keyboard) = reply.keyboard {
        request = request.reply_markup(keyboard);
    }
    request.await?;
    Ok(())
}
