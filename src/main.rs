mod quiz;

use std::sync::Arc;

use dotenv::dotenv;
use quiz::{Question, Session};
use teloxide::{
    dispatching::dialogue::InMemStorage,
    prelude::*,
    types::{KeyboardButton, KeyboardMarkup},
};

type DrillDialogue = Dialogue<State, InMemStorage<State>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(Clone, Default)]
pub enum State {
    #[default]
    Start,
    Drill {
        session: Session,
    },
    Finished {
        score: usize,
        total: usize,
    },
}

#[tokio::main]
async fn main() {
    dotenv().expect("Failed to load .env file");

    pretty_env_logger::init();
    log::info!("Starting terminal quiz bot...");

    let bot = Bot::from_env();

    let bank = Arc::new(quiz::bank::base_questions());
    log::info!("Question bank loaded: {} questions", bank.len());

    let bank_for_drill = bank.clone();
    let bank_for_finished = bank.clone();

    Dispatcher::builder(
        bot,
        Update::filter_message()
            .enter_dialogue::<Message, InMemStorage<State>, State>()
            .branch(dptree::case![State::Start].endpoint(
                move |bot: Bot, dialogue: DrillDialogue, msg: Message| {
                    start(bank.clone(), bot, dialogue, msg)
                },
            ))
            .branch(dptree::case![State::Drill { session }].endpoint(
                move |bot: Bot, dialogue: DrillDialogue, session: Session, msg: Message| {
                    drill(bank_for_drill.clone(), bot, dialogue, session, msg)
                },
            ))
            .branch(dptree::case![State::Finished { score, total }].endpoint(
                move |bot: Bot,
                      dialogue: DrillDialogue,
                      (score, total): (usize, usize),
                      msg: Message| {
                    finished(bank_for_finished.clone(), bot, dialogue, (score, total), msg)
                },
            )),
    )
    .dependencies(dptree::deps![InMemStorage::<State>::new()])
    .enable_ctrlc_handler()
    .build()
    .dispatch()
    .await;
}

const SKIP_BUTTON: &str = "Hoppa över";
const RESTART_BUTTON: &str = "Börja om";
const SKIP_PLACEHOLDER: &str = "(hoppa över)";

const INTRO_TEXT: &str = "📖 Skriv det exakta kommandot. (Skicka som vanligt meddelande)\n\
Tips: Syntax räknas. Mellanslag, flaggor och citattecken! Katalog är ett annat ord för mapp.\n\
Obs: Om frågan innehåller (filnamn) eller (branch-namn) ska du ersätta det med ett eget namn.";

fn drill_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![
        KeyboardButton::new(SKIP_BUTTON),
        KeyboardButton::new(RESTART_BUTTON),
    ]])
}

fn restart_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![KeyboardButton::new(RESTART_BUTTON)]])
}

async fn start(
    bank: Arc<Vec<Question>>,
    bot: Bot,
    dialogue: DrillDialogue,
    msg: Message,
) -> HandlerResult {
    bot.send_message(msg.chat.id, INTRO_TEXT).await?;
    begin_session(&bank, &bot, &dialogue, &msg).await
}

/// Replaces whatever session the dialogue held with a freshly shuffled one.
async fn begin_session(
    bank: &[Question],
    bot: &Bot,
    dialogue: &DrillDialogue,
    msg: &Message,
) -> HandlerResult {
    let session = Session::start(bank);

    if session.is_empty() {
        // An empty bank finishes on the spot.
        report_final_score(bot, msg, session.score(), session.len()).await?;
        dialogue
            .update(State::Finished {
                score: session.score(),
                total: session.len(),
            })
            .await?;
        return Ok(());
    }

    send_current_question(bot, msg, &session).await?;
    dialogue.update(State::Drill { session }).await?;
    Ok(())
}

async fn drill(
    bank: Arc<Vec<Question>>,
    bot: Bot,
    dialogue: DrillDialogue,
    mut session: Session,
    msg: Message,
) -> HandlerResult {
    let text = match msg.text() {
        Some(text) => text,
        None => {
            bot.send_message(msg.chat.id, "Svara med text, tack!")
                .await?;
            return Ok(());
        }
    };

    if text == RESTART_BUTTON {
        bot.send_message(msg.chat.id, "Okej, vi börjar om!").await?;
        return begin_session(&bank, &bot, &dialogue, &msg).await;
    }

    let is_skip = text == SKIP_BUTTON;
    // The skip button carries no answer of its own, so the transcript gets
    // the same placeholder the original quiz showed for an empty field.
    let answer = if is_skip { SKIP_PLACEHOLDER } else { text };

    let verdict = match session.submit(answer, is_skip) {
        Some(verdict) => verdict,
        None => {
            log::warn!("submit on a finished session ignored");
            return Ok(());
        }
    };
    log::debug!("answer {:?} judged {:?}", answer, verdict);

    bot.send_message(msg.chat.id, format!("> {}", answer))
        .await?;
    let verdict_line = if verdict.is_correct() {
        "✅ Rätt!"
    } else {
        "❌ Fel."
    };
    bot.send_message(msg.chat.id, verdict_line).await?;

    if session.is_finished() {
        report_final_score(&bot, &msg, session.score(), session.len()).await?;
        dialogue
            .update(State::Finished {
                score: session.score(),
                total: session.len(),
            })
            .await?;
        return Ok(());
    }

    send_current_question(&bot, &msg, &session).await?;
    dialogue.update(State::Drill { session }).await?;
    Ok(())
}

async fn finished(
    bank: Arc<Vec<Question>>,
    bot: Bot,
    dialogue: DrillDialogue,
    (score, total): (usize, usize),
    msg: Message,
) -> HandlerResult {
    match msg.text() {
        Some(RESTART_BUTTON) => begin_session(&bank, &bot, &dialogue, &msg).await,
        _ => {
            bot.send_message(
                msg.chat.id,
                format!(
                    "Quizen är klar! Du fick {}/{} rätt. Tryck \"{}\" för en ny runda.",
                    score, total, RESTART_BUTTON
                ),
            )
            .reply_markup(restart_keyboard())
            .await?;
            Ok(())
        }
    }
}

async fn send_current_question(bot: &Bot, msg: &Message, session: &Session) -> HandlerResult {
    let question = match session.current_question() {
        Some(question) => question,
        None => return Ok(()),
    };

    let text = format!(
        "Fråga {}/{} · Poäng: {}\n\n{}",
        session.position(),
        session.len(),
        session.score(),
        question.prompt
    );
    bot.send_message(msg.chat.id, text)
        .reply_markup(drill_keyboard())
        .await?;
    Ok(())
}

async fn report_final_score(bot: &Bot, msg: &Message, score: usize, total: usize) -> HandlerResult {
    bot.send_message(
        msg.chat.id,
        format!("🎉 Klart! Du fick {}/{} rätt.", score, total),
    )
    .reply_markup(restart_keyboard())
    .await?;
    Ok(())
}
