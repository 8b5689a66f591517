use once_cell::sync::Lazy;
use regex::Regex;

use super::{normalize, Question};

static COMMIT_DOUBLE_QUOTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^git commit -m ".*"$"#).unwrap());
static COMMIT_SINGLE_QUOTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^git commit -m '.*'$").unwrap());
static CHECKOUT_BRANCH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^git checkout \S+$").unwrap());
static CHECKOUT_NEW_BRANCH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^git checkout -b \S+$").unwrap());
static VIM_OPEN_FILE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^vim (\S+|"[^"]+"|'[^']+')$"#).unwrap());

// The commit message itself may be anything, but it has to be quoted.
fn is_commit_with_message(input: &str) -> bool {
    let s = normalize(input);
    COMMIT_DOUBLE_QUOTED.is_match(&s) || COMMIT_SINGLE_QUOTED.is_match(&s)
}

fn is_checkout_branch(input: &str) -> bool {
    CHECKOUT_BRANCH.is_match(&normalize(input))
}

fn is_checkout_new_branch(input: &str) -> bool {
    CHECKOUT_NEW_BRANCH.is_match(&normalize(input))
}

fn is_vim_open_file(input: &str) -> bool {
    VIM_OPEN_FILE.is_match(&normalize(input))
}

/// The fixed drill, in authoring order. Sessions shuffle their own copy,
/// this list itself is never reordered.
pub fn base_questions() -> Vec<Question> {
    vec![
        // CLI
        Question::exact("CLI: Visa nuvarande katalogs fullständiga sökväg", &["pwd"]),
        Question::exact("CLI: Byt katalog", &["cd"]),
        Question::exact("CLI: Lista filer och kataloger", &["ls"]),
        Question::exact("CLI: Skapa ny katalog", &["mkdir"]),
        Question::exact("CLI: Skapa en tom fil", &["touch"]),
        Question::exact(
            "CLI: Ta bort filer/kataloger rekursivt utan att fråga",
            &["rm -rf"],
        ),
        Question::exact("CLI: Flytta eller döp om fil/katalog", &["mv"]),
        Question::exact("CLI: Skriv ut innehållet i en fil", &["cat"]),
        Question::exact("CLI: Rensa terminalen", &["clear"]),
        Question::exact("CLI: Kör som administratör (Super User Do)", &["sudo"]),
        // Git
        Question::exact("Git: Klona ett repo från GitHub", &["git clone"]),
        Question::exact("Git: Visa status", &["git status"]),
        Question::exact("Git: Lägg till ALLT i staging area", &["git add ."]),
        Question::pattern(
            "Git: Skapa en commit med ett meddelande (använd -m \"Kommentar\")",
            is_commit_with_message,
        ),
        Question::exact("Git: Ladda upp commits till remote", &["git push"]),
        Question::exact("Git: Hämta och sammanfoga senaste ändringar", &["git pull"]),
        Question::exact("Git: Visa commit-historik", &["git log"]),
        Question::pattern(
            "Git: Byt till en annan branch (name-of-branch)",
            is_checkout_branch,
        ),
        Question::pattern(
            "Git: Skapa ny branch och byt till den (name-of-branch)",
            is_checkout_new_branch,
        ),
        // Vim
        Question::pattern("Vim: Öppna en fil med vim (filnamn)", is_vim_open_file),
        Question::exact("Vim: Gå in i insert-mode", &["i"]),
        Question::exact("Vim: Gå ur insert-mode", &["esc", "ESC"]),
        Question::exact("Vim: Spara och stäng fil", &[":wq"]),
        Question::exact("Vim: Stäng fil utan att spara", &[":q!"]),
    ]
}
