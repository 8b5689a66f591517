pub mod bank;

use rand::seq::SliceRandom;
use rand::thread_rng;

/// Trims the ends and collapses internal whitespace runs to single spaces.
/// Applied to exact-set answers at construction time and to submitted text
/// before the membership test, so only whitespace formatting is forgiven.
pub fn normalize(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// How a question judges an answer, fixed when the question is authored.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Membership in a set of normalized literals, case-sensitive.
    ExactSet(Vec<String>),
    /// A custom check for answers with variable parts (file names,
    /// branch names). The predicate normalizes on its own; the engine
    /// passes the raw input through untouched.
    Predicate(fn(&str) -> bool),
}

#[derive(Debug, Clone)]
pub struct Question {
    pub prompt: String,
    matcher: Matcher,
}

impl Question {
    pub fn exact(prompt: &str, acceptable: &[&str]) -> Self {
        let acceptable = acceptable.iter().map(|a| normalize(a)).collect();
        Self {
            prompt: prompt.to_string(),
            matcher: Matcher::ExactSet(acceptable),
        }
    }

    pub fn pattern(prompt: &str, predicate: fn(&str) -> bool) -> Self {
        Self {
            prompt: prompt.to_string(),
            matcher: Matcher::Predicate(predicate),
        }
    }

    pub fn check(&self, answer: &str) -> bool {
        match &self.matcher {
            Matcher::ExactSet(acceptable) => acceptable.contains(&normalize(answer)),
            Matcher::Predicate(predicate) => predicate(answer),
        }
    }
}

/// The judgement recorded for one submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl Verdict {
    pub fn is_correct(self) -> bool {
        matches!(self, Verdict::Correct)
    }
}

/// One quiz run over a shuffled copy of the question bank.
///
/// The working set is fixed once the session is created; only `index` and
/// `score` move after that. A restart replaces the whole value.
#[derive(Debug, Clone, Default)]
pub struct Session {
    working_set: Vec<Question>,
    index: usize,
    score: usize,
}

impl Session {
    /// Copies the bank, shuffles the copy in place and starts from the top.
    /// An empty bank produces a session that is already finished.
    pub fn start(bank: &[Question]) -> Self {
        let mut working_set = bank.to_vec();
        working_set.shuffle(&mut thread_rng());
        Self {
            working_set,
            index: 0,
            score: 0,
        }
    }

    /// The question waiting for an answer, or `None` once every question
    /// has been consumed.
    pub fn current_question(&self) -> Option<&Question> {
        self.working_set.get(self.index)
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.working_set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.working_set.is_empty()
    }

    pub fn len(&self) -> usize {
        self.working_set.len()
    }

    /// 1-based number of the question currently shown.
    pub fn position(&self) -> usize {
        self.index + 1
    }

    pub fn score(&self) -> usize {
        self.score
    }

    /// Judges the answer against the current question and advances by one.
    ///
    /// A skip always counts as wrong and the question's matcher is never
    /// consulted, even if the recorded text would have passed it. Returns
    /// `None` once the session is finished; nothing is mutated in that case.
    pub fn submit(&mut self, answer: &str, is_skip: bool) -> Option<Verdict> {
        let question = self.working_set.get(self.index)?;
        let verdict = if !is_skip && question.check(answer) {
            self.score += 1;
            Verdict::Correct
        } else {
            Verdict::Incorrect
        };
        self.index += 1;
        return Some(verdict);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn always_yes(_: &str) -> bool {
        true
    }

    fn tiny_bank() -> Vec<Question> {
        vec![
            Question::exact("show the working directory", &["pwd"]),
            Question::exact("list files", &["ls"]),
            Question::pattern("anything goes", always_yes),
        ]
    }

    #[test]
    fn normalize_trims_and_collapses() {
        assert_eq!(normalize("  pwd  "), "pwd");
        assert_eq!(normalize("git   add   ."), "git add .");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn exact_set_forgives_whitespace_but_not_case() {
        let q = Question::exact("show the working directory", &["pwd"]);
        assert!(q.check("pwd"));
        assert!(q.check("  pwd  "));
        assert!(!q.check("PWD"));
        assert!(!q.check("pwd."));
        assert!(!q.check(""));
    }

    #[test]
    fn exact_set_accepts_any_listed_literal() {
        let q = Question::exact("leave insert mode", &["esc", "ESC"]);
        assert!(q.check("esc"));
        assert!(q.check("ESC"));
        assert!(!q.check("Esc"));
    }

    #[test]
    fn predicate_is_deterministic() {
        fn starts_with_git(input: &str) -> bool {
            normalize(input).starts_with("git ")
        }
        let q = Question::pattern("some git command", starts_with_git);
        for _ in 0..10 {
            assert!(q.check("git status"));
            assert!(!q.check("status"));
        }
    }

    #[test]
    fn start_produces_a_permutation_and_leaves_the_bank_alone() {
        let bank = tiny_bank();
        let before: Vec<String> = bank.iter().map(|q| q.prompt.clone()).collect();

        let session = Session::start(&bank);

        let after: Vec<String> = bank.iter().map(|q| q.prompt.clone()).collect();
        assert_eq!(before, after);

        let mut shuffled: Vec<String> = session
            .working_set
            .iter()
            .map(|q| q.prompt.clone())
            .collect();
        let mut original = before;
        shuffled.sort();
        original.sort();
        assert_eq!(shuffled, original);
        assert_eq!(session.len(), 3);
        assert_eq!(session.score(), 0);
        assert!(!session.is_finished());
    }

    #[test]
    fn all_correct_run_finishes_with_full_score() {
        let bank = tiny_bank();
        let mut session = Session::start(&bank);
        let mut answered = 0;
        while let Some(question) = session.current_question() {
            let answer = match question.prompt.as_str() {
                "show the working directory" => "pwd",
                "list files" => "ls",
                _ => "whatever",
            }
            .to_string();
            let verdict = session.submit(&answer, false).unwrap();
            assert!(verdict.is_correct());
            answered += 1;
            assert!(session.score() <= session.index);
        }
        assert_eq!(answered, 3);
        assert!(session.is_finished());
        assert_eq!(session.score(), 3);
    }

    #[test]
    fn score_moves_by_zero_or_one_per_submit() {
        let bank = tiny_bank();
        let mut session = Session::start(&bank);
        let mut previous = session.score();
        while !session.is_finished() {
            session.submit("pwd", false).unwrap();
            let delta = session.score() - previous;
            assert!(delta == 0 || delta == 1);
            previous = session.score();
        }
    }

    #[test]
    fn skip_never_scores_even_when_the_text_would_pass() {
        let bank = vec![Question::pattern("anything goes", always_yes)];
        let mut session = Session::start(&bank);
        let verdict = session.submit("this would validate", true).unwrap();
        assert_eq!(verdict, Verdict::Incorrect);
        assert_eq!(session.score(), 0);
        assert!(session.is_finished());
    }

    #[test]
    fn skipping_everything_finishes_with_zero() {
        let bank = tiny_bank();
        let mut session = Session::start(&bank);
        for _ in 0..bank.len() {
            let verdict = session.submit("(hoppa över)", true).unwrap();
            assert_eq!(verdict, Verdict::Incorrect);
        }
        assert!(session.is_finished());
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn empty_bank_is_finished_from_the_start() {
        let mut session = Session::start(&[]);
        assert!(session.is_empty());
        assert!(session.is_finished());
        assert_eq!(session.len(), 0);
        assert_eq!(session.score(), 0);
        assert!(session.current_question().is_none());
        assert!(session.submit("pwd", false).is_none());
    }

    #[test]
    fn submit_after_finish_is_rejected_without_mutation() {
        let bank = vec![Question::exact("list files", &["ls"])];
        let mut session = Session::start(&bank);
        assert!(session.submit("ls", false).unwrap().is_correct());
        assert!(session.is_finished());

        assert!(session.submit("ls", false).is_none());
        assert_eq!(session.score(), 1);
        assert_eq!(session.position(), 2);
    }
}
