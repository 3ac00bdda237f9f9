//! `scoop quiz`: the flavour quiz, answered non-interactively.

use anyhow::Result;
use owo_colors::{OwoColorize, Stream};

use scoopjoy_lib::pages::quiz::{FlavorQuiz, QUESTIONS};

use crate::output::{OutputFormat, print_info, print_json, print_success};

/// With no answers, list the questions. Otherwise answer them in order and
/// show the result once all are answered.
pub fn cmd_quiz(answers: &[usize], output: OutputFormat) -> Result<()> {
  if answers.is_empty() {
    if output.is_json() {
      return print_json(&QUESTIONS);
    }
    for (n, question) in QUESTIONS.iter().enumerate() {
      println!("{}. {}", n + 1, question.text);
      for (i, option) in question.options.iter().enumerate() {
        println!(
          "   {} {}",
          format!("{})", i + 1).if_supports_color(Stream::Stdout, |s| s.dimmed()),
          option.text
        );
      }
    }
    return Ok(());
  }

  let mut quiz = FlavorQuiz::new();
  for &choice in answers {
    quiz.choose(choice)?;
  }

  match quiz.result() {
    Some(result) if output.is_json() => print_json(&result),
    Some(result) => {
      print_success(&result.headline);
      print_info("This flavor matches your vibe perfectly!");
      Ok(())
    }
    None => {
      let remaining = QUESTIONS.len() - answers.len();
      if let Some(question) = quiz.current_question() {
        print_info(&format!("{} more to go. Next: {}", remaining, question.text));
      }
      Ok(())
    }
  }
}
