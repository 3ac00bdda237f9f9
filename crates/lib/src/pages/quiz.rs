//! The "find your flavour" quiz.
//!
//! Five fixed questions, four options each. Every answer votes for one
//! flavour; the flavour with the most votes wins, ties going to the flavour
//! that received its first vote earliest.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizOption {
  pub answer: &'static str,
  pub text: &'static str,
  pub image: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
  pub text: &'static str,
  pub options: [QuizOption; 4],
}

const fn option(answer: &'static str, text: &'static str, image: &'static str) -> QuizOption {
  QuizOption { answer, text, image }
}

pub static QUESTIONS: [Question; 5] = [
  Question {
    text: "How do you unwind after a long day?",
    options: [
      option("relax", "Reading a book", "books.jpg"),
      option("exercise", "Going for a run", "running.jpg"),
      option("social", "Chatting with friends", "friends.jpg"),
      option("creative", "Doing something crafty", "craft.jpg"),
    ],
  },
  Question {
    text: "What's your go-to weekend activity?",
    options: [
      option("chill", "Netflix and chill", "netflix.jpg"),
      option("outdoors", "Nature walk", "nature_walk.jpg"),
      option("party", "Party all night", "party.jpg"),
      option("learn", "Learning a new skill", "learning.jpg"),
    ],
  },
  Question {
    text: "Pick your ideal vacation spot.",
    options: [
      option("beach", "Sunny beach", "sunnyBeach.jpg"),
      option("mountain", "Mountain retreat", "mountains.jpg"),
      option("city", "City adventures", "city.jpg"),
      option("home", "Staycation at home", "staycation.jpg"),
    ],
  },
  Question {
    text: "Which describes your personality best?",
    options: [
      option("calm", "Calm and composed", "calm.jpg"),
      option("bold", "Bold and brave", "bold.jpg"),
      option("friendly", "Friendly and warm", "warm.webp"),
      option("fun", "Fun and playful", "fun.jpeg"),
    ],
  },
  Question {
    text: "Choose a dessert.",
    options: [
      option("vanilla", "Classic Vanilla", "classicVanilla.jpg"),
      option("chocolate", "Rich Chocolate", "rich_chocolate.jpg"),
      option("strawberry", "Fresh Strawberry", "fresh_strawberry.jpg"),
      option("mint", "Cool Mint", "mint.jpg"),
    ],
  },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Flavor {
  Vanilla,
  Mango,
  Strawberry,
  Pistachio,
  Chocolate,
  Coffee,
  Mint,
  CookieDough,
}

impl Flavor {
  /// The flavour an answer votes for. Unknown answers vote Chocolate.
  pub fn for_answer(answer: &str) -> Self {
    match answer {
      "relax" | "chill" | "home" | "calm" | "vanilla" => Flavor::Vanilla,
      "exercise" | "fun" => Flavor::Mango,
      "social" | "beach" | "friendly" | "strawberry" => Flavor::Strawberry,
      "creative" | "mountain" => Flavor::Pistachio,
      "outdoors" | "mint" => Flavor::Mint,
      "learn" => Flavor::Coffee,
      "city" => Flavor::CookieDough,
      _ => Flavor::Chocolate,
    }
  }

  pub fn name(self) -> &'static str {
    match self {
      Flavor::Vanilla => "Vanilla",
      Flavor::Mango => "Mango",
      Flavor::Strawberry => "Strawberry",
      Flavor::Pistachio => "Pistachio",
      Flavor::Chocolate => "Chocolate",
      Flavor::Coffee => "Coffee",
      Flavor::Mint => "Mint",
      Flavor::CookieDough => "CookieDough",
    }
  }

  pub fn image(self) -> &'static str {
    match self {
      Flavor::Vanilla => "vanilla_result.jpg",
      Flavor::Mango => "mangoicecream_result.webp",
      Flavor::Strawberry => "strawberry.jpg",
      Flavor::Pistachio => "pistachio_result.jpg",
      Flavor::Chocolate => "chocolate.jpg",
      Flavor::Coffee => "coffee_result.jpg",
      Flavor::Mint => "mint.jpg",
      Flavor::CookieDough => "cookieDough.jpg",
    }
  }
}

impl fmt::Display for Flavor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizResult {
  pub flavor: Flavor,
  pub headline: String,
  pub image: &'static str,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
  #[error("option {choice} does not exist, pick 1 to {available}")]
  NoSuchOption { choice: usize, available: usize },

  #[error("the quiz is already finished")]
  Finished,
}

#[derive(Debug, Clone, Default)]
pub struct FlavorQuiz {
  answers: Vec<&'static str>,
}

impl FlavorQuiz {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn current_question(&self) -> Option<&'static Question> {
    QUESTIONS.get(self.answers.len())
  }

  pub fn is_finished(&self) -> bool {
    self.current_question().is_none()
  }

  /// Pick the 1-based `choice` on the current question.
  pub fn choose(&mut self, choice: usize) -> Result<(), QuizError> {
    let question = self.current_question().ok_or(QuizError::Finished)?;
    let option = choice
      .checked_sub(1)
      .and_then(|index| question.options.get(index))
      .ok_or(QuizError::NoSuchOption {
        choice,
        available: question.options.len(),
      })?;
    self.answers.push(option.answer);
    Ok(())
  }

  /// The winning flavour once every question is answered.
  pub fn result(&self) -> Option<QuizResult> {
    if !self.is_finished() {
      return None;
    }
    let flavor = tally(&self.answers)?;
    Some(QuizResult {
      flavor,
      headline: format!("You got {}!", flavor),
      image: flavor.image(),
    })
  }

  pub fn retry(&mut self) {
    self.answers.clear();
  }
}

/// Highest vote count wins; among equals, the flavour first voted for.
pub fn tally(answers: &[&str]) -> Option<Flavor> {
  let mut scores: Vec<(Flavor, u32)> = Vec::new();
  for answer in answers {
    let flavor = Flavor::for_answer(answer);
    match scores.iter_mut().find(|(f, _)| *f == flavor) {
      Some((_, score)) => *score += 1,
      None => scores.push((flavor, 1)),
    }
  }

  let mut best: Option<(Flavor, u32)> = None;
  for (flavor, score) in scores {
    if best.is_none_or(|(_, top)| score > top) {
      best = Some((flavor, score));
    }
  }
  best.map(|(flavor, _)| flavor)
}
