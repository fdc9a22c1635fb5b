//! Line-oriented question session for the `interactive` command.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use roadmap_core::{GenerationParameters, GenerationRequest, RoadmapError, RoadmapErrorCode};
use thiserror::Error;
use tracing::debug;

/// Errors raised while reading answers.
#[derive(Debug, Error)]
pub enum PromptError {
    /// Input ended before every question was answered.
    #[error("input ended before answering: {question}")]
    Closed {
        /// Question left unanswered.
        question: String,
    },
    /// An answer was not a non-negative whole number.
    #[error("`{answer}` is not a valid answer to: {question}")]
    InvalidAnswer {
        /// Question being answered.
        question: String,
        /// Trimmed answer as typed.
        answer: String,
    },
    /// Reading input or writing a question failed.
    #[error("prompt I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Failure of an interactive session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Answers could not be read.
    #[error(transparent)]
    Prompt(#[from] PromptError),
    /// Answers were read but rejected.
    #[error(transparent)]
    Invalid(#[from] RoadmapError),
}

/// Asks for generation parameters one question per line.
///
/// Each answer is checked as soon as it is given, so the session stops at the
/// first rejected value instead of asking the remaining questions.
///
/// # Examples
/// ```
/// # use std::io::Cursor;
/// # use roadmap_cli::cli::PromptSession;
/// let input = Cursor::new("4\n1\n1\n1\n1\n3\n2\n");
/// let mut transcript = Vec::new();
/// let params = PromptSession::new(input, &mut transcript)
///     .collect()
///     .expect("answers are valid");
/// assert_eq!(params.node_count(), 4);
/// assert_eq!(params.goods()[0].supply, 3);
/// ```
#[derive(Debug)]
pub struct PromptSession<R, W> {
    input: R,
    output: W,
    line: String,
}

impl<R: BufRead, W: Write> PromptSession<R, W> {
    /// Creates a session reading answers from `input` and writing questions to
    /// `output`.
    pub const fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            line: String::new(),
        }
    }

    /// Runs the session to completion.
    ///
    /// # Errors
    /// Returns [`SessionError::Prompt`] when input ends early, an answer does
    /// not parse, or I/O fails; [`SessionError::Invalid`] with the first
    /// rejected value otherwise.
    pub fn collect(mut self) -> Result<GenerationParameters, SessionError> {
        writeln!(self.output, "Shipping roadmap graph generator.")
            .map_err(PromptError::from)?;

        let mut request = GenerationRequest {
            node_count: 0,
            max_edges_per_node: 1,
            store_count: 1,
            warehouse_count: 1,
            good_type_count: 1,
            supply: vec![0],
            demand: vec![0],
        };

        request.node_count = self.ask("Please enter the number of nodes to generate: ")?;
        checkpoint(&request, &[RoadmapErrorCode::InsufficientNodes])?;

        request.max_edges_per_node =
            self.ask("Please enter the maximum number of edges to spawn per node: ")?;
        checkpoint(
            &request,
            &[
                RoadmapErrorCode::NoEdgesRequested,
                RoadmapErrorCode::TooManyEdgesRequested,
            ],
        )?;

        request.store_count = self.ask("How many stores would you like to have on the map?: ")?;
        checkpoint(&request, &[RoadmapErrorCode::NoStoresRequested])?;

        request.warehouse_count =
            self.ask("How many warehouses would you like to have on the map?: ")?;
        checkpoint(
            &request,
            &[
                RoadmapErrorCode::NoWarehousesRequested,
                RoadmapErrorCode::RoleOvercommit,
            ],
        )?;

        let good_type_count: usize = self.ask("How many types of goods would you have?: ")?;
        request.good_type_count = good_type_count;
        request.supply.clear();
        request.demand.clear();
        if good_type_count == 0 {
            return Err(RoadmapError::NoGoodsRequested.into());
        }
        for good in 1..=good_type_count {
            let supply = self.ask(&format!(
                "What is the total number of goods of type [{good}] supplied by warehouses?: "
            ))?;
            request.supply.push(supply);
            let demand = self.ask(&format!(
                "What is the total number of goods of type [{good}] demanded by stores?: "
            ))?;
            request.demand.push(demand);
        }

        Ok(request.validate()?)
    }

    fn ask<T: FromStr>(&mut self, question: &str) -> Result<T, PromptError> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        self.line.clear();
        if self.input.read_line(&mut self.line)? == 0 {
            return Err(PromptError::Closed {
                question: question.trim_end().to_owned(),
            });
        }
        let answer = self.line.trim();
        debug!(question = question.trim_end(), answer, "prompt answered");
        answer.parse().map_err(|_| PromptError::InvalidAnswer {
            question: question.trim_end().to_owned(),
            answer: answer.to_owned(),
        })
    }
}

/// Validates `request` with placeholder values for unanswered questions and
/// fails only on errors attributable to the question just answered.
fn checkpoint(request: &GenerationRequest, codes: &[RoadmapErrorCode]) -> Result<(), RoadmapError> {
    match request.clone().validate() {
        Err(err) if codes.contains(&err.code()) => Err(err),
        _ => Ok(()),
    }
}
