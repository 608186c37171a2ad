/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/2/26
******************************************************************************/

//! Simulation command types.
//!
//! This module defines the commands that drive the [`Scheduler`] and the
//! parser for their one-line text form.
//!
//! [`Scheduler`]: super::Scheduler

use crate::clock::{ClockError, ClockTime};
use crate::order::CustomerOrder;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Why an input line could not be turned into a command.
///
/// Lines failing to parse are skipped; the simulation continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The line holds no tokens.
    #[error("empty command line")]
    Empty,

    /// The first token is not a known command keyword.
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    /// A known command with the wrong number of tokens.
    #[error("{command} expects {expected} tokens, found {found}")]
    WrongArity {
        /// Command keyword.
        command: &'static str,
        /// Expected token count, keyword included.
        expected: usize,
        /// Actual token count.
        found: usize,
    },

    /// The timestamp token is not a valid `HHMM` time.
    #[error(transparent)]
    InvalidTime(#[from] ClockError),

    /// An item count is not a non-negative integer.
    #[error("invalid item count '{0}'")]
    InvalidCount(String),
}

/// Commands accepted by the [`Scheduler`](super::Scheduler).
///
/// # Examples
///
/// ```
/// use fulfillment_rs::sequencer::SimulationCommand;
///
/// let command: SimulationCommand = "CustomerOrder 0900 Alice 3 2".parse().unwrap();
/// assert_eq!(command.keyword(), "CustomerOrder");
/// assert_eq!(command.time().to_string(), "0900");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationCommand {
    /// A customer order arrives.
    CustomerOrder(CustomerOrder),

    /// Report the available workers in pool order.
    PrintAvailableWorkerList(ClockTime),

    /// Report every open bundle as `worker:customers`.
    PrintWorkerAssignmentList(ClockTime),

    /// Report the longest processing time sealed so far.
    PrintMaxFulfillmentTime(ClockTime),
}

impl SimulationCommand {
    pub const CUSTOMER_ORDER: &'static str = "CustomerOrder";
    pub const PRINT_AVAILABLE_WORKER_LIST: &'static str = "PrintAvailableWorkerList";
    pub const PRINT_WORKER_ASSIGNMENT_LIST: &'static str = "PrintWorkerAssignmentList";
    pub const PRINT_MAX_FULFILLMENT_TIME: &'static str = "PrintMaxFulfillmentTime";

    /// Timestamp carried by the command.
    #[must_use]
    pub fn time(&self) -> ClockTime {
        match self {
            Self::CustomerOrder(order) => order.arrival_time,
            Self::PrintAvailableWorkerList(time)
            | Self::PrintWorkerAssignmentList(time)
            | Self::PrintMaxFulfillmentTime(time) => *time,
        }
    }

    /// Keyword used in the text form.
    #[must_use]
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::CustomerOrder(_) => Self::CUSTOMER_ORDER,
            Self::PrintAvailableWorkerList(_) => Self::PRINT_AVAILABLE_WORKER_LIST,
            Self::PrintWorkerAssignmentList(_) => Self::PRINT_WORKER_ASSIGNMENT_LIST,
            Self::PrintMaxFulfillmentTime(_) => Self::PRINT_MAX_FULFILLMENT_TIME,
        }
    }

    #[must_use]
    pub fn is_order(&self) -> bool {
        matches!(self, Self::CustomerOrder(_))
    }
}

fn expect_arity(command: &'static str, tokens: &[&str], expected: usize) -> Result<(), CommandError> {
    if tokens.len() == expected {
        Ok(())
    } else {
        Err(CommandError::WrongArity {
            command,
            expected,
            found: tokens.len(),
        })
    }
}

fn parse_count(token: &str) -> Result<u32, CommandError> {
    token
        .parse()
        .map_err(|_| CommandError::InvalidCount(token.to_string()))
}

impl FromStr for SimulationCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some(&keyword) = tokens.first() else {
            return Err(CommandError::Empty);
        };

        match keyword {
            Self::CUSTOMER_ORDER => {
                expect_arity(Self::CUSTOMER_ORDER, &tokens, 5)?;
                let time = tokens[1].parse()?;
                let books = parse_count(tokens[3])?;
                let electronics = parse_count(tokens[4])?;
                Ok(Self::CustomerOrder(CustomerOrder::new(
                    time, tokens[2], books, electronics,
                )))
            }
            Self::PRINT_AVAILABLE_WORKER_LIST => {
                expect_arity(Self::PRINT_AVAILABLE_WORKER_LIST, &tokens, 2)?;
                Ok(Self::PrintAvailableWorkerList(tokens[1].parse()?))
            }
            Self::PRINT_WORKER_ASSIGNMENT_LIST => {
                expect_arity(Self::PRINT_WORKER_ASSIGNMENT_LIST, &tokens, 2)?;
                Ok(Self::PrintWorkerAssignmentList(tokens[1].parse()?))
            }
            Self::PRINT_MAX_FULFILLMENT_TIME => {
                expect_arity(Self::PRINT_MAX_FULFILLMENT_TIME, &tokens, 2)?;
                Ok(Self::PrintMaxFulfillmentTime(tokens[1].parse()?))
            }
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }
}

impl fmt::Display for SimulationCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CustomerOrder(order) => write!(
                f,
                "{} {} {} {} {}",
                self.keyword(),
                order.arrival_time,
                order.customer_id,
                order.book_count,
                order.electronics_count
            ),
            _ => write!(f, "{} {}", self.keyword(), self.time()),
        }
    }
}
