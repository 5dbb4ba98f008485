//! Interactive configuration menu.
//!
//! Generic over the input and output streams so the menu can be driven from
//! a script in tests.  Every answer is validated; anything unexpected is
//! reported and the question asked again.

use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::{bail, Result};

use lift_core::{ArrivalSeed, BuildingConfig, FloorId};

pub struct Prompter<R, W> {
    input:  R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask about start floors and passenger groups, updating `config`.
    ///
    /// Answering "n" to the first question keeps the default start floors
    /// and leaves the per-floor generators on.
    pub fn collect(&mut self, config: &mut BuildingConfig) -> Result<()> {
        if !self.yes_no("Do you want to specify elevator start locations and passenger groups? (y/n)")? {
            return Ok(());
        }

        let top = config.floors.saturating_sub(1);
        let mut starts = Vec::with_capacity(config.elevators as usize);
        for e in 0..config.elevators {
            let floor: u16 = self.number(
                &format!("Enter starting location for elevator {e}. (0 to {top})"),
                |f| *f <= top,
            )?;
            starts.push(FloorId(floor));
        }
        config.start_floors = Some(starts);

        let mut seeds = Vec::new();
        loop {
            let floor: u16 = self.number(
                &format!("Which floor do you want to generate passengers on? (0 to {top})"),
                |f| *f <= top,
            )?;
            let group_size: u32 =
                self.number("How many passengers do you want to generate on this floor?", |n| *n > 0)?;
            seeds.push(ArrivalSeed { floor: FloorId(floor), group_size });

            if !self.yes_no("Do you want to add another floor? (y/n)")? {
                break;
            }
        }
        config.arrival_seeds = seeds;
        Ok(())
    }

    /// Ask until the answer is exactly "y" or "n".
    pub fn yes_no(&mut self, question: &str) -> Result<bool> {
        loop {
            match self.ask(question)?.as_str() {
                "y" => return Ok(true),
                "n" => return Ok(false),
                other => writeln!(self.output, "Incorrect input {other:?}, please answer y or n.")?,
            }
        }
    }

    /// Ask until the answer parses as `T` and passes `valid`.
    pub fn number<T: FromStr>(&mut self, question: &str, valid: impl Fn(&T) -> bool) -> Result<T> {
        loop {
            let answer = self.ask(question)?;
            match answer.parse::<T>() {
                Ok(v) if valid(&v) => return Ok(v),
                _ => writeln!(self.output, "Incorrect input {answer:?}.")?,
            }
        }
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        writeln!(self.output, "{question}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            bail!("input closed while waiting for an answer to {question:?}");
        }
        Ok(line.trim().to_owned())
    }
}
