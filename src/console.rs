//! Line prompts on a reader/writer pair, used to ask for whatever the command line left out.

use std::{
    io::{BufRead, Write},
    str::FromStr,
};

use crate::{Error, Mode};

fn read_answer<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> Result<String, Error> {
    write!(output, "{}", question).map_err(Error::TerminalError)?;
    output.flush().map_err(Error::TerminalError)?;
    let mut line = String::new();
    if input.read_line(&mut line).map_err(Error::TerminalError)? == 0 {
        return Err(Error::InputClosed);
    }

    Ok(line.trim().to_string())
}

/// Asks until the answer parses, gives up only when input ends.
pub fn prompt_value<T, R, W>(input: &mut R, output: &mut W, question: &str) -> Result<T, Error>
where
    T: FromStr,
    R: BufRead,
    W: Write,
{
    loop {
        let answer = read_answer(input, output, question)?;
        match answer.parse::<T>() {
            Ok(value) => return Ok(value),
            Err(_) => {
                writeln!(output, "Invalid value({}), try again.", answer)
                    .map_err(Error::TerminalError)?;
            }
        }
    }
}

pub fn prompt_mode<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Mode, Error> {
    loop {
        let answer = read_answer(input, output, "Choose the mode: (m)anual or (a)utomatic: ")?;
        match answer.chars().next().map(Mode::try_from) {
            Some(Ok(mode)) => return Ok(mode),
            _ => {
                writeln!(output, "Invalid mode({}).", answer).map_err(Error::TerminalError)?;
            }
        }
    }
}

/// Yes/no question, anything but an answer starting with `y` or `o` means no.
pub fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> Result<bool, Error> {
    match read_answer(input, output, question) {
        Ok(answer) => Ok(answer
            .chars()
            .next()
            .is_some_and(|c| matches!(c.to_ascii_lowercase(), 'y' | 'o'))),
        Err(Error::InputClosed) => Ok(false),
        Err(e) => Err(e),
    }
}
