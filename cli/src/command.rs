use std::str::FromStr;

use sapper_core::Difficulty;

pub const HELP: &str = "commands: r <row> <col> | f <row> <col> | n [easy|medium|hard] | q";

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(usize, usize),
    Flag(usize, usize),
    New(Option<Difficulty>),
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or_else(|| "empty command".to_owned())?;

        match verb {
            "r" | "reveal" => parse_coords(verb, words).map(|(row, col)| Command::Reveal(row, col)),
            "f" | "flag" => parse_coords(verb, words).map(|(row, col)| Command::Flag(row, col)),
            "n" | "new" => match words.next() {
                Some(name) => name
                    .parse::<Difficulty>()
                    .map(|difficulty| Command::New(Some(difficulty)))
                    .map_err(|err| err.to_string()),
                None => Ok(Command::New(None)),
            },
            "q" | "quit" => Ok(Command::Quit),
            other => Err(format!("unknown command: {other}")),
        }
    }
}

fn parse_coords<'a>(
    verb: &str,
    mut words: impl Iterator<Item = &'a str>,
) -> Result<(usize, usize), String> {
    let mut next = || -> Result<usize, String> {
        words
            .next()
            .ok_or_else(|| format!("{verb} needs a row and a column"))?
            .parse::<usize>()
            .map_err(|err| format!("bad coordinate: {err}"))
    };
    Ok((next()?, next()?))
}
