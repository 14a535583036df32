use std::{
    collections::VecDeque,
    io::BufRead,
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{self, Receiver},
        Arc,
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::{grid::Direction, Error};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Quit,
}

impl Command {
    /// Maps a typed character, accepting both the zqsd and wasd layouts.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'z' | 'w' => Some(Command::Move(Direction::Up)),
            's' => Some(Command::Move(Direction::Down)),
            'q' | 'a' => Some(Command::Move(Direction::Left)),
            'd' => Some(Command::Move(Direction::Right)),
            _ => None,
        }
    }

    pub fn from_key_event(event: &KeyEvent) -> Option<Self> {
        if event.kind != KeyEventKind::Press {
            return None;
        }

        match event.code {
            KeyCode::Up => Some(Command::Move(Direction::Up)),
            KeyCode::Down => Some(Command::Move(Direction::Down)),
            KeyCode::Left => Some(Command::Move(Direction::Left)),
            KeyCode::Right => Some(Command::Move(Direction::Right)),
            KeyCode::Esc => Some(Command::Quit),
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Command::Quit)
            }
            KeyCode::Char(c) => Self::from_char(c),
            _ => None,
        }
    }
}

pub trait InputSource {
    /// Blocks until the player gives a command.
    fn next_command(&mut self) -> Result<Command, Error>;
}

/// Key events read by a dedicated thread and handed over through a channel.
pub struct TerminalInput {
    commands: Receiver<Command>,
    is_working: Arc<AtomicBool>,
    reader: Option<JoinHandle<()>>,
}

impl TerminalInput {
    const POLL_INTERVAL: Duration = Duration::from_millis(100);

    pub fn start() -> Self {
        let (sender, commands) = mpsc::channel();
        let is_working = Arc::new(AtomicBool::new(true));
        let reader_is_working = is_working.clone();
        let reader = thread::spawn(move || {
            while reader_is_working.load(Ordering::Acquire) {
                match poll(Self::POLL_INTERVAL) {
                    Ok(false) => continue,
                    Ok(true) => (),
                    Err(e) => {
                        log::error!("Failed to poll terminal events, get error({}).", e);
                        break;
                    }
                }

                match read() {
                    Ok(Event::Key(ke)) => {
                        if let Some(command) = Command::from_key_event(&ke) {
                            if sender.send(command).is_err() {
                                break;
                            }
                        }
                    }
                    Ok(_) => (),
                    Err(e) => {
                        log::error!("Failed to read terminal event, get error({}).", e);
                        break;
                    }
                }
            }
        });

        Self {
            commands,
            is_working,
            reader: Some(reader),
        }
    }

    pub fn stop(&mut self) {
        self.is_working.store(false, Ordering::Release);
        if let Some(reader) = self.reader.take() {
            if reader.join().is_err() {
                log::error!("Terminal input thread panicked.");
            }
        }
    }
}

impl Drop for TerminalInput {
    fn drop(&mut self) {
        self.stop();
    }
}

impl InputSource for TerminalInput {
    fn next_command(&mut self) -> Result<Command, Error> {
        // A closed channel means the reader is gone, nothing more will come.
        Ok(self.commands.recv().unwrap_or(Command::Quit))
    }
}

/// Commands typed as lines, e.g. from a pipe in plain mode.
pub struct LineInput<R: BufRead> {
    reader: R,
    pending: VecDeque<Command>,
}

impl<R: BufRead> LineInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }
}

impl<R: BufRead> InputSource for LineInput<R> {
    fn next_command(&mut self) -> Result<Command, Error> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.reader.read_line(&mut line).map_err(Error::TerminalError)? == 0 {
                return Ok(Command::Quit);
            }

            let line = line.trim();
            if line.eq_ignore_ascii_case("quit") {
                return Ok(Command::Quit);
            }
            self.pending
                .extend(line.chars().filter_map(Command::from_char));
        }

        Ok(self.pending.pop_front().unwrap_or(Command::Quit))
    }
}

/// Fixed command list, answers `Quit` once exhausted.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    commands: VecDeque<Command>,
}

impl ScriptedInput {
    pub fn new<I: IntoIterator<Item = Command>>(commands: I) -> Self {
        Self {
            commands: commands.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn next_command(&mut self) -> Result<Command, Error> {
        Ok(self.commands.pop_front().unwrap_or(Command::Quit))
    }
}
