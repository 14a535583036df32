use std::{
    collections::HashMap,
    io::{self, Stdout, Write},
    thread,
    time::{Duration, Instant},
};

use crossterm::{
    cursor, execute, queue,
    style::{self, Color, Stylize},
    terminal::{self, ClearType},
};
use once_cell::sync::Lazy;

use crate::{
    executor::GridObserver,
    game::Outcome,
    grid::{CellKind, Grid, Position},
    Error,
};

static CELL_COLOR_MAP: Lazy<HashMap<CellKind, Color>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert(CellKind::Empty, Color::DarkGrey);
    m.insert(CellKind::Obstacle, Color::Red);
    m.insert(CellKind::Bonus, Color::Yellow);
    m.insert(CellKind::Robot, Color::Cyan);
    m.insert(CellKind::Goal, Color::Green);

    m
});

/// Full screen renderer on the alternate terminal screen.
pub struct Screen {
    term: Stdout,
    status: String,
    frame_interval: Duration,
    final_hold: Duration,
    last_refresh_time: Option<Instant>,
}

impl Screen {
    pub fn new(frame_interval: Duration) -> Self {
        Self {
            term: io::stdout(),
            status: String::new(),
            frame_interval,
            final_hold: Duration::ZERO,
            last_refresh_time: None,
        }
    }

    /// Keeps the last frame on screen for `hold` once a game has ended.
    pub fn with_final_hold(mut self, hold: Duration) -> Self {
        self.final_hold = hold;
        self
    }

    pub fn set_status<S: Into<String>>(&mut self, status: S) {
        self.status = status.into();
    }

    /// Switches to the alternate screen in raw mode, with a hidden cursor.
    pub fn start(&mut self) -> Result<(), Error> {
        terminal::enable_raw_mode().map_err(Error::TerminalError)?;
        execute!(
            self.term,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        )
        .map_err(Error::TerminalError)
    }

    /// Gives the terminal back in the state `start` found it.
    pub fn stop(&mut self) -> Result<(), Error> {
        let leave_result = execute!(
            self.term,
            style::ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        terminal::disable_raw_mode().map_err(Error::TerminalError)?;
        leave_result.map_err(Error::TerminalError)
    }

    /// Columns and rows needed to show `grid` with the score and status lines below it.
    pub fn frame_size(&self, grid: &Grid, score: u32) -> (u16, u16) {
        // Each cell takes a character and a separator.
        let col_n = (grid.width() * 2)
            .max(format!("Score: {}", score).chars().count())
            .max(self.status.chars().count());
        let row_n = grid.height() + 3;

        (
            u16::try_from(col_n).unwrap_or(u16::MAX),
            u16::try_from(row_n).unwrap_or(u16::MAX),
        )
    }

    fn render(&mut self, grid: &Grid, score: u32) -> Result<(), Error> {
        let (expect_col_n, expect_row_n) = self.frame_size(grid, score);
        let (term_col_n, term_row_n) = terminal::size().map_err(Error::TerminalError)?;
        if term_col_n < expect_col_n || term_row_n < expect_row_n {
            return Err(Error::NotEnoughTerminalSpace(
                term_row_n,
                term_col_n,
                expect_row_n,
                expect_col_n,
            ));
        }

        self.draw(grid, score).map_err(Error::TerminalError)
    }

    fn draw(&mut self, grid: &Grid, score: u32) -> io::Result<()> {
        let status = self.status.clone();
        queue!(
            self.term,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let kind = grid
                    .cell_at(&Position::new(x, y))
                    .unwrap_or(CellKind::Empty);
                let color = CELL_COLOR_MAP.get(&kind).copied().unwrap_or(Color::Reset);
                queue!(
                    self.term,
                    style::PrintStyledContent(char::from(kind).with(color)),
                    style::Print(' ')
                )?;
            }
            queue!(self.term, cursor::MoveToNextLine(1))?;
        }
        queue!(
            self.term,
            cursor::MoveToNextLine(1),
            style::Print(format!("Score: {}", score)),
            cursor::MoveToNextLine(1),
            style::Print(status)
        )?;
        self.term.flush()
    }

    fn wait_next_frame(&mut self) {
        if let Some(last_refresh_time) = self.last_refresh_time {
            let elapsed = last_refresh_time.elapsed();
            let sleep_interval = self.frame_interval.saturating_sub(elapsed);
            if !sleep_interval.is_zero() {
                thread::sleep(sleep_interval);
            }
        }
        self.last_refresh_time = Some(Instant::now());
    }
}

impl GridObserver for Screen {
    fn observe(&mut self, grid: &Grid, score: u32) -> Result<(), Error> {
        self.wait_next_frame();
        self.render(grid, score)
    }

    fn finish(&mut self, grid: &Grid, outcome: &Outcome) -> Result<(), Error> {
        if let Outcome::Quit { .. } = outcome {
            return Ok(());
        }

        self.status = outcome.to_string();
        self.observe(grid, outcome.score())?;
        thread::sleep(self.final_hold);
        Ok(())
    }
}

/// Writes every snapshot as text, one frame after another.
pub struct PlainScreen<W: Write> {
    out: W,
}

impl<W: Write> PlainScreen<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> GridObserver for PlainScreen<W> {
    fn observe(&mut self, grid: &Grid, score: u32) -> Result<(), Error> {
        write!(self.out, "{}Score: {}\n\n", grid, score).map_err(Error::TerminalError)?;
        self.out.flush().map_err(Error::TerminalError)
    }
}
