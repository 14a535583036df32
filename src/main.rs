use std::{
    io::{self, BufRead, Write},
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use gridbot::{
    console,
    display::{PlainScreen, Screen},
    input::{LineInput, TerminalInput},
    CLIArgs, Game, GridSettings, Mode, Outcome, Pathfinder,
};
use rand::{rngs::StdRng, SeedableRng};

/// How long the last frame stays on the terminal screen before leaving it.
const FINAL_FRAME_HOLD: Duration = Duration::from_millis(1500);

fn main() -> Result<()> {
    env_logger::init();
    let args = CLIArgs::parse();
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut pathfinder = Pathfinder::new();
    if let Some(timeout_ms) = args.search_timeout_ms {
        pathfinder = pathfinder.with_timeout(Duration::from_millis(timeout_ms));
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    loop {
        let grid = match &args.map_path {
            Some(path) => gridbot::read_grid(path).with_context(|| {
                format!("Failed to load map from given file({}).", path.display())
            })?,
            None => {
                let settings = resolve_settings(&args, &mut input, &mut output)
                    .context("Failed to read grid settings.")?;
                gridbot::generate_grid(&settings, &mut rng).context("Failed to generate grid.")?
            }
        };
        let mode = match args.mode {
            Some(mode) => mode,
            None => console::prompt_mode(&mut input, &mut output).context("Failed to read mode.")?,
        };

        let mut game = Game::new(grid);
        let result = if args.plain {
            play_plain(&mut game, mode, &pathfinder, &mut input, &mut output)
        } else {
            play_on_screen(&args, &mut game, mode, &pathfinder)
        };
        match result {
            Ok(outcome) => println!("{}", outcome),
            Err(gridbot::Error::Cancelled) => println!(
                "Search stopped before finding a path. Final score: {}",
                game.score()
            ),
            Err(e) => return Err(e).context("Failed to play game."),
        }

        if args.once || !console::confirm(&mut input, &mut output, "Play again? (y/n): ")? {
            break;
        }
    }

    Ok(())
}

fn resolve_settings<R: BufRead, W: Write>(
    args: &CLIArgs,
    input: &mut R,
    output: &mut W,
) -> Result<GridSettings, gridbot::Error> {
    let width = match args.width {
        Some(width) => width,
        None => console::prompt_value(input, output, "Width of the grid: ")?,
    };
    let height = match args.height {
        Some(height) => height,
        None => console::prompt_value(input, output, "Height of the grid: ")?,
    };
    let obstacle_density = match args.obstacle_density {
        Some(density) => density,
        None => console::prompt_value(input, output, "Obstacle density (%): ")?,
    };
    let bonus_density = match args.bonus_density {
        Some(density) => density,
        None => console::prompt_value(input, output, "Bonus density (%): ")?,
    };

    Ok(GridSettings::new(width, height, obstacle_density, bonus_density))
}

fn play_plain<R: BufRead, W: Write>(
    game: &mut Game,
    mode: Mode,
    pathfinder: &Pathfinder,
    input: &mut R,
    output: &mut W,
) -> Result<Outcome, gridbot::Error> {
    match mode {
        Mode::Manual => {
            writeln!(
                output,
                "Move with z/q/s/d (or w/a/s/d), several per line if you like, 'quit' to stop."
            )
            .map_err(gridbot::Error::TerminalError)?;
            let mut commands = LineInput::new(input);
            game.play_manual(&mut commands, &mut PlainScreen::new(output))
        }
        Mode::Auto => game.play_automatic(pathfinder, &mut PlainScreen::new(output)),
    }
}

fn play_on_screen(
    args: &CLIArgs,
    game: &mut Game,
    mode: Mode,
    pathfinder: &Pathfinder,
) -> Result<Outcome, gridbot::Error> {
    let frame_interval = match mode {
        Mode::Manual => Duration::ZERO,
        Mode::Auto => Duration::from_millis(args.step_delay_ms),
    };
    let mut screen = Screen::new(frame_interval).with_final_hold(FINAL_FRAME_HOLD);
    screen.start()?;
    let result = match mode {
        Mode::Manual => {
            screen.set_status("Move with arrows or z/q/s/d, Esc to quit.");
            let mut commands = TerminalInput::start();
            game.play_manual(&mut commands, &mut screen)
        }
        Mode::Auto => {
            screen.set_status("Robot is driving itself.");
            game.play_automatic(pathfinder, &mut screen)
        }
    };
    // The game error comes first, the terminal is restored either way.
    let stop_result = screen.stop();
    let outcome = result?;
    stop_result?;
    Ok(outcome)
}
