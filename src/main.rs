use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use roadrush::assets::Sprites;
use roadrush::build_info;
use roadrush::config::{parse_args, CliCommand, GameConfig, USAGE};
use roadrush::core::{GameLoop, GameState, LoopControl, RoadInput};
use roadrush::input::map_key;
use roadrush::ui::draw_ui;
use roadrush::utils::logging;
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

type Term = Terminal<CrosstermBackend<Stdout>>;

fn main() -> io::Result<()> {
    logging::init();

    // Handle CLI arguments on top of ~/.roadrush/config.json
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match parse_args(&args, GameConfig::load()) {
        Ok(CliCommand::Play(config)) => config,
        Ok(CliCommand::Version) => {
            println!("{}", build_info::version_line());
            return Ok(());
        }
        Ok(CliCommand::Help) => {
            println!("{}", USAGE);
            return Ok(());
        }
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Run 'roadrush --help' for usage.");
            std::process::exit(1);
        }
    };
    log::info!("starting {}", build_info::version_line());
    log::info!("config: {:?}", config);

    let sprites = Sprites::load(&config.assets_dir);
    log::info!(
        "{}/3 sprites loaded from {}",
        sprites.loaded_count(),
        config.assets_dir.display()
    );

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let state = GameState::new(config.variant, &mut rng);
    let mut game = GameLoop::new(state, Duration::from_millis(config.game_over_display_ms));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let result = run(&mut terminal, &mut game, &sprites, &config, &mut rng);

    // Cleanup terminal, even when the loop failed
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result?;

    log::info!(
        "exit: phase={:?} score={}",
        game.state.phase,
        game.state.score
    );
    println!("Final score: {}", game.state.score);

    Ok(())
}

/// Frame-paced input → update → render loop.
fn run(
    terminal: &mut Term,
    game: &mut GameLoop,
    sprites: &Sprites,
    config: &GameConfig,
    rng: &mut StdRng,
) -> io::Result<()> {
    let frame_budget = Duration::from_secs_f64(config.frame_seconds());
    let mut last_frame = Instant::now();

    terminal.draw(|frame| draw_ui(frame, &game.state, sprites))?;

    loop {
        let inputs = collect_inputs(last_frame + frame_budget, game)?;

        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f64();
        last_frame = now;

        if game.frame(inputs, dt, rng) == LoopControl::Exit {
            return Ok(());
        }

        terminal.draw(|frame| draw_ui(frame, &game.state, sprites))?;
    }
}

/// Gather key events until `deadline`. This wait is the frame limiter.
fn collect_inputs(deadline: Instant, game: &GameLoop) -> io::Result<Vec<RoadInput>> {
    let mut inputs = Vec::new();
    loop {
        let timeout = deadline.saturating_duration_since(Instant::now());
        if !event::poll(timeout)? {
            return Ok(inputs);
        }
        if let Event::Key(key) = event::read()? {
            inputs.push(map_key(key, game.state.variant));
        }
        if Instant::now() >= deadline {
            return Ok(inputs);
        }
    }
}
