use anyhow::Context;
use bisect_maze::logging::init_file_logging;
use bisect_maze::{Config, Direction, GenState, Session};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{ExecutableCommand, QueueableCommand};
use std::io::{self, Stdout, Write};
use std::thread;
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

const CELL_W: usize = 2;

#[derive(Clone, Copy, PartialEq)]
enum Glyph {
    Wall,
    Floor,
    Walker(Direction),
}

impl Glyph {
    fn text(self) -> &'static str {
        match self {
            Glyph::Wall => "██",
            Glyph::Floor => "  ",
            Glyph::Walker(Direction::Up) => "▲",
            Glyph::Walker(Direction::Right) => "▶",
            Glyph::Walker(Direction::Down) => "▼",
            Glyph::Walker(Direction::Left) => "◀",
        }
    }

    fn color(self) -> Color {
        match self {
            Glyph::Wall => Color::White,
            Glyph::Floor => Color::Reset,
            Glyph::Walker(_) => Color::Yellow,
        }
    }
}

struct Renderer {
    // `None` forces the cell to be drawn on the next frame.
    drawn: Vec<Option<Glyph>>,
    last_hud: Option<String>,
    origin: (u16, u16),
}

impl Renderer {
    fn new(width: usize, height: usize) -> Self {
        Self {
            drawn: vec![None; width * height],
            last_hud: None,
            origin: (0, 1),
        }
    }

    fn invalidate(&mut self) {
        self.drawn.fill(None);
        self.last_hud = None;
    }
}

fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    if let Some(path) = &config.log_path {
        init_file_logging(path).with_context(|| format!("opening log file {}", path.display()))?;
    }
    let session = Session::init(&config).context("starting maze session")?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, session, &config);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(stdout: &mut Stdout, mut session: Session, config: &Config) -> anyhow::Result<()> {
    let (width, height) = session.grid().dimensions();
    let mut renderer = Renderer::new(width, height);
    let tick = Duration::from_millis(config.tick_ms);
    let frame_time = Duration::from_micros(1_000_000 / config.render_fps.max(1));
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        session.deinit();
                        return Ok(());
                    }
                    KeyCode::Char('h') | KeyCode::Left => session.rotate_direction(-1),
                    KeyCode::Char('l') | KeyCode::Right => session.rotate_direction(1),
                    KeyCode::Char('k') | KeyCode::Char(' ') | KeyCode::Up => {
                        session.advance();
                    }
                    KeyCode::Char('r') => session.regenerate(),
                    _ => {}
                }
            }
        }

        if !session.is_done() && last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            session.tick()?;
        }
        render(stdout, &session, &mut renderer)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

fn render(stdout: &mut Stdout, session: &Session, renderer: &mut Renderer) -> io::Result<()> {
    let (width, height) = session.grid().dimensions();
    let (term_w, term_h) = terminal::size()?;
    let needed = u16::try_from(width * CELL_W)
        .ok()
        .zip(u16::try_from(height + 2).ok());

    let origin = match needed {
        Some((needed_w, needed_h)) if term_w >= needed_w && term_h >= needed_h => {
            ((term_w - needed_w) / 2, (term_h - needed_h) / 2 + 1)
        }
        _ => {
            stdout.queue(MoveTo(0, 0))?;
            stdout.queue(Clear(ClearType::All))?;
            stdout.queue(Print(format!(
                "Terminal too small for a {}x{} maze. Current: {}x{}.",
                width, height, term_w, term_h
            )))?;
            stdout.flush()?;
            renderer.invalidate();
            return Ok(());
        }
    };
    if origin != renderer.origin {
        renderer.origin = origin;
        stdout.queue(Clear(ClearType::All))?;
        renderer.invalidate();
    }

    let status = match session.state() {
        GenState::Carving => "carving",
        GenState::Done => "done",
    };
    let hud = format!(
        "Seed: {}  Maze: {}  (h/l turn, k advance, r new, q quit)",
        session.seed(),
        status
    );
    if renderer.last_hud.as_ref() != Some(&hud) {
        stdout.queue(MoveTo(origin.0, origin.1 - 1))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(SetForegroundColor(Color::White))?;
        stdout.queue(Print(&hud))?;
        stdout.queue(ResetColor)?;
        renderer.last_hud = Some(hud);
    }

    for (y, row) in session.grid().rows().enumerate() {
        for (x, &wall) in row.iter().enumerate() {
            let glyph = cell_for(session, x, y, wall);
            let slot = &mut renderer.drawn[y * width + x];
            if *slot != Some(glyph) {
                *slot = Some(glyph);
                // Both casts fit: the size check above bounded width and height.
                draw_cell(stdout, origin.0 + (x * CELL_W) as u16, origin.1 + y as u16, glyph)?;
            }
        }
    }

    stdout.flush()
}

fn cell_for(session: &Session, x: usize, y: usize, wall: bool) -> Glyph {
    let entity = session.entity();
    if entity.pos.x == x && entity.pos.y == y {
        Glyph::Walker(entity.facing)
    } else if wall {
        Glyph::Wall
    } else {
        Glyph::Floor
    }
}

fn draw_cell(stdout: &mut Stdout, col: u16, row: u16, glyph: Glyph) -> io::Result<()> {
    let text = glyph.text();
    let pad = CELL_W.saturating_sub(UnicodeWidthStr::width(text));
    stdout.queue(MoveTo(col, row))?;
    stdout.queue(SetForegroundColor(glyph.color()))?;
    stdout.queue(Print(text))?;
    stdout.queue(Print(" ".repeat(pad)))?;
    stdout.queue(ResetColor)?;
    Ok(())
}
