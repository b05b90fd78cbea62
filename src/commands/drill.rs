use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::commands::scores::{default_recorder, render_recent};
use crate::item::{ItemGenerator, QuizItem};
use crate::palette::Palette;
use crate::record::ScoreRecord;
use crate::session::{SessionEngine, Summary, TickStatus};
use crate::sets::{StudySet, find_sets, load_bank};
use crate::tui::Theme;
use crate::utils::{ask_yn, pluralize};

use anyhow::{Context, Result, bail};
use chrono::{Local, Utc};
use crossterm::event::KeyModifiers;
use crossterm::{
    event::{
        self, Event, KeyCode, KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use dialoguer::{Select, theme::ColorfulTheme};
use rand::Rng;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

const FLASH_SECS: f64 = 2.0;
const POLL_MILLIS: u64 = 100;

pub fn run(
    paths: Vec<PathBuf>,
    set_name: Option<String>,
    duration_secs: u32,
    seed: Option<u64>,
) -> Result<()> {
    if duration_secs == 0 {
        bail!("Session duration must be at least 1 second.");
    }

    let sets = find_sets(&paths)?;
    if sets.is_empty() {
        bail!("No study sets found. Pass a csv of Term,Definition rows or a directory containing one.");
    }
    let set = choose_set(&sets, set_name)?;
    let bank = load_bank(&set)?;

    let generator = match seed {
        Some(seed) => ItemGenerator::seeded(seed),
        None => ItemGenerator::new(),
    };
    let mut engine = SessionEngine::new(generator);
    engine.start(bank, duration_secs, set.name.clone(), Utc::now());

    start_drill_session(&mut engine)?;

    let summary = engine.summary()?;
    print_summary(&summary);

    let recorder = default_recorder()?;
    if ask_yn("Save this score?".to_string()) {
        let record = ScoreRecord::from_summary(&summary, Local::now());
        recorder.append(&record).context("Score not saved")?;
        println!(
            "{}",
            Palette::dim(format!("Saved to {}", recorder.path().display()))
        );
    }

    render_recent(&recorder.recent(5)?);
    Ok(())
}

fn choose_set(sets: &[StudySet], requested: Option<String>) -> Result<StudySet> {
    if let Some(name) = requested {
        return sets
            .iter()
            .find(|set| set.name == name)
            .cloned()
            .with_context(|| {
                let names: Vec<&str> = sets.iter().map(|s| s.name.as_str()).collect();
                format!(
                    "Study set '{}' not found. Available: {}",
                    name,
                    names.join(", ")
                )
            });
    }

    if sets.len() == 1 {
        return Ok(sets[0].clone());
    }

    let names: Vec<&str> = sets.iter().map(|s| s.name.as_str()).collect();
    let picked = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Choose a study set")
        .items(&names)
        .default(0)
        .interact()
        .context("No study set chosen")?;
    Ok(sets[picked].clone())
}

struct LastAnswer {
    was_correct: bool,
    correct_definition: String,
    answered_at: Instant,
}

fn start_drill_session<R: Rng>(engine: &mut SessionEngine<R>) -> Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
                | KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
        )
    )
    .context("failed to configure terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to start terminal")?;
    terminal.hide_cursor().context("failed to hide cursor")?;

    let loop_result = session_loop(&mut terminal, engine);

    teardown_terminal(&mut terminal)?;

    loop_result
}

fn session_loop<R: Rng>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    engine: &mut SessionEngine<R>,
) -> Result<()> {
    let mut last_answer: Option<LastAnswer> = None;

    loop {
        let remaining = match engine.tick(Utc::now())? {
            TickStatus::Expired => {
                engine.finish()?;
                return Ok(());
            }
            TickStatus::Remaining(secs) => secs,
        };

        terminal
            .draw(|frame| {
                let item = engine
                    .current_item()
                    .expect("item should exist while session is active");
                let area = frame.area();
                frame.render_widget(Theme::backdrop(), area);
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(5), Constraint::Length(5)])
                    .split(area);

                let header_line = header_line(
                    engine.set_name(),
                    engine.score(),
                    engine.attempted(),
                    remaining,
                );
                let card_widget = Paragraph::new(format_item_text(item))
                    .block(Theme::panel_with_line(header_line))
                    .wrap(Wrap { trim: false });
                frame.render_widget(card_widget, chunks[0]);

                let footer = Paragraph::new(instructions_text(last_answer.as_ref()))
                    .block(Theme::panel_with_line(Theme::section_header("Controls")));
                frame.render_widget(footer, chunks[1]);
            })
            .context("failed to render frame")?;

        if event::poll(Duration::from_millis(POLL_MILLIS))?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if key.code == KeyCode::Esc
                || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
            {
                engine.finish()?;
                return Ok(());
            }

            let call = match key.code {
                KeyCode::Char('t') | KeyCode::Char('T') => Some(true),
                KeyCode::Char('f') | KeyCode::Char('F') => Some(false),
                _ => None,
            };
            if let Some(user_says_true) = call {
                let outcome = engine.answer(user_says_true)?;
                last_answer = Some(LastAnswer {
                    was_correct: outcome.was_correct,
                    correct_definition: outcome.correct_definition,
                    answered_at: Instant::now(),
                });
            }
        }
    }
}

fn teardown_terminal(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        PopKeyboardEnhancementFlags,
        LeaveAlternateScreen
    )
    .context("failed to restore terminal")?;
    terminal.show_cursor().context("failed to show cursor")?;
    Ok(())
}

fn header_line(set_name: &str, score: u32, attempted: u32, remaining: u32) -> Line<'static> {
    Line::from(vec![
        Theme::label_span(set_name.to_string()),
        Theme::bullet(),
        Theme::span(format!("Score {}/{}", score, attempted)),
        Theme::bullet(),
        Theme::span(format!("{}s left", remaining)),
    ])
}

fn format_item_text(item: &QuizItem) -> String {
    format!(
        "Term:\n{}\n\nDefinition:\n{}\n\nDoes the definition match the term?",
        item.term, item.shown_definition
    )
}

fn instructions_text(last_answer: Option<&LastAnswer>) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Theme::key_chip("T"),
        Span::styled(" True", Theme::success()),
        Theme::bullet(),
        Theme::key_chip("F"),
        Span::styled(" False", Theme::danger()),
        Theme::bullet(),
        Theme::key_chip("Esc"),
        Theme::span(" / "),
        Theme::key_chip("Ctrl+C"),
        Theme::span(" end session"),
    ])];

    if let Some(answer) = last_answer
        && answer.answered_at.elapsed().as_secs_f64() < FLASH_SECS
    {
        let line = if answer.was_correct {
            Line::from(vec![
                Theme::span("Last:"),
                Span::styled(" Correct!", Theme::success()),
            ])
        } else {
            Line::from(vec![
                Theme::span("Last:"),
                Span::styled(" Incorrect.", Theme::danger()),
                Theme::span(format!(
                    " Correct definition: {}",
                    answer.correct_definition
                )),
            ])
        };
        lines.push(line);
    }

    lines
}

fn print_summary(summary: &Summary) {
    println!("{}", Palette::paint(Palette::ACCENT, "Session Complete"));
    println!(
        "{} {}",
        Palette::dim("Set:"),
        Palette::paint(Palette::INFO, &summary.set_name)
    );
    println!(
        "{} {}",
        Palette::dim("Time:"),
        Palette::paint(Palette::INFO, format!("{}s", summary.duration_secs))
    );
    println!(
        "{} {}",
        Palette::dim("Score:"),
        Palette::paint(
            Palette::SUCCESS,
            format!(
                "{} / {} ({}%)",
                summary.score,
                summary.attempted,
                summary.percent_label()
            )
        )
    );
    println!(
        "{}",
        Palette::dim(format!(
            "{} in {} seconds",
            pluralize("answer", summary.attempted as usize),
            summary.duration_secs
        ))
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiz_item(term: &str, shown: &str, is_true: bool, correct: &str) -> QuizItem {
        QuizItem {
            term: term.into(),
            shown_definition: shown.into(),
            is_true_statement: is_true,
            correct_definition: correct.into(),
        }
    }

    fn flatten_line(line: &Line<'_>) -> String {
        line.spans
            .iter()
            .map(|span| span.content.to_string())
            .collect::<String>()
    }

    #[test]
    fn item_text_shows_term_and_shown_definition_only() {
        let item = quiz_item("Shaping", "Linking responses", false, "Reinforcing approximations");

        let text = format_item_text(&item);
        assert!(text.contains("Shaping"));
        assert!(text.contains("Linking responses"));
        assert!(!text.contains("Reinforcing approximations"));
    }

    #[test]
    fn instructions_always_offer_true_false_and_exit() {
        let lines = instructions_text(None);
        let commands = flatten_line(&lines[0]);

        assert!(commands.contains("True"));
        assert!(commands.contains("False"));
        assert!(commands.contains("end session"));
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn recent_miss_flashes_the_correct_definition() {
        let answer = LastAnswer {
            was_correct: false,
            correct_definition: "Reinforcing approximations".into(),
            answered_at: Instant::now(),
        };

        let lines = instructions_text(Some(&answer));
        assert_eq!(lines.len(), 2);
        let flash = flatten_line(&lines[1]);
        assert!(flash.contains("Incorrect"));
        assert!(flash.contains("Reinforcing approximations"));
    }

    #[test]
    fn recent_hit_flashes_without_the_definition() {
        let answer = LastAnswer {
            was_correct: true,
            correct_definition: "Reinforcing approximations".into(),
            answered_at: Instant::now(),
        };

        let lines = instructions_text(Some(&answer));
        let flash = flatten_line(&lines[1]);
        assert!(flash.contains("Correct!"));
        assert!(!flash.contains("Reinforcing approximations"));
    }

    #[test]
    fn header_shows_score_and_countdown() {
        let line = header_line("Section C", 3, 5, 42);
        let text = flatten_line(&line);
        assert!(text.contains("Section C"));
        assert!(text.contains("Score 3/5"));
        assert!(text.contains("42s left"));
    }
}
