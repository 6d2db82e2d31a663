//!
//! Single date picker with time and a jalali range picker.
//!
//! Tab switches between them, F10 or Esc quits.
//! The emitted values are shown in the status line, the log
//! goes to `test.log`.
//!

use anyhow::anyhow;
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use rat_datepicker::adapter::CalendarType;
use rat_datepicker::event::{HandleEvent, Outcome, PickerOutcome, Regular};
use rat_datepicker::focus::{Focus, FocusBuilder};
use rat_datepicker::picker::{DatePicker, DatePickerState, DatePickerStyle, ValueCalendar};
use rat_datepicker::selection::{RangeSelection, SingleSelection};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Style, Stylize};
use ratatui::text::Line;
use ratatui::widgets::{Block, StatefulWidget, Widget};
use ratatui::{Frame, Terminal};
use std::fs;
use std::io::stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};

fn main() -> Result<(), anyhow::Error> {
    setup_logging()?;

    let mut state = State::new();

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;

    let r = run(&mut state);

    disable_raw_mode()?;
    stdout().execute(DisableMouseCapture)?;
    stdout().execute(LeaveAlternateScreen)?;

    r
}

struct State {
    single: DatePickerState<SingleSelection>,
    range: DatePickerState<RangeSelection>,
    status: String,
}

impl State {
    fn new() -> Self {
        let mut single = DatePickerState::named("single");
        single.set_format("yyyy/MM/dd HH:mm");

        let mut range = DatePickerState::named("range");
        range.set_calendar_type(CalendarType::Jalali);
        range.set_value_calendar(ValueCalendar::Gregorian);
        range.set_show_sidebar(false);

        Self {
            single,
            range,
            status: String::new(),
        }
    }

    fn focus(&self, old: Option<Focus>) -> Focus {
        let mut builder = FocusBuilder::new(old);
        builder.widget(&self.single);
        builder.widget(&self.range);
        builder.build()
    }
}

fn run(state: &mut State) -> Result<(), anyhow::Error> {
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;

    let mut focus = state.focus(None);
    focus.first();

    loop {
        terminal.draw(|frame| render(frame, state))?;

        let timeout = state
            .range
            .debounce_sleep(Instant::now())
            .unwrap_or(Duration::from_millis(250));
        if !crossterm::event::poll(timeout)? {
            if state.range.poll_debounce(Instant::now()).is_some() {
                emit(state);
            }
            continue;
        }

        let event = crossterm::event::read().map_err(|e| anyhow!(e))?;
        if let Event::Key(KeyEvent {
            code: KeyCode::F(10) | KeyCode::Esc,
            kind: KeyEventKind::Press,
            ..
        }) = event
        {
            break Ok(());
        }

        focus = state.focus(Some(focus));
        let f = focus.handle(&event, Regular);

        let r = state.single.handle(&event, Regular);
        let r = if r == PickerOutcome::Continue {
            state.range.handle(&event, Regular)
        } else {
            r
        };
        if matches!(r, PickerOutcome::Selected | PickerOutcome::Changed) || f == Outcome::Changed {
            emit(state);
        }
    }
}

fn emit(state: &mut State) {
    if let Some(v) = state.single.take_changed_value() {
        log::debug!("single {}", v);
        state.status = format!("single: {}", v);
    }
    if let Some((start, end)) = state.range.take_changed_value() {
        log::debug!("range {} - {}", start, end);
        state.status = format!("range: {} - {}", start, end);
    }
}

fn render(frame: &mut Frame<'_>, state: &mut State) {
    let l0 = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).split(frame.area());
    let l1 = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)])
        .spacing(1)
        .split(l0[0]);

    let style = DatePickerStyle {
        style: Style::new().white().on_black(),
        select: Some(Style::new().black().on_cyan()),
        range: Some(Style::new().on_blue()),
        today: Some(Style::new().yellow()),
        disabled: Some(Style::new().dark_gray()),
        other_month: Some(Style::new().gray()),
        focus: Some(Style::new().black().on_light_green()),
        ..Default::default()
    };

    DatePicker::new()
        .styles(style.clone())
        .block(Block::bordered().title(state.single.text()))
        .render(l1[0], frame.buffer_mut(), &mut state.single);

    let title = format!(
        "{} - {}",
        state.range.text(rat_datepicker::selection::ActiveEndpoint::Start),
        state.range.text(rat_datepicker::selection::ActiveEndpoint::End)
    );
    DatePicker::new()
        .styles(style)
        .block(Block::bordered().title(title))
        .render(l1[1], frame.buffer_mut(), &mut state.range);

    Line::from(state.status.as_str()).render(l0[1], frame.buffer_mut());
}

fn setup_logging() -> Result<(), anyhow::Error> {
    let log = PathBuf::from("test.log");
    if log.exists() {
        fs::remove_file(&log)?;
    }
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}] {}", record.level(), message))
        })
        .level(log::LevelFilter::Debug)
        .chain(fern::log_file(&log)?)
        .apply()?;
    Ok(())
}
