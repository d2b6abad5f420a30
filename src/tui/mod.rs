//! Ratatui-based terminal UI.
//!
//! The TUI provides a settings panel for choosing the report mode and target
//! year, then renders the four chart panels of the selected report. Every
//! selector change reruns the aggregation pipeline against the immutable
//! dataset and redraws.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, List, ListItem, Paragraph},
    Terminal,
};

use crate::app::pipeline::{self, RunOutput};
use crate::charts::{ChartKind, ChartSpec, DashView, AMBER, PLUM, STEEL_BLUE};
use crate::cli::ReportArgs;
use crate::domain::{DashConfig, ReportMode};
use crate::error::AppError;
use crate::io::ingest::Dataset;

mod plotters_chart;

use plotters_chart::PanelChart;

/// Start the TUI. The dataset is loaded before the terminal is switched into
/// raw mode so that load errors print normally.
pub fn run(args: ReportArgs) -> Result<(), AppError> {
    let config = crate::app::dash_config_from_args(&args);
    let dataset = pipeline::load_dataset(&config)?;
    let mut app = App::new(config, dataset);

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    config: DashConfig,
    dataset: Dataset,
    mode: ReportMode,
    /// Index into `dataset.years`.
    year_idx: usize,
    selected_field: usize,
    status: String,
    run: RunOutput,
}

impl App {
    fn new(config: DashConfig, dataset: Dataset) -> Self {
        let year = pipeline::resolve_year(&dataset, config.year);
        let year_idx = dataset
            .years
            .iter()
            .position(|&y| y == year)
            .unwrap_or(dataset.years.len().saturating_sub(1));

        let mode = config.mode;
        let run = pipeline::run_report(&dataset, mode, dataset.years[year_idx]);
        let status = format!(
            "Loaded {} rows ({} skipped).",
            dataset.rows_used,
            dataset.row_errors.len()
        );

        Self {
            config,
            dataset,
            mode,
            year_idx,
            selected_field: 0,
            status,
            run,
        }
    }

    fn current_year(&self) -> i32 {
        self.dataset.years[self.year_idx.min(self.dataset.years.len() - 1)]
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns true when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                if self.selected_field > 0 {
                    self.selected_field -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected_field < 1 {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Char('m') => {
                self.mode = self.mode.toggled();
                self.recompute();
            }
            KeyCode::Char('r') => self.reload(),
            _ => {}
        }

        false
    }

    fn adjust_field(&mut self, delta: i32) {
        match self.selected_field {
            0 => {
                self.mode = self.mode.toggled();
                self.recompute();
            }
            1 => {
                let last = self.dataset.years.len() - 1;
                self.year_idx = if delta >= 0 {
                    (self.year_idx + 1).min(last)
                } else {
                    self.year_idx.saturating_sub(1)
                };
                self.recompute();
                if self.mode == ReportMode::Recession {
                    self.status = format!(
                        "year: {} (applies to yearly mode)",
                        self.current_year()
                    );
                }
            }
            _ => {}
        }
    }

    /// Rerun the pipeline for the current selectors. The dataset itself is
    /// never mutated here.
    fn recompute(&mut self) {
        self.run = pipeline::run_report(&self.dataset, self.mode, self.current_year());
        self.status = match &self.run.view {
            DashView::Report(view) => view.heading.clone(),
            DashView::Empty { message, .. } => message.clone(),
        };
    }

    /// Re-read the data source, keeping the current dataset on failure.
    fn reload(&mut self) {
        match pipeline::load_dataset(&self.config) {
            Ok(dataset) => {
                let year = self.current_year();
                self.year_idx = dataset
                    .years
                    .iter()
                    .position(|&y| y == year)
                    .unwrap_or(dataset.years.len() - 1);
                self.dataset = dataset;
                self.recompute();
                self.status = format!(
                    "Reloaded: {} rows ({} skipped).",
                    self.dataset.rows_used,
                    self.dataset.row_errors.len()
                );
            }
            Err(err) => {
                self.status = format!("Reload failed: {err}");
            }
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Min(0),
                Constraint::Length(4),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_settings(frame, chunks[2]);
        self.draw_footer(frame, chunks[3]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let stats = &self.dataset.stats;
        let lines = vec![
            Line::from(vec![
                Span::styled("autodash", Style::default().fg(Color::Cyan)),
                Span::raw(" — Automobile Sales Reporting Dashboard"),
            ]),
            Line::from(Span::styled(
                format!(
                    "mode: {} | year: {} | rows: {} | years: {}-{}",
                    self.mode.display_name(),
                    self.current_year(),
                    stats.n_rows,
                    stats.year_min,
                    stats.year_max,
                ),
                Style::default().fg(Color::Gray),
            )),
            Line::from(Span::styled(
                format!(
                    "recession rows: {} | vehicle types: {} | total sales: {:.0}",
                    stats.recession_rows, stats.vehicle_types, stats.total_sales,
                ),
                Style::default().fg(Color::Gray),
            )),
        ];

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        match &self.run.view {
            DashView::Empty { heading, message } => {
                let block = Block::default().title(heading.as_str()).borders(Borders::ALL);
                let inner = block.inner(area);
                frame.render_widget(block, area);
                let msg = Paragraph::new(message.as_str())
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::Yellow));
                let mid = Rect {
                    x: inner.x,
                    y: inner.y + inner.height / 2,
                    width: inner.width,
                    height: 1.min(inner.height),
                };
                frame.render_widget(msg, mid);
            }
            DashView::Report(view) => {
                let rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(area);
                let top = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(rows[0]);
                let bottom = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(rows[1]);

                let cells = [top[0], top[1], bottom[0], bottom[1]];
                for (spec, cell) in view.charts.iter().zip(cells) {
                    self.draw_panel(frame, cell, spec);
                }
            }
        }
    }

    fn draw_panel(&self, frame: &mut ratatui::Frame<'_>, area: Rect, spec: &ChartSpec) {
        let block = Block::default().title(spec.title.as_str()).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        match spec.kind {
            ChartKind::Bar => draw_bar_panel(frame, inner, spec),
            ChartKind::Proportion => draw_proportion_panel(frame, inner, spec),
            _ => frame.render_widget(PanelChart { spec }, inner),
        }
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items = vec![
            ListItem::new(format!("Mode: {}", self.mode.display_name())),
            ListItem::new(format!("Year: {}", self.current_year())),
        ];

        let list = List::new(items)
            .block(Block::default().title("Selectors").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  m mode  r reload  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Vertical bar chart over the spec's categories.
///
/// Values are scaled by 100 before the u64 conversion so sub-unit series
/// (rates, shares) keep resolution; the printed value is the real one.
fn draw_bar_panel(frame: &mut ratatui::Frame<'_>, area: Rect, spec: &ChartSpec) {
    let n = spec.values.len();
    if n == 0 {
        return;
    }

    let bars: Vec<Bar> = spec
        .categories
        .iter()
        .zip(&spec.values)
        .map(|(label, &v)| {
            Bar::default()
                .label(Line::from(label.clone()))
                .value((v.max(0.0) * 100.0).round() as u64)
                .text_value(format!("{v:.0}"))
        })
        .collect();

    let bar_width = ((area.width as usize / n).saturating_sub(1)).clamp(3, 12) as u16;
    let (r, g, b) = spec.color;
    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Rgb(r, g, b)))
        .value_style(Style::default().fg(Color::Black).bg(Color::Rgb(r, g, b)));

    frame.render_widget(chart, area);
}

/// Share-of-total panel: one horizontal bar per category with its percentage.
/// The terminal stand-in for the pie chart.
fn draw_proportion_panel(frame: &mut ratatui::Frame<'_>, area: Rect, spec: &ChartSpec) {
    let total: f64 = spec.values.iter().sum();
    if total <= 0.0 {
        let msg = Paragraph::new("No data for this panel.")
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(msg, area);
        return;
    }

    let label_width = spec
        .categories
        .iter()
        .map(String::len)
        .max()
        .unwrap_or(0)
        .min(area.width as usize / 3);
    let palette = [STEEL_BLUE, PLUM, AMBER];

    let mut lines = Vec::with_capacity(spec.values.len());
    for (i, (label, &value)) in spec.categories.iter().zip(&spec.values).enumerate() {
        let share = value / total;
        let usable = (area.width as usize).saturating_sub(label_width + 10);
        let bar_len = (share * usable as f64).round() as usize;
        let (r, g, b) = palette[i % palette.len()];

        lines.push(Line::from(vec![
            Span::raw(format!("{label:<label_width$} ")),
            Span::styled(
                format!("{:>5.1}% ", share * 100.0),
                Style::default().fg(Color::Gray),
            ),
            Span::styled("█".repeat(bar_len), Style::default().fg(Color::Rgb(r, g, b))),
        ]));
    }

    frame.render_widget(Paragraph::new(Text::from(lines)), area);
}
