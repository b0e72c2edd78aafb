//! fromagerie operations dashboard - Terminal User Interface
//!
//! Menu of the four calculators with live inputs, results and chart.
//! App logic lives in `fromagerie::tui::dashboard_app`.

#![forbid(unsafe_code)]

#[cfg(feature = "tui")]
fn main() -> std::io::Result<()> {
    use fromagerie::tui::DashboardApp;

    let args: Vec<String> = std::env::args().collect();
    let app = match args.get(1) {
        Some(path) => match DashboardApp::from_yaml_file(path) {
            Ok(app) => app,
            Err(e) => {
                eprintln!("Error loading '{path}': {e}");
                eprintln!("Usage: fromagerie-tui [path/to/scenario.yaml]");
                std::process::exit(1);
            }
        },
        None => DashboardApp::new(),
    };

    tui::run(app)
}

#[cfg(not(feature = "tui"))]
fn main() {
    eprintln!("TUI feature not enabled. Run with: cargo run --bin fromagerie-tui --features tui");
    std::process::exit(1);
}

#[cfg(feature = "tui")]
mod tui {
    use crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    };
    use fromagerie::models::ModelKind;
    use fromagerie::tui::DashboardApp;
    use fromagerie::visualization::Chart as ChartModel;
    use ratatui::{
        backend::CrosstermBackend,
        layout::{Constraint, Direction, Layout, Rect},
        style::{Color, Modifier, Style},
        symbols,
        text::{Line, Span},
        widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Tabs, Wrap},
        Frame, Terminal,
    };
    use std::io;
    use std::time::Duration;

    const SERIES_COLORS: [Color; 4] = [Color::Cyan, Color::Magenta, Color::Green, Color::Yellow];
    const FILL_STEPS: usize = 6;

    pub fn run(mut app: DashboardApp) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, crossterm::cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let result = run_main_loop(&mut terminal, &mut app);

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            crossterm::cursor::Show
        )?;

        result
    }

    fn run_main_loop(
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        app: &mut DashboardApp,
    ) -> io::Result<()> {
        // Nothing animates; redraw only after input.
        while !app.should_quit() {
            terminal.draw(|f| ui(f, app))?;
            if event::poll(Duration::from_millis(250))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        app.handle_key(key.code);
                    }
                }
            }
        }
        Ok(())
    }

    fn ui(f: &mut Frame, app: &DashboardApp) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(12),
                Constraint::Length(3),
            ])
            .split(f.area());

        render_menu(f, chunks[0], app);

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[1]);

        let left_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(12), Constraint::Min(6)])
            .split(main_chunks[0]);

        render_inputs(f, left_chunks[0], app);
        render_result(f, left_chunks[1], app);
        render_chart(f, main_chunks[1], app);
        render_controls(f, chunks[2]);
    }

    fn render_menu(f: &mut Frame, area: Rect, app: &DashboardApp) {
        let titles: Vec<&str> = ModelKind::ALL.iter().map(|k| k.label()).collect();
        let title = app
            .scenario_name
            .as_ref()
            .map_or_else(|| "fromagerie".to_string(), |name| format!("fromagerie - {name}"));
        let tabs = Tabs::new(titles)
            .select(app.selected.index())
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_widget(tabs, area);
    }

    fn render_inputs(f: &mut Frame, area: Rect, app: &DashboardApp) {
        let lines: Vec<Line> = if app.fields().is_empty() {
            vec![Line::from(Span::styled(
                "No inputs: 200 + 50·sin(2π·m/12)",
                Style::default().fg(Color::Gray),
            ))]
        } else {
            app.fields()
                .iter()
                .enumerate()
                .map(|(i, field)| {
                    let focused = i == app.focus;
                    let marker = if focused { "▶ " } else { "  " };
                    let style = if focused {
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    Line::from(vec![
                        Span::raw(marker),
                        Span::styled(format!("{:<18}", field.label), Style::default().fg(Color::Gray)),
                        Span::styled(field.text.clone(), style),
                    ])
                })
                .collect()
        };

        let inputs = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Inputs")
                .border_style(Style::default().fg(Color::Yellow)),
        );
        f.render_widget(inputs, area);
    }

    fn render_result(f: &mut Frame, area: Rect, app: &DashboardApp) {
        let (text, color) = match &app.result {
            Ok(report) => (summary_lines(report), Color::Green),
            Err(message) => (
                message.lines().map(|l| Line::from(l.to_string())).collect(),
                Color::Red,
            ),
        };
        let result = Paragraph::new(text).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Result")
                .border_style(Style::default().fg(color)),
        );
        f.render_widget(result, area);
    }

    fn summary_lines(report: &fromagerie::models::ModelReport) -> Vec<Line<'static>> {
        use fromagerie::cli::{format_inventory, format_production, format_queue, format_seasonal};
        use fromagerie::models::ModelReport;

        let text = match report {
            ModelReport::Production(r) => format_production(r),
            ModelReport::Inventory(r) => format_inventory(r),
            ModelReport::Queueing(r) => format_queue(r),
            ModelReport::Seasonal(r) => format_seasonal(r),
        };
        text.lines()
            .filter(|l| !l.starts_with('━'))
            .map(|l| Line::from(l.to_string()))
            .collect()
    }

    fn render_chart(f: &mut Frame, area: Rect, app: &DashboardApp) {
        let block = Block::default().borders(Borders::ALL);
        let Some(model) = app.chart() else {
            f.render_widget(
                Paragraph::new("No chart").block(block.title("Chart")),
                area,
            );
            return;
        };
        let (Some((x_min, x_max)), Some((y_min, y_max))) = (model.x_bounds(), model.y_bounds())
        else {
            f.render_widget(Paragraph::new("No data").block(block.title(model.title)), area);
            return;
        };

        let fill_points = fill_points(&model);
        let marker_lines: Vec<Vec<(f64, f64)>> = model
            .markers
            .iter()
            .map(|m| vec![(m.x, y_min), (m.x, y_max)])
            .collect();

        let mut datasets = Vec::new();
        if let Some(fill) = &model.fill {
            datasets.push(
                Dataset::default()
                    .name(fill.name.clone())
                    .marker(symbols::Marker::Dot)
                    .graph_type(GraphType::Scatter)
                    .style(Style::default().fg(Color::DarkGray))
                    .data(&fill_points),
            );
        }
        for (i, series) in model.series.iter().enumerate() {
            datasets.push(
                Dataset::default()
                    .name(series.name.clone())
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(SERIES_COLORS[i % SERIES_COLORS.len()]))
                    .data(&series.points),
            );
        }
        for (marker, points) in model.markers.iter().zip(&marker_lines) {
            datasets.push(
                Dataset::default()
                    .name(marker.label.clone())
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(Color::Red))
                    .data(points),
            );
        }

        let chart = Chart::new(datasets)
            .block(block.title(model.title.clone()))
            .x_axis(
                Axis::default()
                    .title(model.x_label.clone())
                    .style(Style::default().fg(Color::Gray))
                    .bounds([x_min, x_max])
                    .labels(axis_labels(x_min, x_max)),
            )
            .y_axis(
                Axis::default()
                    .title(model.y_label.clone())
                    .style(Style::default().fg(Color::Gray))
                    .bounds([y_min, y_max])
                    .labels(axis_labels(y_min, y_max)),
            );
        f.render_widget(chart, area);
    }

    /// Dots stacked under each band's upper edge.
    fn fill_points(model: &ChartModel) -> Vec<(f64, f64)> {
        model
            .fill
            .iter()
            .flat_map(|fill| fill.bands.iter())
            .flat_map(|&(x, upper)| {
                (0..=FILL_STEPS).map(move |k| (x, upper * k as f64 / FILL_STEPS as f64))
            })
            .collect()
    }

    fn axis_labels(min: f64, max: f64) -> Vec<Span<'static>> {
        let mid = (min + max) / 2.0;
        [min, mid, max]
            .iter()
            .map(|v| Span::raw(format!("{v:.0}")))
            .collect()
    }

    fn render_controls(f: &mut Frame, area: Rect) {
        let controls = Paragraph::new(Line::from(vec![
            Span::styled("←/→", Style::default().fg(Color::Cyan)),
            Span::raw(" calculator  "),
            Span::styled("↑/↓", Style::default().fg(Color::Cyan)),
            Span::raw(" field  "),
            Span::styled("0-9 . -", Style::default().fg(Color::Cyan)),
            Span::raw(" edit  "),
            Span::styled("Backspace/Del", Style::default().fg(Color::Cyan)),
            Span::raw(" erase  "),
            Span::styled("R", Style::default().fg(Color::Cyan)),
            Span::raw(" reset  "),
            Span::styled("Q", Style::default().fg(Color::Cyan)),
            Span::raw(" quit"),
        ]))
        .block(Block::default().borders(Borders::ALL).title("Controls"));
        f.render_widget(controls, area);
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use ratatui::backend::TestBackend;

        fn draw(app: &DashboardApp) -> String {
            let backend = TestBackend::new(120, 40);
            let mut terminal = Terminal::new(backend).expect("terminal");
            terminal.draw(|f| ui(f, app)).expect("draw");
            terminal
                .backend()
                .buffer()
                .content()
                .iter()
                .map(ratatui::buffer::Cell::symbol)
                .collect()
        }

        #[test]
        fn test_draw_every_calculator() {
            let mut app = DashboardApp::new();
            for kind in ModelKind::ALL {
                app.select(kind);
                let screen = draw(&app);
                assert!(screen.contains("Inputs"));
                assert!(screen.contains("Result"));
            }
        }

        #[test]
        fn test_draw_rejection() {
            let mut app = DashboardApp::new();
            app.select(ModelKind::Queueing);
            app.handle_key(crossterm::event::KeyCode::Delete);
            let screen = draw(&app);
            assert!(screen.contains("No chart"));
        }

        #[test]
        fn test_fill_points_cover_band() {
            let app = DashboardApp::new();
            let model = app.chart().expect("chart");
            let points = fill_points(&model);
            let bands = model.fill.as_ref().map_or(0, |f| f.bands.len());
            assert_eq!(points.len(), bands * (FILL_STEPS + 1));
        }

        #[test]
        fn test_axis_labels() {
            let labels = axis_labels(0.0, 100.0);
            assert_eq!(labels.len(), 3);
            assert_eq!(labels[1].content, "50");
        }
    }
}
