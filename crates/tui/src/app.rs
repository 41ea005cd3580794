use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use sift_core::config::{AppConfig, RenderPolicy};
use sift_core::ResultsContainer;
use tracing::{debug, error, info};

use crate::events::SearchEvent;

const PAGE_SCROLL: usize = 10;

/// A search the UI loop should dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub generation: u64,
    pub query: String,
}

/// The search widget: the query field, the results pane, and the Enter binding between them.
pub struct App {
    pub query: String,
    pub results: ResultsContainer,
    pub should_quit: bool,
    pub scroll_offset: usize,
    pub in_flight: usize,
    pub last_error: Option<String>,
    pub endpoint: String,
    generation: u64,
    clear_before_search: bool,
    render_policy: RenderPolicy,
    show_errors: bool,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            query: String::new(),
            results: ResultsContainer::new(),
            should_quit: false,
            scroll_offset: 0,
            in_flight: 0,
            last_error: None,
            endpoint: config.search_url(),
            generation: 0,
            clear_before_search: config.clear_before_search,
            render_policy: config.render_policy,
            show_errors: config.show_errors,
        }
    }

    pub fn render_policy(&self) -> RenderPolicy {
        self.render_policy
    }

    /// Keypress handler bound to the query field. Only Enter yields a search.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<SearchRequest> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        match key.code {
            KeyCode::Enter => return Some(self.begin_search()),
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Backspace => {
                self.query.pop();
            }
            KeyCode::Up => self.scroll_up(1),
            KeyCode::Down => self.scroll_down(1),
            KeyCode::PageUp => self.scroll_up(PAGE_SCROLL),
            KeyCode::PageDown => self.scroll_down(PAGE_SCROLL),
            // Chords never type; Shift still does
            KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                self.query.push(c);
            }
            _ => {}
        }
        None
    }

    /// Pasted text lands in the single-line field with line breaks dropped.
    pub fn handle_paste(&mut self, text: &str) {
        self.query.extend(text.chars().filter(|c| *c != '\n' && *c != '\r'));
    }

    /// Clears the pane (unless disabled) and issues the next generation.
    pub fn begin_search(&mut self) -> SearchRequest {
        if self.clear_before_search {
            self.results.clear();
            self.scroll_offset = 0;
        }
        self.generation += 1;
        self.in_flight += 1;

        SearchRequest {
            generation: self.generation,
            query: self.query.clone(),
        }
    }

    pub fn handle_event(&mut self, event: SearchEvent) {
        match event {
            SearchEvent::Completed { generation, query, outcome } => {
                self.in_flight = self.in_flight.saturating_sub(1);

                if self.render_policy == RenderPolicy::LatestRequest && generation < self.generation {
                    debug!("Dropping stale response #{} for {:?} (latest is #{})", generation, query, self.generation);
                    return;
                }

                match outcome {
                    Ok(results) => {
                        let rendered = self.results.render(&results);
                        info!("Rendered {} rows for {:?}", rendered, query);
                        self.last_error = None;
                    }
                    Err(e) => {
                        error!("❌ Search for {:?} failed: {}", query, e);
                        if self.show_errors {
                            self.last_error = Some(e.to_string());
                        }
                    }
                }
            }
        }
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        let max = self.results.len().saturating_sub(1);
        self.scroll_offset = (self.scroll_offset + lines).min(max);
    }
}
