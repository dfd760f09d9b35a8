use std::cmp::min;
use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use rusqlite::Connection;

use crate::models::Book;
use crate::store::{add_book, delete_book, fetch_all_books, search_books};

use super::forms::{BookField, BookForm, ConfirmBookDelete};
use super::helpers::{centered_rect, clip_pad, column_widths, surface_error};
use super::screens::CatalogScreen;

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Spaces between adjacent table columns.
const COLUMN_GAP: usize = 2;
/// Width of the selection pointer prefix on every table row.
const POINTER_WIDTH: usize = 2;

/// Fine-grained input modes layered over the catalog table. Keeping this
/// explicit makes it easy to reason about which rendering path runs and what
/// keyboard shortcuts should do.
enum Mode {
    Normal,
    AddingBook(BookForm),
    ConfirmDelete(ConfirmBookDelete),
    Searching(SearchState),
}

/// State for an active inline search.
struct SearchState {
    query: String,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI. The `Connection` is the
/// record store itself: it is owned here for the whole process lifetime and
/// every mutation is followed by a re-fetch so the table always shows what
/// the store holds.
pub struct App {
    conn: Connection,
    catalog: CatalogScreen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(conn: Connection, books: Vec<Book>) -> Self {
        Self {
            conn,
            catalog: CatalogScreen::new(books),
            mode: Mode::Normal,
            status: None,
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mut mode = mem::replace(&mut self.mode, Mode::Normal);

        mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::AddingBook(form) => self.handle_add_book(code, form)?,
            Mode::ConfirmDelete(confirm) => self.handle_confirm_delete(code, confirm)?,
            Mode::Searching(state) => self.handle_search(code, state)?,
        };

        self.mode = mode;
        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Char('q') => {
                *exit = true;
            }
            KeyCode::Esc => {
                // Esc first backs out of an active search; only a second Esc
                // on the full catalog quits.
                if self.catalog.is_filtered() {
                    self.show_all()?;
                    self.set_status("Showing the full catalog.", StatusKind::Info);
                } else {
                    *exit = true;
                }
            }
            KeyCode::Up => self.catalog.move_selection(-1),
            KeyCode::Down => self.catalog.move_selection(1),
            KeyCode::PageUp => self.catalog.move_selection(-5),
            KeyCode::PageDown => self.catalog.move_selection(5),
            KeyCode::Home => self.catalog.select_first(),
            KeyCode::End => self.catalog.select_last(),
            KeyCode::Char('v') | KeyCode::Char('V') => {
                self.clear_status();
                self.show_all()?;
            }
            KeyCode::Char('f') => {
                self.clear_status();
                return Ok(Mode::Searching(SearchState {
                    query: String::new(),
                }));
            }
            KeyCode::Char('+') => {
                self.clear_status();
                return Ok(Mode::AddingBook(BookForm::default()));
            }
            KeyCode::Char('-') => {
                if let Some(book) = self.catalog.current_book().cloned() {
                    self.clear_status();
                    return Ok(Mode::ConfirmDelete(ConfirmBookDelete::from(book)));
                } else {
                    self.set_status("No book selected to delete.", StatusKind::Error);
                }
            }
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_add_book(&mut self, code: KeyCode, mut form: BookForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Add book cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab | KeyCode::BackTab => form.toggle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.save_new_book(&form) {
                Ok(_) => keep_open = false,
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Ok(Mode::AddingBook(form))
        } else {
            Ok(Mode::Normal)
        }
    }

    fn handle_confirm_delete(&mut self, code: KeyCode, confirm: ConfirmBookDelete) -> Result<Mode> {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Deletion cancelled.", StatusKind::Info);
                Ok(Mode::Normal)
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                match self.perform_delete(&confirm) {
                    Ok(_) => Ok(Mode::Normal),
                    Err(err) => {
                        let message = surface_error(&err);
                        self.set_status(message, StatusKind::Error);
                        Ok(Mode::ConfirmDelete(confirm))
                    }
                }
            }
            _ => Ok(Mode::ConfirmDelete(confirm)),
        }
    }

    fn handle_search(&mut self, code: KeyCode, mut state: SearchState) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.show_all()?;
                return Ok(Mode::Normal);
            }
            KeyCode::Enter => {
                if self.catalog.is_filtered() {
                    let count = self.catalog.books.len();
                    let noun = if count == 1 { "book matches" } else { "books match" };
                    self.set_status(
                        format!("{count} {noun} '{}'.", state.query.trim()),
                        StatusKind::Info,
                    );
                }
                return Ok(Mode::Normal);
            }
            KeyCode::Up => {
                self.catalog.move_selection(-1);
                return Ok(Mode::Searching(state));
            }
            KeyCode::Down => {
                self.catalog.move_selection(1);
                return Ok(Mode::Searching(state));
            }
            KeyCode::PageUp => {
                self.catalog.move_selection(-5);
                return Ok(Mode::Searching(state));
            }
            KeyCode::PageDown => {
                self.catalog.move_selection(5);
                return Ok(Mode::Searching(state));
            }
            KeyCode::Home => {
                self.catalog.select_first();
                return Ok(Mode::Searching(state));
            }
            KeyCode::End => {
                self.catalog.select_last();
                return Ok(Mode::Searching(state));
            }
            KeyCode::Backspace => {
                state.query.pop();
            }
            KeyCode::Char(ch) => {
                if !ch.is_control() {
                    state.query.push(ch);
                }
            }
            _ => {}
        }

        self.apply_search(&state.query)?;
        Ok(Mode::Searching(state))
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        self.draw_catalog(frame, content_area);

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::AddingBook(form) => self.draw_book_form(frame, area, "Add Book", form),
            Mode::ConfirmDelete(confirm) => self.draw_confirm_delete(frame, area, confirm),
            Mode::Searching(state) => self.draw_search_bar(frame, area, state),
            Mode::Normal => {}
        }
    }

    fn draw_catalog(&self, frame: &mut Frame, area: Rect) {
        let title = if let Some(keyword) = &self.catalog.filter {
            format!("Catalog (matching '{keyword}')")
        } else {
            "Catalog".to_string()
        };
        let block = Block::default().borders(Borders::ALL).title(title);

        if self.catalog.books.is_empty() {
            let message = if self.catalog.is_filtered() {
                "No books match the current search."
            } else {
                "No books yet. Press '+' to add one."
            };
            let paragraph = Paragraph::new(message)
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);
        if inner.height < 2 || inner.width == 0 {
            return;
        }

        let usable = (inner.width as usize).saturating_sub(POINTER_WIDTH + 3 * COLUMN_GAP);
        let widths = column_widths(usable);
        let gap = " ".repeat(COLUMN_GAP);

        let mut lines = Vec::with_capacity(inner.height as usize);
        lines.push(Line::from(Span::styled(
            format!(
                "{}{}{gap}{}{gap}{}{gap}{}",
                " ".repeat(POINTER_WIDTH),
                clip_pad("Title", widths[0]),
                clip_pad("Author", widths[1]),
                clip_pad("Year", widths[2]),
                clip_pad("ISBN", widths[3]),
            ),
            Style::default().add_modifier(Modifier::BOLD),
        )));

        // Keep the selected row inside the visible window, scrolling the
        // slice rather than the widget.
        let capacity = (inner.height as usize - 1).max(1);
        let len = self.catalog.books.len();
        let selected = self.catalog.selected;
        let mut start = if selected >= capacity {
            selected + 1 - capacity
        } else {
            0
        };
        if start + capacity > len {
            start = len.saturating_sub(capacity);
        }
        let end = min(start + capacity, len);

        for (index, book) in self.catalog.books[start..end].iter().enumerate() {
            let book_index = start + index;
            let row = format!(
                "{}{gap}{}{gap}{}{gap}{}",
                clip_pad(&book.title, widths[0]),
                clip_pad(&book.author, widths[1]),
                clip_pad(&book.year, widths[2]),
                clip_pad(&book.isbn, widths[3]),
            );
            if book_index == selected {
                lines.push(Line::from(Span::styled(
                    format!("▶ {row}"),
                    Style::default().fg(Color::Yellow),
                )));
            } else {
                lines.push(Line::from(format!("  {row}")));
            }
        }

        let paragraph = Paragraph::new(lines).alignment(Alignment::Left);
        frame.render_widget(paragraph, inner);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        match &self.mode {
            Mode::AddingBook(_) => Line::from(vec![
                Span::styled("[Enter]", key_style),
                Span::raw(" Save   "),
                Span::styled("[Tab]", key_style),
                Span::raw(" Next Field   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            Mode::ConfirmDelete(_) => Line::from(vec![
                Span::styled("[y]", key_style),
                Span::raw(" Confirm   "),
                Span::styled("[n/Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            Mode::Searching(_) => Line::from(vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Select   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Keep Results   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Clear Search"),
            ]),
            Mode::Normal => Line::from(vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Select   "),
                Span::styled("[+]", key_style),
                Span::raw(" Add   "),
                Span::styled("[-]", key_style),
                Span::raw(" Delete   "),
                Span::styled("[f]", key_style),
                Span::raw(" Search   "),
                Span::styled("[v]", key_style),
                Span::raw(" View All   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
        }
    }

    fn draw_book_form(&self, frame: &mut Frame, area: Rect, title: &str, form: &BookForm) {
        let popup_area = centered_rect(60, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let title_line = form.build_line("Title", BookField::Title);
        let author_line = form.build_line("Author", BookField::Author);
        let year_line = form.build_line("Year", BookField::Year);
        let isbn_line = form.build_line("ISBN", BookField::Isbn);

        let mut lines = vec![title_line, author_line, year_line, isbn_line, Line::from("")];

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save, Tab to switch, Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let (prefix, row) = match form.active {
            BookField::Title => ("Title: ", 0),
            BookField::Author => ("Author: ", 1),
            BookField::Year => ("Year: ", 2),
            BookField::Isbn => ("ISBN: ", 3),
        };
        let cursor_x = inner.x + prefix.len() as u16 + form.value_len(form.active) as u16;
        let cursor_y = inner.y + row;
        frame.set_cursor_position((cursor_x, cursor_y));
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmBookDelete) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Confirm Deletion")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(format!(
                "Delete '{}' by {}?",
                confirm.book.title, confirm.book.author
            )),
            Line::from(format!(
                "The first entry with ISBN {} will be removed.",
                confirm.book.isbn
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn draw_search_bar(&self, frame: &mut Frame, area: Rect, state: &SearchState) {
        let height = 3u16.min(area.height);
        let popup_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height,
        };
        frame.render_widget(Clear, popup_area);

        let block = Block::default().borders(Borders::ALL).title("Search");
        let paragraph = Paragraph::new(Span::raw(format!("Search: {}", state.query)))
            .block(block.clone())
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);

        let inner = block.inner(popup_area);
        let cursor_x = inner.x + "Search: ".len() as u16 + state.query.chars().count() as u16;
        let cursor_y = inner.y;
        frame.set_cursor_position((cursor_x, cursor_y));
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    fn save_new_book(&mut self, form: &BookForm) -> Result<()> {
        let (title, author, year, isbn) = form.parse_inputs()?;
        let book = add_book(&self.conn, &title, &author, &year, &isbn)?;
        // Saving clears any active search so the new entry is visible at the
        // end of the full catalog.
        self.show_all()?;
        self.catalog.select_last();
        self.set_status(format!("Added '{}'.", book.title), StatusKind::Info);
        Ok(())
    }

    fn perform_delete(&mut self, confirm: &ConfirmBookDelete) -> Result<()> {
        if delete_book(&self.conn, &confirm.book.isbn)? {
            self.show_all()?;
            self.set_status(
                format!("Deleted '{}'.", confirm.book.title),
                StatusKind::Info,
            );
        } else {
            self.set_status("Book not found.", StatusKind::Error);
        }
        Ok(())
    }

    /// Refresh the table with the full catalog, dropping any active search.
    fn show_all(&mut self) -> Result<()> {
        let books = fetch_all_books(&self.conn)?;
        self.catalog.show(books, None);
        Ok(())
    }

    /// Re-run the store search for the current query. An emptied query falls
    /// back to the full catalog; the store is never asked to search an empty
    /// keyword.
    fn apply_search(&mut self, query: &str) -> Result<()> {
        if query.trim().is_empty() {
            self.show_all()
        } else {
            let results = search_books(&self.conn, query)?;
            self.catalog.show(results, Some(query.to_string()));
            Ok(())
        }
    }
}
