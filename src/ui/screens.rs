use crate::models::Book;

/// Wrapper around the rows currently shown in the catalog table, together
/// with the active search keyword and the selection. The rows are always a
/// fresh snapshot from the store — either the full catalog or the results of
/// the active search — so this type never filters on its own.
pub(crate) struct CatalogScreen {
    pub(crate) books: Vec<Book>,
    pub(crate) filter: Option<String>,
    pub(crate) selected: usize,
}

impl CatalogScreen {
    pub(crate) fn new(books: Vec<Book>) -> Self {
        Self {
            books,
            filter: None,
            selected: 0,
        }
    }

    /// Replace the visible rows and remember which keyword (if any) produced
    /// them. The selection is clamped so it always points at a real row.
    pub(crate) fn show(&mut self, books: Vec<Book>, filter: Option<String>) {
        self.books = books;
        self.filter = filter;
        self.ensure_in_bounds();
    }

    pub(crate) fn current_book(&self) -> Option<&Book> {
        self.books.get(self.selected)
    }

    pub(crate) fn is_filtered(&self) -> bool {
        self.filter.is_some()
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.books.is_empty() {
            return;
        }
        let len = self.books.len() as isize;
        let mut new = self.selected as isize + offset;
        if new < 0 {
            new = 0;
        }
        if new >= len {
            new = len - 1;
        }
        self.selected = new as usize;
    }

    pub(crate) fn select_first(&mut self) {
        if !self.books.is_empty() {
            self.selected = 0;
        }
    }

    pub(crate) fn select_last(&mut self) {
        if !self.books.is_empty() {
            self.selected = self.books.len() - 1;
        }
    }

    fn ensure_in_bounds(&mut self) {
        if self.books.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.books.len() {
            self.selected = self.books.len() - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(isbn: &str) -> Book {
        Book {
            title: format!("Book {isbn}"),
            author: "Author".to_string(),
            year: "2000".to_string(),
            isbn: isbn.to_string(),
        }
    }

    #[test]
    fn selection_clamps_at_both_ends() {
        let mut screen = CatalogScreen::new(vec![book("1"), book("2"), book("3")]);
        screen.move_selection(-5);
        assert_eq!(screen.selected, 0);
        screen.move_selection(10);
        assert_eq!(screen.selected, 2);
    }

    #[test]
    fn selection_is_inert_on_an_empty_catalog() {
        let mut screen = CatalogScreen::new(Vec::new());
        screen.move_selection(1);
        screen.select_last();
        assert_eq!(screen.selected, 0);
        assert!(screen.current_book().is_none());
    }

    #[test]
    fn show_clamps_a_stale_selection() {
        let mut screen = CatalogScreen::new(vec![book("1"), book("2"), book("3")]);
        screen.select_last();
        screen.show(vec![book("1")], Some("1".to_string()));
        assert_eq!(screen.selected, 0);
        assert!(screen.is_filtered());
        assert_eq!(screen.current_book().map(|b| b.isbn.as_str()), Some("1"));
    }
}
